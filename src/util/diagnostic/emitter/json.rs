//! JSON 诊断渲染器
//!
//! 提供符合 Language Server Protocol (LSP) 规范的 JSON 输出

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::Span;

/// LSP 诊断严重级别（序列化为数字 1..4）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LspDiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl Serialize for LspDiagnosticSeverity {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for LspDiagnosticSeverity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(Self::Error),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Information),
            4 => Ok(Self::Hint),
            other => Err(serde::de::Error::custom(format!(
                "invalid LSP severity {}",
                other
            ))),
        }
    }
}

/// LSP 位置范围
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspRange {
    pub start: LspPosition,
    pub end: LspPosition,
}

/// LSP 位置（从 0 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspPosition {
    pub line: u32,
    pub character: u32,
}

/// LSP 诊断结构
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspDiagnostic {
    /// 诊断范围
    pub range: LspRange,
    /// 严重级别
    pub severity: Option<LspDiagnosticSeverity>,
    /// 规则代码
    pub code: Option<String>,
    /// 来源
    pub source: String,
    /// 诊断消息
    pub message: String,
    /// 附加数据：规则身份、格式参数、文件
    pub data: LspDiagnosticData,
}

/// 供下游工具（抑制、基线）使用的结构化数据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LspDiagnosticData {
    pub rule: String,
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// JSON 诊断渲染器
#[derive(Debug, Clone)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// 渲染诊断为 JSON 字符串
    pub fn render(diagnostic: &Diagnostic) -> String {
        let lsp_diagnostic = Self::to_lsp_diagnostic(diagnostic);
        serde_json::to_string_pretty(&lsp_diagnostic).unwrap_or_else(|_| "{}".to_string())
    }

    /// 渲染多个诊断
    pub fn render_all(diagnostics: &[Diagnostic]) -> String {
        let lsp_diagnostics: Vec<LspDiagnostic> =
            diagnostics.iter().map(Self::to_lsp_diagnostic).collect();
        serde_json::to_string_pretty(&lsp_diagnostics).unwrap_or_else(|_| "[]".to_string())
    }

    /// 转换为 LSP 诊断结构
    pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> LspDiagnostic {
        LspDiagnostic {
            range: Self::span_to_range(diagnostic.span.as_ref()),
            severity: Some(match diagnostic.severity {
                Severity::Error => LspDiagnosticSeverity::Error,
                Severity::Warning => LspDiagnosticSeverity::Warning,
                Severity::Info => LspDiagnosticSeverity::Information,
                Severity::Hint => LspDiagnosticSeverity::Hint,
            }),
            code: Some(diagnostic.code.to_string()),
            source: crate::NAME.to_string(),
            message: diagnostic.message.clone(),
            data: LspDiagnosticData {
                rule: diagnostic.rule.to_string(),
                arguments: diagnostic.arguments.clone(),
                file: diagnostic.file.clone(),
            },
        }
    }

    /// 转换 Span 到 LSP Range
    fn span_to_range(span: Option<&Span>) -> LspRange {
        match span {
            Some(s) if !s.is_dummy() => LspRange {
                start: LspPosition {
                    line: s.start.line.saturating_sub(1) as u32,
                    character: s.start.column.saturating_sub(1) as u32,
                },
                end: LspPosition {
                    line: s.end.line.saturating_sub(1) as u32,
                    character: s.end.column.saturating_sub(1) as u32,
                },
            },
            _ => Self::dummy_range(),
        }
    }

    /// 创建虚拟 Range（用于无位置的诊断）
    fn dummy_range() -> LspRange {
        LspRange {
            start: LspPosition {
                line: 0,
                character: 0,
            },
            end: LspPosition {
                line: 0,
                character: 0,
            },
        }
    }
}
