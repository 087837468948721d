//! 诊断数据结构
//!
//! 提供统一的诊断报告机制
//!
//! # 设计原则
//!
//! - `Diagnostic` 中的 `message` 和 `help` 在构建时已渲染完成
//! - **只允许通过 `DiagnosticBuilder` 创建诊断**，规则描述符必须在注册表中注册
//! - 规则身份（`RuleId`）与消息文本分开保存，下游工具（抑制、基线、严重级别覆盖）
//!   按规则身份寻址

use serde::{Deserialize, Serialize};

use super::codes::{RuleDescriptor, RuleId};
use crate::util::span::Span;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// 获取严重级别对应的数字值
    pub fn as_u8(&self) -> u8 {
        match self {
            Severity::Error => 4,
            Severity::Warning => 3,
            Severity::Info => 2,
            Severity::Hint => 1,
        }
    }

    /// 检查是否为错误级别
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// 规则级别（配置层使用）
///
/// `Allow` 关闭规则，其余级别映射到 [`Severity`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LintLevel {
    Allow,
    Hint,
    Info,
    Warn,
    Error,
}

impl LintLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LintLevel::Allow => "allow",
            LintLevel::Hint => "hint",
            LintLevel::Info => "info",
            LintLevel::Warn => "warn",
            LintLevel::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" | "off" | "none" => Some(LintLevel::Allow),
            "hint" | "suggestion" => Some(LintLevel::Hint),
            "info" | "information" => Some(LintLevel::Info),
            "warn" | "warning" => Some(LintLevel::Warn),
            "error" | "deny" => Some(LintLevel::Error),
            _ => None,
        }
    }

    /// 对应的诊断严重级别；`Allow` 表示不产生诊断
    pub fn severity(self) -> Option<Severity> {
        match self {
            LintLevel::Allow => None,
            LintLevel::Hint => Some(Severity::Hint),
            LintLevel::Info => Some(Severity::Info),
            LintLevel::Warn => Some(Severity::Warning),
            LintLevel::Error => Some(Severity::Error),
        }
    }
}

impl TryFrom<String> for LintLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        LintLevel::parse(&value).ok_or_else(|| format!("unknown lint level `{}`", value))
    }
}

impl From<LintLevel> for String {
    fn from(level: LintLevel) -> Self {
        level.as_str().to_string()
    }
}

impl std::fmt::Display for LintLevel {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 诊断信息（message 已渲染完成）
///
/// **不可直接构造**。必须通过 `DiagnosticBuilder::build()` 创建。
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 规则身份
    pub rule: RuleId,
    /// 严重级别
    pub severity: Severity,
    /// 规则代码，如 "LIT1802"
    pub code: &'static str,
    /// 完整消息
    pub message: String,
    /// 帮助信息
    pub help: String,
    /// 位置信息（声明符名称）
    pub span: Option<Span>,
    /// 消息格式参数（字段名，及 DefaultRule 的常量值）
    pub arguments: Vec<String>,
    /// 所属文件
    pub file: Option<String>,
}

impl Diagnostic {
    /// `pub(crate)`: 仅由 `DiagnosticBuilder::build()` 调用。
    pub(crate) fn new(
        descriptor: &'static RuleDescriptor,
        severity: Severity,
        message: String,
        help: String,
        span: Option<Span>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            rule: descriptor.id,
            severity,
            code: descriptor.code,
            message,
            help,
            span,
            arguments,
            file: None,
        }
    }

    /// 规则描述符
    pub fn descriptor(&self) -> &'static RuleDescriptor {
        self.rule.descriptor()
    }

    /// 被报告的字段名
    pub fn symbol_name(&self) -> &str {
        self.arguments.first().map(String::as_str).unwrap_or_default()
    }

    /// 渲染后的常量值（仅 DefaultRule）
    pub fn value(&self) -> Option<&str> {
        self.arguments.get(1).map(String::as_str)
    }

    /// 覆盖严重级别
    pub fn with_severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = severity;
        self
    }

    /// 设置所属文件
    pub fn in_file(
        mut self,
        file: impl Into<String>,
    ) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
