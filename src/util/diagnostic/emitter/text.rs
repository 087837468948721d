//! 文本诊断渲染器

use owo_colors::OwoColorize;

use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::SourceFile;

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示源码片段
    pub show_source: bool,
    /// 是否显示帮助信息
    pub show_help: bool,
    /// 是否显示行号
    pub show_line_numbers: bool,
    /// 指示字符 (默认: "^")
    pub indicator: char,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_source: true,
            show_help: true,
            show_line_numbers: true,
            indicator: '^',
        }
    }
}

/// 文本诊断渲染器
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    /// 创建新的文本渲染器
    pub fn new() -> Self {
        Self::default()
    }

    /// 无颜色渲染器
    pub fn plain() -> Self {
        Self::with_config(EmitterConfig {
            use_colors: false,
            ..Default::default()
        })
    }

    /// 使用自定义配置创建渲染器
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// 渲染单个诊断
    pub fn render(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = String::new();

        // 1. 渲染头部
        output.push_str(&self.render_header(diagnostic));

        // 2. 渲染位置
        output.push_str(&self.render_location(diagnostic, source_file));

        // 3. 渲染源码片段
        if self.config.show_source {
            if let Some(snippet) = self.render_source_snippet(diagnostic, source_file) {
                output.push_str(&snippet);
            }
        }

        // 4. 渲染帮助信息
        if self.config.show_help && !diagnostic.help.is_empty() {
            output.push_str("     = help: ");
            output.push_str(&diagnostic.help);
            output.push('\n');
        }

        output
    }

    /// 渲染多个诊断
    pub fn render_all<'a>(
        &self,
        diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
        source_file: Option<&SourceFile>,
    ) -> String {
        let mut output = String::new();
        for diagnostic in diagnostics {
            output.push_str(&self.render(diagnostic, source_file));
            output.push('\n');
        }
        output
    }

    /// 渲染头部
    fn render_header(
        &self,
        diagnostic: &Diagnostic,
    ) -> String {
        let severity = diagnostic.severity.to_string();
        let code = format!("[{}]", diagnostic.code);
        if !self.config.use_colors {
            return format!("{}{}: {}\n", severity, code, diagnostic.message);
        }

        let severity = match diagnostic.severity {
            Severity::Error => severity.red().bold().to_string(),
            Severity::Warning => severity.yellow().bold().to_string(),
            Severity::Info => severity.blue().bold().to_string(),
            Severity::Hint => severity.cyan().bold().to_string(),
        };
        format!("{}{}: {}\n", severity, code.bold(), diagnostic.message.bold())
    }

    /// 渲染位置信息
    fn render_location(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> String {
        let Some(span) = diagnostic.span.filter(|span| !span.is_dummy()) else {
            return String::new();
        };

        let file_name = diagnostic
            .file
            .as_deref()
            .or(source_file.map(|sf| sf.name.as_str()))
            .unwrap_or("<unknown>");
        let arrow = if self.config.use_colors {
            "-->".blue().to_string()
        } else {
            "-->".to_string()
        };
        format!(
            "  {} {}:{}:{}\n",
            arrow, file_name, span.start.line, span.start.column
        )
    }

    /// 渲染源码片段（仅起始行）
    fn render_source_snippet(
        &self,
        diagnostic: &Diagnostic,
        source_file: Option<&SourceFile>,
    ) -> Option<String> {
        let span = diagnostic.span.filter(|span| !span.is_dummy())?;
        let line = source_file?.line(span.start.line)?;

        let gutter = if self.config.show_line_numbers {
            format!("{:>4} | ", span.start.line)
        } else {
            "     | ".to_string()
        };
        let spaces = " ".repeat(span.start.column.saturating_sub(1));
        let indicator_len = if span.start.line == span.end.line {
            span.end.column.saturating_sub(span.start.column).max(1)
        } else {
            line.len().saturating_sub(spaces.len()).max(1)
        };
        let indicators = self.config.indicator.to_string().repeat(indicator_len);
        let indicators = if self.config.use_colors {
            indicators.yellow().to_string()
        } else {
            indicators
        };

        Some(format!("{}{}\n     | {}{}\n", gutter, line, spaces, indicators))
    }
}
