//! 统一诊断系统
//!
//! 提供规则描述符、诊断构建与渲染
//!
//! # 模块结构
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, Severity, LintLevel)
//! - [`codes`] - 规则描述符注册表与 `DiagnosticBuilder`
//! - [`emitter`] - 文本与 JSON 渲染器
//!
//! # 示例
//!
//! ```
//! use use_literals::util::diagnostic::{RuleId, TextEmitter};
//! use use_literals::util::span::Span;
//!
//! let diagnostic = RuleId::Default
//!     .descriptor()
//!     .builder()
//!     .param("name", "f5")
//!     .param("value", "3")
//!     .at(Span::at(7, 25, 2))
//!     .build();
//! let output = TextEmitter::plain().render(&diagnostic, None);
//! assert!(output.contains("warning[LIT1802]"));
//! ```

pub mod codes;
pub mod emitter;
pub mod error;

// 重新导出
pub use codes::{DiagnosticBuilder, RuleCategory, RuleDescriptor, RuleId};
pub use emitter::{EmitterConfig, JsonEmitter, TextEmitter};
pub use error::{Diagnostic, LintLevel, Severity};

/// 诊断集合中最高的严重级别
pub fn max_severity<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Option<Severity> {
    diagnostics.into_iter().map(|d| d.severity).max()
}
