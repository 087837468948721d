//! 通用诊断构建器
//!
//! 支持模板参数化的消息构建器

use super::RuleDescriptor;
use crate::util::diagnostic::{Diagnostic, Severity};
use crate::util::span::Span;

/// 诊断构建器（支持模板参数）
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    descriptor: &'static RuleDescriptor,
    params: Vec<(&'static str, String)>,
    span: Option<Span>,
    severity: Option<Severity>,
}

impl DiagnosticBuilder {
    /// 创建新的诊断构建器
    pub fn new(descriptor: &'static RuleDescriptor) -> Self {
        Self {
            descriptor,
            params: Vec::new(),
            span: None,
            severity: None,
        }
    }

    /// 添加模板参数
    ///
    /// 参数按添加顺序同时作为诊断的格式参数保存。
    pub fn param(
        mut self,
        key: &'static str,
        value: impl Into<String>,
    ) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// 设置位置
    #[inline]
    pub fn at(
        mut self,
        span: Span,
    ) -> Self {
        self.span = Some(span);
        self
    }

    /// 设置严重级别（缺省为描述符的默认级别）
    #[inline]
    pub fn severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = Some(severity);
        self
    }

    /// 构建 Diagnostic
    pub fn build(&self) -> Diagnostic {
        let missing = self.missing_params();
        debug_assert!(
            missing.is_empty(),
            "missing template parameter(s) {:?} for rule '{}'",
            missing,
            self.descriptor.code
        );
        if !missing.is_empty() {
            tracing::warn!(
                "rule {} rendered with missing template parameter(s): {:?}",
                self.descriptor.code,
                missing
            );
        }

        let severity = self
            .severity
            .or_else(|| self.descriptor.default_level.severity())
            .unwrap_or(Severity::Warning);
        let message = render_template(self.descriptor.message_template, &self.params);
        let arguments = self.params.iter().map(|(_, value)| value.clone()).collect();

        Diagnostic::new(
            self.descriptor,
            severity,
            message,
            self.descriptor.help.to_string(),
            self.span,
            arguments,
        )
    }

    /// 模板中出现但未提供的占位符
    fn missing_params(&self) -> Vec<String> {
        placeholders(self.descriptor.message_template)
            .filter(|key| !self.params.iter().any(|(k, _)| k == key))
            .map(str::to_string)
            .collect()
    }
}

/// 模板中的 `{key}` 占位符
fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    template.split('{').skip(1).filter_map(|rest| {
        let end = rest.find('}')?;
        let key = &rest[..end];
        (!key.is_empty()).then_some(key)
    })
}

/// 以参数替换 `{key}` 占位符；未知占位符原样保留
pub fn render_template(
    template: &str,
    params: &[(&'static str, String)],
) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                output.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}
