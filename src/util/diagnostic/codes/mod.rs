//! 规则描述符注册表
//!
//! 集中定义本规则的两个诊断变体。两个变体共享同一判定流程，但拥有各自独立的
//! 规则身份，以便抑制、基线和严重级别覆盖分别寻址。

pub mod builder;
pub use builder::DiagnosticBuilder;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::error::LintLevel;

/// 规则身份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    /// 常量值为一般字面量
    Default,
    /// 常量值为空字符串
    EmptyString,
}

impl RuleId {
    /// 对应的描述符
    pub fn descriptor(self) -> &'static RuleDescriptor {
        match self {
            RuleId::Default => &RULES[0],
            RuleId::EmptyString => &RULES[1],
        }
    }

    /// 规则的对外名称（`DefaultRule` / `EmptyStringRule`）
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::Default => "DefaultRule",
            RuleId::EmptyString => "EmptyStringRule",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 规则类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Performance,
    Style,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            RuleCategory::Performance => write!(f, "performance"),
            RuleCategory::Style => write!(f, "style"),
        }
    }
}

/// 规则描述符（元数据 + 消息模板）
#[derive(Debug, Clone)]
pub struct RuleDescriptor {
    pub id: RuleId,
    /// 规则代码，如 "LIT1802"
    pub code: &'static str,
    /// 规则名，如 "use_literal"
    pub name: &'static str,
    pub title: &'static str,
    pub category: RuleCategory,
    pub default_level: LintLevel,
    /// 消息模板，支持 {param} 占位符
    pub message_template: &'static str,
    pub help: &'static str,
}

impl RuleDescriptor {
    /// 创建 DiagnosticBuilder
    pub fn builder(&'static self) -> DiagnosticBuilder {
        DiagnosticBuilder::new(self)
    }

    /// 根据代码或规则名查找描述符
    ///
    /// 代码不区分大小写；规则名中的 `-` 与 `_` 等价。
    pub fn find(key: &str) -> Option<&'static Self> {
        let canonical = canonical_rule_name(key);
        RULE_INDEX.get(canonical.as_str()).copied()
    }

    /// 获取所有描述符
    pub fn all() -> &'static [Self] {
        RULES
    }
}

/// 规范化规则键：去引号、去空白、`-` 转 `_`、转小写
pub fn canonical_rule_name(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '"' || c == '\'')
        .trim()
        .replace('-', "_")
        .to_ascii_lowercase()
}

static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        id: RuleId::Default,
        code: "LIT1802",
        name: "use_literal",
        title: "Use literals where appropriate",
        category: RuleCategory::Performance,
        default_level: LintLevel::Warn,
        message_template: "Field '{name}' is declared as 'readonly' but is initialized to a constant value \"{value}\". Mark this field as 'const' instead.",
        help: "a 'const' field is substituted at compile time and needs no runtime field load",
    },
    RuleDescriptor {
        id: RuleId::EmptyString,
        code: "LIT1803",
        name: "use_empty_string_literal",
        title: "Use literals where appropriate",
        category: RuleCategory::Performance,
        default_level: LintLevel::Warn,
        message_template: "Field '{name}' is declared as 'readonly' but is initialized to an empty string (\"\"). Mark this field as 'const' instead.",
        help: "declare the field as 'const' with an empty string literal",
    },
];

/// 代码与规则名（均已规范化）到描述符的索引
static RULE_INDEX: Lazy<HashMap<String, &'static RuleDescriptor>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for rule in RULES {
        index.insert(canonical_rule_name(rule.code), rule);
        index.insert(canonical_rule_name(rule.name), rule);
        index.insert(canonical_rule_name(rule.id.as_str()), rule);
    }
    index
});
