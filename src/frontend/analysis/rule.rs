//! 字面量规则：`static readonly` 字段的初始化器是编译期常量时，建议改为 `const`
//!
//! 检查按固定顺序进行，第一个失败的条件即终止：
//! 1. 可访问性为 private
//! 2. static
//! 3. readonly 且不是 const
//! 4. 存在初始化器
//! 5. 初始化器折叠为常量
//! 6. 声明类型可以是 const，且常量值能隐式转换为该类型
//!
//! 通过检查的声明器恰好产生一条诊断：空字符串使用 `EmptyStringRule`，
//! 其余使用 `DefaultRule`，位置为声明器的名称标识符。

use std::fmt;

use tracing::{debug, trace};

use crate::frontend::const_eval::{ConstEvalError, ConstEvaluator, ConstResolver, ConstantValue, DEFAULT_MAX_DEPTH};
use crate::frontend::model::{Accessibility, FieldDeclaration};
use crate::util::diagnostic::{Diagnostic, RuleId};

/// 不符合条件的原因（仅用于日志，不向用户展示）
#[derive(Debug, Clone, PartialEq)]
pub enum Ineligible {
    NotPrivate(Accessibility),
    NotStatic,
    NotReadOnly,
    AlreadyConst,
    NoInitializer,
    NotConstant(ConstEvalError),
    /// 声明类型不能声明为 const（object、可空类型、接口……）
    NonConstType(String),
}

impl fmt::Display for Ineligible {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Ineligible::NotPrivate(accessibility) => write!(f, "field is {}", accessibility),
            Ineligible::NotStatic => write!(f, "field is not static"),
            Ineligible::NotReadOnly => write!(f, "field is not readonly"),
            Ineligible::AlreadyConst => write!(f, "field is already const"),
            Ineligible::NoInitializer => write!(f, "field has no initializer"),
            Ineligible::NotConstant(err) => write!(f, "initializer is not constant: {}", err),
            Ineligible::NonConstType(ty) => write!(f, "type `{}` cannot be declared const", ty),
        }
    }
}

/// 检查结论
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityVerdict {
    /// 值一定不是 `NotConstant`
    Eligible(ConstantValue),
    NotEligible(Ineligible),
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible(_))
    }
}

type Guard = fn(&FieldDeclaration<'_>) -> Result<(), Ineligible>;

/// 结构性检查，按顺序执行
const GUARDS: &[Guard] = &[is_private, is_static, is_readonly_not_const, has_initializer];

fn is_private(field: &FieldDeclaration<'_>) -> Result<(), Ineligible> {
    match field.accessibility() {
        Accessibility::Private => Ok(()),
        other => Err(Ineligible::NotPrivate(other)),
    }
}

fn is_static(field: &FieldDeclaration<'_>) -> Result<(), Ineligible> {
    if field.is_static() {
        Ok(())
    } else {
        Err(Ineligible::NotStatic)
    }
}

fn is_readonly_not_const(field: &FieldDeclaration<'_>) -> Result<(), Ineligible> {
    if field.is_const() {
        Err(Ineligible::AlreadyConst)
    } else if !field.is_readonly() {
        Err(Ineligible::NotReadOnly)
    } else {
        Ok(())
    }
}

fn has_initializer(field: &FieldDeclaration<'_>) -> Result<(), Ineligible> {
    field.initializer().map(|_| ()).ok_or(Ineligible::NoInitializer)
}

/// 字面量规则
#[derive(Debug, Clone, Copy)]
pub struct UseLiteralsRule {
    max_depth: usize,
}

impl UseLiteralsRule {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// 初始化表达式的最大嵌套深度
    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 判定单个声明器是否符合条件
    pub fn verdict<R: ConstResolver + ?Sized>(
        &self,
        field: &FieldDeclaration<'_>,
        resolver: &R,
    ) -> EligibilityVerdict {
        if let Err(reason) = GUARDS.iter().try_for_each(|guard| guard(field)) {
            return EligibilityVerdict::NotEligible(reason);
        }
        let Some(initializer) = field.initializer() else {
            return EligibilityVerdict::NotEligible(Ineligible::NoInitializer);
        };

        let value = match ConstEvaluator::new(resolver)
            .with_language(field.language)
            .with_max_depth(self.max_depth)
            .try_evaluate(initializer)
        {
            Ok(value) => value,
            Err(err) => return EligibilityVerdict::NotEligible(Ineligible::NotConstant(err)),
        };

        // 折叠出的值还必须能以声明类型存放在 const 中
        let Some(target) = field.primitive_type() else {
            return EligibilityVerdict::NotEligible(Ineligible::NonConstType(
                field.declared_type().to_string(),
            ));
        };
        match value.convert_implicit(target) {
            Ok(value) => EligibilityVerdict::Eligible(value),
            Err(err) => EligibilityVerdict::NotEligible(Ineligible::NotConstant(err)),
        }
    }

    /// 检查单个声明器，至多产生一条诊断
    pub fn evaluate<R: ConstResolver + ?Sized>(
        &self,
        field: &FieldDeclaration<'_>,
        resolver: &R,
    ) -> Option<Diagnostic> {
        match self.verdict(field, resolver) {
            EligibilityVerdict::Eligible(value) => {
                let diagnostic = Self::diagnostic(field, &value);
                debug!("{} `{}` at {}", diagnostic.rule, field.name(), field.name_span().start);
                Some(diagnostic)
            }
            EligibilityVerdict::NotEligible(reason) => {
                trace!("skipping `{}`: {}", field.name(), reason);
                None
            }
        }
    }

    fn diagnostic(
        field: &FieldDeclaration<'_>,
        value: &ConstantValue,
    ) -> Diagnostic {
        if value.is_empty_string() {
            RuleId::EmptyString
                .descriptor()
                .builder()
                .param("name", field.name())
                .at(field.name_span())
                .build()
        } else {
            RuleId::Default
                .descriptor()
                .builder()
                .param("name", field.name())
                .param("value", value.to_string())
                .at(field.name_span())
                .build()
        }
    }
}

impl Default for UseLiteralsRule {
    fn default() -> Self {
        Self::new()
    }
}
