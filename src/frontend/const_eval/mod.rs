//! Const求值模块
//!
//! 把字段初始化表达式折叠为编译期常量值。名称引用通过 [`ConstResolver`]
//! 解析；[`ModelResolver`] 基于语义模型快照实现它。

pub mod builtins;
pub mod const_evaluator;
pub mod error;
pub mod resolver;
pub mod value;


// 导出主要类型
pub use const_evaluator::{ConstEvaluator, DEFAULT_MAX_DEPTH};
pub use error::ConstEvalError;
pub use resolver::{ConstCache, ConstResolver, ModelResolver, NoConstants, ScopedResolver};
pub use value::{ConstantValue, ValueKind};

use crate::frontend::model::Expr;

/// 以默认深度限制求值表达式
pub fn evaluate<R: ConstResolver + ?Sized>(
    expr: &Expr,
    resolver: &R,
) -> ConstantValue {
    ConstEvaluator::new(resolver).evaluate(expr)
}
