//! 常量求值错误
//!
//! 仅在求值器内部与测试中可见；对外一律折叠为 `ConstantValue::NotConstant`。

use thiserror::Error;

use crate::frontend::model::{PrimitiveType, UnsupportedExpr};

/// Const求值错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstEvalError {
    #[error("null literal is not a constant value")]
    NullLiteral,

    #[error("`{name}` does not refer to a constant")]
    NonConstantSymbol { name: String },

    #[error("{kind} is not a constant expression")]
    Unsupported { kind: UnsupportedExpr },

    #[error("constant expression `{expr}` overflows")]
    Overflow { expr: String },

    #[error("division by zero in constant expression")]
    DivisionByZero,

    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("operator `{op}` cannot be applied to {operand}")]
    InvalidOperand {
        op: &'static str,
        operand: &'static str,
    },

    #[error("cannot convert {from} to {to} in a constant expression")]
    InvalidConversion {
        from: &'static str,
        to: PrimitiveType,
    },

    #[error("constant expression nesting depth {depth} exceeds limit {max_depth}")]
    RecursionTooDeep { depth: usize, max_depth: usize },
}
