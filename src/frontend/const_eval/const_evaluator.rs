//! Const求值引擎
//!
//! 实现初始化表达式的编译期常量折叠，遵循 .NET 语义：
//! - 整数字面量为 Int32 或 Int64，二元运算提升到较宽的宽度
//! - `char` 操作数提升为 Int32，整数与浮点数混合时提升为浮点
//! - 整数溢出、整数除零均使整个表达式不是常量
//! - VB 的 `/` 总是浮点除法，整除写作 `\\`
//! - 浮点除零遵循 IEEE-754
//! - 移位计数按操作数宽度取模（`& 31` / `& 63`）
//! - 递归深度限制

use std::cmp::Ordering;

use tracing::trace;

use super::error::ConstEvalError;
use super::resolver::ConstResolver;
use super::value::ConstantValue;
use crate::frontend::model::{BinOp, Expr, IntWidth, Language, Literal, PrimitiveType, UnOp};

/// 默认最大嵌套深度
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Const求值器
///
/// 求值器本身不持有可变状态，可在多个线程中共享同一个解析器。
pub struct ConstEvaluator<'r, R: ConstResolver + ?Sized> {
    /// 名称解析器
    resolver: &'r R,
    /// 源语言，决定 `/` 的语义
    language: Language,
    /// 最大嵌套深度
    max_depth: usize,
}

impl<'r, R: ConstResolver + ?Sized> ConstEvaluator<'r, R> {
    /// 创建新的Const求值器
    pub fn new(resolver: &'r R) -> Self {
        ConstEvaluator {
            resolver,
            language: Language::CSharp,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// 设置源语言
    pub fn with_language(
        mut self,
        language: Language,
    ) -> Self {
        self.language = language;
        self
    }

    /// 设置最大嵌套深度
    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 求值初始化表达式；任何失败都折叠为 `NotConstant`
    pub fn evaluate(
        &self,
        expr: &Expr,
    ) -> ConstantValue {
        match self.try_evaluate(expr) {
            Ok(value) => value,
            Err(err) => {
                trace!("`{}` is not constant: {}", expr, err);
                ConstantValue::NotConstant
            }
        }
    }

    /// 求值并返回失败原因
    pub fn try_evaluate(
        &self,
        expr: &Expr,
    ) -> Result<ConstantValue, ConstEvalError> {
        self.evaluate_with_depth(expr, 1)
    }

    /// 带深度的求值（内部使用）
    fn evaluate_with_depth(
        &self,
        expr: &Expr,
        depth: usize,
    ) -> Result<ConstantValue, ConstEvalError> {
        // 检查嵌套深度
        if depth > self.max_depth {
            return Err(ConstEvalError::RecursionTooDeep {
                depth,
                max_depth: self.max_depth,
            });
        }

        match expr {
            Expr::Literal(literal) => evaluate_literal(literal),
            Expr::Name(name) => match self.resolver.resolve(name) {
                ConstantValue::NotConstant => Err(ConstEvalError::NonConstantSymbol {
                    name: name.to_string(),
                }),
                value => Ok(value),
            },
            Expr::Paren(inner) => self.evaluate_with_depth(inner, depth + 1),
            Expr::Unary { op, operand } => {
                let value = self.evaluate_with_depth(operand, depth + 1)?;
                evaluate_unop(*op, &value)
            }
            Expr::Binary { op, left, right } => {
                // && 与 || 的两侧也必须都是常量
                let left_val = self.evaluate_with_depth(left, depth + 1)?;
                let right_val = self.evaluate_with_depth(right, depth + 1)?;
                evaluate_binop(self.language, *op, &left_val, &right_val)
            }
            Expr::Cast { ty, operand } => {
                let value = self.evaluate_with_depth(operand, depth + 1)?;
                evaluate_cast(*ty, &value)
            }
            Expr::Unsupported(kind) => Err(ConstEvalError::Unsupported { kind: *kind }),
        }
    }
}

/// 数值操作数（`char` 已提升为 Int32）
#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i64, IntWidth),
    Float(f64),
}

impl Numeric {
    fn of(value: &ConstantValue) -> Option<Self> {
        match value {
            ConstantValue::Integer(v, width) => Some(Numeric::Int(*v, *width)),
            ConstantValue::Char(c) => Some(Numeric::Int(u32::from(*c).into(), IntWidth::Int32)),
            ConstantValue::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(v, _) => v as f64,
            Numeric::Float(f) => f,
        }
    }

    fn compare(
        self,
        other: Numeric,
    ) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Int(a, _), Numeric::Int(b, _)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// 检查整数结果是否落在目标宽度内
fn integer(
    value: Option<i64>,
    width: IntWidth,
    expr: impl FnOnce() -> String,
) -> Result<ConstantValue, ConstEvalError> {
    match value {
        Some(v) if width.fits(v) => Ok(ConstantValue::Integer(v, width)),
        _ => Err(ConstEvalError::Overflow { expr: expr() }),
    }
}

fn type_mismatch(
    op: BinOp,
    left: &ConstantValue,
    right: &ConstantValue,
) -> ConstEvalError {
    ConstEvalError::TypeMismatch {
        op: op.symbol(),
        left: left.kind().type_name(),
        right: right.kind().type_name(),
    }
}

/// 求值字面量
fn evaluate_literal(literal: &Literal) -> Result<ConstantValue, ConstEvalError> {
    match literal {
        Literal::Integer { value, width } => integer(Some(*value), *width, || value.to_string()),
        Literal::Float(f) => Ok(ConstantValue::Float(*f)),
        Literal::Boolean(b) => Ok(ConstantValue::Boolean(*b)),
        Literal::Char(c) => Ok(ConstantValue::Char(*c)),
        Literal::String(s) => Ok(ConstantValue::String(s.clone())),
        Literal::Null => Err(ConstEvalError::NullLiteral),
    }
}

/// 求值一元运算
fn evaluate_unop(
    op: UnOp,
    value: &ConstantValue,
) -> Result<ConstantValue, ConstEvalError> {
    let invalid = || ConstEvalError::InvalidOperand {
        op: op.symbol(),
        operand: value.kind().type_name(),
    };

    match op {
        UnOp::Not => match value {
            ConstantValue::Boolean(b) => Ok(ConstantValue::Boolean(!b)),
            _ => Err(invalid()),
        },
        UnOp::Plus => match Numeric::of(value).ok_or_else(invalid)? {
            Numeric::Int(v, width) => Ok(ConstantValue::Integer(v, width)),
            Numeric::Float(f) => Ok(ConstantValue::Float(f)),
        },
        UnOp::Neg => match Numeric::of(value).ok_or_else(invalid)? {
            Numeric::Int(v, width) => integer(v.checked_neg(), width, || format!("-{}", v)),
            Numeric::Float(f) => Ok(ConstantValue::Float(-f)),
        },
        UnOp::BitNot => match Numeric::of(value).ok_or_else(invalid)? {
            Numeric::Int(v, IntWidth::Int32) => Ok(ConstantValue::int(!(v as i32))),
            Numeric::Int(v, IntWidth::Int64) => Ok(ConstantValue::long(!v)),
            Numeric::Float(_) => Err(invalid()),
        },
    }
}

/// 求值二元运算
fn evaluate_binop(
    language: Language,
    op: BinOp,
    left: &ConstantValue,
    right: &ConstantValue,
) -> Result<ConstantValue, ConstEvalError> {
    match op {
        // 字符串连接
        BinOp::Add
            if matches!(left, ConstantValue::String(_))
                || matches!(right, ConstantValue::String(_)) =>
        {
            match (left, right) {
                (ConstantValue::String(l), ConstantValue::String(r)) => {
                    Ok(ConstantValue::String(format!("{}{}", l, r)))
                }
                _ => Err(type_mismatch(op, left, right)),
            }
        }
        BinOp::Concat => match (concat_operand(left), concat_operand(right)) {
            (Some(l), Some(r)) => Ok(ConstantValue::String(format!("{}{}", l, r))),
            _ => Err(type_mismatch(op, left, right)),
        },
        BinOp::Div if language == Language::VisualBasic => evaluate_float_division(left, right),
        // 算术运算
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::IntDiv | BinOp::Rem => {
            evaluate_arithmetic(op, left, right)
        }
        // 移位运算
        BinOp::Shl | BinOp::Shr => evaluate_shift(op, left, right),
        // 位运算（布尔操作数时为非短路逻辑运算）
        BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor => match (left, right) {
            (ConstantValue::Boolean(l), ConstantValue::Boolean(r)) => {
                Ok(ConstantValue::Boolean(match op {
                    BinOp::BitAnd => l & r,
                    BinOp::BitOr => l | r,
                    _ => l ^ r,
                }))
            }
            _ => match (Numeric::of(left), Numeric::of(right)) {
                (Some(Numeric::Int(l, wl)), Some(Numeric::Int(r, wr))) => {
                    let value = match op {
                        BinOp::BitAnd => l & r,
                        BinOp::BitOr => l | r,
                        _ => l ^ r,
                    };
                    Ok(ConstantValue::Integer(value, wl.max(wr)))
                }
                _ => Err(type_mismatch(op, left, right)),
            },
        },
        // 逻辑运算
        BinOp::And | BinOp::Or => match (left, right) {
            (ConstantValue::Boolean(l), ConstantValue::Boolean(r)) => {
                Ok(ConstantValue::Boolean(if op == BinOp::And {
                    *l && *r
                } else {
                    *l || *r
                }))
            }
            _ => Err(type_mismatch(op, left, right)),
        },
        // 比较运算
        BinOp::Eq | BinOp::Ne => {
            let equal = match (left, right) {
                (ConstantValue::String(l), ConstantValue::String(r)) => l == r,
                (ConstantValue::Boolean(l), ConstantValue::Boolean(r)) => l == r,
                _ => match (Numeric::of(left), Numeric::of(right)) {
                    (Some(l), Some(r)) => l.compare(r) == Some(Ordering::Equal),
                    _ => return Err(type_mismatch(op, left, right)),
                },
            };
            Ok(ConstantValue::Boolean(if op == BinOp::Eq { equal } else { !equal }))
        }
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            let (Some(l), Some(r)) = (Numeric::of(left), Numeric::of(right)) else {
                return Err(type_mismatch(op, left, right));
            };
            // NaN 参与的比较恒为 false
            let result = l.compare(r).is_some_and(|ordering| match op {
                BinOp::Lt => ordering == Ordering::Less,
                BinOp::Le => ordering != Ordering::Greater,
                BinOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            });
            Ok(ConstantValue::Boolean(result))
        }
    }
}

/// VB `&` 的操作数：字符串或字符
fn concat_operand(value: &ConstantValue) -> Option<String> {
    match value {
        ConstantValue::String(s) => Some(s.clone()),
        ConstantValue::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

/// 求值算术运算
fn evaluate_arithmetic(
    op: BinOp,
    left: &ConstantValue,
    right: &ConstantValue,
) -> Result<ConstantValue, ConstEvalError> {
    let (Some(l), Some(r)) = (Numeric::of(left), Numeric::of(right)) else {
        return Err(type_mismatch(op, left, right));
    };

    match (l, r) {
        (Numeric::Int(a, wa), Numeric::Int(b, wb)) => {
            if b == 0 && matches!(op, BinOp::Div | BinOp::IntDiv | BinOp::Rem) {
                return Err(ConstEvalError::DivisionByZero);
            }
            let value = match op {
                BinOp::Add => a.checked_add(b),
                BinOp::Sub => a.checked_sub(b),
                BinOp::Mul => a.checked_mul(b),
                BinOp::Div | BinOp::IntDiv => a.checked_div(b),
                BinOp::Rem => a.checked_rem(b),
                _ => return Err(type_mismatch(op, left, right)),
            };
            integer(value, wa.max(wb), || format!("{} {} {}", a, op.symbol(), b))
        }
        (l, r) => {
            let (a, b) = (l.as_f64(), r.as_f64());
            let value = match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
                BinOp::Rem => a % b,
                _ => return Err(type_mismatch(op, left, right)),
            };
            Ok(ConstantValue::Float(value))
        }
    }
}

/// VB `/`：操作数先转换为 Double
fn evaluate_float_division(
    left: &ConstantValue,
    right: &ConstantValue,
) -> Result<ConstantValue, ConstEvalError> {
    match (Numeric::of(left), Numeric::of(right)) {
        (Some(l), Some(r)) => Ok(ConstantValue::Float(l.as_f64() / r.as_f64())),
        _ => Err(type_mismatch(BinOp::Div, left, right)),
    }
}

/// 求值移位运算；结果宽度取左操作数
fn evaluate_shift(
    op: BinOp,
    left: &ConstantValue,
    right: &ConstantValue,
) -> Result<ConstantValue, ConstEvalError> {
    let (Some(Numeric::Int(value, width)), Some(Numeric::Int(count, _))) =
        (Numeric::of(left), Numeric::of(right))
    else {
        return Err(type_mismatch(op, left, right));
    };

    let count = (count as u32) & width.shift_mask();
    let shifted = match (width, op) {
        (IntWidth::Int32, BinOp::Shl) => i64::from((value as i32).wrapping_shl(count)),
        (IntWidth::Int32, _) => i64::from((value as i32) >> count),
        (IntWidth::Int64, BinOp::Shl) => value.wrapping_shl(count),
        (IntWidth::Int64, _) => value >> count,
    };
    Ok(ConstantValue::Integer(shifted, width))
}

/// 求值类型转换
fn evaluate_cast(
    ty: PrimitiveType,
    value: &ConstantValue,
) -> Result<ConstantValue, ConstEvalError> {
    let invalid = || ConstEvalError::InvalidConversion {
        from: value.kind().type_name(),
        to: ty,
    };
    let overflow = || ConstEvalError::Overflow {
        expr: format!("({}){}", ty, value),
    };

    match ty {
        PrimitiveType::Int32 | PrimitiveType::Int64 => {
            let width = if ty == PrimitiveType::Int32 {
                IntWidth::Int32
            } else {
                IntWidth::Int64
            };
            match value {
                ConstantValue::Integer(v, _) => integer(Some(*v), width, || format!("({}){}", ty, v)),
                ConstantValue::Char(c) => Ok(ConstantValue::Integer(u32::from(*c).into(), width)),
                ConstantValue::Float(f) => {
                    let truncated = f.trunc();
                    // [-2^63, 2^63) 之外（含 NaN、无穷）不可表示
                    if !(truncated >= i64::MIN as f64 && truncated < i64::MAX as f64) {
                        return Err(overflow());
                    }
                    integer(Some(truncated as i64), width, || format!("({}){}", ty, f))
                }
                _ => Err(invalid()),
            }
        }
        PrimitiveType::Double => match Numeric::of(value) {
            Some(n) => Ok(ConstantValue::Float(n.as_f64())),
            None => Err(invalid()),
        },
        PrimitiveType::Char => {
            let code = match value {
                ConstantValue::Char(c) => return Ok(ConstantValue::Char(*c)),
                ConstantValue::Integer(v, _) => *v,
                ConstantValue::Float(f) if f.is_finite() => f.trunc() as i64,
                ConstantValue::Float(_) => return Err(overflow()),
                _ => return Err(invalid()),
            };
            u16::try_from(code)
                .ok()
                .and_then(|unit| char::from_u32(u32::from(unit)))
                .map(ConstantValue::Char)
                .ok_or_else(overflow)
        }
        PrimitiveType::Boolean => match value {
            ConstantValue::Boolean(b) => Ok(ConstantValue::Boolean(*b)),
            _ => Err(invalid()),
        },
        PrimitiveType::String => match value {
            ConstantValue::String(s) => Ok(ConstantValue::String(s.clone())),
            _ => Err(invalid()),
        },
    }
}
