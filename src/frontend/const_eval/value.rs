//! 常量值

use std::fmt;

use super::error::ConstEvalError;
use crate::frontend::model::{IntWidth, PrimitiveType};

/// 编译期常量值
///
/// `NotConstant` 吸收 null、对非常量符号的引用以及所有不支持的表达式形式。
#[derive(Debug, Clone)]
pub enum ConstantValue {
    Integer(i64, IntWidth),
    Float(f64),
    Boolean(bool),
    Char(char),
    String(String),
    NotConstant,
}

/// 值的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int32,
    Int64,
    Double,
    Boolean,
    Char,
    String,
    NotConstant,
}

impl ValueKind {
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Int32 => "Int32",
            ValueKind::Int64 => "Int64",
            ValueKind::Double => "Double",
            ValueKind::Boolean => "Boolean",
            ValueKind::Char => "Char",
            ValueKind::String => "String",
            ValueKind::NotConstant => "NotConstant",
        }
    }
}

impl ConstantValue {
    pub fn int(value: i32) -> Self {
        ConstantValue::Integer(value.into(), IntWidth::Int32)
    }

    pub fn long(value: i64) -> Self {
        ConstantValue::Integer(value, IntWidth::Int64)
    }

    pub fn string(value: impl Into<String>) -> Self {
        ConstantValue::String(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ConstantValue::Integer(_, IntWidth::Int32) => ValueKind::Int32,
            ConstantValue::Integer(_, IntWidth::Int64) => ValueKind::Int64,
            ConstantValue::Float(_) => ValueKind::Double,
            ConstantValue::Boolean(_) => ValueKind::Boolean,
            ConstantValue::Char(_) => ValueKind::Char,
            ConstantValue::String(_) => ValueKind::String,
            ConstantValue::NotConstant => ValueKind::NotConstant,
        }
    }

    pub fn is_constant(&self) -> bool {
        !matches!(self, ConstantValue::NotConstant)
    }

    pub fn is_empty_string(&self) -> bool {
        matches!(self, ConstantValue::String(s) if s.is_empty())
    }

    /// 按声明类型做隐式常量转换
    ///
    /// `static readonly long F = 3;` 的常量值是 Int64，
    /// `static readonly int F = 'a';` 的常量值是 97。
    /// 只允许拓宽转换；收窄（`int F = 5L`）或跨类别（`char F = 65`）的转换
    /// 不是合法的 const 初始化，返回 `InvalidConversion`。
    pub fn convert_implicit(
        self,
        target: PrimitiveType,
    ) -> Result<Self, ConstEvalError> {
        match (self, target) {
            (ConstantValue::Integer(v, IntWidth::Int32), PrimitiveType::Int32) => {
                Ok(ConstantValue::Integer(v, IntWidth::Int32))
            }
            (ConstantValue::Integer(v, _), PrimitiveType::Int64) => Ok(ConstantValue::long(v)),
            (ConstantValue::Integer(v, _), PrimitiveType::Double) => Ok(ConstantValue::Float(v as f64)),
            (ConstantValue::Char(c), PrimitiveType::Int32) => Ok(ConstantValue::int(c as i32)),
            (ConstantValue::Char(c), PrimitiveType::Int64) => Ok(ConstantValue::long(c as i64)),
            (ConstantValue::Char(c), PrimitiveType::Double) => {
                Ok(ConstantValue::Float(f64::from(u32::from(c))))
            }
            (value @ ConstantValue::Float(_), PrimitiveType::Double)
            | (value @ ConstantValue::Boolean(_), PrimitiveType::Boolean)
            | (value @ ConstantValue::Char(_), PrimitiveType::Char)
            | (value @ ConstantValue::String(_), PrimitiveType::String) => Ok(value),
            (value, to) => Err(ConstEvalError::InvalidConversion {
                from: value.kind().type_name(),
                to,
            }),
        }
    }
}

/// 浮点数按位比较，使 `NaN == NaN`，保证求值结果可比较
impl PartialEq for ConstantValue {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (ConstantValue::Integer(a, wa), ConstantValue::Integer(b, wb)) => a == b && wa == wb,
            (ConstantValue::Float(a), ConstantValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ConstantValue::Boolean(a), ConstantValue::Boolean(b)) => a == b,
            (ConstantValue::Char(a), ConstantValue::Char(b)) => a == b,
            (ConstantValue::String(a), ConstantValue::String(b)) => a == b,
            (ConstantValue::NotConstant, ConstantValue::NotConstant) => true,
            _ => false,
        }
    }
}

/// 按 .NET `ToString()` 的习惯渲染
impl fmt::Display for ConstantValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ConstantValue::Integer(v, _) => write!(f, "{}", v),
            ConstantValue::Float(v) => f.write_str(&format_double(*v)),
            ConstantValue::Boolean(true) => f.write_str("True"),
            ConstantValue::Boolean(false) => f.write_str("False"),
            ConstantValue::Char(c) => write!(f, "{}", c),
            ConstantValue::String(s) => f.write_str(s),
            ConstantValue::NotConstant => f.write_str("<not constant>"),
        }
    }
}

/// 最短往返形式；十进制指数不在 (-5, 15) 内时使用 `E+XX` 科学计数法
fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // `{:e}` 给出最短往返尾数，如 "1.5e-7"
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..15).contains(&exponent) {
        format!("{}", value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", mantissa, sign, exponent.abs())
    }
}
