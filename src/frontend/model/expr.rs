//! 初始化表达式
//!
//! 规则所支持的初始化器文法被表示为一个封闭的变体类型：
//! 字面量 / 名称引用 / 括号 / 一元 / 二元 / 类型转换。其余表达式形式
//! （方法调用、条件表达式、对象创建……）统一归入 [`Expr::Unsupported`]，
//! 使"不支持的表达式"成为可达且可测试的状态。

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// 整数宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    #[default]
    Int32,
    Int64,
}

impl IntWidth {
    /// 该宽度能否容纳 `value`
    pub fn fits(
        self,
        value: i64,
    ) -> bool {
        match self {
            IntWidth::Int32 => i32::try_from(value).is_ok(),
            IntWidth::Int64 => true,
        }
    }

    /// 移位计数掩码（.NET：int 为 31，long 为 63）
    pub fn shift_mask(self) -> u32 {
        match self {
            IntWidth::Int32 => 31,
            IntWidth::Int64 => 63,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            IntWidth::Int32 => "Int32",
            IntWidth::Int64 => "Int64",
        }
    }
}

/// 字面量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer {
        value: i64,
        #[serde(default)]
        width: IntWidth,
    },
    Float(f64),
    Boolean(bool),
    Char(char),
    String(String),
    /// `null` / `Nothing`
    Null,
}

/// 基元类型（类型转换目标与字段声明类型）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    #[serde(alias = "int", alias = "integer")]
    Int32,
    #[serde(alias = "long")]
    Int64,
    #[serde(alias = "double")]
    Double,
    #[serde(alias = "bool")]
    Boolean,
    Char,
    String,
}

impl PrimitiveType {
    /// 由声明类型名称识别基元类型（C# 关键字、VB 关键字或 CLR 名称）
    pub fn from_type_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("System.").unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "int" | "int32" | "integer" => Some(PrimitiveType::Int32),
            "long" | "int64" => Some(PrimitiveType::Int64),
            "double" => Some(PrimitiveType::Double),
            "bool" | "boolean" => Some(PrimitiveType::Boolean),
            "char" => Some(PrimitiveType::Char),
            "string" => Some(PrimitiveType::String),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Int32 => "int",
            PrimitiveType::Int64 => "long",
            PrimitiveType::Double => "double",
            PrimitiveType::Boolean => "bool",
            PrimitiveType::Char => "char",
            PrimitiveType::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// 一元运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnOp {
    /// 正号
    Plus,
    /// 负号
    Neg,
    /// 逻辑非
    Not,
    /// 位反
    BitNot,
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Plus => "+",
            UnOp::Neg => "-",
            UnOp::Not => "!",
            UnOp::BitNot => "~",
        }
    }
}

/// 二元运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    /// 算术运算
    Add,
    Sub,
    Mul,
    /// C# 中整数相除为整除；VB 中总是浮点除法
    Div,
    /// VB `\` 整除
    IntDiv,
    Rem,
    /// 字符串连接（VB `&`）
    Concat,
    /// 左移/右移
    Shl,
    Shr,
    /// 位运算（布尔操作数时为非短路逻辑运算）
    BitAnd,
    BitOr,
    BitXor,
    /// 短路逻辑运算
    And,
    Or,
    /// 比较运算
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::IntDiv => "\\",
            BinOp::Rem => "%",
            BinOp::Concat => "&",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// 不在常量文法内的表达式形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedExpr {
    Invocation,
    MemberAccess,
    Conditional,
    ObjectCreation,
    ArrayCreation,
    Lambda,
    Other,
}

impl fmt::Display for UnsupportedExpr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            UnsupportedExpr::Invocation => "method invocation",
            UnsupportedExpr::MemberAccess => "member access",
            UnsupportedExpr::Conditional => "conditional expression",
            UnsupportedExpr::ObjectCreation => "object creation",
            UnsupportedExpr::ArrayCreation => "array creation",
            UnsupportedExpr::Lambda => "lambda expression",
            UnsupportedExpr::Other => "expression",
        };
        f.write_str(text)
    }
}

/// 限定名称，如 `f6`、`Class1.f6`、`int.MaxValue`
///
/// 序列化为以 `.` 分隔的字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    segments: SmallVec<[String; 2]>,
}

impl QualifiedName {
    /// 解析以 `.` 分隔的名称；任一段为空时返回 `None`
    pub fn parse(text: &str) -> Option<Self> {
        let segments: SmallVec<[String; 2]> = text
            .split('.')
            .map(|segment| segment.trim().to_string())
            .collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// 最后一段（成员名）
    pub fn member(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// 除最后一段外的限定部分，如 `Class1.f6` 中的 `Class1`
    pub fn qualifier(&self) -> String {
        self.segments[..self.segments.len().saturating_sub(1)].join(".")
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        QualifiedName::parse(&value).ok_or_else(|| format!("invalid qualified name `{}`", value))
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// 初始化表达式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    Name(QualifiedName),
    Paren(Box<Expr>),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Cast {
        ty: PrimitiveType,
        operand: Box<Expr>,
    },
    Unsupported(UnsupportedExpr),
}

impl Expr {
    pub fn int(value: i32) -> Self {
        Expr::Literal(Literal::Integer {
            value: value.into(),
            width: IntWidth::Int32,
        })
    }

    pub fn long(value: i64) -> Self {
        Expr::Literal(Literal::Integer {
            value,
            width: IntWidth::Int64,
        })
    }

    pub fn float(value: f64) -> Self {
        Expr::Literal(Literal::Float(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal::Boolean(value))
    }

    pub fn char(value: char) -> Self {
        Expr::Literal(Literal::Char(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    /// 名称引用；`name` 可以是限定名称
    ///
    /// 无法解析的名称（含空段）退化为 [`UnsupportedExpr::Other`]。
    pub fn name(name: &str) -> Self {
        QualifiedName::parse(name)
            .map(Expr::Name)
            .unwrap_or(Expr::Unsupported(UnsupportedExpr::Other))
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::Paren(Box::new(inner))
    }

    pub fn unary(
        op: UnOp,
        operand: Expr,
    ) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(
        op: BinOp,
        left: Expr,
        right: Expr,
    ) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn cast(
        ty: PrimitiveType,
        operand: Expr,
    ) -> Self {
        Expr::Cast {
            ty,
            operand: Box::new(operand),
        }
    }

    /// 表达式树深度
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Name(_) | Expr::Unsupported(_) => 1,
            Expr::Paren(inner) => 1 + inner.depth(),
            Expr::Unary { operand, .. } | Expr::Cast { operand, .. } => 1 + operand.depth(),
            Expr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// 以类 C# 语法显示（用于日志与错误消息）
impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Integer { value, width }) => match width {
                IntWidth::Int32 => write!(f, "{}", value),
                IntWidth::Int64 => write!(f, "{}L", value),
            },
            Expr::Literal(Literal::Float(value)) => write!(f, "{:?}", value),
            Expr::Literal(Literal::Boolean(value)) => write!(f, "{}", value),
            Expr::Literal(Literal::Char(value)) => write!(f, "{:?}", value),
            Expr::Literal(Literal::String(value)) => write!(f, "{:?}", value),
            Expr::Literal(Literal::Null) => write!(f, "null"),
            Expr::Name(name) => write!(f, "{}", name),
            Expr::Paren(inner) => write!(f, "({})", inner),
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            Expr::Cast { ty, operand } => write!(f, "({}){}", ty, operand),
            Expr::Unsupported(kind) => write!(f, "<{}>", kind),
        }
    }
}
