//! 语义模型快照
//!
//! 编译器前端已完成解析与绑定后，规则所需的全部信息以 JSON 快照的形式
//! 提供：源语言、类型及其字段语句、每个声明器的名称位置与初始化表达式。
//!
//! 一条字段语句可以声明多个变量（`static readonly string f3, f4 = "…";`），
//! 规则按声明器逐个检查，因此本模块提供 [`FieldDeclaration`] 作为
//! "单个声明器 + 所在语句 + 所在类型"的只读视图。

pub mod expr;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::span::{SourceFile, Span};

pub use expr::{BinOp, Expr, IntWidth, Literal, PrimitiveType, QualifiedName, UnOp, UnsupportedExpr};

/// 源语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "csharp", alias = "c#", alias = "cs")]
    CSharp,
    #[serde(rename = "visual_basic", alias = "vb")]
    VisualBasic,
}

impl Language {
    /// 标识符比较：C# 区分大小写，VB 不区分
    pub fn names_equal(
        self,
        a: &str,
        b: &str,
    ) -> bool {
        match self {
            Language::CSharp => a == b,
            Language::VisualBasic => a.eq_ignore_ascii_case(b),
        }
    }

    /// 名称查找用的规范化键
    pub fn normalize(
        self,
        name: &str,
    ) -> String {
        match self {
            Language::CSharp => name.to_string(),
            Language::VisualBasic => name.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Language::CSharp => write!(f, "C#"),
            Language::VisualBasic => write!(f, "Visual Basic"),
        }
    }
}

/// 声明的可访问性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    #[serde(alias = "friend")]
    Internal,
    #[serde(alias = "protected_friend")]
    ProtectedInternal,
    Protected,
    PrivateProtected,
    /// 未写访问修饰符的字段默认为 private
    #[default]
    Private,
}

impl Accessibility {
    pub fn is_private(self) -> bool {
        self == Accessibility::Private
    }
}

impl fmt::Display for Accessibility {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::Protected => "protected",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Private => "private",
        };
        f.write_str(text)
    }
}

/// 字段修饰符（VB 中 `Shared` 对应 static）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    #[serde(alias = "is_shared")]
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_const: bool,
}

/// 单个变量声明器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    /// 名称标识符的位置（诊断报告于此）
    pub name_span: Span,
    /// VB 允许每个声明器有自己的 `As` 子句
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expr>,
}

impl Declarator {
    /// 在 `line:column` 处声明 `name`，名称跨度取名称长度
    pub fn at(
        name: &str,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            name_span: Span::at(line, column, name.chars().count()),
            declared_type: None,
            initializer: None,
        }
    }

    pub fn with_initializer(
        mut self,
        initializer: Expr,
    ) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn with_type(
        mut self,
        declared_type: &str,
    ) -> Self {
        self.declared_type = Some(declared_type.to_string());
        self
    }
}

/// 字段声明语句
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatement {
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub declared_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    pub declarators: Vec<Declarator>,
}

impl FieldStatement {
    pub fn new(
        accessibility: Accessibility,
        declared_type: &str,
    ) -> Self {
        Self {
            accessibility,
            modifiers: Modifiers::default(),
            declared_type: declared_type.to_string(),
            span: None,
            declarators: Vec::new(),
        }
    }

    pub fn with_static(mut self) -> Self {
        self.modifiers.is_static = true;
        self
    }

    pub fn with_readonly(mut self) -> Self {
        self.modifiers.is_readonly = true;
        self
    }

    pub fn with_const(mut self) -> Self {
        self.modifiers.is_const = true;
        self
    }

    pub fn declare(
        mut self,
        declarator: Declarator,
    ) -> Self {
        self.declarators.push(declarator);
        self
    }
}

/// 类型声明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldStatement>,
}

impl TypeDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            fields: Vec::new(),
        }
    }

    pub fn in_namespace(
        mut self,
        namespace: &str,
    ) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn field(
        mut self,
        statement: FieldStatement,
    ) -> Self {
        self.fields.push(statement);
        self
    }

    /// 命名空间限定的全名
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

/// 原始源文本（可选，用于渲染源码片段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceText {
    pub name: String,
    pub text: String,
}

/// 一个编译单元的语义模型快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compilation {
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceText>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Compilation {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            source: None,
            types: Vec::new(),
        }
    }

    pub fn with_type(
        mut self,
        ty: TypeDecl,
    ) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_source(
        mut self,
        name: &str,
        text: &str,
    ) -> Self {
        self.source = Some(SourceText {
            name: name.to_string(),
            text: text.to_string(),
        });
        self
    }

    /// 从 JSON 文本加载
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        serde_json::from_str(text).map_err(ModelError::Parse)
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string_pretty(self).map_err(ModelError::Parse)
    }

    /// 源文本（若快照中携带）
    pub fn source_file(&self) -> Option<SourceFile> {
        self.source
            .as_ref()
            .map(|s| SourceFile::new(s.name.clone(), s.text.clone()))
    }

    /// 按源顺序枚举所有字段声明器
    pub fn fields(&self) -> impl Iterator<Item = FieldDeclaration<'_>> + '_ {
        self.types.iter().enumerate().flat_map(move |(ty_index, ty)| {
            ty.fields
                .iter()
                .enumerate()
                .flat_map(move |(stmt_index, statement)| {
                    let sibling_count = statement.declarators.len();
                    statement
                        .declarators
                        .iter()
                        .enumerate()
                        .map(move |(index, declarator)| FieldDeclaration {
                            id: SymbolId::new(ty_index, stmt_index, index),
                            language: self.language,
                            containing_type: ty,
                            statement,
                            declarator,
                            sibling_count,
                        })
                })
        })
    }

    pub fn field(
        &self,
        id: SymbolId,
    ) -> Option<FieldDeclaration<'_>> {
        let ty = self.types.get(id.ty as usize)?;
        let statement = ty.fields.get(id.statement as usize)?;
        let declarator = statement.declarators.get(id.declarator as usize)?;
        Some(FieldDeclaration {
            id,
            language: self.language,
            containing_type: ty,
            statement,
            declarator,
            sibling_count: statement.declarators.len(),
        })
    }
}

/// 字段符号的稳定标识：类型序号 / 语句序号 / 声明器序号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId {
    pub ty: u32,
    pub statement: u32,
    pub declarator: u32,
}

impl SymbolId {
    pub fn new(
        ty: usize,
        statement: usize,
        declarator: usize,
    ) -> Self {
        Self {
            ty: ty as u32,
            statement: statement as u32,
            declarator: declarator as u32,
        }
    }
}

/// 单个声明器的只读视图
#[derive(Debug, Clone, Copy)]
pub struct FieldDeclaration<'a> {
    pub id: SymbolId,
    pub language: Language,
    pub containing_type: &'a TypeDecl,
    pub statement: &'a FieldStatement,
    pub declarator: &'a Declarator,
    /// 同一语句中的声明器数量
    pub sibling_count: usize,
}

impl<'a> FieldDeclaration<'a> {
    pub fn name(&self) -> &'a str {
        &self.declarator.name
    }

    pub fn name_span(&self) -> Span {
        self.declarator.name_span
    }

    pub fn accessibility(&self) -> Accessibility {
        self.statement.accessibility
    }

    pub fn is_static(&self) -> bool {
        self.statement.modifiers.is_static
    }

    pub fn is_readonly(&self) -> bool {
        self.statement.modifiers.is_readonly
    }

    pub fn is_const(&self) -> bool {
        self.statement.modifiers.is_const
    }

    pub fn initializer(&self) -> Option<&'a Expr> {
        self.declarator.initializer.as_ref()
    }

    /// 声明类型：声明器自己的 `As` 子句优先
    pub fn declared_type(&self) -> &'a str {
        self.declarator
            .declared_type
            .as_deref()
            .unwrap_or(&self.statement.declared_type)
    }

    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        PrimitiveType::from_type_name(self.declared_type())
    }

    pub fn type_index(&self) -> usize {
        self.id.ty as usize
    }

    /// 在所在语句中的序号
    pub fn index(&self) -> usize {
        self.id.declarator as usize
    }
}

/// 模型加载错误
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model JSON: {0}")]
    Parse(#[source] serde_json::Error),
}
