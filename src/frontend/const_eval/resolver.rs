//! 名称解析
//!
//! 求值器通过 [`ConstResolver`] 查询名称引用的常量值。解析只对绑定到
//! `const` 符号的名称成功；`static readonly` 字段即使自身可被折叠也不会解析。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::trace;

use super::builtins::well_known_constant;
use super::const_evaluator::{ConstEvaluator, DEFAULT_MAX_DEPTH};
use super::value::ConstantValue;
use crate::frontend::model::{Compilation, QualifiedName, SymbolId};

/// 名称解析器
pub trait ConstResolver {
    /// 解析名称；不是常量时返回 `NotConstant`
    fn resolve(
        &self,
        name: &QualifiedName,
    ) -> ConstantValue;
}

impl<F> ConstResolver for F
where
    F: Fn(&QualifiedName) -> ConstantValue,
{
    fn resolve(
        &self,
        name: &QualifiedName,
    ) -> ConstantValue {
        self(name)
    }
}

/// 不解析任何名称
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstants;

impl ConstResolver for NoConstants {
    fn resolve(
        &self,
        _name: &QualifiedName,
    ) -> ConstantValue {
        ConstantValue::NotConstant
    }
}

/// 按符号缓存的常量值，在工作线程间共享
#[derive(Debug, Default)]
pub struct ConstCache {
    values: RwLock<HashMap<SymbolId, ConstantValue>>,
}

impl ConstCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        id: SymbolId,
    ) -> Option<ConstantValue> {
        self.values.read().get(&id).cloned()
    }

    /// 写入缓存；已有值时保留先写入者并返回它
    pub fn insert(
        &self,
        id: SymbolId,
        value: ConstantValue,
    ) -> ConstantValue {
        self.values.write().entry(id).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 名称查找结果
enum Lookup {
    Field(SymbolId),
    Builtin(ConstantValue),
    Missing,
}

/// 一次解析链的状态：正在求值的 const 符号，以及是否因深度限制被截断
#[derive(Debug, Default)]
struct ResolutionState {
    in_progress: SmallVec<[SymbolId; 4]>,
    truncated: bool,
}

/// 基于语义模型快照的解析器
///
/// 查找顺序：
/// 1. 简单名称在当前类型的字段中查找
/// 2. 限定名称 `Type.field` / `Namespace.Type.field` 在所有类型中查找
/// 3. 框架内建常量（`int.MaxValue` …）
///
/// 找到的字段只有是 `const` 时才有值，其初始化器递归折叠（带环检测）。
pub struct ModelResolver<'m> {
    model: &'m Compilation,
    /// 每个类型的字段表：规范化名称 -> 符号
    members: Vec<HashMap<String, SymbolId>>,
    /// 规范化的类型简单名与全名 -> 类型序号
    types: HashMap<String, usize>,
    cache: ConstCache,
    max_depth: usize,
}

impl<'m> ModelResolver<'m> {
    pub fn new(model: &'m Compilation) -> Self {
        let language = model.language;

        let mut types = HashMap::new();
        for (index, ty) in model.types.iter().enumerate() {
            types.entry(language.normalize(&ty.name)).or_insert(index);
            types
                .entry(language.normalize(&ty.qualified_name()))
                .or_insert(index);
        }

        let mut members = vec![HashMap::new(); model.types.len()];
        for field in model.fields() {
            members[field.type_index()]
                .entry(language.normalize(field.name()))
                .or_insert(field.id);
        }

        Self {
            model,
            members,
            types,
            cache: ConstCache::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// 最大嵌套深度，同时限制 const 引用链的长度
    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn model(&self) -> &'m Compilation {
        self.model
    }

    /// 以 `type_index` 为当前类型的解析器
    pub fn scoped(
        &self,
        type_index: usize,
    ) -> ScopedResolver<'_, 'm> {
        ScopedResolver {
            resolver: self,
            scope: type_index,
            state: Rc::new(RefCell::new(ResolutionState::default())),
        }
    }

    /// 已缓存的 const 符号数
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn lookup(
        &self,
        scope: usize,
        name: &QualifiedName,
    ) -> Lookup {
        let language = self.model.language;
        let member = language.normalize(name.member());

        let owner = if name.is_simple() {
            Some(scope)
        } else {
            self.types.get(&language.normalize(&name.qualifier())).copied()
        };
        if let Some(id) = owner
            .and_then(|ty| self.members.get(ty))
            .and_then(|fields| fields.get(&member))
        {
            return Lookup::Field(*id);
        }

        match well_known_constant(&name.to_string(), language) {
            Some(value) => Lookup::Builtin(value),
            None => Lookup::Missing,
        }
    }

    fn value_of(
        &self,
        id: SymbolId,
        state: &Rc<RefCell<ResolutionState>>,
    ) -> ConstantValue {
        if let Some(value) = self.cache.get(id) {
            return value;
        }

        let Some(field) = self.model.field(id) else {
            return ConstantValue::NotConstant;
        };
        if !field.is_const() {
            return ConstantValue::NotConstant;
        }
        let Some(initializer) = field.initializer() else {
            return ConstantValue::NotConstant;
        };

        {
            let mut state = state.borrow_mut();
            if state.in_progress.contains(&id) {
                trace!("const `{}` refers to itself", field.name());
                return ConstantValue::NotConstant;
            }
            if state.in_progress.len() >= self.max_depth {
                trace!("const chain through `{}` is too deep", field.name());
                state.truncated = true;
                return ConstantValue::NotConstant;
            }
            state.in_progress.push(id);
        }

        let nested = ScopedResolver {
            resolver: self,
            scope: field.type_index(),
            state: Rc::clone(state),
        };
        let folded = ConstEvaluator::new(&nested)
            .with_language(self.model.language)
            .with_max_depth(self.max_depth)
            .evaluate(initializer);
        let value = match field.primitive_type() {
            Some(target) if folded.is_constant() => {
                folded.convert_implicit(target).unwrap_or_else(|err| {
                    trace!("const `{}`: {}", field.name(), err);
                    ConstantValue::NotConstant
                })
            }
            Some(_) => folded,
            None => {
                trace!("const `{}` has unsupported type `{}`", field.name(), field.declared_type());
                ConstantValue::NotConstant
            }
        };

        let mut state = state.borrow_mut();
        state.in_progress.pop();
        // 截断得到的结果依赖于入口，不能缓存
        let truncated = state.truncated;
        if state.in_progress.is_empty() {
            state.truncated = false;
        }
        if truncated {
            value
        } else {
            self.cache.insert(id, value)
        }
    }
}

/// 绑定到某个类型作用域的解析器
///
/// 每个待检查的字段各自创建一个；不跨线程共享。
pub struct ScopedResolver<'r, 'm> {
    resolver: &'r ModelResolver<'m>,
    scope: usize,
    state: Rc<RefCell<ResolutionState>>,
}

impl ConstResolver for ScopedResolver<'_, '_> {
    fn resolve(
        &self,
        name: &QualifiedName,
    ) -> ConstantValue {
        match self.resolver.lookup(self.scope, name) {
            Lookup::Field(id) => self.resolver.value_of(id, &self.state),
            Lookup::Builtin(value) => value,
            Lookup::Missing => {
                trace!("`{}` is not a known constant", name);
                ConstantValue::NotConstant
            }
        }
    }
}
