//! 框架内建常量（`int.MaxValue`、`double.NaN` …）
//!
//! 只收录 .NET 中声明为 `const` 的成员。`string.Empty` 是 `static readonly`，
//! 因此不在表中。

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::value::ConstantValue;
use crate::frontend::model::Language;

/// 类型别名：C# 关键字、VB 关键字与 CLR 名称
const INT32_NAMES: &[&str] = &["int", "Int32", "System.Int32", "Integer"];
const INT64_NAMES: &[&str] = &["long", "Int64", "System.Int64", "Long"];
const CHAR_NAMES: &[&str] = &["char", "Char", "System.Char"];
const DOUBLE_NAMES: &[&str] = &["double", "Double", "System.Double"];

fn members() -> Vec<(&'static [&'static str], &'static str, ConstantValue)> {
    vec![
        (INT32_NAMES, "MaxValue", ConstantValue::int(i32::MAX)),
        (INT32_NAMES, "MinValue", ConstantValue::int(i32::MIN)),
        (INT64_NAMES, "MaxValue", ConstantValue::long(i64::MAX)),
        (INT64_NAMES, "MinValue", ConstantValue::long(i64::MIN)),
        (CHAR_NAMES, "MaxValue", ConstantValue::Char('\u{ffff}')),
        (CHAR_NAMES, "MinValue", ConstantValue::Char('\0')),
        (DOUBLE_NAMES, "MaxValue", ConstantValue::Float(f64::MAX)),
        (DOUBLE_NAMES, "MinValue", ConstantValue::Float(f64::MIN)),
        // .NET 的 Epsilon 是最小正次正规数
        (DOUBLE_NAMES, "Epsilon", ConstantValue::Float(f64::from_bits(1))),
        (DOUBLE_NAMES, "NaN", ConstantValue::Float(f64::NAN)),
        (DOUBLE_NAMES, "PositiveInfinity", ConstantValue::Float(f64::INFINITY)),
        (DOUBLE_NAMES, "NegativeInfinity", ConstantValue::Float(f64::NEG_INFINITY)),
    ]
}

/// 区分大小写的表（C#）
static EXACT: Lazy<HashMap<String, ConstantValue>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (types, member, value) in members() {
        for ty in types {
            map.insert(format!("{}.{}", ty, member), value.clone());
        }
    }
    map
});

/// 不区分大小写的表（VB）
static FOLDED: Lazy<HashMap<String, ConstantValue>> = Lazy::new(|| {
    EXACT
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
});

/// 查找内建常量
pub fn well_known_constant(
    name: &str,
    language: Language,
) -> Option<ConstantValue> {
    match language {
        Language::CSharp => EXACT.get(name).cloned(),
        Language::VisualBasic => FOLDED.get(&name.to_ascii_lowercase()).cloned(),
    }
}
