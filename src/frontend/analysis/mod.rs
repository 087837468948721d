//! 字段分析
//!
//! - [`rule`] - 判定单个声明器并构建诊断
//! - [`driver`] - 遍历编译单元、应用配置、排序输出

pub mod driver;
pub mod rule;


pub use driver::{Analyzer, FileReport};
pub use rule::{EligibilityVerdict, Ineligible, UseLiteralsRule};
