//! 分析驱动
//!
//! 展开所有字段声明器，逐个应用规则，按配置调整严重级别，
//! 并按源位置排序输出。声明器之间相互独立，默认用 rayon 并行求值。

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, trace};

use super::rule::UseLiteralsRule;
use crate::frontend::const_eval::ModelResolver;
use crate::frontend::model::{Compilation, FieldDeclaration, ModelError};
use crate::util::config::LintConfig;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::SourceFile;

/// 单个模型文件的分析结果
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    /// 快照携带的源文本
    pub source: Option<SourceFile>,
}

/// 分析器
#[derive(Debug, Clone)]
pub struct Analyzer {
    rule: UseLiteralsRule,
    config: LintConfig,
}

impl Analyzer {
    pub fn new(config: LintConfig) -> Self {
        Self {
            rule: UseLiteralsRule::new().with_max_depth(config.analysis.max_depth),
            config,
        }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// 分析一个编译单元
    pub fn analyze(
        &self,
        model: &Compilation,
    ) -> Vec<Diagnostic> {
        let resolver = ModelResolver::new(model).with_max_depth(self.config.analysis.max_depth);
        let fields: Vec<FieldDeclaration<'_>> = model.fields().collect();

        let check = |field: &FieldDeclaration<'_>| self.check_field(field, &resolver);
        let mut diagnostics: Vec<Diagnostic> = if self.config.analysis.parallel {
            fields.par_iter().filter_map(check).collect()
        } else {
            fields.iter().filter_map(check).collect()
        };
        diagnostics.sort_by(|a, b| {
            a.span
                .map(|span| span.start)
                .cmp(&b.span.map(|span| span.start))
                .then_with(|| a.code.cmp(b.code))
        });

        debug!(
            "{} field declarator(s) in {} type(s), {} diagnostic(s)",
            fields.len(),
            model.types.len(),
            diagnostics.len()
        );
        diagnostics
    }

    /// 加载并分析一个模型快照文件
    pub fn analyze_file(
        &self,
        path: &Path,
    ) -> Result<FileReport, ModelError> {
        let model = Compilation::load(path)?;
        let source = model.source_file();
        // 诊断归属于快照描述的源文件；没有源文本时归属于快照本身
        let file = source
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| path.display().to_string());

        let diagnostics = self
            .analyze(&model)
            .into_iter()
            .map(|diagnostic| diagnostic.in_file(file.clone()))
            .collect();
        Ok(FileReport {
            path: path.to_path_buf(),
            diagnostics,
            source,
        })
    }

    fn check_field(
        &self,
        field: &FieldDeclaration<'_>,
        resolver: &ModelResolver<'_>,
    ) -> Option<Diagnostic> {
        let scoped = resolver.scoped(field.type_index());
        let diagnostic = self.rule.evaluate(field, &scoped)?;
        match self.config.level_for(diagnostic.descriptor()).severity() {
            Some(severity) => Some(diagnostic.with_severity(severity)),
            None => {
                trace!("{} is allowed by configuration", diagnostic.code);
                None
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}
