//! use-literals
//!
//! Flags `private static readonly` fields whose initializer is a compile-time
//! constant and suggests declaring them `const` instead. Input is a JSON
//! snapshot of a C# or Visual Basic compilation's semantic model.
//!
//! # Example
//!
//! ```
//! use use_literals::frontend::model::{
//!     Accessibility, Compilation, Declarator, Expr, FieldStatement, Language, TypeDecl,
//! };
//! use use_literals::{analyze, RuleId};
//!
//! let model = Compilation::new(Language::CSharp).with_type(
//!     TypeDecl::new("Class1").field(
//!         FieldStatement::new(Accessibility::Private, "string")
//!             .with_static()
//!             .with_readonly()
//!             .declare(Declarator::at("f1", 4, 28).with_initializer(Expr::string(""))),
//!     ),
//! );
//!
//! let diagnostics = analyze(&model);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].rule, RuleId::EmptyString);
//! ```

#![doc(html_root_url = "https://docs.rs/use-literals")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod frontend;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use frontend::analysis::{Analyzer, EligibilityVerdict, FileReport, Ineligible, UseLiteralsRule};
pub use frontend::const_eval::{ConstEvaluator, ConstResolver, ConstantValue, ModelResolver};
pub use frontend::model::Compilation;
pub use util::config::LintConfig;
pub use util::diagnostic::{Diagnostic, LintLevel, RuleId, Severity};

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name, also the `source` of JSON diagnostics
pub const NAME: &str = "use-literals";

/// Analyze a compilation with the default configuration
pub fn analyze(model: &Compilation) -> Vec<Diagnostic> {
    Analyzer::default().analyze(model)
}

/// Analyze one model snapshot file
pub fn check_file(
    analyzer: &Analyzer,
    path: &Path,
) -> Result<FileReport> {
    debug!("Checking {}", path.display());
    analyzer
        .analyze_file(path)
        .with_context(|| format!("Failed to check: {}", path.display()))
}

/// Analyze files and directories; directories are searched for `*.json` snapshots
pub fn check_paths(
    analyzer: &Analyzer,
    paths: &[PathBuf],
) -> Result<Vec<FileReport>> {
    collect_inputs(paths)?
        .iter()
        .map(|path| check_file(analyzer, path))
        .collect()
}

/// Expand directories into the sorted list of snapshot files they contain
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry =
                entry.with_context(|| format!("Failed to read directory: {}", path.display()))?;
            let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
            if entry.file_type().is_file() && is_json {
                found.push(entry.into_path());
            }
        }
        found.sort();
        debug!("Found {} snapshot(s) under {}", found.len(), path.display());
        inputs.extend(found);
    }
    Ok(inputs)
}
