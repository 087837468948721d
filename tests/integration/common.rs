//! Shared builders and assertions for the integration suites

use use_literals::frontend::model::{Accessibility, Declarator, Expr, FieldStatement};
use use_literals::{Diagnostic, RuleId};

/// Expected diagnostic: rule, line, column, field name, rendered value
pub type Expected<'a> = (RuleId, usize, usize, &'a str, Option<&'a str>);

/// `private static readonly <ty>` statement with no declarators yet
pub fn static_readonly(ty: &str) -> FieldStatement {
    FieldStatement::new(Accessibility::Private, ty)
        .with_static()
        .with_readonly()
}

/// Single-declarator statement
pub fn single(
    statement: FieldStatement,
    name: &str,
    line: usize,
    column: usize,
    init: Expr,
) -> FieldStatement {
    statement.declare(Declarator::at(name, line, column).with_initializer(init))
}

pub fn assert_diagnostics(
    actual: &[Diagnostic],
    expected: &[Expected<'_>],
) {
    let actual: Vec<(RuleId, usize, usize, String, Option<String>)> = actual
        .iter()
        .map(|d| {
            let span = d.span.expect("diagnostic without a span");
            (
                d.rule,
                span.start.line,
                span.start.column,
                d.symbol_name().to_string(),
                d.value().map(str::to_string),
            )
        })
        .collect();
    let expected: Vec<(RuleId, usize, usize, String, Option<String>)> = expected
        .iter()
        .map(|(rule, line, column, name, value)| {
            (*rule, *line, *column, name.to_string(), value.map(str::to_string))
        })
        .collect();
    assert_eq!(actual, expected);
}
