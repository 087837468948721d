//! End-to-end field scenarios

use crate::common::{assert_diagnostics, single, static_readonly};
use use_literals::frontend::model::{
    Accessibility, BinOp, Compilation, Expr, FieldStatement, Language, PrimitiveType, TypeDecl,
    UnsupportedExpr,
};
use use_literals::{analyze, RuleId};

fn class(statements: Vec<FieldStatement>) -> Compilation {
    let ty = statements
        .into_iter()
        .fold(TypeDecl::new("Class1"), |ty, statement| ty.field(statement));
    Compilation::new(Language::CSharp).with_type(ty)
}

#[test]
fn test_empty_string() {
    let model = class(vec![single(static_readonly("string"), "f", 3, 28, Expr::string(""))]);
    assert_diagnostics(&analyze(&model), &[(RuleId::EmptyString, 3, 28, "f", None)]);
}

#[test]
fn test_string_value() {
    let model = class(vec![single(static_readonly("string"), "f", 3, 28, Expr::string("Nothing"))]);
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 3, 28, "f", Some("Nothing"))]);
}

#[test]
fn test_integer_value() {
    let model = class(vec![single(static_readonly("int"), "f5", 3, 25, Expr::int(3))]);
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 3, 25, "f5", Some("3"))]);
}

#[test]
fn test_const_reference_folds() {
    let model = class(vec![
        single(
            FieldStatement::new(Accessibility::Private, "int").with_const(),
            "f6",
            3,
            15,
            Expr::int(3),
        ),
        single(
            static_readonly("int"),
            "f7",
            4,
            25,
            Expr::binary(BinOp::Add, Expr::int(8), Expr::name("f6")),
        ),
    ]);
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 4, 25, "f7", Some("11"))]);
}

#[test]
fn test_public_field_ignored() {
    let model = class(vec![single(
        FieldStatement::new(Accessibility::Public, "string")
            .with_static()
            .with_readonly(),
        "f",
        3,
        35,
        Expr::string(""),
    )]);
    assert!(analyze(&model).is_empty());
}

#[test]
fn test_null_ignored() {
    let model = class(vec![single(static_readonly("string"), "f", 3, 28, Expr::null())]);
    assert!(analyze(&model).is_empty());
}

#[test]
fn test_readonly_reference_does_not_fold() {
    let model = class(vec![
        single(static_readonly("int"), "f5", 3, 25, Expr::int(3)),
        single(
            static_readonly("int"),
            "f7",
            4,
            25,
            Expr::binary(BinOp::Add, Expr::int(8), Expr::name("f5")),
        ),
    ]);
    // f5 itself is still reported
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 3, 25, "f5", Some("3"))]);
}

#[test]
fn test_checked_overflow_is_not_constant() {
    let model = class(vec![single(
        static_readonly("int"),
        "f",
        3,
        25,
        Expr::binary(BinOp::Add, Expr::name("int.MaxValue"), Expr::int(1)),
    )]);
    assert!(analyze(&model).is_empty());
}

#[test]
fn test_long_max_value() {
    let model = class(vec![single(
        static_readonly("long"),
        "f",
        3,
        26,
        Expr::name("long.MaxValue"),
    )]);
    assert_diagnostics(
        &analyze(&model),
        &[(RuleId::Default, 3, 26, "f", Some("9223372036854775807"))],
    );
}

#[test]
fn test_widening_avoids_overflow() {
    let model = class(vec![single(
        static_readonly("long"),
        "f",
        3,
        26,
        Expr::binary(
            BinOp::Add,
            Expr::cast(PrimitiveType::Int64, Expr::name("int.MaxValue")),
            Expr::int(1),
        ),
    )]);
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 3, 26, "f", Some("2147483648"))]);
}

#[test]
fn test_unsupported_initializer_ignored() {
    let model = class(vec![
        single(
            static_readonly("string"),
            "a",
            3,
            28,
            Expr::Unsupported(UnsupportedExpr::Invocation),
        ),
        single(
            static_readonly("int"),
            "b",
            4,
            25,
            Expr::binary(BinOp::Div, Expr::int(1), Expr::int(0)),
        ),
        single(static_readonly("int"), "c", 5, 25, Expr::name("Unknown")),
    ]);
    assert!(analyze(&model).is_empty());
}

#[test]
fn test_const_cycle_ignored() {
    let constant = |name: &str, line: usize, other: &str| {
        single(
            FieldStatement::new(Accessibility::Private, "int").with_const(),
            name,
            line,
            15,
            Expr::binary(BinOp::Add, Expr::name(other), Expr::int(1)),
        )
    };
    let model = class(vec![
        constant("a", 3, "b"),
        constant("b", 4, "a"),
        single(static_readonly("int"), "f", 5, 25, Expr::name("a")),
    ]);
    assert!(analyze(&model).is_empty());
}

#[test]
fn test_boxed_and_nullable_fields_ignored() {
    let model = class(vec![
        single(static_readonly("object"), "boxed", 3, 28, Expr::int(42)),
        single(static_readonly("int?"), "nullable", 4, 26, Expr::int(42)),
        single(static_readonly("IComparable"), "comparable", 5, 33, Expr::int(42)),
        single(static_readonly("int"), "plain", 6, 25, Expr::int(42)),
    ]);
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 6, 25, "plain", Some("42"))]);
}

#[test]
fn test_narrowing_initializer_ignored() {
    let model = class(vec![
        single(static_readonly("int"), "narrow", 3, 25, Expr::long(5)),
        single(static_readonly("string"), "mismatch", 4, 28, Expr::int(5)),
    ]);
    assert!(analyze(&model).is_empty());
}
