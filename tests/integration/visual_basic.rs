//! Visual Basic field declarations

use crate::common::{assert_diagnostics, single};
use use_literals::frontend::model::{
    Accessibility, BinOp, Compilation, Declarator, Expr, FieldStatement, Language, TypeDecl,
};
use use_literals::{analyze, RuleId};

fn shared_readonly(ty: &str) -> FieldStatement {
    FieldStatement::new(Accessibility::Private, ty)
        .with_static()
        .with_readonly()
}

fn positive_model() -> Compilation {
    Compilation::new(Language::VisualBasic).with_type(
        TypeDecl::new("Class1")
            .field(single(shared_readonly("String"), "f1", 3, 21, Expr::string("")))
            .field(single(shared_readonly("String"), "f2", 4, 21, Expr::string("Nothing")))
            .field(
                shared_readonly("String")
                    .declare(Declarator::at("f3", 5, 21).with_type("String"))
                    .declare(
                        Declarator::at("f4", 5, 35)
                            .with_type("String")
                            .with_initializer(Expr::string("Message is shown only for f4")),
                    ),
            )
            .field(single(shared_readonly("Integer"), "f5", 6, 21, Expr::int(3)))
            .field(single(
                FieldStatement::new(Accessibility::Private, "Integer").with_const(),
                "f6",
                7,
                11,
                Expr::int(3),
            ))
            .field(single(
                shared_readonly("Integer"),
                "f7",
                8,
                21,
                Expr::binary(BinOp::Add, Expr::int(8), Expr::name("f6")),
            )),
    )
}

#[test]
fn test_basic_diagnostics() {
    assert_diagnostics(
        &analyze(&positive_model()),
        &[
            (RuleId::EmptyString, 3, 21, "f1", None),
            (RuleId::Default, 4, 21, "f2", Some("Nothing")),
            (RuleId::Default, 5, 35, "f4", Some("Message is shown only for f4")),
            (RuleId::Default, 6, 21, "f5", Some("3")),
            (RuleId::Default, 8, 21, "f7", Some("11")),
        ],
    );
}

#[test]
fn test_basic_no_diagnostics() {
    let model = Compilation::new(Language::VisualBasic).with_type(
        TypeDecl::new("Class1")
            .field(single(
                FieldStatement::new(Accessibility::Public, "String")
                    .with_static()
                    .with_readonly(),
                "f1",
                3,
                28,
                Expr::string(""),
            ))
            .field(single(
                FieldStatement::new(Accessibility::Internal, "String")
                    .with_static()
                    .with_readonly(),
                "f2",
                4,
                28,
                Expr::string("Nothing"),
            ))
            .field(
                FieldStatement::new(Accessibility::Private, "String")
                    .with_static()
                    .declare(Declarator::at("f3", 5, 12).with_type("String"))
                    .declare(
                        Declarator::at("f4", 5, 26)
                            .with_type("String")
                            .with_initializer(Expr::string("Message is shown only for f4")),
                    ),
            )
            .field(single(
                FieldStatement::new(Accessibility::Private, "Integer").with_readonly(),
                "f5",
                6,
                14,
                Expr::int(3),
            ))
            .field(single(
                FieldStatement::new(Accessibility::Private, "Integer").with_const(),
                "f6",
                7,
                11,
                Expr::int(3),
            ))
            .field(single(
                shared_readonly("Integer"),
                "f7",
                8,
                21,
                Expr::binary(BinOp::Add, Expr::int(8), Expr::name("f5")),
            ))
            .field(single(shared_readonly("String"), "f8", 9, 21, Expr::null())),
    );
    assert!(analyze(&model).is_empty());
}

#[test]
fn test_basic_names_are_case_insensitive() {
    let model = Compilation::new(Language::VisualBasic).with_type(
        TypeDecl::new("Class1")
            .field(single(
                FieldStatement::new(Accessibility::Private, "Integer").with_const(),
                "Limit",
                3,
                11,
                Expr::int(3),
            ))
            .field(single(
                shared_readonly("Integer"),
                "f7",
                4,
                21,
                Expr::binary(BinOp::Add, Expr::int(8), Expr::name("LIMIT")),
            )),
    );
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 4, 21, "f7", Some("11"))]);
}

#[test]
fn test_basic_concatenation() {
    let model = Compilation::new(Language::VisualBasic).with_type(TypeDecl::new("Class1").field(
        single(
            shared_readonly("String"),
            "Greeting",
            3,
            21,
            Expr::binary(BinOp::Concat, Expr::string("Hello, "), Expr::char('W')),
        ),
    ));
    assert_diagnostics(
        &analyze(&model),
        &[(RuleId::Default, 3, 21, "Greeting", Some("Hello, W"))],
    );
}

#[test]
fn test_basic_snapshot_keywords() {
    let model = Compilation::from_json(
        r#"{
            "language": "vb",
            "types": [{
                "name": "Class1",
                "fields": [
                    {
                        "accessibility": "friend",
                        "modifiers": { "is_shared": true, "is_readonly": true },
                        "declared_type": "String",
                        "declarators": [{
                            "name": "f2",
                            "name_span": { "start": { "line": 4, "column": 28 }, "end": { "line": 4, "column": 30 } },
                            "initializer": { "literal": { "string": "Nothing" } }
                        }]
                    },
                    {
                        "modifiers": { "is_shared": true, "is_readonly": true },
                        "declared_type": "Integer",
                        "declarators": [{
                            "name": "f5",
                            "name_span": { "start": { "line": 6, "column": 21 }, "end": { "line": 6, "column": 23 } },
                            "initializer": { "literal": { "integer": { "value": 3 } } }
                        }]
                    }
                ]
            }]
        }"#,
    )
    .unwrap();
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 6, 21, "f5", Some("3"))]);
}

#[test]
fn test_basic_division_is_floating_point() {
    let model = Compilation::new(Language::VisualBasic).with_type(
        TypeDecl::new("Class1")
            .field(single(
                shared_readonly("Double"),
                "Half",
                3,
                21,
                Expr::binary(BinOp::Div, Expr::int(7), Expr::int(2)),
            ))
            .field(single(
                shared_readonly("Integer"),
                "Whole",
                4,
                21,
                Expr::binary(BinOp::IntDiv, Expr::int(7), Expr::int(2)),
            ))
            // Double 不能隐式收窄为 Integer
            .field(single(
                shared_readonly("Integer"),
                "Narrowed",
                5,
                21,
                Expr::binary(BinOp::Div, Expr::int(7), Expr::int(2)),
            )),
    );
    assert_diagnostics(
        &analyze(&model),
        &[
            (RuleId::Default, 3, 21, "Half", Some("3.5")),
            (RuleId::Default, 4, 21, "Whole", Some("3")),
        ],
    );
}

#[test]
fn test_basic_snapshot_integer_division() {
    let model = Compilation::from_json(
        r#"{
            "language": "vb",
            "types": [{
                "name": "Class1",
                "fields": [{
                    "modifiers": { "is_shared": true, "is_readonly": true },
                    "declared_type": "Integer",
                    "declarators": [{
                        "name": "Whole",
                        "name_span": { "start": { "line": 3, "column": 21 }, "end": { "line": 3, "column": 26 } },
                        "initializer": { "binary": {
                            "op": "int_div",
                            "left": { "literal": { "integer": { "value": 7 } } },
                            "right": { "literal": { "integer": { "value": 2 } } }
                        } }
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 3, 21, "Whole", Some("3"))]);
}
