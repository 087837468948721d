//! C# field declarations

use crate::common::{assert_diagnostics, single, static_readonly};
use use_literals::frontend::model::{
    Accessibility, BinOp, Compilation, Declarator, Expr, FieldStatement, Language, TypeDecl,
};
use use_literals::util::diagnostic::TextEmitter;
use use_literals::{analyze, RuleId};

const POSITIVE_SOURCE: &str = r#"
public class Class1
{
    static readonly string f1 = "";
    static readonly string f2 = "Nothing";
    static readonly string f3,f4 = "Message is shown only for f4";
    static readonly int f5 = 3;
    const int f6 = 3;
    static readonly int f7 = 8 + f6;
}
"#;

fn positive_model() -> Compilation {
    Compilation::new(Language::CSharp)
        .with_source("Class1.cs", POSITIVE_SOURCE)
        .with_type(
            TypeDecl::new("Class1")
                .field(single(static_readonly("string"), "f1", 4, 28, Expr::string("")))
                .field(single(static_readonly("string"), "f2", 5, 28, Expr::string("Nothing")))
                .field(
                    static_readonly("string")
                        .declare(Declarator::at("f3", 6, 28))
                        .declare(
                            Declarator::at("f4", 6, 31)
                                .with_initializer(Expr::string("Message is shown only for f4")),
                        ),
                )
                .field(single(static_readonly("int"), "f5", 7, 25, Expr::int(3)))
                .field(single(
                    FieldStatement::new(Accessibility::Private, "int").with_const(),
                    "f6",
                    8,
                    15,
                    Expr::int(3),
                ))
                .field(single(
                    static_readonly("int"),
                    "f7",
                    9,
                    25,
                    Expr::binary(BinOp::Add, Expr::int(8), Expr::name("f6")),
                )),
        )
}

fn negative_model() -> Compilation {
    Compilation::new(Language::CSharp).with_type(
        TypeDecl::new("Class1")
            .field(single(
                FieldStatement::new(Accessibility::Public, "string")
                    .with_static()
                    .with_readonly(),
                "f1",
                4,
                35,
                Expr::string(""),
            ))
            .field(single(
                FieldStatement::new(Accessibility::Internal, "string")
                    .with_static()
                    .with_readonly(),
                "f2",
                5,
                37,
                Expr::string("Nothing"),
            ))
            .field(
                FieldStatement::new(Accessibility::Private, "string")
                    .with_static()
                    .declare(Declarator::at("f3", 6, 19))
                    .declare(
                        Declarator::at("f4", 6, 23)
                            .with_initializer(Expr::string("Message is shown only for f4")),
                    ),
            )
            .field(single(
                FieldStatement::new(Accessibility::Private, "int").with_readonly(),
                "f5",
                7,
                18,
                Expr::int(3),
            ))
            .field(single(
                FieldStatement::new(Accessibility::Private, "int").with_const(),
                "f6",
                8,
                15,
                Expr::int(3),
            ))
            .field(single(
                static_readonly("int"),
                "f7",
                9,
                25,
                Expr::binary(BinOp::Add, Expr::int(8), Expr::name("f5")),
            ))
            .field(single(static_readonly("string"), "f8", 10, 28, Expr::null())),
    )
}

#[test]
fn test_csharp_diagnostics() {
    let diagnostics = analyze(&positive_model());
    assert_diagnostics(
        &diagnostics,
        &[
            (RuleId::EmptyString, 4, 28, "f1", None),
            (RuleId::Default, 5, 28, "f2", Some("Nothing")),
            (RuleId::Default, 6, 31, "f4", Some("Message is shown only for f4")),
            (RuleId::Default, 7, 25, "f5", Some("3")),
            (RuleId::Default, 9, 25, "f7", Some("11")),
        ],
    );
}

#[test]
fn test_csharp_no_diagnostics() {
    assert!(analyze(&negative_model()).is_empty());
}

#[test]
fn test_csharp_snapshot_round_trip_through_json() {
    let json = positive_model().to_json().unwrap();
    let loaded = Compilation::from_json(&json).unwrap();
    assert_eq!(analyze(&loaded), analyze(&positive_model()));
}

#[test]
fn test_csharp_text_rendering_points_at_name() {
    let model = positive_model();
    let source = model.source_file().unwrap();
    let diagnostics = analyze(&model);
    let output = TextEmitter::plain().render_all(&diagnostics, Some(&source));

    assert!(output.contains("warning[LIT1803]: Field 'f1'"), "{}", output);
    assert!(output.contains("--> Class1.cs:9:25"), "{}", output);
    assert!(output.contains("   9 |     static readonly int f7 = 8 + f6;"), "{}", output);
    assert!(output.contains(&format!("     | {}^^\n", " ".repeat(24))), "{}", output);
}

#[test]
fn test_csharp_qualified_constant_reference() {
    let model = Compilation::new(Language::CSharp)
        .with_type(TypeDecl::new("Limits").in_namespace("Demo").field(single(
            FieldStatement::new(Accessibility::Public, "int").with_const(),
            "Max",
            3,
            22,
            Expr::int(40),
        )))
        .with_type(
            TypeDecl::new("Class1").in_namespace("Demo").field(single(
                static_readonly("int"),
                "f",
                8,
                25,
                Expr::binary(BinOp::Add, Expr::name("Demo.Limits.Max"), Expr::name("Limits.Max")),
            )),
        );
    assert_diagnostics(&analyze(&model), &[(RuleId::Default, 8, 25, "f", Some("80"))]);
}
