//! Integration tests for the `use-literals` command line

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use use_literals::frontend::model::{
    Accessibility, Compilation, Declarator, Expr, FieldStatement, Language, TypeDecl,
};

const SOURCE: &str = "\npublic class Class1\n{\n    static readonly string f1 = \"\";\n    static readonly int f5 = 3;\n}\n";

fn model() -> Compilation {
    let field = |ty: &str, name: &str, line: usize, column: usize, init: Expr| {
        FieldStatement::new(Accessibility::Private, ty)
            .with_static()
            .with_readonly()
            .declare(Declarator::at(name, line, column).with_initializer(init))
    };
    Compilation::new(Language::CSharp)
        .with_source("Class1.cs", SOURCE)
        .with_type(
            TypeDecl::new("Class1")
                .field(field("string", "f1", 4, 28, Expr::string("")))
                .field(field("int", "f5", 5, 25, Expr::int(3))),
        )
}

fn write_file(
    dir: &Path,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run the binary isolated from any user or project configuration
fn run(
    dir: &TempDir,
    args: &[&str],
) -> Output {
    Command::new(env!("CARGO_BIN_EXE_use-literals"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("USE_LITERALS_CONFIG")
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_text_output() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "class1.json", &model().to_json().unwrap());

    let output = run(&dir, &["check", "--no-color", file.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("warning[LIT1803]: Field 'f1'"), "{}", text);
    assert!(text.contains("warning[LIT1802]: Field 'f5'"), "{}", text);
    assert!(text.contains("--> Class1.cs:5:25"), "{}", text);
    assert!(text.contains("   5 |     static readonly int f5 = 3;"), "{}", text);
}

#[test]
fn test_check_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "class1.json", &model().to_json().unwrap());

    let output = run(&dir, &["check", "--format", "json", file.to_str().unwrap()]);
    assert!(output.status.success());
    let diagnostics: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let diagnostics = diagnostics.as_array().unwrap();
    assert_eq!(diagnostics.len(), 2);

    assert_eq!(diagnostics[0]["code"], "LIT1803");
    assert_eq!(diagnostics[0]["source"], "use-literals");
    assert_eq!(diagnostics[0]["range"]["start"]["line"], 3);
    assert_eq!(diagnostics[0]["range"]["start"]["character"], 27);
    assert_eq!(diagnostics[1]["code"], "LIT1802");
    assert_eq!(diagnostics[1]["data"]["arguments"][1], "3");
    assert_eq!(diagnostics[1]["data"]["file"], "Class1.cs");
}

#[test]
fn test_check_error_level_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "class1.json", &model().to_json().unwrap());
    let config = write_file(
        dir.path(),
        "strict.toml",
        "[rules]\nuse_literal = \"error\"\nuse_empty_string_literal = \"allow\"\n",
    );

    let output = run(
        &dir,
        &[
            "check",
            "--no-color",
            "--config",
            config.to_str().unwrap(),
            file.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("error[LIT1802]"), "{}", text);
    assert!(!text.contains("LIT1803"), "{}", text);
}

#[test]
fn test_check_project_config_discovered() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "class1.json", &model().to_json().unwrap());
    write_file(dir.path(), "use-literals.toml", "[rules]\nLIT1802 = \"off\"\n");

    let output = run(&dir, &["check", "--no-color", file.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("LIT1803"), "{}", text);
    assert!(!text.contains("LIT1802"), "{}", text);
}

#[test]
fn test_check_invalid_snapshot() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "broken.json", "{ not json");

    let output = run(&dir, &["check", file.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to check"), "{}", stderr);
}

#[test]
fn test_check_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("snapshots").join("nested");
    fs::create_dir_all(&nested).unwrap();
    write_file(&nested, "a.json", &model().to_json().unwrap());
    write_file(&dir.path().join("snapshots"), "b.json", &model().to_json().unwrap());
    write_file(&nested, "notes.txt", "not a snapshot");

    let snapshots = dir.path().join("snapshots");
    let output = run(
        &dir,
        &["check", "--format", "json", "--sequential", snapshots.to_str().unwrap()],
    );
    assert!(output.status.success());
    let diagnostics: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(diagnostics.as_array().unwrap().len(), 4);
}

#[test]
fn test_rules_command() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["rules"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("LIT1802"), "{}", text);
    assert!(text.contains("use_empty_string_literal"), "{}", text);
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["version"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        format!("use-literals {}", env!("CARGO_PKG_VERSION"))
    );
}
