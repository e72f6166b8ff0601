//! End-to-end tests for the `esdown` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use esdown::CompilationUnit;
use esdown::ast::factory::*;
use esdown::binder::SymbolTable;
use tempfile::TempDir;

fn write_unit(dir: &Path, relative: &str, unit: &CompilationUnit) -> PathBuf {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, unit.to_json().unwrap()).unwrap();
    path
}

fn good_unit(file_name: &str) -> CompilationUnit {
    CompilationUnit::new(
        script_with_source(
            file_name,
            "var a = 1;\n",
            vec![var_stmt(ident("a"), Some(num(1.0))).with_span(0, 10)],
        ),
        SymbolTable::new(),
    )
}

fn bad_unit(file_name: &str) -> CompilationUnit {
    CompilationUnit::new(
        script_with_source(
            file_name,
            "var a = 1;\nT;\n",
            vec![
                var_stmt(ident("a"), Some(num(1.0))),
                expr_stmt(type_ref("T").with_span(11, 12)),
            ],
        ),
        SymbolTable::new(),
    )
}

fn esdown(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_esdown"))
        .args(args)
        .arg("--pretty")
        .arg("false")
        .current_dir(dir.path())
        .env_remove("ESDOWN_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn esdown")
}

#[test]
fn test_emits_next_to_unit() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "app.unit.json", &good_unit("app.ts"));

    let output = esdown(&dir, &["app.unit.json"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("app.js")).unwrap(),
        "var a = 1;\n"
    );
    assert!(!dir.path().join("app.js.map").exists());
}

#[test]
fn test_source_map_and_out_dir() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "units/app.unit.json", &good_unit("app.ts"));

    let output = esdown(&dir, &["--source-map", "--out-dir", "dist", "units"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let js = std::fs::read_to_string(dir.path().join("dist/app.js")).unwrap();
    assert_eq!(js, "var a = 1;\n//# sourceMappingURL=app.js.map\n");
    let map: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("dist/app.js.map")).unwrap())
            .unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "app.js");
    assert_eq!(map["sources"][0], "app.ts");
}

#[test]
fn test_crlf_new_line() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "app.unit.json", &good_unit("app.ts"));

    let output = esdown(&dir, &["--new-line", "crlf", "app.unit.json"]);

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("app.js")).unwrap(),
        "var a = 1;\r\n"
    );
}

#[test]
fn test_failed_unit_sets_exit_code_and_reports() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "good.unit.json", &good_unit("good.ts"));
    write_unit(dir.path(), "bad.unit.json", &bad_unit("bad.ts"));

    let output = esdown(&dir, &["--source-map", "."]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad.ts:2:1 - error ES9001"), "{stderr}");
    assert!(stderr.contains("1 of 2 units failed."), "{stderr}");
    assert!(dir.path().join("good.js").exists());
    assert!(dir.path().join("good.js.map").exists());
    assert!(!dir.path().join("bad.js.map").exists());
}

#[test]
fn test_project_file_drives_the_build() {
    let dir = TempDir::new().unwrap();
    write_unit(dir.path(), "src/main.unit.json", &good_unit("main.ts"));
    write_unit(dir.path(), "legacy/old.unit.json", &bad_unit("old.ts"));
    std::fs::write(
        dir.path().join("esdown.json"),
        r#"{
            // only the sources under src
            "compilerOptions": { "outDir": "build", "sourceMap": "true" },
            "include": ["src/**"],
        }"#,
    )
    .unwrap();

    let output = esdown(&dir, &[]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("build/main.js").exists());
    assert!(dir.path().join("build/main.js.map").exists());
    assert!(!dir.path().join("build/old.js").exists());
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    let output = esdown(&dir, &["nowhere"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
