use clap::Parser;
use esdown_common::{ModuleKind, NewLineKind};
use std::path::Path;

use super::args::CliArgs;
use super::config::*;

#[test]
fn test_parse_lenient_booleans() {
    let config = parse_config(
        r#"{ "compilerOptions": { "sourceMap": "true", "removeComments": "off", "propagateEnumConstants": 1 } }"#,
    );
    // Numbers are not accepted, only booleans and boolean-like strings.
    assert!(config.is_err());

    let config = parse_config(
        r#"{ "compilerOptions": { "sourceMap": "true", "removeComments": "off", "propagateEnumConstants": true } }"#,
    )
    .unwrap();
    let options = config.compiler_options.unwrap();
    assert_eq!(options.source_map, Some(true));
    assert_eq!(options.remove_comments, Some(false));
    assert_eq!(options.propagate_enum_constants, Some(true));
}

#[test]
fn test_parse_invalid_boolean_string() {
    let err = parse_config(r#"{ "compilerOptions": { "sourceMap": "maybe" } }"#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid boolean value"));
}

#[test]
fn test_parse_accepts_comments_and_trailing_commas() {
    let source = r#"
        // project settings
        {
            /* emit target */
            "compilerOptions": {
                "module": "amd", // inline
                "outDir": "out//js",
            },
            "include": ["units/**",],
        }
    "#;
    let config = parse_config(source).unwrap();
    let options = config.compiler_options.unwrap();
    assert_eq!(options.module.as_deref(), Some("amd"));
    assert_eq!(options.out_dir.as_deref(), Some("out//js"));
    assert_eq!(config.include, Some(vec!["units/**".to_string()]));
}

#[test]
fn test_resolve_options() {
    let config = parse_config(
        r#"{
            "compilerOptions": {
                "module": "AMD",
                "newLine": "crlf",
                "indentSize": 2,
                "sourceMap": true,
                "sourceRoot": "src",
                "mapRoot": "maps",
                "outDir": "out",
                "removeComments": true
            }
        }"#,
    )
    .unwrap();
    let base = Path::new("/project");

    let resolved = resolve_options(Some(&config), base).unwrap();

    assert_eq!(resolved.emit.module, ModuleKind::AMD);
    assert_eq!(resolved.emit.new_line, NewLineKind::CarriageReturnLineFeed);
    assert_eq!(resolved.emit.indent_size, 2);
    assert_eq!(resolved.emit.source_root, "src");
    assert_eq!(resolved.emit.map_root, "maps");
    assert!(!resolved.emit.emit_comments);
    assert!(resolved.source_map);
    assert_eq!(resolved.out_dir.as_deref(), Some(Path::new("/project/out")));
}

#[test]
fn test_resolve_rejects_unknown_module() {
    let config = parse_config(r#"{ "compilerOptions": { "module": "system" } }"#).unwrap();
    let err = resolve_options(Some(&config), Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("unsupported compilerOptions.module"));
}

#[test]
fn test_cli_overrides_win() {
    let config = parse_config(
        r#"{ "compilerOptions": { "module": "amd", "outDir": "out", "propagateEnumConstants": false } }"#,
    )
    .unwrap();
    let mut resolved = resolve_options(Some(&config), Path::new("/project")).unwrap();
    let args = CliArgs::try_parse_from([
        "esdown",
        "--module",
        "commonjs",
        "--out-dir",
        "dist",
        "--propagate-constants",
        "--source-map",
    ])
    .unwrap();

    apply_cli_overrides(&mut resolved, &args, Path::new("/work"));

    assert_eq!(resolved.emit.module, ModuleKind::CommonJS);
    assert_eq!(resolved.out_dir.as_deref(), Some(Path::new("/work/dist")));
    assert!(resolved.emit.propagate_enum_constants);
    assert!(resolved.source_map);
    assert!(resolved.emit.emit_comments);
}

#[test]
fn test_unit_filter() {
    let filter = UnitFilter::new(
        Path::new("/project"),
        &["units/**".to_string()],
        &["units/legacy/**".to_string()],
    )
    .unwrap();

    assert!(filter.accepts(Path::new("/project/units/app.unit.json")));
    assert!(filter.accepts(Path::new("/project/units/deep/lib.unit.json")));
    assert!(!filter.accepts(Path::new("/project/units/legacy/old.unit.json")));
    assert!(!filter.accepts(Path::new("/project/other/x.unit.json")));

    let open = UnitFilter::new(Path::new("/project"), &[], &[]).unwrap();
    assert!(open.accepts(Path::new("/anywhere/x.unit.json")));
}

#[test]
fn test_invalid_glob_is_an_error() {
    assert!(UnitFilter::new(Path::new("."), &["a/[".to_string()], &[]).is_err());
}

#[test]
fn test_load_config_follows_extends() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("base.json"),
        r#"{ "compilerOptions": { "module": "amd", "sourceMap": true }, "include": ["a/**"] }"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{ "extends": "./base", "compilerOptions": { "sourceMap": false } }"#,
    )
    .unwrap();

    let config = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

    let options = config.compiler_options.unwrap();
    assert_eq!(options.module.as_deref(), Some("amd"));
    assert_eq!(options.source_map, Some(false));
    assert_eq!(config.include, Some(vec!["a/**".to_string()]));
    assert!(config.extends.is_none());
}

#[test]
fn test_load_config_detects_extends_cycle() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.json"), r#"{ "extends": "./b" }"#).unwrap();
    std::fs::write(dir.path().join("b.json"), r#"{ "extends": "./a" }"#).unwrap();

    let err = load_config(&dir.path().join("a.json")).unwrap_err();
    assert!(format!("{err:#}").contains("extends cycle"));
}

#[test]
fn test_find_config() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(find_config(None, dir.path()).unwrap(), None);
    assert!(find_config(Some(Path::new("missing.json")), dir.path()).is_err());
    assert!(find_config(Some(Path::new(".")), dir.path()).is_err());

    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "{}").unwrap();
    assert_eq!(find_config(None, dir.path()).unwrap(), Some(path.clone()));
    assert_eq!(
        find_config(Some(Path::new(".")), dir.path()).unwrap(),
        Some(dir.path().join(".").join(CONFIG_FILE_NAME))
    );
    assert_eq!(
        find_config(Some(Path::new(CONFIG_FILE_NAME)), dir.path()).unwrap(),
        Some(path)
    );
}
