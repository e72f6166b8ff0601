//! Source map recording, encoding and the `sourceMappingURL` trailer.

mod support;

use esdown_ast::FunctionDeclaration;
use esdown_ast::factory::*;
use esdown_binder::SymbolTable;
use esdown_common::LineAndColumn;
use esdown_emitter::{EmitError, EmitOptions, MappingRecord, SourceMapBuilder, emit};
use support::*;

fn position(line: u32, column: u32) -> LineAndColumn {
    LineAndColumn::new(line, column)
}

fn find_record<'r>(
    records: &'r [MappingRecord],
    original_start: LineAndColumn,
    original_end: LineAndColumn,
) -> Option<&'r MappingRecord> {
    records.iter().find_map(|record| {
        if record.original_start == original_start && record.original_end == original_end {
            Some(record)
        } else {
            find_record(&record.children, original_start, original_end)
        }
    })
}

/// `var x = 1;` with every node positioned.
fn positioned_variable() -> esdown_ast::Node {
    let source = "var x = 1;\n";
    let declarator = declarator(ident("x").with_span(4, 5), Some(num(1.0).with_span(8, 9)))
        .with_span(4, 9);
    script_with_source(
        "test.ts",
        source,
        vec![var_stmt_multi(vec![declarator]).with_span(0, 10)],
    )
}

#[test]
fn test_trailer_and_document_fields() {
    let output = emit_with_map(&positioned_variable(), &SymbolTable::new(), &EmitOptions::default());

    assert_eq!(output.text, "var x = 1;\n//# sourceMappingURL=test.js.map\n");

    let json = output.source_map.expect("source map text");
    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["version"], 3);
    assert_eq!(document["file"], "test.js");
    assert_eq!(document["sourceRoot"], "");
    assert_eq!(document["sources"], serde_json::json!(["test.ts"]));
    assert!(document["mappings"].as_str().unwrap().starts_with("AAAA"));
}

#[test]
fn test_mappings_nest_like_the_tree() {
    let output = emit_with_map(&positioned_variable(), &SymbolTable::new(), &EmitOptions::default());
    let mappings = &output.summary.mappings;

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].emitted_start, position(0, 0));

    let declarator = find_record(mappings, position(0, 4), position(0, 9))
        .expect("declarator mapping");
    assert_eq!(declarator.emitted_start, position(0, 4));

    let name = find_record(&declarator.children, position(0, 4), position(0, 5))
        .expect("name mapping nested under the declarator");
    assert_eq!(name.emitted_start, position(0, 4));
    assert_eq!(name.emitted_end, position(0, 5));
}

#[test]
fn test_names_are_qualified_by_enclosing_declarations() {
    let source = "module M { function f() { return; } }\n";
    let f = function(FunctionDeclaration::new(
        Some(ident("f").with_span(20, 21)),
        vec![],
        Some(block(vec![return_stmt(None).with_span(26, 33)])),
    ))
    .with_span(11, 35);
    let tree = script_with_source(
        "test.ts",
        source,
        vec![module(ident("M").with_span(7, 8), vec![f]).with_span(0, 37)],
    );

    let output = emit_with_map(&tree, &SymbolTable::new(), &EmitOptions::default());
    let map = output.summary.source_map.expect("source map");

    assert_eq!(map.names, vec!["M".to_string(), "M.f".to_string()]);
    let statement = find_record(&output.summary.mappings, position(0, 26), position(0, 33))
        .expect("return statement mapping");
    assert_eq!(statement.name_index, Some(1));
    let function = find_record(&output.summary.mappings, position(0, 11), position(0, 35))
        .expect("function mapping");
    assert_eq!(function.name_index, Some(0));
}

#[test]
fn test_map_root_and_source_root() {
    let options = EmitOptions {
        map_root: "http://maps/".to_string(),
        source_root: "src".to_string(),
        ..EmitOptions::default()
    };
    let output = emit_with_map(&positioned_variable(), &SymbolTable::new(), &options);

    assert!(output.text.ends_with("//# sourceMappingURL=http://maps/test.js.map\n"));
    let map = output.summary.source_map.expect("source map");
    assert_eq!(map.source_root, "src");
}

#[test]
fn test_no_trailer_without_map_sink() {
    let mut sink = Vec::new();
    emit(
        &positioned_variable(),
        &SymbolTable::new(),
        &EmitOptions::default(),
        &mut sink,
        None,
    )
    .unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), "var x = 1;\n");
}

#[test]
fn test_failed_emit_writes_no_map() {
    let tree = script_with_source(
        "test.ts",
        "T;\n",
        vec![expr_stmt(type_ref("T").with_span(0, 1)).with_span(0, 2)],
    );
    let mut sink = Vec::new();
    let mut map_sink = Vec::new();

    let result = emit(
        &tree,
        &SymbolTable::new(),
        &EmitOptions::default(),
        &mut sink,
        Some(&mut map_sink),
    );

    assert!(matches!(result, Err(EmitError::TypeOnlyNode { .. })));
    assert!(!String::from_utf8(sink).unwrap().contains("sourceMappingURL"));
    assert!(map_sink.is_empty());
}

// =============================================================================
// Builder
// =============================================================================

#[test]
fn test_builder_rejects_unbalanced_records() {
    let mut builder = SourceMapBuilder::new();
    assert!(matches!(
        builder.end(position(0, 1)),
        Err(EmitError::UnbalancedSourceMap { .. })
    ));

    let mut builder = SourceMapBuilder::new();
    builder.start(position(0, 0), position(0, 0), position(0, 3));
    assert!(matches!(
        builder.finish("out.js", "in.ts", ""),
        Err(EmitError::UnbalancedSourceMap { .. })
    ));
}

#[test]
fn test_builder_deduplicates_names() {
    let mut builder = SourceMapBuilder::new();
    builder.push_name("M");
    builder.pop_name();
    builder.push_name("M");
    builder.push_name("f");
    builder.start(position(0, 0), position(2, 4), position(2, 9));
    builder.end(position(0, 5)).unwrap();
    builder.pop_name();
    builder.pop_name();

    assert_eq!(builder.names().collect::<Vec<_>>(), ["M", "M.f"]);
    let map = builder.finish("out.js", "in.ts", "").unwrap();
    // Start segment carries the name; the end segment does not.
    assert_eq!(map.mappings, "AAEIC,KAAK");
}
