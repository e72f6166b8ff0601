//! Shared helpers for the emitter integration tests.
#![allow(dead_code)]

use esdown_ast::Node;
use esdown_ast::factory::script;
use esdown_binder::SymbolTable;
use esdown_emitter::{EmitOptions, EmitOutput, emit_to_string};

/// Emit `statements` as the file `test.ts` with no semantic facts.
pub fn emit_statements(statements: Vec<Node>) -> String {
    emit_with(
        &script("test.ts", statements),
        &SymbolTable::new(),
        &EmitOptions::default(),
    )
}

pub fn emit_with(root: &Node, table: &SymbolTable, options: &EmitOptions) -> String {
    emit_to_string(root, table, options, false)
        .expect("emit should succeed")
        .text
}

pub fn emit_with_map(root: &Node, table: &SymbolTable, options: &EmitOptions) -> EmitOutput {
    emit_to_string(root, table, options, true).expect("emit should succeed")
}

/// Join lines with `\n` and a trailing newline, matching emitter output.
pub fn lines(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
