//! Internal modules, enums, external modules and imports.

mod support;

use esdown_ast::factory::*;
use esdown_ast::{FunctionDeclaration, NodeData, UnaryOperator};
use esdown_binder::{DeclKind, SymbolFlags, SymbolKind, SymbolTable};
use esdown_common::ModuleKind;
use esdown_emitter::EmitOptions;
use support::*;

#[test]
fn test_module_with_exported_variable() {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let m = table.declare(DeclKind::Module, "M", Some(script_decl));
    let x = table.declare_symbol("X", SymbolKind::Variable, Some(m), SymbolFlags::EXPORTED);

    let tree = script(
        "test.ts",
        vec![
            module(
                ident("M"),
                vec![var_stmt_multi(vec![
                    declarator(ident("X"), Some(num(1.0))).with_symbol(x),
                ])],
            )
            .with_declaration(m),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var M;",
            "(function (M) {",
            "    M.X = 1;",
            "})(M || (M = {}));",
        ])
    );
}

#[test]
fn test_exported_variable_assignments_reach_the_module() {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let m = table.declare(DeclKind::Module, "M", Some(script_decl));
    let x = table.declare_symbol("x", SymbolKind::Variable, Some(m), SymbolFlags::EXPORTED);

    let tree = script(
        "test.ts",
        vec![
            module(
                ident("M"),
                vec![
                    var_stmt_multi(vec![declarator(ident("x"), None).with_symbol(x)]),
                    expr_stmt(assign(ident("x").with_symbol(x), num(5.0))),
                ],
            )
            .with_declaration(m),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var M;",
            "(function (M) {",
            "    M.x = 5;",
            "})(M || (M = {}));",
        ])
    );
}

#[test]
fn test_mixed_exported_declarators_split_into_statements() {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let m = table.declare(DeclKind::Module, "M", Some(script_decl));
    let a = table.declare_symbol(
        "a",
        SymbolKind::Variable,
        Some(m),
        SymbolFlags::EXPORTED | SymbolFlags::READ_ONLY,
    );
    let b = table.declare_symbol("b", SymbolKind::Variable, Some(m), SymbolFlags::EXPORTED);
    let c = table.declare_symbol("c", SymbolKind::Variable, Some(m), SymbolFlags::EXPORTED);

    let tree = script(
        "test.ts",
        vec![
            module(
                ident("M"),
                vec![
                    var_stmt_multi(vec![
                        declarator(ident("a"), Some(num(1.0))).with_symbol(a),
                        declarator(ident("b"), Some(ident("a").with_symbol(a))).with_symbol(b),
                        declarator(ident("c"), None).with_symbol(c),
                    ]),
                    var_stmt(ident("d"), Some(ident("b").with_symbol(b))),
                ],
            )
            .with_declaration(m),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var M;",
            "(function (M) {",
            "    var a = M.a = 1;",
            "    M.b = a;",
            "    var d = M.b;",
            "})(M || (M = {}));",
        ])
    );
}

#[test]
fn test_nested_exported_module() {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let a = table.declare(DeclKind::Module, "A", Some(script_decl));
    let b = table.declare(DeclKind::Module, "B", Some(a));
    let b_symbol = table.declare_symbol("B", SymbolKind::Module, Some(a), SymbolFlags::EXPORTED);
    let v = table.declare_symbol("v", SymbolKind::Variable, Some(b), SymbolFlags::EXPORTED);

    let inner = module(
        ident("B"),
        vec![var_stmt_multi(vec![declarator(ident("v"), Some(num(1.0))).with_symbol(v)])],
    )
    .with_symbol(b_symbol)
    .with_declaration(b);
    let tree = script("test.ts", vec![module(ident("A"), vec![inner]).with_declaration(a)]);

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var A;",
            "(function (A) {",
            "    var B;",
            "    (function (B) {",
            "        B.v = 1;",
            "    })(B = A.B || (A.B = {}));",
            "})(A || (A = {}));",
        ])
    );
}

#[test]
fn test_module_without_runtime_members_is_skipped() {
    let tree = script(
        "test.ts",
        vec![
            module(ident("Types"), vec![interface(ident("I"), vec![])]),
            var_stmt(ident("a"), Some(num(1.0))),
        ],
    );

    assert_eq!(
        emit_with(&tree, &SymbolTable::new(), &EmitOptions::default()),
        "var a = 1;\n"
    );
}

#[test]
fn test_module_captures_this() {
    let mut table = SymbolTable::new();
    let m = table.declare(DeclKind::Module, "M", None);
    table.set_captures_this(m);
    let arrow = function(
        FunctionDeclaration::new(None, vec![], Some(this_expr())).as_arrow(),
    );
    let tree = script(
        "test.ts",
        vec![module(ident("M"), vec![var_stmt(ident("f"), Some(arrow))]).with_declaration(m)],
    );

    let output = emit_with(&tree, &table, &EmitOptions::default());

    assert!(output.starts_with("var M;\n(function (M) {\n    var _this = this;\n"));
    assert!(output.contains("        return _this;\n"));
}

// =============================================================================
// Enums
// =============================================================================

#[test]
fn test_enum_auto_numbering() {
    let tree = script(
        "test.ts",
        vec![enum_decl(
            ident("Color"),
            vec![
                enum_member(ident("Red"), None),
                enum_member(ident("Green"), Some(num(5.0))),
                enum_member(ident("Blue"), None),
                enum_member(ident("Back"), Some(unary(UnaryOperator::Negate, num(1.0)))),
            ],
        )],
    );

    assert_eq!(
        emit_with(&tree, &SymbolTable::new(), &EmitOptions::default()),
        lines(&[
            "var Color;",
            "(function (Color) {",
            "    Color[Color[\"Red\"] = 0] = \"Red\";",
            "    Color[Color[\"Green\"] = 5] = \"Green\";",
            "    Color[Color[\"Blue\"] = 6] = \"Blue\";",
            "    Color[Color[\"Back\"] = -1] = \"Back\";",
            "})(Color || (Color = {}));",
        ])
    );
}

#[test]
fn test_enum_after_computed_member() {
    let tree = script(
        "test.ts",
        vec![enum_decl(
            ident("E"),
            vec![
                enum_member(ident("A"), Some(call(ident("f"), vec![]))),
                enum_member(ident("B"), None),
                enum_member(ident("C"), None),
            ],
        )],
    );

    let output = emit_with(&tree, &SymbolTable::new(), &EmitOptions::default());

    assert!(output.contains("    E[E[\"A\"] = f()] = \"A\";\n"));
    assert!(output.contains("    E[E[\"B\"] = E[\"A\"] + 1] = \"B\";\n"));
    assert!(output.contains("    E[E[\"C\"] = E[\"B\"] + 1] = \"C\";\n"));
}

#[test]
fn test_enum_uses_binder_constants() {
    let mut table = SymbolTable::new();
    let e = table.declare(DeclKind::Enum, "E", None);
    let a = table.declare_symbol("A", SymbolKind::EnumMember, Some(e), SymbolFlags::empty());
    table.set_constant_value(a, 4.0);

    let tree = script(
        "test.ts",
        vec![
            enum_decl(
                ident("E"),
                vec![
                    enum_member(ident("A"), Some(binary(
                        esdown_ast::BinaryOperator::LeftShift,
                        num(1.0),
                        num(2.0),
                    )))
                    .with_symbol(a),
                    enum_member(ident("B"), None),
                ],
            )
            .with_declaration(e),
        ],
    );

    let output = emit_with(&tree, &table, &EmitOptions::default());

    assert!(output.contains("    E[E[\"A\"] = 4] = \"A\";\n"));
    assert!(output.contains("    E[E[\"B\"] = 5] = \"B\";\n"));
}

#[test]
fn test_enum_constant_propagation() {
    let mut table = SymbolTable::new();
    let e = table.declare(DeclKind::Enum, "Color", None);
    let red = table.declare_symbol("Red", SymbolKind::EnumMember, Some(e), SymbolFlags::empty());
    table.set_constant_value(red, 0.0);

    let access = || dot(ident("Color"), "Red").with_symbol(red);
    let tree = script("test.ts", vec![var_stmt(ident("c"), Some(access()))]);

    let propagating = EmitOptions {
        propagate_enum_constants: true,
        ..EmitOptions::default()
    };
    assert_eq!(
        emit_with(&tree, &table, &propagating),
        "var c = 0 /* Color.Red */;\n"
    );

    let tree = script("test.ts", vec![var_stmt(ident("c"), Some(access()))]);
    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        "var c = Color.Red;\n"
    );
}

// =============================================================================
// External modules
// =============================================================================

fn dynamic_module_table() -> (SymbolTable, esdown_ast::DeclId, esdown_ast::SymbolId, esdown_ast::SymbolId) {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let dm = table.declare(DeclKind::DynamicModule, "\"app\"", Some(script_decl));
    let f = table.declare_symbol("f", SymbolKind::Function, Some(dm), SymbolFlags::EXPORTED);
    let x = table.declare_symbol("x", SymbolKind::Variable, Some(dm), SymbolFlags::EXPORTED);
    (table, dm, f, x)
}

#[test]
fn test_commonjs_module() {
    let (table, dm, f, x) = dynamic_module_table();
    let tree = script(
        "app.ts",
        vec![
            external_module(
                "app",
                vec![
                    import_require(ident("fs"), "fs"),
                    function(FunctionDeclaration::new(Some(ident("f")), vec![], Some(block(vec![]))))
                        .with_symbol(f),
                    var_stmt_multi(vec![declarator(ident("x"), Some(num(1.0))).with_symbol(x)]),
                    var_stmt(ident("y"), Some(ident("x").with_symbol(x))),
                    export_assignment(ident("f").with_symbol(f)),
                ],
            )
            .with_declaration(dm),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var fs = require(\"fs\");",
            "function f() {",
            "}",
            "exports.f = f;",
            "exports.x = 1;",
            "var y = exports.x;",
            "module.exports = f;",
        ])
    );
}

#[test]
fn test_commonjs_exported_variable_updates_exports() {
    let (table, dm, _, x) = dynamic_module_table();
    let tree = script(
        "app.ts",
        vec![
            external_module(
                "app",
                vec![
                    var_stmt_multi(vec![declarator(ident("x"), Some(num(1.0))).with_symbol(x)]),
                    expr_stmt(unary(UnaryOperator::PostIncrement, ident("x").with_symbol(x))),
                ],
            )
            .with_declaration(dm),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&["exports.x = 1;", "exports.x++;"])
    );
}

#[test]
fn test_amd_module() {
    let (table, dm, _, _) = dynamic_module_table();
    let tree = script(
        "app.ts",
        vec![
            external_module(
                "app",
                vec![
                    import_require(ident("fs"), "fs"),
                    var_stmt(ident("read"), Some(dot(ident("fs"), "readFileSync"))),
                    export_assignment(ident("read")),
                ],
            )
            .with_declaration(dm),
        ],
    );
    let options = EmitOptions {
        module: ModuleKind::AMD,
        ..EmitOptions::default()
    };

    assert_eq!(
        emit_with(&tree, &table, &options),
        lines(&[
            "define([\"require\", \"exports\", \"fs\"], function (require, exports, fs) {",
            "    var read = fs.readFileSync;",
            "    return read;",
            "});",
        ])
    );
}

#[test]
fn test_module_reference_from_dynamic_module_uses_exports() {
    let mut table = SymbolTable::new();
    let dm = table.declare(DeclKind::DynamicModule, "\"lib\"", None);
    let m = table.declare(DeclKind::Module, "M", Some(dm));
    let m_symbol = table.declare_symbol("M", SymbolKind::Module, Some(dm), SymbolFlags::EXPORTED);
    let v = table.declare_symbol("v", SymbolKind::Variable, Some(m), SymbolFlags::EXPORTED);

    let tree = script(
        "lib.ts",
        vec![
            external_module(
                "lib",
                vec![
                    module(
                        ident("M"),
                        vec![var_stmt_multi(vec![
                            declarator(ident("v"), Some(num(2.0))).with_symbol(v),
                        ])],
                    )
                    .with_symbol(m_symbol)
                    .with_declaration(m),
                ],
            )
            .with_declaration(dm),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var M;",
            "(function (M) {",
            "    M.v = 2;",
            "})(M = exports.M || (exports.M = {}));",
        ])
    );
}

#[test]
fn test_import_alias() {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let n = table.declare(DeclKind::Module, "N", Some(script_decl));
    let alias = table.declare_symbol(
        "Z",
        SymbolKind::Alias,
        Some(n),
        SymbolFlags::EXPORTED | SymbolFlags::INSTANTIATED,
    );
    let type_only = table.declare_symbol("T", SymbolKind::Alias, Some(n), SymbolFlags::empty());

    let tree = script(
        "test.ts",
        vec![
            module(
                ident("N"),
                vec![
                    import_alias(ident("Z"), dot(ident("M"), "X")).with_symbol(alias),
                    import_alias(ident("T"), ident("I")).with_symbol(type_only),
                ],
            )
            .with_declaration(n),
        ],
    );

    assert_eq!(
        emit_with(&tree, &table, &EmitOptions::default()),
        lines(&[
            "var N;",
            "(function (N) {",
            "    var Z = M.X;",
            "    N.Z = Z;",
            "})(N || (N = {}));",
        ])
    );
}

#[test]
fn test_ambient_module_produces_nothing() {
    let mut ambient = module(ident("D"), vec![var_stmt(ident("x"), None)]);
    if let NodeData::ModuleDeclaration(decl) = &mut ambient.data {
        decl.is_ambient = true;
    }
    assert_eq!(emit_statements(vec![ambient]), "");
}
