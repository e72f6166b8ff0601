//! Qualification of identifier references against their declaring container.

mod support;

use esdown_ast::factory::*;
use esdown_ast::{DeclId, FunctionDeclaration, FunctionRole, Node, SymbolId};
use esdown_binder::{DeclKind, SymbolFlags, SymbolKind, SymbolTable};
use esdown_emitter::EmitOptions;
use support::*;

/// `module M { export var X = 1; }` declared twice, plus a sibling `N`.
/// `X` is never reassigned, so it keeps a local binding inside `M`.
struct Fixture {
    table: SymbolTable,
    first_m: DeclId,
    second_m: DeclId,
    n: DeclId,
    x: SymbolId,
}

fn fixture() -> Fixture {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let first_m = table.declare(DeclKind::Module, "M", Some(script_decl));
    let second_m = table.declare(DeclKind::Module, "M", Some(script_decl));
    let n = table.declare(DeclKind::Module, "N", Some(script_decl));
    let x = table.declare_symbol(
        "X",
        SymbolKind::Variable,
        Some(first_m),
        SymbolFlags::EXPORTED | SymbolFlags::READ_ONLY,
    );
    Fixture {
        table,
        first_m,
        second_m,
        n,
        x,
    }
}

fn module_with(name: &str, decl: DeclId, members: Vec<Node>) -> Node {
    module(ident(name), members).with_declaration(decl)
}

fn emit_tree(table: &SymbolTable, statements: Vec<Node>) -> String {
    emit_with(&script("test.ts", statements), table, &EmitOptions::default())
}

#[test]
fn test_reference_inside_declaring_module_is_bare() {
    let f = fixture();
    let output = emit_tree(
        &f.table,
        vec![module_with(
            "M",
            f.first_m,
            vec![
                var_stmt_multi(vec![declarator(ident("X"), Some(num(1.0))).with_symbol(f.x)]),
                var_stmt(ident("y"), Some(ident("X").with_symbol(f.x))),
            ],
        )],
    );

    assert!(output.contains("    var y = X;\n"), "{output}");
}

#[test]
fn test_reference_from_reopened_module_is_qualified() {
    let f = fixture();
    let output = emit_tree(
        &f.table,
        vec![
            module_with(
                "M",
                f.first_m,
                vec![var_stmt_multi(vec![
                    declarator(ident("X"), Some(num(1.0))).with_symbol(f.x),
                ])],
            ),
            module_with(
                "M",
                f.second_m,
                vec![var_stmt(ident("z"), Some(ident("X").with_symbol(f.x)))],
            ),
            module_with(
                "N",
                f.n,
                vec![var_stmt(ident("w"), Some(ident("X").with_symbol(f.x)))],
            ),
        ],
    );

    assert_eq!(
        output,
        lines(&[
            "var M;",
            "(function (M) {",
            "    var X = M.X = 1;",
            "})(M || (M = {}));",
            "var M;",
            "(function (M) {",
            "    var z = M.X;",
            "})(M || (M = {}));",
            "var N;",
            "(function (N) {",
            "    var w = M.X;",
            "})(N || (N = {}));",
        ])
    );
}

#[test]
fn test_alias_symbol_takes_precedence() {
    let mut f = fixture();
    let alias = f.table.declare_symbol("X", SymbolKind::Alias, None, SymbolFlags::empty());
    let output = emit_tree(
        &f.table,
        vec![module_with(
            "N",
            f.n,
            vec![var_stmt(
                ident("v"),
                Some(ident("X").with_symbol(f.x).with_alias_symbol(alias)),
            )],
        )],
    );

    assert!(output.contains("    var v = X;\n"), "{output}");
}

#[test]
fn test_unresolved_reference_is_bare() {
    let f = fixture();
    let output = emit_tree(
        &f.table,
        vec![module_with("N", f.n, vec![var_stmt(ident("v"), Some(ident("X")))])],
    );
    assert!(output.contains("    var v = X;\n"));
}

#[test]
fn test_nested_module_path_starts_below_shared_prefix() {
    let mut table = SymbolTable::new();
    let a = table.declare(DeclKind::Module, "A", None);
    let b = table.declare(DeclKind::Module, "B", Some(a));
    let c = table.declare(DeclKind::Module, "C", Some(a));
    let z = table.declare(DeclKind::Module, "Z", None);
    let b_symbol = table.declare_symbol("B", SymbolKind::Module, Some(a), SymbolFlags::EXPORTED);
    let v = table.declare_symbol("v", SymbolKind::Variable, Some(b), SymbolFlags::EXPORTED);

    let reference = || ident("v").with_symbol(v);
    let inner_b = module(
        ident("B"),
        vec![var_stmt_multi(vec![declarator(ident("v"), Some(num(1.0))).with_symbol(v)])],
    )
    .with_symbol(b_symbol)
    .with_declaration(b);
    let inner_c = module(ident("C"), vec![var_stmt(ident("fromC"), Some(reference()))])
        .with_declaration(c);
    let output = emit_tree(
        &table,
        vec![
            module(ident("A"), vec![inner_b, inner_c]).with_declaration(a),
            module(ident("Z"), vec![var_stmt(ident("fromZ"), Some(reference()))])
                .with_declaration(z),
        ],
    );

    assert!(output.contains("        var fromC = B.v;\n"), "{output}");
    assert!(output.contains("    var fromZ = A.B.v;\n"), "{output}");
}

#[test]
fn test_initialized_module_matches_one_level_up() {
    let mut table = SymbolTable::new();
    let script_decl = table.declare(DeclKind::Script, "", None);
    let a = table.declare(DeclKind::Module, "A", Some(script_decl));
    let b = table.declare(DeclKind::Module, "B", Some(a));
    let z = table.declare(DeclKind::Module, "Z", Some(script_decl));
    let b_symbol = table.declare_symbol(
        "B",
        SymbolKind::Module,
        Some(a),
        SymbolFlags::EXPORTED | SymbolFlags::INITIALIZED_MODULE,
    );

    let reference = || ident("B").with_symbol(b_symbol);
    let inner = module(ident("B"), vec![var_stmt(ident("me"), Some(reference()))])
        .with_symbol(b_symbol)
        .with_declaration(b);
    let output = emit_tree(
        &table,
        vec![
            module(ident("A"), vec![inner]).with_declaration(a),
            module(ident("Z"), vec![var_stmt(ident("other"), Some(reference()))])
                .with_declaration(z),
        ],
    );

    assert!(output.contains("        var me = B;\n"), "{output}");
    assert!(output.contains("    var other = A.B;\n"), "{output}");
}

#[test]
fn test_static_member_of_class_in_module() {
    let mut table = SymbolTable::new();
    let m = table.declare(DeclKind::Module, "M", None);
    let class_decl = table.declare(DeclKind::Class, "C", Some(m));
    let n = table.declare(DeclKind::Module, "N", None);
    let class_symbol =
        table.declare_symbol("C", SymbolKind::Class, Some(m), SymbolFlags::EXPORTED);
    let s = table.declare_symbol("s", SymbolKind::Property, Some(class_decl), SymbolFlags::STATIC);

    let method = function(
        FunctionDeclaration::new(
            Some(ident("get")),
            vec![],
            Some(block(vec![return_stmt(Some(ident("s").with_symbol(s)))])),
        )
        .with_role(FunctionRole::Method),
    );
    let class_node = class(ident("C"), None, None, vec![
        property(ident("s"), Some(num(1.0)), true),
        method,
    ])
    .with_symbol(class_symbol)
    .with_declaration(class_decl);

    let output = emit_tree(
        &table,
        vec![
            module(ident("M"), vec![class_node]).with_declaration(m),
            module(ident("N"), vec![var_stmt(ident("t"), Some(ident("s").with_symbol(s)))])
                .with_declaration(n),
        ],
    );

    assert!(output.contains("            return C.s;\n"), "{output}");
    assert!(output.contains("    var t = M.C.s;\n"), "{output}");
}

#[test]
fn test_instance_property_reference_uses_receiver() {
    let mut table = SymbolTable::new();
    let class_decl = table.declare(DeclKind::Class, "C", None);
    let p = table.declare_symbol("p", SymbolKind::Property, Some(class_decl), SymbolFlags::empty());

    let arrow = function(
        FunctionDeclaration::new(None, vec![], Some(ident("p").with_symbol(p))).as_arrow(),
    );
    let method = function(
        FunctionDeclaration::new(
            Some(ident("m")),
            vec![],
            Some(block(vec![
                expr_stmt(ident("p").with_symbol(p)),
                return_stmt(Some(arrow)),
            ])),
        )
        .with_role(FunctionRole::Method),
    );
    let output = emit_tree(
        &table,
        vec![class(ident("C"), None, None, vec![method]).with_declaration(class_decl)],
    );

    assert!(output.contains("        this.p;\n"), "{output}");
    assert!(output.contains("            return _this.p;\n"), "{output}");
}

#[test]
fn test_dynamic_module_property_uses_exports() {
    let mut table = SymbolTable::new();
    let dm = table.declare(DeclKind::DynamicModule, "\"m\"", None);
    let p = table.declare_symbol("p", SymbolKind::Property, Some(dm), SymbolFlags::empty());

    let output = emit_tree(
        &table,
        vec![
            external_module("m", vec![var_stmt(ident("q"), Some(ident("p").with_symbol(p)))])
                .with_declaration(dm),
        ],
    );

    assert_eq!(output, "var q = exports.p;\n");
}
