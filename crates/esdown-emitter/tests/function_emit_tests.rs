//! Functions, parameters, arrows and expressions.

mod support;

use esdown_ast::factory::*;
use esdown_ast::{
    AccessorKind, BinaryOperator, FunctionDeclaration, FunctionRole, NodeFlags, UnaryOperator,
};
use esdown_binder::{DeclKind, SymbolFlags, SymbolKind, SymbolTable};
use esdown_emitter::EmitOptions;
use support::*;

#[test]
fn test_rest_parameter() {
    let f = function(FunctionDeclaration::new(
        Some(ident("f")),
        vec![param(ident("x")), rest_param(ident("rest"))],
        Some(block(vec![return_stmt(Some(ident("rest")))])),
    ));

    assert_eq!(
        emit_statements(vec![f]),
        lines(&[
            "function f(x) {",
            "    var rest = [];",
            "    for (var _i = 0; _i < (arguments.length - 1); _i++) {",
            "        rest[_i] = arguments[_i + 1];",
            "    }",
            "    return rest;",
            "}",
        ])
    );
}

#[test]
fn test_default_parameter() {
    let f = function(FunctionDeclaration::new(
        Some(ident("f")),
        vec![param(ident("a")), param_with_default(ident("b"), num(2.0))],
        Some(block(vec![return_stmt(Some(binary(
            BinaryOperator::Add,
            ident("a"),
            ident("b"),
        )))])),
    ));

    assert_eq!(
        emit_statements(vec![f]),
        lines(&[
            "function f(a, b) {",
            "    if (typeof b === \"undefined\") { b = 2; }",
            "    return a + b;",
            "}",
        ])
    );
}

#[test]
fn test_arrow_captures_enclosing_this() {
    let mut table = SymbolTable::new();
    let outer = table.declare(DeclKind::Function, "outer", None);
    table.set_captures_this(outer);

    let arrow = function(
        FunctionDeclaration::new(
            None,
            vec![param(ident("y"))],
            Some(binary(BinaryOperator::Add, dot(this_expr(), "x"), ident("y"))),
        )
        .as_arrow(),
    );
    let f = function(FunctionDeclaration::new(
        Some(ident("outer")),
        vec![],
        Some(block(vec![var_stmt(ident("g"), Some(arrow))])),
    ))
    .with_declaration(outer);

    assert_eq!(
        emit_with(&script("test.ts", vec![f]), &table, &EmitOptions::default()),
        lines(&[
            "function outer() {",
            "    var _this = this;",
            "    var g = function (y) {",
            "        return _this.x + y;",
            "    };",
            "}",
        ])
    );
}

#[test]
fn test_arrow_with_block_body_and_nested_function() {
    let inner = function(
        FunctionDeclaration::new(None, vec![], Some(block(vec![return_stmt(Some(this_expr()))])))
            .as_expression(),
    );
    let arrow = function(
        FunctionDeclaration::new(None, vec![], Some(block(vec![
            expr_stmt(call(ident("use"), vec![this_expr()])),
            return_stmt(Some(inner)),
        ])))
        .as_arrow(),
    );

    let output = emit_statements(vec![expr_stmt(call(ident("run"), vec![arrow]))]);

    assert!(output.contains("    use(_this);\n"), "{output}");
    // A regular function inside an arrow has its own receiver.
    assert!(output.contains("        return this;\n"), "{output}");
}

#[test]
fn test_named_function_expression_keeps_its_name() {
    let g = function(
        FunctionDeclaration::new(
            Some(ident("h")),
            vec![param(ident("n"))],
            Some(block(vec![return_stmt(Some(ident("n")))])),
        )
        .as_expression(),
    );

    assert_eq!(
        emit_statements(vec![var_stmt(ident("g"), Some(g))]),
        lines(&["var g = function h(n) {", "    return n;", "};"])
    );
}

#[test]
fn test_exported_function_in_module() {
    let mut table = SymbolTable::new();
    let m = table.declare(DeclKind::Module, "M", None);
    let f = table.declare_symbol("f", SymbolKind::Function, Some(m), SymbolFlags::EXPORTED);

    let tree = script(
        "test.ts",
        vec![
            module(
                ident("M"),
                vec![
                    function(FunctionDeclaration::new(Some(ident("f")), vec![], Some(block(vec![]))))
                        .with_symbol(f),
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
            "    function f() {",
            "    }",
            "    M.f = f;",
            "})(M || (M = {}));",
        ])
    );
}

#[test]
fn test_ambient_function_is_skipped() {
    let declared = function(
        FunctionDeclaration::new(Some(ident("f")), vec![], Some(block(vec![]))).as_ambient(),
    );
    let overload = function(FunctionDeclaration::new(Some(ident("g")), vec![], None));
    assert_eq!(emit_statements(vec![declared, overload]), "");
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn test_object_literal_layouts() {
    let multi = object(vec![
        member(ident("a"), num(1.0)),
        function(
            FunctionDeclaration::new(
                Some(ident("b")),
                vec![],
                Some(block(vec![return_stmt(Some(num(2.0)))])),
            )
            .with_role(FunctionRole::Accessor(AccessorKind::Get)),
        ),
    ]);
    let single = object(vec![member(ident("a"), num(1.0)), member(string("b c"), num(2.0))])
        .with_flags(NodeFlags::SINGLE_LINE);

    let output = emit_statements(vec![
        var_stmt(ident("o"), Some(multi)),
        var_stmt(ident("p"), Some(single)),
        var_stmt(ident("q"), Some(object(vec![]))),
    ]);

    assert_eq!(
        output,
        lines(&[
            "var o = {",
            "    a: 1,",
            "    get b() {",
            "        return 2;",
            "    }",
            "};",
            "var p = { a: 1, \"b c\": 2 };",
            "var q = {};",
        ])
    );
}

#[test]
fn test_operators_and_calls() {
    let output = emit_statements(vec![
        expr_stmt(unary(UnaryOperator::Negate, unary(UnaryOperator::Negate, ident("x")))),
        expr_stmt(unary(UnaryOperator::Plus, unary(UnaryOperator::PreIncrement, ident("x")))),
        expr_stmt(unary(UnaryOperator::TypeOf, ident("x"))),
        expr_stmt(unary(UnaryOperator::PostDecrement, ident("x"))),
        expr_stmt(new_expr(ident("Foo"), vec![num(1.0), string("a")])),
        expr_stmt(new_expr(ident("Bar"), vec![])),
        expr_stmt(conditional(ident("a"), ident("b"), ident("c"))),
        expr_stmt(index(ident("arr"), num(0.0))),
        expr_stmt(paren(binary(BinaryOperator::Comma, ident("a"), ident("b")))),
        expr_stmt(array(vec![num(1.0), omitted(), num(3.0)])),
        expr_stmt(type_assertion(type_ref("T"), ident("v"))),
    ]);

    assert_eq!(
        output,
        lines(&[
            "- -x;",
            "+ ++x;",
            "typeof x;",
            "x--;",
            "new Foo(1, \"a\");",
            "new Bar();",
            "a ? b : c;",
            "arr[0];",
            "(a, b);",
            "[1, , 3];",
            "v;",
        ])
    );
}
