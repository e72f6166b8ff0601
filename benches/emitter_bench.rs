//! Emitter Benchmark
//!
//! Measures emitter throughput (bytes of output per second) on synthetic trees.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use esdown_ast::factory::*;
use esdown_ast::{BinaryOperator, FunctionDeclaration, FunctionRole, Node};
use esdown_binder::SymbolTable;
use esdown_emitter::{EmitOptions, emit_to_string};

// =============================================================================
// Tree Generation
// =============================================================================

/// Hands out increasing spans so every node gets a source map record.
struct Spans(u32);

impl Spans {
    fn next(&mut self, len: u32) -> (u32, u32) {
        let start = self.0;
        self.0 += len + 1;
        (start, start + len)
    }
}

fn function_with_body(spans: &mut Spans, name: &str, statements: usize) -> Node {
    let mut body = Vec::with_capacity(statements + 1);
    for s in 0..statements {
        let (start, end) = spans.next(16);
        body.push(
            var_stmt(
                ident(&format!("v{s}")),
                Some(binary(BinaryOperator::Add, ident("x"), num(s as f64))),
            )
            .with_span(start, end),
        );
    }
    let (start, end) = spans.next(14);
    body.push(
        return_stmt(Some(binary(BinaryOperator::Add, ident("x"), ident("y")))).with_span(start, end),
    );
    let (start, end) = spans.next(40);
    function(FunctionDeclaration::new(
        Some(ident(name)),
        vec![param(ident("x")), param(ident("y"))],
        Some(block(body)),
    ))
    .with_span(start, end)
}

fn class_with_methods(spans: &mut Spans, name: &str, methods: usize) -> Node {
    let members = (0..methods)
        .map(|m| {
            let (start, end) = spans.next(30);
            function(
                FunctionDeclaration::new(
                    Some(ident(&format!("m{m}"))),
                    vec![param(ident("a"))],
                    Some(block(vec![return_stmt(Some(binary(
                        BinaryOperator::Add,
                        dot(this_expr(), "value"),
                        ident("a"),
                    )))])),
                )
                .with_role(FunctionRole::Method),
            )
            .with_span(start, end)
        })
        .collect();
    let (start, end) = spans.next(60);
    class(
        ident(name),
        None,
        Some(function(
            FunctionDeclaration::new(
                None,
                vec![property_param(ident("value"))],
                Some(block(vec![])),
            )
            .with_role(FunctionRole::Constructor),
        )),
        members,
    )
    .with_span(start, end)
}

/// A script of `modules` namespaces, each holding `functions` functions and one class.
fn generate_script(modules: usize, functions: usize, statements_per_fn: usize) -> Node {
    let mut spans = Spans(0);
    let mut statements = Vec::with_capacity(modules * 2);
    for m in 0..modules {
        let mut members: Vec<Node> = (0..functions)
            .map(|f| function_with_body(&mut spans, &format!("fn{f}"), statements_per_fn))
            .collect();
        members.push(class_with_methods(&mut spans, &format!("C{m}"), functions));
        let (start, end) = spans.next(80);
        statements.push(module(ident(&format!("M{m}")), members).with_span(start, end));

        let (start, end) = spans.next(20);
        statements.push(
            var_stmt(
                ident(&format!("r{m}")),
                Some(call(ident("print"), vec![num(m as f64)])),
            )
            .with_span(start, end),
        );
    }
    script("bench.ts", statements)
}

// =============================================================================
// Emitter Benchmarks
// =============================================================================

/// Benchmark: Emit throughput for various tree sizes
fn bench_emit_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_throughput");
    let facts = SymbolTable::new();
    let options = EmitOptions::default();

    for (modules, functions, statements) in [(5, 5, 5), (10, 10, 5), (20, 10, 10), (50, 5, 5)] {
        let root = generate_script(modules, functions, statements);
        let Ok(sample) = emit_to_string(&root, &facts, &options, false) else {
            continue;
        };
        let label = format!("{modules}mod_{functions}fn_{statements}stmt");

        group.throughput(Throughput::Bytes(sample.text.len() as u64));
        group.bench_with_input(BenchmarkId::new("emit", &label), &root, |b, root| {
            b.iter(|| black_box(emit_to_string(root, &facts, &options, false)))
        });
    }

    group.finish();
}

/// Benchmark: Source map generation overhead
fn bench_emit_with_sourcemap(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_sourcemap");
    let facts = SymbolTable::new();
    let options = EmitOptions::default();
    let root = generate_script(20, 10, 10);

    group.bench_function("without_sourcemap", |b| {
        b.iter(|| black_box(emit_to_string(&root, &facts, &options, false)))
    });

    group.bench_function("with_sourcemap", |b| {
        b.iter(|| black_box(emit_to_string(&root, &facts, &options, true)))
    });

    group.finish();
}

criterion_group!(benches, bench_emit_throughput, bench_emit_with_sourcemap);

criterion_main!(benches);
