//! Benchmarks for cross-reference queries.
//!
//! Builds a synthetic workspace of many modules referencing one library and measures:
//! - Used-by queries, sequential and parallel
//! - Implemented-by queries over a wide interface hierarchy
//! - Scope resolution alone

extern crate dotscope_xref;

use std::{hint::black_box, sync::Arc};

use criterion::{criterion_group, criterion_main, Criterion};
use dotscope_xref::prelude::*;

const MODULES: usize = 32;
const TYPES_PER_MODULE: usize = 64;

fn identity(name: &str) -> AssemblyIdentity {
    AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0))
}

/// `Lib.dll` declares `IHandler.Handle` and `Service.Call`; every generated module references
/// `Lib`, implements `IHandler` on every type and calls `Service.Call` from every other type.
fn build_workspace() -> Arc<Workspace> {
    let handler = TypeSig::class("Lib", "Lib", "IHandler");
    let call = MemberReference::method(
        TypeSig::class("Lib", "Lib", "Service"),
        "Call",
        MethodSig::instance(TypeSig::Void, vec![TypeSig::I4]),
    );

    let mut builder = WorkspaceBuilder::new().module(
        ModuleBuilder::new("Lib.dll", identity("Lib"))
            .ty(TypeBuilder::interface("Lib", "IHandler")
                .method(MethodBuilder::new("Handle").abstract_method().param(TypeSig::String)))
            .ty(TypeBuilder::class("Lib", "Service")
                .method(MethodBuilder::new("Call").param(TypeSig::I4).ret())),
    );

    for m in 0..MODULES {
        let name = format!("Gen{m}");
        let mut module = ModuleBuilder::new(&format!("{name}.dll"), identity(&name)).reference("Lib");
        for t in 0..TYPES_PER_MODULE {
            let mut run = MethodBuilder::new("Run");
            for _ in 0..8 {
                run = run.instruction(OpCode::Other, Operand::None);
            }
            if t % 2 == 0 {
                run = run.call(OpCode::Callvirt, call.clone());
            }
            module = module.ty(TypeBuilder::class(&name, &format!("Handler{t}"))
                .implements(handler.clone())
                .method(run.ret())
                .method(MethodBuilder::new("Handle").virtual_method().param(TypeSig::String).ret()));
        }
        builder = builder.module(module);
    }

    Arc::new(builder.build().unwrap())
}

fn bench_used_by(c: &mut Criterion) {
    let workspace = build_workspace();
    let target = workspace.find_method("Lib", "Lib.Service", "Call").unwrap();

    for (label, config) in [
        ("used_by_sequential", SearchConfig::sequential()),
        ("used_by_parallel", SearchConfig::default()),
    ] {
        let analyzer = Analyzer::with_config(workspace.clone(), config);
        c.bench_function(label, |b| {
            b.iter(|| {
                let results = analyzer
                    .used_by(black_box(&target), false, &CancellationToken::new())
                    .unwrap();
                black_box(results.count())
            });
        });
    }
}

fn bench_implemented_by(c: &mut Criterion) {
    let workspace = build_workspace();
    let target = workspace.find_method("Lib", "Lib.IHandler", "Handle").unwrap();
    let analyzer = Analyzer::new(workspace);

    c.bench_function("implemented_by", |b| {
        b.iter(|| {
            let results = analyzer
                .implemented_by(black_box(&target), &CancellationToken::new())
                .unwrap();
            black_box(results.count())
        });
    });
}

fn bench_resolve_scope(c: &mut Criterion) {
    let workspace = build_workspace();
    let symbol = Symbol::Method(workspace.find_method("Lib", "Lib.Service", "Call").unwrap());
    let analyzer = Analyzer::new(workspace);

    c.bench_function("resolve_scope", |b| {
        b.iter(|| black_box(analyzer.resolve_scope(black_box(&symbol), false).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_used_by,
    bench_implemented_by,
    bench_resolve_scope
);
criterion_main!(benches);
