//! Performance benchmarks for atomic decomposition.
//!
//! Run with: `cargo bench --bench decomposition`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | Chain decomposition, 100 axioms | <50ms | Quadratic module extractions |
//! | Export + fingerprint | <5ms | Canonical JSON + SHA-256 |
//! | Closure queries | <1ms | Precomputed/memoized sets |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use atomic_decomposition::{
    Atom, AtomicDecomposition, Axiom, ClassExpression, ModuleType, Ontology,
};

/// Quiet by default; `RUST_LOG=atomic_decomposition=trace` exposes the
/// fixpoint internals when profiling a regression.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "atomic_decomposition=warn".into());
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

/// c0 ⊑ c1 ⊑ … ⊑ cn: worst case for the parent-anchored search, every
/// atom's module strictly contains the next one's.
fn chain_ontology(n: usize) -> Ontology {
    Ontology::from_axioms((0..n).map(|i| {
        Axiom::sub_class_of(
            ClassExpression::class(format!("urn:bench#c{i}")),
            ClassExpression::class(format!("urn:bench#c{}", i + 1)),
        )
    }))
}

/// A forest of independent subsumption pairs: best case, every module is
/// a singleton.
fn forest_ontology(n: usize) -> Ontology {
    Ontology::from_axioms((0..n).map(|i| {
        Axiom::sub_class_of(
            ClassExpression::class(format!("urn:bench#a{i}")),
            ClassExpression::class(format!("urn:bench#b{i}")),
        )
    }))
}

fn bench_decompose(c: &mut Criterion) {
    init_tracing();
    let mut group = c.benchmark_group("decompose");
    for size in [10, 50, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, &n| {
            b.iter(|| {
                AtomicDecomposition::new(black_box(chain_ontology(n)), ModuleType::Bottom)
                    .unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("forest", size), &size, |b, &n| {
            b.iter(|| {
                AtomicDecomposition::new(black_box(forest_ontology(n)), ModuleType::Bottom)
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let ad = AtomicDecomposition::new(chain_ontology(100), ModuleType::Bottom).unwrap();
    c.bench_function("export_fingerprint", |b| {
        b.iter(|| black_box(ad.export()));
    });
}

fn bench_queries(c: &mut Criterion) {
    let ad = AtomicDecomposition::new(chain_ontology(100), ModuleType::Bottom).unwrap();
    let top = ad.top_atoms()[0];
    let bottom = ad.bottom_atoms()[0];

    c.bench_function("dependencies_closure", |b| {
        b.iter(|| black_box(ad.dependencies_closure(black_box(top))));
    });
    c.bench_function("dependents_closure_memoized", |b| {
        b.iter(|| black_box(ad.dependents_closure(black_box(bottom))));
    });
    c.bench_function("principal_ideal", |b| {
        b.iter(|| black_box(ad.principal_ideal(black_box(top))));
    });
    c.bench_function("term_index_lookup", |b| {
        let atom = ad.atoms().next().map(Atom::id).unwrap();
        let entity = ad.atom_signature(atom).iter().next().cloned().unwrap();
        b.iter(|| black_box(ad.atoms_for_term(black_box(&entity))));
    });
}

criterion_group!(benches, bench_decompose, bench_export, bench_queries);
criterion_main!(benches);
