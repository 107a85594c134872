use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hublift_core::LiftingConfig;
use hublift_graph::{random_graph, Lifting, NodeCentralityLifting};

fn lift_bench(c: &mut Criterion) {
    let input = random_graph(1_000, 3_000, 123);
    let lifting = NodeCentralityLifting::new(LiftingConfig {
        do_weight_hyperedge_influence: true,
        ..LiftingConfig::default()
    })
    .unwrap();
    c.bench_function("lift_1k", |b| {
        b.iter(|| {
            let lifted = lifting.lift(&input).unwrap();
            black_box(lifted);
        });
    });
}

criterion_group!(benches, lift_bench);
criterion_main!(benches);
