use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use densegraph::algo::{
    bounded_bfs, build_view, multiply_vector_transform, MultiplySide, PropagationConfig,
    StandardTransform,
};
use densegraph::{Graph, GraphKind, NodeId};

/// Ring with a chord every tenth node
fn build_graph(kind: GraphKind, size: usize) -> Graph {
    let mut graph = Graph::new(kind);
    for i in 0..size {
        graph.add_node(&format!("n{}", i));
    }
    for i in 0..size {
        graph.add_edge(NodeId(i), NodeId((i + 1) % size), 1.0);
        if i % 10 == 0 {
            graph.add_edge(NodeId(i), NodeId((i * 7 + 3) % size), 2.0);
        }
    }
    graph
}

/// Benchmark node and edge insertion throughput
fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| build_graph(GraphKind::UndirectedWeighted, size));
        });
    }
    group.finish();
}

/// Benchmark swap-and-truncate node removal
fn bench_remove_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_node");

    for size in [1000, 10_000].iter() {
        let graph = build_graph(GraphKind::DirectedWeighted, *size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter_batched(
                || graph.clone(),
                |mut g| {
                    // Always from the front so every call relocates a node
                    for _ in 0..100 {
                        g.remove_node(NodeId(0));
                    }
                    g
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Benchmark one propagation step, sequential against rayon
fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");
    let size = 50_000;
    let graph = build_graph(GraphKind::DirectedWeighted, size);
    let invec = vec![1.0; size];

    for (name, config) in [
        ("sequential", PropagationConfig::sequential()),
        ("parallel", PropagationConfig::default()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let out = multiply_vector_transform(
                    &graph,
                    &StandardTransform::RowStochastic,
                    MultiplySide::Left,
                    &invec,
                    &config,
                );
                criterion::black_box(out)
            });
        });
    }

    let csr = build_view(&graph);
    group.bench_function("csr_parallel", |b| {
        b.iter(|| {
            let out = multiply_vector_transform(
                &csr,
                &StandardTransform::RowStochastic,
                MultiplySide::Left,
                &invec,
                &PropagationConfig::default(),
            );
            criterion::black_box(out)
        });
    });
    group.finish();
}

/// Benchmark hop-bounded traversal latency
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let graph = build_graph(GraphKind::DirectedUnweighted, 10_000);

    for hops in [1, 3, 6].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(hops), hops, |b, &hops| {
            b.iter(|| criterion::black_box(bounded_bfs(&graph, 0, hops).len()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_remove_node,
    bench_propagation,
    bench_traversal
);
criterion_main!(benches);
