use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use smartsched_core::graph::{DagShortestPath, Graph, SccFinder, TopologicalSort};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Random DAG with roughly `4 * n` forward edges.
fn random_dag(n: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new(n);
    for _ in 0..n * 4 {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a != b {
            graph.add_edge(a.min(b), a.max(b), rng.gen_range(1..=10));
        }
    }
    graph
}

/// Random DAG plus back edges, so SCCs of varying size appear.
fn random_cyclic(n: usize, seed: u64) -> Graph {
    let mut graph = random_dag(n, seed);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5CC);
    for _ in 0..n / 10 {
        let a = rng.gen_range(1..n);
        let b = rng.gen_range(0..a);
        graph.add_edge(a, b, 1);
    }
    graph
}

fn bench_scc(c: &mut Criterion) {
    let mut group = c.benchmark_group("scc");
    for n in SIZES {
        let graph = random_cyclic(n, 0xC0FFEE + n as u64);
        group.throughput(Throughput::Elements(graph.edge_count() as u64));
        group.bench_with_input(BenchmarkId::new("find_sccs", n), &graph, |b, g| {
            b.iter(|| black_box(SccFinder::new(g).find_sccs()));
        });
        group.bench_with_input(BenchmarkId::new("condense", n), &graph, |b, g| {
            let mut finder = SccFinder::new(g);
            let scc = finder.find_sccs();
            b.iter(|| black_box(finder.build_condensation_graph(&scc.components)));
        });
    }
    group.finish();
}

fn bench_topo(c: &mut Criterion) {
    let mut group = c.benchmark_group("topo");
    for n in SIZES {
        let graph = random_dag(n, 0xD1A6 + n as u64);
        group.throughput(Throughput::Elements(graph.edge_count() as u64));
        group.bench_with_input(BenchmarkId::new("kahn", n), &graph, |b, g| {
            b.iter(|| black_box(TopologicalSort::new(g).sort()));
        });
    }
    group.finish();
}

fn bench_critical_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("critical_path");
    group.sample_size(20);
    // The all-sources scan is quadratic; keep it off the largest size.
    for n in [100, 1_000] {
        let graph = random_dag(n, 0xBEEF + n as u64);
        group.bench_with_input(BenchmarkId::new("all_sources", n), &graph, |b, g| {
            b.iter(|| black_box(DagShortestPath::new(g).find_critical_path()));
        });
    }
    for n in SIZES {
        let graph = random_dag(n, 0xBEEF + n as u64);
        group.bench_with_input(BenchmarkId::new("single_pass", n), &graph, |b, g| {
            b.iter(|| black_box(DagShortestPath::new(g).find_critical_path_linear()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scc, bench_topo, bench_critical_path);
criterion_main!(benches);
