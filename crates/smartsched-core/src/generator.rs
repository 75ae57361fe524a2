//! Deterministic sample datasets.
//!
//! Nine graphs in three size classes plus the `tasks` example, mixing pure
//! DAGs with cyclic inputs. Random edges come from a single [`StdRng`]
//! seeded with [`SEED`], consumed in the order the datasets are listed, so
//! the same build always writes the same files.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::dataset::{DatasetError, GraphData};

pub const SEED: u64 = 42;

/// Every sample dataset as `(file stem, data)`, in generation order.
#[must_use]
pub fn all_datasets() -> Vec<(&'static str, GraphData)> {
    let mut rng = StdRng::seed_from_u64(SEED);
    vec![
        ("small_1", small_chain()),
        ("small_2", small_single_cycle()),
        ("small_3", small_two_cycles()),
        ("medium_1", medium_chain_with_cycle()),
        ("medium_2", medium_cycle_clusters()),
        ("medium_3", medium_modular_dag()),
        ("large_1", large_random(&mut rng)),
        ("large_2", large_dense_dag(&mut rng)),
        ("large_3", large_chain_with_back_edges(&mut rng)),
        ("tasks", tasks()),
    ]
}

/// Write every dataset to `dir/<stem>.json`, creating `dir` if needed.
///
/// Returns the stems written, in order.
///
/// # Errors
///
/// [`DatasetError::Write`] if the directory or a file cannot be written.
pub fn write_all(dir: &Path) -> Result<Vec<&'static str>, DatasetError> {
    fs::create_dir_all(dir).map_err(|source| DatasetError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for (name, data) in all_datasets() {
        data.save(&dir.join(format!("{name}.json")))?;
        info!(dataset = name, n = data.n, edges = data.edges.len(), "generated");
        written.push(name);
    }
    Ok(written)
}

fn from_triples(n: usize, source: usize, edges: &[(usize, usize, i64)]) -> GraphData {
    let mut data = GraphData::new(n, Some(source));
    for &(u, v, w) in edges {
        data.add_edge(u, v, w);
    }
    data
}

// ---------------------------------------------------------------------------
// Small (6 vertices)
// ---------------------------------------------------------------------------

fn small_chain() -> GraphData {
    from_triples(6, 0, &[(0, 1, 3), (1, 2, 2), (2, 3, 4), (3, 4, 1), (4, 5, 5)])
}

fn small_single_cycle() -> GraphData {
    from_triples(
        6,
        0,
        &[(0, 1, 2), (1, 2, 3), (2, 0, 1), (2, 3, 4), (3, 4, 2), (4, 5, 3)],
    )
}

fn small_two_cycles() -> GraphData {
    from_triples(
        6,
        0,
        &[
            (0, 1, 2),
            (1, 0, 3),
            (2, 3, 1),
            (3, 4, 2),
            (4, 2, 4),
            (0, 2, 3),
            (1, 5, 2),
        ],
    )
}

// ---------------------------------------------------------------------------
// Medium (12-15 vertices)
// ---------------------------------------------------------------------------

fn medium_chain_with_cycle() -> GraphData {
    let mut data = GraphData::new(15, Some(0));
    for i in 0..14 {
        #[allow(clippy::cast_possible_wrap)]
        data.add_edge(i, i + 1, (i % 3) as i64 + 1);
    }
    data.add_edge(2, 5, 3);
    data.add_edge(7, 3, 2);
    data.add_edge(10, 8, 4);
    data.add_edge(8, 10, 2);
    data
}

fn medium_cycle_clusters() -> GraphData {
    from_triples(
        15,
        0,
        &[
            (0, 1, 2),
            (1, 2, 3),
            (2, 0, 1),
            (2, 3, 2),
            (3, 4, 3),
            (4, 2, 1),
            (5, 6, 2),
            (6, 7, 3),
            (7, 5, 1),
            (10, 11, 2),
            (11, 12, 3),
            (12, 13, 1),
            (13, 14, 2),
            (4, 5, 2),
            (7, 10, 3),
        ],
    )
}

fn medium_modular_dag() -> GraphData {
    let mut data = GraphData::new(12, Some(0));
    for i in 0..12 {
        for j in (i + 1)..12 {
            if (i + j) % 3 == 0 {
                #[allow(clippy::cast_possible_wrap)]
                data.add_edge(i, j, ((i + j) % 5) as i64 + 1);
            }
        }
    }
    data
}

// ---------------------------------------------------------------------------
// Large (25-35 vertices, seeded)
// ---------------------------------------------------------------------------

fn large_random(rng: &mut StdRng) -> GraphData {
    let n = 30;
    let mut data = GraphData::new(n, Some(0));
    for _ in 0..60 {
        let from = rng.gen_range(0..n);
        let to = rng.gen_range(0..n);
        if from != to {
            data.add_edge(from, to, rng.gen_range(1..=10));
        }
    }
    data
}

fn large_dense_dag(rng: &mut StdRng) -> GraphData {
    let n = 25;
    let mut data = GraphData::new(n, Some(0));
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(0.3) {
                data.add_edge(i, j, rng.gen_range(1..=5));
            }
        }
    }
    data
}

fn large_chain_with_back_edges(rng: &mut StdRng) -> GraphData {
    let n = 35;
    let mut data = GraphData::new(n, Some(0));
    for i in 0..n - 1 {
        data.add_edge(i, i + 1, rng.gen_range(1..=3));
    }
    for _ in 0..15 {
        let from = rng.gen_range(0..n - 1);
        let to = rng.gen_range(from + 1..n);
        data.add_edge(from, to, rng.gen_range(1..=4));
    }
    data.add_edge(5, 2, 2);
    data.add_edge(15, 12, 3);
    data.add_edge(25, 22, 1);
    data
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

fn tasks() -> GraphData {
    from_triples(
        8,
        4,
        &[
            (0, 1, 3),
            (1, 2, 2),
            (2, 3, 4),
            (3, 1, 1),
            (4, 5, 2),
            (5, 6, 5),
            (6, 7, 1),
        ],
    )
}
