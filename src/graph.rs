//! Undirected graphs stored as one row-[`BitSet`] per vertex.

use crate::bitset::BitSet;

/// An undirected graph on `n` vertices, represented as `n` adjacency rows.
///
/// Invariant: `row[u].get(v) == row[v].get(u)` for every `u, v`. When built
/// reflexive, `row[u].get(u)` holds for every `u` and edge mutation never
/// clears the diagonal.
#[derive(Debug, Clone)]
pub struct Graph {
    rows: Vec<BitSet>,
    reflexive: bool,
}

impl Graph {
    /// Allocates a graph on `n` vertices with no edges (besides the diagonal
    /// when `reflexive`).
    pub fn new(n: usize, reflexive: bool) -> Self {
        let mut rows = vec![BitSet::new(n); n];
        if reflexive {
            for (u, row) in rows.iter_mut().enumerate() {
                row.set(u, true);
            }
        }
        Self { rows, reflexive }
    }

    pub fn n(&self) -> usize {
        self.rows.len()
    }

    pub fn is_reflexive(&self) -> bool {
        self.reflexive
    }

    /// Reads `row[u][v]`.
    ///
    /// Panics on out-of-range vertex ids (a usage bug, not a recoverable error).
    pub fn edge_get(&self, u: usize, v: usize) -> bool {
        self.rows[u].get(v)
    }

    /// Atomically sets `row[u][v]` and `row[v][u]` to `val`, returning the
    /// prior value of `row[u][v]`.
    ///
    /// Panics on out-of-range vertex ids, or if `u == v` and `val` would
    /// clear the diagonal of a reflexive graph.
    pub fn edge_set(&mut self, u: usize, v: usize, val: bool) -> bool {
        debug_assert!(
            !(self.reflexive && u == v && !val),
            "cannot clear the diagonal of a reflexive graph"
        );
        let previous = self.rows[u].set(v, val);
        self.rows[v].set(u, val);
        previous
    }

    /// The row bitset for `u`, read-only.
    pub fn row(&self, u: usize) -> &BitSet {
        &self.rows[u]
    }

    /// The closed neighbourhood of a set of vertices: `union of row[v] for v in vertices`.
    pub fn neighbourhood(&self, vertices: &[usize]) -> BitSet {
        let mut acc = BitSet::new(self.n());
        for &v in vertices {
            acc.union_into(&self.rows[v]);
        }
        acc
    }
}
