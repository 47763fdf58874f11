//! Tensor (categorical) power of a graph: `G^k`.

use crate::error::AppError;
use crate::graph::Graph;

/// Decodes the big-endian base-`n` tuple of width `k` for the integer `r`,
/// writing into `out` (`out.len() == k`).
///
/// `r = sum(out[j] * n^(k - 1 - j))`.
pub fn decode_tuple(n: usize, k: u32, mut r: usize, out: &mut [usize]) {
    debug_assert_eq!(out.len(), k as usize);
    for j in 0..k {
        let remaining = k - j - 1;
        let divisor = n.pow(remaining);
        out[j as usize] = r / divisor;
        r %= divisor;
    }
}

/// Encodes a big-endian base-`n` tuple back into its integer representation.
/// Inverse of [`decode_tuple`].
pub fn encode_tuple(n: usize, tuple: &[usize]) -> usize {
    tuple.iter().fold(0usize, |acc, &a| acc * n + a)
}

/// Builds `H = G^k`: vertices are `k`-tuples of `G`-vertices (encoded as
/// integers in `[0, n^k)`), and `H` is reflexive with an edge between
/// distinct tuples `a, b` iff every component pair `(a_j, b_j)` is adjacent
/// in `G`.
///
/// Errors with [`AppError::TensorPowerTooLarge`] if `n^k` would not fit in a
/// `usize` on this platform; callers are expected to bound `k` well below
/// that in practice (storage already grows as `n^(2k)` bits).
pub fn tensor_power(g: &Graph, k: u32) -> Result<Graph, AppError> {
    let n = g.n();
    let capacity = n
        .checked_pow(k)
        .ok_or(AppError::TensorPowerTooLarge { n, k })?;

    let mut h = Graph::new(capacity, true);
    let mut a = vec![0usize; k as usize];
    let mut b = vec![0usize; k as usize];

    for i in 0..capacity {
        decode_tuple(n, k, i, &mut a);
        for j in (i + 1)..capacity {
            decode_tuple(n, k, j, &mut b);
            let adjacent = a.iter().zip(b.iter()).all(|(&ac, &bc)| g.edge_get(ac, bc));
            if adjacent {
                h.edge_set(i, j, true);
            }
        }
    }

    Ok(h)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rstest_reuse::{apply, template};

    use super::*;

    #[test]
    fn tuple_round_trips_through_encode_decode() {
        let n = 4;
        let k = 3;
        for r in 0..n * n * n {
            let mut tuple = vec![0usize; k];
            decode_tuple(n, k as u32, r, &mut tuple);
            assert_eq!(encode_tuple(n, &tuple), r);
        }
    }

    #[test]
    fn tensor_power_of_k1_is_the_graph_itself() {
        let mut g = Graph::new(3, true);
        g.edge_set(0, 1, true);
        let h = tensor_power(&g, 1).unwrap();
        assert_eq!(h.n(), 3);
        for u in 0..3 {
            for v in 0..3 {
                assert_eq!(g.edge_get(u, v), h.edge_get(u, v));
            }
        }
    }

    #[test]
    fn tensor_power_edge_matches_categorical_product_definition() {
        // Path 0-1-2.
        let mut g = Graph::new(3, true);
        g.edge_set(0, 1, true);
        g.edge_set(1, 2, true);
        let k = 2;
        let h = tensor_power(&g, k).unwrap();
        assert_eq!(h.n(), 9);

        let n = g.n();
        for i in 0..h.n() {
            for j in 0..h.n() {
                let mut a = vec![0usize; k as usize];
                let mut b = vec![0usize; k as usize];
                decode_tuple(n, k, i, &mut a);
                decode_tuple(n, k, j, &mut b);
                let expected = i == j
                    || a.iter().zip(b.iter()).all(|(&ac, &bc)| g.edge_get(ac, bc));
                assert_eq!(h.edge_get(i, j), expected, "i={i} j={j}");
            }
        }
    }

    fn rand_graph(n: usize, p: f64) -> Graph {
        use rand::prelude::*;
        assert!((0.0..=1.0).contains(&p));
        let mut rng = thread_rng();
        let mut g = Graph::new(n, true);
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.gen::<f64>() < p {
                    g.edge_set(u, v, true);
                }
            }
        }
        g
    }

    #[template]
    #[rstest]
    fn template_tensor_sizes(#[values(2, 3, 4)] n: usize, #[values(1, 2, 3)] k: u32) {}

    #[apply(template_tensor_sizes)]
    fn tensor_power_edges_match_categorical_definition_on_random_graphs(n: usize, k: u32) {
        let g = rand_graph(n, 0.5);
        let h = tensor_power(&g, k).unwrap();
        assert_eq!(h.n(), n.pow(k));

        let mut a = vec![0usize; k as usize];
        let mut b = vec![0usize; k as usize];
        for i in 0..h.n() {
            for j in 0..h.n() {
                decode_tuple(n, k, i, &mut a);
                decode_tuple(n, k, j, &mut b);
                let expected =
                    i == j || a.iter().zip(b.iter()).all(|(&ac, &bc)| g.edge_get(ac, bc));
                assert_eq!(h.edge_get(i, j), expected, "n={n} k={k} i={i} j={j}");
            }
        }
    }

    #[test]
    fn tensor_power_overflow_is_reported_as_an_error() {
        // n^k overflows usize for any reasonable platform word size; exercised
        // directly against the checked_pow path, without allocating a graph
        // of that many vertices.
        let n = 1 << 40;
        let k = 40;
        let result = n.checked_pow(k).ok_or(AppError::TensorPowerTooLarge { n, k });
        assert!(result.is_err());
    }
}
