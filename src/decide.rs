//! The fixed-point worklist decider: does `k` cops suffice on `G`?

use crate::bitset::BitSet;
use crate::dedup_queue::DedupQueue;
use crate::error::AppError;
use crate::graph::Graph;
use crate::tensor::{decode_tuple, tensor_power};

/// Decides whether `c(G) <= k`.
///
/// Builds `H = G^k`, seeds `phi[T] = V(G) \ N_G(tuple(T))` for every H-vertex
/// `T`, and propagates the domination fixed point described in
/// [`crate::decide`]'s module docs until the worklist empties. Returns
/// `true` iff some `phi[T]` ends up empty.
///
/// Total given well-formed input: the lattice of `phi` assignments is finite
/// and every step is non-increasing, so the loop always terminates. The
/// only failure mode is [`AppError::TensorPowerTooLarge`] from building `H`.
pub fn cop_bound_holds(g: &Graph, k: u32) -> Result<bool, AppError> {
    tracing::trace!(n = g.n(), k, "cop_bound_holds: entry");
    let h = tensor_power(g, k)?;
    let n = g.n();
    let capacity = h.n();

    let mut phi: Vec<BitSet> = Vec::with_capacity(capacity);
    let mut tuple = vec![0usize; k as usize];
    for t in 0..capacity {
        decode_tuple(n, k, t, &mut tuple);
        let dominated = g.neighbourhood(&tuple);
        let mut undominated = BitSet::new(n);
        undominated.complement_from(&dominated);
        phi.push(undominated);
    }

    let mut queue = DedupQueue::new(capacity);
    for t in 0..capacity {
        queue.push(t);
    }

    let mut neighbour_cache: Vec<Option<Vec<usize>>> = vec![None; capacity];

    while let Some(t) = queue.pop() {
        let p_indices = phi[t].indices();
        let m = g.neighbourhood(&p_indices);

        if neighbour_cache[t].is_none() {
            neighbour_cache[t] = Some(h.row(t).indices());
        }
        let neighbours = neighbour_cache[t].as_ref().expect("just populated");

        for &t_prime in neighbours {
            if t_prime == t {
                continue;
            }
            if phi[t_prime].intersect_into(&m) {
                queue.push(t_prime);
            }
        }
    }

    let holds = phi.iter().any(|p| !p.any());
    tracing::trace!(n, k, holds, "cop_bound_holds: exit");
    Ok(holds)
}
