//! Cop number search: the smallest `k` for which `k` cops win.

use crate::decide::cop_bound_holds;
use crate::error::AppError;
use crate::graph::Graph;

/// Searches `k = 1, 2, ..., k_max` for the smallest `k` with `c(G) <= k`.
///
/// Returns `k_max + 1` ("over-bound") when no such `k` is found, logging the
/// fact at debug level rather than treating it as an error: the search is
/// total within the bound the caller chose.
pub fn cop_number(g: &Graph, k_max: u32) -> Result<u32, AppError> {
    for k in 1..=k_max {
        if cop_bound_holds(g, k)? {
            return Ok(k);
        }
    }
    tracing::debug!(k_max, n = g.n(), "cop number exceeds k_max, reporting over-bound");
    Ok(k_max + 1)
}
