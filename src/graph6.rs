//! graph6 decoding (and, for round-trip tests, encoding).

use crate::bitset::BitSet;
use crate::error::AppError;
use crate::graph::Graph;

/// Optional header that may prefix the very first line of a graph6 stream.
pub const G6_HEADER: &str = ">>graph6<<";

fn malformed(detail: impl Into<String>) -> AppError {
    AppError::MalformedGraph6 {
        detail: detail.into(),
    }
}

/// Subtracts 63 from every byte of `line`, validating that each byte falls
/// in the printable graph6 range `[63, 126]` (6-bit data units `[0, 63]`).
fn data_units(line: &str) -> Result<Vec<i64>, AppError> {
    line.bytes()
        .map(|b| {
            let d = i64::from(b) - 63;
            if !(0..=63).contains(&d) {
                Err(malformed(format!("byte {b} outside the graph6 range")))
            } else {
                Ok(d)
            }
        })
        .collect()
}

/// Reads the vertex count prefix, returning `(n, payload_start)`.
fn read_n(d: &[i64]) -> Result<(usize, usize), AppError> {
    let first = *d.first().ok_or_else(|| malformed("empty input"))?;
    if first <= 62 {
        return Ok((first as usize, 1));
    }

    let second = *d.get(1).ok_or_else(|| malformed("truncated length prefix"))?;
    if second <= 62 {
        let bytes = d.get(1..4).ok_or_else(|| malformed("truncated length prefix"))?;
        let n = (bytes[0] << 12) + (bytes[1] << 6) + bytes[2];
        return Ok((n as usize, 4));
    }

    let bytes = d.get(2..8).ok_or_else(|| malformed("truncated length prefix"))?;
    let n = (bytes[0] << 30) + (bytes[1] << 24) + (bytes[2] << 18) + (bytes[3] << 12) + (bytes[4] << 6) + bytes[5];
    Ok((n as usize, 8))
}

/// Decodes a single graph6-encoded line into a reflexive [`Graph`].
///
/// Strips a leading [`G6_HEADER`] if present (this is also handled by the
/// dispatcher for the first line of a file; decoding it here too keeps the
/// function usable standalone).
pub fn decode(line: &str) -> Result<Graph, AppError> {
    let line = line.strip_prefix(G6_HEADER).unwrap_or(line);
    let line = line.trim_end_matches(['\n', '\r']);
    let d = data_units(line)?;
    let (n, start) = read_n(&d)?;

    let required_bits = n * n.saturating_sub(1) / 2;
    let mut edge_bits = BitSet::new(required_bits);

    let mut cursor = 0usize;
    for &unit in &d[start..] {
        for rank in (0..6).rev() {
            let bit = (unit >> rank) & 1 == 1;
            if cursor < required_bits {
                edge_bits.set(cursor, bit);
            }
            cursor += 1;
        }
    }
    if cursor < required_bits {
        return Err(malformed(format!(
            "payload has {cursor} bits, need at least {required_bits}"
        )));
    }

    let mut g = Graph::new(n, true);
    let mut cursor = 0usize;
    for j in 1..n {
        for i in 0..j {
            if edge_bits.get(cursor) {
                g.edge_set(i, j, true);
            }
            cursor += 1;
        }
    }

    Ok(g)
}

/// Encodes a graph with `n <= 62` vertices into graph6.
///
/// This crate never needs to emit graph6 in its CLI pipeline (graph6
/// emission is out of scope there); this is kept as a small, honest helper
/// used only by this module's own round-trip tests.
pub fn encode(g: &Graph) -> Result<String, AppError> {
    let n = g.n();
    if n > 62 {
        return Err(AppError::UnsupportedEncoding { n });
    }

    let mut out = Vec::with_capacity(1 + n * n.saturating_sub(1) / 12 + 1);
    out.push((n as u8) + 63);

    let mut bits = Vec::new();
    for j in 1..n {
        for i in 0..j {
            bits.push(g.edge_get(i, j));
        }
    }
    for chunk in bits.chunks(6) {
        let mut unit = 0u8;
        for (rank, &bit) in chunk.iter().enumerate() {
            if bit {
                unit |= 1 << (5 - rank);
            }
        }
        out.push(unit + 63);
    }

    Ok(String::from_utf8(out).expect("graph6 bytes are always ASCII"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_two_vertex_single_edge_graph() {
        let g = decode("A_").unwrap();
        assert_eq!(g.n(), 2);
        assert!(g.edge_get(0, 1));
    }

    #[test]
    fn strips_the_file_header_when_present() {
        let a = decode("A_").unwrap();
        let b = decode(">>graph6<<A_").unwrap();
        assert_eq!(a.n(), b.n());
        assert_eq!(a.edge_get(0, 1), b.edge_get(0, 1));
    }

    #[test]
    fn decodes_five_vertex_graph_with_expected_upper_triangle() {
        let g = decode("D?{").unwrap();
        assert_eq!(g.n(), 5);
        // Hand-decoded: payload bytes 0x3f, 0x7b -> units 0, 60, giving
        // upper-triangle bits (0,1)=(0,2)=(1,2)=(0,3)=(1,3)=(2,3)=0 and
        // (0,4)=(1,4)=(2,4)=(3,4)=1: vertex 4 adjacent to every other
        // vertex, and no edges among {0,1,2,3}.
        assert!(g.edge_get(0, 4));
        assert!(g.edge_get(1, 4));
        assert!(g.edge_get(2, 4));
        assert!(g.edge_get(3, 4));
        assert!(!g.edge_get(0, 1));
        assert!(!g.edge_get(0, 2));
        assert!(!g.edge_get(0, 3));
        assert!(!g.edge_get(1, 2));
        assert!(!g.edge_get(1, 3));
        assert!(!g.edge_get(2, 3));
    }

    #[test]
    fn rejects_truncated_payload() {
        // n=4 needs 6 upper-triangle bits (one data unit); an empty payload
        // is not enough.
        let err = decode("D").unwrap_err();
        assert!(matches!(err, AppError::MalformedGraph6 { .. }));
    }

    #[test]
    fn encode_then_decode_round_trips_small_graphs() {
        let mut g = Graph::new(5, true);
        g.edge_set(0, 1, true);
        g.edge_set(1, 2, true);
        g.edge_set(3, 4, true);

        let encoded = encode(&g).unwrap();
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded.n(), g.n());
        for u in 0..g.n() {
            for v in 0..g.n() {
                assert_eq!(decoded.edge_get(u, v), g.edge_get(u, v));
            }
        }
    }

    #[test]
    fn petersen_graph_decodes_with_ten_vertices() {
        let g = decode("IsP@OkWHG").unwrap();
        assert_eq!(g.n(), 10);
    }
}
