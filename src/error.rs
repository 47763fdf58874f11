//! Typed errors for the decode/dispatch/CLI boundary.
//!
//! The core decider itself is total on well-formed input and never returns
//! an error (see [`crate::decide`]). Allocation failure is not modeled as a
//! variant here: in safe Rust the default global allocator aborts the
//! process rather than surfacing a recoverable `Result`, so there is no
//! `AllocationFailure` counterpart to the original design.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed graph6 input: {detail}")]
    MalformedGraph6 { detail: String },

    #[error("could not read path {}: {source}", path.display())]
    UnreadablePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("usage error: {message}")]
    UsageError { message: String },

    #[error("n={n} raised to k={k} does not fit a tensor power graph on this platform")]
    TensorPowerTooLarge { n: usize, k: u32 },

    #[error("graph6 encoding in this crate only supports n <= 62 vertices (n={n})")]
    UnsupportedEncoding { n: usize },
}
