//! Crate-wide error type.
//!
//! Mirrors the distinction the design draws between *soft* failures (an
//! input-size limit tripped, the upstream reader hit an I/O error) and
//! *fatal* invariant violations (two occurrences of the same k-mer hash
//! disagreeing on their s-mer code). Soft failures are returned as
//! [`SyncmerError`]; fatal invariant violations still panic, matching the
//! reference implementation's `exit(EXIT_FAILURE)` for a condition that can
//! only arise from a programming error, not from untrusted input.

/// Shorthand `Result` alias for this crate's fallible operations.
pub type Result<T, E = SyncmerError> = std::result::Result<T, E>;

/// Errors surfaced by the public entry points of this crate.
#[derive(thiserror::Error, Debug)]
pub enum SyncmerError {
    /// `k`/`w` parameters violate `1 <= k < 32` or `w > k`.
    #[error("invalid syncmer parameters: k={k}, w={w}")]
    InvalidParams { k: usize, w: usize },

    /// A read or the total read count exceeded a fixed capacity limit.
    #[error("limit exceeded: {what} ({got} > {limit})")]
    LimitExceeded {
        what: &'static str,
        got: u64,
        limit: u64,
    },

    /// The upstream reader failed.
    #[error("reader I/O error")]
    Io(#[from] std::io::Error),
}
