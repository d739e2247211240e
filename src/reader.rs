//! The upstream sequence reader contract.
//!
//! Parsing FASTA/FASTQ framing is out of scope for this crate (§1
//! Non-goals); callers supply anything that can hand back one read's name
//! and bases at a time.

use crate::error::Result;

/// Pulls reads one at a time. Implementations are not required to be
/// `Sync`: POOL's producer is the only caller, and it calls sequentially.
pub trait Reader {
    /// Returns `Ok(Some((name, bases)))` for the next read, `Ok(None)` at
    /// end of stream, or `Err` if the underlying source failed.
    fn read_next(&mut self) -> Result<Option<(String, Vec<u8>)>>;
}

/// A `Reader` over an in-memory list of `(name, bases)` pairs, useful for
/// tests and for callers who have already materialized their reads.
pub struct VecReader {
    reads: std::vec::IntoIter<(String, Vec<u8>)>,
}

impl VecReader {
    pub fn new(reads: Vec<(String, Vec<u8>)>) -> Self {
        Self { reads: reads.into_iter() }
    }
}

impl Reader for VecReader {
    fn read_next(&mut self) -> Result<Option<(String, Vec<u8>)>> {
        Ok(self.reads.next())
    }
}
