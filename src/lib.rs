//! Homopolymer-compressed syncmer extraction and k-mer-space statistics.
//!
//! This crate pulls reads from a caller-supplied [`reader::Reader`],
//! extracts canonical syncmer anchors per read ([`sync::scan`], driven
//! through the batching thread pool in [`pool`]), and offers two
//! downstream analyses over the resulting anchor collection: cross-read
//! multiplicity statistics ([`agg`]) and per-gap link-coverage regression
//! ([`linkcov`]). It does not parse FASTA/FASTQ framing, assemble
//! sequences, or persist anything to disk — those are host concerns.

pub mod agg;
pub mod collect;
pub mod error;
pub mod hash;
pub mod hoco;
pub mod linkcov;
pub mod nt2;
pub mod params;
pub mod pool;
pub mod print;
pub mod read;
pub mod reader;
pub mod sync;

pub use agg::{sr_stat, AggStats, MultiplicityStats};
pub use collect::{collect_syncmer_from_reads, sr_validate, Syncmer};
pub use error::{Result, SyncmerError};
pub use hash::{hash128, hash64, HashConfig, KmerHash};
pub use hoco::HocoSeq;
pub use linkcov::{syncmer_link_coverage_analysis, LinkCoverageReport, LinkCoverageRow};
pub use params::{Params, MAX_RD_NUM, MAX_RD_SCM};
pub use pool::sr_read;
pub use read::{Anchor, ReadSyncmers};
pub use reader::{Reader, VecReader};
