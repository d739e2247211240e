//! Aggregation of anchors across reads into a deduplicated syncmer table,
//! and the size-limit check gating that aggregation.

use crate::params::{MAX_RD_NUM, MAX_RD_SCM};
use crate::read::ReadSyncmers;

/// A syncmer recorded once per distinct 128-bit k-mer hash across all reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syncmer {
    pub h: u128,
    pub s: u64,
    pub count: u32,
}

/// Returns `true` if `reads` stays within the fixed capacity limits
/// (`MAX_RD_NUM` total reads, `MAX_RD_SCM` anchors per read); `false` means
/// the caller should reject the input rather than proceed to aggregation.
pub fn sr_validate(reads: &[ReadSyncmers]) -> bool {
    if reads.len() as u64 > MAX_RD_NUM {
        return false;
    }
    reads.iter().all(|r| r.anchors.len() as u64 <= MAX_RD_SCM)
}

/// Aggregate every read's anchors into one syncmer table keyed by the
/// 128-bit k-mer hash.
///
/// # Panics
/// Panics if two anchors share a hash `h` but disagree on `s` — this can
/// only happen from a broken upstream hash or a programming error upstream
/// of this crate, not from untrusted sequence data, so it is treated as a
/// fatal invariant violation rather than a recoverable error.
pub fn collect_syncmer_from_reads(reads: &[ReadSyncmers]) -> Vec<Syncmer> {
    use std::collections::HashMap;

    if reads.is_empty() {
        return Vec::new();
    }

    let mut table: HashMap<u128, (u64, u32)> = HashMap::new();
    for read in reads {
        for anchor in &read.anchors {
            table
                .entry(anchor.k_mer_h)
                .and_modify(|(s, count)| {
                    if *s != anchor.s_mer {
                        log::error!(
                            "hash collision with disagreeing s-mer: h={:x} existing_s={} new_s={}",
                            anchor.k_mer_h,
                            *s,
                            anchor.s_mer
                        );
                        panic!(
                            "collect_syncmer_from_reads: hash {:x} seen with two different s-mers ({} vs {})",
                            anchor.k_mer_h, *s, anchor.s_mer
                        );
                    }
                    *count += 1;
                })
                .or_insert((anchor.s_mer, 1));
        }
    }

    table
        .into_iter()
        .map(|(h, (s, count))| Syncmer { h, s, count })
        .collect()
}
