//! AGG: cross-read statistics — inter-syncmer gap, s-mer/k-mer multiplicity
//! tables, and the `ha_analyze_count` peak-finder used to estimate
//! homozygous/heterozygous coverage depth from a k-mer count histogram.

use std::collections::HashMap;

use crate::read::ReadSyncmers;

const MAX_DEPTH: usize = 1000;
const LOWEST_CUT: usize = 5;

/// Counts of unique/singleton keys, mean multiplicity, and the
/// homozygous/heterozygous peak pair for one multiplicity table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplicityStats {
    pub unique: usize,
    pub singletons: usize,
    pub mean_multiplicity: f64,
    /// Index of the dominant (homozygous) peak in the count histogram, or
    /// -1 if no peak could be found (low-coverage input).
    pub peak_hom: i32,
    /// Index of the subordinate (heterozygous) peak, or -1 if none.
    pub peak_het: i32,
}

/// Full result of [`sr_stat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggStats {
    pub syncmer_count: usize,
    pub read_count: usize,
    pub per_read_mean: f64,
    pub mean_gap: f64,
    pub smer: MultiplicityStats,
    pub kmer: MultiplicityStats,
}

/// Build a `cnt[0..=MAX_DEPTH]` histogram of "how many distinct keys have
/// multiplicity i" from a table of key -> multiplicity, clamping any
/// multiplicity at or above `MAX_DEPTH` into the last bucket.
fn multiplicity_histogram(counts: &HashMap<impl Eq + std::hash::Hash, u32>) -> Vec<i64> {
    let mut cnt = vec![0i64; MAX_DEPTH + 1];
    for &c in counts.values() {
        let idx = (c as usize).min(MAX_DEPTH);
        cnt[idx] += 1;
    }
    cnt
}

fn multiplicity_stats(counts: &HashMap<impl Eq + std::hash::Hash, u32>) -> MultiplicityStats {
    let unique = counts.len();
    let total: u64 = counts.values().map(|&c| c as u64).sum();
    let singletons = counts.values().filter(|&&c| c == 1).count();
    let mean_multiplicity = if unique > 0 { total as f64 / unique as f64 } else { 0.0 };

    let cnt = multiplicity_histogram(counts);
    let (peak_hom, peak_het) = ha_analyze_count(&cnt, LOWEST_CUT);

    MultiplicityStats { unique, singletons, mean_multiplicity, peak_hom, peak_het }
}

/// Find the dominant and subordinate peaks in a multiplicity histogram
/// `cnt[0..=MAX_DEPTH]`. Returns `(peak_hom, peak_het)`, both `-1` if the
/// histogram is too flat (low coverage) to have a clear low point.
fn ha_analyze_count(cnt: &[i64], start_cnt: usize) -> (i32, i32) {
    let n_cnt = cnt.len();
    assert!(n_cnt > start_cnt);

    let start = if cnt[1] > 0 { 1 } else { 2 };
    let low_start = start.max(start_cnt);

    let mut low_i = low_start;
    let mut i = low_start + 1;
    while i < n_cnt {
        if cnt[i] > cnt[i - 1] {
            break;
        }
        i += 1;
    }
    low_i = i - 1;
    if low_i == n_cnt - 1 {
        return (-1, -1); // low coverage: histogram never rises again.
    }

    let mut max_i = low_i + 1;
    let mut max = cnt[max_i];
    for i in low_i + 1..n_cnt {
        if cnt[i] > max {
            max = cnt[i];
            max_i = i;
        }
    }

    log::trace!("ha_analyze_count: low_i={low_i} max_i={max_i} max={max}");

    let mut max2: i64 = -1;
    let mut max2_i: i32 = -1;
    let mut i = (max_i as i32) - 1;
    while i > low_i as i32 {
        let ui = i as usize;
        if cnt[ui] >= cnt[ui - 1] && cnt[ui] >= cnt[ui + 1] && cnt[ui] > max2 {
            max2 = cnt[ui];
            max2_i = i;
        }
        i -= 1;
    }
    if max2_i > low_i as i32 && max2_i < max_i as i32 {
        let mut min = max;
        for i in (max2_i as usize + 1)..max_i {
            if cnt[i] < min {
                min = cnt[i];
            }
        }
        if (max2 as f64) < max as f64 * 0.05 || (min as f64) > max2 as f64 * 0.95 {
            max2 = -1;
            max2_i = -1;
        }
    }

    let mut max3: i64 = -1;
    let mut max3_i: i32 = -1;
    for i in max_i + 1..n_cnt - 1 {
        if cnt[i] >= cnt[i - 1] && cnt[i] >= cnt[i + 1] && cnt[i] > max3 {
            max3 = cnt[i];
            max3_i = i as i32;
        }
    }
    if max3_i > max_i as i32 {
        let mut min = max;
        for i in (max_i + 1)..(max3_i as usize) {
            if cnt[i] < min {
                min = cnt[i];
            }
        }
        if (max3 as f64) < max as f64 * 0.05
            || (min as f64) > max3 as f64 * 0.95
            || max3_i as f64 > max_i as f64 * 2.5
        {
            max3 = -1;
            max3_i = -1;
        }
    }

    if max3_i > 0 {
        (max3_i, max_i as i32)
    } else if max2_i > 0 {
        (max_i as i32, max2_i)
    } else {
        (max_i as i32, -1)
    }
}

/// Compute cross-read statistics over every read's anchors. Returns `None`
/// (and logs an informational message) if the collection carries no
/// anchors at all.
pub fn sr_stat(reads: &[ReadSyncmers], w: usize) -> Option<AggStats> {
    let mut gap_sum: i64 = 0;
    let mut gap_n: u64 = 0;
    let mut smer_counts: HashMap<u64, u32> = HashMap::new();
    let mut kmer_counts: HashMap<u128, u32> = HashMap::new();
    let mut syncmer_count: usize = 0;

    for read in reads {
        syncmer_count += read.anchors.len();
        for pair in read.anchors.windows(2) {
            let gap = pair[1].hoco_pos() as i64 - pair[0].hoco_pos() as i64 - w as i64;
            gap_sum += gap;
            gap_n += 1;
        }
        for anchor in &read.anchors {
            *smer_counts.entry(anchor.s_mer).or_insert(0) += 1;
            *kmer_counts.entry(anchor.k_mer_h).or_insert(0) += 1;
        }
    }

    if syncmer_count == 0 {
        log::info!("sr_stat: empty syncmer collection");
        return None;
    }

    let mean_gap = if gap_n > 0 { gap_sum as f64 / gap_n as f64 } else { 0.0 };
    let per_read_mean = syncmer_count as f64 / reads.len().max(1) as f64;

    Some(AggStats {
        syncmer_count,
        read_count: reads.len(),
        per_read_mean,
        mean_gap,
        smer: multiplicity_stats(&smer_counts),
        kmer: multiplicity_stats(&kmer_counts),
    })
}
