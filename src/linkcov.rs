//! LINKCOV: per-gap link-coverage regression.
//!
//! For increasing anchor-to-anchor distances ("gaps"), estimate how
//! observed arc multiplicity scales with an upper-bound copy-number
//! estimate derived from k-mer multiplicity, via a zero-intercept linear
//! fit. This is the assembly-graph-adjacent diagnostic the source uses to
//! judge whether syncmer coverage behaves linearly with genuine copy
//! number, gap by gap.

use std::collections::HashMap;

use crate::collect::collect_syncmer_from_reads;
use crate::read::ReadSyncmers;

/// One gap's regression result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkCoverageRow {
    pub gap: u32,
    pub beta: f64,
    pub bse: f64,
    pub r2: f64,
    pub n: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkCoverageReport {
    pub rows: Vec<LinkCoverageRow>,
}

struct Point {
    c: u32,
    l: u32,
    f: f64,
}

/// Run the gap-by-gap link-coverage regression.
///
/// `min_n_seq` is the minimum number of reads required to have at least
/// `gap + 2` anchors for a gap to be analyzed; `min_k_cov` filters out
/// low-multiplicity k-mers from arc collection; `min_pt` (floored at 30)
/// and `min_f` bound how many trimmed points a gap's regression needs.
pub fn syncmer_link_coverage_analysis(
    reads: &[ReadSyncmers],
    min_k_cov: u32,
    min_n_seq: u32,
    min_pt: u32,
    min_f: f64,
) -> LinkCoverageReport {
    let min_pt = min_pt.max(30);
    let min_f = min_f.max(0.0);

    let syncmers = collect_syncmer_from_reads(reads);
    if syncmers.is_empty() {
        return LinkCoverageReport::default();
    }

    let h_scm: HashMap<u128, usize> =
        syncmers.iter().enumerate().map(|(idx, s)| (s.h, idx)).collect();

    let max_n = reads.iter().map(|r| r.anchors.len()).max().unwrap_or(0);
    if max_n == 0 {
        return LinkCoverageReport::default();
    }

    // rl_cnts[n] = number of reads with at least n anchors.
    let mut rl_cnts = vec![0i64; max_n + 1];
    for r in reads {
        rl_cnts[r.anchors.len()] += 1;
    }
    for i in (0..max_n).rev() {
        rl_cnts[i] += rl_cnts[i + 1];
    }

    let mut rows = Vec::new();
    let mut k_cn: HashMap<usize, u32> = HashMap::new();

    for i in 2..max_n {
        if rl_cnts[i] < min_n_seq as i64 {
            break;
        }

        let mut a_cov: HashMap<(u64, u64), u32> = HashMap::new();
        for read in reads {
            if read.anchors.len() < i {
                continue;
            }
            let scm_id: Vec<usize> =
                read.anchors.iter().map(|a| h_scm[&a.k_mer_h]).collect();
            for a in (i - 1)..read.anchors.len() {
                let idx0 = a + 1 - i;
                let idx1 = a;
                if syncmers[scm_id[idx0]].count < min_k_cov || syncmers[scm_id[idx1]].count < min_k_cov {
                    continue;
                }
                let v0 = ((scm_id[idx0] as u64) << 1) | (read.anchors[idx0].m_pos & 1) as u64;
                let v1 = ((scm_id[idx1] as u64) << 1) | (read.anchors[idx1].m_pos & 1) as u64;
                let key = if v0 <= v1 { (v0, v1) } else { (v1 ^ 1, v0 ^ 1) };
                *a_cov.entry(key).or_insert(0) += 1;
            }
        }

        if i == 2 {
            for &(v0, v1) in a_cov.keys() {
                *k_cn.entry((v0 >> 1) as usize).or_insert(0) += 1;
                *k_cn.entry((v1 >> 1) as usize).or_insert(0) += 1;
            }
        }

        let mut points: Vec<Point> = Vec::with_capacity(a_cov.len());
        for (&(v0, v1), &observed) in a_cov.iter() {
            let scm0 = (v0 >> 1) as usize;
            let scm1 = (v1 >> 1) as usize;
            let c0 = k_cn.get(&scm0).copied().unwrap_or(0).max(2) as f64 / 2.0;
            let c1 = k_cn.get(&scm1).copied().unwrap_or(0).max(2) as f64 / 2.0;
            let c = (syncmers[scm0].count as f64 / c0).min(syncmers[scm1].count as f64 / c1) as u32;
            let l = observed.min(c);
            let f = if c > 0 { l as f64 / c as f64 } else { 0.0 };
            points.push(Point { c, l, f });
        }

        let n = points.len();
        let mut beg = (n as f64 * 0.05).floor() as usize;
        let end = (n as f64 * 0.95).ceil() as usize;
        points.sort_by(|a, b| a.f.partial_cmp(&b.f).unwrap());
        while beg < end && points[beg].f < min_f {
            beg += 1;
        }
        if end.saturating_sub(beg) < min_pt as usize {
            break;
        }

        let mut xy = 0.0;
        let mut x2 = 0.0;
        let mut ybar = 0.0;
        for p in &points[beg..end] {
            xy += p.c as f64 * p.l as f64;
            x2 += p.c as f64 * p.c as f64;
            ybar += p.l as f64;
        }
        let beta = xy / x2;
        ybar /= (end - beg) as f64;

        let mut res = 0.0;
        let mut tot = 0.0;
        for p in &points[beg..end] {
            let r = p.l as f64 - beta * p.c as f64;
            res += r * r;
            let t = p.l as f64 - ybar;
            tot += t * t;
        }
        let bse = (res / x2 / (end - beg - 1) as f64).sqrt();
        let r2 = if tot == 0.0 { 0.0 } else { 1.0 - res / tot };

        rows.push(LinkCoverageRow { gap: (i - 2) as u32, beta, bse, r2, n: (end - beg) as u32 });
    }

    LinkCoverageReport { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reads_yields_empty_report() {
        let report = syncmer_link_coverage_analysis(&[], 1, 1, 30, 0.0);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn reads_with_no_anchors_yield_empty_report() {
        let reads = vec![ReadSyncmers {
            sid: 0,
            sname: "r".into(),
            hoco: crate::hoco::HocoSeq::default(),
            anchors: vec![],
        }];
        let report = syncmer_link_coverage_analysis(&reads, 1, 1, 30, 0.0);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn row_sample_sizes_never_increase_across_gaps() {
        use crate::hash::HashConfig;
        use crate::params::Params;
        use crate::sync::scan;

        let params = Params::new(4, 7).unwrap();
        let hcfg = HashConfig::default();
        let bases: Vec<u8> = b"ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT".to_vec();
        let reads: Vec<ReadSyncmers> = (0..40)
            .map(|i| scan(i, format!("r{i}"), &bases, &params, &hcfg))
            .collect();
        let report = syncmer_link_coverage_analysis(&reads, 0, 1, 1, 0.0);
        for pair in report.rows.windows(2) {
            assert!(pair[1].n <= pair[0].n);
        }
    }
}
