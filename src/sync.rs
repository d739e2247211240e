//! SYNC: the rolling syncmer extractor.
//!
//! One pass over a read's raw bases drives both homopolymer compression
//! ([`HocoSeq`]) and minimizer selection: for every position a forward and
//! reverse-complement k-mer are maintained, the lower-hashing strand is
//! chosen as canonical, and a circular buffer of `q = w-k+1` canonical
//! s-mer hashes tracks the window minimizer. An anchor is emitted whenever
//! the newest s-mer becomes (or the window slides off) the minimizer.

use crate::hash::{hash128, hash64, HashConfig, KmerHash};
use crate::hoco::HocoSeq;
use crate::nt2::{char_to_code, is_ambiguous};
use crate::params::Params;
use crate::read::{Anchor, ReadSyncmers};

fn push_anchor(anchors: &mut Vec<Anchor>, hoco: &HocoSeq, s_mer: u64, m_pos: u32, w: usize, hcfg: &HashConfig) {
    let k_mer_h = hash128(&hoco.hoco_s, m_pos, w, hcfg);
    anchors.push(Anchor { m_pos, s_mer, k_mer_h });
}

/// A syncmer that starts and ends on the same HOCO position can be emitted
/// twice in a row (once as the window's only defined minimizer, once more
/// as the window slides past it); both copies are removed.
fn dedup_same_position(anchors: &mut Vec<Anchor>) {
    let n = anchors.len();
    if n >= 2 && anchors[n - 1].hoco_pos() == anchors[n - 2].hoco_pos() {
        anchors.truncate(n - 2);
    }
}

/// Extract HOCO sequence and syncmer anchors from one read's raw bases.
pub fn scan(sid: u64, sname: String, bases: &[u8], params: &Params, hcfg: &HashConfig) -> ReadSyncmers {
    let k = params.k;
    let w = params.w;
    let q = params.q;
    let mask = params.mask;
    let shift1 = (2 * (k - 1)) as u32;

    let mut hoco = HocoSeq::default();
    let mut anchors: Vec<Anchor> = Vec::new();

    let mut buf_m = vec![KmerHash::Symmetric; q];
    let mut buf_s = vec![0u64; q];
    let mut mz = KmerHash::Symmetric;
    let mut mz_pos: usize = 0;
    let mut buf_pos: usize = 0;
    let mut l: i64 = 0;
    let mut kmer = [0u64; 2];

    let len = bases.len();
    let mut i = 0usize;
    while i < len {
        let c = char_to_code(bases[i]);
        let mut m = KmerHash::Symmetric;
        let mut s: u64 = 0;

        if is_ambiguous(c) {
            hoco.push_ambiguous(i as u32);
            l = 0;
            i += 1;
        } else {
            let mut rl: u32 = 1;
            while i + (rl as usize) < len && char_to_code(bases[i + rl as usize]) == c {
                rl += 1;
            }
            hoco.push_symbol(c, rl);
            i += rl as usize;

            l += 1;
            kmer[0] = (kmer[0] << 2 | c as u64) & mask;
            kmer[1] = (kmer[1] >> 2) | ((3u64 ^ c as u64) << shift1);
            if kmer[0] != kmer[1] {
                let z = if kmer[0] < kmer[1] { 0usize } else { 1usize };
                if l >= k as i64 {
                    m = KmerHash::Defined(hash64(kmer[z], mask));
                    s = (kmer[z] << 1) | z as u64;
                }
            }
        }

        // Open syncmer: the window has slid past the position that was the
        // minimizer last time we saw this buffer slot.
        if buf_pos == mz_pos && !mz.is_symmetric() && l > w as i64 {
            let prev_s = buf_s[buf_pos];
            let z = (prev_s & 1) as u32;
            let m_pos = ((hoco.hoco_l - w as u32 - 1) << 1) | z;
            push_anchor(&mut anchors, &hoco, prev_s, m_pos, w, hcfg);
            dedup_same_position(&mut anchors);
        }

        buf_m[buf_pos] = m;
        buf_s[buf_pos] = s;

        if m <= mz && !m.is_symmetric() {
            if l >= w as i64 {
                // Close syncmer: the just-computed s-mer is at least as good
                // as the running minimizer.
                let z = (s & 1) as u32;
                let m_pos = (hoco.hoco_l - w as u32) << 1 | z;
                push_anchor(&mut anchors, &hoco, s ^ 1, m_pos, w, hcfg);
            }
            if m < mz {
                mz = m;
                mz_pos = buf_pos;
            }
        }

        if m >= mz && buf_pos == mz_pos {
            let neq = m != mz;
            mz = KmerHash::Symmetric;
            for j in buf_pos + 1..q {
                if mz > buf_m[j] {
                    mz = buf_m[j];
                    mz_pos = j;
                }
            }
            for j in 0..=buf_pos {
                if mz > buf_m[j] {
                    mz = buf_m[j];
                    mz_pos = j;
                }
            }
            let q_next = (buf_pos + 1) % q;
            if neq
                && ((mz_pos == q_next && mz == m) || mz_pos == buf_pos)
                && !mz.is_symmetric()
                && l >= w as i64
            {
                let z = (s & 1) as u32;
                let m_pos = (hoco.hoco_l - w as u32) << 1 | z;
                push_anchor(&mut anchors, &hoco, s ^ 1, m_pos, w, hcfg);
            }
        }

        buf_pos = (buf_pos + 1) % q;
    }

    // Trailing open syncmer: the window never slid off the final minimizer.
    if buf_pos == mz_pos && !mz.is_symmetric() && l >= w as i64 {
        let prev_s = buf_s[buf_pos];
        let z = (prev_s & 1) as u32;
        let m_pos = (hoco.hoco_l - w as u32) << 1 | z;
        push_anchor(&mut anchors, &hoco, prev_s, m_pos, w, hcfg);
        dedup_same_position(&mut anchors);
    }

    hoco.finish();
    ReadSyncmers { sid, sname, hoco, anchors }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_default(bases: &[u8], k: usize, w: usize) -> ReadSyncmers {
        let params = Params::new(k, w).unwrap();
        let hcfg = HashConfig::default();
        scan(0, "r".to_string(), bases, &params, &hcfg)
    }

    #[test]
    fn short_read_with_no_runs_has_some_anchors() {
        let r = scan_default(b"ACGTACGTACGT", 3, 5);
        assert!(r.n_anchors() > 0);
        for a in &r.anchors {
            assert!(a.strand() == 0 || a.strand() == 1);
        }
    }

    #[test]
    fn anchor_window_fits_inside_hoco_sequence() {
        let r = scan_default(b"ACGTACGTACGTACGTACGT", 4, 7);
        for a in &r.anchors {
            assert!(a.hoco_pos() + 7 <= r.hoco.hoco_l);
        }
    }

    #[test]
    fn consecutive_anchors_strictly_increase_in_position() {
        let r = scan_default(b"ACGTACGTACGTACGTACGTACGTACGT", 4, 7);
        for pair in r.anchors.windows(2) {
            assert!(pair[0].hoco_pos() < pair[1].hoco_pos());
        }
    }

    #[test]
    fn homopolymer_compressed_read_too_short_for_window_has_no_anchors() {
        // AAAACCCCGGGG compresses to "ACG" (hoco_l=3), below w=5: no window fits.
        let r = scan_default(b"AAAACCCCGGGG", 3, 5);
        assert_eq!(r.hoco.hoco_l, 3);
        assert!(r.anchors.is_empty());
    }

    #[test]
    fn all_ambiguous_read_produces_no_anchors() {
        let r = scan_default(b"NNNNNNNNNNNN", 3, 5);
        assert!(r.anchors.is_empty());
        assert_eq!(r.hoco.n_nucl.len(), 12);
    }
}
