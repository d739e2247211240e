//! Textual rendering of reads and their syncmer anchors.
//!
//! Output is plain ASCII written to any [`std::io::Write`] — no raw file
//! handle is assumed, since this is a library rather than a CLI tool.

use std::io::{self, Write};

use crate::nt2::{symbol_at, CODE_TO_CHAR};
use crate::read::ReadSyncmers;

fn decode_hoco(hoco_s: &[u8], hoco_l: u32) -> Vec<u8> {
    (0..hoco_l)
        .map(|p| CODE_TO_CHAR[symbol_at(hoco_s[(p / 4) as usize], p as usize) as usize])
        .collect()
}

fn smer_chars(s: u64, k: usize) -> Vec<u8> {
    (0..k).map(|i| CODE_TO_CHAR[((s >> ((k - i - 1) * 2)) & 3) as usize]).collect()
}

/// Render the `w`-symbol window at HOCO position `pos`, reverse-complementing
/// if `rev` is set — equivalent to decoding the forward symbols and then
/// reverse-complementing the whole window, rather than re-deriving each
/// symbol from a byte-shifted copy.
fn kmer_chars(hoco_s: &[u8], pos: u32, w: usize, rev: bool) -> Vec<u8> {
    let mut codes: Vec<u8> = (0..w)
        .map(|i| symbol_at(hoco_s[((pos as usize + i) / 4)], pos as usize + i))
        .collect();
    if rev {
        codes.reverse();
        for c in codes.iter_mut() {
            *c ^= 3;
        }
    }
    codes.iter().map(|&c| CODE_TO_CHAR[c as usize]).collect()
}

/// Print the full decoded HOCO sequence, one line.
pub fn print_hoco_seq(read: &ReadSyncmers, out: &mut impl Write) -> io::Result<()> {
    out.write_all(&decode_hoco(&read.hoco.hoco_s, read.hoco.hoco_l))?;
    writeln!(out)
}

/// Print one anchor as a FASTA-like record: header, raw s-mer, and the
/// k-mer window it was drawn from.
pub fn print_syncmer_on_seq(read: &ReadSyncmers, n: usize, k: usize, w: usize, out: &mut impl Write) -> io::Result<()> {
    if n >= read.anchors.len() {
        return Ok(());
    }
    let a = read.anchors[n];
    writeln!(out, ">{}_{}_{}_{}_{}\t", read.sid, n, a.hoco_pos(), a.s_mer & 1, a.strand())?;
    write!(out, "RD:Z:{}\t", read.sid)?;
    write!(out, "MM:Z:")?;
    out.write_all(&smer_chars(a.s_mer >> 1, k))?;
    write!(out, "\t")?;
    writeln!(out, "KH:Z:{:064}{:064}", (a.k_mer_h >> 64) as u64, a.k_mer_h as u64)?;
    out.write_all(&kmer_chars(&read.hoco.hoco_s, a.hoco_pos(), w, a.strand() == 1))?;
    writeln!(out)
}

/// Print every anchor on the read, in order.
pub fn print_all_syncmers_on_seq(read: &ReadSyncmers, k: usize, w: usize, out: &mut impl Write) -> io::Result<()> {
    for n in 0..read.anchors.len() {
        print_syncmer_on_seq(read, n, k, w, out)?;
    }
    Ok(())
}

/// Print the HOCO sequence followed by each anchor in `[beg, end)`
/// rendered aligned underneath it, `*`-padded outside the window.
pub fn print_aligned_syncmers_on_seq(
    read: &ReadSyncmers,
    w: usize,
    beg: usize,
    end: usize,
    out: &mut impl Write,
) -> io::Result<()> {
    let l = read.hoco.hoco_l;
    let end = end.min(read.anchors.len());
    let seq = decode_hoco(&read.hoco.hoco_s, l);
    out.write_all(&seq)?;
    writeln!(out)?;
    for anchor in &read.anchors[beg..end] {
        let p = anchor.hoco_pos() as usize;
        for _ in 0..p {
            write!(out, "*")?;
        }
        out.write_all(&seq[p..p + w])?;
        for _ in (p + w)..(l as usize) {
            write!(out, "*")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
