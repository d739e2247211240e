use crate::error::{Result, SyncmerError};

/// Limits mirroring the source's `MAX_RD_NUM`/`MAX_RD_SCM` constants: fixed,
/// power-of-two-minus-one capacities the caller can check with
/// [`crate::collect::sr_validate`].
pub const MAX_RD_NUM: u64 = (1u64 << 40) - 1;
pub const MAX_RD_SCM: u64 = (1u64 << 24) - 1;

/// Rolling window configuration, generalized from the teacher's `Meros`
/// struct (`k_mer`, `l_mer`, `mask`, ...): an immutable, `Copy` record
/// threaded by reference through SYNC and POOL rather than rebuilt per read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// S-mer length in bases, `1 <= k < 32`.
    pub k: usize,
    /// Syncmer window width in bases, `w > k`.
    pub w: usize,
    /// Rolling buffer depth, `q = w - k + 1`.
    pub q: usize,
    /// Mask selecting the low `2*k` bits of a packed k-mer.
    pub mask: u64,
}

impl Params {
    pub fn new(k: usize, w: usize) -> Result<Self> {
        if k == 0 || k >= 32 || w <= k {
            return Err(SyncmerError::InvalidParams { k, w });
        }
        // k < 32 is enforced above, so 2*k < 64 and this shift never overflows.
        let mask = (1u64 << (2 * k)) - 1;
        Ok(Self {
            k,
            w,
            q: w - k + 1,
            mask,
        })
    }
}
