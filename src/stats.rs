//! The reusable n-gram counter table and the per-row restoration trail.

use smallvec::SmallVec;

/// Number of counter slots; bucket indices are full 16-bit hashes.
pub const MAP_SIZE: usize = 1 << 16;

/// Rows up to this many bytes record their trail inline; longer rows spill
/// to one heap allocation sized by the row.
pub const SMALL_TRAIL: usize = 256;

/// Per-row record of visited buckets, replayed to restore the table.
pub(crate) type Trail = SmallVec<[u16; SMALL_TRAIL]>;

/// 65,536 16-bit counters keyed by n-gram hash.
///
/// Counters are stored unsigned so increments and decrements wrap without
/// overflow checks, and are read through an `i16` cast where the sign
/// matters. At 128 KiB the table stays L2-resident across a whole batch.
///
/// # Invariants
/// - After a needle pass over a zeroed table, the signed sum of all slots
///   equals the needle n-gram count.
/// - After a haystack row is scored and its trail replayed, the table is
///   bit-identical to its post-needle state.
pub struct GramStats {
    counts: Box<[u16; MAP_SIZE]>,
}

impl GramStats {
    /// A zeroed table. One 128 KiB allocation; reuse it for a whole batch.
    pub fn new() -> Self {
        Self {
            counts: Box::new([0u16; MAP_SIZE]),
        }
    }

    /// Record one needle n-gram.
    #[inline(always)]
    pub(crate) fn bump(&mut self, hash: u16) {
        let slot = &mut self.counts[usize::from(hash)];
        *slot = slot.wrapping_add(1);
    }

    /// Consume one haystack n-gram. Returns true if the bucket still held
    /// an unmatched needle occurrence (signed view of the counter > 0).
    #[inline(always)]
    pub(crate) fn consume(&mut self, hash: u16) -> bool {
        let slot = &mut self.counts[usize::from(hash)];
        let had_needle = (*slot as i16) > 0;
        *slot = slot.wrapping_sub(1);
        had_needle
    }

    /// Undo the decrements recorded in `trail`, returning the table to its
    /// post-needle state.
    #[inline]
    pub(crate) fn restore(&mut self, trail: &Trail) {
        for &hash in trail {
            let slot = &mut self.counts[usize::from(hash)];
            *slot = slot.wrapping_add(1);
        }
    }

    /// Signed sum of all counters.
    pub fn total(&self) -> i64 {
        self.counts.iter().map(|&c| i64::from(c as i16)).sum()
    }

    /// Copy of the raw counters, for restoration checks in tests.
    pub fn snapshot(&self) -> Vec<u16> {
        self.counts.to_vec()
    }
}

impl Default for GramStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GramStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GramStats")
            .field("slots", &MAP_SIZE)
            .field("total", &self.total())
            .finish()
    }
}
