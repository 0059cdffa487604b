//! Single-pass n-gram accounting over the shared counter table.
//!
//! The needle is accumulated once; each haystack row then adjusts a running
//! symmetric-difference count against the same table, recording every
//! decrement in a trail that is replayed afterwards. No hash map is built
//! per row and the needle is never rescanned.

use crate::gram::{GramScheme, WINDOW_LEN};
use crate::stats::{GramStats, Trail};

/// Count the needle's n-grams into `stats`.
///
/// The table must be zeroed on entry; on return the signed sum of its
/// counters equals the returned n-gram count. `data` must stay readable
/// for [`crate::PAD`] bytes past `len` (the drivers copy the needle into a
/// padded buffer). Needles shorter than N bytes produce no n-grams and
/// leave the table untouched.
pub fn accumulate_needle<S: GramScheme>(data: &[u8], len: usize, stats: &mut GramStats) -> usize {
    if len < S::N {
        return 0;
    }
    let mut window = [S::Unit::default(); WINDOW_LEN];
    let mut pos = 0usize;
    let mut total = 0usize;

    let mut found = S::read_units(&mut window, &mut pos, data, len);
    // The first fill's leading N-1 positions are the zeroed tail, not data.
    let mut i = S::N - 1;
    loop {
        while i + S::N <= found {
            stats.bump(S::hash(&window, i));
            i += 1;
            total += 1;
        }
        if pos >= len {
            break;
        }
        found = S::read_units(&mut window, &mut pos, data, len);
        i = 0;
    }
    total
}

/// Score one haystack row against the table, updating `distance`.
///
/// `distance` must hold the needle n-gram count on entry; on return it is
/// the multiset symmetric-difference count of n-gram hashes between needle
/// and row. Every bucket decrement is recorded and replayed before
/// returning, so the table ends bit-identical to its post-needle state and
/// the next row starts clean. Returns the row's n-gram count.
///
/// Rows of up to [`crate::stats::SMALL_TRAIL`] bytes run allocation-free;
/// longer rows cost one trail allocation, freed on return.
pub fn score_haystack<S: GramScheme>(
    data: &[u8],
    len: usize,
    stats: &mut GramStats,
    distance: &mut usize,
) -> usize {
    let mut trail = Trail::with_capacity(len);
    let mut window = [S::Unit::default(); WINDOW_LEN];
    let mut pos = 0usize;

    let mut found = S::read_units(&mut window, &mut pos, data, len);
    let mut i = S::N - 1;
    loop {
        while i + S::N <= found {
            let hash = S::hash(&window, i);
            if stats.consume(hash) {
                *distance -= 1;
            } else {
                *distance += 1;
            }
            trail.push(hash);
            i += 1;
        }
        if pos >= len {
            break;
        }
        found = S::read_units(&mut window, &mut pos, data, len);
        i = 0;
    }

    stats.restore(&trail);
    trail.len()
}
