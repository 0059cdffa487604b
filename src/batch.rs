//! Batch drivers: own the counter table for one call and loop over rows.
//!
//! Three entry points mirror the engine's argument shapes. All of them
//! zero one table, accumulate the needle once, and hand each haystack to
//! the scorer; the scorer's trail replay guarantees every row starts from
//! the identical post-needle table.

use crate::column::StringColumn;
use crate::gram::{GramScheme, PAD};
use crate::scorer::{accumulate_needle, score_haystack};
use crate::stats::GramStats;

/// Largest haystack the scorer will touch. Longer rows score 1.0 outright:
/// they are assumed dissimilar, and bounding the length keeps every
/// counter within `i16` range.
pub const MAX_STRING_SIZE: usize = 1 << 15;

/// Copy `bytes` into a buffer with `PAD` readable zeros past the end.
fn padded(bytes: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(bytes.len() + PAD);
    buf.extend_from_slice(bytes);
    buf.resize(bytes.len() + PAD, 0);
    buf
}

#[inline]
fn normalize(distance: usize, hay_count: usize, needle_count: usize) -> f32 {
    distance as f32 / (hay_count + needle_count).max(1) as f32
}

/// Distance between two standalone strings, in `[0.0, 1.0]`.
pub fn constant_constant<S: GramScheme>(needle: &[u8], haystack: &[u8]) -> f32 {
    let mut stats = GramStats::new();
    let needle_buf = padded(needle);
    let needle_count = accumulate_needle::<S>(&needle_buf, needle.len(), &mut stats);

    if haystack.len() > MAX_STRING_SIZE {
        return 1.0;
    }
    let hay_buf = padded(haystack);
    let mut distance = needle_count;
    let hay_count = score_haystack::<S>(&hay_buf, haystack.len(), &mut stats, &mut distance);
    normalize(distance, hay_count, needle_count)
}

/// Distance between a constant needle and every row of a column, emitted
/// in row order.
///
/// The table is zeroed and the needle accumulated exactly once; rows reuse
/// it through the restore-by-trail discipline, so the whole batch costs a
/// single 128 KiB table regardless of row count.
pub fn vector_constant<S: GramScheme>(column: &StringColumn, needle: &[u8]) -> Vec<f32> {
    let mut stats = GramStats::new();
    let needle_buf = padded(needle);
    let needle_count = accumulate_needle::<S>(&needle_buf, needle.len(), &mut stats);

    let chars = column.chars();
    let mut res = Vec::with_capacity(column.len());
    let mut distance = needle_count;
    let mut prev_offset = 0usize;
    for &offset in column.offsets() {
        let offset = offset as usize;
        let hay_len = offset - prev_offset - 1;
        if hay_len <= MAX_STRING_SIZE {
            let hay_count =
                score_haystack::<S>(&chars[prev_offset..], hay_len, &mut stats, &mut distance);
            res.push(normalize(distance, hay_count, needle_count));
        } else {
            // Oversize rows never touch the table, so nothing to restore.
            res.push(1.0);
        }
        distance = needle_count;
        prev_offset = offset;
    }
    res
}

/// Distance between every row of a column and one constant string.
///
/// The metric is symmetric, so the roles swap: the constant becomes the
/// needle and the rows are scored as haystacks. The oversize cutoff still
/// applies to both sides: a constant longer than [`MAX_STRING_SIZE`] would
/// overflow the counters as a needle, so it short-circuits every row to
/// 1.0.
pub fn constant_vector<S: GramScheme>(column: &StringColumn, constant: &[u8]) -> Vec<f32> {
    if constant.len() > MAX_STRING_SIZE {
        return vec![1.0; column.len()];
    }
    vector_constant::<S>(column, constant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gram::{Ascii, Utf8};

    fn dist(needle: &[u8], haystack: &[u8]) -> f32 {
        constant_constant::<Ascii<false>>(needle, haystack)
    }

    #[test]
    fn identical_four_grams() {
        assert_eq!(dist(b"abcd", b"abcd"), 0.0);
        assert_eq!(dist(b"abcdef", b"abcdef"), 0.0);
    }

    #[test]
    fn single_gram_mismatch_is_total() {
        // One 4-gram each, hashes differ: symmetric difference 2 of 2.
        assert_eq!(dist(b"abcd", b"abce"), 1.0);
    }

    #[test]
    fn partial_overlap() {
        // "abcd","bcde" shared; "cdef" vs "cdeg" differ: 2 of 6.
        let d = dist(b"abcdef", b"abcdeg");
        assert!((d - 2.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn sub_gram_strings_match_trivially() {
        assert_eq!(dist(b"ab", b"ab"), 0.0);
        assert_eq!(dist(b"", b""), 0.0);
    }

    #[test]
    fn utf8_trigrams() {
        let d = constant_constant::<Utf8<false>>("αβγ".as_bytes(), "αβγ".as_bytes());
        assert_eq!(d, 0.0);

        let d = constant_constant::<Utf8<false>>("αβγδ".as_bytes(), "αβγε".as_bytes());
        assert!(d > 0.0 && d <= 1.0);
    }

    #[test]
    fn oversize_haystack_scores_one() {
        let huge = vec![b'x'; MAX_STRING_SIZE + 1];
        assert_eq!(dist(b"x", &huge), 1.0);
        assert_eq!(dist(&huge[..16], &huge), 1.0);
    }

    #[test]
    fn boundary_size_haystack_is_scored() {
        let big = vec![b'x'; MAX_STRING_SIZE];
        assert_eq!(dist(&big, &big), 0.0);
    }

    #[test]
    fn vector_constant_matches_scalar_per_row() {
        let rows: Vec<&[u8]> = vec![b"hello", b"", b"hell", b"yellow", b"hello world"];
        let column = StringColumn::from_rows(rows.iter().copied());
        let batch = vector_constant::<Ascii<false>>(&column, b"hello");
        assert_eq!(batch.len(), rows.len());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(batch[i], dist(b"hello", row), "row {i}");
        }
    }

    #[test]
    fn oversize_row_inside_batch_leaves_neighbors_intact() {
        let huge = vec![b'x'; MAX_STRING_SIZE + 10];
        let column = StringColumn::from_rows([&b"needle"[..], &huge[..], &b"needle"[..]]);
        let batch = vector_constant::<Ascii<false>>(&column, b"needle");
        assert_eq!(batch, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn constant_vector_swaps_roles() {
        let column = StringColumn::from_rows([&b"abcd"[..], &b"abce"[..]]);
        let swapped = constant_vector::<Ascii<false>>(&column, b"abcd");
        assert_eq!(swapped, vec![0.0, 1.0]);
    }

    #[test]
    fn constant_vector_oversize_constant_short_circuits() {
        let huge = vec![b'x'; MAX_STRING_SIZE + 1];
        let column = StringColumn::from_rows([&b"x"[..], &b"xx"[..]]);
        assert_eq!(
            constant_vector::<Ascii<false>>(&column, &huge),
            vec![1.0, 1.0]
        );
    }

    #[test]
    fn case_insensitive_ascii() {
        let d = constant_constant::<Ascii<true>>(b"HeLLo WoRLD", b"hello world");
        assert_eq!(d, 0.0);
        let d = constant_constant::<Ascii<false>>(b"HELLO", b"hello");
        assert_eq!(d, 1.0);
    }

    #[test]
    fn case_insensitive_utf8_folds_common_cyrillic() {
        // Every letter here is in the U+0410..U+042F range bit-5 folding
        // handles.
        let d = constant_constant::<Utf8<true>>("ПАПКА".as_bytes(), "папка".as_bytes());
        assert_eq!(d, 0.0);
    }

    #[test]
    fn empty_needle_against_text_is_one() {
        assert_eq!(dist(b"", b"abcdef"), 1.0);
    }

    #[test]
    fn empty_haystack_against_needle_is_one() {
        assert_eq!(dist(b"abcdef", b""), 1.0);
    }
}
