//! gramdist: n-gram string similarity distances over a reusable counter
//! table.
//!
//! Given a fixed needle and any number of haystack rows, the crate scores
//! each pair with a similarity distance in `[0.0, 1.0]`: `0.0` when the
//! n-gram multisets coincide, `1.0` when they share nothing (or a row
//! exceeds the [`MAX_STRING_SIZE`] fast-path bound).
//!
//! # Which function do I want?
//!
//! | Function | Mode | N |
//! |----------|------|---|
//! | [`ngram_distance`] | ASCII, case-sensitive | 4 |
//! | [`ngram_distance_case_insensitive`] | ASCII, case-insensitive | 4 |
//! | [`ngram_distance_utf8`] | UTF-8, case-sensitive | 3 |
//! | [`ngram_distance_case_insensitive_utf8`] | UTF-8, case-insensitive | 3 |
//!
//! The UTF-8 case folding clears bit 5 of every code point byte: exact for
//! ASCII and the common half of Cyrillic, approximate elsewhere.
//!
//! # How it works
//!
//! One pass over the needle fills a 65,536-slot table of 16-bit counters,
//! keyed by a CRC32-C hash of each n-gram. Each haystack row then walks
//! its own n-grams once, consuming matching slots and counting the running
//! multiset symmetric difference; a per-row trail of visited buckets is
//! replayed afterwards so the table returns to its post-needle state
//! without rescanning the needle. Scoring a row allocates nothing unless
//! the row exceeds 256 bytes, in which case the trail spills to one heap
//! buffer.
//!
//! ```
//! use gramdist::{ngram_distance, vector_constant, Ascii, StringColumn};
//!
//! assert_eq!(ngram_distance(b"winter", b"winter"), 0.0);
//!
//! // Columnar path: one table serves every row.
//! let column = StringColumn::from_rows([&b"winter"[..], &b"winters"[..], &b"summer"[..]]);
//! let scores = vector_constant::<Ascii<false>>(&column, b"winter");
//! assert_eq!(scores[0], 0.0);
//! assert!(scores[1] > 0.0 && scores[1] < scores[2]);
//! ```
//!
//! Batch callers embedding the crate into an engine go through
//! [`FunctionFactory`] and [`register_string_similarity`], which expose the
//! same four functions under their engine names (`ngramDistance`, ...).

pub mod batch;
pub mod column;
pub mod crc32;
pub mod error;
pub mod gram;
pub mod registry;
pub mod scorer;
pub mod stats;

pub use batch::{constant_constant, constant_vector, vector_constant, MAX_STRING_SIZE};
pub use column::StringColumn;
pub use error::{GramError, Result};
pub use gram::{Ascii, GramScheme, Utf8, PAD};
pub use registry::{register_string_similarity, FunctionFactory, SimilarityFunction};
pub use stats::GramStats;

/// 4-gram distance over raw bytes, case-sensitive.
pub fn ngram_distance(needle: &[u8], haystack: &[u8]) -> f32 {
    batch::constant_constant::<Ascii<false>>(needle, haystack)
}

/// 4-gram distance over raw bytes, ASCII-lowercased first.
pub fn ngram_distance_case_insensitive(needle: &[u8], haystack: &[u8]) -> f32 {
    batch::constant_constant::<Ascii<true>>(needle, haystack)
}

/// 3-gram distance over UTF-8 code points, case-sensitive.
pub fn ngram_distance_utf8(needle: &[u8], haystack: &[u8]) -> f32 {
    batch::constant_constant::<Utf8<false>>(needle, haystack)
}

/// 3-gram distance over UTF-8 code points with approximate case folding.
pub fn ngram_distance_case_insensitive_utf8(needle: &[u8], haystack: &[u8]) -> f32 {
    batch::constant_constant::<Utf8<true>>(needle, haystack)
}
