//! n-gram schemes: sliding-window code point readers and their hashers.
//!
//! A [`GramScheme`] fixes the n-gram width, the decoded unit type, how a
//! window of units is refilled from raw bytes, and how a window position is
//! hashed to a 16-bit counter bucket. The four user-facing distance
//! functions are four monomorphizations of [`Ascii`] and [`Utf8`] over the
//! case-insensitive flag.
//!
//! Readers never decode to scalar values. ASCII treats each byte as one
//! unit; UTF-8 packs the raw bytes of one code point little-endian into a
//! `u32`, clamping the declared sequence length at the end of input so any
//! byte soup still yields units.

use crate::crc32::crc32c_u64;

/// Bytes every input buffer must stay readable past its logical end.
///
/// Refills copy in `PAD`-sized gulps without checking the remaining length;
/// the drivers and [`crate::column::StringColumn`] own this guarantee.
pub const PAD: usize = 16;

/// Window slots, sized for the widest scheme (ASCII, N = 4). The UTF-8
/// scheme uses the first `PAD` of them.
pub(crate) const WINDOW_LEN: usize = PAD + 4 - 1;

/// One n-gram flavor: width, unit type, reader and hasher.
pub trait GramScheme {
    /// n-gram width in units.
    const N: usize;

    /// One fixed-width decoded position: a byte in ASCII mode, the raw
    /// bytes of one UTF-8 code point packed into the low bytes of a `u32`
    /// in UTF-8 mode.
    type Unit: Copy + Default;

    /// Refill `window` from `data[*pos..end]`, carrying the previous tail.
    ///
    /// On entry `window[0..N-1]` holds the tail of the previous fill
    /// (zeros before the first call). Returns the number of valid
    /// positions; callers form n-grams `window[i..i + N]` for
    /// `i + N <= count`. `data` must stay readable through `end + PAD`.
    fn read_units(window: &mut [Self::Unit], pos: &mut usize, data: &[u8], end: usize) -> usize;

    /// 16-bit bucket index for the n-gram at `window[i..i + N]`.
    fn hash(window: &[Self::Unit], i: usize) -> u16;
}

/// Byte-per-unit 4-grams, optionally ASCII-lowercased.
pub struct Ascii<const CASE_INSENSITIVE: bool>;

impl<const CI: bool> GramScheme for Ascii<CI> {
    const N: usize = 4;
    type Unit = u8;

    #[inline(always)]
    fn read_units(window: &mut [u8], pos: &mut usize, data: &[u8], end: usize) -> usize {
        // Bytes committed per refill; the last N-1 of the PAD-byte gulp are
        // re-read next time so grams can straddle the boundary.
        const SHIFT: usize = PAD - 4 + 1;
        window.copy_within(SHIFT..SHIFT + 3, 0);
        window[3..3 + PAD].copy_from_slice(&data[*pos..*pos + PAD]);
        if CI {
            for byte in &mut window[3..3 + SHIFT] {
                byte.make_ascii_lowercase();
            }
        }
        *pos += SHIFT;
        if *pos > end {
            PAD - (*pos - end)
        } else {
            PAD
        }
    }

    #[inline(always)]
    fn hash(window: &[u8], i: usize) -> u16 {
        let gram = u32::from_le_bytes([window[i], window[i + 1], window[i + 2], window[i + 3]]);
        (crc32c_u64(u32::MAX, u64::from(gram)) & 0xffff) as u16
    }
}

/// Code-point-per-unit 3-grams over raw UTF-8 bytes, optionally case
/// folded by clearing bit 5 of every byte.
///
/// The folding is approximate: it lowercases ASCII and the first half of
/// the Cyrillic alphabet and is a no-op or wrong elsewhere. True Unicode
/// lowercasing is far too expensive for this hot path.
pub struct Utf8<const CASE_INSENSITIVE: bool>;

/// Declared length of a UTF-8 sequence from its leading byte. Continuation
/// bytes and invalid leads resync as a single byte.
#[inline(always)]
fn utf8_seq_len(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

impl<const CI: bool> GramScheme for Utf8<CI> {
    const N: usize = 3;
    type Unit = u32;

    #[inline(always)]
    fn read_units(window: &mut [u32], pos: &mut usize, data: &[u8], end: usize) -> usize {
        const SHIFT: usize = PAD - 3 + 1;
        window.copy_within(SHIFT..SHIFT + 2, 0);
        let mut num = 2;
        while num < PAD && *pos < end {
            let len = utf8_seq_len(data[*pos]).min(end - *pos);
            let mut unit = 0u32;
            for (k, &byte) in data[*pos..*pos + len].iter().enumerate() {
                unit |= u32::from(byte) << (8 * k);
            }
            if CI {
                unit &= !0x2020_2020;
            }
            *pos += len;
            window[num] = unit;
            num += 1;
        }
        num
    }

    #[inline(always)]
    fn hash(window: &[u32], i: usize) -> u16 {
        let combined = (u64::from(window[i]) << 32) | u64::from(window[i + 1]);
        (crc32c_u64(window[i + 2], combined) & 0xffff) as u16
    }
}
