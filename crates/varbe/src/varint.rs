// crates/varbe/src/varint.rs
//
// Big-endian varint: 7 data bits per byte with the high bit as a
// continuation flag, most significant group first. A 9th byte, when
// present, carries a full 8 unflagged bits, so 8*7 + 8 = 64 bits fit
// in at most 9 bytes.

use crate::error::{Result, VarbeError};

/// Longest possible encoding of a u64.
pub const MAX_VARINT_LEN: usize = 9;

const FLAG: u8 = 0x80;
const DATA: u8 = 0x7f;

/// Write `v` as a minimal varint starting at `p[0]`. Returns the number
/// of bytes written (1..=9).
///
/// Requirements:
/// - `p.len()` must be at least [`MAX_VARINT_LEN`]; the hot path does no
///   length check of its own (debug builds assert).
#[inline]
pub fn put_varint(p: &mut [u8], v: u64) -> usize {
    debug_assert!(p.len() >= MAX_VARINT_LEN);
    if v <= 0x7f {
        p[0] = v as u8;
        return 1;
    }
    if v <= 0x3fff {
        p[0] = (((v >> 7) & 0x7f) as u8) | FLAG;
        p[1] = (v & 0x7f) as u8;
        return 2;
    }
    put_varint64(p, v)
}

// 3..=9 byte encodings. Split out so the 1- and 2-byte fast paths above
// stay small enough to inline.
fn put_varint64(p: &mut [u8], mut v: u64) -> usize {
    if v & 0xff00_0000_0000_0000 != 0 {
        // Bits 56..=63 are set: irregular 9-byte form. The last byte holds
        // the low 8 bits raw, the remaining 56 bits become 8 flagged groups.
        p[8] = v as u8;
        v >>= 8;
        for i in (0..8).rev() {
            p[i] = ((v & 0x7f) as u8) | FLAG;
            v >>= 7;
        }
        return 9;
    }

    // Accumulate 7-bit groups low-to-high, then emit most significant first.
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut n = 0;
    loop {
        buf[n] = ((v & 0x7f) as u8) | FLAG;
        n += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    // buf[0] is the least significant group; written last, it terminates.
    buf[0] &= DATA;
    for i in 0..n {
        p[i] = buf[n - 1 - i];
    }
    n
}

/// Read a varint starting at `p[0]`. Returns the decoded value and the
/// number of bytes consumed (1..=9).
///
/// Non-minimal encodings are not rejected: any byte pattern decodes to
/// some value. See [`read_varint`] for the length-checked variant.
///
/// Requirements:
/// - `p.len()` must be at least [`MAX_VARINT_LEN`]; up to 9 bytes may be
///   read regardless of the true encoded length (debug builds assert).
#[inline]
pub fn get_varint(p: &[u8]) -> (u64, usize) {
    debug_assert!(p.len() >= MAX_VARINT_LEN);
    let b0 = p[0];
    if b0 & FLAG == 0 {
        return (b0 as u64, 1);
    }
    let b1 = p[1];
    if b1 & FLAG == 0 {
        return ((((b0 & DATA) as u64) << 7) | b1 as u64, 2);
    }

    let mut v = (((b0 & DATA) as u64) << 7) | (b1 & DATA) as u64;
    for i in 2..MAX_VARINT_LEN - 1 {
        let b = p[i];
        v = (v << 7) | (b & DATA) as u64;
        if b & FLAG == 0 {
            return (v, i + 1);
        }
    }
    // 9th byte: all 8 bits are payload, no flag to check.
    ((v << 8) | p[8] as u64, 9)
}

/// Exact number of bytes [`put_varint`] writes for `v`.
pub fn varint_len(v: u64) -> usize {
    if v & 0xff00_0000_0000_0000 != 0 {
        return 9;
    }
    let mut n = 1;
    let mut v = v >> 7;
    while v != 0 {
        n += 1;
        v >>= 7;
    }
    n
}

/// Encode `v` onto the end of `buf`.
pub fn append_varint(buf: &mut Vec<u8>, v: u64) {
    let mut tmp = [0u8; MAX_VARINT_LEN];
    let n = put_varint(&mut tmp, v);
    buf.extend_from_slice(&tmp[..n]);
}

/// Length-checked decode from a slice of any length.
///
/// Unlike [`get_varint`] this never reads past `p.len()`; it returns
/// [`VarbeError::Truncated`] when the slice ends while continuation flags
/// are still set.
pub fn read_varint(p: &[u8]) -> Result<(u64, usize)> {
    let mut v: u64 = 0;
    for (i, &b) in p.iter().take(MAX_VARINT_LEN).enumerate() {
        if i == MAX_VARINT_LEN - 1 {
            return Ok(((v << 8) | b as u64, MAX_VARINT_LEN));
        }
        v = (v << 7) | (b & DATA) as u64;
        if b & FLAG == 0 {
            return Ok((v, i + 1));
        }
    }
    Err(VarbeError::Truncated(p.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_rejects_truncated_input() {
        assert_eq!(read_varint(&[]), Err(VarbeError::Truncated(0)));
        assert_eq!(read_varint(&[0x80]), Err(VarbeError::Truncated(1)));
        assert_eq!(
            read_varint(&[0xff; 8]),
            Err(VarbeError::Truncated(8))
        );
    }

    #[test]
    fn read_accepts_exact_length_input() {
        assert_eq!(read_varint(&[0x0a]), Ok((10, 1)));
        assert_eq!(read_varint(&[0x82, 0x24]), Ok((292, 2)));
        assert_eq!(read_varint(&[0xff; 9]), Ok((u64::MAX, 9)));
    }

    #[test]
    fn append_matches_put() {
        for &v in &[0u64, 0x7f, 0x80, 0x3fff, 0x4000, 1 << 56, u64::MAX] {
            let mut fixed = [0u8; MAX_VARINT_LEN];
            let n = put_varint(&mut fixed, v);

            let mut grown = vec![0xaa]; // pre-existing content stays put
            append_varint(&mut grown, v);
            assert_eq!(&grown[1..], &fixed[..n]);
        }
    }
}
