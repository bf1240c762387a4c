//! Solana's compact-u16 length encoding ("shortvec").
//!
//! Every variable-length array in the wire format is prefixed with its
//! length in this encoding:
//!
//! ```text
//! 0x0000..=0x007f  -> 1 byte
//! 0x0080..=0x3fff  -> 2 bytes
//! 0x4000..=0xffff  -> 3 bytes
//! ```
//!
//! Each byte carries 7 bits, least significant group first, with the high
//! bit set on every byte except the last.

use crate::error::SolError;

/// Encode a `u16` value in Solana's compact-u16 format.
pub fn encode_length(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// Convert a collection length to `u16`, failing instead of truncating.
pub fn checked_len(len: usize) -> Result<u16, SolError> {
    u16::try_from(len).map_err(|_| {
        SolError::Serialization(format!("array of {len} items exceeds compact-u16 range"))
    })
}

/// Write a compact array: the length prefix followed by each item's encoding.
pub fn encode_array<T, F>(out: &mut Vec<u8>, items: &[T], mut each: F) -> Result<(), SolError>
where
    F: FnMut(&mut Vec<u8>, &T) -> Result<(), SolError>,
{
    out.extend_from_slice(&encode_length(checked_len(items.len())?));
    for item in items {
        each(out, item)?;
    }
    Ok(())
}

/// Write a compact array of raw bytes.
pub fn encode_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> Result<(), SolError> {
    out.extend_from_slice(&encode_length(checked_len(bytes.len())?));
    out.extend_from_slice(bytes);
    Ok(())
}

/// Decode a compact-u16 value from the front of `data`.
///
/// Returns `(value, bytes_consumed)`.
pub fn decode_length(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;
    let mut consumed = 0usize;

    loop {
        let byte = *data.get(consumed).ok_or_else(|| {
            SolError::Serialization("unexpected end of data while decoding compact-u16".into())
        })?;
        value |= ((byte & 0x7f) as u32) << (7 * consumed);
        consumed += 1;

        if byte & 0x80 == 0 {
            break;
        }
        if consumed == 3 {
            return Err(SolError::Serialization(
                "compact-u16 longer than 3 bytes".into(),
            ));
        }
    }

    let value = u16::try_from(value)
        .map_err(|_| SolError::Serialization("compact-u16 value overflow".into()))?;
    Ok((value, consumed))
}
