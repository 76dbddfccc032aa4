//! Borsh wire codec for the Let's Cook program's accounts and instructions.
//!
//! Records derive `BorshSerialize`/`BorshDeserialize`; this module only adapts borsh to
//! the crate's error type. Decoding reports how many bytes were consumed, so a record
//! at the front of an over-allocated account can be read without knowing its size.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::CodecError;

/// Records whose encoding has the same length for every value.
pub trait FixedLen {
    const LEN: usize;
}

pub fn to_bytes<T: BorshSerialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    Ok(borsh::to_vec(value)?)
}

/// Decodes a `T` from the front of `data`, returning it with the number of bytes read.
/// Trailing bytes are left alone.
pub fn from_bytes<T: BorshDeserialize>(data: &[u8]) -> Result<(T, usize), CodecError> {
    let mut rest = data;
    let value = T::deserialize(&mut rest)?;
    Ok((value, data.len() - rest.len()))
}

/// Like [`from_bytes`] but the record must span the whole buffer.
pub fn from_bytes_exact<T: BorshDeserialize>(data: &[u8]) -> Result<T, CodecError> {
    let (value, consumed) = from_bytes(data)?;
    if consumed != data.len() {
        return Err(CodecError::TrailingBytes {
            remaining: data.len() - consumed,
        });
    }
    Ok(value)
}
