//! Fixed-width little-endian encoding shared by the instruction payloads and
//! the vesting account layout.
//!
//! Decoding never pads or truncates: a buffer must have exactly the width of
//! the value it holds.

use solana_program::pubkey::Pubkey;

use crate::{constants::PUBKEY_LEN, error::VestingError};

pub fn pack_u64(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}

pub fn unpack_u64(src: &[u8]) -> Result<u64, VestingError> {
    let bytes: [u8; 8] = src.try_into().map_err(|_| VestingError::EncodingError)?;
    Ok(u64::from_le_bytes(bytes))
}

/// Narrows `value` to four bytes, failing when it does not fit.
pub fn pack_u32(value: u64) -> Result<[u8; 4], VestingError> {
    let narrowed = u32::try_from(value).map_err(|_| VestingError::EncodingError)?;
    Ok(narrowed.to_le_bytes())
}

pub fn unpack_u32(src: &[u8]) -> Result<u32, VestingError> {
    let bytes: [u8; 4] = src.try_into().map_err(|_| VestingError::EncodingError)?;
    Ok(u32::from_le_bytes(bytes))
}

pub fn unpack_pubkey(src: &[u8]) -> Result<Pubkey, VestingError> {
    let bytes: [u8; PUBKEY_LEN] = src.try_into().map_err(|_| VestingError::EncodingError)?;
    Ok(Pubkey::new_from_array(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_is_little_endian() {
        assert_eq!(pack_u64(1), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pack_u64(0x0102), [2, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(unpack_u64(&[0xff; 8]).unwrap(), u64::MAX);
    }

    #[test]
    fn test_decode_rejects_wrong_width() {
        assert_eq!(unpack_u64(&[0u8; 7]), Err(VestingError::EncodingError));
        assert_eq!(unpack_u64(&[0u8; 9]), Err(VestingError::EncodingError));
        assert_eq!(unpack_u32(&[0u8; 3]), Err(VestingError::EncodingError));
        assert_eq!(unpack_u32(&[0u8; 8]), Err(VestingError::EncodingError));
        assert_eq!(unpack_pubkey(&[0u8; 31]), Err(VestingError::EncodingError));
    }

    #[test]
    fn test_u32_encode_checks_width() {
        assert_eq!(pack_u32(7).unwrap(), [7, 0, 0, 0]);
        assert_eq!(pack_u32(u32::MAX as u64).unwrap(), [0xff; 4]);
        assert_eq!(
            pack_u32(u32::MAX as u64 + 1),
            Err(VestingError::EncodingError)
        );
        assert_eq!(unpack_u32(&pack_u32(123_456).unwrap()).unwrap(), 123_456);
    }

    #[test]
    fn test_pubkey_bytes_are_copied_verbatim() {
        let key = Pubkey::new_unique();
        assert_eq!(unpack_pubkey(key.as_ref()).unwrap(), key);
    }
}
