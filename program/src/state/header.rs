use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use serde::Serialize;
use solana_program::{
    program_error::ProgramError,
    program_pack::{IsInitialized, Pack, Sealed},
    pubkey::Pubkey,
};
use static_assertions::const_assert_eq;

use crate::{
    codec::unpack_pubkey,
    constants::{HEADER_LEN, PUBKEY_LEN},
    error::VestingError,
};

const_assert_eq!(HEADER_LEN, 2 * PUBKEY_LEN + 1);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VestingScheduleHeader {
    /// Token account that receives unlocked tranches
    pub destination_address: Pubkey,
    /// Mint of the vested token
    pub mint_address: Pubkey,
    /// Set by Create. Readers treat a contract without it as absent
    pub is_initialized: bool,
}

impl Sealed for VestingScheduleHeader {}

impl IsInitialized for VestingScheduleHeader {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Pack for VestingScheduleHeader {
    const LEN: usize = HEADER_LEN;

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, HEADER_LEN];
        let (destination_dst, mint_dst, is_initialized_dst) =
            mut_array_refs![dst, PUBKEY_LEN, PUBKEY_LEN, 1];
        destination_dst.copy_from_slice(self.destination_address.as_ref());
        mint_dst.copy_from_slice(self.mint_address.as_ref());
        is_initialized_dst[0] = self.is_initialized as u8;
    }

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        if src.len() != HEADER_LEN {
            return Err(VestingError::MalformedAccountError.into());
        }
        let src = array_ref![src, 0, HEADER_LEN];
        let (destination, mint, is_initialized) = array_refs![src, PUBKEY_LEN, PUBKEY_LEN, 1];
        Ok(Self {
            destination_address: unpack_pubkey(destination)?,
            mint_address: unpack_pubkey(mint)?,
            is_initialized: is_initialized[0] != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = VestingScheduleHeader {
            destination_address: Pubkey::new_unique(),
            mint_address: Pubkey::new_unique(),
            is_initialized: true,
        };
        let mut packed = [0u8; HEADER_LEN];
        VestingScheduleHeader::pack(header, &mut packed).unwrap();

        assert_eq!(&packed[..32], header.destination_address.as_ref());
        assert_eq!(&packed[32..64], header.mint_address.as_ref());
        assert_eq!(packed[64], 1);
        assert_eq!(VestingScheduleHeader::unpack(&packed).unwrap(), header);
    }

    #[test]
    fn test_any_non_zero_flag_is_initialized() {
        let mut packed = [0u8; HEADER_LEN];
        packed[64] = 7;
        assert!(VestingScheduleHeader::unpack_from_slice(&packed)
            .unwrap()
            .is_initialized);

        packed[64] = 0;
        let header = VestingScheduleHeader::unpack_unchecked(&packed).unwrap();
        assert!(!header.is_initialized);
        assert_eq!(
            VestingScheduleHeader::unpack(&packed),
            Err(ProgramError::UninitializedAccount)
        );
    }

    #[test]
    fn test_header_rejects_short_buffer() {
        assert_eq!(
            VestingScheduleHeader::unpack_from_slice(&[1u8; 64]),
            Err(VestingError::MalformedAccountError.into())
        );
    }
}
