//! Deterministic addresses of a vesting contract and its token vault.
//!
//! A contract is located by a 32 byte seed: the first 31 bytes are chosen by
//! the client, the last one is the bump found by [`find_vesting_address`]. The
//! program re-derives the address from the full seed with
//! `create_program_address`, so the seed a client keeps must carry the bump.

use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::{
    constants::{MAX_BUMP_ATTEMPTS, SEED_LEN, SIGNIFICANT_SEED_LEN},
    error::VestingError,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VestingSeed(pub [u8; SEED_LEN]);

impl VestingSeed {
    pub fn bump(&self) -> u8 {
        self.0[SIGNIFICANT_SEED_LEN]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Signer seeds for `invoke_signed` on behalf of the vesting address.
    pub fn signer_seeds(&self) -> [&[u8]; 1] {
        [&self.0[..]]
    }
}

impl From<[u8; SEED_LEN]> for VestingSeed {
    fn from(seed: [u8; SEED_LEN]) -> Self {
        Self(seed)
    }
}

/// Addresses a client needs to talk to one vesting contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedContract {
    pub vesting_account: Pubkey,
    pub vault: Pubkey,
    pub seed: VestingSeed,
}

/// Searches bumps from 255 down to 0 for the first off-curve address derived
/// from the significant part of `seed`. Seeds shorter than 31 bytes are zero
/// padded; bytes past the 31st are ignored.
pub fn find_vesting_address(
    seed: &[u8],
    program_id: &Pubkey,
) -> Result<(Pubkey, VestingSeed), VestingError> {
    let mut seed_bytes = [0u8; SEED_LEN];
    let significant = seed.len().min(SIGNIFICANT_SEED_LEN);
    seed_bytes[..significant].copy_from_slice(&seed[..significant]);

    for bump in (0..MAX_BUMP_ATTEMPTS).rev() {
        let bump = bump as u8;
        if let Ok(address) = Pubkey::create_program_address(
            &[&seed_bytes[..SIGNIFICANT_SEED_LEN], &[bump]],
            program_id,
        ) {
            seed_bytes[SIGNIFICANT_SEED_LEN] = bump;
            return Ok((address, VestingSeed(seed_bytes)));
        }
    }
    Err(VestingError::InvalidProgramAddress)
}

/// Re-derives the vesting address from a complete seed, as the program does
/// when it validates its authority.
pub fn vesting_address(seed: &VestingSeed, program_id: &Pubkey) -> Result<Pubkey, VestingError> {
    Pubkey::create_program_address(&seed.signer_seeds(), program_id)
        .map_err(|_| VestingError::InvalidProgramAddress)
}

pub fn vault_address(vesting_account: &Pubkey, mint_address: &Pubkey) -> Pubkey {
    get_associated_token_address(vesting_account, mint_address)
}

pub fn resolve_contract(
    seed: &[u8],
    program_id: &Pubkey,
    mint_address: &Pubkey,
) -> Result<ResolvedContract, VestingError> {
    let (vesting_account, seed) = find_vesting_address(seed, program_id)?;
    Ok(ResolvedContract {
        vesting_account,
        vault: vault_address(&vesting_account, mint_address),
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let first = find_vesting_address(&[42u8; 32], &program_id).unwrap();
        let second = find_vesting_address(&[42u8; 32], &program_id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_find_program_address() {
        let program_id = Pubkey::new_unique();
        let seed = [7u8; 32];
        let (address, vesting_seed) = find_vesting_address(&seed, &program_id).unwrap();
        let (expected, bump) = Pubkey::find_program_address(&[&seed[..31]], &program_id);
        assert_eq!(address, expected);
        assert_eq!(vesting_seed.bump(), bump);
        assert_eq!(&vesting_seed.0[..31], &seed[..31]);
    }

    #[test]
    fn test_full_seed_rederives_address() {
        let program_id = Pubkey::new_unique();
        let (address, seed) = find_vesting_address(b"team allocation", &program_id).unwrap();
        assert_eq!(vesting_address(&seed, &program_id).unwrap(), address);
    }

    #[test]
    fn test_only_first_31_bytes_matter() {
        let program_id = Pubkey::new_unique();
        let mut a = [9u8; 32];
        let mut b = [9u8; 40];
        a[31] = 0;
        b[35] = 1;
        assert_eq!(
            find_vesting_address(&a, &program_id).unwrap(),
            find_vesting_address(&b, &program_id).unwrap()
        );

        let short = find_vesting_address(&[1, 2, 3], &program_id).unwrap();
        let mut padded = [0u8; 31];
        padded[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(short, find_vesting_address(&padded, &program_id).unwrap());
    }

    #[test]
    fn test_resolved_contract_uses_associated_vault() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let resolved = resolve_contract(&[3u8; 31], &program_id, &mint).unwrap();
        assert_eq!(
            resolved.vault,
            get_associated_token_address(&resolved.vesting_account, &mint)
        );
        assert_eq!(resolved, resolve_contract(&[3u8; 31], &program_id, &mint).unwrap());
    }
}
