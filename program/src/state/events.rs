use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingRecord {
    pub ts: i64,
    pub vesting_account: Pubkey,
    pub action: VestingAction,
    /// Tokens moved by the action. Zero for ChangeDestination
    pub amount: u64,
    /// Destination token account after the action
    pub destination: Pubkey,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VestingAction {
    Create,
    Unlock,
    ChangeDestination,
}
