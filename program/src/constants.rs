// LAYOUT
pub const PUBKEY_LEN: usize = 32;
pub const HEADER_LEN: usize = 65;
pub const SCHEDULE_LEN: usize = 16;

// SEEDS
pub const SEED_LEN: usize = 32;
/// Bytes of a seed that feed the address derivation. The last slot holds the bump.
pub const SIGNIFICANT_SEED_LEN: usize = 31;
pub const MAX_BUMP_ATTEMPTS: usize = 256;

// INSTRUCTION SHAPES
pub const INIT_TAG: u8 = 0;
pub const CREATE_TAG: u8 = 1;
pub const INIT_DATA_LEN: usize = 1 + SEED_LEN + 8;
pub const CREATE_FIXED_LEN: usize = 1 + SEED_LEN + PUBKEY_LEN + PUBKEY_LEN;
pub const UNLOCK_ACCOUNTS_LEN: usize = 5;
pub const CHANGE_DESTINATION_ACCOUNTS_LEN: usize = 4;
