use solana_program::{
    instruction::{AccountMeta, Instruction},
    msg,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::{
    codec::{pack_u64, unpack_pubkey, unpack_u64},
    constants::{
        CHANGE_DESTINATION_ACCOUNTS_LEN, CREATE_FIXED_LEN, CREATE_TAG, INIT_DATA_LEN, INIT_TAG,
        SCHEDULE_LEN, SEED_LEN, UNLOCK_ACCOUNTS_LEN,
    },
    error::VestingError,
    resolver::{resolve_contract, ResolvedContract, VestingSeed},
    state::{unpack_schedules, ContractInfo, VestingSchedule},
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VestingInstruction {
    /// Allocates the vesting account for `number_of_schedules` tranches.
    /// Accounts:
    /// - [] System Program
    /// - [signer writable] Payer
    /// - [writable] Vesting Account (PDA)
    Init {
        seeds: VestingSeed,
        number_of_schedules: u64,
    },

    /// Funds the vault and writes the vesting schedule.
    /// Accounts:
    /// - [] SPL Token Program
    /// - [writable] Vesting Account (PDA)
    /// - [writable] Vesting Token Account (vault)
    /// - [signer] Source Token Account Owner
    /// - [writable] Source Token Account
    Create {
        seeds: VestingSeed,
        mint_address: Pubkey,
        destination_token_address: Pubkey,
        schedules: Vec<VestingSchedule>,
    },

    /// Pays every due tranche to the destination. Callable by anyone.
    /// Accounts:
    /// - [] SPL Token Program
    /// - [] Clock Sysvar
    /// - [writable] Vesting Account (PDA)
    /// - [writable] Vesting Token Account (vault)
    /// - [writable] Destination Token Account
    Unlock { seeds: VestingSeed },

    /// Points the contract at a new destination token account.
    /// Accounts:
    /// - [writable] Vesting Account (PDA)
    /// - [] Current Destination Token Account
    /// - [signer] Current Destination Token Account Owner
    /// - [] New Destination Token Account
    ChangeDestination { seeds: VestingSeed },
}

impl VestingInstruction {
    /// Decodes a payload. Unlock and ChangeDestination carry only the seed and
    /// are told apart by the number of accounts passed with them.
    pub fn unpack(input: &[u8], accounts_len: usize) -> Result<Self, ProgramError> {
        use VestingError::InvalidInstruction;

        if input.len() == SEED_LEN {
            let seeds = unpack_seed(input)?;
            return match accounts_len {
                UNLOCK_ACCOUNTS_LEN => Ok(Self::Unlock { seeds }),
                CHANGE_DESTINATION_ACCOUNTS_LEN => Ok(Self::ChangeDestination { seeds }),
                _ => {
                    msg!("Unexpected account count for seed-only instruction: {}", accounts_len);
                    Err(InvalidInstruction.into())
                }
            };
        }

        let (&tag, rest) = input.split_first().ok_or(InvalidInstruction)?;
        match tag {
            INIT_TAG => {
                if input.len() != INIT_DATA_LEN {
                    return Err(InvalidInstruction.into());
                }
                let (seeds, number_of_schedules) = rest.split_at(SEED_LEN);
                Ok(Self::Init {
                    seeds: unpack_seed(seeds)?,
                    number_of_schedules: unpack_u64(number_of_schedules)?,
                })
            }
            CREATE_TAG => {
                if input.len() <= CREATE_FIXED_LEN
                    || (input.len() - CREATE_FIXED_LEN) % SCHEDULE_LEN != 0
                {
                    return Err(InvalidInstruction.into());
                }
                let (seeds, rest) = rest.split_at(SEED_LEN);
                let (mint_address, rest) = rest.split_at(32);
                let (destination_token_address, schedules) = rest.split_at(32);
                Ok(Self::Create {
                    seeds: unpack_seed(seeds)?,
                    mint_address: unpack_pubkey(mint_address)?,
                    destination_token_address: unpack_pubkey(destination_token_address)?,
                    schedules: unpack_schedules(schedules)?,
                })
            }
            _ => {
                msg!("Invalid instruction variant: {}", tag);
                Err(InvalidInstruction.into())
            }
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::Init {
                seeds,
                number_of_schedules,
            } => {
                let mut buf = Vec::with_capacity(INIT_DATA_LEN);
                buf.push(INIT_TAG);
                buf.extend_from_slice(seeds.as_bytes());
                buf.extend_from_slice(&pack_u64(*number_of_schedules));
                buf
            }
            Self::Create {
                seeds,
                mint_address,
                destination_token_address,
                schedules,
            } => {
                let mut buf =
                    Vec::with_capacity(CREATE_FIXED_LEN + schedules.len() * SCHEDULE_LEN);
                buf.push(CREATE_TAG);
                buf.extend_from_slice(seeds.as_bytes());
                buf.extend_from_slice(mint_address.as_ref());
                buf.extend_from_slice(destination_token_address.as_ref());
                for schedule in schedules {
                    let mut packed = [0u8; SCHEDULE_LEN];
                    schedule.pack_into_slice(&mut packed);
                    buf.extend_from_slice(&packed);
                }
                buf
            }
            Self::Unlock { seeds } | Self::ChangeDestination { seeds } => seeds.as_bytes().to_vec(),
        }
    }
}

fn unpack_seed(input: &[u8]) -> Result<VestingSeed, VestingError> {
    let seed: [u8; SEED_LEN] = input
        .try_into()
        .map_err(|_| VestingError::EncodingError)?;
    Ok(VestingSeed(seed))
}

/// Creates an `Init` instruction.
pub fn init(
    system_program_id: &Pubkey,
    vesting_program_id: &Pubkey,
    payer_key: &Pubkey,
    vesting_account: &Pubkey,
    seeds: VestingSeed,
    number_of_schedules: u64,
) -> Result<Instruction, ProgramError> {
    let data = VestingInstruction::Init {
        seeds,
        number_of_schedules,
    }
    .pack();
    let accounts = vec![
        AccountMeta::new_readonly(*system_program_id, false),
        AccountMeta::new(*payer_key, true),
        AccountMeta::new(*vesting_account, false),
    ];
    Ok(Instruction {
        program_id: *vesting_program_id,
        accounts,
        data,
    })
}

/// Creates a `Create` instruction.
#[allow(clippy::too_many_arguments)]
pub fn create(
    vesting_program_id: &Pubkey,
    token_program_id: &Pubkey,
    vesting_account_key: &Pubkey,
    vesting_token_account_key: &Pubkey,
    source_token_account_owner_key: &Pubkey,
    source_token_account_key: &Pubkey,
    destination_token_account_key: &Pubkey,
    mint_address: &Pubkey,
    schedules: Vec<VestingSchedule>,
    seeds: VestingSeed,
) -> Result<Instruction, ProgramError> {
    let data = VestingInstruction::Create {
        mint_address: *mint_address,
        seeds,
        destination_token_address: *destination_token_account_key,
        schedules,
    }
    .pack();
    let accounts = vec![
        AccountMeta::new_readonly(*token_program_id, false),
        AccountMeta::new(*vesting_account_key, false),
        AccountMeta::new(*vesting_token_account_key, false),
        AccountMeta::new_readonly(*source_token_account_owner_key, true),
        AccountMeta::new(*source_token_account_key, false),
    ];
    Ok(Instruction {
        program_id: *vesting_program_id,
        accounts,
        data,
    })
}

/// Creates an `Unlock` instruction.
pub fn unlock(
    vesting_program_id: &Pubkey,
    token_program_id: &Pubkey,
    vesting_account_key: &Pubkey,
    vesting_token_account_key: &Pubkey,
    destination_token_account_key: &Pubkey,
    seeds: VestingSeed,
) -> Result<Instruction, ProgramError> {
    let data = VestingInstruction::Unlock { seeds }.pack();
    let accounts = vec![
        AccountMeta::new_readonly(*token_program_id, false),
        AccountMeta::new_readonly(sysvar::clock::id(), false),
        AccountMeta::new(*vesting_account_key, false),
        AccountMeta::new(*vesting_token_account_key, false),
        AccountMeta::new(*destination_token_account_key, false),
    ];
    Ok(Instruction {
        program_id: *vesting_program_id,
        accounts,
        data,
    })
}

/// Creates a `ChangeDestination` instruction.
pub fn change_destination(
    vesting_program_id: &Pubkey,
    vesting_account_key: &Pubkey,
    current_destination_token_account_owner: &Pubkey,
    current_destination_token_account: &Pubkey,
    target_destination_token_account: &Pubkey,
    seeds: VestingSeed,
) -> Result<Instruction, ProgramError> {
    let data = VestingInstruction::ChangeDestination { seeds }.pack();
    let accounts = vec![
        AccountMeta::new(*vesting_account_key, false),
        AccountMeta::new_readonly(*current_destination_token_account, false),
        AccountMeta::new_readonly(*current_destination_token_account_owner, true),
        AccountMeta::new_readonly(*target_destination_token_account, false),
    ];
    Ok(Instruction {
        program_id: *vesting_program_id,
        accounts,
        data,
    })
}

/// `init` against the system program the runtime ships with.
pub fn init_with_system_program(
    vesting_program_id: &Pubkey,
    payer_key: &Pubkey,
    vesting_account: &Pubkey,
    seeds: VestingSeed,
    number_of_schedules: u64,
) -> Result<Instruction, ProgramError> {
    init(
        &system_program::id(),
        vesting_program_id,
        payer_key,
        vesting_account,
        seeds,
        number_of_schedules,
    )
}

/// Everything needed to open a contract in one transaction: `Init`, the
/// vault's associated token account and `Create`. Without an explicit source
/// the owner's associated token account for `mint_address` is used.
#[allow(clippy::too_many_arguments)]
pub fn create_vesting_instructions(
    vesting_program_id: &Pubkey,
    payer_key: &Pubkey,
    seed: &[u8],
    source_token_account_owner_key: &Pubkey,
    source_token_account_key: Option<&Pubkey>,
    destination_token_account_key: &Pubkey,
    mint_address: &Pubkey,
    schedules: Vec<VestingSchedule>,
) -> Result<(ResolvedContract, Vec<Instruction>), ProgramError> {
    let contract = resolve_contract(seed, vesting_program_id, mint_address)?;
    let source_token_account_key = source_token_account_key.copied().unwrap_or_else(|| {
        get_associated_token_address(source_token_account_owner_key, mint_address)
    });

    let instructions = vec![
        init_with_system_program(
            vesting_program_id,
            payer_key,
            &contract.vesting_account,
            contract.seed,
            schedules.len() as u64,
        )?,
        create_associated_token_account(
            payer_key,
            &contract.vesting_account,
            mint_address,
            &spl_token::id(),
        ),
        create(
            vesting_program_id,
            &spl_token::id(),
            &contract.vesting_account,
            &contract.vault,
            source_token_account_owner_key,
            &source_token_account_key,
            destination_token_account_key,
            mint_address,
            schedules,
            contract.seed,
        )?,
    ];
    Ok((contract, instructions))
}

fn created_contract(vesting_account_data: &[u8]) -> Result<ContractInfo, ProgramError> {
    ContractInfo::unpack(vesting_account_data)?.ok_or_else(|| {
        msg!("Vesting contract is not initialized");
        VestingError::MalformedAccountError.into()
    })
}

/// `Unlock` paying the destination recorded in the fetched vesting account.
pub fn unlock_contract(
    vesting_program_id: &Pubkey,
    contract: &ResolvedContract,
    vesting_account_data: &[u8],
) -> Result<Instruction, ProgramError> {
    let info = created_contract(vesting_account_data)?;
    unlock(
        vesting_program_id,
        &spl_token::id(),
        &contract.vesting_account,
        &contract.vault,
        &info.header.destination_address,
        contract.seed,
    )
}

/// `ChangeDestination` to the associated token account of `new_owner_key`
/// for the contract mint. The current owner must sign.
pub fn change_destination_to_owner(
    vesting_program_id: &Pubkey,
    contract: &ResolvedContract,
    vesting_account_data: &[u8],
    current_destination_token_account_owner: &Pubkey,
    new_owner_key: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let info = created_contract(vesting_account_data)?;
    let new_destination =
        get_associated_token_address(new_owner_key, &info.header.mint_address);
    change_destination(
        vesting_program_id,
        &contract.vesting_account,
        current_destination_token_account_owner,
        &info.header.destination_address,
        &new_destination,
        contract.seed,
    )
}
