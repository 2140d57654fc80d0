use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};
use spl_token::instruction::transfer;

use crate::{
    common::{check_token_program, load_token_account, log_accounts, log_data},
    constants::HEADER_LEN,
    error::VestingError,
    resolver::{vault_address, vesting_address, VestingSeed},
    state::{ContractInfo, VestingAction, VestingRecord, VestingSchedule, VestingScheduleHeader},
    validate,
};

pub fn create(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    seeds: VestingSeed,
    mint_address: Pubkey,
    destination_token_address: Pubkey,
    schedules: Vec<VestingSchedule>,
) -> ProgramResult {
    msg!("Creating vesting contract...");
    msg!("Mint: {}", mint_address);
    msg!("Destination: {}", destination_token_address);
    msg!("Schedules: {}", schedules.len());

    let account_info_iter = &mut accounts.iter();

    let token_program = next_account_info(account_info_iter)?;
    let vesting_account = next_account_info(account_info_iter)?;
    let vesting_token_account = next_account_info(account_info_iter)?;
    let source_token_account_owner = next_account_info(account_info_iter)?;
    let source_token_account = next_account_info(account_info_iter)?;

    log_accounts(&[
        (token_program, "Token Program"),
        (vesting_account, "Vesting Account"),
        (vesting_token_account, "Vesting Token Account"),
        (source_token_account_owner, "Source Token Account Owner"),
        (source_token_account, "Source Token Account"),
    ]);

    check_token_program(token_program)?;

    let vesting_pda = vesting_address(&seeds, program_id)?;
    validate!(
        vesting_pda == *vesting_account.key,
        VestingError::InvalidProgramAddress,
        "Invalid seeds for Vesting PDA"
    )?;

    validate!(
        vesting_account.owner == program_id,
        ProgramError::IllegalOwner,
        "Vesting account is not owned by the program, run Init first"
    )?;

    validate!(
        source_token_account_owner.is_signer,
        VestingError::Unauthorized,
        "Source token account owner should be a signer"
    )?;

    let capacity = ContractInfo::schedule_capacity(vesting_account.data_len())?;
    let header =
        VestingScheduleHeader::unpack_from_slice(&vesting_account.data.borrow()[..HEADER_LEN])?;
    validate!(
        !header.is_initialized,
        VestingError::AlreadyInitialized,
        "Vesting contract already exists"
    )?;

    validate!(
        capacity == schedules.len(),
        VestingError::MalformedAccountError,
        "Account holds {} schedules, {} given",
        capacity,
        schedules.len()
    )?;

    validate!(
        *vesting_token_account.key == vault_address(vesting_account.key, &mint_address),
        ProgramError::InvalidArgument,
        "The vesting token account should be the associated token account of the vesting account"
    )?;

    let vault = load_token_account(vesting_token_account)?;
    validate!(
        vault.owner == vesting_pda,
        ProgramError::InvalidArgument,
        "The vesting token account should be owned by the vesting account"
    )?;
    validate!(
        vault.delegate.is_none(),
        ProgramError::InvalidArgument,
        "The vesting token account should not have a delegate authority"
    )?;
    validate!(
        vault.close_authority.is_none(),
        ProgramError::InvalidArgument,
        "The vesting token account should not have a close authority"
    )?;
    validate!(
        vault.mint == mint_address,
        VestingError::InvalidMint,
        "Vault mint {} does not match {}",
        vault.mint,
        mint_address
    )?;

    let source = load_token_account(source_token_account)?;
    validate!(
        source.owner == *source_token_account_owner.key,
        VestingError::Unauthorized,
        "Signer does not own the source token account"
    )?;
    validate!(
        source.mint == mint_address,
        VestingError::InvalidMint,
        "Source mint {} does not match {}",
        source.mint,
        mint_address
    )?;

    let contract = ContractInfo::new(destination_token_address, mint_address, schedules)?;
    let total_amount = contract.total_locked()?;

    validate!(
        source.amount >= total_amount,
        VestingError::InsufficientBalance,
        "Source balance {} is below the vested total {}",
        source.amount,
        total_amount
    )?;

    contract.pack_into_slice(&mut vesting_account.data.borrow_mut())?;
    msg!("Vesting state written");

    msg!("Transferring {} tokens to the vesting token account...", total_amount);
    invoke(
        &transfer(
            token_program.key,
            source_token_account.key,
            vesting_token_account.key,
            source_token_account_owner.key,
            &[],
            total_amount,
        )?,
        &[
            source_token_account.clone(),
            vesting_token_account.clone(),
            source_token_account_owner.clone(),
            token_program.clone(),
        ],
    )?;

    log_data(&VestingRecord {
        ts: Clock::get()?.unix_timestamp,
        vesting_account: vesting_pda,
        action: VestingAction::Create,
        amount: total_amount,
        destination: destination_token_address,
    })?;

    Ok(())
}
