use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};
use spl_token::instruction::transfer;

use crate::{
    common::{check_token_program, log_accounts, log_data},
    error::VestingError,
    resolver::{vault_address, vesting_address, VestingSeed},
    state::{ContractInfo, VestingAction, VestingRecord},
    validate,
};

pub fn unlock(program_id: &Pubkey, accounts: &[AccountInfo], seeds: VestingSeed) -> ProgramResult {
    msg!("Unlocking vested tokens...");

    let account_info_iter = &mut accounts.iter();

    let token_program = next_account_info(account_info_iter)?;
    let clock_sysvar = next_account_info(account_info_iter)?;
    let vesting_account = next_account_info(account_info_iter)?;
    let vesting_token_account = next_account_info(account_info_iter)?;
    let destination_token_account = next_account_info(account_info_iter)?;

    log_accounts(&[
        (token_program, "Token Program"),
        (clock_sysvar, "Clock Sysvar"),
        (vesting_account, "Vesting Account"),
        (vesting_token_account, "Vesting Token Account"),
        (destination_token_account, "Destination Token Account"),
    ]);

    check_token_program(token_program)?;
    let clock = Clock::from_account_info(clock_sysvar)?;

    let vesting_pda = vesting_address(&seeds, program_id)?;
    validate!(
        vesting_pda == *vesting_account.key,
        VestingError::InvalidProgramAddress,
        "Invalid seeds for Vesting PDA"
    )?;
    validate!(
        vesting_account.owner == program_id,
        ProgramError::IllegalOwner,
        "Vesting account is not owned by the program"
    )?;

    let mut contract = ContractInfo::unpack(&vesting_account.data.borrow())?
        .ok_or(VestingError::MalformedAccountError)?;

    validate!(
        *vesting_token_account.key == vault_address(&vesting_pda, &contract.header.mint_address),
        ProgramError::InvalidArgument,
        "The vesting token account should be the associated token account of the vesting account"
    )?;
    validate!(
        *destination_token_account.key == contract.header.destination_address,
        VestingError::InvalidDestination,
        "Contract destination is {}",
        contract.header.destination_address
    )?;

    let amount = contract.release_due(clock.unix_timestamp)?;
    if amount == 0 {
        msg!("Nothing to unlock at {}", clock.unix_timestamp);
        return Ok(());
    }

    // Paid tranches are zeroed before the transfer leaves the vault.
    contract.pack_into_slice(&mut vesting_account.data.borrow_mut())?;

    msg!("Transferring {} tokens to {}", amount, destination_token_account.key);
    invoke_signed(
        &transfer(
            token_program.key,
            vesting_token_account.key,
            destination_token_account.key,
            &vesting_pda,
            &[],
            amount,
        )?,
        &[
            vesting_token_account.clone(),
            destination_token_account.clone(),
            vesting_account.clone(),
            token_program.clone(),
        ],
        &[&seeds.signer_seeds()],
    )?;

    log_data(&VestingRecord {
        ts: clock.unix_timestamp,
        vesting_account: vesting_pda,
        action: VestingAction::Unlock,
        amount,
        destination: contract.header.destination_address,
    })?;

    Ok(())
}
