use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    sysvar::{clock::Clock, Sysvar},
};

use crate::{
    common::{load_token_account, log_accounts, log_data, log_params},
    constants::HEADER_LEN,
    error::VestingError,
    resolver::{vesting_address, VestingSeed},
    state::{ContractInfo, VestingAction, VestingRecord},
    validate,
};

pub fn change_destination(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    seeds: VestingSeed,
) -> ProgramResult {
    msg!("Changing vesting destination...");

    let account_info_iter = &mut accounts.iter();

    let vesting_account = next_account_info(account_info_iter)?;
    let destination_token_account = next_account_info(account_info_iter)?;
    let destination_token_account_owner = next_account_info(account_info_iter)?;
    let new_destination_token_account = next_account_info(account_info_iter)?;

    log_accounts(&[
        (vesting_account, "Vesting Account"),
        (destination_token_account, "Current Destination Token Account"),
        (destination_token_account_owner, "Current Destination Owner"),
        (new_destination_token_account, "New Destination Token Account"),
    ]);

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

    msg!("Before changing destination...");
    log_params(&contract.header);

    validate!(
        *destination_token_account.key == contract.header.destination_address,
        VestingError::InvalidDestination,
        "Contract destination is {}",
        contract.header.destination_address
    )?;

    let destination = load_token_account(destination_token_account)?;
    validate!(
        destination_token_account_owner.is_signer
            && destination.owner == *destination_token_account_owner.key,
        VestingError::Unauthorized,
        "The current destination token account owner should sign"
    )?;

    let new_destination = load_token_account(new_destination_token_account)?;
    validate!(
        new_destination.mint == contract.header.mint_address,
        VestingError::MintMismatch,
        "New destination mint {} does not match {}",
        new_destination.mint,
        contract.header.mint_address
    )?;

    contract.set_destination(*new_destination_token_account.key);
    contract
        .header
        .pack_into_slice(&mut vesting_account.data.borrow_mut()[..HEADER_LEN]);

    msg!("After changing destination...");
    log_params(&contract.header);

    log_data(&VestingRecord {
        ts: Clock::get()?.unix_timestamp,
        vesting_account: vesting_pda,
        action: VestingAction::ChangeDestination,
        amount: 0,
        destination: contract.header.destination_address,
    })?;

    Ok(())
}
