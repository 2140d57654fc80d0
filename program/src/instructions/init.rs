use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction, system_program,
    sysvar::{rent::Rent, Sysvar},
};

use crate::{
    common::log_accounts, error::VestingError, resolver::vesting_address, resolver::VestingSeed,
    state::ContractInfo, validate,
};

pub fn init(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    seeds: VestingSeed,
    number_of_schedules: u64,
) -> ProgramResult {
    msg!("Initializing vesting account...");
    msg!("Number of schedules: {}", number_of_schedules);

    let account_info_iter = &mut accounts.iter();

    let system_program_account = next_account_info(account_info_iter)?;
    let payer = next_account_info(account_info_iter)?;
    let vesting_account = next_account_info(account_info_iter)?;

    log_accounts(&[
        (system_program_account, "System Program"),
        (payer, "Payer"),
        (vesting_account, "Vesting Account"),
    ]);

    validate!(
        system_program_account.key == &system_program::id(),
        ProgramError::IncorrectProgramId,
        "Invalid system program"
    )?;

    validate!(
        payer.is_signer,
        ProgramError::MissingRequiredSignature,
        "Payer should be a signer"
    )?;

    validate!(
        number_of_schedules > 0,
        VestingError::InvalidInstruction,
        "A vesting contract needs at least one schedule"
    )?;

    let vesting_pda = vesting_address(&seeds, program_id)?;
    validate!(
        vesting_pda == *vesting_account.key,
        VestingError::InvalidProgramAddress,
        "Invalid seeds for Vesting PDA"
    )?;

    validate!(
        vesting_account.data_is_empty(),
        VestingError::AlreadyExists,
        "Vesting account {} already holds data",
        vesting_account.key
    )?;

    validate!(
        vesting_account.lamports() == 0 || vesting_account.owner == &system_program::id(),
        VestingError::AlreadyExists,
        "Vesting account {} is owned by {}",
        vesting_account.key,
        vesting_account.owner
    )?;

    let number_of_schedules =
        usize::try_from(number_of_schedules).map_err(|_| VestingError::ArithmeticOverflow)?;
    let state_size = ContractInfo::state_size(number_of_schedules)?;

    let rent = Rent::get()?;
    let rent_lamports = rent.minimum_balance(state_size);
    let signer_seeds = seeds.signer_seeds();

    if vesting_account.lamports() == 0 {
        invoke_signed(
            &system_instruction::create_account(
                payer.key,
                vesting_account.key,
                rent_lamports,
                state_size as u64,
                program_id,
            ),
            &[
                system_program_account.clone(),
                payer.clone(),
                vesting_account.clone(),
            ],
            &[&signer_seeds],
        )?;
    } else {
        // create_account refuses an address that already holds lamports.
        msg!("Vesting address already holds {} lamports", vesting_account.lamports());
        let top_up = rent_lamports.saturating_sub(vesting_account.lamports());
        if top_up > 0 {
            invoke(
                &system_instruction::transfer(payer.key, vesting_account.key, top_up),
                &[
                    payer.clone(),
                    vesting_account.clone(),
                    system_program_account.clone(),
                ],
            )?;
        }
        invoke_signed(
            &system_instruction::allocate(vesting_account.key, state_size as u64),
            &[vesting_account.clone(), system_program_account.clone()],
            &[&signer_seeds],
        )?;
        invoke_signed(
            &system_instruction::assign(vesting_account.key, program_id),
            &[vesting_account.clone(), system_program_account.clone()],
            &[&signer_seeds],
        )?;
    }

    msg!("Vesting account created: {} ({} bytes)", vesting_pda, state_size);

    Ok(())
}
