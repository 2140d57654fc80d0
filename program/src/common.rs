use borsh::BorshSerialize;
use serde::Serialize;
use solana_program::{
    account_info::AccountInfo, log::sol_log_data, msg, program_error::ProgramError,
    program_pack::Pack,
};
use spl_token::state::Account as TokenAccount;

use crate::error::VestingError;

pub fn log_accounts(accounts: &[(&AccountInfo, &str)]) {
    for (account, name) in accounts {
        msg!("{}: {}", name, account.key);
    }
}

/// Logs any serializable value as a single json line.
pub fn log_params<T: Serialize>(params: &T) {
    match serde_json::to_string(params) {
        Ok(json) => msg!("{}", json),
        Err(e) => msg!("Failed to serialize params: {}", e),
    }
}

/// Emits a borsh encoded event through the program data log.
pub fn log_data<T: BorshSerialize>(record: &T) -> Result<(), ProgramError> {
    let data = record.try_to_vec()?;
    sol_log_data(&[&data]);
    Ok(())
}

/// Loads an SPL token account, checking it belongs to the token program.
pub fn load_token_account(account: &AccountInfo) -> Result<TokenAccount, ProgramError> {
    if account.owner != &spl_token::id() {
        msg!("{} is not owned by the token program", account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    TokenAccount::unpack(&account.data.borrow())
}

pub fn check_token_program(token_program: &AccountInfo) -> Result<(), ProgramError> {
    if token_program.key != &spl_token::id() {
        msg!("Invalid token program: {}", token_program.key);
        return Err(VestingError::InvalidTokenProgram.into());
    }
    Ok(())
}
