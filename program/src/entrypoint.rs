use solana_program::{
    account_info::AccountInfo, entrypoint, entrypoint::ProgramResult, pubkey::Pubkey,
};
use solana_security_txt::security_txt;

use crate::processor;

security_txt! {
    name: "Token Vesting Program",
    project_url: "https://example.com/REPLACE-WITH-PROJECT-URL",
    contacts: "email:REPLACE-WITH-SECURITY-CONTACT@example.com",
    policy: "REPLACE WITH THE DISCLOSURE POLICY BEFORE DEPLOYING",
    preferred_languages: "en"
}

entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::process_instruction(program_id, accounts, instruction_data)
}
