use crate::common::log_params;
use crate::instruction::VestingInstruction;
use crate::instructions::{change_destination, create, init, unlock};
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = VestingInstruction::unpack(instruction_data, accounts.len())?;
    match instruction {
        VestingInstruction::Init {
            seeds,
            number_of_schedules,
        } => {
            msg!("Instruction: Init");
            init(program_id, accounts, seeds, number_of_schedules)
        }
        VestingInstruction::Create {
            seeds,
            mint_address,
            destination_token_address,
            schedules,
        } => {
            msg!("Instruction: Create");
            log_params(&schedules);
            create(
                program_id,
                accounts,
                seeds,
                mint_address,
                destination_token_address,
                schedules,
            )
        }
        VestingInstruction::Unlock { seeds } => {
            msg!("Instruction: Unlock");
            unlock(program_id, accounts, seeds)
        }
        VestingInstruction::ChangeDestination { seeds } => {
            msg!("Instruction: ChangeDestination");
            change_destination(program_id, accounts, seeds)
        }
    }
}
