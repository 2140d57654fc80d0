#[cfg(not(feature = "no-entrypoint"))]
pub mod entrypoint;

pub mod codec;
pub mod common;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod instructions;
pub mod macros;
pub mod processor;
pub mod resolver;
pub mod state;

solana_program::declare_id!("VestingbGKPFXCWuBvfkegQfZyiNwAJb9Ss623VQ5DA");
