//! Shared constants for the LIGMA staking client.

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

// ============================================================================
// Program IDs and mints
// ============================================================================

/// LIGMA staking program.
pub const LIGMA_PROGRAM_ID_STR: &str = "pLigmFBt3J3gLeZv1tehqZ3RhWcMmTkGart6oN9tqkX";

/// LIGMA mint (the liquid token).
pub const LIGMA_MINT_STR: &str = "node3SHFNF7h6N9jbztfVcXrZcvAJdns1xAV8CbYFLG";

/// xLIGMA mint (the staked token).
pub const XLIGMA_MINT_STR: &str = "xNodeyB1u8WNrKQJqfucbKDMq7LYcAQfYXmqVdDj9M5";

/// Protocol state account referenced by every stake/unstake instruction.
pub const PROTOCOL_STATE_STR: &str = "ENz6c4ZVYedrcK5V4fh7vwDA1SvZDNDQb1j3KKQbbo8Q";

pub const SPL_TOKEN_PROGRAM_ID_STR: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const ASSOCIATED_TOKEN_PROGRAM_ID_STR: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJe1bJo";

pub fn ligma_program_id() -> Pubkey {
    Pubkey::from_str(LIGMA_PROGRAM_ID_STR).unwrap()
}
pub fn ligma_mint() -> Pubkey {
    Pubkey::from_str(LIGMA_MINT_STR).unwrap()
}
pub fn xligma_mint() -> Pubkey {
    Pubkey::from_str(XLIGMA_MINT_STR).unwrap()
}
pub fn protocol_state() -> Pubkey {
    Pubkey::from_str(PROTOCOL_STATE_STR).unwrap()
}
pub fn spl_token_program_id() -> Pubkey {
    Pubkey::from_str(SPL_TOKEN_PROGRAM_ID_STR).unwrap()
}
pub fn associated_token_program_id() -> Pubkey {
    Pubkey::from_str(ASSOCIATED_TOKEN_PROGRAM_ID_STR).unwrap()
}

// ============================================================================
// Token units
// ============================================================================
// Both LIGMA and xLIGMA use 6 decimal places. 1 LIGMA = 1_000_000 raw units.

pub const TOKEN_DECIMALS: u32 = 6;
pub const TOKEN_UNIT: u64 = 1_000_000;

// ============================================================================
// Compute budget
// ============================================================================

/// Compute unit limit attached to every stake/unstake transaction.
pub const COMPUTE_UNIT_LIMIT: u32 = 100_000;

/// Priority fee in micro-lamports per compute unit.
pub const COMPUTE_UNIT_PRICE_MICRO_LAMPORTS: u64 = 1_333_333;

// ============================================================================
// Display
// ============================================================================

/// Explorer base URL for submitted transaction signatures.
pub const EXPLORER_TX_URL: &str = "https://solscan.io/tx";
