//! Instruction builders for the LIGMA staking program.
//!
//! The program exposes two actions, stake and unstake, identified by fixed
//! 9-byte discriminators. Instruction data is:
//!
//! ```text
//! [9 bytes: discriminator] [8 bytes: amount × 10^6, u64 LE]
//! ```
//!
//! Both actions reference the same 7 accounts; only the positions of the
//! payer's two token accounts swap between them.

use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::constants;
use crate::error::ClientError;
use crate::token::derive_token_account;

/// Program action discriminators (first 9 bytes of instruction data).
const STAKE_DISCRIMINATOR: [u8; 9] = [0xce, 0xb0, 0xca, 0x12, 0xc8, 0xd1, 0xb3, 0x6c, 0xfe];
const UNSTAKE_DISCRIMINATOR: [u8; 9] = [0x5a, 0x5f, 0x6b, 0x2a, 0xcd, 0x7c, 0x32, 0xe1, 0xfe];

/// Which direction tokens move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeAction {
    /// LIGMA → xLIGMA.
    Stake,
    /// xLIGMA → LIGMA.
    Unstake,
}

impl StakeAction {
    pub fn discriminator(&self) -> [u8; 9] {
        match self {
            StakeAction::Stake => STAKE_DISCRIMINATOR,
            StakeAction::Unstake => UNSTAKE_DISCRIMINATOR,
        }
    }

    /// Mint of the token being spent.
    pub fn source_mint(&self) -> Pubkey {
        match self {
            StakeAction::Stake => constants::ligma_mint(),
            StakeAction::Unstake => constants::xligma_mint(),
        }
    }

    /// Mint of the token being received.
    pub fn destination_mint(&self) -> Pubkey {
        match self {
            StakeAction::Stake => constants::xligma_mint(),
            StakeAction::Unstake => constants::ligma_mint(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StakeAction::Stake => "stake",
            StakeAction::Unstake => "unstake",
        }
    }
}

/// Convert a UI amount to raw base units: round(amount × 10^6).
pub fn scale_amount(amount: f64) -> Result<u64, ClientError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ClientError::InvalidAmount(format!(
            "amount must be a positive number, got {amount}"
        )));
    }
    let raw = (amount * constants::TOKEN_UNIT as f64).round();
    if raw > u64::MAX as f64 {
        return Err(ClientError::InvalidAmount(format!(
            "amount {amount} overflows base units"
        )));
    }
    Ok(raw as u64)
}

/// Build the program action instruction.
///
/// Accounts (fixed ordering):
///   0. LIGMA mint        (readonly)
///   1. xLIGMA mint       (writable)
///   2. source ATA        (writable) — spent token
///   3. payer             (signer, writable)
///   4. protocol state    (writable)
///   5. destination ATA   (writable) — received token
///   6. SPL token program (readonly)
pub fn build_action_ix(action: StakeAction, payer: &Pubkey, amount_raw: u64) -> Instruction {
    let source_ata = derive_token_account(payer, &action.source_mint());
    let destination_ata = derive_token_account(payer, &action.destination_mint());

    let mut data = Vec::with_capacity(17);
    data.extend_from_slice(&action.discriminator());
    data.extend_from_slice(&amount_raw.to_le_bytes());

    Instruction {
        program_id: constants::ligma_program_id(),
        accounts: vec![
            AccountMeta::new_readonly(constants::ligma_mint(), false),
            AccountMeta::new(constants::xligma_mint(), false),
            AccountMeta::new(source_ata, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new(constants::protocol_state(), false),
            AccountMeta::new(destination_ata, false),
            AccountMeta::new_readonly(constants::spl_token_program_id(), false),
        ],
        data,
    }
}

/// Build a create-associated-token-account instruction for (owner, mint),
/// with `payer` funding the rent.
pub fn build_create_token_account_ix(payer: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> Instruction {
    let ata = derive_token_account(owner, mint);
    Instruction {
        program_id: constants::associated_token_program_id(),
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(ata, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(constants::spl_token_program_id(), false),
        ],
        data: vec![],
    }
}

/// Assemble the full instruction set for one stake/unstake submission.
///
/// Order: [create destination ATA]? → compute limit → compute price → action.
pub fn build_instruction_set(
    action: StakeAction,
    payer: &Pubkey,
    amount_raw: u64,
    create_destination: bool,
) -> Vec<Instruction> {
    let mut ixs = Vec::with_capacity(4);
    if create_destination {
        ixs.push(build_create_token_account_ix(
            payer,
            payer,
            &action.destination_mint(),
        ));
    }
    ixs.push(ComputeBudgetInstruction::set_compute_unit_limit(
        constants::COMPUTE_UNIT_LIMIT,
    ));
    ixs.push(ComputeBudgetInstruction::set_compute_unit_price(
        constants::COMPUTE_UNIT_PRICE_MICRO_LAMPORTS,
    ));
    ixs.push(build_action_ix(action, payer, amount_raw));
    ixs
}
