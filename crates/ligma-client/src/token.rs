//! Associated token account derivation and balance reads.
//!
//! Balances are read straight from the raw SPL token account bytes — the
//! `amount` field sits at a fixed offset, so no on-chain interface crate is
//! needed.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

use crate::constants;
use crate::error::ClientError;

/// SPL token account layout: mint [0..32], owner [32..64], amount [64..72] LE.
const AMOUNT_OFFSET: usize = 64;

/// Derive the associated token account for (owner, mint).
///
/// ATA derivation: find_program_address(
///   &[owner, token_program, mint],
///   &associated_token_program
/// )
///
/// Deterministic — independent of network state.
pub fn derive_token_account(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            owner.as_ref(),
            constants::spl_token_program_id().as_ref(),
            mint.as_ref(),
        ],
        &constants::associated_token_program_id(),
    )
    .0
}

/// Extract the `amount` field from raw SPL token account data.
///
/// Data too short to hold an amount reads as zero.
pub(crate) fn parse_token_amount(data: &[u8]) -> u64 {
    match data.get(AMOUNT_OFFSET..AMOUNT_OFFSET + 8) {
        Some(bytes) => u64::from_le_bytes(bytes.try_into().unwrap()),
        None => 0,
    }
}

/// True if `address` exists on-chain.
///
/// Uses get_multiple_accounts so missing accounts return Option::None
/// instead of an error, avoiding fragile string matching on error messages.
pub async fn account_exists(rpc: &RpcClient, address: &Pubkey) -> Result<bool, ClientError> {
    let mut accounts = rpc
        .get_multiple_accounts(&[*address])
        .await
        .map_err(|e| ClientError::Rpc(e.to_string()))?;
    Ok(accounts.pop().flatten().is_some())
}

/// Raw token balance of the owner's ATA for `mint`, in base units.
///
/// An ATA that does not exist yet reads as 0 — indistinguishable from an
/// empty account.
pub async fn raw_token_balance(
    rpc: &RpcClient,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<u64, ClientError> {
    let ata = derive_token_account(owner, mint);
    let mut accounts = rpc
        .get_multiple_accounts(&[ata])
        .await
        .map_err(|e| ClientError::Rpc(e.to_string()))?;

    Ok(match accounts.pop().flatten() {
        None => 0,
        Some(account) => parse_token_amount(&account.data),
    })
}

/// UI token balance (6 decimal places), never failing to the caller.
///
/// RPC failures are logged and read as 0.0, matching the display contract:
/// each action is user-reinitiated, so a transient read error is not fatal.
pub async fn token_balance(rpc: &RpcClient, owner: &Pubkey, mint: &Pubkey) -> f64 {
    match raw_token_balance(rpc, owner, mint).await {
        Ok(raw) => raw as f64 / constants::TOKEN_UNIT as f64,
        Err(e) => {
            tracing::warn!(%mint, "balance query failed: {e}");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_account_bytes(amount: u64) -> Vec<u8> {
        // Standard 165-byte SPL token account with the amount field set.
        let mut data = vec![0u8; 165];
        data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].copy_from_slice(&amount.to_le_bytes());
        data
    }

    #[test]
    fn parses_amount_field() {
        assert_eq!(parse_token_amount(&token_account_bytes(0)), 0);
        assert_eq!(
            parse_token_amount(&token_account_bytes(10_000_000)),
            10_000_000
        );
        assert_eq!(parse_token_amount(&token_account_bytes(u64::MAX)), u64::MAX);
    }

    #[test]
    fn short_data_reads_as_zero() {
        assert_eq!(parse_token_amount(&[]), 0);
        assert_eq!(parse_token_amount(&[0u8; 64]), 0);
    }

    #[test]
    fn ata_derivation_is_deterministic() {
        let owner = Pubkey::new_unique();

        let ligma_ata = derive_token_account(&owner, &constants::ligma_mint());
        let xligma_ata = derive_token_account(&owner, &constants::xligma_mint());

        assert_eq!(ligma_ata, derive_token_account(&owner, &constants::ligma_mint()));
        assert_ne!(ligma_ata, xligma_ata);
        assert_ne!(ligma_ata, owner);
    }
}
