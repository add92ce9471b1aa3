//! Stake/unstake submission flow.
//!
//! Builds a compute-budgeted versioned transaction for one action:
//!   1. Derive the payer's LIGMA and xLIGMA token accounts.
//!   2. Check the destination token account; prepend a create instruction
//!      if it does not exist yet.
//!   3. Attach compute unit limit and priority fee.
//!   4. Anchor to the latest finalized blockhash, have the wallet sign,
//!      and send.
//!
//! Submission is asynchronous from confirmation: the returned
//! [`PendingTransaction`] is awaited separately. Failures surface verbatim;
//! nothing is retried and nothing needs rolling back.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    message::{v0, VersionedMessage},
    signature::Signature,
    transaction::VersionedTransaction,
};

use crate::confirm::PendingTransaction;
use crate::constants;
use crate::error::ClientError;
use crate::instruction::{build_instruction_set, scale_amount, StakeAction};
use crate::token::{account_exists, derive_token_account};
use crate::wallet::WalletProvider;

/// Stake `amount` LIGMA (UI units) for the wallet's address.
pub async fn submit_stake(
    rpc: &RpcClient,
    wallet: &dyn WalletProvider,
    amount: f64,
) -> Result<PendingTransaction, ClientError> {
    submit_action(rpc, wallet, StakeAction::Stake, amount).await
}

/// Unstake `amount` xLIGMA (UI units) back to LIGMA.
pub async fn submit_unstake(
    rpc: &RpcClient,
    wallet: &dyn WalletProvider,
    amount: f64,
) -> Result<PendingTransaction, ClientError> {
    submit_action(rpc, wallet, StakeAction::Unstake, amount).await
}

pub async fn submit_action(
    rpc: &RpcClient,
    wallet: &dyn WalletProvider,
    action: StakeAction,
    amount: f64,
) -> Result<PendingTransaction, ClientError> {
    let payer = wallet
        .address()
        .ok_or_else(|| ClientError::ProviderAbsent("wallet not connected".into()))?;
    let amount_raw = scale_amount(amount)?;

    // Destination existence is always checked; the action instruction
    // requires the account even for a zero prior balance.
    let destination_ata = derive_token_account(&payer, &action.destination_mint());
    let create_destination = !account_exists(rpc, &destination_ata).await?;
    if create_destination {
        tracing::info!(
            ata = %destination_ata,
            action = action.name(),
            "Destination token account not initialized, creating it",
        );
    }

    let ixs = build_instruction_set(action, &payer, amount_raw, create_destination);

    let (blockhash, last_valid_block_height) = rpc
        .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
        .await
        .map_err(|e| ClientError::Rpc(e.to_string()))?;

    let message = v0::Message::try_compile(&payer, &ixs, &[], blockhash)
        .map_err(|e| ClientError::Build(e.to_string()))?;
    let mut tx = VersionedTransaction {
        signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
        message: VersionedMessage::V0(message),
    };

    wallet.sign_transaction(&mut tx)?;

    let signature = rpc
        .send_transaction(&tx)
        .await
        .map_err(|e| ClientError::NetworkRejected(e.to_string()))?;

    tracing::info!(
        tx = %signature,
        action = action.name(),
        amount,
        explorer = %format!("{}/{signature}", constants::EXPLORER_TX_URL),
        "Transaction submitted",
    );

    Ok(PendingTransaction {
        signature,
        blockhash,
        last_valid_block_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    /// Wallet that was never connected.
    struct AbsentWallet;

    impl WalletProvider for AbsentWallet {
        fn address(&self) -> Option<Pubkey> {
            None
        }
        fn is_connected(&self) -> bool {
            false
        }
        fn connect(&mut self) -> Result<Pubkey, ClientError> {
            Err(ClientError::ProviderAbsent("no wallet installed".into()))
        }
        fn sign_transaction(&self, _tx: &mut VersionedTransaction) -> Result<(), ClientError> {
            panic!("absent wallet must never be asked to sign");
        }
    }

    #[tokio::test]
    async fn absent_wallet_fails_before_any_network_call() {
        // Unroutable endpoint: the test only passes if submission bails out
        // before touching the RPC client.
        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());

        let err = submit_action(&rpc, &AbsentWallet, StakeAction::Stake, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ProviderAbsent(_)));
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected_before_submission() {
        struct ConnectedWallet(Pubkey);
        impl WalletProvider for ConnectedWallet {
            fn address(&self) -> Option<Pubkey> {
                Some(self.0)
            }
            fn is_connected(&self) -> bool {
                true
            }
            fn connect(&mut self) -> Result<Pubkey, ClientError> {
                Ok(self.0)
            }
            fn sign_transaction(&self, _tx: &mut VersionedTransaction) -> Result<(), ClientError> {
                panic!("must not sign an invalid-amount transaction");
            }
        }

        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
        let wallet = ConnectedWallet(Pubkey::new_unique());

        let err = submit_action(&rpc, &wallet, StakeAction::Unstake, -5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidAmount(_)));
    }
}
