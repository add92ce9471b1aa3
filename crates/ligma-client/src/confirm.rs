//! Two-phase transaction result: a submission returns a
//! [`PendingTransaction`] immediately; confirmation is awaited separately.

use std::fmt;
use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, hash::Hash, signature::Signature};

use crate::error::ClientError;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A submitted-but-unconfirmed transaction.
///
/// Carries the blockhash the transaction was built against so the wait loop
/// can detect expiry of the validity window.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    pub signature: Signature,
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Terminal confirmation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    /// The network executed the transaction and it failed.
    Failed(String),
    /// The blockhash validity window passed without the transaction landing.
    Expired,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confirmation::Confirmed => write!(f, "Confirmed!"),
            Confirmation::Failed(reason) => write!(f, "Transaction failed: {reason}"),
            Confirmation::Expired => {
                write!(f, "Transaction expired: blockhash no longer valid")
            }
        }
    }
}

impl PendingTransaction {
    /// Poll until the transaction confirms, fails, or its blockhash expires.
    ///
    /// Resolves with a terminal [`Confirmation`]; `Err` is reserved for RPC
    /// transport failures. There is no cancellation path once submitted.
    pub async fn wait(&self, rpc: &RpcClient) -> Result<Confirmation, ClientError> {
        loop {
            let statuses = rpc
                .get_signature_statuses(&[self.signature])
                .await
                .map_err(|e| ClientError::Rpc(e.to_string()))?;

            if let Some(status) = statuses.value.into_iter().flatten().next() {
                if let Err(e) = &status.status {
                    return Ok(Confirmation::Failed(e.to_string()));
                }
                if status.satisfies_commitment(CommitmentConfig::confirmed()) {
                    tracing::info!(tx = %self.signature, "Transaction confirmed");
                    return Ok(Confirmation::Confirmed);
                }
            }

            let height = rpc
                .get_block_height()
                .await
                .map_err(|e| ClientError::Rpc(e.to_string()))?;
            if height > self.last_valid_block_height {
                tracing::warn!(
                    tx = %self.signature,
                    last_valid = self.last_valid_block_height,
                    height,
                    "Blockhash expired before confirmation",
                );
                return Ok(Confirmation::Expired);
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_display_strings() {
        assert_eq!(Confirmation::Confirmed.to_string(), "Confirmed!");
        assert_eq!(
            Confirmation::Failed("insufficient funds".into()).to_string(),
            "Transaction failed: insufficient funds"
        );
        assert!(Confirmation::Expired.to_string().contains("expired"));
    }
}
