//! Wallet capability boundary.
//!
//! The transaction builder never probes ambient state for a wallet; it is
//! handed a [`WalletProvider`] and uses only that contract. [`LocalWallet`]
//! is the keypair-file implementation used by the CLI.

use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
    transaction::VersionedTransaction,
};
use std::path::Path;

use crate::error::ClientError;

/// Capability interface over a signing wallet.
///
/// Mirrors the browser-extension contract: `connect()`, `signTransaction()`,
/// `publicKey`, `isConnected`.
pub trait WalletProvider {
    /// Public address, if the wallet has been connected.
    fn address(&self) -> Option<Pubkey>;

    fn is_connected(&self) -> bool;

    /// Establish a session and return the wallet's address.
    ///
    /// An already-connected wallet reconnects silently. Failure modes:
    /// `ProviderAbsent` (no wallet available) and `UserRejected`.
    fn connect(&mut self) -> Result<Pubkey, ClientError>;

    /// Sign a compiled transaction in place.
    ///
    /// A refusal to sign surfaces as `UserRejected` and is never retried.
    fn sign_transaction(&self, tx: &mut VersionedTransaction) -> Result<(), ClientError>;
}

/// Keypair-file-backed wallet.
#[derive(Debug)]
pub struct LocalWallet {
    keypair: Keypair,
    connected: bool,
}

impl LocalWallet {
    /// Load a wallet from a Solana keypair file.
    ///
    /// A missing or unreadable file means there is no wallet to talk to,
    /// so it maps to `ProviderAbsent` before any network call is made.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let keypair = read_keypair_file(path).map_err(|e| {
            ClientError::ProviderAbsent(format!("keypair file {}: {e}", path.display()))
        })?;
        Ok(Self::from_keypair(keypair))
    }

    pub fn from_keypair(keypair: Keypair) -> Self {
        Self {
            keypair,
            connected: false,
        }
    }
}

impl WalletProvider for LocalWallet {
    fn address(&self) -> Option<Pubkey> {
        self.connected.then(|| self.keypair.pubkey())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) -> Result<Pubkey, ClientError> {
        if !self.connected {
            self.connected = true;
            tracing::info!(address = %self.keypair.pubkey(), "Connected to wallet");
        }
        Ok(self.keypair.pubkey())
    }

    fn sign_transaction(&self, tx: &mut VersionedTransaction) -> Result<(), ClientError> {
        let message_bytes = tx.message.serialize();
        let num_signers = tx.message.header().num_required_signatures as usize;
        let position = tx
            .message
            .static_account_keys()
            .iter()
            .take(num_signers)
            .position(|key| *key == self.keypair.pubkey())
            .ok_or_else(|| {
                ClientError::UserRejected("transaction does not name this wallet as a signer".into())
            })?;

        tx.signatures[position] = self.keypair.sign_message(&message_bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        hash::Hash,
        message::{v0, VersionedMessage},
        signature::Signature,
        system_instruction,
    };

    #[test]
    fn missing_keypair_file_is_provider_absent() {
        let err = LocalWallet::load(Path::new("/nonexistent/ligma-wallet.json")).unwrap_err();
        assert!(matches!(err, ClientError::ProviderAbsent(_)));
    }

    #[test]
    fn connect_is_idempotent() {
        let mut wallet = LocalWallet::from_keypair(Keypair::new());
        assert!(!wallet.is_connected());
        assert!(wallet.address().is_none());

        let first = wallet.connect().unwrap();
        assert!(wallet.is_connected());

        // Silent reconnect returns the same address.
        let second = wallet.connect().unwrap();
        assert_eq!(first, second);
        assert_eq!(wallet.address(), Some(first));
    }

    #[test]
    fn signs_at_the_payer_position() {
        let mut wallet = LocalWallet::from_keypair(Keypair::new());
        let payer = wallet.connect().unwrap();

        let ix = system_instruction::transfer(&payer, &Pubkey::new_unique(), 1);
        let message = v0::Message::try_compile(&payer, &[ix], &[], Hash::default()).unwrap();
        let mut tx = VersionedTransaction {
            signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
            message: VersionedMessage::V0(message),
        };

        wallet.sign_transaction(&mut tx).unwrap();

        let message_bytes = tx.message.serialize();
        assert!(tx.signatures[0].verify(payer.as_ref(), &message_bytes));
    }

    #[test]
    fn rejects_transactions_for_another_signer() {
        let wallet = LocalWallet::from_keypair(Keypair::new());
        let other = Pubkey::new_unique();

        let ix = system_instruction::transfer(&other, &Pubkey::new_unique(), 1);
        let message = v0::Message::try_compile(&other, &[ix], &[], Hash::default()).unwrap();
        let mut tx = VersionedTransaction {
            signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
            message: VersionedMessage::V0(message),
        };

        let err = wallet.sign_transaction(&mut tx).unwrap_err();
        assert!(matches!(err, ClientError::UserRejected(_)));
    }
}
