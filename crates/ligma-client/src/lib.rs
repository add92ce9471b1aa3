// ligma-client: Rust client for the LIGMA staking program.
// Derives associated token accounts, reads balances, and builds, signs
// and submits stake/unstake transactions through an injected wallet.

pub mod confirm;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod submit;
pub mod token;
pub mod wallet;

pub use confirm::{Confirmation, PendingTransaction};
pub use error::ClientError;
pub use instruction::StakeAction;
pub use submit::{submit_stake, submit_unstake};
pub use wallet::{LocalWallet, WalletProvider};
