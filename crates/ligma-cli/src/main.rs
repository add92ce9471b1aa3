//! ligma-cli — stake and unstake LIGMA from the command line.
//!
//! Connects a keypair-file wallet, shows the available (LIGMA) and staked
//! (xLIGMA) balances, and submits stake/unstake transactions to the LIGMA
//! program. Each submission returns a signature immediately; the command
//! then waits for confirmation and re-reads both balances.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use ligma_client::{
    constants, submit, token,
    wallet::{LocalWallet, WalletProvider},
    StakeAction,
};

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ligma-cli", about = "LIGMA staking tool")]
struct Cli {
    /// Solana RPC endpoint.
    #[arg(
        long,
        env = "LIGMA_RPC_URL",
        default_value = "https://solana.publicnode.com"
    )]
    rpc_url: String,

    /// Path to the wallet keypair file.
    #[arg(long, env = "LIGMA_KEYPAIR", default_value = "ligma-wallet.json")]
    keypair_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show available and staked balances.
    Balance,
    /// Stake LIGMA. Amount in tokens, or "max" for the full available balance.
    Stake { amount: String },
    /// Unstake xLIGMA. Amount in tokens, or "max" for the full staked balance.
    Unstake { amount: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ligma_cli=info,ligma_client=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    // Wallet first: with no wallet present, no network call is made.
    let mut wallet = LocalWallet::load(&cli.keypair_path)?;
    let payer = wallet.connect()?;

    let rpc = RpcClient::new_with_commitment(cli.rpc_url.clone(), CommitmentConfig::finalized());
    rpc.get_version()
        .await
        .with_context(|| format!("invalid RPC connection: {}", cli.rpc_url))?;

    match cli.command {
        Command::Balance => {
            show_balances(&rpc, &payer).await;
        }
        Command::Stake { amount } => {
            run_action(&rpc, &wallet, &payer, StakeAction::Stake, &amount).await?;
        }
        Command::Unstake { amount } => {
            run_action(&rpc, &wallet, &payer, StakeAction::Unstake, &amount).await?;
        }
    }

    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

async fn run_action(
    rpc: &RpcClient,
    wallet: &dyn WalletProvider,
    payer: &Pubkey,
    action: StakeAction,
    amount_arg: &str,
) -> anyhow::Result<()> {
    let amount = resolve_amount(rpc, payer, action, amount_arg).await?;

    let pending = submit::submit_action(rpc, wallet, action, amount).await?;
    println!(
        "{}/{}\nConfirming transaction...",
        constants::EXPLORER_TX_URL,
        pending.signature
    );

    let outcome = pending.wait(rpc).await?;
    println!("{outcome}");

    show_balances(rpc, payer).await;
    Ok(())
}

/// Parse an amount argument; "max" resolves to the full balance of the
/// token being spent.
async fn resolve_amount(
    rpc: &RpcClient,
    payer: &Pubkey,
    action: StakeAction,
    amount_arg: &str,
) -> anyhow::Result<f64> {
    if amount_arg.eq_ignore_ascii_case("max") {
        let balance = token::token_balance(rpc, payer, &action.source_mint()).await;
        tracing::info!(action = action.name(), balance, "Using max balance");
        return Ok(balance);
    }
    amount_arg
        .parse::<f64>()
        .with_context(|| format!("invalid token amount: {amount_arg}"))
}

async fn show_balances(rpc: &RpcClient, owner: &Pubkey) {
    let available = token::token_balance(rpc, owner, &constants::ligma_mint()).await;
    let staked = token::token_balance(rpc, owner, &constants::xligma_mint()).await;
    println!("Available: {available} LIGMA");
    println!("Staked:    {staked} xLIGMA");
}
