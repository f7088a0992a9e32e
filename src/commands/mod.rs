// Commands — CLI surface and dispatch
//
// Thin handlers over the engine: parse args, call one engine
// operation, render the result. No command owns business logic.

pub mod create;
pub mod estimate;
pub mod init;
pub mod pin;
pub mod token;
pub mod wallet;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::atoms::constants::{DEFAULT_IPFS_GATEWAY, DEFAULT_RPC_URL};
use crate::atoms::error::ForgeResult;
use crate::atoms::types::Config;

#[derive(Parser, Debug)]
#[command(name = "mintforge", version, about = "Launch SPL tokens from a TOML manifest")]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    /// Solana JSON-RPC endpoint
    #[arg(long, global = true, env = "SOLANA_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Pinata JWT for IPFS pinning
    #[arg(long, global = true, env = "PINATA_JWT", hide_env_values = true)]
    pub pinata_jwt: Option<String>,

    /// Gateway host used in returned IPFS URLs
    #[arg(long, global = true, env = "PINATA_GATEWAY", default_value = DEFAULT_IPFS_GATEWAY)]
    pub gateway: String,

    /// Payer keypair file (defaults to the mintforge config dir)
    #[arg(long, global = true, env = "MINTFORGE_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn to_config(&self) -> ForgeResult<Config> {
        let keypair_path = match &self.keypair {
            Some(path) => path.clone(),
            None => crate::engine::wallet::default_keypair_path()?,
        };
        Ok(Config {
            rpc_url: self.rpc_url.clone(),
            pinata_jwt: self.pinata_jwt.clone(),
            gateway: self.gateway.clone(),
            keypair_path,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold a token.toml manifest
    Init(init::InitArgs),
    /// Validate a manifest and launch the token
    Create(create::CreateArgs),
    /// Show what a launch would cost right now
    Estimate,
    /// Keypair management
    #[command(subcommand)]
    Wallet(wallet::WalletCmd),
    /// On-chain token queries
    #[command(subcommand)]
    Token(token::TokenCmd),
    /// Pin a single file via Pinata
    Pin(pin::PinArgs),
}

pub async fn run(cli: Cli) -> ForgeResult<()> {
    match &cli.command {
        Command::Init(args) => init::run(args, cli.globals.json),
        Command::Create(args) => create::run(args, &cli.globals).await,
        Command::Estimate => estimate::run(&cli.globals).await,
        Command::Wallet(cmd) => wallet::run(cmd, &cli.globals).await,
        Command::Token(cmd) => token::run(cmd, &cli.globals).await,
        Command::Pin(args) => pin::run(args, &cli.globals).await,
    }
}

// ── Output helpers ────────────────────────────────────────────────────

pub(crate) fn print_kv(label: &str, value: impl std::fmt::Display) {
    println!("{:<22} {}", label, value);
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> ForgeResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// y/N prompt on stdin. Anything but y/yes is a no.
pub(crate) fn confirm(prompt: &str) -> ForgeResult<bool> {
    use std::io::Write;
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
