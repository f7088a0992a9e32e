// Commands — wallet new/address/balance

use clap::Subcommand;
use log::debug;

use crate::atoms::error::{ForgeError, ForgeResult};
use crate::engine::{helpers, price, rpc, wallet::Keypair};

use super::{print_json, print_kv, GlobalArgs};

#[derive(Subcommand, Debug)]
pub enum WalletCmd {
    /// Generate a payer keypair file
    New {
        /// Overwrite an existing keypair file
        #[arg(long)]
        force: bool,
    },
    /// Print the payer address
    Address,
    /// Print the payer's SOL balance
    Balance,
}

pub async fn run(cmd: &WalletCmd, globals: &GlobalArgs) -> ForgeResult<()> {
    let config = globals.to_config()?;
    match cmd {
        WalletCmd::New { force } => {
            if config.keypair_path.exists() && !force {
                return Err(ForgeError::Wallet(format!(
                    "Refusing to overwrite {} (pass --force to replace it)",
                    config.keypair_path.display()
                )));
            }
            let keypair = Keypair::generate();
            keypair.save(&config.keypair_path)?;

            let node_version = rpc::get_node_version(&config.rpc_url).await.ok();
            let network = network_display(&config.rpc_url, node_version.as_deref());

            if globals.json {
                return print_json(&serde_json::json!({
                    "address": keypair.address(),
                    "path": config.keypair_path,
                    "network": network,
                }));
            }
            println!("✅ New wallet created");
            print_kv("Address", keypair.address());
            print_kv("Keypair file", config.keypair_path.display());
            print_kv("Network", network);
            println!();
            println!("⚠️  This wallet has zero balance. Send SOL to it before launching a token.");
            Ok(())
        }
        WalletCmd::Address => {
            let payer = crate::engine::wallet::load_payer(&config.keypair_path)?;
            if globals.json {
                return print_json(&serde_json::json!({ "address": payer.address() }));
            }
            println!("{}", payer.address());
            Ok(())
        }
        WalletCmd::Balance => {
            let payer = crate::engine::wallet::load_payer(&config.keypair_path)?;
            let lamports = rpc::get_balance(&config.rpc_url, &payer.address()).await?;

            // Best effort; the balance stands on its own without a USD quote.
            let sol_price = match price::get_sol_price_usd().await {
                Ok(p) => Some(p),
                Err(e) => {
                    debug!("[wallet] No SOL price: {}", e);
                    None
                }
            };

            if globals.json {
                return print_json(&serde_json::json!({
                    "address": payer.address(),
                    "lamports": lamports,
                    "sol_price_usd": sol_price,
                }));
            }
            print_kv("Address", payer.address());
            let balance = match sol_price {
                Some(p) => format!(
                    "{} (~{}, {} lamports)",
                    helpers::sol_display(lamports),
                    helpers::usd_display(lamports, p),
                    lamports
                ),
                None => format!("{} ({} lamports)", helpers::sol_display(lamports), lamports),
            };
            print_kv("Balance", balance);
            Ok(())
        }
    }
}

/// "url (node vX)" when the node answered, "url (unreachable)" when not.
fn network_display(rpc_url: &str, node_version: Option<&str>) -> String {
    match node_version {
        Some(v) => format!("{} (node v{})", rpc_url, v),
        None => format!("{} (unreachable)", rpc_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_line_reflects_node_reachability() {
        assert_eq!(
            network_display("https://api.devnet.solana.com", Some("2.1.0")),
            "https://api.devnet.solana.com (node v2.1.0)"
        );
        assert_eq!(
            network_display("https://api.devnet.solana.com", None),
            "https://api.devnet.solana.com (unreachable)"
        );
    }
}
