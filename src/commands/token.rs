// Commands — token info

use clap::Subcommand;

use crate::atoms::error::ForgeResult;
use crate::engine::{helpers, inspect_mint};

use super::{print_json, print_kv, GlobalArgs};

#[derive(Subcommand, Debug)]
pub enum TokenCmd {
    /// Inspect a mint account on-chain
    Info {
        /// Mint address (base58)
        mint: String,
    },
}

pub async fn run(cmd: &TokenCmd, globals: &GlobalArgs) -> ForgeResult<()> {
    let config = globals.to_config()?;
    match cmd {
        TokenCmd::Info { mint } => {
            let inspection = inspect_mint(&config.rpc_url, mint).await?;
            if globals.json {
                return print_json(&inspection);
            }

            print_kv("Mint", &inspection.mint);
            print_kv("Owner program", &inspection.owner_program);
            print_kv(
                "Supply",
                format!(
                    "{} (raw {}, {} decimals)",
                    helpers::lamports_to_amount(inspection.supply_raw, inspection.decimals),
                    inspection.supply_raw,
                    inspection.decimals
                ),
            );
            print_kv("Initialized", inspection.is_initialized);
            print_kv(
                "Mint authority",
                inspection.mint_authority.as_deref().unwrap_or("revoked (none)"),
            );
            print_kv(
                "Freeze authority",
                inspection.freeze_authority.as_deref().unwrap_or("revoked (none)"),
            );
            print_kv(
                "Fixed supply",
                if inspection.is_fixed_supply() { "yes" } else { "no" },
            );
            print_kv("Explorer", format!("https://solscan.io/token/{}", inspection.mint));

            if inspection.mint_authority.is_some() {
                println!();
                println!("⚠️  Mint authority is active. The holder can mint more tokens at any time.");
            }
            if inspection.freeze_authority.is_some() {
                println!("⚠️  Freeze authority is active. The holder can freeze any token account.");
            }
            if inspection.mint_authority.is_none() && inspection.freeze_authority.is_none() {
                println!();
                println!("✅ Both authorities are revoked. The supply is fixed.");
            }
            Ok(())
        }
    }
}
