// Commands — create

use std::path::PathBuf;

use crate::atoms::constants::{DEFAULT_DECIMALS, DEFAULT_TOTAL_SUPPLY};
use crate::atoms::error::{ForgeError, ForgeResult};
use crate::atoms::types::{TokenForm, TokenLinks};
use crate::engine::{self, form, helpers, wallet};

use super::{confirm, print_json, print_kv, GlobalArgs};

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Path to the token manifest; omit to describe the token inline
    pub manifest: Option<PathBuf>,

    /// Token name (inline mode)
    #[arg(long, conflicts_with = "manifest")]
    pub name: Option<String>,

    /// Token symbol
    #[arg(long, conflicts_with = "manifest")]
    pub symbol: Option<String>,

    /// Token description
    #[arg(long, conflicts_with = "manifest")]
    pub description: Option<String>,

    /// Logo image file
    #[arg(long, conflicts_with = "manifest")]
    pub logo: Option<PathBuf>,

    /// Decimal places (0..=9)
    #[arg(long, conflicts_with = "manifest")]
    pub decimals: Option<u8>,

    /// Whole-token supply to mint
    #[arg(long, conflicts_with = "manifest")]
    pub supply: Option<u64>,

    /// Project website
    #[arg(long, conflicts_with = "manifest")]
    pub website: Option<String>,

    /// Twitter/X link
    #[arg(long, conflicts_with = "manifest")]
    pub twitter: Option<String>,

    /// Telegram link
    #[arg(long, conflicts_with = "manifest")]
    pub telegram: Option<String>,

    /// Discord link
    #[arg(long, conflicts_with = "manifest")]
    pub discord: Option<String>,

    /// Any extra link for the metadata
    #[arg(long, conflicts_with = "manifest")]
    pub extra_link: Option<String>,

    /// Keep the mint authority (supply stays mintable)
    #[arg(long, conflicts_with = "manifest")]
    pub keep_mint_authority: bool,

    /// Keep a freeze authority on the mint
    #[arg(long, conflicts_with = "manifest")]
    pub keep_freeze_authority: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Inline flags assembled into a form, with the same normalization the
/// manifest path gets.
fn inline_form(args: &CreateArgs) -> ForgeResult<TokenForm> {
    let (name, symbol, description, logo) =
        match (&args.name, &args.symbol, &args.description, &args.logo) {
            (Some(n), Some(s), Some(d), Some(l)) => (n, s, d, l),
            _ => {
                return Err(ForgeError::Validation(
                    "Inline mode needs --name, --symbol, --description, and --logo (or pass a manifest)"
                        .into(),
                ))
            }
        };

    Ok(TokenForm {
        name: name.trim().to_string(),
        symbol: symbol.trim().to_uppercase(),
        description: description.trim().to_string(),
        decimals: args.decimals.unwrap_or(DEFAULT_DECIMALS),
        total_supply: args.supply.unwrap_or(DEFAULT_TOTAL_SUPPLY),
        logo: logo.clone(),
        links: TokenLinks {
            website: form::normalize_link(&args.website),
            twitter: form::normalize_link(&args.twitter),
            telegram: form::normalize_link(&args.telegram),
            discord: form::normalize_link(&args.discord),
            extra: form::normalize_link(&args.extra_link),
        },
        revoke_mint: !args.keep_mint_authority,
        revoke_freeze: !args.keep_freeze_authority,
    })
}

pub async fn run(args: &CreateArgs, globals: &GlobalArgs) -> ForgeResult<()> {
    let config = globals.to_config()?;
    let form = match &args.manifest {
        Some(path) => form::load_form(path)?,
        None => {
            let form = inline_form(args)?;
            form::validate_form(&form)?;
            form::validate_logo_file(&form.logo)?;
            form
        }
    };
    config.pinata_jwt()?;
    let payer = wallet::load_payer(&config.keypair_path)?;

    let cost = engine::estimate_cost(&config.rpc_url).await?;

    if !globals.json {
        println!("Launch plan");
        print_kv("Name", &form.name);
        print_kv("Symbol", &form.symbol);
        print_kv(
            "Supply",
            format!("{} ({} decimals)", form.total_supply, form.decimals),
        );
        print_kv("Logo", form.logo.display());
        print_kv(
            "Mint authority",
            if form.revoke_mint { "revoked after mint" } else { "kept by payer" },
        );
        print_kv(
            "Freeze authority",
            if form.revoke_freeze { "never set" } else { "kept by payer" },
        );
        print_kv("Payer", payer.address());
        print_kv("RPC", &config.rpc_url);
        print_kv("Estimated cost", helpers::sol_display(cost.required_lamports));
        println!();
    }

    if !args.yes && !confirm("Launch this token?")? {
        println!("Aborted.");
        return Ok(());
    }

    let receipt = engine::create_token(&config, &payer, &form).await?;

    if globals.json {
        return print_json(&receipt);
    }

    println!("✅ Token created");
    print_kv("Mint", &receipt.mint);
    print_kv("Token account", &receipt.associated_token_account);
    print_kv("Signature", &receipt.signature);
    print_kv("Status", &receipt.status);
    print_kv(
        "Minted",
        format!(
            "{} {} (raw {})",
            helpers::lamports_to_amount(receipt.supply_raw, receipt.decimals),
            form.symbol,
            receipt.supply_raw
        ),
    );
    print_kv("Logo CID", &receipt.logo_cid);
    print_kv("Metadata", &receipt.metadata_url);
    print_kv("Cost", helpers::sol_display(receipt.cost.required_lamports));
    print_kv("Explorer", format!("https://solscan.io/token/{}", receipt.mint));
    print_kv("Transaction", format!("https://solscan.io/tx/{}", receipt.signature));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> CreateArgs {
        CreateArgs {
            manifest: None,
            name: None,
            symbol: None,
            description: None,
            logo: None,
            decimals: None,
            supply: None,
            website: None,
            twitter: None,
            telegram: None,
            discord: None,
            extra_link: None,
            keep_mint_authority: false,
            keep_freeze_authority: false,
            yes: false,
        }
    }

    #[test]
    fn inline_mode_requires_the_core_fields() {
        let mut args = bare_args();
        args.name = Some("Doge Prime".into());
        let err = inline_form(&args).unwrap_err();
        assert!(err.to_string().contains("--symbol"));
    }

    #[test]
    fn inline_form_normalizes_like_the_manifest_path() {
        let mut args = bare_args();
        args.name = Some("  Doge Prime ".into());
        args.symbol = Some("dogep".into());
        args.description = Some("The premier doge.".into());
        args.logo = Some(PathBuf::from("logo.png"));
        args.website = Some("  ".into());
        args.keep_mint_authority = true;

        let form = inline_form(&args).unwrap();
        assert_eq!(form.name, "Doge Prime");
        assert_eq!(form.symbol, "DOGEP");
        assert_eq!(form.decimals, DEFAULT_DECIMALS);
        assert_eq!(form.total_supply, DEFAULT_TOTAL_SUPPLY);
        assert!(form.links.website.is_none());
        assert!(!form.revoke_mint);
        assert!(form.revoke_freeze);
    }
}
