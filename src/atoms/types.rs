// ── Atoms: Shared Types ────────────────────────────────────────────────────
// Plain data structs passed between the CLI layer and the engine. No logic
// beyond small accessors; everything here is serde-friendly so `--json`
// output falls out for free.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Runtime configuration ──────────────────────────────────────────────────

/// Resolved global settings (flags + env fallbacks) handed to the engine.
/// The Pinata JWT is optional at this level; flows that pin assets check for
/// it and fail with a configuration error rather than a panic.
#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub pinata_jwt: Option<String>,
    pub gateway: String,
    pub keypair_path: PathBuf,
}

impl Config {
    /// The JWT, or a configuration error naming the fix.
    pub fn pinata_jwt(&self) -> Result<&str, crate::atoms::error::ForgeError> {
        self.pinata_jwt.as_deref().ok_or_else(|| {
            crate::atoms::error::ForgeError::Config(
                "Missing Pinata JWT. Set PINATA_JWT or pass --pinata-jwt.".into(),
            )
        })
    }
}

// ── Token form ─────────────────────────────────────────────────────────────

/// Optional project links embedded in the off-chain metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenLinks {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub extra: Option<String>,
}

/// Everything the user fills in to describe the token: the CLI-flag and
/// TOML-manifest inputs both normalize into this.
#[derive(Debug, Clone)]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub decimals: u8,
    /// Whole-token supply; the raw on-chain amount is
    /// `total_supply * 10^decimals`.
    pub total_supply: u64,
    pub logo: PathBuf,
    pub links: TokenLinks,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
}

// ── Cost estimate ──────────────────────────────────────────────────────────

/// Lamports the creation transaction needs, broken down the way the
/// preflight balance check reports it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CostEstimate {
    pub mint_rent_lamports: u64,
    pub token_account_rent_lamports: u64,
    pub fee_lamports: u64,
    pub required_lamports: u64,
}

// ── Transaction status ─────────────────────────────────────────────────────

/// Outcome of the post-send confirmation poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Confirmed,
    Finalized,
    /// Not yet confirmed when the polling budget ran out; the signature may
    /// still land. Check an explorer.
    Pending,
    /// The transaction was included but failed on-chain.
    Failed(String),
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStatus::Confirmed => write!(f, "confirmed"),
            TxStatus::Finalized => write!(f, "finalized"),
            TxStatus::Pending => write!(f, "pending (check explorer)"),
            TxStatus::Failed(e) => write!(f, "failed: {}", e),
        }
    }
}

// ── Receipts ───────────────────────────────────────────────────────────────

/// Everything worth reporting after a successful creation flow.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReceipt {
    pub mint: String,
    pub associated_token_account: String,
    pub signature: String,
    pub status: TxStatus,
    pub logo_cid: String,
    pub metadata_cid: String,
    pub metadata_url: String,
    pub decimals: u8,
    pub total_supply: u64,
    /// Raw on-chain amount minted (`total_supply * 10^decimals`).
    pub supply_raw: u64,
    pub cost: CostEstimate,
    pub created_at: DateTime<Utc>,
}

/// Result of pinning a single file.
#[derive(Debug, Clone, Serialize)]
pub struct PinReceipt {
    pub file_name: String,
    pub size_bytes: u64,
    pub cid: String,
    pub gateway_url: String,
}

// ── Mint inspection ────────────────────────────────────────────────────────

/// Parsed on-chain state of a mint account, as returned by
/// `getAccountInfo` with jsonParsed encoding.
#[derive(Debug, Clone, Serialize)]
pub struct MintInspection {
    pub mint: String,
    pub owner_program: String,
    pub decimals: u8,
    pub supply_raw: u64,
    pub is_initialized: bool,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
}

impl MintInspection {
    /// Supply is fixed once the mint authority is gone.
    pub fn is_fixed_supply(&self) -> bool {
        self.mint_authority.is_none()
    }
}
