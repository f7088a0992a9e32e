// Engine — Mint Inspection
// inspect_mint, parse_mint_account

use base64::Engine;

use crate::atoms::constants::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::atoms::error::{ForgeError, ForgeResult};
use crate::atoms::types::MintInspection;

use super::helpers::encode_pubkey;
use super::rpc;

/// Fetch and decode a mint account. Prefers the node's jsonParsed view
/// and falls back to decoding the raw account data when the node does
/// not parse it.
pub async fn inspect_mint(rpc_url: &str, mint: &str) -> ForgeResult<MintInspection> {
    let value = rpc::get_account_info(rpc_url, mint).await?;
    if value.is_null() {
        return Err(ForgeError::Other(format!("Mint {} not found on-chain", mint)));
    }

    let owner = value
        .get("owner")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    if owner != TOKEN_PROGRAM_ID && owner != TOKEN_2022_PROGRAM_ID {
        return Err(ForgeError::Other(format!(
            "{} is not an SPL token mint (owner {})",
            mint, owner
        )));
    }

    if let Some(info) = value.pointer("/data/parsed/info") {
        return inspection_from_parsed(mint, &owner, info);
    }

    // Raw account: data is ["<base64>", "base64"].
    let encoded = value
        .pointer("/data/0")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ForgeError::Other(format!("No account data for mint {}", mint)))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ForgeError::Other(format!("Malformed account data: {}", e)))?;
    let raw = parse_mint_account(&bytes)?;

    Ok(MintInspection {
        mint: mint.to_string(),
        owner_program: owner,
        decimals: raw.decimals,
        supply_raw: raw.supply,
        is_initialized: raw.is_initialized,
        mint_authority: raw.mint_authority.map(|k| encode_pubkey(&k)),
        freeze_authority: raw.freeze_authority.map(|k| encode_pubkey(&k)),
    })
}

fn inspection_from_parsed(
    mint: &str,
    owner: &str,
    info: &serde_json::Value,
) -> ForgeResult<MintInspection> {
    let decimals = info
        .get("decimals")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| ForgeError::Other("Mint info missing decimals".into()))? as u8;
    let supply_raw = info
        .get("supply")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| ForgeError::Other("Mint info missing supply".into()))?;

    Ok(MintInspection {
        mint: mint.to_string(),
        owner_program: owner.to_string(),
        decimals,
        supply_raw,
        is_initialized: info
            .get("isInitialized")
            .and_then(|v| v.as_bool())
            .unwrap_or(true),
        mint_authority: info
            .get("mintAuthority")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        freeze_authority: info
            .get("freezeAuthority")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    })
}

/// Decoded base fields of an SPL mint account.
pub(crate) struct RawMint {
    pub mint_authority: Option<[u8; 32]>,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: bool,
    pub freeze_authority: Option<[u8; 32]>,
}

/// Decode the 82-byte SPL mint layout. Token-2022 mints may carry
/// extension bytes past the base layout; those are ignored.
///
/// Layout: mint_authority COption (4-byte LE tag + 32), supply u64 LE,
/// decimals u8, is_initialized u8, freeze_authority COption (4 + 32).
pub(crate) fn parse_mint_account(data: &[u8]) -> ForgeResult<RawMint> {
    if data.len() < 82 {
        return Err(ForgeError::Other(format!(
            "Mint account data too short: {} bytes, expected at least 82",
            data.len()
        )));
    }

    let mint_authority = read_coption_key(&data[0..36])?;
    let supply = u64::from_le_bytes(
        data[36..44]
            .try_into()
            .map_err(|_| ForgeError::Other("Bad supply field".into()))?,
    );
    let decimals = data[44];
    let is_initialized = match data[45] {
        0 => false,
        1 => true,
        n => {
            return Err(ForgeError::Other(format!(
                "Bad is_initialized byte: {}",
                n
            )))
        }
    };
    let freeze_authority = read_coption_key(&data[46..82])?;

    Ok(RawMint {
        mint_authority,
        supply,
        decimals,
        is_initialized,
        freeze_authority,
    })
}

// Account-state COption<Pubkey>: u32 LE tag then the key bytes, key
// zeroed when the tag is 0.
fn read_coption_key(bytes: &[u8]) -> ForgeResult<Option<[u8; 32]>> {
    let tag = u32::from_le_bytes(
        bytes[0..4]
            .try_into()
            .map_err(|_| ForgeError::Other("Bad COption tag".into()))?,
    );
    match tag {
        0 => Ok(None),
        1 => {
            let mut key = [0u8; 32];
            key.copy_from_slice(&bytes[4..36]);
            Ok(Some(key))
        }
        n => Err(ForgeError::Other(format!("Bad COption tag: {}", n))),
    }
}
