// Engine — Solana RPC Client
// rpc_call, get_balance, get_minimum_balance_for_rent_exemption,
// get_latest_blockhash, send_transaction, confirm_transaction,
// get_account_info, get_node_version

use std::time::{Duration, Instant};

use base64::Engine;
use log::{info, warn};

use crate::atoms::constants::{CONFIRM_POLL_INTERVAL_SECS, CONFIRM_TIMEOUT_SECS};
use crate::atoms::error::{ForgeError, ForgeResult};
use crate::atoms::types::TxStatus;

/// Make a Solana JSON-RPC call.
pub(crate) async fn rpc_call(
    rpc_url: &str,
    method: &str,
    params: serde_json::Value,
) -> ForgeResult<serde_json::Value> {
    let client = reqwest::Client::new();
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params
    });

    let resp = client
        .post(rpc_url)
        .json(&body)
        .timeout(Duration::from_secs(30))
        .send()
        .await?;

    let json: serde_json::Value = resp.json().await?;

    if let Some(error) = json.get("error") {
        return Err(ForgeError::rpc(method, rpc_error_text(error)));
    }

    json.get("result")
        .cloned()
        .ok_or_else(|| ForgeError::rpc(method, "missing 'result' field"))
}

/// Flatten a JSON-RPC error member into one line. `code` and `data`
/// ride along when present; sendTransaction preflight failures carry
/// the simulation logs in `data`.
fn rpc_error_text(error: &serde_json::Value) -> String {
    let message = match error.get("message").and_then(|m| m.as_str()) {
        Some(m) => m.to_string(),
        None => return error.to_string(),
    };
    let mut text = message;
    if let Some(code) = error.get("code").and_then(|c| c.as_i64()) {
        text.push_str(&format!(" (code {})", code));
    }
    match error.get("data") {
        Some(data) if !data.is_null() => text.push_str(&format!(": {}", data)),
        _ => {}
    }
    text
}

/// SOL balance in lamports.
pub async fn get_balance(rpc_url: &str, address: &str) -> ForgeResult<u64> {
    let result = rpc_call(rpc_url, "getBalance", serde_json::json!([address])).await?;
    result
        .get("value")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| ForgeError::rpc("getBalance", "unparseable balance"))
}

/// Lamports needed to keep an account of `size` bytes rent-exempt.
pub async fn get_minimum_balance_for_rent_exemption(rpc_url: &str, size: u64) -> ForgeResult<u64> {
    let result = rpc_call(
        rpc_url,
        "getMinimumBalanceForRentExemption",
        serde_json::json!([size]),
    )
    .await?;
    result
        .as_u64()
        .ok_or_else(|| ForgeError::rpc("getMinimumBalanceForRentExemption", "unparseable lamports"))
}

/// Latest finalized blockhash as raw bytes for the message header.
pub async fn get_latest_blockhash(rpc_url: &str) -> ForgeResult<[u8; 32]> {
    let result = rpc_call(
        rpc_url,
        "getLatestBlockhash",
        serde_json::json!([{ "commitment": "finalized" }]),
    )
    .await?;
    blockhash_from_result(&result)
}

fn blockhash_from_result(result: &serde_json::Value) -> ForgeResult<[u8; 32]> {
    let encoded = result
        .pointer("/value/blockhash")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ForgeError::rpc("getLatestBlockhash", "missing blockhash"))?;
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| ForgeError::rpc("getLatestBlockhash", format!("malformed blockhash: {}", e)))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ForgeError::rpc("getLatestBlockhash", "blockhash is not 32 bytes"))
}

/// Submit a fully signed transaction. Returns the signature (base58).
pub async fn send_transaction(rpc_url: &str, tx_bytes: &[u8]) -> ForgeResult<String> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(tx_bytes);
    let result = rpc_call(
        rpc_url,
        "sendTransaction",
        serde_json::json!([
            encoded,
            { "encoding": "base64", "skipPreflight": false, "maxRetries": 3 }
        ]),
    )
    .await?;
    let signature = result
        .as_str()
        .ok_or_else(|| ForgeError::rpc("sendTransaction", "missing signature"))?;
    info!("[rpc] Transaction submitted: {}", signature);
    Ok(signature.to_string())
}

// ── Transaction Confirmation ──────────────────────────────────────────

/// Poll getSignatureStatuses until the signature reaches confirmed or
/// finalized, fails, or the poll window runs out (then `Pending`; the
/// transaction may still land afterwards). Transient RPC errors during
/// the poll are logged and retried rather than surfaced.
pub async fn confirm_transaction(rpc_url: &str, signature: &str) -> ForgeResult<TxStatus> {
    let deadline = Instant::now() + Duration::from_secs(CONFIRM_TIMEOUT_SECS);
    loop {
        tokio::time::sleep(Duration::from_secs(CONFIRM_POLL_INTERVAL_SECS)).await;
        match rpc_call(
            rpc_url,
            "getSignatureStatuses",
            serde_json::json!([[signature]]),
        )
        .await
        {
            Ok(result) => {
                let entry = result
                    .pointer("/value/0")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                if let Some(status) = status_from_entry(&entry) {
                    info!("[rpc] {} is {}", signature, status);
                    return Ok(status);
                }
            }
            Err(e) => warn!("[rpc] Status poll failed, retrying: {}", e),
        }
        if Instant::now() >= deadline {
            warn!("[rpc] {} still pending after {}s", signature, CONFIRM_TIMEOUT_SECS);
            return Ok(TxStatus::Pending);
        }
    }
}

/// Terminal status from one getSignatureStatuses entry, `None` while
/// the cluster has not seen the signature or it is merely processed.
fn status_from_entry(entry: &serde_json::Value) -> Option<TxStatus> {
    if entry.is_null() {
        return None;
    }
    if let Some(err) = entry.get("err") {
        if !err.is_null() {
            return Some(TxStatus::Failed(err.to_string()));
        }
    }
    match entry.get("confirmationStatus").and_then(|v| v.as_str()) {
        Some("finalized") => Some(TxStatus::Finalized),
        Some("confirmed") => Some(TxStatus::Confirmed),
        _ => None,
    }
}

// ── Account Queries ───────────────────────────────────────────────────

/// `getAccountInfo` with jsonParsed encoding. Returns the `value`
/// object, which is null when the account does not exist.
pub async fn get_account_info(rpc_url: &str, address: &str) -> ForgeResult<serde_json::Value> {
    let result = rpc_call(
        rpc_url,
        "getAccountInfo",
        serde_json::json!([address, { "encoding": "jsonParsed" }]),
    )
    .await?;
    Ok(result.get("value").cloned().unwrap_or(serde_json::Value::Null))
}

/// Node software version, for connectivity checks.
pub async fn get_node_version(rpc_url: &str) -> ForgeResult<String> {
    let result = rpc_call(rpc_url, "getVersion", serde_json::json!([])).await?;
    result
        .get("solana-core")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| ForgeError::rpc("getVersion", "missing solana-core"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_text_keeps_code_and_data() {
        let error = serde_json::json!({
            "code": -32002,
            "message": "Transaction simulation failed: Attempt to debit an account but found no record of a prior credit.",
            "data": { "logs": ["Program 11111111111111111111111111111111 failed: insufficient funds"] }
        });
        let text = rpc_error_text(&error);
        assert!(text.contains("simulation failed"));
        assert!(text.contains("code -32002"));
        assert!(text.contains("insufficient funds"));
    }

    #[test]
    fn rpc_error_text_without_extras_is_the_message() {
        let error = serde_json::json!({ "message": "rate limited" });
        assert_eq!(rpc_error_text(&error), "rate limited");
    }

    #[test]
    fn rpc_error_text_falls_back_to_raw_json() {
        let error = serde_json::json!({ "weird": true });
        assert!(rpc_error_text(&error).contains("weird"));
    }

    #[test]
    fn blockhash_parses_from_result() {
        // base58 of 32 zero bytes.
        let result = serde_json::json!({
            "context": { "slot": 1 },
            "value": { "blockhash": "11111111111111111111111111111111", "lastValidBlockHeight": 100 }
        });
        assert_eq!(blockhash_from_result(&result).unwrap(), [0u8; 32]);
    }

    #[test]
    fn blockhash_rejects_missing_or_malformed() {
        assert!(blockhash_from_result(&serde_json::json!({ "value": {} })).is_err());
        let bad = serde_json::json!({ "value": { "blockhash": "abc" } });
        assert!(blockhash_from_result(&bad).is_err());
    }

    #[test]
    fn status_entry_null_is_unknown() {
        assert_eq!(status_from_entry(&serde_json::Value::Null), None);
    }

    #[test]
    fn status_entry_processed_keeps_polling() {
        let entry = serde_json::json!({
            "slot": 5, "confirmations": 0, "err": null, "confirmationStatus": "processed"
        });
        assert_eq!(status_from_entry(&entry), None);
    }

    #[test]
    fn status_entry_confirmed_and_finalized() {
        let confirmed = serde_json::json!({ "err": null, "confirmationStatus": "confirmed" });
        assert_eq!(status_from_entry(&confirmed), Some(TxStatus::Confirmed));

        let finalized = serde_json::json!({ "err": null, "confirmationStatus": "finalized" });
        assert_eq!(status_from_entry(&finalized), Some(TxStatus::Finalized));
    }

    #[test]
    fn status_entry_error_wins_over_status() {
        let entry = serde_json::json!({
            "err": { "InstructionError": [0, { "Custom": 1 }] },
            "confirmationStatus": "confirmed"
        });
        match status_from_entry(&entry) {
            Some(TxStatus::Failed(msg)) => assert!(msg.contains("InstructionError")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
