// Engine — SOL Price Helper
// get_sol_price_usd

use std::time::Duration;

use crate::atoms::constants::COINGECKO_SOL_PRICE_API;
use crate::atoms::error::{ForgeError, ForgeResult};

/// Current USD price of SOL from CoinGecko's simple price endpoint.
/// Callers treat a failure as "price unavailable" and carry on;
/// nothing in the creation flow depends on it.
pub async fn get_sol_price_usd() -> ForgeResult<f64> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent("Mozilla/5.0 (compatible; mintforge/0.1)")
        .build()?;

    let resp = client.get(COINGECKO_SOL_PRICE_API).send().await?;
    if !resp.status().is_success() {
        return Err(ForgeError::Other(format!(
            "CoinGecko returned status {}",
            resp.status()
        )));
    }

    let body: serde_json::Value = resp.json().await?;
    extract_price(&body).ok_or_else(|| ForgeError::Other("No SOL price in CoinGecko response".into()))
}

fn extract_price(body: &serde_json::Value) -> Option<f64> {
    body.pointer("/solana/usd").and_then(|v| v.as_f64())
}
