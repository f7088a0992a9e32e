// Engine — Pinata IPFS Pinning
// pin_file, pin_json, pin_bytes, gateway_url

use std::path::Path;
use std::time::Duration;

use log::info;

use crate::atoms::constants::PINATA_PIN_FILE_API;
use crate::atoms::error::{ForgeError, ForgeResult};
use crate::atoms::types::PinReceipt;

/// Pin a local file and return its receipt.
pub async fn pin_file(jwt: &str, gateway: &str, path: &Path) -> ForgeResult<PinReceipt> {
    let bytes = std::fs::read(path)
        .map_err(|e| ForgeError::Other(format!("Cannot read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());
    let mime = super::form::logo_mime_type(path).unwrap_or("application/octet-stream");

    let size_bytes = bytes.len() as u64;
    let cid = pin_bytes(jwt, &file_name, mime, bytes).await?;
    let url = gateway_url(gateway, &cid);
    Ok(PinReceipt {
        file_name,
        size_bytes,
        cid,
        gateway_url: url,
    })
}

/// Pin a JSON value as a named file (compact encoding, the shape
/// wallets and explorers fetch for token metadata).
pub async fn pin_json(jwt: &str, file_name: &str, value: &serde_json::Value) -> ForgeResult<String> {
    let bytes = serde_json::to_vec(value)?;
    pin_bytes(jwt, file_name, "application/json", bytes).await
}

/// Core pinFileToIPFS call: multipart form with a single `file` part,
/// Bearer JWT auth. Returns the CID.
pub(crate) async fn pin_bytes(
    jwt: &str,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> ForgeResult<String> {
    let size = bytes.len();
    let file_part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)?;
    let form = reqwest::multipart::Form::new().part("file", file_part);

    let client = reqwest::Client::new();
    let resp = client
        .post(PINATA_PIN_FILE_API)
        .header("Authorization", format!("Bearer {}", jwt))
        .multipart(form)
        .timeout(Duration::from_secs(120))
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(ForgeError::pinata(status.to_string(), body));
    }

    let json: serde_json::Value = resp.json().await?;
    let cid = json
        .get("IpfsHash")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ForgeError::pinata("200 OK", "no IpfsHash in response"))?;

    info!("[ipfs] Pinned {} ({} bytes): {}", file_name, size, cid);
    Ok(cid.to_string())
}

/// Public gateway URL for a CID. The gateway may be a bare host or
/// carry its own scheme.
pub fn gateway_url(gateway: &str, cid: &str) -> String {
    let g = gateway.trim().trim_end_matches('/');
    if g.starts_with("http://") || g.starts_with("https://") {
        format!("{}/ipfs/{}", g, cid)
    } else {
        format!("https://{}/ipfs/{}", g, cid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_url_from_bare_host() {
        assert_eq!(
            gateway_url("gateway.pinata.cloud", "QmHash"),
            "https://gateway.pinata.cloud/ipfs/QmHash"
        );
    }

    #[test]
    fn gateway_url_keeps_scheme_and_trims_slash() {
        assert_eq!(
            gateway_url("https://my.gateway.dev/", "QmHash"),
            "https://my.gateway.dev/ipfs/QmHash"
        );
        assert_eq!(
            gateway_url("http://localhost:8080", "QmHash"),
            "http://localhost:8080/ipfs/QmHash"
        );
    }
}
