// Engine — Wallet Keypairs
// Keypair (generate/load/save/address), default_keypair_path, load_payer

use std::path::{Path, PathBuf};

use ed25519_dalek::SigningKey;
use log::info;
use rand_core::OsRng;
use zeroize::Zeroize;

use crate::atoms::error::{ForgeError, ForgeResult};

/// An ed25519 keypair in Solana's conventions: the address is the
/// base58 public key, the on-disk form is the 64-byte secret+public
/// concatenation. The inner signing key zeroizes itself on drop.
pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        Keypair { signing }
    }

    pub fn from_secret_bytes(secret: &[u8; 32]) -> Self {
        Keypair {
            signing: SigningKey::from_bytes(secret),
        }
    }

    /// Accept 64-byte secret+public (Solana keypair convention, public
    /// half cross-checked) or a bare 32-byte secret.
    pub fn from_bytes(bytes: &[u8]) -> ForgeResult<Self> {
        match bytes.len() {
            64 => {
                let mut secret = [0u8; 32];
                secret.copy_from_slice(&bytes[..32]);
                let keypair = Keypair::from_secret_bytes(&secret);
                secret.zeroize();
                if keypair.public_key_bytes() != bytes[32..] {
                    return Err(ForgeError::Wallet(
                        "Keypair public half does not match its secret half".into(),
                    ));
                }
                Ok(keypair)
            }
            32 => {
                let mut secret = [0u8; 32];
                secret.copy_from_slice(bytes);
                let keypair = Keypair::from_secret_bytes(&secret);
                secret.zeroize();
                Ok(keypair)
            }
            n => Err(ForgeError::Wallet(format!(
                "Keypair must be 64 or 32 bytes, got {}",
                n
            ))),
        }
    }

    pub fn from_base58(encoded: &str) -> ForgeResult<Self> {
        let mut bytes = bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| ForgeError::Wallet(format!("Invalid base58 keypair: {}", e)))?;
        let keypair = Keypair::from_bytes(&bytes);
        bytes.zeroize();
        keypair
    }

    /// Load from a keypair file. Two formats are recognized: the JSON
    /// byte array `solana-keygen` writes, and a base58 string of the
    /// 64-byte keypair.
    pub fn load(path: &Path) -> ForgeResult<Self> {
        let mut contents = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::Wallet(format!("Cannot read keypair file {}: {}", path.display(), e))
        })?;
        let trimmed = contents.trim();
        let result = if trimmed.starts_with('[') {
            let mut bytes: Vec<u8> = serde_json::from_str(trimmed).map_err(|e| {
                ForgeError::Wallet(format!("Malformed keypair JSON in {}: {}", path.display(), e))
            })?;
            let keypair = Keypair::from_bytes(&bytes);
            bytes.zeroize();
            keypair
        } else {
            Keypair::from_base58(trimmed)
        };
        contents.zeroize();
        result
    }

    /// Write the 64-byte keypair as a JSON byte array, 0600 on unix.
    pub fn save(&self, path: &Path) -> ForgeResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut bytes = self.to_bytes().to_vec();
        let mut json = serde_json::to_string(&bytes)?;
        bytes.zeroize();
        let write_result = std::fs::write(path, &json);
        json.zeroize();
        write_result?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        info!("[wallet] Keypair written to {}", path.display());
        Ok(())
    }

    /// Base58 address (the public key).
    pub fn address(&self) -> String {
        bs58::encode(self.public_key_bytes()).into_string()
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.signing.to_bytes());
        out[32..].copy_from_slice(&self.public_key_bytes());
        out
    }
}

/// `~/.config/mintforge/keypair.json` (platform config dir).
pub fn default_keypair_path() -> ForgeResult<PathBuf> {
    let config = dirs::config_dir()
        .ok_or_else(|| ForgeError::Config("Cannot determine the user config directory".into()))?;
    Ok(config.join("mintforge").join("keypair.json"))
}

/// Load the payer keypair, pointing the user at `wallet new` when the
/// file does not exist yet.
pub fn load_payer(path: &Path) -> ForgeResult<Keypair> {
    if !path.exists() {
        return Err(ForgeError::Wallet(format!(
            "No keypair at {}. Run `mintforge wallet new` to create one, or pass --keypair.",
            path.display()
        )));
    }
    Keypair::load(path)
}
