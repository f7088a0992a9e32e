// ── Atoms: Error Types ─────────────────────────────────────────────────────
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (I/O, RPC, Pinata, Wallet…).
//   • The `#[from]` attribute wires std/external error conversions.
//   • No variant carries secret material (keys, JWTs) in its message.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ForgeError {
    /// Filesystem or OS-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP / network failure (reqwest layer).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// TOML manifest parse failure.
    #[error("Manifest error: {0}")]
    Manifest(#[from] toml::de::Error),

    /// Solana JSON-RPC call returned an error, or its response was malformed.
    #[error("RPC error: {method}: {message}")]
    Rpc { method: String, message: String },

    /// Pinata pinning API failure (HTTP status plus the service's message).
    #[error("Pinata error ({status}): {message}")]
    Pinata { status: String, message: String },

    /// Missing or unusable configuration (RPC URL, JWT, keypair path…).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Keypair generation, parsing, or storage failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// A token form field failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for errors that do not yet have a dedicated variant.
    /// Prefer adding a specific variant over using this in new code.
    #[error("{0}")]
    Other(String),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl ForgeError {
    /// Create an RPC error with method name and message.
    pub fn rpc(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rpc { method: method.into(), message: message.into() }
    }

    /// Create a Pinata error with HTTP status and message.
    pub fn pinata(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pinata { status: status.into(), message: message.into() }
    }
}

// ── String bridges ─────────────────────────────────────────────────────────
// Allow `?` on `Option::ok_or("…")` and ad-hoc `format!` errors without
// boilerplate at every call site.

impl From<String> for ForgeError {
    fn from(s: String) -> Self {
        ForgeError::Other(s)
    }
}

impl From<&str> for ForgeError {
    fn from(s: &str) -> Self {
        ForgeError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All fallible operations in the crate return this type.
pub type ForgeResult<T> = Result<T, ForgeError>;
