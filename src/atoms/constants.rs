// ── Atoms: Constants ───────────────────────────────────────────────────────
// All named constants for the crate live here: program IDs, account sizes,
// external endpoints, validation limits, and the fee figures the cost
// estimate is built from.

// ── Solana program IDs (base58) ────────────────────────────────────────────
// The System Program pubkey is all zero bytes; callers that need the raw
// form use `[0u8; 32]` directly.

pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";
pub const ATA_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

// ── Account sizes (bytes) ──────────────────────────────────────────────────
// Fixed layouts of the classic SPL Token program. Rent exemption for both
// accounts is fetched from the RPC node at creation time.

pub const MINT_ACCOUNT_SIZE: u64 = 82;
pub const TOKEN_ACCOUNT_SIZE: u64 = 165;

// ── Lamports ───────────────────────────────────────────────────────────────

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Base fee charged per transaction signature. The creation transaction
/// carries two signatures (payer + mint keypair).
pub const FEE_PER_SIGNATURE_LAMPORTS: u64 = 5_000;
pub const CREATE_TX_SIGNATURES: u64 = 2;

// ── External endpoints ─────────────────────────────────────────────────────

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Pinata file-pinning endpoint. Metadata JSON goes through the same
/// endpoint, wrapped as a `metadata.json` file part.
pub const PINATA_PIN_FILE_API: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// Default IPFS gateway host used when building public `image` URLs.
pub const DEFAULT_IPFS_GATEWAY: &str = "gateway.pinata.cloud";

/// CoinGecko simple-price endpoint for the SOL/USD display figure.
pub const COINGECKO_SOL_PRICE_API: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd";

// ── Token form limits ──────────────────────────────────────────────────────
// Name/symbol caps follow the ecosystem conventions wallets and explorers
// index by; the description cap keeps the pinned metadata JSON small.

pub const MAX_NAME_CHARS: usize = 32;
pub const MAX_SYMBOL_CHARS: usize = 10;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_DECIMALS: u8 = 9;
pub const MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted logo file extensions and the mime type each is pinned with.
pub const LOGO_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
];

// ── Form defaults ──────────────────────────────────────────────────────────

pub const DEFAULT_DECIMALS: u8 = 9;
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000_000;

// ── Confirmation polling ───────────────────────────────────────────────────
// After sendTransaction, getSignatureStatuses is polled until the signature
// reaches `confirmed`, fails on-chain, or the budget runs out.

pub const CONFIRM_POLL_INTERVAL_SECS: u64 = 2;
pub const CONFIRM_TIMEOUT_SECS: u64 = 30;
