// mintforge engine — SPL token creation against opaque collaborators
// (Solana JSON-RPC node, Pinata pinning API, CoinGecko price feed).
//
// Module layout:
//   helpers      — amount parsing/formatting, pubkey decode/encode
//   form         — TOML token manifest parsing + field validation
//   wallet       — ed25519 keypair generate/load/save (payer and mint)
//   rpc          — JSON-RPC: balance, rent, blockhash, send, confirm, accounts
//   transaction  — legacy message encoding, compact-u16, signing, ATA PDA
//   instructions — System/SPL-Token/ATA instruction data encoders
//   ipfs         — Pinata pinFileToIPFS uploads, gateway URLs
//   metadata     — off-chain token metadata JSON
//   price        — CoinGecko SOL/USD spot price
//   creator      — the linear creation flow + cost estimation
//   inspect      — on-chain mint inspection (post-create verification)

pub(crate) mod helpers;

pub mod creator;
pub mod instructions;
pub mod transaction;
pub mod form;
pub mod inspect;
pub mod ipfs;
pub mod metadata;
pub mod price;
pub mod rpc;
pub mod wallet;

pub use creator::{create_token, estimate_cost};
pub use inspect::inspect_mint;
pub use wallet::Keypair;
