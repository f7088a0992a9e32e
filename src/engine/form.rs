// Token Manifest — Parsing, validation, and conversion
// parse_manifest, manifest_to_form, validate_form, validate_logo_file,
// load_form, logo_mime_type

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::atoms::constants::{
    DEFAULT_DECIMALS, DEFAULT_TOTAL_SUPPLY, LOGO_MIME_TYPES, MAX_DECIMALS, MAX_DESCRIPTION_CHARS,
    MAX_LOGO_BYTES, MAX_NAME_CHARS, MAX_SYMBOL_CHARS,
};
use crate::atoms::error::{ForgeError, ForgeResult};
use crate::atoms::types::{TokenForm, TokenLinks};

// ── Manifest Schema ───────────────────────────────────────────────────

/// A `token.toml` manifest as written by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenManifest {
    pub token: TokenSection,
    #[serde(default)]
    pub links: TokenLinks,
    #[serde(default)]
    pub authorities: AuthoritySection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSection {
    pub name: String,
    pub symbol: String,
    pub description: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_total_supply")]
    pub total_supply: u64,
    pub logo: PathBuf,
    /// Links may also be nested under `[token.links]`.
    #[serde(default)]
    pub links: TokenLinks,
}

/// Both revocations default on: a fixed-supply, unfreezable token is
/// the expected outcome unless the manifest says otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthoritySection {
    #[serde(default = "default_true")]
    pub revoke_mint: bool,
    #[serde(default = "default_true")]
    pub revoke_freeze: bool,
}

impl Default for AuthoritySection {
    fn default() -> Self {
        AuthoritySection {
            revoke_mint: true,
            revoke_freeze: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

fn default_total_supply() -> u64 {
    DEFAULT_TOTAL_SUPPLY
}

// ── Parsing ───────────────────────────────────────────────────────────

/// Parse a `token.toml` string into a `TokenManifest`.
pub fn parse_manifest(content: &str) -> ForgeResult<TokenManifest> {
    Ok(toml::from_str::<TokenManifest>(content)?)
}

/// Convert a parsed manifest into a normalized `TokenForm`: fields
/// trimmed, the symbol uppercased, empty links dropped, and the logo
/// path resolved against `base_dir` (the manifest's directory).
pub fn manifest_to_form(manifest: &TokenManifest, base_dir: &Path) -> TokenForm {
    let logo = if manifest.token.logo.is_absolute() {
        manifest.token.logo.clone()
    } else {
        base_dir.join(&manifest.token.logo)
    };

    // Links can sit at the top level or nested under [token]; the
    // top-level table wins field by field.
    let nested = &manifest.token.links;

    TokenForm {
        name: manifest.token.name.trim().to_string(),
        symbol: manifest.token.symbol.trim().to_uppercase(),
        description: manifest.token.description.trim().to_string(),
        decimals: manifest.token.decimals,
        total_supply: manifest.token.total_supply,
        logo,
        links: TokenLinks {
            website: normalize_link(&manifest.links.website)
                .or_else(|| normalize_link(&nested.website)),
            twitter: normalize_link(&manifest.links.twitter)
                .or_else(|| normalize_link(&nested.twitter)),
            telegram: normalize_link(&manifest.links.telegram)
                .or_else(|| normalize_link(&nested.telegram)),
            discord: normalize_link(&manifest.links.discord)
                .or_else(|| normalize_link(&nested.discord)),
            extra: normalize_link(&manifest.links.extra)
                .or_else(|| normalize_link(&nested.extra)),
        },
        revoke_mint: manifest.authorities.revoke_mint,
        revoke_freeze: manifest.authorities.revoke_freeze,
    }
}

pub(crate) fn normalize_link(link: &Option<String>) -> Option<String> {
    link.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read, parse, normalize, and validate a manifest file, including the
/// logo on disk. This is the one entry point that touches the
/// filesystem; everything below it is pure.
pub fn load_form(path: &Path) -> ForgeResult<TokenForm> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ForgeError::Config(format!("Cannot read manifest {}: {}", path.display(), e)))?;
    let manifest = parse_manifest(&content)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let form = manifest_to_form(&manifest, base_dir);
    validate_form(&form)?;
    validate_logo_file(&form.logo)?;
    Ok(form)
}

// ── Validation ────────────────────────────────────────────────────────

/// Validate field rules. Returns the first violation.
pub fn validate_form(form: &TokenForm) -> ForgeResult<()> {
    if form.name.is_empty() {
        return Err(ForgeError::Validation("Token name is required".into()));
    }
    if form.name.chars().count() > MAX_NAME_CHARS {
        return Err(ForgeError::Validation(format!(
            "Token name too long ({} chars, max {})",
            form.name.chars().count(),
            MAX_NAME_CHARS
        )));
    }
    if form.symbol.is_empty() {
        return Err(ForgeError::Validation("Token symbol is required".into()));
    }
    if form.symbol.chars().count() > MAX_SYMBOL_CHARS {
        return Err(ForgeError::Validation(format!(
            "Token symbol too long ({} chars, max {})",
            form.symbol.chars().count(),
            MAX_SYMBOL_CHARS
        )));
    }
    if !form.symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ForgeError::Validation(format!(
            "Token symbol '{}' contains invalid characters (use A-Z, 0-9)",
            form.symbol
        )));
    }
    if form.description.is_empty() {
        return Err(ForgeError::Validation("Token description is required".into()));
    }
    if form.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ForgeError::Validation(format!(
            "Token description too long ({} chars, max {})",
            form.description.chars().count(),
            MAX_DESCRIPTION_CHARS
        )));
    }
    if form.decimals > MAX_DECIMALS {
        return Err(ForgeError::Validation(format!(
            "Decimals {} out of range (max {})",
            form.decimals, MAX_DECIMALS
        )));
    }
    if form.total_supply == 0 {
        return Err(ForgeError::Validation("Total supply must be at least 1".into()));
    }
    // Rejects supplies whose raw amount would not fit the MintTo u64.
    super::helpers::raw_supply(form.total_supply, form.decimals)?;

    if logo_mime_type(&form.logo).is_none() {
        return Err(ForgeError::Validation(format!(
            "Unsupported logo format '{}' (use png, jpg, jpeg, gif, webp, or svg)",
            form.logo.display()
        )));
    }

    for (label, link) in [
        ("website", &form.links.website),
        ("twitter", &form.links.twitter),
        ("telegram", &form.links.telegram),
        ("discord", &form.links.discord),
        ("extra", &form.links.extra),
    ] {
        if let Some(url) = link {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ForgeError::Validation(format!(
                    "Link '{}' for {} must start with http:// or https://",
                    url, label
                )));
            }
        }
    }

    Ok(())
}

/// The on-disk checks for the logo: present, a regular file, and small
/// enough to pin.
pub fn validate_logo_file(path: &Path) -> ForgeResult<()> {
    let meta = std::fs::metadata(path).map_err(|_| {
        ForgeError::Validation(format!("Logo file not found: {}", path.display()))
    })?;
    if !meta.is_file() {
        return Err(ForgeError::Validation(format!(
            "Logo is not a regular file: {}",
            path.display()
        )));
    }
    if meta.len() > MAX_LOGO_BYTES {
        return Err(ForgeError::Validation(format!(
            "Logo too large ({} bytes, max {})",
            meta.len(),
            MAX_LOGO_BYTES
        )));
    }
    Ok(())
}

/// MIME type for a logo path by extension, case-insensitive.
pub(crate) fn logo_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    LOGO_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_MANIFEST: &str = r#"
[token]
name = "Doge Prime"
symbol = "dogep"
description = "The premier doge on Solana."
decimals = 6
total_supply = 420690000
logo = "assets/logo.png"

[links]
website = "https://dogeprime.io"
twitter = "https://x.com/dogeprime"
telegram = "https://t.me/dogeprime"

[authorities]
revoke_mint = false
revoke_freeze = true
"#;

    const MINIMAL_MANIFEST: &str = r#"
[token]
name = "Simple"
symbol = "SMPL"
description = "A minimal token"
logo = "logo.png"
"#;

    fn valid_form() -> TokenForm {
        manifest_to_form(&parse_manifest(MINIMAL_MANIFEST).unwrap(), Path::new("."))
    }

    #[test]
    fn parse_full_manifest() {
        let manifest = parse_manifest(FULL_MANIFEST).unwrap();
        assert_eq!(manifest.token.name, "Doge Prime");
        assert_eq!(manifest.token.symbol, "dogep");
        assert_eq!(manifest.token.decimals, 6);
        assert_eq!(manifest.token.total_supply, 420_690_000);
        assert_eq!(manifest.links.website.as_deref(), Some("https://dogeprime.io"));
        assert!(manifest.links.discord.is_none());
        assert!(!manifest.authorities.revoke_mint);
        assert!(manifest.authorities.revoke_freeze);
    }

    #[test]
    fn parse_minimal_manifest_applies_defaults() {
        let manifest = parse_manifest(MINIMAL_MANIFEST).unwrap();
        assert_eq!(manifest.token.decimals, 9);
        assert_eq!(manifest.token.total_supply, 1_000_000_000);
        assert!(manifest.authorities.revoke_mint);
        assert!(manifest.authorities.revoke_freeze);
        assert!(manifest.links.website.is_none());
    }

    #[test]
    fn convert_normalizes_and_resolves_logo() {
        let manifest = parse_manifest(FULL_MANIFEST).unwrap();
        let form = manifest_to_form(&manifest, Path::new("/home/user/token"));
        assert_eq!(form.symbol, "DOGEP");
        assert_eq!(form.logo, PathBuf::from("/home/user/token/assets/logo.png"));
        assert!(!form.revoke_mint);
    }

    #[test]
    fn convert_keeps_absolute_logo_and_drops_blank_links() {
        let toml_str = r#"
[token]
name = "Abs"
symbol = "ABS"
description = "d"
logo = "/tmp/logo.png"

[links]
website = "   "
"#;
        let manifest = parse_manifest(toml_str).unwrap();
        let form = manifest_to_form(&manifest, Path::new("/elsewhere"));
        assert_eq!(form.logo, PathBuf::from("/tmp/logo.png"));
        assert!(form.links.website.is_none());
    }

    #[test]
    fn links_nested_under_token_are_kept() {
        let toml_str = r#"
[token]
name = "Nested"
symbol = "NST"
description = "d"
logo = "logo.png"

[token.links]
website = "https://nested.io"
telegram = "https://t.me/nested"
"#;
        let manifest = parse_manifest(toml_str).unwrap();
        let form = manifest_to_form(&manifest, Path::new("."));
        assert_eq!(form.links.website.as_deref(), Some("https://nested.io"));
        assert_eq!(form.links.telegram.as_deref(), Some("https://t.me/nested"));
        assert!(form.links.twitter.is_none());
    }

    #[test]
    fn top_level_links_win_over_nested() {
        let toml_str = r#"
[token]
name = "Both"
symbol = "BOTH"
description = "d"
logo = "logo.png"

[token.links]
website = "https://nested.io"
discord = "https://discord.gg/nested"

[links]
website = "https://top.io"
"#;
        let manifest = parse_manifest(toml_str).unwrap();
        let form = manifest_to_form(&manifest, Path::new("."));
        assert_eq!(form.links.website.as_deref(), Some("https://top.io"));
        assert_eq!(form.links.discord.as_deref(), Some("https://discord.gg/nested"));
    }

    #[test]
    fn validate_valid_form() {
        assert!(validate_form(&valid_form()).is_ok());
    }

    #[test]
    fn validate_missing_name() {
        let mut form = valid_form();
        form.name = String::new();
        let err = validate_form(&form).unwrap_err();
        assert!(err.to_string().contains("name is required"));
    }

    #[test]
    fn validate_name_too_long() {
        let mut form = valid_form();
        form.name = "x".repeat(33);
        assert!(validate_form(&form).unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn validate_symbol_rules() {
        let mut form = valid_form();
        form.symbol = "TOOLONGSYMBOL".into();
        assert!(validate_form(&form).unwrap_err().to_string().contains("too long"));

        form.symbol = "DOGE!".into();
        assert!(validate_form(&form)
            .unwrap_err()
            .to_string()
            .contains("invalid characters"));
    }

    #[test]
    fn validate_description_too_long() {
        let mut form = valid_form();
        form.description = "x".repeat(501);
        assert!(validate_form(&form).unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn validate_decimals_out_of_range() {
        let mut form = valid_form();
        form.decimals = 10;
        assert!(validate_form(&form).unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn validate_supply_bounds() {
        let mut form = valid_form();
        form.total_supply = 0;
        assert!(validate_form(&form).unwrap_err().to_string().contains("at least 1"));

        // 1e11 tokens at 9 decimals overflows the raw u64 amount.
        form.total_supply = 100_000_000_000;
        form.decimals = 9;
        assert!(validate_form(&form).unwrap_err().to_string().contains("overflow"));
    }

    #[test]
    fn validate_logo_extension() {
        let mut form = valid_form();
        form.logo = PathBuf::from("logo.txt");
        assert!(validate_form(&form)
            .unwrap_err()
            .to_string()
            .contains("Unsupported logo format"));
    }

    #[test]
    fn validate_link_scheme() {
        let mut form = valid_form();
        form.links.website = Some("ftp://dogeprime.io".into());
        assert!(validate_form(&form)
            .unwrap_err()
            .to_string()
            .contains("http"));
    }

    #[test]
    fn mime_lookup_is_case_insensitive() {
        assert_eq!(logo_mime_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(logo_mime_type(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(logo_mime_type(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(logo_mime_type(Path::new("a.svg")), Some("image/svg+xml"));
        assert_eq!(logo_mime_type(Path::new("a.txt")), None);
        assert_eq!(logo_mime_type(Path::new("noext")), None);
    }

    #[test]
    fn logo_file_checks() {
        let dir = std::env::temp_dir();
        let ok_path = dir.join(format!("mintforge-form-{}-ok.png", std::process::id()));
        std::fs::write(&ok_path, b"png bytes").unwrap();
        assert!(validate_logo_file(&ok_path).is_ok());
        std::fs::remove_file(&ok_path).unwrap();

        let missing = dir.join("mintforge-form-definitely-missing.png");
        assert!(validate_logo_file(&missing)
            .unwrap_err()
            .to_string()
            .contains("not found"));

        let big_path = dir.join(format!("mintforge-form-{}-big.png", std::process::id()));
        std::fs::write(&big_path, vec![0u8; (MAX_LOGO_BYTES + 1) as usize]).unwrap();
        assert!(validate_logo_file(&big_path)
            .unwrap_err()
            .to_string()
            .contains("too large"));
        std::fs::remove_file(&big_path).unwrap();
    }

    #[test]
    fn invalid_toml_syntax() {
        assert!(parse_manifest("this is not valid toml {{{}}}").is_err());
    }
}
