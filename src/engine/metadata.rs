// Engine — Off-chain Token Metadata
// TokenMetadata, Socials, build_metadata

use serde::{Deserialize, Serialize};

use crate::atoms::types::TokenForm;

/// The JSON document pinned next to the logo. Wallets and explorers
/// that resolve the metadata URL read `image` through the gateway;
/// links that were never provided are omitted rather than serialized
/// as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Socials::is_empty")]
    pub socials: Socials,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl Socials {
    fn is_empty(&self) -> bool {
        self.twitter.is_none()
            && self.telegram.is_none()
            && self.discord.is_none()
            && self.extra.is_none()
    }
}

/// Assemble the metadata document from a validated form and the pinned
/// logo's gateway URL.
pub fn build_metadata(form: &TokenForm, logo_url: &str) -> TokenMetadata {
    TokenMetadata {
        name: form.name.clone(),
        symbol: form.symbol.clone(),
        description: form.description.clone(),
        image: logo_url.to_string(),
        external_url: form.links.website.clone(),
        socials: Socials {
            twitter: form.links.twitter.clone(),
            telegram: form.links.telegram.clone(),
            discord: form.links.discord.clone(),
            extra: form.links.extra.clone(),
        },
    }
}
