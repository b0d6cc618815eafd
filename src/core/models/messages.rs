use serde::{Deserialize, Serialize};

/// Body of an `/encrypt` request.
///
/// When `recipients` is non-empty the passphrase is ignored; otherwise
/// the supplied passphrase is used, or one is generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptRequest {
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Accepted for compatibility; output is always armored text.
    #[serde(default)]
    pub binary: bool,
    pub content: String,
    #[serde(default)]
    pub passphrase: Option<String>,
}

/// Body of a `/decrypt` request. Mirrors [`EncryptRequest`] for identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecryptRequest {
    #[serde(default)]
    pub identities: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    pub content: String,
    #[serde(default)]
    pub passphrase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptResult {
    pub content: String,
    pub recipients: Vec<String>,
    /// Only set when the passphrase was generated by this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecryptResult {
    pub content: String,
    pub identities: Vec<String>,
}

/// A freshly generated X25519 key pair. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// Non-empty passphrase from an optional request field.
pub(crate) fn explicit_passphrase(passphrase: &Option<String>) -> Option<&str> {
    passphrase.as_deref().filter(|p| !p.is_empty())
}
