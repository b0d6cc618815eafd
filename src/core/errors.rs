use std::fmt;
use std::path::PathBuf;

use crate::core::models::scheme::Role;

/// Stable tag for each error family.
///
/// The dispatcher maps these to status codes and logs them; the
/// message text of the error itself is what reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialInvalid,
    EnvelopeMalformed,
    DecryptionFailed,
    Serialization,
    Encryption,
    KeyGeneration,
    Config,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CredentialInvalid => "credential_invalid",
            Self::EnvelopeMalformed => "envelope_malformed",
            Self::DecryptionFailed => "decryption_failed",
            Self::Serialization => "serialization",
            Self::Encryption => "encryption",
            Self::KeyGeneration => "key_generation",
            Self::Config => "config",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

/// One rejected recipient or identity string.
///
/// `preview` never holds more than a short prefix of the input so that
/// private key material does not end up in responses or logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCredential {
    pub index: usize,
    pub role: Role,
    pub preview: String,
    pub reason: String,
}

impl InvalidCredential {
    const PREVIEW_CHARS: usize = 12;

    pub fn new(index: usize, role: Role, input: &str, reason: impl Into<String>) -> Self {
        let trimmed = input.trim();
        let mut preview: String = trimmed.chars().take(Self::PREVIEW_CHARS).collect();
        if trimmed.chars().count() > Self::PREVIEW_CHARS {
            preview.push('…');
        }
        Self {
            index,
            role,
            preview,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} '{}': {}",
            self.role, self.index, self.preview, self.reason
        )
    }
}

fn list_entries(entries: &[InvalidCredential]) -> String {
    entries
        .iter()
        .map(|e| format!("    → {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All domain errors for Sealpost.
///
/// Each variant carries enough context to diagnose the failure without
/// exposing plaintext, passphrases or private keys.
#[derive(Debug, thiserror::Error)]
pub enum SealpostError {
    #[error(
        "Invalid credentials ({} rejected):\n{}\n\n  \
         Recipients must start with 'age1' or 'ssh-'.\n  \
         Identities must start with 'AGE-SECRET-KEY-1', 'ssh-' \
         or be an unencrypted OpenSSH private key.",
        .entries.len(),
        list_entries(.entries)
    )]
    CredentialInvalid { entries: Vec<InvalidCredential> },

    #[error(
        "Malformed envelope: {reason}\n\n  \
         Expected ASCII armor between '-----BEGIN AGE ENCRYPTED FILE-----' \
         and '-----END AGE ENCRYPTED FILE-----'."
    )]
    EnvelopeMalformed { reason: String },

    #[error(
        "Decryption failed: {reason}\n\n  \
         Solutions:\n    \
         → Check that the identity matches one of the recipients used to encrypt\n    \
         → Check the passphrase for passphrase-encrypted content\n    \
         → Make sure the ciphertext was not modified in transit"
    )]
    DecryptionFailed { reason: String },

    #[error("Serialization error: {detail}")]
    Serialization { detail: String },

    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    #[error("Key generation failed: {reason}")]
    KeyGenerationFailed { reason: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SealpostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CredentialInvalid { .. } => ErrorKind::CredentialInvalid,
            Self::EnvelopeMalformed { .. } => ErrorKind::EnvelopeMalformed,
            Self::DecryptionFailed { .. } => ErrorKind::DecryptionFailed,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::EncryptionFailed { .. } => ErrorKind::Encryption,
            Self::KeyGenerationFailed { .. } => ErrorKind::KeyGeneration,
            Self::InvalidConfig { .. } => ErrorKind::Config,
            Self::FileNotFound { .. } | Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for SealpostError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            detail: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SealpostError>;
