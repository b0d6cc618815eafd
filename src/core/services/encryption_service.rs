use age::secrecy::ExposeSecret;

use crate::core::errors::{Result, SealpostError};
use crate::core::models::messages::{
    DecryptRequest, DecryptResult, EncryptRequest, EncryptResult, KeyPair, explicit_passphrase,
};
use crate::core::services::credential_resolver::CredentialResolver;
use crate::core::traits::cipher::CipherBackend;
use crate::core::traits::word_source::WordSource;

/// Orchestrates the encrypt and decrypt pipelines by combining a
/// `CipherBackend` with a `CredentialResolver`.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct EncryptionService<C: CipherBackend, W: WordSource> {
    pub cipher: C,
    pub resolver: CredentialResolver<W>,
    /// Echo a generated passphrase back in `EncryptResult::passphrase`.
    pub return_generated_passphrase: bool,
}

impl<C: CipherBackend, W: WordSource> EncryptionService<C, W> {
    /// Resolve recipients, encrypt the content and armor it.
    ///
    /// Fails before any encryption work if a single recipient is invalid.
    pub fn encrypt(&self, req: &EncryptRequest) -> Result<EncryptResult> {
        let resolved = self
            .resolver
            .resolve_recipients(&req.recipients, explicit_passphrase(&req.passphrase))?;

        tracing::debug!(
            cipher = self.cipher.name(),
            recipients = resolved.descriptors.len(),
            bytes = req.content.len(),
            "encrypting"
        );
        let content = self.cipher.encrypt(req.content.as_bytes(), &resolved.descriptors)?;

        let passphrase = if self.return_generated_passphrase {
            resolved
                .generated_passphrase
                .as_ref()
                .map(|p| p.expose_secret().to_string())
        } else {
            None
        };

        Ok(EncryptResult {
            content,
            recipients: resolved.descriptors.iter().map(|d| d.to_string()).collect(),
            passphrase,
        })
    }

    /// Resolve identities, unwrap the armor and decrypt the content.
    pub fn decrypt(&self, req: &DecryptRequest) -> Result<DecryptResult> {
        let identities = self
            .resolver
            .resolve_identities(&req.identities, explicit_passphrase(&req.passphrase))?;

        tracing::debug!(
            cipher = self.cipher.name(),
            identities = identities.len(),
            bytes = req.content.len(),
            "decrypting"
        );
        let plaintext = self.cipher.decrypt(&req.content, &identities)?;

        let content = String::from_utf8(plaintext).map_err(|_| SealpostError::Serialization {
            detail: "decrypted content is not valid UTF-8".into(),
        })?;

        Ok(DecryptResult {
            content,
            identities: identities.iter().map(|d| d.to_string()).collect(),
        })
    }

    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        self.cipher.generate_key_pair()
    }

    pub fn generate_passphrase(&self) -> String {
        self.resolver.generator().generate()
    }
}
