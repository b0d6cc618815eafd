use crate::core::errors::Result;
use crate::core::models::descriptor::{IdentityDescriptor, RecipientDescriptor};
use crate::core::models::messages::KeyPair;

/// Port for the authenticated encryption backend.
///
/// The implementation lives in `adapters::cipher` (AgeBackend).
/// Services only depend on this trait, never on a concrete backend.
pub trait CipherBackend: Send + Sync {
    /// Encrypt plaintext to every recipient and return the armored envelope.
    ///
    /// Output is all-or-nothing: on error no partial ciphertext escapes.
    fn encrypt(&self, plaintext: &[u8], recipients: &[RecipientDescriptor]) -> Result<String>;

    /// Unwrap the armored envelope and decrypt it with the first matching identity.
    fn decrypt(&self, armored: &str, identities: &[IdentityDescriptor]) -> Result<Vec<u8>>;

    /// Generate a fresh native key pair.
    fn generate_key_pair(&self) -> Result<KeyPair>;

    /// Human-readable name of this backend (e.g. "age").
    fn name(&self) -> &str;
}
