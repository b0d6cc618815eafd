use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

use age::secrecy::ExposeSecret;

use crate::adapters::cipher::armor;
use crate::core::errors::{Result, SealpostError};
use crate::core::models::descriptor::{IdentityDescriptor, RecipientDescriptor};
use crate::core::models::messages::KeyPair;
use crate::core::traits::cipher::CipherBackend;

/// Age encryption backend: X25519, SSH and scrypt recipients with
/// ChaCha20-Poly1305 payloads, always ASCII-armored.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeBackend;

impl AgeBackend {
    pub fn new() -> Self {
        Self
    }

    /// Write a key pair to `path` in the age identity file format.
    ///
    /// Fails if `path` already exists; the check and the create are one step.
    pub fn write_identity_file(path: &Path, pair: &KeyPair) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let contents = format!(
            "# created: {created}\n# public key: {}\n{}\n",
            pair.public_key, pair.private_key
        );

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => SealpostError::Io(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("{} already exists, refusing to overwrite", path.display()),
                )),
                _ => SealpostError::Io(e),
            })?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }
}

impl CipherBackend for AgeBackend {
    fn encrypt(&self, plaintext: &[u8], recipients: &[RecipientDescriptor]) -> Result<String> {
        if recipients.is_empty() {
            return Err(SealpostError::EncryptionFailed {
                reason: "No recipients provided".into(),
            });
        }

        let encryptor = age::Encryptor::with_recipients(recipients.iter().map(|r| r.as_age()))
            .map_err(|e| SealpostError::EncryptionFailed {
                reason: format!("{e}"),
            })?;

        let mut output = Vec::new();
        let armored = armor::wrap(&mut output)?;

        let mut writer =
            encryptor
                .wrap_output(armored)
                .map_err(|e| SealpostError::EncryptionFailed {
                    reason: format!("Encryption stream failed: {e}"),
                })?;

        writer
            .write_all(plaintext)
            .map_err(|e| SealpostError::EncryptionFailed {
                reason: format!("Write failed: {e}"),
            })?;

        // Inner stream first (final chunk + tag), then the armor trailer.
        let armored_writer = writer
            .finish()
            .map_err(|e| SealpostError::EncryptionFailed {
                reason: format!("Encryption finish failed: {e}"),
            })?;

        armored_writer
            .finish()
            .map_err(|e| SealpostError::EncryptionFailed {
                reason: format!("Armor finish failed: {e}"),
            })?;

        String::from_utf8(output).map_err(|e| SealpostError::EncryptionFailed {
            reason: format!("Armored output is not UTF-8: {e}"),
        })
    }

    fn decrypt(&self, armored: &str, identities: &[IdentityDescriptor]) -> Result<Vec<u8>> {
        let raw = armor::unwrap(armored)?;

        let decryptor =
            age::Decryptor::new(&raw[..]).map_err(|e| SealpostError::DecryptionFailed {
                reason: format!("invalid age header: {e}"),
            })?;

        let mut reader = decryptor
            .decrypt(identities.iter().map(|i| i.as_age()))
            .map_err(|e| SealpostError::DecryptionFailed {
                reason: format!("{e}"),
            })?;

        let mut plaintext = Vec::new();
        reader
            .read_to_end(&mut plaintext)
            .map_err(|e| SealpostError::DecryptionFailed {
                reason: format!("payload authentication failed: {e}"),
            })?;

        Ok(plaintext)
    }

    fn generate_key_pair(&self) -> Result<KeyPair> {
        let identity = age::x25519::Identity::generate();
        let public_key = identity.to_public().to_string();
        let private_key = identity.to_string().expose_secret().to_string();

        // The secret must parse back to the same public key before we hand it out.
        let reparsed: age::x25519::Identity =
            private_key
                .parse()
                .map_err(|e: &str| SealpostError::KeyGenerationFailed {
                    reason: format!("generated identity does not parse: {e}"),
                })?;
        if reparsed.to_public().to_string() != public_key {
            return Err(SealpostError::KeyGenerationFailed {
                reason: "generated identity does not match its public key".into(),
            });
        }

        Ok(KeyPair {
            public_key,
            private_key,
        })
    }

    fn name(&self) -> &str {
        "age"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::scheme::Scheme;
    use age::secrecy::SecretString;

    const SSH_ED25519_PUB: &str = include_str!("../../../tests/fixtures/ssh_ed25519.pub");
    const SSH_ED25519_KEY: &str = include_str!("../../../tests/fixtures/ssh_ed25519");

    fn recipient(pair: &KeyPair) -> RecipientDescriptor {
        RecipientDescriptor::parse(Scheme::PublicKey, &pair.public_key).unwrap()
    }

    fn identity(pair: &KeyPair) -> IdentityDescriptor {
        IdentityDescriptor::parse(Scheme::PublicKey, &pair.private_key).unwrap()
    }

    #[test]
    fn generated_pair_has_canonical_prefixes() {
        let pair = AgeBackend.generate_key_pair().unwrap();
        assert!(pair.public_key.starts_with("age1"));
        assert!(pair.private_key.starts_with("AGE-SECRET-KEY-1"));
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let backend = AgeBackend::new();
        let pair = backend.generate_key_pair().unwrap();

        let plaintext = b"DATABASE_URL=postgres://localhost/mydb";
        let armored = backend.encrypt(plaintext, &[recipient(&pair)]).unwrap();
        assert!(armored.starts_with(armor::BEGIN_MARKER));

        let decrypted = backend.decrypt(&armored, &[identity(&pair)]).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encrypt_multiple_recipients() {
        let backend = AgeBackend::new();
        let pair1 = backend.generate_key_pair().unwrap();
        let pair2 = backend.generate_key_pair().unwrap();

        let armored = backend
            .encrypt(b"shared", &[recipient(&pair1), recipient(&pair2)])
            .unwrap();

        assert_eq!(backend.decrypt(&armored, &[identity(&pair1)]).unwrap(), b"shared");
        assert_eq!(backend.decrypt(&armored, &[identity(&pair2)]).unwrap(), b"shared");
    }

    #[test]
    fn ssh_round_trip() {
        let backend = AgeBackend::new();
        let recipient = RecipientDescriptor::parse(Scheme::SshKey, SSH_ED25519_PUB).unwrap();
        let identity = IdentityDescriptor::parse(Scheme::SshKey, SSH_ED25519_KEY).unwrap();

        let armored = backend.encrypt(b"over ssh", &[recipient]).unwrap();
        assert_eq!(backend.decrypt(&armored, &[identity]).unwrap(), b"over ssh");
    }

    #[test]
    fn scrypt_round_trip() {
        let backend = AgeBackend::new();
        let recipient = RecipientDescriptor::from_passphrase(
            SecretString::from("correct horse battery staple".to_string()),
            Some(10),
        );
        let armored = backend.encrypt(b"by passphrase", &[recipient]).unwrap();

        let right = IdentityDescriptor::from_passphrase(
            SecretString::from("correct horse battery staple".to_string()),
            None,
        );
        assert_eq!(backend.decrypt(&armored, &[right]).unwrap(), b"by passphrase");

        let wrong =
            IdentityDescriptor::from_passphrase(SecretString::from("wrong".to_string()), None);
        assert!(matches!(
            backend.decrypt(&armored, &[wrong]),
            Err(SealpostError::DecryptionFailed { .. })
        ));
    }

    #[test]
    fn decrypt_wrong_key_fails() {
        let backend = AgeBackend::new();
        let pair1 = backend.generate_key_pair().unwrap();
        let pair2 = backend.generate_key_pair().unwrap();

        let armored = backend.encrypt(b"secret", &[recipient(&pair1)]).unwrap();
        let result = backend.decrypt(&armored, &[identity(&pair2)]);
        assert!(matches!(result, Err(SealpostError::DecryptionFailed { .. })));
    }

    #[test]
    fn encrypt_no_recipients_fails() {
        let result = AgeBackend.encrypt(b"data", &[]);
        assert!(matches!(result, Err(SealpostError::EncryptionFailed { .. })));
    }

    #[test]
    fn write_identity_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("key.txt");
        let pair = AgeBackend.generate_key_pair().unwrap();

        AgeBackend::write_identity_file(&path, &pair).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# created: "));
        assert!(content.contains(&format!("# public key: {}", pair.public_key)));
        assert!(content.lines().any(|l| l == pair.private_key));
    }

    #[test]
    fn write_identity_file_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "existing").unwrap();

        let pair = AgeBackend.generate_key_pair().unwrap();
        let err = AgeBackend::write_identity_file(&path, &pair).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }
}
