use std::fmt;
use std::io::BufReader;

use age::secrecy::SecretString;
use sha2::{Digest, Sha256};

use crate::core::models::scheme::Scheme;

/// A resolved recipient, ready to be handed to the age encryptor.
///
/// Owned by the single pipeline invocation that created it.
pub enum RecipientDescriptor {
    PublicKey(age::x25519::Recipient),
    SshKey(age::ssh::Recipient),
    Passphrase(age::scrypt::Recipient),
}

impl RecipientDescriptor {
    /// Parse a recipient string already classified as `scheme`.
    ///
    /// The error is a short reason suitable for `InvalidCredential`.
    pub fn parse(scheme: Scheme, input: &str) -> Result<Self, String> {
        let input = input.trim();
        match scheme {
            Scheme::PublicKey => input
                .parse::<age::x25519::Recipient>()
                .map(Self::PublicKey)
                .map_err(|e: &str| e.to_string()),
            Scheme::SshKey => input
                .parse::<age::ssh::Recipient>()
                .map(Self::SshKey)
                .map_err(|e| format!("invalid SSH public key ({e:?})")),
            Scheme::Passphrase => Err("passphrases are not parsed from recipient strings".into()),
        }
    }

    /// Build the scrypt recipient for a passphrase.
    ///
    /// `work_factor` is log2(N); `None` keeps the library's calibrated default.
    pub fn from_passphrase(passphrase: SecretString, work_factor: Option<u8>) -> Self {
        let mut recipient = age::scrypt::Recipient::new(passphrase);
        if let Some(log_n) = work_factor {
            recipient.set_work_factor(log_n);
        }
        Self::Passphrase(recipient)
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Self::PublicKey(_) => Scheme::PublicKey,
            Self::SshKey(_) => Scheme::SshKey,
            Self::Passphrase(_) => Scheme::Passphrase,
        }
    }

    pub fn as_age(&self) -> &dyn age::Recipient {
        match self {
            Self::PublicKey(r) => r,
            Self::SshKey(r) => r,
            Self::Passphrase(r) => r,
        }
    }
}

impl fmt::Display for RecipientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicKey(r) => write!(f, "{r}"),
            Self::SshKey(r) => write!(f, "{r}"),
            Self::Passphrase(_) => f.write_str("scrypt"),
        }
    }
}

impl fmt::Debug for RecipientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecipientDescriptor({}: {self})", self.scheme())
    }
}

/// A resolved identity, ready to be handed to the age decryptor.
///
/// Rendering never exposes secret material: X25519 identities render as
/// their public recipient, SSH identities as a fingerprint of the key text.
pub enum IdentityDescriptor {
    PublicKey(age::x25519::Identity),
    SshKey {
        identity: age::ssh::Identity,
        fingerprint: String,
    },
    Passphrase(age::scrypt::Identity),
}

impl IdentityDescriptor {
    /// Parse an identity string already classified as `scheme`.
    pub fn parse(scheme: Scheme, input: &str) -> Result<Self, String> {
        let input = input.trim();
        match scheme {
            Scheme::PublicKey => input
                .parse::<age::x25519::Identity>()
                .map(Self::PublicKey)
                .map_err(|e: &str| e.to_string()),
            Scheme::SshKey => {
                let identity =
                    age::ssh::Identity::from_buffer(BufReader::new(input.as_bytes()), None)
                        .map_err(|e| format!("invalid SSH private key ({e})"))?;
                match identity {
                    age::ssh::Identity::Unencrypted(_) => Ok(Self::SshKey {
                        identity,
                        fingerprint: ssh_fingerprint(input),
                    }),
                    age::ssh::Identity::Encrypted(_) => {
                        Err("passphrase-protected SSH keys are not supported".into())
                    }
                    age::ssh::Identity::Unsupported(_) => Err("unsupported SSH key type".into()),
                }
            }
            Scheme::Passphrase => Err("passphrases are not parsed from identity strings".into()),
        }
    }

    /// Build the scrypt identity for a passphrase.
    ///
    /// `max_work_factor` caps how expensive a header the identity will try.
    pub fn from_passphrase(passphrase: SecretString, max_work_factor: Option<u8>) -> Self {
        let mut identity = age::scrypt::Identity::new(passphrase);
        if let Some(log_n) = max_work_factor {
            identity.set_max_work_factor(log_n);
        }
        Self::Passphrase(identity)
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Self::PublicKey(_) => Scheme::PublicKey,
            Self::SshKey { .. } => Scheme::SshKey,
            Self::Passphrase(_) => Scheme::Passphrase,
        }
    }

    pub fn as_age(&self) -> &dyn age::Identity {
        match self {
            Self::PublicKey(i) => i,
            Self::SshKey { identity, .. } => identity,
            Self::Passphrase(i) => i,
        }
    }
}

impl fmt::Display for IdentityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicKey(i) => write!(f, "{}", i.to_public()),
            Self::SshKey { fingerprint, .. } => write!(f, "ssh-identity:{fingerprint}"),
            Self::Passphrase(_) => f.write_str("scrypt"),
        }
    }
}

impl fmt::Debug for IdentityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityDescriptor({}: {self})", self.scheme())
    }
}

/// First 8 bytes of SHA-256 over the key text, hex encoded.
fn ssh_fingerprint(key_text: &str) -> String {
    let digest = Sha256::digest(key_text.as_bytes());
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}
