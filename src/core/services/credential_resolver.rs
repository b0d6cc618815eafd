use age::secrecy::SecretString;

use crate::core::errors::{InvalidCredential, Result, SealpostError};
use crate::core::models::descriptor::{IdentityDescriptor, RecipientDescriptor};
use crate::core::models::scheme::{Role, Scheme};
use crate::core::services::passphrase_generator::PassphraseGenerator;
use crate::core::traits::word_source::WordSource;

/// scrypt cost settings, as log2(N).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScryptSettings {
    /// Work factor used when encrypting. `None` lets age calibrate (~1s).
    pub work_factor: Option<u8>,
    /// Highest work factor accepted when decrypting.
    pub max_work_factor: Option<u8>,
}

/// Recipients resolved for one encrypt request.
#[derive(Debug)]
pub struct ResolvedRecipients {
    pub descriptors: Vec<RecipientDescriptor>,
    /// Set only when no passphrase was supplied and one had to be generated.
    pub generated_passphrase: Option<SecretString>,
}

/// Turns request strings into recipient/identity descriptors.
///
/// Every entry is classified and parsed; all failures are collected and
/// reported together, so a request never proceeds with a partial set.
pub struct CredentialResolver<W: WordSource> {
    generator: PassphraseGenerator<W>,
    scrypt: ScryptSettings,
}

impl<W: WordSource> CredentialResolver<W> {
    pub fn new(generator: PassphraseGenerator<W>, scrypt: ScryptSettings) -> Self {
        Self { generator, scrypt }
    }

    pub fn generator(&self) -> &PassphraseGenerator<W> {
        &self.generator
    }

    /// Resolve encrypt-side credentials.
    ///
    /// Non-empty `inputs` take precedence and `passphrase` is ignored.
    /// Otherwise the passphrase is used, or a fresh one is generated.
    pub fn resolve_recipients(
        &self,
        inputs: &[String],
        passphrase: Option<&str>,
    ) -> Result<ResolvedRecipients> {
        if !inputs.is_empty() {
            let descriptors = resolve_each(inputs, Role::Recipient, RecipientDescriptor::parse)?;
            tracing::debug!(count = descriptors.len(), "resolved recipients");
            return Ok(ResolvedRecipients {
                descriptors,
                generated_passphrase: None,
            });
        }

        let (phrase, generated) = match passphrase.filter(|p| !p.is_empty()) {
            Some(p) => (p.to_string(), false),
            None => {
                tracing::debug!(
                    words = self.generator.word_count(),
                    "no recipients or passphrase, generating passphrase"
                );
                (self.generator.generate(), true)
            }
        };

        let descriptor = RecipientDescriptor::from_passphrase(
            SecretString::from(phrase.clone()),
            self.scrypt.work_factor,
        );
        Ok(ResolvedRecipients {
            descriptors: vec![descriptor],
            generated_passphrase: generated.then(|| SecretString::from(phrase)),
        })
    }

    /// Resolve decrypt-side credentials.
    ///
    /// With no identity strings, a non-empty passphrase is required:
    /// a freshly generated one could never open existing ciphertext.
    pub fn resolve_identities(
        &self,
        inputs: &[String],
        passphrase: Option<&str>,
    ) -> Result<Vec<IdentityDescriptor>> {
        if !inputs.is_empty() {
            let descriptors = resolve_each(inputs, Role::Identity, IdentityDescriptor::parse)?;
            tracing::debug!(count = descriptors.len(), "resolved identities");
            return Ok(descriptors);
        }

        match passphrase.filter(|p| !p.is_empty()) {
            Some(p) => Ok(vec![IdentityDescriptor::from_passphrase(
                SecretString::from(p.to_string()),
                self.scrypt.max_work_factor,
            )]),
            None => Err(SealpostError::CredentialInvalid {
                entries: vec![InvalidCredential::new(
                    0,
                    Role::Identity,
                    "",
                    "no identities and no passphrase supplied",
                )],
            }),
        }
    }
}

/// Classify and parse every input, keeping order.
fn resolve_each<T>(
    inputs: &[String],
    role: Role,
    parse: impl Fn(Scheme, &str) -> std::result::Result<T, String>,
) -> Result<Vec<T>> {
    let mut resolved = Vec::with_capacity(inputs.len());
    let mut invalid = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        let outcome = match Scheme::classify(input, role) {
            Some(scheme) => parse(scheme, input),
            None => Err(unrecognized_reason(role)),
        };
        match outcome {
            Ok(descriptor) => resolved.push(descriptor),
            Err(reason) => invalid.push(InvalidCredential::new(index, role, input, reason)),
        }
    }

    if invalid.is_empty() {
        Ok(resolved)
    } else {
        tracing::debug!(%role, rejected = invalid.len(), "credential resolution failed");
        Err(SealpostError::CredentialInvalid { entries: invalid })
    }
}

fn unrecognized_reason(role: Role) -> String {
    match role {
        Role::Recipient => "unrecognized prefix (expected 'age1' or 'ssh-')".into(),
        Role::Identity => {
            "unrecognized prefix (expected 'AGE-SECRET-KEY-1', 'ssh-' or an OpenSSH private key)"
                .into()
        }
    }
}
