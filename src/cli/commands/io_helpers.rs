use std::io::Read;
use std::path::Path;

use crate::adapters::cipher::age_backend::AgeBackend;
use crate::adapters::wordlist::word_list::{EmbeddedWordList, FileWordList};
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{InvalidCredential, Result, SealpostError};
use crate::core::models::scheme::Role;
use crate::core::services::credential_resolver::CredentialResolver;
use crate::core::services::encryption_service::EncryptionService;
use crate::core::services::passphrase_generator::PassphraseGenerator;
use crate::core::traits::word_source::WordSource;

/// The service as wired for the command line.
pub type CliService = EncryptionService<AgeBackend, Box<dyn WordSource>>;

/// The configured word list: a custom file, or the embedded one.
pub fn word_source(config: &AppConfig) -> Result<Box<dyn WordSource>> {
    match &config.passphrase.wordlist {
        Some(path) => {
            let list = FileWordList::load(path)?;
            output::detail(&format!(
                "Word list: {} ({} words)",
                list.path().display(),
                list.words().len()
            ));
            Ok(Box::new(list))
        }
        None => Ok(Box::new(EmbeddedWordList)),
    }
}

/// Wire the age backend, word list and resolver from configuration.
pub fn build_service(config: &AppConfig) -> Result<CliService> {
    let generator = PassphraseGenerator::with_shape(
        word_source(config)?,
        config.passphrase.words,
        &config.passphrase.separator,
    )?;

    Ok(EncryptionService {
        cipher: AgeBackend::new(),
        resolver: CredentialResolver::new(generator, config.scrypt_settings()),
        return_generated_passphrase: config.response.return_generated_passphrase,
    })
}

/// Read the whole input: a file path, or stdin for `None` / `-`.
pub fn read_input(source: Option<&str>) -> Result<String> {
    match source {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|_| SealpostError::FileNotFound {
            path: path.into(),
        }),
    }
}

/// Write the result to a file, or to stdout when no path is given.
pub fn write_output(dest: Option<&Path>, content: &str) -> Result<()> {
    match dest {
        Some(path) => {
            std::fs::write(path, content)?;
            output::success(&format!("Saved to {}", path.display()));
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Read recipients or identities from a file.
///
/// A file holding a PEM block (OpenSSH private key) is one entry;
/// otherwise each non-empty line not starting with `#` is an entry.
pub fn read_credential_file(path: &Path, role: Role) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|_| SealpostError::FileNotFound {
        path: path.to_path_buf(),
    })?;

    let entries: Vec<String> = if content.contains("-----BEGIN ") {
        vec![content]
    } else {
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(String::from)
            .collect()
    };

    if entries.is_empty() {
        return Err(SealpostError::CredentialInvalid {
            entries: vec![InvalidCredential::new(
                0,
                role,
                &path.display().to_string(),
                "file contains no keys",
            )],
        });
    }
    Ok(entries)
}

/// Inline credentials followed by the contents of each file, in order.
pub fn collect_credentials(
    inline: &[String],
    files: &[impl AsRef<Path>],
    role: Role,
) -> Result<Vec<String>> {
    let mut all = inline.to_vec();
    for file in files {
        all.extend(read_credential_file(file.as_ref(), role)?);
    }
    Ok(all)
}
