use std::path::{Path, PathBuf};

use crate::cli::commands::io_helpers::{CliService, collect_credentials, read_input, write_output};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::messages::EncryptRequest;
use crate::core::models::scheme::Role;

/// Execute the `sealpost encrypt` command.
///
/// Encrypts the input to every recipient given with `-r` / `-R`. With no
/// recipients the passphrase is used, or a fresh one is generated and
/// shown once on stderr.
pub fn execute(
    service: &CliService,
    recipients: &[String],
    recipients_files: &[PathBuf],
    passphrase: Option<&str>,
    dest: Option<&Path>,
    input: Option<&str>,
) -> Result<()> {
    let request = EncryptRequest {
        recipients: collect_credentials(recipients, recipients_files, Role::Recipient)?,
        binary: false,
        content: read_input(input)?,
        passphrase: passphrase.map(String::from),
    };

    for r in &request.recipients {
        output::detail(&format!("Recipient: {r}"));
    }

    let result = if request.recipients.is_empty() {
        let sp = output::spinner("Deriving key from passphrase...");
        let result = service.encrypt(&request)?;
        output::finish_spinner(sp, "Encrypted with passphrase");
        result
    } else {
        let result = service.encrypt(&request)?;
        output::success(&format!(
            "Encrypted for {} recipient(s)",
            result.recipients.len()
        ));
        result
    };

    write_output(dest, &result.content)?;

    let supplied = passphrase.is_some_and(|p| !p.is_empty());
    if request.recipients.is_empty() && !supplied {
        match &result.passphrase {
            // Shown even with --quiet: it exists nowhere else.
            Some(generated) => eprintln!("Generated passphrase: {generated}"),
            None => output::warning(
                "A passphrase was generated but withheld by configuration; \
                 this ciphertext cannot be decrypted",
            ),
        }
    }

    Ok(())
}
