use std::path::{Path, PathBuf};

use crate::cli::commands::io_helpers::{CliService, collect_credentials, read_input, write_output};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::messages::DecryptRequest;
use crate::core::models::scheme::Role;

/// Execute the `sealpost decrypt` command.
///
/// Decrypts armored input with the identities given with `-i` / `-I`,
/// or with the passphrase when none are given.
pub fn execute(
    service: &CliService,
    identities: &[String],
    identity_files: &[PathBuf],
    passphrase: Option<&str>,
    dest: Option<&Path>,
    input: Option<&str>,
) -> Result<()> {
    let request = DecryptRequest {
        identities: collect_credentials(identities, identity_files, Role::Identity)?,
        binary: false,
        content: read_input(input)?,
        passphrase: passphrase.map(String::from),
    };

    let result = if request.identities.is_empty() {
        let sp = output::spinner("Deriving key from passphrase...");
        let result = service.decrypt(&request)?;
        output::finish_spinner(sp, "Decrypted with passphrase");
        result
    } else {
        let result = service.decrypt(&request)?;
        output::success("Decrypted");
        result
    };

    for id in &result.identities {
        output::detail(&format!("Identity: {id}"));
    }

    write_output(dest, &result.content)
}
