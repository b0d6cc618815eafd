use std::path::Path;

use crate::adapters::cipher::age_backend::AgeBackend;
use crate::cli::commands::io_helpers::CliService;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `sealpost keygen` command.
///
/// Without `--output`, prints the key pair as JSON (the `/keygen` shape).
/// With it, writes an age identity file and prints only the public key.
pub fn execute(service: &CliService, dest: Option<&Path>) -> Result<()> {
    let pair = service.generate_key_pair()?;

    match dest {
        None => println!("{}", serde_json::to_string_pretty(&pair)?),
        Some(path) => {
            AgeBackend::write_identity_file(path, &pair)?;
            output::success(&format!("Private key: {}", path.display()));
            println!("{}", pair.public_key);
        }
    }

    Ok(())
}
