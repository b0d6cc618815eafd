use crate::cli::commands::io_helpers::build_service;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;

/// Execute the `sealpost passphrase` command.
///
/// Uses the same generator the encrypt pipeline falls back to. `--words`
/// overrides the configured count within the same bounds.
pub fn execute(config: &AppConfig, words: Option<usize>) -> Result<()> {
    let config = match words {
        Some(n) => config.clone().with_word_count(n)?,
        None => config.clone(),
    };
    let service = build_service(&config)?;

    println!("{}", service.generate_passphrase());

    let generator = service.resolver.generator();
    output::detail(&format!(
        "{} words, ~{:.0} bits of entropy",
        generator.word_count(),
        generator.entropy_bits()
    ));
    Ok(())
}
