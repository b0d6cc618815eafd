use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, SealpostError};
use crate::core::services::credential_resolver::ScryptSettings;
use crate::core::services::passphrase_generator::{DEFAULT_SEPARATOR, DEFAULT_WORD_COUNT};

/// Accepted range for the passphrase word count.
const WORD_COUNT_RANGE: std::ops::RangeInclusive<usize> = 4..=64;

/// Accepted range for scrypt log2(N).
const WORK_FACTOR_RANGE: std::ops::RangeInclusive<u8> = 10..=22;

/// Top-level Sealpost configuration, read from `config.toml`.
///
/// Every section is optional; a missing file means all defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub passphrase: PassphraseSection,
    #[serde(default)]
    pub scrypt: ScryptSection,
    #[serde(default)]
    pub response: ResponseSection,
}

impl AppConfig {
    /// Load the configuration file.
    ///
    /// Resolution order:
    /// 1. `explicit` path (from `--config` or `SEALPOST_CONFIG`), which must exist
    /// 2. `<config dir>/sealpost/config.toml` if present
    /// 3. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SealpostError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config file location for the current platform.
    ///
    /// - Linux: `~/.config/sealpost/config.toml`
    /// - macOS: `~/Library/Application Support/sealpost/config.toml`
    /// - Windows: `%APPDATA%/sealpost/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sealpost").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| match e {
            SealpostError::InvalidConfig { detail } => SealpostError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SealpostError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The same configuration with `passphrase.words` replaced, range-checked
    /// like a value read from the file.
    pub fn with_word_count(mut self, words: usize) -> Result<Self> {
        check_word_count("--words", words)?;
        self.passphrase.words = words;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        check_word_count("passphrase.words", self.passphrase.words)?;

        for (name, value) in [
            ("scrypt.work_factor", self.scrypt.work_factor),
            ("scrypt.max_work_factor", self.scrypt.max_work_factor),
        ] {
            if let Some(v) = value
                && !WORK_FACTOR_RANGE.contains(&v)
            {
                return Err(SealpostError::InvalidConfig {
                    detail: format!(
                        "{name} = {v} is outside {}..={}",
                        WORK_FACTOR_RANGE.start(),
                        WORK_FACTOR_RANGE.end()
                    ),
                });
            }
        }

        if let (Some(wf), Some(max)) = (self.scrypt.work_factor, self.scrypt.max_work_factor)
            && wf > max
        {
            return Err(SealpostError::InvalidConfig {
                detail: format!(
                    "scrypt.work_factor ({wf}) exceeds scrypt.max_work_factor ({max}); \
                     this service could not decrypt its own output"
                ),
            });
        }

        Ok(())
    }

    pub fn scrypt_settings(&self) -> ScryptSettings {
        ScryptSettings {
            work_factor: self.scrypt.work_factor,
            max_work_factor: self.scrypt.max_work_factor,
        }
    }
}

fn check_word_count(name: &str, words: usize) -> Result<()> {
    if WORD_COUNT_RANGE.contains(&words) {
        return Ok(());
    }
    Err(SealpostError::InvalidConfig {
        detail: format!(
            "{name} = {words} is outside {}..={}",
            WORD_COUNT_RANGE.start(),
            WORD_COUNT_RANGE.end()
        ),
    })
}

/// The `[passphrase]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassphraseSection {
    #[serde(default = "default_words")]
    pub words: usize,
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Custom word list file; the embedded list is used when absent.
    pub wordlist: Option<PathBuf>,
}

impl Default for PassphraseSection {
    fn default() -> Self {
        Self {
            words: default_words(),
            separator: default_separator(),
            wordlist: None,
        }
    }
}

fn default_words() -> usize {
    DEFAULT_WORD_COUNT
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// The `[scrypt]` section. Both values are log2(N).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScryptSection {
    pub work_factor: Option<u8>,
    pub max_work_factor: Option<u8>,
}

/// The `[response]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseSection {
    #[serde(default = "default_true")]
    pub return_generated_passphrase: bool,
}

impl Default for ResponseSection {
    fn default() -> Self {
        Self {
            return_generated_passphrase: true,
        }
    }
}

fn default_true() -> bool {
    true
}
