use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::{Result, SealpostError};
use crate::core::traits::word_source::WordSource;

/// Fewer distinct words than this makes passphrases too guessable.
pub const MIN_WORDS: usize = 256;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+$").expect("word pattern is a valid regex"));

static EMBEDDED: LazyLock<Vec<String>> =
    LazyLock::new(|| parse_words(include_str!("../../../assets/wordlist.txt")).words);

/// Outcome of parsing a newline-delimited word list.
struct ParsedWords {
    words: Vec<String>,
    /// 1-based line numbers of entries that are not plain lowercase words.
    rejected: Vec<usize>,
}

/// Parse a word list: one word per line, `#` comments and blank lines skipped.
///
/// The result is sorted and deduplicated.
fn parse_words(text: &str) -> ParsedWords {
    let mut words = BTreeSet::new();
    let mut rejected = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if WORD_PATTERN.is_match(trimmed) {
            words.insert(trimmed.to_string());
        } else {
            rejected.push(i + 1);
        }
    }

    ParsedWords {
        words: words.into_iter().collect(),
        rejected,
    }
}

/// The word list compiled into the binary.
///
/// Parsed once on first use and shared read-only afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWordList;

impl WordSource for EmbeddedWordList {
    fn words(&self) -> &[String] {
        &EMBEDDED
    }
}

/// A word list loaded from a user-provided file.
#[derive(Debug, Clone)]
pub struct FileWordList {
    path: PathBuf,
    words: Vec<String>,
}

impl FileWordList {
    /// Load and validate a word list file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|_| SealpostError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let parsed = parse_words(&text);

        if !parsed.rejected.is_empty() {
            let lines: Vec<String> = parsed.rejected.iter().map(|n| n.to_string()).collect();
            return Err(SealpostError::InvalidConfig {
                detail: format!(
                    "Word list {} has entries that are not lowercase a-z words (lines {})",
                    path.display(),
                    lines.join(", ")
                ),
            });
        }
        if parsed.words.len() < MIN_WORDS {
            return Err(SealpostError::InvalidConfig {
                detail: format!(
                    "Word list {} has {} distinct words; at least {MIN_WORDS} are required",
                    path.display(),
                    parsed.words.len()
                ),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            words: parsed.words,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordSource for FileWordList {
    fn words(&self) -> &[String] {
        &self.words
    }
}
