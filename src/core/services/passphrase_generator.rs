use rand::Rng;
use rand::rngs::OsRng;

use crate::core::errors::{Result, SealpostError};
use crate::core::traits::word_source::WordSource;

pub const DEFAULT_WORD_COUNT: usize = 10;
pub const DEFAULT_SEPARATOR: &str = "-";

/// Builds human-memorable passphrases from a fixed word list.
///
/// Each word is drawn independently and uniformly with `OsRng`; no state
/// is kept between calls.
pub struct PassphraseGenerator<W: WordSource> {
    source: W,
    word_count: usize,
    separator: String,
}

impl<W: WordSource> PassphraseGenerator<W> {
    /// Override word count and separator.
    ///
    /// The separator must not be able to appear inside a word, otherwise
    /// the passphrase could not be split back into its tokens.
    pub fn with_shape(source: W, word_count: usize, separator: &str) -> Result<Self> {
        if word_count == 0 {
            return Err(SealpostError::InvalidConfig {
                detail: "passphrase word count must be at least 1".into(),
            });
        }
        if separator.is_empty() || separator.chars().any(|c| c.is_alphanumeric()) {
            return Err(SealpostError::InvalidConfig {
                detail: format!(
                    "passphrase separator '{separator}' must be non-empty \
                     and contain no letters or digits"
                ),
            });
        }
        if source.words().is_empty() {
            return Err(SealpostError::InvalidConfig {
                detail: "word list is empty".into(),
            });
        }

        Ok(Self {
            source,
            word_count,
            separator: separator.to_string(),
        })
    }

    pub fn generate(&self) -> String {
        let words = self.source.words();
        let mut rng = OsRng;
        (0..self.word_count)
            .map(|_| words[rng.gen_range(0..words.len())].as_str())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// Entropy of one generated passphrase in bits.
    pub fn entropy_bits(&self) -> f64 {
        self.word_count as f64 * (self.source.words().len() as f64).log2()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::wordlist::word_list::EmbeddedWordList;

    fn default_shape() -> PassphraseGenerator<EmbeddedWordList> {
        PassphraseGenerator::with_shape(EmbeddedWordList, DEFAULT_WORD_COUNT, DEFAULT_SEPARATOR)
            .unwrap()
    }

    struct FixedWords(Vec<String>);

    impl WordSource for FixedWords {
        fn words(&self) -> &[String] {
            &self.0
        }
    }

    #[test]
    fn ten_hyphen_joined_words() {
        let generator = default_shape();
        let phrase = generator.generate();
        let tokens: Vec<&str> = phrase.split('-').collect();

        assert_eq!(tokens.len(), 10);
        for token in tokens {
            assert!(!token.is_empty());
            assert!(EmbeddedWordList.words().iter().any(|w| w == token));
        }
    }

    #[test]
    fn independent_calls_differ() {
        let generator = default_shape();
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn custom_shape() {
        let generator = PassphraseGenerator::with_shape(EmbeddedWordList, 4, ".").unwrap();
        assert_eq!(generator.generate().split('.').count(), 4);
        assert_eq!(generator.word_count(), 4);
    }

    #[test]
    fn single_word_list_always_yields_that_word() {
        let generator =
            PassphraseGenerator::with_shape(FixedWords(vec!["echo".into()]), 3, "-").unwrap();
        assert_eq!(generator.generate(), "echo-echo-echo");
        assert_eq!(generator.entropy_bits(), 0.0);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(PassphraseGenerator::with_shape(EmbeddedWordList, 0, "-").is_err());
        assert!(PassphraseGenerator::with_shape(EmbeddedWordList, 5, "").is_err());
        assert!(PassphraseGenerator::with_shape(EmbeddedWordList, 5, "x").is_err());
        assert!(PassphraseGenerator::with_shape(FixedWords(vec![]), 5, "-").is_err());
    }

    #[test]
    fn default_entropy_is_reasonable() {
        let generator = default_shape();
        assert!(generator.entropy_bits() > 80.0);
    }
}
