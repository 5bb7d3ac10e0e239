//! Caller-side line normalization.
//!
//! The bitext stream splits lines on whitespace and nothing else. Corpora
//! that mix Unicode forms or letter case should be normalized before they
//! reach it; `NormalizedSource` does that line by line on every pass.

use lexalign_core::{LineSource, Lines, Result};
use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    /// No normalization
    #[default]
    None,
    /// Canonical composition
    NFC,
    /// Canonical decomposition
    NFD,
    /// Compatibility composition
    NFKC,
    /// Compatibility decomposition
    NFKD,
}

/// Unicode and case normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
    /// Lowercase after normalizing
    lowercase: bool,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm, lowercase: bool) -> Self {
        Self { form, lowercase }
    }

    /// Create an NFC normalizer.
    pub fn nfc() -> Self {
        Self::new(NormalizationForm::NFC, false)
    }

    /// Normalize text.
    pub fn normalize(&self, text: &str) -> String {
        let normalized: String = match self.form {
            NormalizationForm::NFC => text.nfc().collect(),
            NormalizationForm::NFD => text.nfd().collect(),
            NormalizationForm::NFKC => text.nfkc().collect(),
            NormalizationForm::NFKD => text.nfkd().collect(),
            NormalizationForm::None => text.to_string(),
        };

        if self.lowercase {
            normalized.to_lowercase()
        } else {
            normalized
        }
    }

    /// Check if normalization does anything.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None || self.lowercase
    }
}

/// A line source whose lines pass through a `Normalizer`.
pub struct NormalizedSource {
    inner: Box<dyn LineSource>,
    normalizer: Normalizer,
}

impl NormalizedSource {
    pub fn new(inner: impl LineSource + 'static, normalizer: Normalizer) -> Self {
        Self {
            inner: Box::new(inner),
            normalizer,
        }
    }
}

impl LineSource for NormalizedSource {
    fn open(&self) -> Result<Lines<'_>> {
        let normalizer = self.normalizer;
        let lines = self.inner.open()?;
        Ok(Box::new(
            lines.map(move |line| line.map(|l| normalizer.normalize(&l))),
        ))
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexalign_core::{Bitext, MemorySource, Token};

    #[test]
    fn test_nfc_normalization() {
        let normalizer = Normalizer::nfc();
        // Combining characters
        let text = "pre\u{0301}t"; // e + combining acute accent
        let result = normalizer.normalize(text);
        assert_eq!(result, "pr\u{00e9}t"); // é as single character
    }

    #[test]
    fn test_nfd_normalization() {
        let normalizer = Normalizer::new(NormalizationForm::NFD, false);
        let result = normalizer.normalize("\u{00e9}");
        assert_eq!(result, "e\u{0301}");
    }

    #[test]
    fn test_lowercase() {
        let normalizer = Normalizer::new(NormalizationForm::None, true);
        assert_eq!(normalizer.normalize("LE GOUVERNEMENT"), "le gouvernement");
        assert!(normalizer.is_enabled());
        assert!(!Normalizer::default().is_enabled());
    }

    #[test]
    fn test_normalized_source_feeds_bitext() {
        let normalizer = Normalizer::new(NormalizationForm::NFC, true);
        let bitext = Bitext::new(
            NormalizedSource::new(MemorySource::new("Le Gouvernement est pre\u{0301}t"), normalizer),
            MemorySource::new("the government is ready"),
        );

        let pair = bitext.pairs().unwrap().next().unwrap().unwrap();
        assert_eq!(pair.source()[1], Token::word("le"));
        assert_eq!(pair.source()[4], Token::word("pr\u{00e9}t"));
    }
}
