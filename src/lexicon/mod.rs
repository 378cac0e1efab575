//! Curated word lists and the deterministic lexicon pre-filter.
//!
//! Lists are data, not code: the built-in Spanish lexicon lives in `data/lexicon.json` and is
//! embedded at compile time. Moderators can point `REVIEW_LEXICON_PATH` at a replacement file
//! with the same schema.

pub mod error;
pub mod filter;

#[cfg(test)]
mod tests;

pub use error::LexiconError;
pub use filter::LexiconFilter;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info, warn};

const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.json");

/// The four keyword lists used by [`LexiconFilter`].
///
/// Every list is matched as case-insensitive substrings. Entries are trimmed, lower-cased and
/// de-duplicated on load, so each keyword counts at most once per text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub hate_words: Vec<String>,
    #[serde(default)]
    pub discriminatory_phrases: Vec<String>,
    #[serde(default)]
    pub spam_financial_keywords: Vec<String>,
    #[serde(default)]
    pub off_topic_keywords: Vec<String>,
}

impl Lexicon {
    /// Parses a lexicon from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        Ok(lexicon.normalized())
    }

    /// Reads and parses a lexicon file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// The lexicon shipped with the crate.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_json_str(BUILTIN_LEXICON)
    }

    /// Loads `path` if given, otherwise the built-in lexicon. Never fails: an unreadable file
    /// falls back to the built-in lists, and a broken built-in yields an empty lexicon.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::from_path(path) {
                Ok(lexicon) => {
                    info!(
                        path = %path.display(),
                        entries = lexicon.len(),
                        "Loaded lexicon from file"
                    );
                    return lexicon;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load lexicon file, using built-in lexicon");
                }
            }
        }

        match Self::builtin() {
            Ok(lexicon) => lexicon,
            Err(e) => {
                error!(error = %e, "Built-in lexicon is invalid, lexicon filter disabled");
                Self::default()
            }
        }
    }

    /// Total number of entries across all lists.
    pub fn len(&self) -> usize {
        self.hate_words.len()
            + self.discriminatory_phrases.len()
            + self.spam_financial_keywords.len()
            + self.off_topic_keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn normalized(self) -> Self {
        Self {
            hate_words: normalize_list(self.hate_words),
            discriminatory_phrases: normalize_list(self.discriminatory_phrases),
            spam_financial_keywords: normalize_list(self.spam_financial_keywords),
            off_topic_keywords: normalize_list(self.off_topic_keywords),
        }
    }
}

fn normalize_list(entries: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.trim().to_lowercase();
        if !entry.is_empty() && !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}
