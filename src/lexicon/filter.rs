use std::collections::HashMap;
use tracing::debug;

use crate::constants::{
    DISCRIMINATORY_CONFIDENCE, EMPTY_TEXT_CONFIDENCE, FINANCIAL_SPAM_CONFIDENCE,
    HATE_WORD_CONFIDENCE, NEUTRAL_CONFIDENCE, OFF_TOPIC_CONFIDENCE, OFF_TOPIC_MIN_EXCLUSIVE,
    REASON_DISCRIMINATORY, REASON_EMPTY, REASON_FINANCIAL_SPAM, REASON_LEXICON_PASS,
    REASON_REPETITION_SPAM, REPETITION_SHARE_DIVISOR, REPETITION_MIN_TOKEN_CHARS_EXCLUSIVE,
    REPETITION_MIN_TOKENS_EXCLUSIVE, REPETITION_SPAM_CONFIDENCE,
};
use crate::verdict::{Category, Verdict};

use super::Lexicon;

/// Rule-ladder pre-filter over a [`Lexicon`].
///
/// Rules run in priority order and the first one that fires decides:
/// empty text, financial spam, hate words, discriminatory phrases, off-topic keywords (more
/// than two), repetition spam. A text that passes every rule gets a provisional `appropriate`
/// verdict with confidence `0.5`.
///
/// Matching is plain substring search on the lower-cased text, with no word boundaries and no
/// diacritic folding, so `"bitcoin"` also matches `"bitcoiner"`.
#[derive(Debug, Clone, Default)]
pub struct LexiconFilter {
    lexicon: Lexicon,
}

impl LexiconFilter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn check(&self, text: &str) -> Verdict {
        if text.trim().is_empty() {
            return Verdict::reject(
                Category::InsufficientContent,
                REASON_EMPTY,
                EMPTY_TEXT_CONFIDENCE,
            );
        }

        let lowered = text.to_lowercase();

        let spam_hits = count_matches(&self.lexicon.spam_financial_keywords, &lowered);
        if spam_hits >= 1 {
            debug!(hits = spam_hits, "Financial spam keywords matched");
            return Verdict::reject(Category::Spam, REASON_FINANCIAL_SPAM, FINANCIAL_SPAM_CONFIDENCE);
        }

        let hate_hits = count_matches(&self.lexicon.hate_words, &lowered);
        if hate_hits >= 1 {
            debug!(hits = hate_hits, "Hate words matched");
            return Verdict::reject(
                Category::HateSpeech,
                format!("Lenguaje ofensivo detectado ({hate_hits} palabras)"),
                HATE_WORD_CONFIDENCE,
            );
        }

        let discriminatory_hits = count_matches(&self.lexicon.discriminatory_phrases, &lowered);
        if discriminatory_hits >= 1 {
            debug!(hits = discriminatory_hits, "Discriminatory phrases matched");
            return Verdict::reject(
                Category::HateSpeech,
                REASON_DISCRIMINATORY,
                DISCRIMINATORY_CONFIDENCE,
            );
        }

        let off_topic_hits = count_matches(&self.lexicon.off_topic_keywords, &lowered);
        if off_topic_hits > OFF_TOPIC_MIN_EXCLUSIVE {
            debug!(hits = off_topic_hits, "Off-topic keywords matched");
            return Verdict::reject(
                Category::OffTopic,
                format!("Contenido fuera de tema ({off_topic_hits} referencias ajenas al empleo)"),
                OFF_TOPIC_CONFIDENCE,
            );
        }

        if is_repetition_spam(&lowered) {
            debug!("Repetition spam detected");
            return Verdict::reject(
                Category::Spam,
                REASON_REPETITION_SPAM,
                REPETITION_SPAM_CONFIDENCE,
            );
        }

        Verdict::accept(REASON_LEXICON_PASS, NEUTRAL_CONFIDENCE)
    }
}

/// Number of distinct entries of `list` that occur as substrings of `lowered`.
pub fn count_matches(list: &[String], lowered: &str) -> usize {
    list.iter()
        .filter(|entry| lowered.contains(entry.as_str()))
        .count()
}

/// Count of the most frequent token longer than three chars, and the total token count.
///
/// Returns `None` for texts with ten tokens or fewer. The total counts every whitespace token,
/// short tokens included.
pub fn dominant_token_count(text: &str) -> Option<(usize, usize)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() <= REPETITION_MIN_TOKENS_EXCLUSIVE {
        return None;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens
        .iter()
        .filter(|t| t.chars().count() > REPETITION_MIN_TOKEN_CHARS_EXCLUSIVE)
    {
        *counts.entry(*token).or_insert(0) += 1;
    }

    let top = counts.values().copied().max().unwrap_or(0);
    Some((top, tokens.len()))
}

/// Share of all tokens taken by the dominant token. See [`dominant_token_count`].
pub fn dominant_token_share(text: &str) -> Option<f32> {
    dominant_token_count(text).map(|(top, total)| top as f32 / total as f32)
}

/// `true` when `top` is strictly more than a quarter of `total`. Exact for any size.
pub fn exceeds_repetition_share(top: usize, total: usize) -> bool {
    top.saturating_mul(REPETITION_SHARE_DIVISOR) > total
}

fn is_repetition_spam(lowered: &str) -> bool {
    dominant_token_count(lowered).is_some_and(|(top, total)| exceeds_repetition_share(top, total))
}
