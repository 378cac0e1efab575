//! Cross-cutting, shared constants.
//!
//! The confidence values attached to lexicon rejections are fixed policy numbers, not calibrated
//! probabilities. Keep them in one place so the filter, the combiner and the tests agree.

/// Hugging Face identifier of the toxicity classifier.
pub const DEFAULT_TOXICITY_MODEL_ID: &str = "unitary/toxic-bert";

/// Hugging Face identifier of the sentiment classifier.
pub const DEFAULT_SENTIMENT_MODEL_ID: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Maximum tokenizer sequence length for both classifiers.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

pub const EMPTY_TEXT_CONFIDENCE: f32 = 1.0;
pub const FINANCIAL_SPAM_CONFIDENCE: f32 = 0.95;
pub const HATE_WORD_CONFIDENCE: f32 = 0.90;
pub const DISCRIMINATORY_CONFIDENCE: f32 = 0.95;
pub const OFF_TOPIC_CONFIDENCE: f32 = 0.80;
pub const REPETITION_SPAM_CONFIDENCE: f32 = 0.80;

/// Confidence of every accepting verdict (lexicon pass, ML pass, fail-open).
pub const NEUTRAL_CONFIDENCE: f32 = 0.5;

/// Off-topic rejection requires strictly more keyword hits than this.
pub const OFF_TOPIC_MIN_EXCLUSIVE: usize = 2;

/// Repetition check only applies to texts with strictly more tokens than this.
pub const REPETITION_MIN_TOKENS_EXCLUSIVE: usize = 10;

/// Tokens must be strictly longer than this (in chars) to count toward repetition.
pub const REPETITION_MIN_TOKEN_CHARS_EXCLUSIVE: usize = 3;

/// A single token taking more than `1 / REPETITION_SHARE_DIVISOR` of all tokens is repetition
/// spam.
pub const REPETITION_SHARE_DIVISOR: usize = 4;

/// Upper bound for the confidence of any ML-derived verdict.
pub const ML_CONFIDENCE_CAP: f32 = 0.99;

pub const TOXICITY_REJECT_THRESHOLD: f32 = 0.6;
pub const NEGATIVE_SENTIMENT_REJECT_THRESHOLD: f32 = 0.75;
pub const COMBINED_TOXICITY_THRESHOLD: f32 = 0.4;

/// Labels above this score count as toxic even when not in [`TOXIC_LABEL_MARKERS`].
pub const UNKNOWN_TOXIC_LABEL_THRESHOLD: f32 = 0.7;

/// Upper-cased substrings that mark a classifier label as toxic.
pub const TOXIC_LABEL_MARKERS: &[&str] = &[
    "TOXIC",
    "SEVERE_TOXIC",
    "THREAT",
    "INSULT",
    "IDENTITY_ATTACK",
    "OBSCENE",
];

/// Sentiment labels treated as negative. Add new spellings here as models change.
pub const NEGATIVE_SENTIMENT_LABELS: &[&str] = &["NEGATIVE", "LABEL_2"];

/// Sentiment label used when no sentiment signal is available.
pub const NEUTRAL_SENTIMENT_LABEL: &str = "NEUTRAL";

pub const REASON_EMPTY: &str = "Texto vacío";
pub const REASON_FINANCIAL_SPAM: &str = "Spam financiero o publicidad detectada";
pub const REASON_DISCRIMINATORY: &str = "Lenguaje discriminatorio detectado";
pub const REASON_REPETITION_SPAM: &str = "Spam por repetición de palabras detectado";
pub const REASON_LEXICON_PASS: &str = "Sin problemas detectados en el análisis léxico";
pub const REASON_NEGATIVE_AGGRESSIVE: &str =
    "Sentimiento extremadamente negativo y agresivo detectado";
pub const REASON_POTENTIALLY_OFFENSIVE: &str = "Contenido potencialmente ofensivo detectado";
pub const REASON_APPROPRIATE: &str = "Reseña apropiada";
pub const REASON_FAIL_OPEN: &str = "Error en verificación automática, aprobada por defecto";

/// Fallback wording when a toxic verdict has no recognised category.
pub const GENERIC_TOXIC_CATEGORY: &str = "contenido ofensivo";
