use tracing::debug;

use crate::constants::{
    COMBINED_TOXICITY_THRESHOLD, GENERIC_TOXIC_CATEGORY, ML_CONFIDENCE_CAP,
    NEGATIVE_SENTIMENT_LABELS, NEGATIVE_SENTIMENT_REJECT_THRESHOLD, NEUTRAL_CONFIDENCE,
    REASON_APPROPRIATE, REASON_NEGATIVE_AGGRESSIVE, REASON_POTENTIALLY_OFFENSIVE,
    TOXICITY_REJECT_THRESHOLD,
};
use crate::scoring::MlSignals;

use super::types::{Category, Verdict};

/// Returns `true` if `label` is one of the known negative sentiment spellings.
pub fn is_negative_label(label: &str) -> bool {
    NEGATIVE_SENTIMENT_LABELS.contains(&label)
}

/// Merges ML signals into a final verdict.
///
/// Only called once the lexicon stage has accepted the text. Rules are evaluated in order and
/// every comparison is strict:
///
/// 1. toxicity above `0.6` rejects as `toxic`
/// 2. negative sentiment above `0.75` rejects as `hate_speech`
/// 3. toxicity above `0.4` together with negative sentiment rejects as `toxic`
/// 4. anything else is accepted
///
/// Negative sentiment on its own is expected in reviews of bad interviews and never rejects
/// below the rule 2 threshold.
pub fn combine(signals: &MlSignals) -> Verdict {
    let negative = is_negative_label(&signals.sentiment_label);

    let verdict = if signals.toxicity_score > TOXICITY_REJECT_THRESHOLD {
        let categories = if signals.toxic_categories.is_empty() {
            GENERIC_TOXIC_CATEGORY.to_string()
        } else {
            signals.toxic_categories.join(", ")
        };
        Verdict::reject(
            Category::Toxic,
            format!("Contenido tóxico detectado: {categories}"),
            signals.toxicity_score.min(ML_CONFIDENCE_CAP),
        )
    } else if signals.sentiment_score > NEGATIVE_SENTIMENT_REJECT_THRESHOLD && negative {
        Verdict::reject(
            Category::HateSpeech,
            REASON_NEGATIVE_AGGRESSIVE,
            signals.sentiment_score.min(ML_CONFIDENCE_CAP),
        )
    } else if signals.toxicity_score > COMBINED_TOXICITY_THRESHOLD && negative {
        let confidence = (signals.toxicity_score + signals.sentiment_score) / 2.0;
        Verdict::reject(
            Category::Toxic,
            REASON_POTENTIALLY_OFFENSIVE,
            confidence.min(ML_CONFIDENCE_CAP),
        )
    } else {
        Verdict::accept(REASON_APPROPRIATE, NEUTRAL_CONFIDENCE)
    };

    debug!(
        toxicity = signals.toxicity_score,
        sentiment = signals.sentiment_score,
        sentiment_label = %signals.sentiment_label,
        category = %verdict.category,
        "Combined ML signals"
    );

    verdict.with_diagnostics(signals.to_diagnostics())
}
