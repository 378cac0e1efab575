use super::filter::{
    count_matches, dominant_token_count, dominant_token_share, exceeds_repetition_share,
};
use super::*;
use crate::verdict::Category;
use std::io::Write;

fn small_lexicon() -> Lexicon {
    Lexicon::from_json_str(
        r#"{
            "hate_words": ["idiota", "Idiota ", "inútil"],
            "discriminatory_phrases": ["raza inferior"],
            "spam_financial_keywords": ["bitcoin", "forex"],
            "off_topic_keywords": ["fútbol", "política", "videojuego", "netflix"]
        }"#,
    )
    .unwrap()
}

fn filter() -> LexiconFilter {
    LexiconFilter::new(small_lexicon())
}

#[test]
fn test_builtin_lexicon_parses() {
    let lexicon = Lexicon::builtin().expect("built-in lexicon must parse");

    assert!(!lexicon.hate_words.is_empty());
    assert!(!lexicon.discriminatory_phrases.is_empty());
    assert!(!lexicon.spam_financial_keywords.is_empty());
    assert!(!lexicon.off_topic_keywords.is_empty());
}

#[test]
fn test_builtin_entries_are_normalized() {
    let lexicon = Lexicon::builtin().unwrap();

    for list in [
        &lexicon.hate_words,
        &lexicon.discriminatory_phrases,
        &lexicon.spam_financial_keywords,
        &lexicon.off_topic_keywords,
    ] {
        for entry in list {
            assert_eq!(entry, &entry.trim().to_lowercase());
        }
    }
}

#[test]
fn test_entries_are_trimmed_lowercased_and_deduplicated() {
    let lexicon = small_lexicon();

    assert_eq!(lexicon.hate_words, vec!["idiota", "inútil"]);
    assert_eq!(lexicon.len(), 9);
}

#[test]
fn test_missing_lists_default_to_empty() {
    let lexicon = Lexicon::from_json_str(r#"{"hate_words": ["tonto"]}"#).unwrap();

    assert_eq!(lexicon.hate_words.len(), 1);
    assert!(lexicon.spam_financial_keywords.is_empty());
    assert!(!lexicon.is_empty());
}

#[test]
fn test_invalid_json_is_an_error() {
    let result = Lexicon::from_json_str("{ not json");
    assert!(matches!(result, Err(LexiconError::Parse(_))));
}

#[test]
fn test_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"spam_financial_keywords": ["dogecoin"]}}"#).unwrap();

    let lexicon = Lexicon::from_path(file.path()).unwrap();
    assert_eq!(lexicon.spam_financial_keywords, vec!["dogecoin"]);
}

#[test]
fn test_from_path_missing_file() {
    let result = Lexicon::from_path("/nonexistent/lexicon.json");
    assert!(matches!(result, Err(LexiconError::Io { .. })));
}

#[test]
fn test_load_or_builtin_falls_back() {
    let builtin = Lexicon::builtin().unwrap();

    let missing = Lexicon::load_or_builtin(Some(std::path::Path::new("/nonexistent.json")));
    assert_eq!(missing, builtin);

    let none = Lexicon::load_or_builtin(None);
    assert_eq!(none, builtin);
}

#[test]
fn test_empty_and_whitespace_text() {
    for text in ["", "   ", "\n\t  \r\n"] {
        let verdict = filter().check(text);
        assert_eq!(verdict.category, Category::InsufficientContent);
        assert_eq!(verdict.confidence, 1.0);
        assert!(!verdict.is_appropriate);
    }
}

#[test]
fn test_financial_spam() {
    let verdict = filter().check("Invierte en BITCOIN ya");

    assert_eq!(verdict.category, Category::Spam);
    assert_eq!(verdict.confidence, 0.95);
}

#[test]
fn test_substring_matching_is_not_word_bounded() {
    let verdict = filter().check("Los bitcoiners del equipo");
    assert_eq!(verdict.category, Category::Spam);
}

#[test]
fn test_hate_words_reason_includes_count() {
    let verdict = filter().check("Un idiota y un inútil");

    assert_eq!(verdict.category, Category::HateSpeech);
    assert_eq!(verdict.confidence, 0.90);
    assert!(verdict.reason.contains('2'));
}

#[test]
fn test_repeated_keyword_counts_once() {
    let verdict = filter().check("idiota idiota idiota");
    assert!(verdict.reason.contains("(1 "));
}

#[test]
fn test_spam_beats_hate() {
    let verdict = filter().check("idiota, compra forex");
    assert_eq!(verdict.category, Category::Spam);
}

#[test]
fn test_hate_word_beats_discriminatory_phrase() {
    let verdict = filter().check("idiota de raza inferior");
    assert_eq!(verdict.confidence, 0.90);
}

#[test]
fn test_discriminatory_phrase() {
    let verdict = filter().check("Dijo que somos una raza inferior");

    assert_eq!(verdict.category, Category::HateSpeech);
    assert_eq!(verdict.confidence, 0.95);
}

#[test]
fn test_off_topic_requires_more_than_two_hits() {
    let two = filter().check("Hablamos de fútbol y política");
    assert!(two.is_appropriate);

    let three = filter().check("Hablamos de fútbol, política y videojuegos");
    assert_eq!(three.category, Category::OffTopic);
    assert_eq!(three.confidence, 0.80);
}

#[test]
fn test_accents_are_not_folded() {
    let verdict = filter().check("Hablamos de futbol, politica y videojuegos");
    assert!(verdict.is_appropriate);

    let upper = filter().check("FÚTBOL, POLÍTICA Y VIDEOJUEGOS");
    assert_eq!(upper.category, Category::OffTopic);
}

#[test]
fn test_repetition_spam() {
    let text = "muy bueno ".repeat(8);
    let verdict = filter().check(&text);

    assert_eq!(verdict.category, Category::Spam);
    assert_eq!(verdict.confidence, 0.80);
}

#[test]
fn test_repetition_ignores_short_texts() {
    let text = "bueno ".repeat(10);
    assert_eq!(dominant_token_share(&text), None);
    assert!(filter().check(&text).is_appropriate);
}

#[test]
fn test_repetition_ignores_short_tokens() {
    let text = "muy muy muy muy muy muy muy muy muy muy muy muy";
    assert_eq!(dominant_token_share(text), Some(0.0));
    assert!(filter().check(text).is_appropriate);
}

#[test]
fn test_repetition_denominator_counts_all_tokens() {
    // 3 of 12 tokens is exactly 25%, which does not exceed the limit.
    let at_limit = "bueno bueno bueno a b c d e f g h i";
    assert_eq!(dominant_token_share(at_limit), Some(0.25));
    assert!(filter().check(at_limit).is_appropriate);

    let above = "bueno bueno bueno bueno a b c d e f g h";
    assert!(dominant_token_share(above).unwrap() > 0.25);
    assert_eq!(filter().check(above).category, Category::Spam);
}

#[test]
fn test_repetition_is_case_insensitive() {
    let text = "Genial GENIAL genial Genial la empresa es de lo mejor que hay";
    assert_eq!(filter().check(text).category, Category::Spam);
}

#[test]
fn test_token_length_counts_chars_not_bytes() {
    // "ñoño" is four chars but six bytes.
    let text = "ñoño ñoño ñoño ñoño a b c d e f g h";
    assert!(dominant_token_share(text).unwrap() > 0.25);

    // "año" is three chars, so it never counts.
    let short = "año año año año a b c d e f g h";
    assert_eq!(dominant_token_share(short), Some(0.0));
}

#[test]
fn test_clean_text_passes_provisionally() {
    let verdict = filter().check("El proceso fue largo pero el equipo es amable.");

    assert!(verdict.is_appropriate);
    assert_eq!(verdict.category, Category::Appropriate);
    assert_eq!(verdict.confidence, 0.5);
    assert!(verdict.diagnostics.is_none());
}

#[test]
fn test_count_matches() {
    let list = vec!["abc".to_string(), "xyz".to_string(), "ab".to_string()];

    assert_eq!(count_matches(&list, "abcd"), 2);
    assert_eq!(count_matches(&list, "nothing"), 0);
    assert_eq!(count_matches(&[], "abc"), 0);
}

#[test]
fn test_empty_lexicon_only_checks_structure() {
    let filter = LexiconFilter::default();

    assert!(filter.check("bitcoin idiota").is_appropriate);
    assert_eq!(filter.check(" ").category, Category::InsufficientContent);
}

#[test]
fn test_repetition_share_is_exact_for_large_counts() {
    assert!(!exceeds_repetition_share(3, 12));
    assert!(exceeds_repetition_share(4, 12));

    // One token past a quarter of 100M. As f32 both counts round and the share reads 0.25.
    assert!(exceeds_repetition_share(25_000_001, 100_000_000));
    assert!(!exceeds_repetition_share(25_000_000, 100_000_000));
}

#[test]
fn test_dominant_token_count() {
    assert_eq!(
        dominant_token_count("bueno bueno bueno a b c d e f g h i"),
        Some((3, 12))
    );
    assert_eq!(dominant_token_count("bueno bueno"), None);
}
