use super::*;
use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_SENTIMENT_MODEL_ID, DEFAULT_TOXICITY_MODEL_ID};
use crate::scoring::{ClassifierOutput, LabelScore};
use serial_test::serial;
use std::path::PathBuf;
use std::sync::Arc;

struct FixedClassifier;

impl TextClassifier for FixedClassifier {
    fn model_id(&self) -> &str {
        "test/fixed"
    }

    fn classify(&self, _text: &str) -> Result<ClassifierOutput, ModelError> {
        Ok(ClassifierOutput::Single(LabelScore::new("positive", 0.9)))
    }
}

fn clear_model_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        std::env::remove_var("REVIEW_ML_ENABLED");
        std::env::remove_var("REVIEW_TOXICITY_MODEL");
        std::env::remove_var("REVIEW_TOXICITY_MODEL_PATH");
        std::env::remove_var("REVIEW_SENTIMENT_MODEL");
        std::env::remove_var("REVIEW_SENTIMENT_MODEL_PATH");
        std::env::remove_var("REVIEW_MODEL_CACHE_DIR");
        std::env::remove_var("REVIEW_MODEL_DOWNLOAD");
    }
}

#[test]
fn test_config_default() {
    let config = ModelConfig::default();

    assert!(config.enabled);
    assert_eq!(config.toxicity.model_id, DEFAULT_TOXICITY_MODEL_ID);
    assert_eq!(config.sentiment.model_id, DEFAULT_SENTIMENT_MODEL_ID);
    assert!(config.toxicity.path.is_none());
    assert!(config.cache_dir.is_none());
    assert!(!config.allow_download);
    assert_eq!(config.max_seq_len, DEFAULT_MAX_SEQ_LEN);
}

#[test]
fn test_config_source_lookup() {
    let config = ModelConfig::default();

    assert_eq!(
        config.source(ModelTask::Toxicity).model_id,
        "unitary/toxic-bert"
    );
    assert_eq!(
        config.source(ModelTask::Sentiment).model_id,
        "cardiffnlp/twitter-roberta-base-sentiment-latest"
    );
}

#[test]
fn test_config_validate() {
    assert!(ModelConfig::default().validate().is_ok());

    let empty_id = ModelConfig {
        toxicity: ModelSource::new("  "),
        ..Default::default()
    };
    assert!(empty_id.validate().is_err());

    let empty_path = ModelConfig {
        sentiment: ModelSource::new("x/y").with_path(""),
        ..Default::default()
    };
    assert!(empty_path.validate().is_err());

    let zero_len = ModelConfig {
        max_seq_len: 0,
        ..Default::default()
    };
    assert!(zero_len.validate().is_err());
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_model_env();

    let config = ModelConfig::from_env();
    assert!(config.enabled);
    assert_eq!(config.toxicity.model_id, DEFAULT_TOXICITY_MODEL_ID);
    assert!(!config.allow_download);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_model_env();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        std::env::set_var("REVIEW_ML_ENABLED", "false");
        std::env::set_var("REVIEW_TOXICITY_MODEL_PATH", "/models/toxic");
        std::env::set_var("REVIEW_SENTIMENT_MODEL", "org/other-sentiment");
        std::env::set_var("REVIEW_MODEL_CACHE_DIR", "/var/cache/models");
        std::env::set_var("REVIEW_MODEL_DOWNLOAD", "yes");
    }

    let config = ModelConfig::from_env();
    clear_model_env();

    assert!(!config.enabled);
    assert_eq!(config.toxicity.path, Some(PathBuf::from("/models/toxic")));
    assert_eq!(config.sentiment.model_id, "org/other-sentiment");
    assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/models")));
    assert!(config.allow_download);
}

#[test]
#[serial]
fn test_from_env_ignores_invalid_bool() {
    clear_model_env();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe { std::env::set_var("REVIEW_ML_ENABLED", "maybe") };

    let config = ModelConfig::from_env();
    clear_model_env();

    assert!(config.enabled);
}

#[test]
fn test_disabled_config_loads_nothing() {
    let models = load_models(&ModelConfig::disabled());

    assert!(!models.models_loaded());
    assert!(models.toxicity.is_none());
    assert!(models.sentiment.is_none());
}

#[test]
fn test_missing_models_degrade_to_none() {
    let config = ModelConfig {
        toxicity: ModelSource::new(DEFAULT_TOXICITY_MODEL_ID).with_path("/nonexistent/toxic"),
        sentiment: ModelSource::new(DEFAULT_SENTIMENT_MODEL_ID).with_path("/nonexistent/sent"),
        ..Default::default()
    };

    let models = load_models(&config);
    assert!(!models.models_loaded());
}

#[test]
fn test_no_local_copy_without_download() {
    let dir = tempfile::tempdir().unwrap();
    let config = ModelConfig::default().with_cache_dir(dir.path());

    let models = load_models(&config);
    assert!(!models.models_loaded());
}

#[test]
fn test_loaded_models_partial() {
    let toxicity: Arc<dyn TextClassifier> = Arc::new(FixedClassifier);
    let models = LoadedModels::new(Some(toxicity), None);

    assert!(models.models_loaded());
    assert!(models.get(ModelTask::Toxicity).is_some());
    assert!(models.get(ModelTask::Sentiment).is_none());
    assert!(format!("{:?}", models).contains("test/fixed"));
}

#[test]
fn test_model_task_display() {
    assert_eq!(ModelTask::Toxicity.to_string(), "toxicity");
    assert_eq!(ModelTask::Sentiment.as_str(), "sentiment");
}

#[cfg(feature = "ml")]
mod ml {
    use super::*;
    use crate::models::hub::resolve_model_dir;
    use crate::models::utils::{REQUIRED_MODEL_FILES, ensure_model_files};

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let source = ModelSource::new("unitary/toxic-bert").with_path("/models/toxic");
        let dir = resolve_model_dir(&source, &ModelConfig::default()).unwrap();

        assert_eq!(dir, PathBuf::from("/models/toxic"));
    }

    #[test]
    fn test_resolve_uses_cache_dir() {
        let cache = tempfile::tempdir().unwrap();
        let model_dir = cache.path().join("unitary").join("toxic-bert");
        std::fs::create_dir_all(&model_dir).unwrap();

        let config = ModelConfig::default().with_cache_dir(cache.path());
        let dir = resolve_model_dir(&config.toxicity, &config).unwrap();

        assert_eq!(dir, model_dir);
    }

    #[test]
    fn test_resolve_without_download_fails() {
        let config = ModelConfig::default();
        let result = resolve_model_dir(&config.sentiment, &config);

        assert!(matches!(result, Err(ModelError::ModelLoadFailed { .. })));
    }

    #[test]
    fn test_ensure_model_files() {
        let missing = ensure_model_files(std::path::Path::new("/nonexistent/model"));
        assert!(matches!(missing, Err(ModelError::ModelNotFound { .. })));

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        let incomplete = ensure_model_files(dir.path());
        assert!(matches!(incomplete, Err(ModelError::ModelLoadFailed { .. })));
    }

    #[test]
    fn test_ensure_model_files_accepts_every_required_file() {
        let dir = tempfile::tempdir().unwrap();
        for file in REQUIRED_MODEL_FILES {
            std::fs::write(dir.path().join(file), "{}").unwrap();
        }

        assert!(ensure_model_files(dir.path()).is_ok());
        assert!(REQUIRED_MODEL_FILES.contains(&"tokenizer.json"));
    }

    #[test]
    fn test_classifier_load_rejects_incomplete_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let result = SequenceClassifier::load("test/model", dir.path(), 512);
        assert!(result.is_err());
    }
}
