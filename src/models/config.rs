use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_SEQ_LEN, DEFAULT_SENTIMENT_MODEL_ID, DEFAULT_TOXICITY_MODEL_ID};

use super::pipeline::ModelTask;

/// Where one classifier comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    /// Hugging Face model identifier.
    pub model_id: String,

    /// Local model directory. Takes precedence over the cache and the hub.
    pub path: Option<PathBuf>,
}

impl ModelSource {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            path: None,
        }
    }

    pub fn with_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Settings for the optional toxicity and sentiment classifiers.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// When `false`, no model is loaded and the service runs lexicon-only.
    pub enabled: bool,

    pub toxicity: ModelSource,

    pub sentiment: ModelSource,

    /// Directory holding `<model_id>/` subdirectories, also used as the hub download cache.
    pub cache_dir: Option<PathBuf>,

    /// Allow fetching missing models from the Hugging Face hub.
    pub allow_download: bool,

    pub max_seq_len: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            toxicity: ModelSource::new(DEFAULT_TOXICITY_MODEL_ID),
            sentiment: ModelSource::new(DEFAULT_SENTIMENT_MODEL_ID),
            cache_dir: None,
            allow_download: false,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl ModelConfig {
    const ENV_ENABLED: &'static str = "REVIEW_ML_ENABLED";
    const ENV_TOXICITY_MODEL: &'static str = "REVIEW_TOXICITY_MODEL";
    const ENV_TOXICITY_PATH: &'static str = "REVIEW_TOXICITY_MODEL_PATH";
    const ENV_SENTIMENT_MODEL: &'static str = "REVIEW_SENTIMENT_MODEL";
    const ENV_SENTIMENT_PATH: &'static str = "REVIEW_SENTIMENT_MODEL_PATH";
    const ENV_CACHE_DIR: &'static str = "REVIEW_MODEL_CACHE_DIR";
    const ENV_DOWNLOAD: &'static str = "REVIEW_MODEL_DOWNLOAD";

    /// Configuration that never loads a model.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn source(&self, task: ModelTask) -> &ModelSource {
        match task {
            ModelTask::Toxicity => &self.toxicity,
            ModelTask::Sentiment => &self.sentiment,
        }
    }

    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn with_download(mut self, allow: bool) -> Self {
        self.allow_download = allow;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than 0".to_string());
        }

        for source in [&self.toxicity, &self.sentiment] {
            if source.model_id.trim().is_empty() {
                return Err("model_id cannot be empty".to_string());
            }
            if let Some(ref path) = source.path
                && path.as_os_str().is_empty()
            {
                return Err("model path cannot be empty when provided".to_string());
            }
        }

        Ok(())
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let enabled = parse_bool_env(Self::ENV_ENABLED).unwrap_or(defaults.enabled);
        let allow_download = parse_bool_env(Self::ENV_DOWNLOAD).unwrap_or(defaults.allow_download);

        let toxicity = ModelSource {
            model_id: parse_string_env(Self::ENV_TOXICITY_MODEL)
                .unwrap_or(defaults.toxicity.model_id),
            path: parse_string_env(Self::ENV_TOXICITY_PATH).map(PathBuf::from),
        };

        let sentiment = ModelSource {
            model_id: parse_string_env(Self::ENV_SENTIMENT_MODEL)
                .unwrap_or(defaults.sentiment.model_id),
            path: parse_string_env(Self::ENV_SENTIMENT_PATH).map(PathBuf::from),
        };

        let cache_dir = parse_string_env(Self::ENV_CACHE_DIR).map(PathBuf::from);

        Self {
            enabled,
            toxicity,
            sentiment,
            cache_dir,
            allow_download,
            max_seq_len: defaults.max_seq_len,
        }
    }
}

fn parse_string_env(var_name: &str) -> Option<String> {
    std::env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool_env(var_name: &str) -> Option<bool> {
    parse_string_env(var_name).and_then(|v| match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}
