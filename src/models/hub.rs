use hf_hub::Repo;
use hf_hub::api::sync::ApiBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::{ModelConfig, ModelSource};
use super::error::ModelError;
use super::utils::REQUIRED_MODEL_FILES;

/// Resolves the local directory for `source`.
///
/// Order: explicit path, `<cache_dir>/<model_id>`, then a hub download when allowed. The first
/// run with downloads enabled can take minutes.
pub fn resolve_model_dir(source: &ModelSource, config: &ModelConfig) -> Result<PathBuf, ModelError> {
    if let Some(ref path) = source.path {
        debug!(model_id = %source.model_id, path = %path.display(), "Using explicit model path");
        return Ok(path.clone());
    }

    if let Some(ref cache_dir) = config.cache_dir {
        let local = cache_dir.join(&source.model_id);
        if local.is_dir() {
            debug!(model_id = %source.model_id, path = %local.display(), "Using cached model");
            return Ok(local);
        }
    }

    if config.allow_download {
        return download(&source.model_id, config.cache_dir.as_deref());
    }

    Err(ModelError::ModelLoadFailed {
        reason: format!(
            "no local copy of '{}' and downloads are disabled",
            source.model_id
        ),
    })
}

fn download(model_id: &str, cache_dir: Option<&Path>) -> Result<PathBuf, ModelError> {
    info!(model_id, "Downloading model from Hugging Face hub");

    let download_err = |reason: String| ModelError::DownloadFailed {
        model_id: model_id.to_string(),
        reason,
    };

    let mut builder = ApiBuilder::new().with_progress(false);
    if let Some(dir) = cache_dir {
        builder = builder.with_cache_dir(dir.join("hub"));
    }
    let api = builder.build().map_err(|e| download_err(e.to_string()))?;
    let repo = api.repo(Repo::model(model_id.to_string()));

    let mut model_dir: Option<PathBuf> = None;
    for file in REQUIRED_MODEL_FILES {
        let path = repo
            .get(file)
            .map_err(|e| download_err(format!("{}: {}", file, e)))?;
        if model_dir.is_none() {
            model_dir = path.parent().map(Path::to_path_buf);
        }
    }

    let model_dir = model_dir.ok_or_else(|| download_err("invalid cache path".to_string()))?;
    info!(model_id, path = %model_dir.display(), "Model available");
    Ok(model_dir)
}
