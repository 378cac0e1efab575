use std::path::Path;
use tokenizers::{Tokenizer, TruncationParams};

use super::error::ModelError;

/// Loads `tokenizer.json` from a model directory with truncation at `max_len` tokens.
///
/// Review texts can be arbitrarily long while both classifiers accept at most 512 positions.
pub fn load_tokenizer_with_truncation(
    model_dir: &Path,
    max_len: usize,
) -> Result<Tokenizer, ModelError> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    if !tokenizer_path.exists() {
        return Err(ModelError::ModelLoadFailed {
            reason: format!("Missing tokenizer.json in {}", model_dir.display()),
        });
    }

    let mut tokenizer =
        Tokenizer::from_file(&tokenizer_path).map_err(|e| ModelError::TokenizationFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| ModelError::TokenizationFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}

/// Files a model directory must hold for [`ensure_model_files`] and hub downloads.
pub(crate) const REQUIRED_MODEL_FILES: [&str; 3] =
    ["config.json", "model.safetensors", "tokenizer.json"];

/// Checks that a model directory has the files the loader needs.
pub fn ensure_model_files(model_dir: &Path) -> Result<(), ModelError> {
    if !model_dir.exists() {
        return Err(ModelError::ModelNotFound {
            path: model_dir.to_path_buf(),
        });
    }

    for file in REQUIRED_MODEL_FILES {
        if !model_dir.join(file).exists() {
            return Err(ModelError::ModelLoadFailed {
                reason: format!("Missing {} in {}", file, model_dir.display()),
            });
        }
    }

    Ok(())
}
