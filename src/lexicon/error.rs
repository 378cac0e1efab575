use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon: {0}")]
    Parse(#[from] serde_json::Error),
}
