//! Error taxonomy for the extraction pipeline.

use crate::syntax::SyntaxError;
use crate::typeexpr::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure aborts the run; nothing is retried or skipped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{error}", path.display())]
    Parse { path: PathBuf, error: SyntaxError },

    #[error("{}:{error}", path.display())]
    Unsupported { path: PathBuf, error: RenderError },

    #[error("invalid exclude pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("unknown format: {0}. Use json, text, markdown or html")]
    UnknownFormat(String),

    #[error("failed to serialize documentation")]
    Json(#[from] serde_json::Error),
}
