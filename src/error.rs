//! Errors raised while loading scenario documents.
//!
//! Compiling a model never fails; these only cover reading and decoding the
//! options a model is built from.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// The options document could not be read.
    #[error("Failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The options document is not valid JSON for the scenario model.
    #[error("Failed to parse scenario options: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = PlanError> = std::result::Result<T, E>;
