//! Errors of the sweep driver, on top of the engine's per-N errors.

use std::path::PathBuf;

use goldbach_core::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("sampling plan yields no N")]
    EmptyPlan,

    #[error("invalid engine configuration: {0}")]
    Engine(#[from] EngineError),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
