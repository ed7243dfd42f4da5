//! Runtime startup errors.

use std::path::PathBuf;

use st_04_update_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Environment variable {name} has an unusable value {value:?}")]
    InvalidVariable { name: &'static str, value: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to read fleet file {path:?}: {source}")]
    FleetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fleet file {path:?} is not a JSON array of shipments: {source}")]
    FleetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
