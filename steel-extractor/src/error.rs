use std::io;

use steel_world::EngineDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineDataError),
    #[error("Timed out waiting for chunks ({ready}/{tracked} ready)")]
    Timeout { ready: usize, tracked: usize },
    #[error("Stopped while waiting for chunks ({ready}/{tracked} ready)")]
    Stopped { ready: usize, tracked: usize },
}
