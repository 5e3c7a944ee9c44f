use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Folder the extracted JSON files are written to, relative to the working directory.
    pub directory: PathBuf,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("steel_extractor_output"),
            pretty: true,
        }
    }
}
