use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;
use steel_config::OutputConfig;
use steel_world::GenerationHost;

use crate::{error::ExtractorError, extractor::Extractor};

/// Writes extractor results as JSON files into the output folder.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    directory: PathBuf,
    pretty: bool,
}

impl OutputWriter {
    /// Creates the output folder if it is missing.
    pub fn create(config: &OutputConfig) -> Result<Self, ExtractorError> {
        fs::create_dir_all(&config.directory)?;
        Ok(Self {
            directory: config.directory.clone(),
            pretty: config.pretty,
        })
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn write(&self, file_name: &str, value: &Value) -> Result<PathBuf, ExtractorError> {
        let path = self.directory.join(file_name);
        let mut writer = BufWriter::new(File::create(&path)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Runs `extractor` and writes its output. Failures are logged and returned, never fatal.
    pub fn run(
        &self,
        extractor: &dyn Extractor,
        host: &dyn GenerationHost,
    ) -> Result<PathBuf, ExtractorError> {
        let result = extractor
            .extract(host)
            .and_then(|value| self.write(extractor.file_name(), &value));
        match &result {
            Ok(path) => log::info!("Wrote {}", path.display()),
            Err(err) => log::error!("Extractor for \"{}\" failed: {err}", extractor.file_name()),
        }
        result
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use serde_json::json;
    use steel_config::OutputConfig;
    use temp_dir::TempDir;

    use super::OutputWriter;

    fn config(dir: &TempDir, pretty: bool) -> OutputConfig {
        OutputConfig {
            directory: dir.path().join("nested/output"),
            pretty,
        }
    }

    #[test]
    fn creates_directory_and_writes() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::create(&config(&dir, true)).unwrap();
        assert!(writer.directory().is_dir());

        let value = json!({ "seed": 13579, "chunks": [] });
        let path = writer.write("out.json", &value).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'));
        assert_eq!(serde_json::from_str::<serde_json::Value>(&written).unwrap(), value);
    }

    #[test]
    fn compact_output() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::create(&config(&dir, false)).unwrap();
        let path = writer.write("out.json", &json!({ "a": [1, 2] })).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn unwritable_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let config = OutputConfig {
            directory: blocker.join("output"),
            pretty: true,
        };
        assert!(OutputWriter::create(&config).is_err());
    }
}
