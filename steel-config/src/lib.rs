use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use std::{env, fs, path::Path, path::PathBuf, sync::LazyLock};

pub mod logging;
pub mod output;
pub mod tracking;

pub use logging::LoggingConfig;
pub use output::OutputConfig;
pub use tracking::TrackingConfig;

const CONFIG_ROOT_FOLDER: &str = "config/";

pub static EXTRACTOR_CONFIG: LazyLock<ExtractorConfiguration> = LazyLock::new(|| {
    let exec_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    ExtractorConfiguration::load(&exec_dir)
});

/// Runtime switches of the extractor. The world under test (seed, radius, section range) is fixed
/// at compile time so that hashes stay comparable between runs; only the surroundings are
/// configurable here.
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractorConfiguration {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub tracking: TrackingConfig,
}

pub trait LoadConfiguration {
    fn load(exec_dir: &Path) -> Self
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config_dir = exec_dir.join(CONFIG_ROOT_FOLDER);
        if !config_dir.exists() {
            log::debug!("creating new config root folder");
            if let Err(err) = fs::create_dir_all(&config_dir) {
                warn!("Couldn't create config folder {:?}: {}", &config_dir, err);
            }
        }
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(file_content) => toml::from_str(&file_content).unwrap_or_else(|err| {
                    warn!(
                        "Couldn't parse config at {:?}. Reason: {}. Falling back to the defaults",
                        &path,
                        err.message()
                    );
                    Self::default()
                }),
                Err(err) => {
                    warn!(
                        "Couldn't read config at {:?}. Reason: {}. Falling back to the defaults",
                        &path, err
                    );
                    Self::default()
                }
            }
        } else {
            let content = Self::default();

            match toml::to_string(&content) {
                Ok(serialized) => {
                    if let Err(err) = fs::write(&path, serialized) {
                        warn!("Couldn't write default config to {:?}. Reason: {}", &path, err);
                    }
                }
                Err(err) => warn!("Couldn't serialize default config: {}", err),
            }

            content
        };

        config.validate()
    }

    fn get_path() -> &'static Path;

    /// Replaces values that would make the extractor misbehave.
    fn validate(self) -> Self;
}

impl LoadConfiguration for ExtractorConfiguration {
    fn get_path() -> &'static Path {
        Path::new("extractor.toml")
    }

    fn validate(mut self) -> Self {
        if !(self.tracking.tps.is_finite() && self.tracking.tps > 0.0) {
            warn!(
                "tracking.tps must be positive, got {}; using 20",
                self.tracking.tps
            );
            self.tracking.tps = 20.0;
        }
        if self.tracking.progress_interval_ticks == 0 {
            warn!("tracking.progress_interval_ticks must be at least 1; using 100");
            self.tracking.progress_interval_ticks = 100;
        }
        self
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use temp_dir::TempDir;

    use super::{ExtractorConfiguration, LoadConfiguration};

    #[test]
    fn writes_defaults_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = ExtractorConfiguration::load(dir.path());

        assert_eq!(config, ExtractorConfiguration::default());
        assert!(dir.path().join("config/extractor.toml").exists());
    }

    #[test]
    fn reads_partial_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/extractor.toml"),
            "[tracking]\nwait_timeout_secs = 12\n\n[output]\ndirectory = \"out\"\n",
        )
        .unwrap();

        let config = ExtractorConfiguration::load(dir.path());
        assert_eq!(config.tracking.wait_timeout_secs, 12);
        assert_eq!(config.tracking.progress_interval_ticks, 100);
        assert_eq!(config.output.directory.to_str(), Some("out"));
        assert!(config.output.pretty);
    }

    #[test]
    fn broken_file_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/extractor.toml"), "tracking = [").unwrap();

        let config = ExtractorConfiguration::load(dir.path());
        assert_eq!(config, ExtractorConfiguration::default());
    }

    #[test]
    fn invalid_values_are_replaced() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/extractor.toml"),
            "[tracking]\ntps = 0.0\nprogress_interval_ticks = 0\n",
        )
        .unwrap();

        let config = ExtractorConfiguration::load(dir.path());
        assert_eq!(config.tracking.tps, 20.0);
        assert_eq!(config.tracking.progress_interval_ticks, 100);
    }
}
