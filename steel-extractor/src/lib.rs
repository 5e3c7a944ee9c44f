use std::{
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use steel_config::LoggingConfig;

pub mod error;
pub mod extractor;
pub mod output;
pub mod session;
pub mod ticker;

/// Chunks within this radius of the origin are tracked through generation.
pub const TRACKING_RADIUS: i32 = 5;
/// Chunks within this radius of the origin get a biome hash.
pub const BIOME_RADIUS: i32 = 5;

pub static SHOULD_STOP: AtomicBool = AtomicBool::new(false);

pub fn stop_extractor() {
    SHOULD_STOP.store(true, Ordering::Relaxed);
}

#[macro_export]
macro_rules! init_log {
    () => {
        $crate::init_logger(&steel_config::EXTRACTOR_CONFIG.logging)
    };
}

/// Installs the terminal logger. `RUST_LOG` picks the level, `info` by default.
pub fn init_logger(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }

    let mut builder = ConfigBuilder::new();
    if config.timestamp {
        builder.set_time_format_rfc3339();
        builder.set_time_level(LevelFilter::Error);
    } else {
        builder.set_time_level(LevelFilter::Off);
    }

    if config.threads {
        builder.set_thread_level(LevelFilter::Info);
    } else {
        builder.set_thread_level(LevelFilter::Off);
    }

    let color = if config.color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let level = std::env::var("RUST_LOG")
        .ok()
        .as_deref()
        .map(LevelFilter::from_str)
        .and_then(Result::ok)
        .unwrap_or(LevelFilter::Info);

    if TermLogger::init(level, builder.build(), TerminalMode::Mixed, color).is_err() {
        log::warn!("A logger is already installed");
    }
}
