#![deny(clippy::all)]
// use log crate
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

use std::{io, sync::Arc, time::Instant};

#[cfg(not(unix))]
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use steel_config::EXTRACTOR_CONFIG;
use steel_extractor::{
    extractor::{BiomeHashes, Extractor},
    init_log,
    output::OutputWriter,
    session::ExtractionSession,
    stop_extractor,
    ticker::ProgressTicker,
};
use steel_world::{
    ChunkReadinessTracker, EXPECTED_SEED,
    generation::{ChunkStageHook, SuperflatHost},
};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    let time = Instant::now();

    init_log!();

    log::info!("Starting steel-extractor {CARGO_PKG_VERSION}");
    log::debug!(
        "Build info: FAMILY: \"{}\", OS: \"{}\", ARCH: \"{}\", BUILD: \"{}\"",
        std::env::consts::FAMILY,
        std::env::consts::OS,
        std::env::consts::ARCH,
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );

    tokio::spawn(async {
        if let Err(err) = setup_sighandler().await {
            log::warn!("Unable to setup signal handlers: {err}");
        }
    });

    let output = match OutputWriter::create(&EXTRACTOR_CONFIG.output) {
        Ok(output) => output,
        Err(err) => {
            log::error!("Failed to create output directory: {err}");
            return;
        }
    };

    let tracker = Arc::new(ChunkReadinessTracker::new());
    let host = match SuperflatHost::new(EXPECTED_SEED, ChunkStageHook::new(tracker.clone()), 0) {
        Ok(host) => Arc::new(host),
        Err(err) => {
            log::error!("Failed to start world generation workers: {err}");
            return;
        }
    };

    let session = ExtractionSession::new(
        host,
        tracker.clone(),
        output,
        EXTRACTOR_CONFIG.tracking.clone(),
    );
    let immediate: Vec<Box<dyn Extractor>> = vec![Box::new(BiomeHashes::default())];

    session.starting();
    log::info!("Started extractor, took {}ms", time.elapsed().as_millis());
    session.started(immediate).await;

    let mut ticker = ProgressTicker::new(&EXTRACTOR_CONFIG.tracking);
    let ticker = tokio::spawn(async move { ticker.run(tracker).await });

    match session.finish().await {
        Ok(path) => log::info!("Chunk stage hashes complete: {}", path.display()),
        Err(err) => log::error!("Chunk stage hashes incomplete: {err}"),
    }
    stop_extractor();
    let _ = ticker.await;

    log::info!(
        "All extractors complete! Took {}s",
        time.elapsed().as_secs_f32()
    );
}

fn handle_interrupt() {
    log::warn!("Received interrupt signal; stopping extractor...");
    stop_extractor();
}

// Non-UNIX Ctrl-C handling
#[cfg(not(unix))]
async fn setup_sighandler() -> io::Result<()> {
    if ctrl_c().await.is_ok() {
        handle_interrupt();
    }

    Ok(())
}

// Unix signal handling
#[cfg(unix)]
async fn setup_sighandler() -> io::Result<()> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = interrupt.recv() => handle_interrupt(),
        _ = terminate.recv() => handle_interrupt(),
    }

    Ok(())
}
