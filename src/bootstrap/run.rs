use anyhow::{anyhow, Context};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use qc_app::AppPaths;
use qc_core::ports::{AppDirsPort, HotkeyPort};
use qc_platform::runtime::event_channel;
use qc_platform::{DirsAppDirsAdapter, HotkeyEventLoop};

use super::config::load_config;
use super::tracing::init_tracing_subscriber;
use super::wiring::{wire_runtime, PlatformWiring};
use crate::adapters::LoggingUi;
use crate::runtime::AppRuntime;

/// Resolve directories, load config, install logging, wire and run until
/// Ctrl-C or a shutdown command.
///
/// The calling thread must be the main thread. It hosts the platform event
/// loop that delivers hotkey presses, while the async runtime runs on a
/// thread of its own. Without an event loop the runtime runs here instead.
pub fn run_app() -> anyhow::Result<()> {
    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application data directory")?;
    let base_paths = AppPaths::from_app_dirs(&app_dirs);

    let (config, config_error) = match load_config(&base_paths.config_path) {
        Ok(config) => (config, None),
        Err(err) => (Default::default(), Some(err)),
    };

    init_tracing_subscriber(&base_paths.logs_dir)?;
    if let Some(err) = config_error {
        warn!(error = ?err, "Invalid config, using defaults");
    }

    let paths = base_paths.with_config(&config);
    info!(
        history = %paths.history_path.display(),
        theme = %paths.theme_path.display(),
        "Starting QuickClip"
    );

    let (event_tx, event_rx) = event_channel();
    let event_loop = match HotkeyEventLoop::new(event_tx.clone()) {
        Ok(event_loop) => Some(event_loop),
        Err(err) => {
            error!(error = %err, "Global hotkeys unavailable");
            None
        }
    };

    let tokio_rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let platform = PlatformWiring {
        event_tx,
        event_rx,
        hotkeys: event_loop
            .as_ref()
            .map(|event_loop| Box::new(event_loop.hotkeys()) as Box<dyn HotkeyPort>),
    };
    let runtime = tokio_rt.block_on(wire_runtime(
        &config,
        &paths,
        Arc::new(LoggingUi),
        platform,
    ))?;

    let Some(event_loop) = event_loop else {
        return tokio_rt.block_on(serve(runtime));
    };

    let handle = runtime.handle();
    let loop_hotkeys = event_loop.hotkeys();
    let service = std::thread::Builder::new()
        .name("qc-runtime".to_string())
        .spawn(move || {
            let result = tokio_rt.block_on(serve(runtime));
            loop_hotkeys.exit();
            result
        })
        .context("Failed to spawn runtime thread")?;

    if let Err(err) = event_loop.run() {
        error!(error = %err, "Hotkey event loop failed");
    }
    // The loop can also end on its own, e.g. when the OS asks the app to quit.
    if let Err(err) = handle.blocking_shutdown() {
        debug!(error = %err, "Runtime already stopped");
    }

    service
        .join()
        .map_err(|_| anyhow!("runtime thread panicked"))?
}

async fn serve(runtime: AppRuntime) -> anyhow::Result<()> {
    let handle = runtime.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received");
            if let Err(err) = handle.shutdown().await {
                warn!(error = %err, "Failed to request shutdown");
            }
        }
    });

    runtime.run().await
}
