// Employee attrition predictor
// HR profile form, label encoding and decision-tree inference served over HTTP

mod config;
mod errors;
mod features;
mod form;
mod http;
mod ml;
mod page;
mod telemetry;
mod types;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::oneshot;

use crate::config::CoreConfig;
use crate::errors::ArtifactError;
use crate::http::ApiState;
use crate::ml::inference::InferenceEngine;
use crate::page::{BackgroundImage, PageRenderer};
use crate::telemetry::{StatsSnapshot, TelemetryStore};

// ============================================================================
// STARTUP
// ============================================================================

fn load_engine(config: &CoreConfig) -> Result<InferenceEngine, ArtifactError> {
    info!(
        "[MODEL] Loading model {} with encoders from {}",
        config.model_path.display(),
        config.encoders_dir.display()
    );
    InferenceEngine::load(&config.model_path, &config.encoders_dir)
}

fn load_background(config: &CoreConfig) -> Option<BackgroundImage> {
    if !config.background_enabled {
        return None;
    }

    match BackgroundImage::load(&config.background_path, config.max_background_bytes) {
        Ok(image) => {
            info!(
                "[PAGE] Background image {} ({} bytes)",
                config.background_path.display(),
                image.bytes.len()
            );
            Some(image)
        }
        Err(error) => {
            warn!("[PAGE] Background image unavailable: {}", error);
            None
        }
    }
}

fn model_info(engine: &InferenceEngine) -> String {
    let summary = engine.model().summary();
    format!(
        "Model: Baseline Decision Tree Classifier\n{} nodes, {} leaves, depth {}",
        summary.nodes, summary.leaves, summary.depth
    )
}

/// One-line report for `--check`, printed regardless of the log level.
fn check_artifacts(config: &CoreConfig) -> Result<String, ArtifactError> {
    let engine = load_engine(config)?;
    let summary = engine.model().summary();
    Ok(format!(
        "[MODEL] Artifacts OK: {} ({} nodes, {} leaves, depth {}, {} features) + {} encoders from {}",
        config.model_path.display(),
        summary.nodes,
        summary.leaves,
        summary.depth,
        summary.n_features,
        engine.encoders().iter().count(),
        config.encoders_dir.display()
    ))
}

// ============================================================================
// ENTRY POINT
// ============================================================================

fn main() {
    let _ = env_logger::try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--check") {
        let config = CoreConfig::from_env();
        match check_artifacts(&config) {
            Ok(report) => println!("{}", report),
            Err(error) => {
                error!("[MODEL] {}", error);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(error) = run_console() {
        error!("[ATTRITION] {}", error);
        std::process::exit(1);
    }
}

fn run_console() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            if let Err(error) = tokio::signal::ctrl_c().await {
                error!("[ATTRITION] Failed to listen for shutdown: {}", error);
            }
            let _ = shutdown_tx.send(());
        });

        let stats = run_until_shutdown(CoreConfig::from_env(), shutdown_rx).await?;
        info!(
            "[API] Stats: predictions={}, leaves={}, stays={}, rejected={}, uptime={}",
            stats.predictions, stats.leaves, stats.stays, stats.rejected, stats.uptime
        );
        Ok(())
    })
}

pub async fn run_until_shutdown(
    config: CoreConfig,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<StatsSnapshot, Box<dyn std::error::Error + Send + Sync>> {
    let engine = Arc::new(load_engine(&config)?);
    let background = load_background(&config).map(Arc::new);
    let pages = Arc::new(PageRenderer::new(background.is_some(), model_info(&engine))?);
    let telemetry = Arc::new(TelemetryStore::new());

    let api_state = ApiState {
        engine,
        pages,
        telemetry: Arc::clone(&telemetry),
        background,
    };
    let app = http::router(api_state, &config);

    http::serve(&config.api_addr, app, async move {
        let _ = shutdown_rx.await;
        info!("[ATTRITION] Shutting down gracefully...");
    })
    .await?;

    Ok(telemetry.snapshot_stats().await)
}
