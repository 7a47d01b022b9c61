//! CLI entry point for tfdemo-rs.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tfdemo_rs::assets::AssetDir;
use tfdemo_rs::cli::{Cli, Commands};
use tfdemo_rs::config::Config;
use tfdemo_rs::inference::{InferenceEngine, TensorflowEngine, INPUT_NAME, OUTPUT_NAME};
use tfdemo_rs::trigger;

/// Backend that executes graphs.
const ENGINE: &str = "tract-tensorflow";

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load optional config
    let config = if let Some(config_path) = &cli.config {
        Config::from_yaml_file(config_path)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Initialize logging
    let level: Level = config
        .logging
        .level
        .parse()
        .with_context(|| format!("Invalid log level: {}", config.logging.level))?;
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .init();

    let resolve = |assets: Option<PathBuf>, model: Option<String>| {
        (
            AssetDir::new(assets.unwrap_or_else(|| config.model.asset_dir.clone())),
            model.unwrap_or_else(|| config.model.model_file.clone()),
        )
    };

    match cli.command {
        Commands::Click { assets, model } => {
            let (assets, model) = resolve(assets, model);
            info!("Using assets: {}", assets.root().display());

            let result = trigger::click_with::<TensorflowEngine, _>(&assets, &model)
                .with_context(|| format!("Click failed for model {}", model))?;
            println!("{}", serde_json::to_string(&result)?);
        }

        Commands::Info { assets, model } => {
            let (assets, model) = resolve(assets, model);

            println!("tfdemo-rs v{}", env!("CARGO_PKG_VERSION"));
            println!("engine: {}", ENGINE);
            println!();
            println!("Model: {}", model);
            println!("Assets: {}", assets.root().display());

            info!("Loading model...");
            let engine = TensorflowEngine::load(&assets, &model)
                .with_context(|| format!("Failed to load model {}", model))?;
            println!("Inputs: {}", engine.input_names().join(", "));
            println!("Outputs: {}", engine.output_names().join(", "));
            println!("Expected: {} -> {}", INPUT_NAME, OUTPUT_NAME);
            println!("Status: OK (model loaded successfully)");
        }
    }

    Ok(())
}
