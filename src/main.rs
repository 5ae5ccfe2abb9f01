use clap::Parser;
use repo_inventory::adapters::storage::ensure_folder;
use repo_inventory::utils::{logger, validation::Validate};
use repo_inventory::{CliConfig, InventoryEngine, InventoryPipeline, LocalStorage};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    // The log file lives under the logs folder, so that one is created first.
    std::fs::create_dir_all(&config.logs_path)?;
    logger::init_cli_logger(config.verbose, &Path::new(&config.logs_path).join("log.txt"))?;

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    for folder in ["text", "markdown"] {
        ensure_folder(&Path::new(&config.output_path).join(folder))?;
    }

    tracing::info!("Starting GitHub Inventory Tool");
    if config.verbose {
        tracing::debug!("Inventorying repositories for user: {}", config.username);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = InventoryPipeline::new(storage, config);
    let engine = InventoryEngine::new(pipeline);

    match engine.run().await {
        Ok(Some(paths)) => {
            tracing::info!("Reports written: {} and {}", paths.text, paths.markdown);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Inventory run failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    tracing::info!("Done. Exiting program.");
    Ok(())
}
