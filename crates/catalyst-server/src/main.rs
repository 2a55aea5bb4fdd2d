//! Catalyst: voice pitch board server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use catalyst_chat::{create_generator, LLMConfig};
use catalyst_core::CatalystConfig;
use catalyst_enrich::Enricher;
use catalyst_server::backfill::backfill_quotes;
use catalyst_server::{build_router, AppState};
use catalyst_store::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("CATALYST_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

fn open_store(config: &CatalystConfig) -> anyhow::Result<SqliteStore> {
    SqliteStore::open(&config.data_paths.database)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))
}

async fn run_backfill(data_dir: &Path) -> anyhow::Result<()> {
    let config = CatalystConfig::from_env(data_dir)?;
    let store = open_store(&config)?;
    let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
    let enricher = Enricher::new(create_generator(&llm_config));
    if !enricher.generator_available() {
        println!("No LLM provider configured; quotes will be taken from transcripts");
    }

    let report = backfill_quotes(&store, &enricher)
        .await
        .map_err(|e| anyhow::anyhow!("Backfill failed: {}", e))?;

    println!("{}", report.message());
    if report.failed > 0 {
        println!("{} pitches could not be updated", report.failed);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "backfill-quotes" => {
                let data_dir = if args.len() > 2 {
                    PathBuf::from(&args[2])
                } else {
                    resolve_data_dir()
                };
                return run_backfill(&data_dir).await;
            }
            "--help" | "-h" | "help" => {
                println!("Catalyst: voice pitch board server");
                println!();
                println!("Usage: catalyst [command]");
                println!();
                println!("Commands:");
                println!("  (none)                       Start the server");
                println!("  backfill-quotes [data-dir]   Extract quotes for pitches missing one");
                println!("  help                         Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'catalyst help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = CatalystConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = open_store(&config)?;

    // Falls back to a no-op generator when no provider key is configured
    let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
    let generator = create_generator(&llm_config);

    let state = Arc::new(AppState::new(config, store, generator));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Catalyst server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
