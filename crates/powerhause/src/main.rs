//! PowerHause server entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use hause_api::{ApiConfig, AppState};
use hause_gemini::GeminiGenerator;
use hause_memory::{
    ContextIndex, EmbeddingGenerator, LocalStore, MemoryStore, NullStore, QdrantStore,
};
use hause_store::FileCommunityStore;
use hause_telegram::TelegramMessenger;

#[derive(Parser)]
#[command(name = "powerhause", version, about = "AI community manager backend")]
struct Cli {
    /// Directory for community records and local memory storage.
    #[arg(long, env = "POWERHAUSE_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    // Load .env if present (API keys, backend selection)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = ApiConfig::from_env();

    let store = Arc::new(FileCommunityStore::new(&cli.data_dir));
    let backend = memory_backend(&cli.data_dir).await;
    let memory = ContextIndex::new(backend, EmbeddingGenerator::from_env());

    let generator = Arc::new(GeminiGenerator::from_env());
    if !generator.is_configured() {
        warn!("GEMINI_API_KEY unset, content generation uses fallback text");
    }
    let messenger = Arc::new(TelegramMessenger::new());

    let state = AppState::new(config.clone(), store, memory, generator, messenger);

    if let Err(e) = hause_api::serve(config, state).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Selects the memory backend from `MEMORY_BACKEND` (local, qdrant, none).
///
/// An unavailable backend degrades to the explicit null store rather than
/// aborting startup: the server still manages communities, it just runs
/// without memory context.
async fn memory_backend(data_dir: &Path) -> Arc<dyn MemoryStore> {
    let selected = std::env::var("MEMORY_BACKEND").unwrap_or_else(|_| "local".to_string());
    match selected.as_str() {
        "qdrant" => {
            let url = std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".to_string());
            let api_key = std::env::var("QDRANT_API_KEY").ok();
            match QdrantStore::new(&url, api_key.as_deref()).await {
                Ok(store) => {
                    info!("Using Qdrant memory backend at {}", url);
                    Arc::new(store)
                }
                Err(e) => {
                    warn!("Qdrant unavailable ({}), memory disabled", e);
                    Arc::new(NullStore::new())
                }
            }
        }
        "none" => {
            info!("Memory store disabled");
            Arc::new(NullStore::new())
        }
        _ => match LocalStore::new(data_dir.join("memory")).await {
            Ok(store) => {
                info!("Using local memory backend under {}", data_dir.display());
                Arc::new(store)
            }
            Err(e) => {
                warn!("Local memory store unavailable ({}), memory disabled", e);
                Arc::new(NullStore::new())
            }
        },
    }
}
