mod cli;
mod config;
mod paths;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::CliConfig;
use tandem_chat::{
    ChatStore, DualOrchestrator, GeminiAdapter, OpenAiAdapter, ProviderSession, RequestSigner,
    SessionConfig, SharedSecretSigner, snapshot,
};
use tandem_storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load();
    if let Some(server) = cli.server {
        config.default.server = Some(server.trim_end_matches('/').to_string());
    }

    // Configure logging: write to file so the interactive output stays clean
    let log_dir = paths::ensure_data_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "tandem.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "info" })
            }),
        )
        .init();

    let db_path = match cli.db_path.or_else(|| config.default.db_path.clone()) {
        Some(path) => PathBuf::from(path),
        None => paths::default_db_path()?,
    };
    tracing::info!(db_path = %db_path.display(), "starting tandem");
    let storage = Storage::open(&db_path)?;

    let store = Arc::new(ChatStore::new());
    snapshot::load(&storage.snapshots, &store)?;

    let secret = cli
        .secret
        .or_else(|| config.auth.secret.clone())
        .unwrap_or_default();
    let signer: Arc<dyn RequestSigner> = Arc::new(SharedSecretSigner::new(secret));

    let max_history = cli.max_history.unwrap_or_else(|| config.max_history());

    let gemini = Arc::new(ProviderSession::new(
        Arc::new(GeminiAdapter),
        signer.clone(),
        store.clone(),
        SessionConfig {
            endpoint: config.gemini_endpoint(),
            pass: config.auth.pass.clone(),
            max_history,
        },
    ));
    let openai = Arc::new(ProviderSession::new(
        Arc::new(OpenAiAdapter),
        signer,
        store.clone(),
        SessionConfig {
            endpoint: config.openai_endpoint(),
            pass: config.auth.pass.clone(),
            max_history,
        },
    ));

    let orchestrator = Arc::new(DualOrchestrator::new(store.clone(), gemini, openai));

    // The loop cancels and drains any in-flight turn before returning, so
    // the save below sees every archived draft. This is the teardown
    // analog of the original's unload hook.
    let result = repl::run(orchestrator).await;
    snapshot::save_if_dirty(&storage.snapshots, &store)?;

    result
}
