use clap::Parser;

#[derive(Parser)]
#[command(name = "tandem")]
#[command(version, about = "Tandem - one prompt, two streamed AI replies side by side")]
pub struct Cli {
    /// Database path (defaults to ~/.local/share/tandem/tandem.db)
    #[arg(long, env = "TANDEM_DB_PATH")]
    pub db_path: Option<String>,

    /// Base URL of the server hosting the generation endpoints
    #[arg(long, env = "TANDEM_SERVER")]
    pub server: Option<String>,

    /// Shared secret for request signing
    #[arg(long, env = "TANDEM_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Maximum history messages per request window
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
