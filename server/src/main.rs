use anyhow::Result;
use axum::Router;
use clap::Parser;
use docfind_core::config::load_stop_words;
use docfind_core::SearchConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use docfind_server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Document directory to index at startup
    #[arg(long, default_value = "doc_sets")]
    docs: PathBuf,
    /// Whitespace-separated stop-word list replacing the built-in one
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// Maximum number of ranked hits returned per query
    #[arg(long, default_value_t = docfind_core::config::DEFAULT_MAX_RESULTS)]
    max_results: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

// One thread: requests are served one at a time against the read-only index.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let mut config = SearchConfig { max_results: args.max_results, ..SearchConfig::default() };
    if let Some(path) = &args.stop_words {
        config.stop_words = load_stop_words(path)?;
    }
    let app: Router = build_app(&args.docs, &config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
