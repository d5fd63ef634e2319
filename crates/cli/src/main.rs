use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gallery::http::{self, AppState};
use gallery_core::config;
use gallery_core::config::AppConfig;
use gallery_core::gallery as view;
use std::sync::Arc;
use storage::{CommentStore, JsonFileStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => run_serve(cfg, host, port).await,
        Commands::Scan { month, json } => run_scan(cfg, month, json).await,
        Commands::Comment { date, text } => run_comment(cfg, &date, &text).await,
        Commands::Comments { json } => run_comments(cfg, json).await,
    }
}

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Photo gallery grouped by day, with per-day comments", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the gallery over HTTP
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print photos grouped by day
    Scan {
        /// Only include days in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the comment for a day, replacing any existing one
    Comment {
        /// Day as YYYY-MM-DD
        date: String,
        /// Comment text (may be empty)
        #[arg(default_value = "")]
        text: String,
    },
    /// List stored comments
    Comments {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

async fn run_serve(cfg: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    tokio::fs::create_dir_all(&cfg.photos.dir)
        .await
        .with_context(|| format!("create photo dir {}", cfg.photos.dir))?;

    let store: Arc<dyn CommentStore> = Arc::new(JsonFileStore::new(&cfg.comments.path));
    let state = Arc::new(AppState::new(&cfg.photos.dir, store));
    let app = http::router(state);

    let host = host.unwrap_or(cfg.server.host);
    let port = port.unwrap_or(cfg.server.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("bind {host}:{port}"))?;
    info!(
        "serving {} on http://{}",
        cfg.photos.dir,
        listener.local_addr()?
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(http::wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

async fn run_scan(cfg: AppConfig, month: Option<String>, json: bool) -> Result<()> {
    let store = JsonFileStore::new(&cfg.comments.path);
    let page = view::build_view(cfg.photos.dir.clone().into(), &store, month.as_deref()).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }
    println!("{}", page.title);
    for (date, unit) in page.photos.iter() {
        println!("{} (week {}): {} photo(s)", date, unit.week, unit.files.len());
        for file in &unit.files {
            println!("  {}", file);
        }
        if let Some(comment) = page.comments.get(date) {
            println!("  # {}", comment);
        }
    }
    Ok(())
}

async fn run_comment(cfg: AppConfig, date: &str, text: &str) -> Result<()> {
    let store = JsonFileStore::new(&cfg.comments.path);
    store
        .upsert(date, text)
        .await
        .with_context(|| format!("save comment for {date:?}"))?;
    println!("saved comment for {}", date);
    Ok(())
}

async fn run_comments(cfg: AppConfig, json: bool) -> Result<()> {
    let store = JsonFileStore::new(&cfg.comments.path);
    let comments = store.load().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&comments)?);
    } else {
        for (date, text) in &comments {
            println!("{}: {}", date, text);
        }
    }
    Ok(())
}
