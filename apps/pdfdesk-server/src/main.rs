//! pdfdesk server
//!
//! A small web application exposing a handful of PDF tools (merge, split,
//! PDF-to-Word, PDF-to-PowerPoint) behind a browser upload form. All
//! document work is delegated to pdfdesk-core; this binary handles the HTTP
//! surface, session directories, and the audit log.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod audit;
mod error;
mod pages;
mod session;
mod state;
mod tools;
mod upload;

use state::AppState;

const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Command-line arguments for the pdfdesk server
#[derive(Parser, Debug)]
#[command(name = "pdfdesk-server")]
#[command(about = "Web front end for the pdfdesk PDF tools")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory for session files and the audit log
    /// (defaults to pdfdesk-work under the system temp dir)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the full application router around shared state.
fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Browser pages
        .route("/", get(pages::home))
        .route("/tools/:tool_id", get(pages::tool_page))
        // API endpoints
        .route("/health", get(api::handle_health))
        .route("/api/tools", get(api::handle_list_tools))
        .route("/api/convert", post(api::handle_convert))
        .route("/download/:session_id/:filename", get(api::handle_download))
        // Middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let work_dir = args
        .work_dir
        .unwrap_or_else(|| std::env::temp_dir().join("pdfdesk-work"));

    info!("Work directory: {}", work_dir.display());
    let state = Arc::new(AppState::new(work_dir)?);

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("pdfdesk listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
