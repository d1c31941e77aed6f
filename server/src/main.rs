use anyhow::Result;
use axum::Router;
use clap::Parser;
use lse_server::{build_app, IndexSources};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Manifest listing document files, or a directory of .txt documents
    #[arg(long, env = "LSE_DOCS")]
    docs: PathBuf,
    /// File of noise words, one per line
    #[arg(long, env = "LSE_NOISE")]
    noise: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(IndexSources { docs: args.docs, noise: args.noise })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
