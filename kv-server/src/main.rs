use clap::Parser;
use core::num::NonZeroUsize;
use kv_server::{build_router, config::Args, store::Store};
use tracing::{error, info};

const PORT: u16 = 8080;

/// Parses args and sizes the Tokio runtime before entering it, since
/// `--threads` has to be known before the runtime is built rather than
/// after (`#[tokio::main]` would size the runtime on its own before
/// `Args::parse()` ever runs).
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    let args = Args::parse();

    let cache_capacity = NonZeroUsize::new(args.cache_capacity).ok_or_else(|| {
        error!("cache_capacity must be nonzero");
        "cache_capacity must be nonzero"
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.threads.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(serve(args, cache_capacity))
}

async fn serve(args: Args, cache_capacity: NonZeroUsize) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        cache_capacity = args.cache_capacity,
        threads = args.threads,
        db_path = %args.db_path,
        "starting kv-server"
    );

    let store = Store::connect(&args.db_path).await.map_err(|e| {
        error!(error = %e, "failed to connect to store");
        e
    })?;

    let router = build_router(cache_capacity, store);
    let addr = format!("0.0.0.0:{PORT}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
