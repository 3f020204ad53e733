//! CLI for the server binary.

use clap::Parser;

/// Cache-fronted key-value HTTP server.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Maximum number of entries held in the in-memory cache.
    #[arg(default_value = "1000")]
    pub cache_capacity: usize,

    /// Number of Tokio worker threads backing the server's async runtime.
    #[arg(default_value = "16")]
    pub threads: usize,

    /// Path to the SQLite database file. Overridable via `KV_DB_PATH`.
    #[arg(long, env = "KV_DB_PATH", default_value = "kv_store.db")]
    pub db_path: String,
}
