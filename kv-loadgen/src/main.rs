use clap::Parser;
use kv_loadgen::config::Args;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    let args = Args::parse();

    info!(
        server = %args.server,
        threads = args.threads,
        duration = args.duration,
        workload = ?args.workload,
        "starting kv-loadgen"
    );

    match kv_loadgen::run(&args) {
        Ok(summary) => {
            println!("{summary}");
            std::process::exit(0);
        }
        Err(e) => {
            error!(error = %e, "run failed");
            std::process::exit(1);
        }
    }
}
