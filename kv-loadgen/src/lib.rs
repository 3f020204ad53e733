//! Concurrent load generator for the `kv-server` benchmark harness.
//!
//! Drives a running server through configurable workload mixes while
//! maintaining a shared pool of "live" keys (the [`registry`]) so reads,
//! writes, and deletes operate on overlapping state rather than talking
//! past each other.

pub mod config;
pub mod error;
pub mod keys;
pub mod metrics;
pub mod registry;
pub mod worker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use config::Args;
use error::GenError;
use metrics::Metrics;
use registry::Registry;

/// Runs one full generator session: seeds popular keys, spawns `args.threads`
/// drivers, enforces the configured duration, and returns the rendered
/// summary the caller prints to stdout.
pub fn run(args: &Args) -> Result<String, GenError> {
    args.validate()?;

    let registry = Arc::new(Registry::new(args.key_pool_size));
    let metrics = Arc::new(Metrics::new());

    seed_popular_keys(args, &registry)?;

    let stop = Arc::new(AtomicBool::new(false));
    let mut drivers = Vec::with_capacity(args.threads);
    for driver_id in 0..args.threads {
        let args = args.clone();
        let server = args.server.clone();
        let registry = Arc::clone(&registry);
        let metrics = Arc::clone(&metrics);
        let stop = Arc::clone(&stop);
        drivers.push(thread::spawn(move || {
            worker::run_driver(driver_id, &args, server, registry, metrics, stop);
        }));
    }

    let started = Instant::now();
    thread::sleep(Duration::from_secs(args.duration));
    stop.store(true, Ordering::Relaxed);

    for d in drivers {
        let _ = d.join();
    }

    Ok(metrics.summarize(started.elapsed()))
}

/// Pre-populates `args.popular_size` keys before a run starts, so
/// `get-popular` has a working set to draw from. This is setup, not
/// workload: it does not touch the run's [`Metrics`], so seeded POSTs
/// never show up as attempts in the final summary.
fn seed_popular_keys(args: &Args, registry: &Registry) -> Result<(), GenError> {
    if args.popular_size == 0 {
        return Ok(());
    }
    let client = reqwest::blocking::Client::builder()
        .timeout(worker::REQUEST_TIMEOUT)
        .build()?;

    for i in 0..args.popular_size {
        let key = keys::popular(&args.key_prefix, i);
        let body = serde_json::json!({"key": key, "value": format!("seed{i}")});
        let result = client.post(&args.server).json(&body).send();
        let success = matches!(&result, Ok(resp) if resp.status().is_success());
        if success {
            registry.try_add(key);
        } else if let Err(e) = result {
            tracing::warn!(error = %e, "failed to seed popular key");
        }
    }
    Ok(())
}
