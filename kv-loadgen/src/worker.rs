//! Load-generator worker.
//!
//! Each driver owns one bounded job queue and a fixed set of executor
//! threads. The queue is a `crossbeam_channel::bounded` channel rather than
//! a hand-rolled mutex+condvar ring buffer: blocking push when full,
//! blocking pop when empty, FIFO order, and wake-on-stop via channel
//! closure, without reimplementing a queue the ecosystem already provides.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, SendTimeoutError, Sender};
use rand::Rng;

use crate::config::{Args, Workload};
use crate::keys;
use crate::metrics::{Metrics, Op};
use crate::registry::Registry;

const QUEUE_CAPACITY: usize = 1024;
const EXECUTORS_PER_DRIVER: usize = 16;

/// Hard per-request timeout shared by every HTTP client the generator
/// builds, including the one-off client used to seed popular keys.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A unit of work handed from a driver's scheduler to its executors.
enum Job {
    Get(String),
    Post(String, String),
    Delete(String),
}

/// Runs one driver: spawns its executor pool, then runs the scheduling
/// loop on the calling thread until `stop` is set, and finally closes the
/// queue so executors drain and exit.
#[allow(clippy::too_many_arguments)]
pub fn run_driver(
    driver_id: usize,
    args: &Args,
    server: String,
    registry: Arc<Registry>,
    metrics: Arc<Metrics>,
    stop: Arc<AtomicBool>,
) {
    let (tx, rx) = bounded::<Job>(QUEUE_CAPACITY);

    let mut executors = Vec::with_capacity(EXECUTORS_PER_DRIVER);
    for _ in 0..EXECUTORS_PER_DRIVER {
        let rx = rx.clone();
        let server = server.clone();
        let metrics = Arc::clone(&metrics);
        let registry = Arc::clone(&registry);
        executors.push(thread::spawn(move || {
            let client = match reqwest::blocking::Client::builder().timeout(REQUEST_TIMEOUT).build()
            {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "executor failed to build http client");
                    return;
                }
            };
            execute_loop(&client, &server, &rx, &metrics, &registry);
        }));
    }

    schedule_loop(driver_id, args, &tx, &registry, &stop);

    // Dropping `tx` (alongside the driver's own `rx` above going out of
    // scope) closes the channel once all producers are gone; executors'
    // `rx.recv()` then returns `Err` and each loop exits, draining whatever
    // jobs remain in the queue first.
    drop(tx);
    drop(rx);
    for e in executors {
        let _ = e.join();
    }
}

/// How long `push` waits on a full queue before re-checking `stop`. Short
/// enough that shutdown is prompt, long enough not to spin.
const QUEUE_SEND_POLL: Duration = Duration::from_millis(50);

fn schedule_loop(
    driver_id: usize,
    args: &Args,
    tx: &Sender<Job>,
    registry: &Registry,
    stop: &AtomicBool,
) {
    let mut rng = rand::thread_rng();
    let mut seq: u64 = 0;

    while !stop.load(Ordering::Relaxed) {
        let mut job = next_job(driver_id, args, registry, &mut rng, &mut seq);
        seq += 1;
        // `send_timeout` stands in for a condvar wait that wakes on
        // `stop`: a plain blocking `send` on a full queue would have no
        // way to notice `stop` flipping until an executor frees a slot,
        // which can be long after `run`'s configured duration if the
        // target server has stalled.
        loop {
            match tx.send_timeout(job, QUEUE_SEND_POLL) {
                Ok(()) => break,
                Err(SendTimeoutError::Timeout(returned)) => {
                    if stop.load(Ordering::Relaxed) {
                        return;
                    }
                    job = returned;
                }
                Err(SendTimeoutError::Disconnected(_)) => return,
            }
        }
    }
}

fn next_job(
    driver_id: usize,
    args: &Args,
    registry: &Registry,
    rng: &mut impl Rng,
    seq: &mut u64,
) -> Job {
    match args.workload {
        Workload::Mix => mix_job(driver_id, args, registry, rng, seq),
        Workload::PutAll => {
            if rng.gen_bool(0.5) {
                post_job(driver_id, args, seq)
            } else {
                delete_job(driver_id, args, registry, rng, seq)
            }
        }
        Workload::GetAll => {
            let key = keys::synthetic_unique(&args.key_prefix, driver_id, *seq);
            Job::Get(key)
        }
        Workload::GetPopular => match registry.pick_random(rng) {
            Some(key) => Job::Get(key),
            None => {
                let key = keys::synthetic_unique(&args.key_prefix, driver_id, *seq);
                Job::Get(key)
            }
        },
    }
}

fn mix_job(driver_id: usize, args: &Args, registry: &Registry, rng: &mut impl Rng, seq: &mut u64) -> Job {
    let (g, p, _d) = args.mix;
    let roll = rng.gen_range(0..100);
    if roll < g {
        if rng.gen_bool(0.5) {
            if let Some(key) = registry.pick_random(rng) {
                return Job::Get(key);
            }
        }
        Job::Get(keys::synthetic_unique(&args.key_prefix, driver_id, *seq))
    } else if roll < g + p {
        post_job(driver_id, args, seq)
    } else {
        delete_job(driver_id, args, registry, rng, seq)
    }
}

fn post_job(driver_id: usize, args: &Args, seq: &mut u64) -> Job {
    let key = keys::synthetic(&args.key_prefix, driver_id, *seq);
    Job::Post(key, format!("v{seq}"))
}

fn delete_job(
    driver_id: usize,
    args: &Args,
    registry: &Registry,
    rng: &mut impl Rng,
    seq: &mut u64,
) -> Job {
    match registry.remove_random(rng) {
        Some(key) => Job::Delete(key),
        None => post_job(driver_id, args, seq),
    }
}

fn execute_loop(
    client: &reqwest::blocking::Client,
    server: &str,
    rx: &crossbeam_channel::Receiver<Job>,
    metrics: &Metrics,
    registry: &Registry,
) {
    while let Ok(job) = rx.recv() {
        match job {
            Job::Get(key) => {
                let started = Instant::now();
                let result = client.get(server).query(&[("key", &key)]).send();
                // A 404 is a completed query that happened to miss, not a
                // failed call: counted as success, not failure.
                let success = matches!(&result, Ok(resp) if resp.status().is_success() || resp.status() == 404);
                metrics.record(Op::Get, success, started.elapsed());
            }
            Job::Post(key, value) => {
                let started = Instant::now();
                let body = serde_json::json!({"key": key, "value": value});
                let result = client.post(server).json(&body).send();
                let success = matches!(&result, Ok(resp) if resp.status().is_success());
                metrics.record(Op::Post, success, started.elapsed());
                if success {
                    registry.try_add(key);
                }
            }
            Job::Delete(key) => {
                let started = Instant::now();
                let result = client.delete(server).query(&[("key", &key)]).send();
                // Unlike GET, a 404 here means the intended delete did not
                // happen and counts as failure.
                let success = matches!(&result, Ok(resp) if resp.status().is_success());
                metrics.record(Op::Delete, success, started.elapsed());
            }
        }
    }
}
