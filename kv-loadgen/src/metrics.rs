//! Metrics aggregator: per-operation counters and latency totals.

use std::time::Duration;

use parking_lot::Mutex;

/// The three operation kinds the generator issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    Post,
    Delete,
}

impl Op {
    const ALL: [Op; 3] = [Op::Get, Op::Post, Op::Delete];

    fn label(self) -> &'static str {
        match self {
            Op::Get => "GET",
            Op::Post => "POST",
            Op::Delete => "DELETE",
        }
    }
}

#[derive(Default)]
struct Counters {
    count: u64,
    success: u64,
    failure: u64,
    total_ns: u128,
}

/// Aggregates `(count, success, failure, total_ns)` per [`Op`] behind a
/// single mutex. Only successful-call latency contributes to `total_ns`,
/// so timed-out or erroring calls never drag the reported mean down.
pub struct Metrics {
    counters: Mutex<[Counters; 3]>,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics { counters: Mutex::new([(); 3].map(|_| Counters::default())) }
    }

    fn index(op: Op) -> usize {
        Op::ALL.iter().position(|o| *o == op).unwrap()
    }

    /// Records the outcome of one `op` call.
    pub fn record(&self, op: Op, success: bool, latency: Duration) {
        let mut counters = self.counters.lock();
        let c = &mut counters[Self::index(op)];
        c.count += 1;
        if success {
            c.success += 1;
            c.total_ns += latency.as_nanos();
        } else {
            c.failure += 1;
        }
    }

    /// Renders the aggregate plus per-operation summary the orchestrator
    /// prints at the end of a run.
    pub fn summarize(&self, duration: Duration) -> String {
        let counters = self.counters.lock();
        let mut total = 0u64;
        let mut total_success = 0u64;
        let mut total_failure = 0u64;
        let mut lines = Vec::new();

        for (op, c) in Op::ALL.iter().zip(counters.iter()) {
            total += c.count;
            total_success += c.success;
            total_failure += c.failure;
            let avg_ms = if c.success > 0 {
                (c.total_ns as f64 / c.success as f64) / 1_000_000.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {:<6} attempts={} success={} fail={} avg_latency_ms={:.3}",
                op.label(),
                c.count,
                c.success,
                c.failure,
                avg_ms
            ));
        }

        let throughput = total_success as f64 / duration.as_secs_f64().max(1e-9);
        let mut out = String::new();
        out.push_str(&format!(
            "total requests={total} success={total_success} failure={total_failure} throughput={throughput:.2} req/s\n"
        ));
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_accumulates_latency_failure_does_not() {
        let m = Metrics::new();
        m.record(Op::Get, true, Duration::from_millis(10));
        m.record(Op::Get, false, Duration::from_millis(500));
        let summary = m.summarize(Duration::from_secs(1));
        assert!(summary.contains("attempts=2 success=1 fail=1"));
    }

    #[test]
    fn each_op_kind_is_tracked_independently() {
        let m = Metrics::new();
        m.record(Op::Post, true, Duration::from_millis(1));
        m.record(Op::Delete, true, Duration::from_millis(1));
        let summary = m.summarize(Duration::from_secs(1));
        assert!(summary.contains("GET    attempts=0"));
        assert!(summary.contains("POST   attempts=1"));
        assert!(summary.contains("DELETE attempts=1"));
    }
}
