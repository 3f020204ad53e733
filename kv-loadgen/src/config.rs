//! CLI for the load-generator binary.

use clap::{Parser, ValueEnum};

use crate::error::GenError;

/// Workload mode controlling how the scheduler picks operations and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Workload {
    Mix,
    PutAll,
    GetAll,
    GetPopular,
}

/// Concurrent load generator for the key-value benchmark harness.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the `/kv` endpoint to drive.
    #[arg(long, default_value = "http://kv_server:8080/kv")]
    pub server: String,

    /// Number of driver threads (each owning its own queue and executor
    /// pool), not the per-driver executor count.
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// Run duration in seconds.
    #[arg(long, default_value_t = 20)]
    pub duration: u64,

    /// `get,post,delete` percentages, summing to 100. Only consulted in
    /// `mix` mode.
    #[arg(long, default_value = "60,30,10", value_parser = parse_mix)]
    pub mix: (u32, u32, u32),

    /// Prefix for every generated key.
    #[arg(long, default_value = "key")]
    pub key_prefix: String,

    /// Workload mode.
    #[arg(long, value_enum, default_value_t = Workload::Mix)]
    pub workload: Workload,

    /// Maximum number of live keys tracked by the registry.
    #[arg(long, default_value_t = 100_000)]
    pub key_pool_size: usize,

    /// Number of popular keys seeded before the run starts.
    #[arg(long, default_value_t = 100)]
    pub popular_size: usize,
}

impl Args {
    /// Validates the parsed configuration beyond what `clap` itself checks.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.workload == Workload::Mix {
            let sum = self.mix.0 + self.mix.1 + self.mix.2;
            if sum != 100 {
                return Err(GenError::InvalidMix(sum));
            }
        }
        Ok(())
    }
}

fn parse_mix(s: &str) -> Result<(u32, u32, u32), String> {
    let parts: Vec<&str> = s.split(',').collect();
    let [g, p, d] = parts.as_slice() else {
        return Err(format!("expected `get,post,delete`, got `{s}`"));
    };
    let parse = |s: &str| s.trim().parse::<u32>().map_err(|_| format!("not an integer: `{s}`"));
    Ok((parse(g)?, parse(p)?, parse(d)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mix_splits_three_integers() {
        assert_eq!(parse_mix("60,30,10"), Ok((60, 30, 10)));
    }

    #[test]
    fn parse_mix_rejects_wrong_arity() {
        assert!(parse_mix("60,30").is_err());
    }

    #[test]
    fn validate_rejects_mix_not_summing_to_100() {
        let mut args = sample_args();
        args.mix = (50, 30, 10);
        assert!(args.validate().is_err());
    }

    #[test]
    fn validate_ignores_mix_sum_outside_mix_mode() {
        let mut args = sample_args();
        args.mix = (1, 1, 1);
        args.workload = Workload::GetAll;
        assert!(args.validate().is_ok());
    }

    fn sample_args() -> Args {
        Args {
            server: "http://localhost:8080/kv".into(),
            threads: 4,
            duration: 1,
            mix: (60, 30, 10),
            key_prefix: "key".into(),
            workload: Workload::Mix,
            key_pool_size: 100,
            popular_size: 10,
        }
    }
}
