//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fastfib_batch::{BatchOptions, PartitionStrategy, RangeMode, ThreadConfig};
use fastfib_core::calculator::FibError;
use fastfib_core::options::Options;
use fastfib_core::DEFAULT_MAX_DIGITS;

/// FastFib: exact Fibonacci numbers of any size.
#[derive(Parser, Debug)]
#[command(name = "fastfib", version, about)]
pub struct AppConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Worker threads for range computations [default: hardware threads].
    #[arg(short, long, global = true, env = "FASTFIB_THREADS")]
    pub threads: Option<usize>,

    /// Largest result allowed, in decimal digits. 0 disables the limit.
    #[arg(long, global = true, env = "FASTFIB_MAX_DIGITS", default_value_t = DEFAULT_MAX_DIGITS)]
    pub max_digits: u64,

    /// Operand size in bits above which the doubling products run in parallel.
    #[arg(long, global = true, default_value = "0")]
    pub threshold: usize,

    /// Print every digit instead of abbreviating long values.
    #[arg(long, global = true)]
    pub full: bool,

    /// Print a JSON report instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the full decimal value(s) to this file.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

/// What to compute.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compute F(n).
    Fib {
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        n: i128,
    },
    /// Compute F(n) and F(n+1).
    Pair {
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        n: i128,
    },
    /// Compute F(start) through F(end), inclusive.
    Range {
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        start: i128,
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        end: i128,
        /// Compute every index with its own kernel call.
        #[arg(long)]
        independent: bool,
        /// Give every worker the same number of indices.
        #[arg(long)]
        equal_split: bool,
    },
    /// Number of decimal digits of F(n), without computing it.
    Digits {
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        n: i128,
    },
    /// Ways to climb a staircase one or two steps at a time.
    Stairs {
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        steps: i128,
    },
    /// Binet's floating-point approximation of F(n) (not exact).
    Binet {
        #[arg(allow_negative_numbers = true, value_parser = parse_signed)]
        n: i128,
    },
}

/// Indices are read as signed so negative input reaches index validation
/// instead of failing inside the argument parser.
fn parse_signed(s: &str) -> Result<i128, std::num::ParseIntError> {
    s.trim().parse()
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Kernel options derived from the flags.
    #[must_use]
    pub fn core_options(&self) -> Options {
        Options {
            parallel_threshold: self.threshold,
            max_digits: Some(self.max_digits),
        }
        .normalize()
    }

    /// Explicit worker count, if one was given.
    pub fn thread_config(&self) -> Result<Option<ThreadConfig>, FibError> {
        self.threads.map(ThreadConfig::new).transpose()
    }

    /// Range evaluation options derived from the flags and the subcommand.
    pub fn batch_options(&self) -> Result<BatchOptions, FibError> {
        let (independent, equal_split) = match self.command {
            Command::Range {
                independent,
                equal_split,
                ..
            } => (independent, equal_split),
            _ => (false, false),
        };
        Ok(BatchOptions {
            threads: self.thread_config()?,
            partition: if equal_split {
                PartitionStrategy::EqualCount
            } else {
                PartitionStrategy::WorkWeighted
            },
            mode: if independent {
                RangeMode::Independent
            } else {
                RangeMode::Incremental
            },
            core: self.core_options(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        <AppConfig as Parser>::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_subcommands() {
        assert_eq!(parse(&["fastfib", "fib", "10"]).command, Command::Fib { n: 10 });
        assert_eq!(parse(&["fastfib", "fib", "-5"]).command, Command::Fib { n: -5 });
        assert_eq!(
            parse(&["fastfib", "range", "1", "20", "--independent"]).command,
            Command::Range {
                start: 1,
                end: 20,
                independent: true,
                equal_split: false
            }
        );
    }

    #[test]
    fn zero_max_digits_is_unlimited() {
        let config = parse(&["fastfib", "--max-digits", "0", "fib", "10"]);
        assert_eq!(config.core_options().max_digits, None);

        let config = parse(&["fastfib", "fib", "10", "--max-digits", "100"]);
        assert_eq!(config.core_options().max_digits, Some(100));
    }

    #[test]
    fn thread_flag() {
        let config = parse(&["fastfib", "range", "0", "9", "-t", "3"]);
        assert_eq!(config.thread_config().unwrap().unwrap().workers(), 3);

        let config = parse(&["fastfib", "range", "0", "9", "--threads", "0"]);
        assert!(matches!(
            config.thread_config(),
            Err(FibError::InvalidArgument(_))
        ));
    }

    #[test]
    fn range_flags_select_strategy() {
        let config = parse(&["fastfib", "range", "0", "9", "--equal-split", "-t", "2"]);
        let batch = config.batch_options().unwrap();
        assert_eq!(batch.partition, PartitionStrategy::EqualCount);
        assert_eq!(batch.mode, RangeMode::Incremental);
    }

    #[test]
    fn rejects_garbage_index() {
        assert!(<AppConfig as Parser>::try_parse_from(["fastfib", "fib", "ten"]).is_err());
    }
}
