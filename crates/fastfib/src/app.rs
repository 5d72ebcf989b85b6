//! Application entry point and dispatch.

use std::time::Instant;

use anyhow::{Context, Result};
use num_bigint::BigUint;
use tracing::debug;

use fastfib_batch::{RangeEvaluator, RangeRequest};
use fastfib_core::approx::{binet, binet_rounded};
use fastfib_core::calculator::{Calculator, FibCalculator};
use fastfib_core::index::IntoIndex;
use fastfib_core::options::Options;

use crate::config::{AppConfig, Command};
use crate::errors::AppError;
use crate::output::{plain_values, render_json, render_text, write_to_file, Entry, Report};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let started = Instant::now();
    let (report, values) = compute(config)?;
    debug!(elapsed = ?started.elapsed(), command = report.command, "computation finished");

    let rendered = if config.json {
        render_json(&report)?
    } else {
        render_text(&report)
    };
    print!("{rendered}");

    if let Some(path) = &config.output {
        let contents = if values.is_empty() {
            rendered
        } else {
            plain_values(&values)
        };
        write_to_file(path, &contents)
            .with_context(|| format!("saving {} result", report.command))?;
    }
    Ok(())
}

/// Compute what the subcommand asks for. Also returns the exact values so
/// `--output` can write them unabbreviated.
fn compute(config: &AppConfig) -> Result<(Report, Vec<BigUint>), AppError> {
    let opts = config.core_options();
    let full = config.full;
    debug!(calculator = FibCalculator::default().name(), "dispatching");

    match config.command {
        Command::Fib { n } => {
            let n = n.into_index()?;
            let value = single(n, &opts)?;
            let entries = vec![Entry::exact(format!("F({n})"), n, &value, full)];
            Ok((report("fib", entries), vec![value]))
        }
        Command::Pair { n } => {
            let n = n.into_index()?;
            let (fn0, fn1) = FibCalculator::default().calculate_pair(n, &opts)?;
            let entries = vec![
                Entry::exact(format!("F({n})"), n, &fn0, full),
                Entry::exact(format!("F({n}+1)"), n, &fn1, full),
            ];
            Ok((report("pair", entries), vec![fn0, fn1]))
        }
        Command::Range { start, end, .. } => {
            let request = RangeRequest::new(start, end)?;
            let values = RangeEvaluator::new(config.batch_options()?).evaluate(&request)?;
            let entries = (request.start()..=request.end())
                .zip(&values)
                .map(|(i, value)| Entry::exact(format!("F({i})"), i, value, full))
                .collect();
            Ok((report("range", entries), values))
        }
        Command::Digits { n } => {
            let n = n.into_index()?;
            let entries = vec![Entry {
                label: format!("F({n})"),
                n,
                digits: Some(fastfib_core::digits::digit_count(n)),
                value: None,
                exact: true,
            }];
            Ok((report("digits", entries), Vec::new()))
        }
        Command::Stairs { steps } => {
            let steps = steps.into_index()?;
            let n = steps.checked_add(1).ok_or_else(|| {
                fastfib_core::FibError::InvalidArgument(format!("step count {steps} is too large"))
            })?;
            let value = single(n, &opts)?;
            let entries = vec![Entry::exact(format!("ways({steps})"), steps, &value, full)];
            Ok((report("stairs", entries), vec![value]))
        }
        Command::Binet { n } => {
            let n = n.into_index()?;
            let (value, exact) = match binet_rounded(n) {
                Some(rounded) => (rounded.to_string(), true),
                None => (format!("{:e}", binet(n)), false),
            };
            let entries = vec![Entry {
                label: format!("F({n})"),
                n,
                digits: None,
                value: Some(value),
                exact,
            }];
            Ok((report("binet", entries), Vec::new()))
        }
    }
}

fn single(n: u64, opts: &Options) -> Result<BigUint, AppError> {
    Ok(FibCalculator::default().calculate(n, opts)?)
}

fn report(command: &'static str, entries: Vec<Entry>) -> Report {
    Report { command, entries }
}
