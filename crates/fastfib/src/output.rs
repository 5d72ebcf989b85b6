//! Result formatting for the terminal, JSON reports, and output files.

use std::fmt::Write as _;
use std::path::Path;

use num_bigint::BigUint;
use serde::Serialize;

use crate::errors::AppError;

/// Values longer than this are abbreviated unless `--full` is given.
const ABBREVIATE_ABOVE: usize = 100;
/// Digits kept at each end of an abbreviated value.
const EDGE_DIGITS: usize = 50;

/// One computed quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Human label, e.g. `F(10)`.
    pub label: String,
    /// Index the entry refers to.
    pub n: u64,
    /// Decimal digit count, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digits: Option<u64>,
    /// Decimal text, possibly abbreviated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// False for floating-point approximations.
    pub exact: bool,
}

impl Entry {
    /// Entry for an exact value.
    #[must_use]
    pub fn exact(label: String, n: u64, value: &BigUint, full: bool) -> Self {
        let text = value.to_string();
        Self {
            label,
            n,
            digits: Some(text.len() as u64),
            value: Some(abbreviate(text, full)),
            exact: true,
        }
    }
}

/// Everything a subcommand produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Subcommand name.
    pub command: &'static str,
    /// Results in index order.
    pub entries: Vec<Entry>,
}

fn abbreviate(s: String, full: bool) -> String {
    if full || s.len() <= ABBREVIATE_ABOVE {
        return s;
    }
    format!(
        "{}...{} ({} digits)",
        &s[..EDGE_DIGITS],
        &s[s.len() - EDGE_DIGITS..],
        s.len()
    )
}

/// Plain-text rendering, one line per entry.
#[must_use]
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        let _ = match (&entry.value, entry.exact) {
            (Some(value), true) => writeln!(out, "{} = {value}", entry.label),
            (Some(value), false) => writeln!(out, "{} ~ {value} (approximate)", entry.label),
            (None, _) => writeln!(
                out,
                "{} has {} digits",
                entry.label,
                entry.digits.unwrap_or_default()
            ),
        };
    }
    out
}

/// Pretty-printed JSON rendering.
pub fn render_json(report: &Report) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Full decimal values, one per line.
#[must_use]
pub fn plain_values(values: &[BigUint]) -> String {
    let mut out = String::new();
    for value in values {
        let _ = writeln!(out, "{value}");
    }
    out
}

/// Write `contents` to `path`, replacing any existing file.
pub fn write_to_file(path: &Path, contents: &str) -> Result<(), AppError> {
    std::fs::write(path, contents).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
