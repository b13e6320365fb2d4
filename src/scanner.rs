//! Running-balance scans
//!
//! Both scans check the counter once per full line, so every location they
//! report has line granularity. Use the matcher for exact columns.

use crate::document::Document;
use crate::types::{BalanceExtreme, BracketPair};
use serde::Serialize;
use tracing::debug;

/// Result of the forward scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardScan {
    pub final_balance: i64,
    pub min: BalanceExtreme,
    pub max: BalanceExtreme,
}

/// Result of the reverse scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackwardScan {
    pub final_balance: i64,
    /// Line closest to the end where the reversed counter first dropped below 0
    pub first_negative_line: Option<usize>,
}

/// Running balance after one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceLine {
    pub line: usize,
    pub balance: i64,
    pub content: String,
}

fn line_delta(line: &str, pair: BracketPair) -> i64 {
    line.chars().map(|ch| pair.delta(ch)).sum()
}

/// Opener `+1`, closer `-1`, tracking the earliest line of the minimum and
/// maximum running balance
pub fn scan_forward(doc: &Document, pair: BracketPair) -> ForwardScan {
    let mut count = 0i64;
    let mut min = BalanceExtreme::initial();
    let mut max = BalanceExtreme::initial();

    for (number, line) in doc.lines() {
        count += line_delta(line, pair);
        min.offer(count, number, |a, b| a < b);
        max.offer(count, number, |a, b| a > b);
    }

    debug!(
        "forward scan of {}: final {}, min {}, max {}",
        doc.source(),
        count,
        min,
        max
    );

    ForwardScan {
        final_balance: count,
        min,
        max,
    }
}

/// Walk lines last to first with closer `+1`, opener `-1` and report the
/// first line where the counter goes negative.
///
/// Only the first excursion is recorded. The remaining lines are still
/// tallied so `final_balance` is always the negation of the forward balance.
pub fn scan_backward(doc: &Document, pair: BracketPair) -> BackwardScan {
    let mut count = 0i64;
    let mut first_negative_line = None;

    for (number, line) in doc.lines().rev() {
        count -= line_delta(line, pair);
        if count < 0 && first_negative_line.is_none() {
            first_negative_line = Some(number);
        }
    }

    debug!(
        "backward scan of {}: final {}, first negative {:?}",
        doc.source(),
        count,
        first_negative_line
    );

    BackwardScan {
        final_balance: count,
        first_negative_line,
    }
}

/// Running balance after every line, in document order
pub fn trace_balance(doc: &Document, pair: BracketPair) -> Vec<TraceLine> {
    let mut count = 0i64;
    doc.lines()
        .map(|(number, line)| {
            count += line_delta(line, pair);
            TraceLine {
                line: number,
                balance: count,
                content: line.to_string(),
            }
        })
        .collect()
}
