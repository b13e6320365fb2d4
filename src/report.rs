//! Report assembly
//!
//! Each pass produces a report value that renders as the plain-text
//! diagnostic with `Display` and as JSON through serde.

use crate::config::Config;
use crate::context::{context_or_tail, render_context, ContextWindow};
use crate::document::Document;
use crate::matcher::{find_unmatched, UnmatchedBrackets};
use crate::scanner::{scan_backward, scan_forward, trace_balance, BackwardScan, ForwardScan, TraceLine};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Which analysis to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Min,
    Max,
    FromEnd,
    Unmatched,
    Trace,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinReport {
    pub scan: ForwardScan,
    pub context: ContextWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxReport {
    pub scan: ForwardScan,
    pub context: ContextWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromEndReport {
    pub scan: BackwardScan,
    /// Only present when a negative line was found
    pub context: Option<ContextWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedReport {
    #[serde(flatten)]
    pub unmatched: UnmatchedBrackets,
    /// Cap on how many leftover openers the text form lists
    #[serde(skip)]
    pub max_openers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub lines: Vec<TraceLine>,
    /// Number of lines left out between the head and tail bands
    pub omitted: usize,
    pub final_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "pass", rename_all = "kebab-case")]
pub enum Report {
    Min(MinReport),
    Max(MaxReport),
    FromEnd(FromEndReport),
    Unmatched(UnmatchedReport),
    Trace(TraceReport),
    All { reports: Vec<Report> },
}

/// Run `pass` over `doc` with the limits in `config`
pub fn build(doc: &Document, pass: Pass, config: &Config) -> Report {
    let pair = config.brackets;
    let opts = &config.report;

    match pass {
        Pass::Min => {
            let scan = scan_forward(doc, pair);
            let context = context_or_tail(doc, scan.min.line, opts.context_radius, opts.tail_lines);
            Report::Min(MinReport { scan, context })
        }
        Pass::Max => {
            let scan = scan_forward(doc, pair);
            let context = context_or_tail(doc, scan.max.line, opts.context_radius, opts.tail_lines);
            Report::Max(MaxReport { scan, context })
        }
        Pass::FromEnd => {
            let scan = scan_backward(doc, pair);
            let context = scan
                .first_negative_line
                .map(|line| render_context(doc, line, opts.context_radius));
            Report::FromEnd(FromEndReport { scan, context })
        }
        Pass::Unmatched => {
            let unmatched = find_unmatched(doc, pair);
            if !unmatched.is_balanced() {
                info!(
                    "{}: {} unmatched closing, {} unmatched opening",
                    doc.source(),
                    unmatched.closers.len(),
                    unmatched.openers.len()
                );
            }
            Report::Unmatched(UnmatchedReport {
                unmatched,
                max_openers: opts.max_reported_openers,
            })
        }
        Pass::Trace => {
            let all = trace_balance(doc, pair);
            let final_balance = all.last().map_or(0, |t| t.balance);
            let tail_from = all.len().saturating_sub(opts.trace_tail);
            let total = all.len();
            let lines: Vec<TraceLine> = all
                .into_iter()
                .filter(|t| t.line <= opts.trace_head || t.line > tail_from)
                .collect();
            Report::Trace(TraceReport {
                omitted: total - lines.len(),
                lines,
                final_balance,
            })
        }
        // diagnostic passes only; the trace is run on its own
        Pass::All => {
            let reports = [Pass::Min, Pass::Max, Pass::FromEnd, Pass::Unmatched]
                .into_iter()
                .map(|p| build(doc, p, config))
                .collect();
            Report::All { reports }
        }
    }
}

fn write_extreme_line(f: &mut fmt::Formatter<'_>, line: Option<usize>) -> fmt::Result {
    match line {
        Some(l) => write!(f, "{}", l),
        None => write!(f, "None"),
    }
}

impl fmt::Display for MinReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "final {} most-negative {} at ",
            self.scan.final_balance, self.scan.min.value
        )?;
        write_extreme_line(f, self.scan.min.line)?;
        writeln!(f)?;
        if self.scan.min.line.is_some() {
            writeln!(f, "Context {}..{}:", self.context.start, self.context.end)?;
        }
        write!(f, "{}", self.context)
    }
}

impl fmt::Display for MaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "final {} max {} at ", self.scan.final_balance, self.scan.max.value)?;
        write_extreme_line(f, self.scan.max.line)?;
        writeln!(f)?;
        if let Some(line) = self.scan.max.line {
            writeln!(
                f,
                "Context around max-count {} ({}..{}):",
                line, self.context.start, self.context.end
            )?;
        }
        write!(f, "{}", self.context)
    }
}

impl fmt::Display for FromEndReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "final_balance_from_end {} first-negative-from-end-line ",
            self.scan.final_balance
        )?;
        write_extreme_line(f, self.scan.first_negative_line)?;
        writeln!(f)?;
        match &self.context {
            Some(window) => {
                writeln!(f, "context {} {}", window.start, window.end)?;
                write!(f, "{}", window)
            }
            None => writeln!(
                f,
                "No negative region from end; final count is {}",
                self.scan.final_balance
            ),
        }
    }
}

impl fmt::Display for UnmatchedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in &self.unmatched.closers {
            writeln!(f, "Unmatched closing at {} {}", pos.line, pos.column)?;
        }
        if !self.unmatched.openers.is_empty() {
            writeln!(f, "Unmatched opening braces (line,col):")?;
            for pos in self.unmatched.last_openers(self.max_openers) {
                writeln!(f, "{}", pos)?;
            }
        } else if self.unmatched.closers.is_empty() {
            writeln!(f, "All braces matched")?;
        } else {
            writeln!(f, "No unmatched opening braces")?;
        }
        Ok(())
    }
}

impl fmt::Display for TraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev = 0;
        for t in &self.lines {
            if self.omitted > 0 && t.line > prev + 1 {
                writeln!(f, "...")?;
            }
            writeln!(f, "{:04}: {}: {}", t.line, t.balance, t.content)?;
            prev = t.line;
        }
        writeln!(f, "final count {}", self.final_balance)
    }
}

impl Report {
    fn heading(&self) -> &'static str {
        match self {
            Report::Min(_) => "most negative balance",
            Report::Max(_) => "maximum balance",
            Report::FromEnd(_) => "first negative balance from end",
            Report::Unmatched(_) => "unmatched braces",
            Report::Trace(_) => "balance trace",
            Report::All { .. } => "all passes",
        }
    }

    /// True when the report shows any sign of imbalance
    pub fn has_findings(&self) -> bool {
        match self {
            Report::Min(r) => r.scan.final_balance != 0 || r.scan.min.line.is_some(),
            Report::Max(r) => r.scan.final_balance != 0,
            Report::FromEnd(r) => r.scan.final_balance != 0 || r.scan.first_negative_line.is_some(),
            Report::Unmatched(r) => !r.unmatched.is_balanced(),
            Report::Trace(r) => r.final_balance != 0,
            Report::All { reports } => reports.iter().any(Report::has_findings),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Min(r) => write!(f, "{}", r),
            Report::Max(r) => write!(f, "{}", r),
            Report::FromEnd(r) => write!(f, "{}", r),
            Report::Unmatched(r) => write!(f, "{}", r),
            Report::Trace(r) => write!(f, "{}", r),
            Report::All { reports } => {
                for (idx, report) in reports.iter().enumerate() {
                    if idx > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "== {} ==", report.heading())?;
                    write!(f, "{}", report)?;
                }
                Ok(())
            }
        }
    }
}
