//! Context windows around a reported line

use crate::document::Document;
use serde::Serialize;
use std::fmt;

/// Inclusive band of numbered lines. Empty when the document is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    pub start: usize,
    pub end: usize,
    pub lines: Vec<(usize, String)>,
}

impl ContextWindow {
    fn collect(doc: &Document, start: usize, end: usize) -> Self {
        let lines = doc
            .lines()
            .skip(start.saturating_sub(1))
            .take_while(|(n, _)| *n <= end)
            .map(|(n, l)| (n, l.to_string()))
            .collect();
        Self { start, end, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ContextWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (number, line) in &self.lines {
            writeln!(f, "{:04}: {}", number, line)?;
        }
        Ok(())
    }
}

/// Lines `target - radius ..= target + radius`, clamped to the document
pub fn render_context(doc: &Document, target_line: usize, radius: usize) -> ContextWindow {
    let start = target_line.saturating_sub(radius).max(1);
    let end = doc.len().min(target_line.saturating_add(radius));
    ContextWindow::collect(doc, start, end)
}

/// The last `size` lines of the document
pub fn tail_window(doc: &Document, size: usize) -> ContextWindow {
    let end = doc.len();
    let start = (end + 1).saturating_sub(size).max(1);
    ContextWindow::collect(doc, start, end)
}

/// Window around `target` when there is one, otherwise the tail
pub fn context_or_tail(doc: &Document, target: Option<usize>, radius: usize, tail: usize) -> ContextWindow {
    match target {
        Some(line) => render_context(doc, line, radius),
        None => tail_window(doc, tail),
    }
}
