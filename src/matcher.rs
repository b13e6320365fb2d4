use crate::document::Document;
use crate::types::{BracketPair, Position, UnmatchedBracket};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Every brace the LIFO matcher could not pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnmatchedBrackets {
    /// Closers seen with an empty stack, in scan order
    pub closers: Vec<Position>,
    /// Openers left on the stack, outermost first
    pub openers: Vec<Position>,
}

impl UnmatchedBrackets {
    pub fn is_balanced(&self) -> bool {
        self.closers.is_empty() && self.openers.is_empty()
    }

    /// Tagged findings: closers first, then openers
    pub fn findings(&self) -> Vec<UnmatchedBracket> {
        self.closers
            .iter()
            .copied()
            .map(UnmatchedBracket::UnmatchedCloser)
            .chain(self.openers.iter().copied().map(UnmatchedBracket::UnmatchedOpener))
            .collect()
    }

    /// Up to the last `n` leftover openers (the innermost ones)
    pub fn last_openers(&self, n: usize) -> &[Position] {
        let skip = self.openers.len().saturating_sub(n);
        &self.openers[skip..]
    }
}

/// Match openers and closers character by character
pub fn find_unmatched(doc: &Document, pair: BracketPair) -> UnmatchedBrackets {
    let mut stack: Vec<Position> = Vec::new();
    let mut closers = Vec::new();

    for (number, line) in doc.lines() {
        for (idx, ch) in line.chars().enumerate() {
            let pos = Position::new(number, idx + 1);
            if ch == pair.open {
                stack.push(pos);
            } else if ch == pair.close && stack.pop().is_none() {
                debug!("Unmatched closing at {} {}", pos.line, pos.column);
                closers.push(pos);
            }
        }
    }

    UnmatchedBrackets {
        closers,
        openers: stack,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("unmatched closing bracket at {0}")]
    UnmatchedClosing(Position),

    #[error("opening bracket at {0} unmatched until end of input")]
    UnmatchedOpening(Position),
}

/// Quick check that `code` is balanced for `pair`.
/// Reports the first unmatched closer, otherwise the innermost unclosed opener.
pub fn validate_brackets(code: &str, pair: BracketPair) -> Result<(), BalanceError> {
    let doc = Document::from_text("<input>", code);
    let unmatched = find_unmatched(&doc, pair);

    if let Some(pos) = unmatched.closers.first() {
        Err(BalanceError::UnmatchedClosing(*pos))
    } else if let Some(pos) = unmatched.openers.last() {
        Err(BalanceError::UnmatchedOpening(*pos))
    } else {
        Ok(())
    }
}
