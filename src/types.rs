use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-indexed (line, column) coordinate. Columns count chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// The opener/closer characters a pass counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketPair {
    pub open: char,
    pub close: char,
}

impl BracketPair {
    pub const BRACES: BracketPair = BracketPair {
        open: '{',
        close: '}',
    };

    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Parse a two-character pair such as `"{}"` or `"()"`
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let open = chars.next()?;
        let close = chars.next()?;
        if chars.next().is_some() || open == close {
            return None;
        }
        Some(Self { open, close })
    }

    /// Signed contribution of `ch` to a forward running balance
    #[inline]
    pub fn delta(&self, ch: char) -> i64 {
        if ch == self.open {
            1
        } else if ch == self.close {
            -1
        } else {
            0
        }
    }
}

impl Default for BracketPair {
    fn default() -> Self {
        Self::BRACES
    }
}

impl fmt::Display for BracketPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.open, self.close)
    }
}

/// Which occurrence of an extreme value is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Earliest line wins; later equal values never overwrite it
    First,
    /// Latest line wins
    Last,
}

/// Minimum or maximum of the running balance and the line it was reached on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceExtreme {
    pub value: i64,
    /// `None` when the counter never moved past 0 in this direction
    pub line: Option<usize>,
    pub strictness: Strictness,
}

impl BalanceExtreme {
    pub fn initial() -> Self {
        Self {
            value: 0,
            line: None,
            strictness: Strictness::First,
        }
    }

    /// Offer a candidate; returns true if it replaced the current extreme
    pub(crate) fn offer(&mut self, count: i64, line: usize, better: impl Fn(i64, i64) -> bool) -> bool {
        let replace = match self.strictness {
            Strictness::First => better(count, self.value),
            Strictness::Last => count == self.value || better(count, self.value),
        };
        if replace {
            self.value = count;
            self.line = Some(line);
        }
        replace
    }
}

impl fmt::Display for BalanceExtreme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} at {}", self.value, line),
            None => write!(f, "{} at None", self.value),
        }
    }
}

/// A single brace that cannot be paired under LIFO matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "position", rename_all = "snake_case")]
pub enum UnmatchedBracket {
    /// Closer seen while the stack was empty
    UnmatchedCloser(Position),
    /// Opener still on the stack at end of document
    UnmatchedOpener(Position),
}

impl UnmatchedBracket {
    pub fn position(&self) -> Position {
        match self {
            UnmatchedBracket::UnmatchedCloser(pos) | UnmatchedBracket::UnmatchedOpener(pos) => *pos,
        }
    }
}

impl fmt::Display for UnmatchedBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracket::UnmatchedCloser(pos) => write!(f, "unmatched closer at {}", pos),
            UnmatchedBracket::UnmatchedOpener(pos) => write!(f, "unmatched opener at {}", pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_parse() {
        assert_eq!(BracketPair::parse("{}"), Some(BracketPair::BRACES));
        assert_eq!(BracketPair::parse("()"), Some(BracketPair::new('(', ')')));
        assert_eq!(BracketPair::parse("{"), None);
        assert_eq!(BracketPair::parse("{}}"), None);
        assert_eq!(BracketPair::parse("||"), None);
    }

    #[test]
    fn test_delta() {
        let pair = BracketPair::BRACES;
        assert_eq!(pair.delta('{'), 1);
        assert_eq!(pair.delta('}'), -1);
        assert_eq!(pair.delta('a'), 0);
        assert_eq!(pair.delta('('), 0);
    }

    #[test]
    fn test_extreme_first_keeps_earliest() {
        let mut min = BalanceExtreme::initial();
        assert!(min.offer(-1, 1, |a, b| a < b));
        assert!(!min.offer(-1, 3, |a, b| a < b));
        assert_eq!(min.line, Some(1));
    }

    #[test]
    fn test_extreme_last_takes_latest() {
        let mut max = BalanceExtreme {
            strictness: Strictness::Last,
            ..BalanceExtreme::initial()
        };
        max.offer(2, 1, |a, b| a > b);
        max.offer(2, 4, |a, b| a > b);
        assert_eq!(max.value, 2);
        assert_eq!(max.line, Some(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
        assert_eq!(
            UnmatchedBracket::UnmatchedCloser(Position::new(1, 1)).to_string(),
            "unmatched closer at (1, 1)"
        );
        assert_eq!(BalanceExtreme::initial().to_string(), "0 at None");
    }
}
