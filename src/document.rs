//! Document loading
//!
//! A document is the target text split into 1-indexed lines with line
//! terminators removed. It is never mutated after loading.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },
}

/// `\n`, `\r`, vertical tab, form feed, the file/group/record separators,
/// NEL and the Unicode line and paragraph separators all end a line.
/// `\r\n` counts as a single break.
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split into lines without terminators. A trailing break does not start an
/// extra empty line.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(text[start..idx].to_string());
        start = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(text[start..].to_string());
    }
    lines
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: String,
    lines: Vec<String>,
}

impl Document {
    /// Read and split a UTF-8 file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| DocumentError::Encoding {
            path: path.to_path_buf(),
        })?;

        let doc = Self::from_text(path.display().to_string(), &text);
        debug!("Loaded {} ({} lines)", doc.source, doc.len());
        Ok(doc)
    }

    /// Read everything from `reader`, labelled `source` in reports
    pub fn from_reader(source: impl Into<String>, mut reader: impl Read) -> Result<Self, DocumentError> {
        let source = source.into();
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| DocumentError::Read {
                path: PathBuf::from(&source),
                source: e,
            })?;
        let text = String::from_utf8(bytes).map_err(|_| DocumentError::Encoding {
            path: PathBuf::from(&source),
        })?;
        Ok(Self::from_text(source, &text))
    }

    /// Split in-memory text on every universal line break (see [`is_line_break`])
    pub fn from_text(source: impl Into<String>, text: &str) -> Self {
        Self {
            source: source.into(),
            lines: split_lines(text),
        }
    }

    /// Build from already separated lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: "<memory>".to_string(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `number` (1-indexed)
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// `(line number, content)` in document order
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = (usize, &str)> + ExactSizeIterator {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, l)| (idx + 1, l.as_str()))
    }
}
