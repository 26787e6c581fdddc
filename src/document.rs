//! Document abstraction and the position translator.
//!
//! Lint engines report 1-based `(line, column)` positions; the editor wants flat
//! 0-based character offsets into the whole document. A [`Document`] only has to
//! resolve "where does line N start", and [`to_offset`] does the rest.

/// Read-only view of the text an engine was run against.
pub trait Document {
    /// Full document text.
    fn text(&self) -> &str;

    /// Character offset at which the 1-based `line` starts.
    ///
    /// Lines past the end of the document resolve to the document length.
    fn line_start(&self, line: usize) -> usize;

    /// Document length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convert a 1-based `(line, column)` into a 0-based document offset.
///
/// `line_start(line) + column - 1`. Positions are trusted as reported by the
/// engine; no validation against the document happens here.
#[inline]
pub fn to_offset(doc: &impl Document, line: usize, column: usize) -> usize {
    doc.line_start(line) + column.saturating_sub(1)
}

/// Immutable snapshot of a text with a precomputed line-start table.
///
/// Offsets are counted in Unicode scalar values (`char`), not bytes.
#[derive(Debug, Clone)]
pub struct TextSnapshot<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
    len: usize,
}

impl<'a> TextSnapshot<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        let mut len = 0;
        for c in text.chars() {
            len += 1;
            if c == '\n' {
                line_starts.push(len);
            }
        }
        Self { text, line_starts, len }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Map a character offset back to a byte index into the text.
    pub fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl Document for TextSnapshot<'_> {
    fn text(&self) -> &str {
        self.text
    }

    fn line_start(&self, line: usize) -> usize {
        match line {
            0 => 0,
            n => self.line_starts.get(n - 1).copied().unwrap_or(self.len),
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}
