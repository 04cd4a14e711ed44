//! Character-level CSV line tokenizer
//!
//! Reads one character at a time and splits the stream into lines of
//! string fields. `,` separates fields, `"` toggles a quote region, `\`
//! makes the next character literal and `\r`/`\n` end a line.

use tracing::{debug, trace, warn};

use super::chars::CharRead;
use crate::error::{CsvError, Result};

const DELIMITER: char = ',';
const QUOTE: char = '"';
const ESCAPE: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InQuotes,
}

/// Accumulators for the line currently being read
struct ParserState {
    fields: Vec<String>,
    current: String,
    state: State,
}

impl ParserState {
    fn new() -> Self {
        Self {
            fields: Vec::new(),
            current: String::new(),
            state: State::Normal,
        }
    }

    fn in_quotes(&self) -> bool {
        self.state == State::InQuotes
    }

    fn toggle_quotes(&mut self) {
        self.state = match self.state {
            State::Normal => State::InQuotes,
            State::InQuotes => State::Normal,
        };
    }

    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.current));
    }

    fn finish(mut self) -> Vec<String> {
        self.end_field();
        self.fields
    }
}

/// Streaming tokenizer that owns its character source
///
/// Each [`read_line`](Self::read_line) call consumes exactly one logical
/// line. The source is released by [`dispose`](Self::dispose) or when the
/// tokenizer is dropped.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use csvstream::csv::{LineTokenizer, Utf8Chars};
///
/// let source = Utf8Chars::new(Cursor::new("a,\"b,c\",d\n1,2,3"));
/// let mut tokenizer = LineTokenizer::new(source);
///
/// assert_eq!(tokenizer.read_line()?, Some(vec!["a".into(), "b,c".into(), "d".into()]));
/// assert_eq!(tokenizer.read_line()?, Some(vec!["1".into(), "2".into(), "3".into()]));
/// assert_eq!(tokenizer.read_line()?, None);
/// # Ok::<(), csvstream::CsvError>(())
/// ```
pub struct LineTokenizer<S> {
    source: Option<S>,
    lines_read: u64,
}

impl<S: CharRead> LineTokenizer<S> {
    /// Create a tokenizer that takes ownership of `source`
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            lines_read: 0,
        }
    }

    /// Read the next logical line
    ///
    /// Returns `Ok(None)` when no characters are left. A line whose quote
    /// region is never closed runs to the end of the stream and is returned
    /// as is.
    pub fn read_line(&mut self) -> Result<Option<Vec<String>>> {
        let source = self.source.as_mut().ok_or(CsvError::Disposed)?;
        if source.is_exhausted()? {
            return Ok(None);
        }

        let mut line = ParserState::new();
        while let Some(ch) = source.read_char()? {
            match ch {
                DELIMITER if line.in_quotes() => line.current.push(ch),
                DELIMITER => line.end_field(),
                ESCAPE => {
                    if let Some(escaped) = source.read_char()? {
                        line.current.push(escaped);
                    }
                }
                QUOTE => line.toggle_quotes(),
                '\r' | '\n' if line.in_quotes() => line.current.push(ch),
                '\r' | '\n' if !line.current.is_empty() => {
                    line.end_field();
                    self.lines_read += 1;
                    trace!(line = self.lines_read, fields = line.fields.len(), "read line");
                    return Ok(Some(line.fields));
                }
                '\r' | '\n' => {}
                _ => line.current.push(ch),
            }
        }

        self.lines_read += 1;
        if line.in_quotes() {
            warn!(line = self.lines_read, "quoted field not closed before end of stream");
        }
        let fields = line.finish();
        trace!(line = self.lines_read, fields = fields.len(), "read final line");
        Ok(Some(fields))
    }

    /// Number of lines returned so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }
}

impl<S> LineTokenizer<S> {
    /// Release the character source; calling it again does nothing
    pub fn dispose(&mut self) {
        if self.source.take().is_some() {
            debug!(lines = self.lines_read, "released CSV source");
        }
    }

    /// Whether the source has been released
    pub fn is_disposed(&self) -> bool {
        self.source.is_none()
    }
}
