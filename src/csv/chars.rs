//! Character sources for the line tokenizer

use std::char::REPLACEMENT_CHARACTER;
use std::io::{self, BufRead};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A stream that hands out one character at a time
///
/// The tokenizer never looks further ahead than the next character, so a
/// source only has to answer two questions: is anything left, and what is
/// the next character.
pub trait CharRead {
    /// Read the next character, or `None` once the stream is exhausted
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Whether no characters remain
    fn is_exhausted(&mut self) -> io::Result<bool>;
}

impl<T: CharRead + ?Sized> CharRead for &mut T {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }

    fn is_exhausted(&mut self) -> io::Result<bool> {
        (**self).is_exhausted()
    }
}

/// UTF-8 decoding character source over any [`BufRead`]
///
/// A leading byte-order mark is skipped. Malformed sequences decode to
/// U+FFFD, one replacement per offending sequence.
#[derive(Debug)]
pub struct Utf8Chars<R> {
    inner: R,
    bom_checked: bool,
}

impl<R: BufRead> Utf8Chars<R> {
    /// Wrap a buffered reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bom_checked: false,
        }
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap into the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        loop {
            match self.inner.fill_buf() {
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.inner.fill_buf()
    }

    fn skip_bom(&mut self) -> io::Result<()> {
        if self.bom_checked {
            return Ok(());
        }
        self.bom_checked = true;
        if self.fill_buf()?.starts_with(&UTF8_BOM) {
            self.inner.consume(UTF8_BOM.len());
        }
        Ok(())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.fill_buf()?.first().copied();
        if byte.is_some() {
            self.inner.consume(1);
        }
        Ok(byte)
    }

    /// Consume the next byte only if it continues a multi-byte sequence
    fn next_continuation(&mut self) -> io::Result<Option<u8>> {
        match self.fill_buf()?.first().copied() {
            Some(b) if b & 0xC0 == 0x80 => {
                self.inner.consume(1);
                Ok(Some(b))
            }
            _ => Ok(None),
        }
    }
}

impl<R: BufRead> CharRead for Utf8Chars<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        self.skip_bom()?;
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };

        let width = utf8_width(lead);
        if width == 1 {
            return Ok(Some(lead as char));
        }
        if width == 0 {
            return Ok(Some(REPLACEMENT_CHARACTER));
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.next_continuation()? {
                Some(b) => *slot = b,
                None => return Ok(Some(REPLACEMENT_CHARACTER)),
            }
        }

        let decoded = std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(REPLACEMENT_CHARACTER);
        Ok(Some(decoded))
    }

    fn is_exhausted(&mut self) -> io::Result<bool> {
        self.skip_bom()?;
        Ok(self.fill_buf()?.is_empty())
    }
}

/// Sequence length announced by a UTF-8 lead byte, 0 if it cannot lead
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
