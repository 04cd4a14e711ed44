//! CSV file reading, one logical line at a time

use crate::csv::{LineTokenizer, Utf8Chars};
use crate::error::{CsvError, Result};
use crate::table::{materialize, Table};
use crate::types::ReaderOptions;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// CSV reader over a file or any byte stream
///
/// Lines are read character by character, so quoted fields may span
/// several physical lines. The reader owns its stream; it is released by
/// [`dispose`](Self::dispose) or when the reader is dropped.
///
/// Reads take `&mut self`, so one reader is only ever driven from one
/// place at a time.
///
/// # Examples
///
/// ```no_run
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// while let Some(line) = reader.read_line().unwrap() {
///     println!("{:?}", line);
/// }
/// ```
///
/// # As a table
///
/// ```no_run
/// use csvstream::CsvReader;
///
/// let table = CsvReader::open("data.csv")
///     .unwrap()
///     .has_header(true)
///     .to_table()
///     .unwrap();
///
/// for row in table.rows() {
///     println!("{:?}", row.get("name"));
/// }
/// ```
pub struct CsvReader<R = BufReader<File>> {
    tokenizer: LineTokenizer<Utf8Chars<R>>,
    options: ReaderOptions,
}

impl CsvReader<BufReader<File>> {
    /// Open a CSV file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Open a CSV file with explicit options
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened CSV file");
        Ok(CsvReader::from_buf_reader(BufReader::new(file)).with_options(options))
    }
}

impl<R: Read> CsvReader<BufReader<R>> {
    /// Read CSV from any byte stream, buffering it
    pub fn from_reader(reader: R) -> Self {
        CsvReader::from_buf_reader(BufReader::new(reader))
    }
}

impl<R: BufRead> CsvReader<R> {
    /// Read CSV from an already buffered stream
    pub fn from_buf_reader(reader: R) -> Self {
        CsvReader {
            tokenizer: LineTokenizer::new(Utf8Chars::new(reader)),
            options: ReaderOptions::default(),
        }
    }

    /// Replace the reader options (builder pattern)
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Indicate that the first line contains column names (builder pattern)
    ///
    /// Only [`to_table`](Self::to_table) looks at this; `read_line` always
    /// returns every line.
    pub fn has_header(mut self, has: bool) -> Self {
        self.options.has_headers = has;
        self
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Read the next line of fields
    ///
    /// Returns `Ok(None)` at end of input and [`CsvError::Disposed`] once the
    /// reader has been disposed.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_reader("a,b\n1,2".as_bytes());
    ///
    /// assert_eq!(reader.read_line()?, Some(vec!["a".to_string(), "b".to_string()]));
    /// assert_eq!(reader.read_line()?, Some(vec!["1".to_string(), "2".to_string()]));
    /// assert_eq!(reader.read_line()?, None);
    /// # Ok::<(), csvstream::CsvError>(())
    /// ```
    pub fn read_line(&mut self) -> Result<Option<Vec<String>>> {
        self.tokenizer.read_line()
    }

    /// Iterate over the remaining lines
    pub fn lines(&mut self) -> CsvLineIterator<'_, R> {
        CsvLineIterator { reader: self }
    }

    /// Number of lines read so far
    pub fn line_count(&self) -> u64 {
        self.tokenizer.lines_read()
    }

    /// Read every remaining line into a [`Table`]
    ///
    /// Fails on the first line whose field count differs from the column
    /// count; the stream is not rewound.
    pub fn to_table(&mut self) -> Result<Table> {
        materialize(&mut self.tokenizer, &self.options)
    }
}

impl<R> CsvReader<R> {
    /// Release the underlying stream; later calls do nothing
    pub fn dispose(&mut self) {
        self.tokenizer.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.tokenizer.is_disposed()
    }
}

/// Iterator over CSV lines
pub struct CsvLineIterator<'a, R> {
    reader: &'a mut CsvReader<R>,
}

impl<'a, R: BufRead> Iterator for CsvLineIterator<'a, R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_plain_csv() -> Result<()> {
        let file = write_temp("Name,Age,City\nAlice,30,NYC\nBob,25,SF\n");

        let mut reader = CsvReader::open(file.path())?;
        let mut rows = vec![];
        for line in reader.lines() {
            rows.push(line?);
        }

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Name", "Age", "City"]);
        assert_eq!(rows[1], vec!["Alice", "30", "NYC"]);
        assert_eq!(reader.line_count(), 3);
        Ok(())
    }

    #[test]
    fn test_read_with_headers() -> Result<()> {
        let file = write_temp("ID,Name\n1,Alice\n2,Bob");

        let table = CsvReader::open(file.path())?.has_header(true).to_table()?;

        assert_eq!(table.column_names(), vec!["ID", "Name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].get("Name"), Some("Alice"));
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        match CsvReader::open(&path) {
            Err(CsvError::Open { path: p, .. }) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("opening a missing file should fail"),
        }
    }

    #[test]
    fn test_dispose_twice() -> Result<()> {
        let mut reader = CsvReader::from_reader("a,b".as_bytes());
        assert_eq!(reader.read_line()?, Some(vec!["a".into(), "b".into()]));
        reader.dispose();
        reader.dispose();
        assert!(reader.is_disposed());
        assert!(matches!(reader.read_line(), Err(CsvError::Disposed)));
        assert!(matches!(reader.to_table(), Err(CsvError::Disposed)));
        Ok(())
    }

    #[test]
    fn test_lines_stop_at_end() {
        let mut reader = CsvReader::from_reader("x\ny".as_bytes());
        assert_eq!(reader.lines().count(), 2);
        assert!(reader.lines().next().is_none());
    }
}
