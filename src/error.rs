//! Error types for CSV reading and table materialization

use std::path::PathBuf;

use thiserror::Error;

/// Result type for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors raised while reading CSV lines or building a table
#[derive(Error, Debug)]
pub enum CsvError {
    /// The underlying stream failed while reading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV file could not be opened
    #[error("Failed to open CSV file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reader's stream has already been released
    #[error("CSV reader has been disposed")]
    Disposed,

    /// A data row does not line up with the table's columns
    ///
    /// `index` is the first position that has either no field (short row)
    /// or no column (long row).
    #[error(
        "Row {row}: column index {index} out of range (table has {columns} columns, row has {fields} fields)"
    )]
    ColumnOutOfRange {
        row: usize,
        index: usize,
        columns: usize,
        fields: usize,
    },

    /// Two columns share the same name
    #[error("Duplicate column name: {0:?}")]
    DuplicateColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_out_of_range() {
        let err = CsvError::ColumnOutOfRange {
            row: 2,
            index: 1,
            columns: 2,
            fields: 1,
        };
        assert_eq!(
            err.to_string(),
            "Row 2: column index 1 out of range (table has 2 columns, row has 1 fields)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: CsvError = std::io::Error::other("boom").into();
        assert!(matches!(err, CsvError::Io(_)));
        assert_eq!(err.to_string(), "IO error: boom");
    }
}
