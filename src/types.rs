//! Type definitions for reader configuration and table columns

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how lines are turned into a table
///
/// # Examples
///
/// ```
/// use csvstream::ReaderOptions;
///
/// let options = ReaderOptions::new().has_headers(true);
/// assert!(options.headers());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Treat the first line as column names (default: false)
    pub has_headers: bool,
}

impl ReaderOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the first line holds column names
    pub fn has_headers(mut self, has: bool) -> Self {
        self.has_headers = has;
        self
    }

    /// Whether the first line holds column names
    pub fn headers(&self) -> bool {
        self.has_headers
    }
}

/// Value type stored in a column
///
/// Every field read from CSV is text, so this has a single variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum DataType {
    /// UTF-8 text
    #[default]
    String,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String => f.write_str("string"),
        }
    }
}

/// Column definition of a [`Table`](crate::Table)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Column {
    /// Column name, unique within a table
    pub name: String,
    /// Value type of the column
    pub data_type: DataType,
    /// Whether values must be unique
    pub unique: bool,
    /// Whether values may be changed after insertion
    pub read_only: bool,
}

impl Column {
    /// Create a mutable, non-unique string column
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            data_type: DataType::String,
            unique: false,
            read_only: false,
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ReaderOptions::default();
        assert!(!options.headers());
        assert!(ReaderOptions::new().has_headers(true).headers());
    }

    #[test]
    fn test_column_defaults() {
        let col = Column::new("id");
        assert_eq!(col.name, "id");
        assert_eq!(col.data_type, DataType::String);
        assert!(!col.unique);
        assert!(!col.read_only);
        assert_eq!(col.data_type.to_string(), "string");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_json() {
        let options: ReaderOptions = serde_json::from_str(r#"{"has_headers":true}"#).unwrap();
        assert!(options.has_headers);

        let options: ReaderOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.has_headers);
    }
}
