//! # csvstream
//!
//! Streaming CSV reader that tokenizes input one character at a time and
//! can collect the result into a string [`Table`].
//!
//! Format rules:
//! - `,` separates fields
//! - `"` opens and closes a quote region in which `,`, `\r` and `\n` are data
//! - `\` makes the following character literal
//! - `\r` and `\n` end a line, in any combination
//!
//! ## Reading lines
//!
//! ```
//! use csvstream::CsvReader;
//!
//! let mut reader = CsvReader::from_reader("a,\"b,c\",d\n".as_bytes());
//! let line = reader.read_line()?.unwrap();
//! assert_eq!(line, vec!["a", "b,c", "d"]);
//! assert_eq!(reader.read_line()?, None);
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Building a table
//!
//! ```
//! use csvstream::{CsvReader, ReaderOptions};
//!
//! let table = CsvReader::from_reader("id,name\n1,alice\n2,bob".as_bytes())
//!     .with_options(ReaderOptions::new().has_headers(true))
//!     .to_table()?;
//!
//! assert_eq!(table.column_names(), vec!["id", "name"]);
//! assert_eq!(table.rows()[1].get("name"), Some("bob"));
//! # Ok::<(), csvstream::CsvError>(())
//! ```

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod table;
pub mod types;

pub use csv_reader::{CsvLineIterator, CsvReader};
pub use error::{CsvError, Result};
pub use table::{materialize, Row, Table};
pub use types::{Column, DataType, ReaderOptions};
