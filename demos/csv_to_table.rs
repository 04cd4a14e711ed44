//! Read a CSV file into a table and print it
//!
//! Usage: cargo run --example csv_to_table -- <file.csv> [--no-headers]
//!
//! Set `RUST_LOG=csvstream=trace` to see the tokenizer's per-line logging.

use csvstream::{CsvReader, ReaderOptions};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: csv_to_table <file.csv> [--no-headers]")?;
    let has_headers = args.next().as_deref() != Some("--no-headers");

    let mut reader =
        CsvReader::open_with_options(&path, ReaderOptions::new().has_headers(has_headers))?;
    let table = reader.to_table()?;
    reader.dispose();

    println!("=== {} ===", path);
    println!("Columns: {:?}", table.column_names());
    for (i, row) in table.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|(k, v)| format!("{}={:?}", k, v)).collect();
        println!("Row {}: {}", i + 1, cells.join(", "));
    }
    println!("Total rows: {}", table.row_count());

    Ok(())
}
