// Dataset parsing
pub mod csv_parser;

pub use csv_parser::{CsvJobParser, Dataset, Parser};
