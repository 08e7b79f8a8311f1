//! A streaming, configurable tokenizer for CSV-like delimited text.
//!
//! The reader turns a stream of Unicode code points into records of cells.
//! On top of plain CSV it supports
//!     custom delimiter, terminator, quote, escape and comment characters,
//!     trimming characters from the start and end of each cell,
//!     and remapping single characters to other characters.
//!
//! ```
//! let config = icsv::Config {
//!     quote: Some('"'),
//!     comment: Some('#'),
//!     around_trim: " ".into(),
//!     ..Default::default()
//! };
//! let input = "# name, age\n \"Doe, Jane\" , 42\n";
//! let records = icsv::Reader::with_config(input.chars(), config).read_all().unwrap();
//! assert_eq!(records, vec![vec!["Doe, Jane".to_string(), "42".to_string()]]);
//! ```
//!
//! The details of how cells are tokenized are documented in the [`tokenizer`] module.

mod config;
mod error;
mod reader;
pub mod source;
mod tables;
pub mod tokenizer;

pub use config::{Config, FieldCount};
pub use error::Error;
pub use reader::{Reader, Record};
pub use source::{Source, Utf8Source};
pub use tokenizer::{Position, Signal};
