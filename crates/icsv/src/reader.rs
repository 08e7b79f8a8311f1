//! The record reader.

use crate::error::Error;
use crate::source::{Source, Utf8Source};
use crate::tokenizer::{CellError, Position, Signal, Tokenizer};
use crate::{Config, FieldCount};

/// A record: the cells of one row, in order.
pub type Record = Vec<String>;

/// Reads records from a source of code points.
///
/// ```
/// let mut reader = icsv::Reader::from_text("a,b\n1");
/// assert_eq!(reader.read_record().unwrap(), Some(vec!["a".to_string(), "b".to_string()]));
/// assert_eq!(reader.read_record().unwrap(), Some(vec!["1".to_string()]));
/// assert_eq!(reader.read_record().unwrap(), None);
/// ```
///
/// A reader can also be used as an iterator over records.
pub struct Reader<S> {
    tokenizer: Tokenizer<S>,
    records_read: usize,
    expected_fields: Option<usize>,
    finished: bool,
}

impl<'a> Reader<std::str::Chars<'a>> {
    /// Creates a reader over text in memory, using the default configuration.
    pub fn from_text(text: &'a str) -> Self {
        Reader::new(text.chars())
    }
}

impl<R: std::io::Read> Reader<Utf8Source<R>> {
    /// Creates a reader that decodes UTF-8 from a byte stream, using the default configuration.
    pub fn from_io(inner: R) -> Self {
        Reader::new(Utf8Source::new(inner))
    }
}

impl<S: Source> Reader<S> {
    /// Creates a reader using the default configuration.
    pub fn new(source: S) -> Self {
        Reader::with_config(source, Default::default())
    }

    pub fn with_config(source: S, config: Config) -> Self {
        let expected_fields = match config.fields_per_record {
            FieldCount::Fixed(n) => Some(n),
            FieldCount::Any | FieldCount::FirstRecord => None,
        };
        Reader {
            tokenizer: Tokenizer::new(source, config),
            records_read: 0,
            expected_fields,
            finished: false,
        }
    }

    pub fn config(&self) -> &Config {
        self.tokenizer.config()
    }

    /// Current position in the input.
    pub fn cursor(&self) -> Position {
        self.tokenizer.position()
    }

    /// Number of records returned so far.
    ///
    /// Blank lines are not records and are not counted.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    pub fn into_source(self) -> S {
        self.tokenizer.into_source()
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    /// If the source fails, the cells read so far are returned in [`Error::Io`].
    pub fn read_record(&mut self) -> Result<Option<Record>, Error> {
        if self.finished {
            return Ok(None);
        }
        let mut record = Record::new();
        loop {
            let (cell, signal) = match self.tokenizer.read_cell() {
                Ok(next) => next,
                Err(CellError { error, partial }) => {
                    record.extend(partial);
                    let mut records = vec![];
                    if !record.is_empty() {
                        self.records_read += 1;
                        records.push(record);
                    }
                    return Err(Error::Io { error, records });
                }
            };
            match signal {
                Signal::MoreCells => {
                    record.push(cell);
                }
                Signal::RecordEnd => {
                    record.push(cell);
                    break;
                }
                Signal::NoTrailingNewline => {
                    record.push(cell);
                    self.finished = true;
                    break;
                }
                Signal::AfterNewline
                | Signal::TrailingWhitespaceAfterNewline
                | Signal::EmptyInput => {
                    self.finished = true;
                    break;
                }
            }
        }
        if record.is_empty() {
            return Ok(None);
        }
        self.records_read += 1;
        self.check_field_count(record)
    }

    fn check_field_count(&mut self, record: Record) -> Result<Option<Record>, Error> {
        if self.config().fields_per_record == FieldCount::FirstRecord && self.records_read == 1 {
            self.expected_fields = Some(record.len());
        }
        match self.expected_fields {
            Some(expected) if expected != record.len() => {
                let position = self.tokenizer.position();
                // The terminator that ended the record has already advanced the line.
                let line = if position.column == 0 && position.line > 1 {
                    position.line - 1
                } else {
                    position.line
                };
                tracing::debug!(
                    record = self.records_read,
                    expected,
                    got = record.len(),
                    "field count mismatch"
                );
                Err(Error::FieldCountMismatch {
                    record: self.records_read,
                    line,
                    expected,
                    got: record.len(),
                    cells: record,
                })
            }
            _ => Ok(Some(record)),
        }
    }

    /// Reads all remaining records.
    ///
    /// Reaching the end of the input completes the read.
    /// If the source fails, every record read so far is returned in [`Error::Io`];
    ///     other errors are returned as-is.
    pub fn read_all(&mut self) -> Result<Vec<Record>, Error> {
        let mut records = vec![];
        loop {
            match self.read_record() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => return Ok(records),
                Err(Error::Io {
                    error,
                    records: partial,
                }) => {
                    records.extend(partial);
                    return Err(Error::Io { error, records });
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl<S: Source> Iterator for Reader<S> {
    type Item = Result<Record, Error>;

    /// Returns the next record.
    ///
    /// After an IO error the iterator is exhausted.
    /// After a field count error it can continue.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_record() {
            Ok(record) => record.map(Ok),
            Err(err) => {
                if let Error::Io { .. } = err {
                    self.finished = true;
                }
                Some(Err(err))
            }
        }
    }
}
