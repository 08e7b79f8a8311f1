//! Errors returned by the reader.

use std::fmt;

/// Error returned when reading records.
///
/// Reaching the end of the input is not an error:
///     [`Reader::read_record`](crate::Reader::read_record) returns `Ok(None)` instead.
#[derive(Debug)]
pub enum Error {
    /// The underlying source failed.
    ///
    /// The read is not retried.
    /// Records read by the failing call are kept in `records`; the last of them may be
    ///     incomplete.
    /// For [`Reader::read_record`](crate::Reader::read_record) this is at most the one
    ///     record that was being read.
    Io {
        error: std::io::Error,
        records: Vec<Vec<String>>,
    },
    /// A record has the wrong number of cells.
    ///
    /// This is only returned if the reader was configured with a
    ///     [`FieldCount`](crate::FieldCount) other than `Any`.
    /// The reader can keep reading after this error.
    FieldCountMismatch {
        /// One-based index of the offending record.
        record: usize,
        /// Line on which the offending record ended.
        line: usize,
        expected: usize,
        got: usize,
        /// The offending record.
        cells: Vec<String>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { error, .. } => write!(f, "failed to read input: {error}"),
            Error::FieldCountMismatch {
                record,
                line,
                expected,
                got,
                ..
            } => write!(
                f,
                "record {record} (line {line}) has {got} fields, but {expected} were expected"
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { error, .. } => Some(error),
            Error::FieldCountMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io {
            error,
            records: vec![],
        }
    }
}
