//! The cell tokenizer, which reads code points and outputs cells.
//!
//! The tokenizer is a state machine that consumes one code point at a time.
//! For each code point the following rules are checked in order, and the first
//! rule that matches is applied:
//!
//! 1. If the previous code point was the escape character, store this code point.
//! 2. If this is the first cell of the record, nothing has been stored yet and the code
//!    point is the terminator, the line is blank: skip it and keep reading.
//! 3. Outside quotes, the delimiter ends the cell.
//! 4. Outside quotes, the terminator ends the cell and the record.
//! 5. Outside quotes, the quote character opens a quoted section.
//! 6. Outside quotes, the comment character starts a comment.
//!    Everything up to the next terminator is discarded.
//! 7. The escape character escapes the next code point.
//! 8. While nothing has been stored, leading trim characters are discarded.
//! 9. Inside quotes, the quote character may close the quoted section.
//!    Whether it does depends on the next code point.
//! 10. After such a quote character, the delimiter closes the quoted section and ends the cell.
//! 11. After such a quote character, a second quote character stores one quote character.
//! 12. Anything else is stored.
//!
//! Stored code points go through the remap table first.
//! When the cell ends, trailing trim characters are removed from its end,
//!     whether or not the cell was quoted.
//!
//! A quote character seen inside quotes (rule 9) only looks one code point ahead.
//! If that code point is neither the delimiter nor the quote character, the quoted section
//!     is closed and the code point is handled as if it appeared outside quotes.
//! So `"a"b` is the cell `ab`, and `"a"` followed by the terminator ends the record.
//!
//! A quoted section still open at the end of the input is not an error: the cell
//!     contains whatever was read.
//!
//! At the end of the input the final cell is kept only if the signal is
//!     [`Signal::NoTrailingNewline`]. The signal is the first of these that applies:
//!
//! - [`Signal::EmptyInput`] if nothing was ever read.
//! - [`Signal::TrailingWhitespaceAfterNewline`] if the cell read more than one code point
//!     but stored none, e.g. `a, ` with space trimming or `a,""`.
//! - [`Signal::AfterNewline`] if the last code point read was the terminator.
//!     This holds even inside an unterminated quoted section.
//! - [`Signal::NoTrailingNewline`] otherwise.

use crate::source::Source;
use crate::tables::Tables;
use crate::Config;

/// The byte order mark, skipped if it is the first code point of the input.
pub const BOM: char = '\u{FEFF}';

/// How a cell ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The cell ended at a delimiter; the record has more cells.
    MoreCells,
    /// The cell ended at a terminator; more records may follow.
    RecordEnd,
    /// The input ended in the middle of a record, e.g. `a,b` without a final newline.
    NoTrailingNewline,
    /// The input ended right after a terminator.
    AfterNewline,
    /// The input ended after characters that were all trimmed, skipped or commented out,
    ///     e.g. whitespace on the line after the last record.
    TrailingWhitespaceAfterNewline,
    /// The input was empty.
    EmptyInput,
}

impl Signal {
    /// Whether this signal means no more records can be read.
    pub fn is_end_of_stream(self) -> bool {
        !matches!(self, Signal::MoreCells | Signal::RecordEnd)
    }
}

/// Line and column of the tokenizer in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// One-based line number.
    ///
    /// Every terminator read advances the line, including quoted and escaped ones.
    pub line: usize,
    /// Number of code points read on the current line, not counting the terminator.
    ///
    /// This is 0 at the start of a line, and otherwise the one-based column of the
    ///     last code point read.
    pub column: usize,
}

/// A source error, together with the cell that was being read when it happened.
#[derive(Debug)]
pub struct CellError {
    pub error: std::io::Error,
    /// The partial cell, trimmed, if the input up to the error would have kept it.
    ///
    /// The cell is kept exactly when reaching the end of the input at that point
    ///     would have signalled [`Signal::NoTrailingNewline`].
    pub partial: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
    // A quote character was just read inside quotes. The next code point decides
    // whether it closes the quoted section.
    PendingClose,
}

struct CellState {
    text: String,
    quote: QuoteState,
    escaped: bool,
    comment: bool,
}

enum Step {
    Continue,
    End(Signal),
}

/// The cell tokenizer.
pub struct Tokenizer<S> {
    source: S,
    config: Config,
    tables: Tables,
    // Last code point read from the source, or `None` if nothing has been read yet.
    last: Option<char>,
    position: Position,
    cells_in_record: usize,
}

impl<S: Source> Tokenizer<S> {
    pub fn new(source: S, config: Config) -> Tokenizer<S> {
        let tables = Tables::new(&config);
        Tokenizer {
            source,
            config,
            tables,
            last: None,
            position: Position { line: 1, column: 0 },
            cells_in_record: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of cells returned so far for the current record.
    pub fn cells_in_record(&self) -> usize {
        self.cells_in_record
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Reads the next cell.
    ///
    /// After a signal for which [`Signal::is_end_of_stream`] is true the cell
    ///     should be kept only if the signal is [`Signal::NoTrailingNewline`].
    /// Errors from the source are returned immediately and end the current record.
    pub fn read_cell(&mut self) -> Result<(String, Signal), CellError> {
        let mut state = CellState {
            text: String::new(),
            quote: QuoteState::Unquoted,
            escaped: false,
            comment: false,
        };
        let mut num_reads: usize = 0;
        let signal = loop {
            num_reads += 1;
            let c = match self.source.next_char() {
                Ok(Some(c)) => c,
                Ok(None) => {
                    let signal = self.end_of_stream(&state, num_reads);
                    tracing::trace!(?signal, "end of input");
                    break signal;
                }
                Err(error) => {
                    let signal = self.end_of_stream(&state, num_reads);
                    tracing::debug!(line = self.position.line, %error, "source failed");
                    self.cells_in_record = 0;
                    let partial = (signal == Signal::NoTrailingNewline).then(|| {
                        self.tables.trim_end(&mut state.text);
                        state.text
                    });
                    return Err(CellError { error, partial });
                }
            };
            let first = self.last.is_none();
            self.last = Some(c);
            if first && c == BOM {
                tracing::trace!("skipping byte order mark");
                continue;
            }
            if self.config.terminator == Some(c) {
                self.position.line += 1;
                self.position.column = 0;
            } else {
                self.position.column += 1;
            }
            if let Step::End(signal) = self.step(&mut state, c) {
                break signal;
            }
        };
        if signal.is_end_of_stream() && state.quote == QuoteState::Quoted {
            tracing::debug!(
                line = self.position.line,
                ?signal,
                "input ended inside a quoted cell"
            );
        }
        match signal {
            Signal::MoreCells => self.cells_in_record += 1,
            _ => self.cells_in_record = 0,
        }
        self.tables.trim_end(&mut state.text);
        Ok((state.text, signal))
    }

    fn step(&self, state: &mut CellState, c: char) -> Step {
        let is = |role: Option<char>| role == Some(c);
        let delimiter = self.config.delimiter;
        let terminator = self.config.terminator;
        let quote = self.config.quote;

        if state.comment && !is(terminator) {
            return Step::Continue;
        }
        let closing = state.quote == QuoteState::PendingClose;
        if closing && !is(delimiter) && !is(quote) {
            state.quote = QuoteState::Unquoted;
        }
        let step = self.apply_rules(state, c);
        if closing && state.quote == QuoteState::PendingClose {
            state.quote = QuoteState::Unquoted;
        }
        step
    }

    fn apply_rules(&self, state: &mut CellState, c: char) -> Step {
        let is = |role: Option<char>| role == Some(c);
        let unquoted = state.quote == QuoteState::Unquoted;

        // 1
        if state.escaped {
            state.escaped = false;
            state.text.push(self.tables.remap(c));
            return Step::Continue;
        }
        // 2
        if self.cells_in_record == 0 && state.text.is_empty() && is(self.config.terminator) {
            tracing::trace!(line = self.position.line - 1, "skipping blank line");
            state.comment = false;
            return Step::Continue;
        }
        // 3-6
        if unquoted {
            if is(self.config.delimiter) {
                return Step::End(Signal::MoreCells);
            }
            if is(self.config.terminator) {
                return Step::End(Signal::RecordEnd);
            }
            if is(self.config.quote) {
                state.quote = QuoteState::Quoted;
                return Step::Continue;
            }
            if is(self.config.comment) {
                state.comment = true;
                return Step::Continue;
            }
        }
        // 7
        if is(self.config.escape) {
            state.escaped = true;
            return Step::Continue;
        }
        // 8
        if state.text.is_empty() && self.tables.is_leading_trim(c) {
            return Step::Continue;
        }
        match state.quote {
            // 9
            QuoteState::Quoted if is(self.config.quote) => {
                state.quote = QuoteState::PendingClose;
                return Step::Continue;
            }
            // 10
            QuoteState::PendingClose if is(self.config.delimiter) => {
                state.quote = QuoteState::Unquoted;
                return Step::End(Signal::MoreCells);
            }
            // 11
            QuoteState::PendingClose if is(self.config.quote) => {
                state.quote = QuoteState::Quoted;
            }
            _ => {}
        }
        // 11 and 12
        state.text.push(self.tables.remap(c));
        Step::Continue
    }

    fn end_of_stream(&self, state: &CellState, num_reads: usize) -> Signal {
        match self.last {
            None => Signal::EmptyInput,
            // The final read is the one that found nothing.
            Some(_) if num_reads > 1 && state.text.is_empty() => {
                Signal::TrailingWhitespaceAfterNewline
            }
            Some(last) if self.config.terminator == Some(last) => Signal::AfterNewline,
            Some(_) => Signal::NoTrailingNewline,
        }
    }
}
