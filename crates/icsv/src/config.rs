//! Reader configuration.

/// Configuration of a [`Reader`](crate::Reader).
///
/// A configuration is frozen when the reader is built.
/// The control characters are not required to be distinct.
/// When two roles share a character, the rule that comes first in the tokenizer's
///     priority order wins; see the [`tokenizer`](crate::tokenizer) module.
///
/// New configurations are usually built from the default using struct update syntax:
/// ```
/// let config = icsv::Config {
///     quote: Some('"'),
///     around_trim: " \t".into(),
///     ..Default::default()
/// };
/// assert_eq!(config.delimiter, Some(','));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Config {
    /// Separates cells within a record. Default: `,`.
    pub delimiter: Option<char>,
    /// Separates records. Default: `\n`.
    pub terminator: Option<char>,
    /// Opens and closes quoted cells. Disabled by default.
    ///
    /// Inside a quoted cell the delimiter, terminator and comment characters are
    ///     stored literally.
    /// Two adjacent quote characters inside a quoted cell store one quote character.
    pub quote: Option<char>,
    /// Makes the next character literal. Disabled by default.
    pub escape: Option<char>,
    /// Starts a comment running to the next terminator. Disabled by default.
    pub comment: Option<char>,
    /// Characters trimmed from both ends of every cell.
    pub around_trim: String,
    /// Characters trimmed from the start of every cell, in addition to [`Config::around_trim`].
    pub leading_trim: String,
    /// Characters trimmed from the end of every cell, in addition to [`Config::around_trim`].
    pub trailing_trim: String,
    /// Character substitutions, read as consecutive `(from, to)` pairs.
    ///
    /// For example `"口 \t "` maps `口` and tab to a space.
    /// An unpaired trailing character is ignored.
    pub remap: String,
    /// Expected number of cells per record.
    pub fields_per_record: FieldCount,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            delimiter: Some(','),
            terminator: Some('\n'),
            quote: None,
            escape: None,
            comment: None,
            around_trim: String::new(),
            leading_trim: String::new(),
            trailing_trim: String::new(),
            remap: String::new(),
            fields_per_record: FieldCount::Any,
        }
    }
}

impl Config {
    /// Returns the configuration used for RFC 4180 files.
    ///
    /// This is the default configuration with `"` quoting turned on and
    ///     `\r` trimmed from the end of cells, so that `\r\n` line endings work.
    pub fn rfc4180() -> Config {
        Config {
            quote: Some('"'),
            trailing_trim: "\r".into(),
            ..Default::default()
        }
    }
}

/// Expectation on the number of cells in each record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum FieldCount {
    /// Records may have any number of cells. Nothing is checked.
    #[default]
    Any,
    /// Every record must have exactly this many cells.
    Fixed(usize),
    /// Every record must have as many cells as the first record.
    FirstRecord,
}
