/// A single character argument, or `none` to disable the role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharArg(pub Option<char>);

impl CharArg {
    fn parse(input: &str) -> Result<Self, InvalidArgument> {
        if input == "none" {
            return Ok(CharArg(None));
        }
        let unescaped = unescape(input)?;
        let mut chars = unescaped.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(CharArg(Some(c))),
            _ => Err(InvalidArgument(format![
                "expected a single character or `none`, got `{input}`"
            ])),
        }
    }
}

impl clap::builder::ValueParserFactory for CharArg {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(CharArg::parse)
    }
}

/// A string argument in which backslash escapes are expanded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharsArg(pub String);

impl CharsArg {
    fn parse(input: &str) -> Result<Self, InvalidArgument> {
        Ok(CharsArg(unescape(input)?))
    }
}

impl clap::builder::ValueParserFactory for CharsArg {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(CharsArg::parse)
    }
}

/// Expands the escapes `\t`, `\n`, `\r`, `\0` and `\\`.
///
/// Typing a literal tab on the command line is awkward, so these are accepted
///     wherever characters are expected.
pub fn unescape(input: &str) -> Result<String, InvalidArgument> {
    let mut s = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            s.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some(other) => {
                return Err(InvalidArgument(format![
                    "unknown escape sequence `\\{other}` in `{input}`"
                ]))
            }
            // A trailing backslash stands for itself.
            None => '\\',
        };
        s.push(escaped);
    }
    Ok(s)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldsArg(pub icsv::FieldCount);

impl FieldsArg {
    fn parse(input: &str) -> Result<Self, InvalidArgument> {
        match input {
            "any" => Ok(FieldsArg(icsv::FieldCount::Any)),
            "first" => Ok(FieldsArg(icsv::FieldCount::FirstRecord)),
            _ => match input.parse::<usize>() {
                Ok(n) => Ok(FieldsArg(icsv::FieldCount::Fixed(n))),
                Err(_) => Err(InvalidArgument(format![
                    "expected a number, `first` or `any`, got `{input}`"
                ])),
            },
        }
    }
}

impl clap::builder::ValueParserFactory for FieldsArg {
    type Parser = clap::builder::ValueParser;

    fn value_parser() -> Self::Parser {
        clap::builder::ValueParser::new(FieldsArg::parse)
    }
}

#[derive(Debug, Default, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON array of strings per record.
    #[default]
    Json,
    /// Cells separated by tabs, one record per line.
    ///
    /// Tabs, newlines, carriage returns and backslashes in cells are written as
    ///     `\t`, `\n`, `\r` and `\\`.
    Tsv,
    /// The Rust debug representation of each record.
    Debug,
}

impl OutputFormat {
    pub fn write_record<W: std::io::Write>(
        &self,
        w: &mut W,
        record: &icsv::Record,
    ) -> std::io::Result<()> {
        match self {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *w, record)?;
                writeln!(w)
            }
            OutputFormat::Tsv => {
                for (i, cell) in record.iter().enumerate() {
                    if i > 0 {
                        write!(w, "\t")?;
                    }
                    write!(w, "{}", escape_tsv(cell))?;
                }
                writeln!(w)
            }
            OutputFormat::Debug => writeln!(w, "{record:?}"),
        }
    }
}

fn escape_tsv(cell: &str) -> String {
    let mut s = String::with_capacity(cell.len());
    for c in cell.chars() {
        match c {
            '\t' => s.push_str("\\t"),
            '\n' => s.push_str("\\n"),
            '\r' => s.push_str("\\r"),
            '\\' => s.push_str("\\\\"),
            c => s.push(c),
        }
    }
    s
}

#[derive(Debug)]
pub struct InvalidArgument(String);

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InvalidArgument {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_arg() {
        assert_eq!(CharArg::parse(",").unwrap(), CharArg(Some(',')));
        assert_eq!(CharArg::parse("\\t").unwrap(), CharArg(Some('\t')));
        assert_eq!(CharArg::parse("口").unwrap(), CharArg(Some('口')));
        assert_eq!(CharArg::parse("none").unwrap(), CharArg(None));
        assert!(CharArg::parse("ab").is_err());
        assert!(CharArg::parse("").is_err());
    }

    #[test]
    fn unescape_sequences() {
        assert_eq!(unescape(r"a\tb\\c\n").unwrap(), "a\tb\\c\n");
        assert_eq!(unescape(r"\").unwrap(), "\\");
        assert!(unescape(r"\q").is_err());
    }

    #[test]
    fn fields_arg() {
        assert_eq!(
            FieldsArg::parse("3").unwrap(),
            FieldsArg(icsv::FieldCount::Fixed(3))
        );
        assert_eq!(
            FieldsArg::parse("first").unwrap(),
            FieldsArg(icsv::FieldCount::FirstRecord)
        );
        assert!(FieldsArg::parse("many").is_err());
    }

    #[test]
    fn tsv_output() {
        let mut out = vec![];
        let record = vec!["a\tb".to_string(), "c\\".to_string()];
        OutputFormat::Tsv.write_record(&mut out, &record).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\\tb\tc\\\\\n");
    }
}
