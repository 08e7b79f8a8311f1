use clap::Parser;
use colored::Colorize;
use std::io::Write;
use tracing_subscriber::EnvFilter;

mod common;
use common::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ICSV_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    if let Err(err) = Cli::parse().run() {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Tokenize CSV-like delimited text.
///
/// Reads delimited text from a file or standard input and prints one line per record.
/// Every character role can be changed, and characters can be trimmed from cells
///     or remapped to other characters.
///
/// Characters and character lists accept the escapes \t, \n, \r, \0 and \\.
/// Character roles can be disabled by passing `none`.
#[derive(Debug, Parser)]
#[command(
    name = "icsv",
    author = "The icsv Project",
    version = "0.1",
    about,
    long_about,
    max_term_width(100)
)]
struct Cli {
    /// Path to the input file. Standard input is read if this is omitted or `-`.
    path: Option<std::path::PathBuf>,

    /// Character separating cells.
    #[arg(short, long)]
    delimiter: Option<CharArg>,

    /// Character separating records.
    #[arg(short, long)]
    terminator: Option<CharArg>,

    /// Character opening and closing quoted cells.
    #[arg(short, long)]
    quote: Option<CharArg>,

    /// Character making the next character literal.
    #[arg(short, long)]
    escape: Option<CharArg>,

    /// Character starting a comment that runs to the end of the line.
    #[arg(short, long)]
    comment: Option<CharArg>,

    /// Characters trimmed from both ends of each cell.
    #[arg(long)]
    trim: Option<CharsArg>,

    /// Characters trimmed from the start of each cell.
    #[arg(long)]
    leading_trim: Option<CharsArg>,

    /// Characters trimmed from the end of each cell.
    #[arg(long)]
    trailing_trim: Option<CharsArg>,

    /// Character substitutions as consecutive pairs.
    ///
    /// For example `--remap ';,_-'` replaces ; by , and _ by -.
    #[arg(long)]
    remap: Option<CharsArg>,

    /// Expected number of fields per record: a number, `first` or `any`.
    ///
    /// With `first` every record must have as many fields as the first record.
    #[arg(long)]
    fields: Option<FieldsArg>,

    /// Start from RFC 4180 settings: double quote quoting and \r\n line endings.
    ///
    /// Other options are applied on top of these settings.
    #[arg(long)]
    rfc4180: bool,

    /// Output format.
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,
}

impl Cli {
    fn config(&self) -> icsv::Config {
        let mut config = if self.rfc4180 {
            icsv::Config::rfc4180()
        } else {
            icsv::Config::default()
        };
        let roles = [
            (self.delimiter, &mut config.delimiter),
            (self.terminator, &mut config.terminator),
            (self.quote, &mut config.quote),
            (self.escape, &mut config.escape),
            (self.comment, &mut config.comment),
        ];
        for (arg, role) in roles {
            if let Some(CharArg(c)) = arg {
                *role = c;
            }
        }
        let lists = [
            (&self.trim, &mut config.around_trim),
            (&self.leading_trim, &mut config.leading_trim),
            (&self.trailing_trim, &mut config.trailing_trim),
            (&self.remap, &mut config.remap),
        ];
        for (arg, list) in lists {
            if let Some(CharsArg(s)) = arg {
                list.clone_from(s);
            }
        }
        if let Some(FieldsArg(fields)) = self.fields {
            config.fields_per_record = fields;
        }
        config
    }

    fn input(&self) -> Result<Box<dyn std::io::Read>, String> {
        match &self.path {
            Some(path) if path.as_os_str() != "-" => match std::fs::File::open(path) {
                Ok(file) => Ok(Box::new(file)),
                Err(err) => Err(format!("Failed to read `{}`: {}", path.display(), err)),
            },
            _ => Ok(Box::new(std::io::stdin().lock())),
        }
    }

    fn run(self) -> Result<(), String> {
        let config = self.config();
        tracing::debug!(?config, "configuration");
        let mut reader = icsv::Reader::with_config(icsv::Utf8Source::new(self.input()?), config);
        let mut out = std::io::BufWriter::new(std::io::stdout().lock());
        let result = loop {
            match reader.read_record() {
                Ok(Some(record)) => self.write(&mut out, &[record])?,
                Ok(None) => break Ok(()),
                Err(err) => {
                    if let icsv::Error::Io { records, .. } = &err {
                        self.write(&mut out, records)?;
                    }
                    break Err(err);
                }
            }
        };
        if let Err(err) = out.flush() {
            return Err(format!("Failed to write output: {err}"));
        }
        result.map_err(|err| err.to_string())?;
        tracing::debug!(records = reader.records_read(), "done");
        Ok(())
    }

    fn write<W: Write>(&self, out: &mut W, records: &[icsv::Record]) -> Result<(), String> {
        for record in records {
            if let Err(err) = self.format.write_record(out, record) {
                return Err(format!("Failed to write output: {err}"));
            }
        }
        Ok(())
    }
}
