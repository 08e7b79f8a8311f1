//! Random delimited text for benchmarking the reader.

use rand::prelude::Distribution;
use rand::Rng;

/// Relative frequencies of the pieces that random cells are built from.
pub struct Weights {
    pub letter: u32,
    pub digit: u32,
    pub space: u32,
    pub non_ascii: u32,
    pub quoted_delimiter: u32,
    pub doubled_quote: u32,
    pub escape: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            letter: 200,
            digit: 100,
            space: 20,
            non_ascii: 10,
            quoted_delimiter: 5,
            doubled_quote: 5,
            escape: 5,
        }
    }
}

/// The configuration that the generated documents are written for.
pub fn config() -> icsv::Config {
    icsv::Config {
        quote: Some('"'),
        escape: Some('\\'),
        comment: Some('#'),
        around_trim: " \t".into(),
        ..Default::default()
    }
}

/// Generates a document of roughly `num_bytes` bytes.
///
/// Every cell is quoted with probability `1/quote_one_in`;
///     unquoted cells never contain the delimiter or the quote character.
pub fn generate_random_document(
    rng: &mut rand::prelude::StdRng,
    num_bytes: usize,
    cells_per_record_bounds: (usize, usize),
    cell_length_bounds: (usize, usize),
    quote_one_in: u32,
    weights: &Weights,
) -> String {
    let dist = rand::distributions::WeightedIndex::new([
        weights.letter,
        weights.digit,
        weights.space,
        weights.non_ascii,
        weights.quoted_delimiter,
        weights.doubled_quote,
        weights.escape,
    ])
    .unwrap();

    let mut result = String::with_capacity(num_bytes + cell_length_bounds.1 * 4);
    result.push_str("# This document was randomly generated for benchmarking.\n");
    while result.len() < num_bytes {
        let num_cells = rng.gen_range(cells_per_record_bounds.0..=cells_per_record_bounds.1);
        for i in 0..num_cells {
            if i > 0 {
                result.push(',');
            }
            let quoted = rng.gen_range(0..quote_one_in) == 0;
            if quoted {
                result.push('"');
            }
            let cell_length = rng.gen_range(cell_length_bounds.0..=cell_length_bounds.1);
            for _ in 0..cell_length {
                match dist.sample(rng) {
                    0 => result.push(char::from(b'a' + rng.gen_range(0..26))),
                    1 => result.push(char::from(b'0' + rng.gen_range(0..10))),
                    2 => result.push(' '),
                    3 => result.push(['é', '口', 'ß', '😀'][rng.gen_range(0..4)]),
                    4 if quoted => result.push(','),
                    5 if quoted => result.push_str("\"\""),
                    6 => result.push_str("\\,"),
                    _ => result.push('x'),
                }
            }
            if quoted {
                result.push('"');
            }
        }
        result.push('\n');
    }
    result
}

/// Reads the document and returns the number of records.
pub fn run_in_icsv(input: &str, config: icsv::Config) -> usize {
    icsv::Reader::with_config(input.chars(), config)
        .read_all()
        .unwrap()
        .len()
}

/// Reads the document through the UTF-8 decoder and returns the number of records.
pub fn run_in_icsv_from_bytes(input: &[u8], config: icsv::Config) -> usize {
    icsv::Reader::with_config(icsv::Utf8Source::new(input), config)
        .read_all()
        .unwrap()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generated_documents_have_consistent_records() {
        let mut rng = rand::prelude::StdRng::seed_from_u64(43);
        let input =
            generate_random_document(&mut rng, 20_000, (3, 3), (1, 10), 4, &Default::default());
        let records = icsv::Reader::with_config(input.chars(), config())
            .read_all()
            .unwrap();
        assert!(!records.is_empty());
        for record in &records {
            assert_eq!(record.len(), 3, "{record:?}");
        }
        assert_eq!(run_in_icsv_from_bytes(input.as_bytes(), config()), records.len());
    }
}
