#![no_main]

use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    config: icsv::Config,
    bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let from_io = icsv::Reader::with_config(
        icsv::Utf8Source::new(input.bytes.as_slice()),
        input.config.clone(),
    )
    .read_all();

    let valid_utf8 = std::str::from_utf8(&input.bytes).is_ok();
    let text = String::from_utf8_lossy(&input.bytes);
    let from_chars = icsv::Reader::with_config(text.chars(), input.config.clone()).read_all();
    let again = icsv::Reader::with_config(text.chars(), input.config.clone()).read_all();

    let (from_io, from_chars, again) = match (from_io, from_chars, again) {
        (Ok(a), Ok(b), Ok(c)) => (a, b, c),
        (a, b, c) => {
            // Only field count checks can fail on in-memory input, and they must fail alike.
            assert_eq!(format!["{b:?}"], format!["{c:?}"]);
            if valid_utf8 {
                assert_eq!(format!["{a:?}"], format!["{b:?}"]);
            }
            return;
        }
    };
    similar_asserts::assert_eq!(chars: from_chars, again: again);

    // The lossy conversion may replace a run of malformed bytes with a single
    // replacement character, so the sources are only comparable on valid input.
    if valid_utf8 {
        similar_asserts::assert_eq!(io: from_io, chars: from_chars);
    }

    for record in &from_chars {
        assert!(!record.is_empty());
    }
});
