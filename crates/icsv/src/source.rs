//! Sources of Unicode code points.
//!
//! The tokenizer pulls one `char` at a time from a [`Source`].
//! Two sources are provided: [`std::str::Chars`] for text already in memory,
//!     and [`Utf8Source`] which decodes UTF-8 from any [`std::io::Read`].

use std::io;

/// A sequential supplier of Unicode code points.
pub trait Source {
    /// Returns the next code point, or `None` at the end of the stream.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

impl Source for std::str::Chars<'_> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }
}

const BUFFER_SIZE: usize = 8 * 1024;

/// A source that decodes UTF-8 from a byte stream.
///
/// Decoding is lenient.
/// Each byte that does not start a valid UTF-8 sequence decodes to
///     [`char::REPLACEMENT_CHARACTER`] and reading continues with the next byte.
/// A sequence cut short by the end of the stream is handled the same way.
pub struct Utf8Source<R> {
    inner: R,
    buffer: Box<[u8]>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<R: io::Read> Utf8Source<R> {
    pub fn new(inner: R) -> Utf8Source<R> {
        Utf8Source {
            inner,
            buffer: vec![0; BUFFER_SIZE].into_boxed_slice(),
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Returns the underlying reader.
    ///
    /// Bytes that were buffered but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    // Ensures at least 4 bytes are buffered, unless the stream ends first.
    fn fill(&mut self) -> io::Result<()> {
        while !self.eof && self.end - self.start < 4 {
            if self.start > 0 {
                self.buffer.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }
            match self.inner.read(&mut self.buffer[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.end += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

impl<R: io::Read> Source for Utf8Source<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        self.fill()?;
        let available = &self.buffer[self.start..self.end];
        let Some(&first) = available.first() else {
            return Ok(None);
        };
        if first.is_ascii() {
            self.start += 1;
            return Ok(Some(first as char));
        }
        let width = match first {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => 0,
        };
        let decoded = available
            .get(..width)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next());
        match decoded {
            Some(c) => {
                self.start += width;
                Ok(Some(c))
            }
            None => {
                self.start += 1;
                Ok(Some(char::REPLACEMENT_CHARACTER))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all<S: Source>(mut source: S) -> Vec<char> {
        let mut v = vec![];
        while let Some(c) = source.next_char().unwrap() {
            v.push(c);
        }
        v
    }

    macro_rules! utf8_tests {
        ($( ($name: ident, $input: expr, $expected: expr), )+) => {
            $(
            #[test]
            fn $name() {
                let input: &[u8] = $input;
                let expected: Vec<char> = $expected.chars().collect();
                assert_eq!(decode_all(Utf8Source::new(input)), expected);
            }
            )+
        };
    }

    utf8_tests![
        (empty, b"", ""),
        (ascii, b"a,b\n", "a,b\n"),
        (multi_byte, "Tör你好😀".as_bytes(), "Tör你好😀"),
        (bom, b"\xEF\xBB\xBFa", "\u{FEFF}a"),
        (invalid_lead_byte, b"a\xFFb", "a\u{FFFD}b"),
        (lone_continuation_byte, b"\x80a", "\u{FFFD}a"),
        (truncated_at_end, b"a\xE4\xBD", "a\u{FFFD}\u{FFFD}"),
        (truncated_in_middle, b"\xE4\xBDa", "\u{FFFD}\u{FFFD}a"),
        (overlong_encoding, b"\xE0\x80\x80", "\u{FFFD}\u{FFFD}\u{FFFD}"),
        (surrogate, b"\xED\xA0\x80", "\u{FFFD}\u{FFFD}\u{FFFD}"),
    ];

    /// A reader that hands out one byte at a time, with interruptions in between.
    struct Trickle<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl io::Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            match self.data.split_first() {
                None => Ok(0),
                Some((first, rest)) => {
                    buf[0] = *first;
                    self.data = rest;
                    Ok(1)
                }
            }
        }
    }

    #[test]
    fn sequences_split_across_reads() {
        let source = Utf8Source::new(Trickle {
            data: "口,😀".as_bytes(),
            interrupt: false,
        });
        assert_eq!(decode_all(source), vec!['口', ',', '😀']);
    }

    #[test]
    fn sequences_split_across_buffer_refills() {
        let mut input = vec![b'a'; BUFFER_SIZE - 1];
        input.extend_from_slice("你".as_bytes());
        let decoded = decode_all(Utf8Source::new(input.as_slice()));
        assert_eq!(decoded.len(), BUFFER_SIZE);
        assert_eq!(decoded.last(), Some(&'你'));
    }

    struct Failing;

    impl io::Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn io_errors_propagate() {
        let err = Utf8Source::new(Failing).next_char().unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn chars_source() {
        assert_eq!(decode_all("a口".chars()), vec!['a', '口']);
    }
}
