use bytes::BytesMut;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

/// A line read from the terminal.
#[derive(Debug, PartialEq, Eq)]
pub enum InputLine {
    Line(String),
    /// A line longer than the configured limit. Its bytes are discarded up to the next newline.
    TooLong,
}

/// Splits input into lines, reporting over-long lines as an item rather than an error so the
/// stream keeps going. `FramedRead` ends the stream after the first decoder error.
pub struct InputCodec {
    lines: LinesCodec,
}

impl InputCodec {
    pub fn new(max_line_length: usize) -> InputCodec {
        Self {
            lines: LinesCodec::new_with_max_length(max_line_length),
        }
    }
}

impl Decoder for InputCodec {
    type Item = InputLine;
    type Error = LinesCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.lines.decode(src) {
            Ok(line) => Ok(line.map(InputLine::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(InputLine::TooLong)),
            Err(err) => Err(err),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.lines.decode_eof(src) {
            Ok(line) => Ok(line.map(InputLine::Line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(InputLine::TooLong)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resumes_after_long_line() {
        let mut codec = InputCodec::new(8);
        let mut buf = BytesMut::from("SET a 1\nSET key_that_is_too_long v\nGET a\n");

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InputLine::Line("SET a 1".to_string()))
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), Some(InputLine::TooLong));
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InputLine::Line("GET a".to_string()))
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn long_last_line_without_newline() {
        let mut codec = InputCodec::new(4);
        let mut buf = BytesMut::from("GET some_key");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some(InputLine::TooLong));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }
}
