//! Byte-producing input sources.
//!
//! An `Input` is either a `FILE` (anything implementing [`std::io::Read`])
//! or a `MEM` slice with a position cursor the reader advances in place.
//! The lexer's buffer treats both uniformly through [`Input::fill`].

use std::io::{self, Read};

pub enum Input<'a> {
    File(Box<dyn Read + 'a>),
    Mem { bytes: &'a [u8], position: usize },
}

impl<'a> Input<'a> {
    /// Wraps any `Read` implementation as a `FILE` input.
    pub fn from_reader<R: Read + 'a>(reader: R) -> Self {
        Input::File(Box::new(reader))
    }

    /// Wraps an in-memory byte slice as a `MEM` input.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Input::Mem { bytes, position: 0 }
    }

    /// Fills `buf` from the input, returning the number of bytes read (`0`
    /// signals end of input, matching `Read::read`).
    pub fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::File(reader) => reader.read(buf),
            Input::Mem { bytes, position } => {
                let remaining = &bytes[(*position).min(bytes.len())..];
                let n = remaining.len().min(buf.len());
                buf[..n].copy_from_slice(&remaining[..n]);
                *position += n;
                Ok(n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_input_yields_bytes_then_eof() {
        let mut input = Input::from_bytes(b"ab");
        let mut buf = [0u8; 4];
        assert_eq!(input.fill(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ab");
        assert_eq!(input.fill(&mut buf).unwrap(), 0);
    }

    #[test]
    fn file_input_reads_from_any_reader() {
        let mut input = Input::from_reader(std::io::Cursor::new(b"xyz".to_vec()));
        let mut buf = [0u8; 8];
        let n = input.fill(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"xyz");
    }
}
