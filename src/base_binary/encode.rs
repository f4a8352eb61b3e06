use super::{group_len, Charset};
use std::{convert::Infallible, error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BufferTooSmall => write!(f, "Output buffer too small"),
        }
    }
}

/// Encodes bytes as symbols of `bits` bits each, most significant bit first.
#[derive(Clone, Copy)]
pub struct Encoder<'a, const N: usize> {
    charset: &'a Charset<N>,
    bits: usize,
    pad: bool,
}

impl<'a, const N: usize> Encoder<'a, N> {
    pub const fn new(charset: &'a Charset<N>, bits: usize) -> Self {
        assert!(charset.len() == (1 << bits));
        Self {
            charset,
            bits,
            pad: charset.padding().is_some(),
        }
    }

    pub const fn unpadded(self) -> Self {
        Self { pad: false, ..self }
    }

    pub const fn is_padded(&self) -> bool {
        self.pad
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        let symbols = (len * 8 + self.bits - 1) / self.bits;
        if self.pad {
            let group = group_len(self.bits);
            (symbols + group - 1) / group * group
        } else {
            symbols
        }
    }

    /// Feeds every output character to `emit`; only `emit` can fail.
    fn encode_with<E>(&self, input: &[u8], mut emit: impl FnMut(u8) -> Result<(), E>) -> Result<usize, E> {
        let mut accumulator: usize = 0;
        let mut bits: usize = 0;
        let mut index = 0;
        for &value in input {
            accumulator = (accumulator << 8) | (value as usize);
            bits += 8;
            while bits >= self.bits {
                bits -= self.bits;
                emit(self.charset.encode(accumulator >> bits))?;
                index += 1;
                accumulator &= (1 << bits) - 1;
            }
        }
        if bits > 0 {
            emit(self.charset.encode(accumulator << (self.bits - bits)))?;
            index += 1;
        }
        if let (true, Some(padding)) = (self.pad, self.charset.padding()) {
            while (index * self.bits) % 8 != 0 {
                emit(padding)?;
                index += 1;
            }
        }
        Ok(index)
    }

    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        let mut slots = output.as_mut().iter_mut();
        self.encode_with(input.as_ref(), |symbol| {
            *slots.next().ok_or(Error::BufferTooSmall)? = symbol;
            Ok(())
        })
    }

    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        let input = input.as_ref();
        let mut output = String::with_capacity(self.encoded_len(input.len()));
        let written = self.encode_with(input, |symbol| {
            output.push(char::from(symbol));
            Ok::<_, Infallible>(())
        });
        match written {
            Ok(_) => output,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Charset, Encoder, Error};

    const BASE16: Charset<16> = match Charset::new(b"0123456789abcdef", None) {
        Ok(charset) => charset,
        Err(_) => panic!("Could not build charset"),
    };

    const BASE32: Charset<32> = match Charset::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567", Some(b'=')) {
        Ok(charset) => charset,
        Err(_) => panic!("Could not build charset"),
    };

    #[test]
    fn encode_base16() {
        let encoder = Encoder::new(&BASE16, 4);
        assert_eq!(encoder.encode(b"Hello world"), "48656c6c6f20776f726c64");
    }

    #[test]
    fn encode_base32() {
        let encoder = Encoder::new(&BASE32, 5);
        assert_eq!(encoder.encode(b""), "");
        assert_eq!(encoder.encode(b"f"), "MY======");
        assert_eq!(encoder.encode(b"fo"), "MZXQ====");
        assert_eq!(encoder.encode(b"foo"), "MZXW6===");
        assert_eq!(encoder.encode(b"foob"), "MZXW6YQ=");
        assert_eq!(encoder.encode(b"fooba"), "MZXW6YTB");
        assert_eq!(encoder.unpadded().encode(b"fo"), "MZXQ");
    }

    #[test]
    fn encoded_len() {
        let encoder = Encoder::new(&BASE32, 5);
        assert_eq!(encoder.encoded_len(0), 0);
        assert_eq!(encoder.encoded_len(1), 8);
        assert_eq!(encoder.encoded_len(6), 16);
        assert_eq!(encoder.unpadded().encoded_len(1), 2);
        assert_eq!(Encoder::new(&BASE16, 4).encoded_len(3), 6);
    }

    #[test]
    fn encode_into_buffer_too_small() {
        let encoder = Encoder::new(&BASE32, 5);
        let mut output = [0u8; 7];
        assert_eq!(encoder.encode_into(b"f", &mut output), Err(Error::BufferTooSmall));
        let mut output = [0u8; 8];
        assert_eq!(encoder.encode_into(b"f", &mut output), Ok(8));
        assert_eq!(&output, b"MY======");
    }

    #[test]
    fn encode_matches_encode_into() {
        for encoder in [Encoder::new(&BASE32, 5), Encoder::new(&BASE32, 5).unpadded()] {
            for input in [&b""[..], b"f", b"fo", b"foo", b"foob", b"fooba", b"foobar"] {
                let text = encoder.encode(input);
                assert_eq!(text.len(), encoder.encoded_len(input.len()));
                let mut output = vec![0u8; text.len()];
                assert_eq!(encoder.encode_into(input, &mut output), Ok(text.len()));
                assert_eq!(output, text.as_bytes());
            }
        }
    }
}
