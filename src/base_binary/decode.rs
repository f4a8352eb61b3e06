use super::{group_len, Charset};
use crate::base_common::alphabet;
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    BufferTooSmall,
    NonAsciiSymbol { byte: u8, index: usize },
    InvalidSymbol { character: char, index: usize },
    MalformedPadding { index: usize },
    InvalidLength { length: usize },
    TrailingBits { index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "Output buffer too small"),
            Self::NonAsciiSymbol { byte, index } => write!(f, "Non-ascii character {:#04x} at index {}", byte, index),
            Self::InvalidSymbol { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Self::MalformedPadding { index } => write!(f, "Unexpected padding at index {}", index),
            Self::InvalidLength { length } => write!(f, "Invalid input length {}", length),
            Self::TrailingBits { index } => write!(f, "Non-zero trailing bits in character at index {}", index),
        }
    }
}

impl From<alphabet::DecodeError> for Error {
    fn from(error: alphabet::DecodeError) -> Self {
        match error {
            alphabet::DecodeError::InvalidCharacter { character, index } => Error::InvalidSymbol { character, index },
            alphabet::DecodeError::NonAsciiCharacter { character, index } => Error::NonAsciiSymbol { byte: character, index },
        }
    }
}

#[derive(Clone, Copy)]
pub struct Decoder<'a, const N: usize> {
    charset: &'a Charset<N>,
    bits: usize,
}

impl<'a, const N: usize> Decoder<'a, N> {
    pub const fn new(charset: &'a Charset<N>, bits: usize) -> Self {
        assert!(charset.len() == (1 << bits));
        Self { charset, bits }
    }

    /// Upper bound on the bytes decoded from `len` characters of text, padding included.
    pub fn decoded_len(&self, len: usize) -> usize {
        (len * self.bits) / 8
    }

    /// Returns the number of leading characters that carry data once the trailing padding is stripped.
    fn data_len(&self, input: &[u8]) -> Result<usize, Error> {
        let group = group_len(self.bits);
        let padding = match self.charset.padding() {
            Some(padding) => input.iter().rev().take_while(|&&value| value == padding).count(),
            None => 0,
        };
        let len = input.len() - padding;
        if padding > 0 {
            let max_padding = group - (8 + self.bits - 1) / self.bits;
            if padding > max_padding {
                return Err(Error::MalformedPadding { index: len });
            }
            if input.len() % group != 0 {
                return Err(Error::InvalidLength { length: input.len() });
            }
        }
        // a final group is complete only if its leftover bits cannot form another symbol
        if ((len % group) * self.bits) % 8 >= self.bits {
            return Err(Error::InvalidLength { length: input.len() });
        }
        Ok(len)
    }

    fn decode_with(&self, input: &[u8], mut emit: impl FnMut(u8) -> Result<(), Error>) -> Result<usize, Error> {
        let len = self.data_len(input)?;
        let mut accumulator: usize = 0;
        let mut bits: usize = 0;
        let mut output_index = 0;
        for (input_index, &value) in input[..len].iter().enumerate() {
            if self.charset.is_padding(value) {
                return Err(Error::MalformedPadding { index: input_index });
            }
            let symbol = self.charset.decode(value, input_index)?;
            accumulator = (accumulator << self.bits) | (symbol as usize);
            bits += self.bits;
            while bits >= 8 {
                bits -= 8;
                emit((accumulator >> bits) as u8)?;
                output_index += 1;
                accumulator &= (1 << bits) - 1;
            }
        }
        if accumulator != 0 {
            return Err(Error::TrailingBits { index: len - 1 });
        }
        Ok(output_index)
    }

    pub fn decode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        let mut slots = output.as_mut().iter_mut();
        self.decode_with(input.as_ref(), |byte| {
            *slots.next().ok_or(Error::BufferTooSmall)? = byte;
            Ok(())
        })
    }

    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
        let input = input.as_ref();
        let mut output = Vec::with_capacity(self.decoded_len(input.len()));
        self.decode_with(input, |byte| {
            output.push(byte);
            Ok(())
        })?;
        Ok(output)
    }
}
