use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DuplicateCharacter { character: char, first: usize, second: usize },
    NonAsciiCharacter { character: u8, index: usize },
    InvalidPadding { character: u8 },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    NonAsciiCharacter { character: u8, index: usize },
    InvalidCharacter { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#04x} at index {}", character, index),
            Self::InvalidPadding { character } => write!(f, "Invalid padding character {:#04x}", character),
        }
    }
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#04x} at index {}", character, index),
        }
    }
}

/// Bijection between the values `0..N` and `N` distinct ASCII characters, with an optional padding character
/// that is not one of them.
#[derive(Debug)]
pub struct Charset<const N: usize> {
    encode: [u8; N],
    decode: [Option<u8>; 128],
    padding: Option<u8>,
}

impl<const N: usize> Charset<N> {
    pub fn encode(&self, value: usize) -> u8 {
        self.encode[value]
    }

    pub fn decode(&self, value: u8, index: usize) -> Result<u8, DecodeError> {
        if value >= 128 {
            return Err(DecodeError::NonAsciiCharacter { index, character: value });
        }
        match self.decode[value as usize] {
            Some(value) => Ok(value),
            None => Err(DecodeError::InvalidCharacter {
                character: value as char,
                index,
            }),
        }
    }

    pub const fn new(characters: &[u8; N], padding: Option<u8>) -> Result<Self, Error> {
        let mut encode = [0u8; N];
        let mut decode: [Option<u8>; 128] = [None; 128];

        let mut index = 0;
        while index < encode.len() {
            let character = characters[index];
            if character >= 128 {
                return Err(Error::NonAsciiCharacter { index, character });
            }
            if let Some(v) = decode[character as usize] {
                return Err(Error::DuplicateCharacter {
                    character: character as char,
                    first: v as usize,
                    second: index,
                });
            }
            encode[index] = character;
            decode[character as usize] = Some(index as u8);
            index += 1;
        }

        if let Some(character) = padding {
            if character >= 128 || decode[character as usize].is_some() {
                return Err(Error::InvalidPadding { character });
            }
        }

        Ok(Self { encode, decode, padding })
    }

    pub const fn len(&self) -> usize {
        self.encode.len()
    }

    pub const fn padding(&self) -> Option<u8> {
        self.padding
    }

    pub fn is_padding(&self, value: u8) -> bool {
        self.padding == Some(value)
    }

    pub fn characters(&self) -> &[u8; N] {
        &self.encode
    }
}

#[cfg(test)]
mod tests {
    use super::{Charset, DecodeError, Error};

    #[test]
    fn new() {
        let charset = Charset::new(b"abcd", Some(b'!')).unwrap();
        assert_eq!(charset.len(), 4);
        assert_eq!(charset.padding(), Some(b'!'));
        assert_eq!(charset.encode(2), b'c');
        assert_eq!(charset.decode(b'd', 0), Ok(3));
        assert!(charset.is_padding(b'!'));
        assert!(!charset.is_padding(b'a'));
    }

    #[test]
    fn new_rejects_bad_characters() {
        assert_eq!(
            Charset::new(b"abca", None).unwrap_err(),
            Error::DuplicateCharacter {
                character: 'a',
                first: 0,
                second: 3
            }
        );
        assert_eq!(
            Charset::new(&[b'a', 0xe9], None).unwrap_err(),
            Error::NonAsciiCharacter { character: 0xe9, index: 1 }
        );
        assert_eq!(Charset::new(b"ab", Some(b'b')).unwrap_err(), Error::InvalidPadding { character: b'b' });
        assert_eq!(Charset::new(b"ab", Some(0x80)).unwrap_err(), Error::InvalidPadding { character: 0x80 });
    }

    #[test]
    fn decode_errors() {
        let charset = Charset::new(b"ab", Some(b'=')).unwrap();
        assert_eq!(charset.decode(b'c', 5), Err(DecodeError::InvalidCharacter { character: 'c', index: 5 }));
        assert_eq!(charset.decode(b'=', 1), Err(DecodeError::InvalidCharacter { character: '=', index: 1 }));
        assert_eq!(charset.decode(0xff, 2), Err(DecodeError::NonAsciiCharacter { character: 0xff, index: 2 }));
    }
}
