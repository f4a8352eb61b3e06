pub mod decode;
pub mod encode;
pub use crate::base_common::Charset;

use std::{error, fmt, str::FromStr};

pub const STANDARD: Charset<64> = match Charset::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/", Some(b'=')) {
    Ok(charset) => charset,
    Err(_) => panic!("Could not build standard charset"),
};

pub const URL_SAFE: Charset<64> = match Charset::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_", Some(b'.')) {
    Ok(charset) => charset,
    Err(_) => panic!("Could not build url-safe charset"),
};

#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Alphabet {
    /// `A-Za-z0-9+/` padded with `=`.
    #[default]
    Standard,
    /// `A-Za-z0-9-_` padded with `.`.
    UrlSafe,
}

impl Alphabet {
    pub const ALL: [Alphabet; 2] = [Alphabet::Standard, Alphabet::UrlSafe];

    pub fn charset(self) -> &'static Charset<64> {
        match self {
            Self::Standard => &STANDARD,
            Self::UrlSafe => &URL_SAFE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::UrlSafe => "url",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseAlphabetError {
    name: String,
}

impl error::Error for ParseAlphabetError {}

impl fmt::Display for ParseAlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"Unknown alphabet "{}""#, self.name)
    }
}

impl FromStr for Alphabet {
    type Err = ParseAlphabetError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "standard" => Ok(Self::Standard),
            "url" | "url-safe" | "urlsafe" => Ok(Self::UrlSafe),
            _ => Err(ParseAlphabetError { name: name.to_string() }),
        }
    }
}

pub use decode::{decode, decode_into, decoded_len, Decoder};
pub use encode::{encode, encode_into, encode_unpadded, encoded_len, Encoder};
