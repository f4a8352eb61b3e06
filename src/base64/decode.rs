use super::{Alphabet, Charset, STANDARD, URL_SAFE};
pub use crate::base_binary::decode::Error;

#[derive(Clone, Copy)]
pub struct Decoder<'a> {
    decoder: crate::base_binary::Decoder<'a, 64>,
}

impl<'a> Decoder<'a> {
    pub const fn new(charset: &'a Charset<64>) -> Self {
        Self {
            decoder: crate::base_binary::Decoder::new(charset, 6),
        }
    }

    pub fn decoded_len(&self, len: usize) -> usize {
        self.decoder.decoded_len(len)
    }

    pub fn decode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        self.decoder.decode_into(input, output)
    }

    pub fn decode(&self, input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
        self.decoder.decode(input)
    }

    pub fn for_alphabet(alphabet: Alphabet) -> &'static Self {
        match alphabet {
            Alphabet::Standard => &STANDARD_DECODER,
            Alphabet::UrlSafe => &URL_SAFE_DECODER,
        }
    }
}

const STANDARD_DECODER: Decoder = Decoder::new(&STANDARD);
const URL_SAFE_DECODER: Decoder = Decoder::new(&URL_SAFE);

/// Upper bound on the bytes decoded from `len` characters of text.
pub fn decoded_len(len: usize) -> usize {
    STANDARD_DECODER.decoded_len(len)
}

pub fn decode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>, alphabet: Alphabet) -> Result<usize, Error> {
    Decoder::for_alphabet(alphabet).decode_into(input, output)
}

pub fn decode(input: impl AsRef<[u8]>, alphabet: Alphabet) -> Result<Vec<u8>, Error> {
    Decoder::for_alphabet(alphabet).decode(input)
}
