use super::{Alphabet, Charset, STANDARD, URL_SAFE};
pub use crate::base_binary::encode::Error;

#[derive(Clone, Copy)]
pub struct Encoder<'a> {
    encoder: crate::base_binary::Encoder<'a, 64>,
}

impl<'a> Encoder<'a> {
    pub const fn new(charset: &'a Charset<64>) -> Self {
        Self {
            encoder: crate::base_binary::Encoder::new(charset, 6),
        }
    }

    /// Same symbols, without the trailing padding characters.
    pub const fn unpadded(self) -> Self {
        Self {
            encoder: self.encoder.unpadded(),
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        self.encoder.encoded_len(len)
    }

    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        self.encoder.encode_into(input, output)
    }

    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        self.encoder.encode(input)
    }

    pub fn for_alphabet(alphabet: Alphabet) -> &'static Self {
        match alphabet {
            Alphabet::Standard => &STANDARD_ENCODER,
            Alphabet::UrlSafe => &URL_SAFE_ENCODER,
        }
    }

    pub fn unpadded_for_alphabet(alphabet: Alphabet) -> &'static Self {
        match alphabet {
            Alphabet::Standard => &STANDARD_UNPADDED_ENCODER,
            Alphabet::UrlSafe => &URL_SAFE_UNPADDED_ENCODER,
        }
    }
}

const STANDARD_ENCODER: Encoder = Encoder::new(&STANDARD);
const URL_SAFE_ENCODER: Encoder = Encoder::new(&URL_SAFE);
const STANDARD_UNPADDED_ENCODER: Encoder = Encoder::new(&STANDARD).unpadded();
const URL_SAFE_UNPADDED_ENCODER: Encoder = Encoder::new(&URL_SAFE).unpadded();

/// Length of the text produced for `len` input bytes.
pub fn encoded_len(len: usize, padded: bool) -> usize {
    if padded {
        Encoder::for_alphabet(Alphabet::Standard).encoded_len(len)
    } else {
        Encoder::unpadded_for_alphabet(Alphabet::Standard).encoded_len(len)
    }
}

pub fn encode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>, alphabet: Alphabet) -> Result<usize, Error> {
    Encoder::for_alphabet(alphabet).encode_into(input, output)
}

pub fn encode(input: impl AsRef<[u8]>, alphabet: Alphabet) -> String {
    Encoder::for_alphabet(alphabet).encode(input)
}

pub fn encode_unpadded(input: impl AsRef<[u8]>, alphabet: Alphabet) -> String {
    Encoder::unpadded_for_alphabet(alphabet).encode(input)
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, Error};
    use rand::Rng;

    #[test]
    fn encode() {
        assert_eq!(super::encode([0x14, 0xfb, 0x9c, 0x03, 0xd9, 0x7e], Alphabet::Standard), "FPucA9l+");
        assert_eq!(super::encode([0x14, 0xfb, 0x9c, 0x03, 0xd9], Alphabet::Standard), "FPucA9k=");
        assert_eq!(super::encode([0x14, 0xfb, 0x9c, 0x03], Alphabet::Standard), "FPucAw==");
        assert_eq!(super::encode(b"", Alphabet::Standard), "");
        assert_eq!(super::encode(b"f", Alphabet::Standard), "Zg==");
        assert_eq!(super::encode(b"fo", Alphabet::Standard), "Zm8=");
        assert_eq!(super::encode(b"foo", Alphabet::Standard), "Zm9v");
        assert_eq!(super::encode(b"foob", Alphabet::Standard), "Zm9vYg==");
        assert_eq!(super::encode(b"fooba", Alphabet::Standard), "Zm9vYmE=");
        assert_eq!(super::encode(b"foobar", Alphabet::Standard), "Zm9vYmFy");
    }

    #[test]
    fn encode_url_safe() {
        assert_eq!(super::encode(b">>>???>>>???=/+", Alphabet::Standard), "Pj4+Pz8/Pj4+Pz8/PS8r");
        assert_eq!(super::encode(b">>>???>>>???=/+", Alphabet::UrlSafe), "Pj4-Pz8_Pj4-Pz8_PS8r");
        assert_eq!(super::encode(b"f", Alphabet::UrlSafe), "Zg..");
        assert_eq!(super::encode(b"fo", Alphabet::UrlSafe), "Zm8.");
        assert_eq!(super::encode([0x14, 0xfb, 0x9c, 0x03, 0xd9, 0x7e], Alphabet::UrlSafe), "FPucA9l-");
        assert_eq!(super::encode([0xff, 0xff, 0xff], Alphabet::UrlSafe), "____");
    }

    #[test]
    fn encode_unpadded() {
        assert_eq!(super::encode_unpadded(b"f", Alphabet::Standard), "Zg");
        assert_eq!(super::encode_unpadded(b"fo", Alphabet::UrlSafe), "Zm8");
        assert_eq!(super::encode_unpadded(b"foo", Alphabet::Standard), "Zm9v");
        assert_eq!(super::encode_unpadded(b"", Alphabet::UrlSafe), "");
    }

    #[test]
    fn padding_count() {
        for len in 0..12 {
            let text = super::encode(vec![0xa5u8; len], Alphabet::Standard);
            let padding = text.bytes().rev().take_while(|&c| c == b'=').count();
            assert_eq!(padding, [0, 2, 1][len % 3], "length {}", len);
            assert_eq!(text.len(), super::encoded_len(len, true));
            assert_eq!(text.len(), (len + 2) / 3 * 4);
            assert_eq!(text.len() - padding, super::encoded_len(len, false));
            assert_eq!(super::encoded_len(len, false), (len * 8 + 5) / 6);
        }
    }

    #[test]
    fn alphabets_diverge_only_at_62_63_and_padding() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let length = rng.gen_range(0..=100);
            let blob: Vec<u8> = (0..length).map(|_| rng.gen::<u8>()).collect();
            let standard = super::encode(&blob, Alphabet::Standard);
            let url_safe = super::encode(&blob, Alphabet::UrlSafe);
            assert_eq!(standard.len(), url_safe.len());
            for (s, u) in standard.chars().zip(url_safe.chars()) {
                let expected = match s {
                    '+' => '-',
                    '/' => '_',
                    '=' => '.',
                    other => other,
                };
                assert_eq!(u, expected);
            }
        }
    }

    #[test]
    fn encode_into() {
        let mut output = [0u8; 8];
        assert_eq!(super::encode_into(b"foob", &mut output, Alphabet::UrlSafe), Ok(8));
        assert_eq!(&output, b"Zm9vYg..");
        let mut output = [0u8; 7];
        assert_eq!(super::encode_into(b"foob", &mut output, Alphabet::Standard), Err(Error::BufferTooSmall));
    }
}
