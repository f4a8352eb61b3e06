pub mod decode;
pub mod encode;

pub use crate::base_common::Charset;
pub use decode::Decoder;
pub use encode::Encoder;

/// Number of symbols in the smallest group that ends on a byte boundary.
pub const fn group_len(bits: usize) -> usize {
    let mut len = 1;
    while (len * bits) % 8 != 0 {
        len += 1;
    }
    len
}
