pub mod alphabet;

pub use alphabet::Charset;
