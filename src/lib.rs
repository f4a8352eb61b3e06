//! Base64 encoding and decoding over the standard (`+/`, `=`) and URL-safe (`-_`, `.`) alphabets, with a small
//! HTTP service exposing the codec.

pub mod base64;
pub mod base_binary;
pub mod base_common;
pub mod chronometer;
pub mod configuration;
pub mod create_server;
pub mod error;
pub mod logger;
pub mod server;

pub use self::{
    base64::{decode, encode, Alphabet},
    chronometer::Chronometer,
    configuration::Configuration,
    create_server::{create_server, State},
    error::Error,
    logger::Logger,
    server::Server,
};
