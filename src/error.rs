use crate::base64::{self, ParseAlphabetError};
use std::{error, fmt};

/// Error reported to service clients and at start-up; carries a human readable message only.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Error {
    message: String,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl error::Error for Error {}

impl From<base64::decode::Error> for Error {
    fn from(error: base64::decode::Error) -> Self {
        Self::new(error.to_string())
    }
}

impl From<ParseAlphabetError> for Error {
    fn from(error: ParseAlphabetError) -> Self {
        Self::new(error.to_string())
    }
}
