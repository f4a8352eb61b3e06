use crate::{base64::Alphabet, error::Error};
use std::{env, error, net::IpAddr};

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    threads: usize,
    max_body_size: usize,
    alphabet: Alphabet,
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Option<String>) -> Result<String, Error> {
    match lookup(key) {
        Some(value) => Ok(value),
        None => default.ok_or_else(|| Error::new(format!("Missing {}", key))),
    }
}

fn var_map<T, E: error::Error>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    mut f: impl FnMut(&str) -> Result<T, E>,
    default: T,
) -> Result<T, Error> {
    match var(lookup, key, None) {
        Ok(value) => f(&value).map_err(|_| Error::new(format!("Invalid {} {}", key, value))),
        Err(_) => Ok(default),
    }
}

impl Configuration {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = var_map(&lookup, "HOST", |host| host.parse(), IpAddr::from([127, 0, 0, 1]))?;
        let port: u16 = var_map(&lookup, "PORT", |port| port.parse(), 8000)?;
        let threads: usize = var_map(&lookup, "THREADS", |threads| threads.parse(), 1)?;
        if threads == 0 {
            return Err(Error::new("Invalid THREADS 0"));
        }
        let max_body_size: usize = var_map(&lookup, "MAX_BODY_SIZE", |size| size.parse(), 1 << 20)?;
        let alphabet = var_map(&lookup, "ALPHABET", |alphabet| alphabet.parse(), Alphabet::Standard)?;
        Ok(Self {
            host,
            port,
            threads,
            max_body_size,
            alphabet,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }
}

#[cfg(test)]
mod tests {
    use super::Configuration;
    use crate::base64::Alphabet;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let configuration = Configuration::from_lookup(lookup(&[])).unwrap();
        assert_eq!(configuration.host().to_string(), "127.0.0.1");
        assert_eq!(configuration.port(), 8000);
        assert_eq!(configuration.threads(), 1);
        assert_eq!(configuration.max_body_size(), 1048576);
        assert_eq!(configuration.alphabet(), Alphabet::Standard);
    }

    #[test]
    fn overrides() {
        let configuration = Configuration::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("THREADS", "4"),
            ("MAX_BODY_SIZE", "16"),
            ("ALPHABET", "url"),
        ]))
        .unwrap();
        assert_eq!(configuration.host().to_string(), "0.0.0.0");
        assert_eq!(configuration.port(), 9090);
        assert_eq!(configuration.threads(), 4);
        assert_eq!(configuration.max_body_size(), 16);
        assert_eq!(configuration.alphabet(), Alphabet::UrlSafe);
    }

    #[test]
    fn invalid_values() {
        let error = Configuration::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(error.message(), "Invalid PORT eighty");
        let error = Configuration::from_lookup(lookup(&[("ALPHABET", "base32")])).unwrap_err();
        assert_eq!(error.message(), "Invalid ALPHABET base32");
        let error = Configuration::from_lookup(lookup(&[("THREADS", "0")])).unwrap_err();
        assert_eq!(error.message(), "Invalid THREADS 0");
    }
}
