// SPDX-License-Identifier: MPL-2.0
//! Error type for the crate's fallible surface.
//!
//! The store itself never fails: invalid input degrades to defaults and
//! operations on unknown ids are no-ops. Errors only arise at the
//! configuration boundary (reading or writing a config file).

use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn display_formats_config_error() {
        let err = Error::Config("bad field".to_string());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn from_toml_error_produces_config_variant() {
        let parse_error = toml::from_str::<crate::config::StoreConfig>("capacity = \"three\"")
            .expect_err("string is not a capacity");
        let err: Error = parse_error.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
