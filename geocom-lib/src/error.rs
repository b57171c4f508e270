use std::io;
use thiserror::Error;

use crate::protocol::{EncodingError, ParseError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by a transaction.
///
/// Instrument-side rejections are not errors: they come back as a failed
/// [`Response`](crate::protocol::Response).
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot encode request: {0}")]
    Encoding(#[from] EncodingError),
    #[error("connection is not open")]
    NotConnected,
    #[error("connection is busy with another exchange")]
    Busy,
    #[error("no reply after {attempts} attempt(s)")]
    Timeout { attempts: usize },
    #[error("communication failure: {0}")]
    Communication(#[from] io::Error),
    #[error("connection closed during exchange")]
    Closed,
    #[error("malformed reply: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// True for failures of the link itself rather than of the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::NotConnected
                | Error::Busy
                | Error::Timeout { .. }
                | Error::Communication(_)
                | Error::Closed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors() {
        assert!(Error::Timeout { attempts: 2 }.is_transport());
        assert!(Error::Closed.is_transport());
        assert!(!Error::Parse(ParseError::Empty).is_transport());
        assert_eq!(
            Error::Timeout { attempts: 2 }.to_string(),
            "no reply after 2 attempt(s)"
        );
    }
}
