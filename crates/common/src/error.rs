//! Errors raised while serving a single map request.

use std::io;

use thiserror::Error;

/// Failure to produce the body for one map request.
///
/// Every variant maps to `500 Internal Server Error`; the distinction exists
/// for the log line, not for the caller.
#[derive(Debug, Error)]
pub enum MapError {
    /// The backing file could not be opened or fully read.
    #[error("could not open {file} for reading: {source}")]
    FileRead {
        file: &'static str,
        #[source]
        source: io::Error,
    },

    /// The file is not JSON, or not JSON of the expected shape.
    #[error("could not decode {file}: {source}")]
    Decode {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The decoded value could not be serialised again.
    #[error("could not encode map as JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

impl MapError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            MapError::FileRead { .. } | MapError::Decode { .. } | MapError::Encode(_) => 500,
        }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            MapError::FileRead { .. } => "file_read",
            MapError::Decode { .. } => "decode",
            MapError::Encode(_) => "encode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<Vec<u8>>("{").unwrap_err()
    }

    #[test]
    fn every_kind_is_a_server_error() {
        let read = MapError::FileRead {
            file: "groups.json",
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let decode = MapError::Decode {
            file: "groups.json",
            source: decode_error(),
        };
        let encode = MapError::Encode(decode_error());
        assert_eq!(read.http_status(), 500);
        assert_eq!(decode.http_status(), 500);
        assert_eq!(encode.http_status(), 500);
    }

    #[test]
    fn display_names_the_file() {
        let e = MapError::FileRead {
            file: "users.json",
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(e.to_string().contains("users.json"));
        assert_eq!(e.kind(), "file_read");
    }
}
