//! Error type for key loading, signing and verification.

use openssl::error::ErrorStack;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkiError {
    /// Key or certificate file could not be read. Fatal configuration error.
    #[error("read key file {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File was readable but did not contain a usable key or certificate.
    #[error("invalid key material in {origin}: {source}")]
    InvalidKey {
        origin: String,
        #[source]
        source: ErrorStack,
    },

    #[error("key in {origin} is not an RSA key")]
    NotRsa { origin: String },

    #[error("unknown signature algorithm {0:?}")]
    UnknownAlgorithm(String),

    /// OpenSSL failed while producing a signature.
    #[error("openssl: {0}")]
    Openssl(#[from] ErrorStack),
}
