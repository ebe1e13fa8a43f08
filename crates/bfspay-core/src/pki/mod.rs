//! RSA primitives for the BFS checksum scheme.
//!
//! The merchant signs outbound messages with its RSA private key; the bank's
//! replies are verified against the public key in the bank's X.509
//! certificate. Signatures are PKCS#1 v1.5 and travel as uppercase hex.

mod algorithm;
mod error;
mod keys;

#[cfg(test)]
pub(crate) mod fixtures;

pub use algorithm::SignatureAlgorithm;
pub use error::PkiError;
pub use keys::{Signer, Verifier};
