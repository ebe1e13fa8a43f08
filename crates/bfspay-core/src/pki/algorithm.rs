//! Signature algorithm names as used by the bank and by our config.

use openssl::hash::MessageDigest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::PkiError;

/// RSA signature algorithm (PKCS#1 v1.5) with the digest the endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    Sha1WithRsa,
    Sha256WithRsa,
}

impl SignatureAlgorithm {
    /// Java-style name, e.g. `SHA1withRSA`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Sha1WithRsa => "SHA1withRSA",
            SignatureAlgorithm::Sha256WithRsa => "SHA256withRSA",
        }
    }

    pub(crate) fn digest(&self) -> MessageDigest {
        match self {
            SignatureAlgorithm::Sha1WithRsa => MessageDigest::sha1(),
            SignatureAlgorithm::Sha256WithRsa => MessageDigest::sha256(),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = PkiError;

    /// Accepts the Java names (`SHA1withRSA`), the OpenSSL names
    /// (`RSA-SHA1`) and bare digest names (`SHA1`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHA1WITHRSA" | "RSA-SHA1" | "SHA1" | "SHA-1" => Ok(SignatureAlgorithm::Sha1WithRsa),
            "SHA256WITHRSA" | "RSA-SHA256" | "SHA256" | "SHA-256" => {
                Ok(SignatureAlgorithm::Sha256WithRsa)
            }
            _ => Err(PkiError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Serialize for SignatureAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SignatureAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
