//! Merchant signing key and bank verification key.

use openssl::error::ErrorStack;
use openssl::pkey::{Id, PKey, Private, Public};
use openssl::rsa::Padding;
use openssl::x509::X509;
use std::fs;
use std::path::Path;

use super::{PkiError, SignatureAlgorithm};

const PEM_CERTIFICATE: &[u8] = b"-----BEGIN CERTIFICATE-----";
const PEM_MARKER: &[u8] = b"-----BEGIN";

fn read_key_file(path: &Path) -> Result<Vec<u8>, PkiError> {
    fs::read(path).map_err(|source| PkiError::KeyFile {
        path: path.to_path_buf(),
        source,
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// RSA private key used to sign outbound messages.
pub struct Signer {
    key: PKey<Private>,
}

impl Signer {
    /// Load a PEM private key (PKCS#1 or PKCS#8) from disk.
    pub fn from_pem_file(path: &Path) -> Result<Self, PkiError> {
        let pem = read_key_file(path)?;
        Self::load(&pem, &path.display().to_string())
    }

    pub fn from_pem(pem: &[u8]) -> Result<Self, PkiError> {
        Self::load(pem, "PEM input")
    }

    fn load(pem: &[u8], origin: &str) -> Result<Self, PkiError> {
        let key = PKey::private_key_from_pem(pem).map_err(|source| PkiError::InvalidKey {
            origin: origin.to_string(),
            source,
        })?;
        if key.id() != Id::RSA {
            return Err(PkiError::NotRsa {
                origin: origin.to_string(),
            });
        }
        Ok(Self { key })
    }

    /// Sign `source` and return the signature as uppercase hex.
    ///
    /// PKCS#1 v1.5 is deterministic, so the same key, algorithm and source
    /// always produce the same checksum.
    pub fn sign(&self, algorithm: SignatureAlgorithm, source: &str) -> Result<String, PkiError> {
        let mut signer = openssl::sign::Signer::new(algorithm.digest(), &self.key)?;
        signer.set_rsa_padding(Padding::PKCS1)?;
        signer.update(source.as_bytes())?;
        let signature = signer.sign_to_vec()?;
        Ok(hex::encode_upper(signature))
    }

    /// PEM-encoded public half, for handing to the bank or building a verifier.
    pub fn public_key_pem(&self) -> Result<Vec<u8>, PkiError> {
        Ok(self.key.public_key_to_pem()?)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("bits", &self.key.bits())
            .finish_non_exhaustive()
    }
}

/// RSA public key used to verify inbound messages.
#[derive(Debug)]
pub struct Verifier {
    key: PKey<Public>,
}

impl Verifier {
    /// Load an X.509 certificate (PEM or DER) or a PEM public key from disk.
    pub fn from_pem_file(path: &Path) -> Result<Self, PkiError> {
        let bytes = read_key_file(path)?;
        Self::load(&bytes, &path.display().to_string())
    }

    pub fn from_pem(bytes: &[u8]) -> Result<Self, PkiError> {
        Self::load(bytes, "PEM input")
    }

    fn load(bytes: &[u8], origin: &str) -> Result<Self, PkiError> {
        let invalid = |source: ErrorStack| PkiError::InvalidKey {
            origin: origin.to_string(),
            source,
        };
        let key = if contains(bytes, PEM_CERTIFICATE) {
            X509::from_pem(bytes)
                .and_then(|cert| cert.public_key())
                .map_err(invalid)?
        } else if contains(bytes, PEM_MARKER) {
            PKey::public_key_from_pem(bytes).map_err(invalid)?
        } else {
            X509::from_der(bytes)
                .and_then(|cert| cert.public_key())
                .map_err(invalid)?
        };
        if key.id() != Id::RSA {
            return Err(PkiError::NotRsa {
                origin: origin.to_string(),
            });
        }
        Ok(Self { key })
    }

    /// Check a hex signature over `source`.
    ///
    /// Returns `Ok(false)` for anything that is not a valid signature by this
    /// key under `algorithm`: malformed hex, wrong length, wrong digest.
    pub fn verify(
        &self,
        algorithm: SignatureAlgorithm,
        source: &str,
        signature_hex: &str,
    ) -> Result<bool, PkiError> {
        let signature = match hex::decode(signature_hex.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("signature is not valid hex: {}", e);
                return Ok(false);
            }
        };
        if signature.len() != self.key.size() {
            tracing::warn!(
                "signature length {} does not match key size {}",
                signature.len(),
                self.key.size()
            );
            return Ok(false);
        }

        let mut verifier = openssl::sign::Verifier::new(algorithm.digest(), &self.key)?;
        verifier.set_rsa_padding(Padding::PKCS1)?;
        verifier.update(source.as_bytes())?;
        match verifier.verify(&signature) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                tracing::debug!("openssl rejected signature: {}", e);
                Ok(false)
            }
        }
    }
}
