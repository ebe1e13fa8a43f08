//! BFS checksum: sign and verify the `|`-joined values of a message.
//!
//! A checksum is computed over the *source string*, which is the values of
//! a [`FieldLayout`] taken in layout order and joined with `|`. The source
//! string is then RSA-signed (uppercase hex) or checked against a signature
//! received from the bank.

mod error;
pub mod layout;

use std::collections::{BTreeMap, HashMap};

use crate::pki::{SignatureAlgorithm, Signer, Verifier};

pub use error::ChecksumError;
pub use layout::{FieldLayout, PAYMENT_REQUEST, PAYMENT_RESPONSE, STATUS_CHECK};

/// Field name carrying the checksum on the wire.
pub const CHECKSUM_FIELD: &str = "bfs_checkSum";

const DELIMITER: char = '|';

/// Message fields keyed by `bfs_*` name.
pub type Fields = BTreeMap<String, String>;

/// Anything that can answer "what is the value of field X".
pub trait FieldLookup {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldLookup for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldLookup for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldLookup for [(&str, &str)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// A layout together with the algorithm its endpoint signs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumScheme {
    pub layout: FieldLayout,
    pub algorithm: SignatureAlgorithm,
}

impl ChecksumScheme {
    pub const fn new(layout: FieldLayout, algorithm: SignatureAlgorithm) -> Self {
        Self { layout, algorithm }
    }
}

/// Build the source string for `layout` from `fields`.
///
/// Every layout field must be present; empty values are allowed. A value
/// containing `|` is refused, since the signed string would be ambiguous.
pub fn source_string<F: FieldLookup + ?Sized>(
    layout: &FieldLayout,
    fields: &F,
) -> Result<String, ChecksumError> {
    join_fields(layout, fields, true)
}

fn join_fields<F: FieldLookup + ?Sized>(
    layout: &FieldLayout,
    fields: &F,
    reject_delimiter: bool,
) -> Result<String, ChecksumError> {
    let mut out = String::new();
    for (i, &name) in layout.fields().iter().enumerate() {
        let value = fields.field(name).ok_or(ChecksumError::MissingField {
            layout: layout.name(),
            field: name,
        })?;
        if reject_delimiter && value.contains(DELIMITER) {
            return Err(ChecksumError::DelimiterInValue { field: name });
        }
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(value);
    }
    Ok(out)
}

/// Sign `fields` under `scheme` and return the uppercase hex checksum.
pub fn compute_checksum<F: FieldLookup + ?Sized>(
    scheme: &ChecksumScheme,
    signer: &Signer,
    fields: &F,
) -> Result<String, ChecksumError> {
    let source = source_string(&scheme.layout, fields)?;
    tracing::debug!(layout = %scheme.layout, algorithm = %scheme.algorithm, "signing source string: {}", source);
    Ok(signer.sign(scheme.algorithm, &source)?)
}

/// Check `signature` against `fields` under `scheme`.
///
/// `Ok(false)` means the message is not authentic and must be rejected.
/// Inbound values are joined as received, `|` included, so a reply the
/// counterparty signed that way still verifies.
pub fn verify_checksum<F: FieldLookup + ?Sized>(
    scheme: &ChecksumScheme,
    verifier: &Verifier,
    fields: &F,
    signature: &str,
) -> Result<bool, ChecksumError> {
    let source = join_fields(&scheme.layout, fields, false)?;
    tracing::debug!(layout = %scheme.layout, algorithm = %scheme.algorithm, "verifying source string: {}", source);
    let valid = verifier.verify(scheme.algorithm, &source, signature)?;
    if !valid {
        tracing::warn!(layout = %scheme.layout, "checksum verification failed");
    }
    Ok(valid)
}
