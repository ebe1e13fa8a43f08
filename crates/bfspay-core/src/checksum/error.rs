use thiserror::Error;

use crate::pki::PkiError;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("{layout} message is missing field {field}")]
    MissingField {
        layout: &'static str,
        field: &'static str,
    },

    /// A value containing `|` would shift every following field.
    #[error("field {field} contains the '|' delimiter")]
    DelimiterInValue { field: &'static str },

    #[error(transparent)]
    Pki(#[from] PkiError),
}
