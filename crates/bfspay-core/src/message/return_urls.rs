//! Per-order browser return URLs.

use serde::{Deserialize, Serialize};
use url::Url;

use super::MessageError;
use crate::status::TransactionStatus;

/// Where the remitter's browser is sent once the switch is done with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnUrls {
    pub success_url: String,
    pub failure_url: String,
    pub cancel_url: String,
}

impl ReturnUrls {
    /// All three are required and must be absolute http(s) URLs.
    pub fn new(
        success_url: &str,
        failure_url: &str,
        cancel_url: &str,
    ) -> Result<Self, MessageError> {
        Ok(Self {
            success_url: checked("successUrl", success_url)?,
            failure_url: checked("failureUrl", failure_url)?,
            cancel_url: checked("cancelUrl", cancel_url)?,
        })
    }

    /// Redirect for a verified outcome; `None` while still in progress.
    pub fn redirect_for(&self, status: TransactionStatus) -> Option<&str> {
        match status {
            TransactionStatus::Completed => Some(self.success_url.as_str()),
            TransactionStatus::Failed => Some(self.failure_url.as_str()),
            TransactionStatus::Initiated => None,
        }
    }
}

fn checked(field: &'static str, value: &str) -> Result<String, MessageError> {
    let invalid = || MessageError::InvalidReturnUrl {
        field,
        url: value.to_string(),
    };
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(invalid());
    }
    Ok(url.to_string())
}
