//! BFS message types.

mod amount;
mod return_urls;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checksum::{FieldLookup, Fields};
use crate::config::MerchantConfig;

pub use amount::{normalize_amount, AmountError};
pub use return_urls::ReturnUrls;

/// `bfs_msgType` of an authorization request and of its response.
pub const AUTHORIZATION_REQUEST: &str = "AR";

/// Format of `bfs_benfTxnTime`.
pub const TXN_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("field {0} must not be empty")]
    EmptyField(&'static str),
    #[error("invalid remitter email {0:?}")]
    InvalidEmail(String),
    #[error("invalid transaction time {0:?}, expected yyyyMMddHHmmss")]
    InvalidTxnTime(String),
    #[error("unexpected message type {found:?}, expected {expected:?}")]
    UnexpectedMessageType {
        expected: &'static str,
        found: String,
    },
    #[error("{field} {url:?} is not an absolute http(s) URL")]
    InvalidReturnUrl { field: &'static str, url: String },
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Merchant-side order, before beneficiary details are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub order_no: String,
    pub amount: String,
    pub remitter_email: String,
    pub description: String,
    /// Original `bfs_benfTxnTime`; defaults to now for new payments.
    #[serde(default)]
    pub txn_time: Option<String>,
}

/// Authorization request (AR) as posted to the switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(rename = "bfs_msgType")]
    pub msg_type: String,
    #[serde(rename = "bfs_benfId")]
    pub benf_id: String,
    #[serde(rename = "bfs_orderNo")]
    pub order_no: String,
    #[serde(rename = "bfs_benfTxnTime")]
    pub benf_txn_time: String,
    #[serde(rename = "bfs_benfBankCode")]
    pub benf_bank_code: String,
    #[serde(rename = "bfs_txnCurrency")]
    pub txn_currency: String,
    #[serde(rename = "bfs_txnAmount")]
    pub txn_amount: String,
    #[serde(rename = "bfs_remitterEmail")]
    pub remitter_email: String,
    #[serde(rename = "bfs_paymentDesc")]
    pub payment_desc: String,
    #[serde(rename = "bfs_version")]
    pub version: String,
}

impl PaymentRequest {
    /// Build a request for `order` on behalf of `merchant`. The amount is
    /// normalized and the result validated.
    pub fn from_order(merchant: &MerchantConfig, order: &PaymentOrder) -> Result<Self, MessageError> {
        let benf_txn_time = match &order.txn_time {
            Some(t) => t.trim().to_string(),
            None => chrono::Local::now().format(TXN_TIME_FORMAT).to_string(),
        };
        let request = Self {
            msg_type: AUTHORIZATION_REQUEST.to_string(),
            benf_id: merchant.beneficiary_id.clone(),
            order_no: order.order_no.trim().to_string(),
            benf_txn_time,
            benf_bank_code: merchant.bank_code.clone(),
            txn_currency: merchant.currency.clone(),
            txn_amount: normalize_amount(&order.amount)?,
            remitter_email: order.remitter_email.trim().to_string(),
            payment_desc: order.description.trim().to_string(),
            version: merchant.version.clone(),
        };
        request.validate()?;
        Ok(request)
    }

    /// All fields non-empty, email well-formed, amount already normalized,
    /// transaction time in `yyyyMMddHHmmss`.
    pub fn validate(&self) -> Result<(), MessageError> {
        for (name, value) in self.pairs() {
            if value.trim().is_empty() {
                return Err(MessageError::EmptyField(name));
            }
        }
        if !is_valid_email(&self.remitter_email) {
            return Err(MessageError::InvalidEmail(self.remitter_email.clone()));
        }
        if normalize_amount(&self.txn_amount)? != self.txn_amount {
            return Err(AmountError::Malformed(self.txn_amount.clone()).into());
        }
        parse_txn_time(&self.benf_txn_time)?;
        Ok(())
    }

    fn pairs(&self) -> [(&'static str, &str); 10] {
        [
            ("bfs_msgType", self.msg_type.as_str()),
            ("bfs_benfId", self.benf_id.as_str()),
            ("bfs_orderNo", self.order_no.as_str()),
            ("bfs_benfTxnTime", self.benf_txn_time.as_str()),
            ("bfs_benfBankCode", self.benf_bank_code.as_str()),
            ("bfs_txnCurrency", self.txn_currency.as_str()),
            ("bfs_txnAmount", self.txn_amount.as_str()),
            ("bfs_remitterEmail", self.remitter_email.as_str()),
            ("bfs_paymentDesc", self.payment_desc.as_str()),
            ("bfs_version", self.version.as_str()),
        ]
    }

    pub fn to_fields(&self) -> Fields {
        self.pairs()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl FieldLookup for PaymentRequest {
    fn field(&self, name: &str) -> Option<&str> {
        self.pairs().into_iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }
}

/// Require `bfs_msgType` to be an authorization request/response.
pub fn expect_authorization<F: FieldLookup + ?Sized>(fields: &F) -> Result<(), MessageError> {
    let found = fields.field("bfs_msgType").unwrap_or_default();
    if found != AUTHORIZATION_REQUEST {
        return Err(MessageError::UnexpectedMessageType {
            expected: AUTHORIZATION_REQUEST,
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Parse a `bfs_benfTxnTime` value. The calendar date and clock time must
/// both exist, not just look like fourteen digits.
pub fn parse_txn_time(value: &str) -> Result<NaiveDateTime, MessageError> {
    if value.len() != 14 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MessageError::InvalidTxnTime(value.to_string()));
    }
    NaiveDateTime::parse_from_str(value, TXN_TIME_FORMAT)
        .map_err(|_| MessageError::InvalidTxnTime(value.to_string()))
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.chars().any(char::is_whitespace)
}
