//! Merchant gateway: sign outbound payments, authenticate bank replies and
//! query transaction status.
//!
//! Every inbound message is verified before any of its fields are trusted;
//! a checksum mismatch is reported as [`GatewayError::ChecksumMismatch`] and
//! the transaction must be treated as unauthenticated.

mod http;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checksum::{
    self, ChecksumError, ChecksumScheme, Fields, CHECKSUM_FIELD, PAYMENT_REQUEST, PAYMENT_RESPONSE,
    STATUS_CHECK,
};
use crate::config::{AlgorithmsConfig, EndpointsConfig, GatewayConfig, MerchantConfig};
use crate::form::{self, ReplyError};
use crate::message::{self, MessageError, PaymentRequest};
use crate::pki::{PkiError, Signer, Verifier};
use crate::status::{AuthStatus, TransactionStatus};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} is not configured")]
    MissingKeyPath(&'static str),

    #[error(transparent)]
    Pki(#[from] PkiError),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error("response carries no bfs_checkSum")]
    MissingChecksum,

    /// The reply is not authentic. Reject the transaction.
    #[error("checksum verification failed for order {order_no:?}")]
    ChecksumMismatch { order_no: String },

    #[error("status reply is for order {found:?}, expected {expected:?}")]
    OrderMismatch { expected: String, found: String },

    #[error(transparent)]
    Reply(#[from] ReplyError),

    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),

    #[error("endpoint returned HTTP {0}")]
    Http(u32),

    #[error("reply is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("encode webhook payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outbound fields with their checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub fields: Fields,
    pub checksum: String,
}

impl SignedMessage {
    /// Fields as posted on the wire, `bfs_checkSum` included.
    pub fn form_fields(&self) -> Fields {
        let mut out = self.fields.clone();
        out.insert(CHECKSUM_FIELD.to_string(), self.checksum.clone());
        out
    }
}

/// An authenticated authorization response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedResponse {
    pub order_no: String,
    pub auth: AuthStatus,
    /// Status the transaction should move to.
    pub transaction_status: TransactionStatus,
    pub fields: Fields,
}

/// JSON body posted to the merchant webhook once an outcome is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantNotification {
    pub order_no: String,
    pub status: TransactionStatus,
    pub amount: String,
    pub currency: String,
    /// `bfs_bfsTxnId` assigned by the switch.
    pub txn_id: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl MerchantNotification {
    pub fn from_verified(verified: &VerifiedResponse) -> Self {
        let field = |name: &str| verified.fields.get(name).cloned().unwrap_or_default();
        Self {
            order_no: verified.order_no.clone(),
            status: verified.transaction_status,
            amount: field("bfs_txnAmount"),
            currency: field("bfs_txnCurrency"),
            txn_id: field("bfs_bfsTxnId"),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }
}

pub struct Gateway {
    merchant: MerchantConfig,
    algorithms: AlgorithmsConfig,
    endpoints: EndpointsConfig,
    signer: Signer,
    verifier: Verifier,
}

impl Gateway {
    pub fn new(cfg: &GatewayConfig, signer: Signer, verifier: Verifier) -> Self {
        Self {
            merchant: cfg.merchant.clone(),
            algorithms: cfg.algorithms,
            endpoints: cfg.endpoints.clone(),
            signer,
            verifier,
        }
    }

    /// Load the merchant key and bank certificate named in `cfg`.
    pub fn from_config(cfg: &GatewayConfig) -> Result<Self, GatewayError> {
        let key_path = cfg
            .keys
            .private_key
            .as_deref()
            .ok_or(GatewayError::MissingKeyPath("keys.private_key"))?;
        let cert_path = cfg
            .keys
            .bank_certificate
            .as_deref()
            .ok_or(GatewayError::MissingKeyPath("keys.bank_certificate"))?;
        let signer = Signer::from_pem_file(key_path)?;
        let verifier = Verifier::from_pem_file(cert_path)?;
        tracing::debug!(
            "loaded merchant key {} and bank certificate {}",
            key_path.display(),
            cert_path.display()
        );
        Ok(Self::new(cfg, signer, verifier))
    }

    pub fn merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }

    pub fn payment_request_scheme(&self) -> ChecksumScheme {
        ChecksumScheme::new(PAYMENT_REQUEST, self.algorithms.payment_request)
    }

    pub fn status_check_scheme(&self) -> ChecksumScheme {
        ChecksumScheme::new(STATUS_CHECK, self.algorithms.status_check)
    }

    pub fn payment_response_scheme(&self) -> ChecksumScheme {
        ChecksumScheme::new(PAYMENT_RESPONSE, self.algorithms.payment_response)
    }

    /// Validate and sign an authorization request.
    pub fn sign_payment(&self, request: &PaymentRequest) -> Result<SignedMessage, GatewayError> {
        self.sign(&self.payment_request_scheme(), request)
    }

    /// Sign a status query for a previously submitted request.
    pub fn sign_status_check(
        &self,
        request: &PaymentRequest,
    ) -> Result<SignedMessage, GatewayError> {
        self.sign(&self.status_check_scheme(), request)
    }

    fn sign(
        &self,
        scheme: &ChecksumScheme,
        request: &PaymentRequest,
    ) -> Result<SignedMessage, GatewayError> {
        request.validate()?;
        let checksum = checksum::compute_checksum(scheme, &self.signer, request)?;
        tracing::info!(order_no = %request.order_no, layout = %scheme.layout, "signed request");
        Ok(SignedMessage {
            fields: request.to_fields(),
            checksum,
        })
    }

    /// Authenticate an authorization response (callback or status reply).
    ///
    /// Values are checked exactly as received. A `|` inside a bank-supplied
    /// value such as `bfs_remitterName` is not an error here; only outbound
    /// signing refuses it.
    pub fn verify_response(&self, fields: &Fields) -> Result<VerifiedResponse, GatewayError> {
        message::expect_authorization(fields)?;
        let signature = fields
            .get(CHECKSUM_FIELD)
            .filter(|s| !s.trim().is_empty())
            .ok_or(GatewayError::MissingChecksum)?;
        let order_no = fields.get("bfs_orderNo").cloned().unwrap_or_default();

        let scheme = self.payment_response_scheme();
        if !checksum::verify_checksum(&scheme, &self.verifier, fields, signature)? {
            tracing::warn!(order_no = %order_no, "rejecting unauthenticated response");
            return Err(GatewayError::ChecksumMismatch { order_no });
        }

        let code = fields
            .get("bfs_debitAuthCode")
            .map(String::as_str)
            .unwrap_or_default();
        let auth = AuthStatus::from_code(code);
        tracing::info!(order_no = %order_no, code = %code, "verified response: {}", auth);
        Ok(VerifiedResponse {
            order_no,
            transaction_status: TransactionStatus::target_for(&auth),
            auth,
            fields: fields.clone(),
        })
    }

    /// Ask the switch for the status of `request` and authenticate the reply.
    pub fn check_status(&self, request: &PaymentRequest) -> Result<VerifiedResponse, GatewayError> {
        let signed = self.sign_status_check(request)?;
        let form_fields = signed.form_fields();
        let body = form::encode_request(form_fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        tracing::info!(
            order_no = %request.order_no,
            "querying status at {}",
            self.endpoints.status_url
        );
        let reply = http::post_form(&self.endpoints.status_url, &body, &self.endpoints)?;
        let fields = form::parse_response(&reply)?;
        let verified = self.verify_response(&fields)?;
        if verified.order_no != request.order_no {
            return Err(GatewayError::OrderMismatch {
                expected: request.order_no.clone(),
                found: verified.order_no,
            });
        }
        Ok(verified)
    }

    /// Tell the merchant webhook about a verified final outcome.
    ///
    /// Returns the posted notification, or `None` when no webhook is
    /// configured or the transaction is still in progress.
    pub fn notify_merchant(
        &self,
        verified: &VerifiedResponse,
    ) -> Result<Option<MerchantNotification>, GatewayError> {
        let Some(url) = self.endpoints.webhook_url.as_deref() else {
            tracing::debug!(order_no = %verified.order_no, "no merchant webhook configured");
            return Ok(None);
        };
        if !verified.transaction_status.is_final() {
            tracing::debug!(order_no = %verified.order_no, "outcome not final, webhook skipped");
            return Ok(None);
        }
        let notification = MerchantNotification::from_verified(verified);
        let body = serde_json::to_string(&notification)?;
        http::post_json(url, &body, &self.endpoints)?;
        tracing::info!(
            order_no = %notification.order_no,
            status = %notification.status,
            "notified merchant webhook {}",
            url
        );
        Ok(Some(notification))
    }

    /// Auto-submit page that posts `signed` to the payment URL.
    pub fn payment_form(&self, signed: &SignedMessage) -> String {
        form::render_autosubmit_form(&self.endpoints.payment_url, &signed.form_fields())
    }
}
