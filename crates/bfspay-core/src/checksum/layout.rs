//! Field orderings for each BFS message type.
//!
//! The switch recomputes the source string from the posted fields in these
//! exact orders; any deviation makes every checksum fail.

use std::fmt;

/// Protocol-fixed ordered list of `bfs_*` field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    name: &'static str,
    fields: &'static [&'static str],
}

impl FieldLayout {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Outbound authorization request (AR) posted to the payment page.
pub const PAYMENT_REQUEST: FieldLayout = FieldLayout::new(
    "payment-request",
    &[
        "bfs_benfBankCode",
        "bfs_benfId",
        "bfs_benfTxnTime",
        "bfs_msgType",
        "bfs_orderNo",
        "bfs_paymentDesc",
        "bfs_remitterEmail",
        "bfs_txnAmount",
        "bfs_txnCurrency",
        "bfs_version",
    ],
);

/// Outbound status query posted to the checkStatus endpoint.
pub const STATUS_CHECK: FieldLayout = FieldLayout::new(
    "status-check",
    &[
        "bfs_benfBankCode",
        "bfs_benfId",
        "bfs_orderNo",
        "bfs_benfTxnTime",
        "bfs_msgType",
        "bfs_paymentDesc",
        "bfs_remitterEmail",
        "bfs_txnAmount",
        "bfs_txnCurrency",
        "bfs_version",
    ],
);

/// Inbound authorization response, both the async callback and the
/// status-check reply.
pub const PAYMENT_RESPONSE: FieldLayout = FieldLayout::new(
    "payment-response",
    &[
        "bfs_benfId",
        "bfs_benfTxnTime",
        "bfs_bfsTxnId",
        "bfs_bfsTxnTime",
        "bfs_debitAuthCode",
        "bfs_debitAuthNo",
        "bfs_msgType",
        "bfs_orderNo",
        "bfs_remitterBankId",
        "bfs_remitterName",
        "bfs_txnAmount",
        "bfs_txnCurrency",
    ],
);
