//! Debit authorization codes and transaction status transitions.
//!
//! A transaction starts `INITIATED` when the signed request is handed to the
//! customer's browser and moves to `COMPLETED` or `FAILED` once a verified
//! response (callback or status check) arrives.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Meaning of `bfs_debitAuthCode` in a verified response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// `00`
    Successful,
    /// Empty code: the remitter has not finished yet.
    InProgress,
    /// `NF`
    NotFound,
    /// `IM`
    InvalidMessage,
    /// Any other code, kept verbatim.
    Unsuccessful(String),
}

impl AuthStatus {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "00" => AuthStatus::Successful,
            "" => AuthStatus::InProgress,
            "NF" => AuthStatus::NotFound,
            "IM" => AuthStatus::InvalidMessage,
            other => AuthStatus::Unsuccessful(other.to_string()),
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, AuthStatus::InProgress)
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStatus::Successful => f.write_str("SUCCESSFUL"),
            AuthStatus::InProgress => f.write_str("TRANSACTION IN PROGRESS"),
            AuthStatus::NotFound => f.write_str("NO TRANSACTIONS FOUND!"),
            AuthStatus::InvalidMessage => f.write_str("INVALID MESSAGE RECEIVED!"),
            AuthStatus::Unsuccessful(_) => f.write_str("UNSUCCESSFUL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Initiated,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("transaction already {current:?}, refusing to move to {requested:?}")]
    AlreadyFinal {
        current: TransactionStatus,
        requested: TransactionStatus,
    },
}

impl TransactionStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Initiated)
    }

    /// Status a verified `auth` outcome leads to, ignoring the current state.
    pub fn target_for(auth: &AuthStatus) -> Self {
        match auth {
            AuthStatus::Successful => TransactionStatus::Completed,
            AuthStatus::InProgress => TransactionStatus::Initiated,
            _ => TransactionStatus::Failed,
        }
    }

    /// Apply a verified outcome. Final states only accept a repeat of the
    /// same outcome, so a replayed callback is harmless but a contradicting
    /// one is refused.
    pub fn apply(self, auth: &AuthStatus) -> Result<Self, TransitionError> {
        let target = Self::target_for(auth);
        self.transition_to(target)
    }

    /// Map a plain callback status (`SUCCESS` or anything else).
    pub fn from_callback_status(status: &str) -> Self {
        if status.trim().eq_ignore_ascii_case("SUCCESS") {
            TransactionStatus::Completed
        } else {
            TransactionStatus::Failed
        }
    }

    pub fn transition_to(self, target: Self) -> Result<Self, TransitionError> {
        if !self.is_final() {
            return Ok(target);
        }
        // An in-progress report after the fact changes nothing.
        if target == self || target == TransactionStatus::Initiated {
            return Ok(self);
        }
        Err(TransitionError::AlreadyFinal {
            current: self,
            requested: target,
        })
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Initiated => f.write_str("INITIATED"),
            TransactionStatus::Completed => f.write_str("COMPLETED"),
            TransactionStatus::Failed => f.write_str("FAILED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_codes_map() {
        assert_eq!(AuthStatus::from_code("00"), AuthStatus::Successful);
        assert_eq!(AuthStatus::from_code(""), AuthStatus::InProgress);
        assert_eq!(AuthStatus::from_code("NF"), AuthStatus::NotFound);
        assert_eq!(AuthStatus::from_code("IM"), AuthStatus::InvalidMessage);
        assert_eq!(
            AuthStatus::from_code("51"),
            AuthStatus::Unsuccessful("51".to_string())
        );
    }

    #[test]
    fn auth_display_uses_bank_wording() {
        assert_eq!(AuthStatus::Successful.to_string(), "SUCCESSFUL");
        assert_eq!(AuthStatus::InProgress.to_string(), "TRANSACTION IN PROGRESS");
        assert_eq!(AuthStatus::NotFound.to_string(), "NO TRANSACTIONS FOUND!");
        assert_eq!(
            AuthStatus::InvalidMessage.to_string(),
            "INVALID MESSAGE RECEIVED!"
        );
        assert_eq!(
            AuthStatus::Unsuccessful("05".into()).to_string(),
            "UNSUCCESSFUL"
        );
    }

    #[test]
    fn initiated_moves_on_verified_outcome() {
        let s = TransactionStatus::Initiated;
        assert_eq!(
            s.apply(&AuthStatus::Successful).unwrap(),
            TransactionStatus::Completed
        );
        assert_eq!(
            s.apply(&AuthStatus::Unsuccessful("05".into())).unwrap(),
            TransactionStatus::Failed
        );
        assert_eq!(
            s.apply(&AuthStatus::NotFound).unwrap(),
            TransactionStatus::Failed
        );
        assert_eq!(
            s.apply(&AuthStatus::InProgress).unwrap(),
            TransactionStatus::Initiated
        );
    }

    #[test]
    fn final_states_accept_replays_only() {
        let done = TransactionStatus::Completed;
        assert_eq!(done.apply(&AuthStatus::Successful).unwrap(), done);
        assert_eq!(done.apply(&AuthStatus::InProgress).unwrap(), done);
        assert_eq!(
            done.apply(&AuthStatus::Unsuccessful("05".into())),
            Err(TransitionError::AlreadyFinal {
                current: TransactionStatus::Completed,
                requested: TransactionStatus::Failed,
            })
        );
        assert!(TransactionStatus::Failed
            .apply(&AuthStatus::Successful)
            .is_err());
    }

    #[test]
    fn callback_status_maps() {
        assert_eq!(
            TransactionStatus::from_callback_status("SUCCESS"),
            TransactionStatus::Completed
        );
        assert_eq!(
            TransactionStatus::from_callback_status("DECLINED"),
            TransactionStatus::Failed
        );
    }

    #[test]
    fn status_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Initiated).unwrap(),
            "\"INITIATED\""
        );
        assert_eq!(TransactionStatus::Completed.to_string(), "COMPLETED");
    }
}
