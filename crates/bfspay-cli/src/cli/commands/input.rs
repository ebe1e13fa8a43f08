//! Read message fields from a file or stdin, as JSON or url-encoded text.

use anyhow::{Context, Result};
use bfspay_core::checksum::Fields;
use bfspay_core::form;
use std::io::Read;

pub fn read_fields(input: &str) -> Result<Fields> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("read {input}"))?
    };
    parse_fields(&text)
}

/// A leading `{` selects JSON; anything else is treated as `k=v&...`.
pub fn parse_fields(text: &str) -> Result<Fields> {
    if text.trim_start().starts_with('{') {
        return serde_json::from_str(text).context("parse JSON fields");
    }
    Ok(form::parse_response(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fields_json() {
        let f = parse_fields(r#"{"bfs_orderNo":"O1","bfs_debitAuthCode":""}"#).unwrap();
        assert_eq!(f["bfs_orderNo"], "O1");
        assert_eq!(f["bfs_debitAuthCode"], "");
    }

    #[test]
    fn parse_fields_urlencoded() {
        let f = parse_fields("bfs_orderNo=O1&bfs_remitterName=Dawa+Lham\n").unwrap();
        assert_eq!(f["bfs_remitterName"], "Dawa Lham");
    }

    #[test]
    fn parse_fields_rejects_non_string_json() {
        assert!(parse_fields(r#"{"bfs_txnAmount": 100}"#).is_err());
    }

    #[test]
    fn parse_fields_processing_error() {
        assert!(parse_fields("PROCESSING_ERROR").is_err());
    }
}
