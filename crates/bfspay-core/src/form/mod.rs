//! Wire codecs: url-encoded bodies to and from the switch, and the
//! auto-submitting HTML form that hands a signed request to the browser.

mod html;

use thiserror::Error;
use url::form_urlencoded;

use crate::checksum::Fields;

pub use html::{escape_html, render_autosubmit_form};

/// Literal body the switch returns when it cannot process a query.
pub const PROCESSING_ERROR: &str = "PROCESSING_ERROR";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("switch reported PROCESSING_ERROR")]
    ProcessingError,
    #[error("switch returned an empty reply")]
    Empty,
}

/// Decode a `key=value&...` reply. Empty values are kept: an empty
/// `bfs_debitAuthCode` is meaningful. Later duplicates win.
pub fn parse_response(body: &str) -> Result<Fields, ReplyError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ReplyError::Empty);
    }
    if body == PROCESSING_ERROR {
        return Err(ReplyError::ProcessingError);
    }
    Ok(form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .filter(|(k, _)| !k.is_empty())
        .collect())
}

/// Encode fields as an `application/x-www-form-urlencoded` body.
pub fn encode_request<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        ser.append_pair(k, v);
    }
    ser.finish()
}
