//! Blocking POST over libcurl.

use curl::easy::{Easy, List};
use std::time::Duration;

use super::GatewayError;
use crate::config::EndpointsConfig;

/// POST `body` as `application/x-www-form-urlencoded` and return the reply
/// body. Runs in the current thread; call from `spawn_blocking` if used from
/// async code.
pub(crate) fn post_form(
    url: &str,
    body: &str,
    endpoints: &EndpointsConfig,
) -> Result<String, GatewayError> {
    post(url, "application/x-www-form-urlencoded", body, endpoints)
}

/// POST a JSON document. Same blocking rules as [`post_form`].
pub(crate) fn post_json(
    url: &str,
    body: &str,
    endpoints: &EndpointsConfig,
) -> Result<String, GatewayError> {
    post(url, "application/json", body, endpoints)
}

fn post(
    url: &str,
    content_type: &str,
    body: &str,
    endpoints: &EndpointsConfig,
) -> Result<String, GatewayError> {
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.post(true)?;
    easy.post_fields_copy(body.as_bytes())?;
    easy.connect_timeout(Duration::from_secs(endpoints.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(endpoints.timeout_secs))?;

    let mut headers = List::new();
    headers.append(&format!("Content-Type: {content_type}"))?;
    // Send the body immediately rather than waiting on 100-continue.
    headers.append("Expect:")?;
    easy.http_headers(headers)?;

    let mut data = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|chunk| {
            data.extend_from_slice(chunk);
            Ok(chunk.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        tracing::warn!("POST {} returned HTTP {}", url, code);
        return Err(GatewayError::Http(code));
    }
    Ok(String::from_utf8(data)?)
}
