//! `bfspay verify` – authenticate a payment response.

use anyhow::Result;
use bfspay_core::config::GatewayConfig;
use bfspay_core::gateway::{Gateway, VerifiedResponse};
use bfspay_core::message::ReturnUrls;

use super::input::read_fields;

pub async fn run_verify(
    cfg: &GatewayConfig,
    input: &str,
    urls: Option<ReturnUrls>,
) -> Result<()> {
    let gateway = Gateway::from_config(cfg)?;
    let fields = read_fields(input)?;
    let verified = gateway.verify_response(&fields)?;
    tokio::task::spawn_blocking(move || report(&gateway, &verified, urls.as_ref())).await?
}

/// Notify the merchant webhook, then print the outcome. Blocks on HTTP.
pub(super) fn report(
    gateway: &Gateway,
    verified: &VerifiedResponse,
    urls: Option<&ReturnUrls>,
) -> Result<()> {
    // A verified outcome stands even if the merchant cannot be reached.
    let notified = match gateway.notify_merchant(verified) {
        Ok(sent) => sent.is_some(),
        Err(e) => {
            tracing::warn!(order_no = %verified.order_no, "merchant webhook failed: {e}");
            false
        }
    };
    let redirect = urls.and_then(|u| u.redirect_for(verified.transaction_status));
    print_verified(verified, notified, redirect)
}

fn print_verified(v: &VerifiedResponse, notified: bool, redirect: Option<&str>) -> Result<()> {
    let summary = serde_json::json!({
        "orderNo": v.order_no,
        "verified": true,
        "authStatus": v.auth.to_string(),
        "transactionStatus": v.transaction_status,
        "merchantNotified": notified,
        "redirectUrl": redirect,
        "data": v.fields,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
