//! `bfspay status` – query the switch for an earlier payment.

use anyhow::{bail, Result};
use bfspay_core::config::GatewayConfig;
use bfspay_core::gateway::Gateway;
use bfspay_core::message::{PaymentOrder, PaymentRequest, ReturnUrls};

use super::verify::report;

pub async fn run_status(
    cfg: &GatewayConfig,
    order: PaymentOrder,
    urls: Option<ReturnUrls>,
) -> Result<()> {
    if order.txn_time.is_none() {
        bail!("status check needs --txn-time of the original payment");
    }
    let gateway = Gateway::from_config(cfg)?;
    let request = PaymentRequest::from_order(gateway.merchant(), &order)?;
    tokio::task::spawn_blocking(move || {
        let verified = gateway.check_status(&request)?;
        report(&gateway, &verified, urls.as_ref())
    })
    .await?
}
