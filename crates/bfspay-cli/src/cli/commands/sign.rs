//! `bfspay sign` – build and sign a payment request.

use anyhow::Result;
use bfspay_core::config::GatewayConfig;
use bfspay_core::gateway::Gateway;
use bfspay_core::message::{PaymentOrder, PaymentRequest};

pub fn run_sign(cfg: &GatewayConfig, order: PaymentOrder, html: bool) -> Result<()> {
    let gateway = Gateway::from_config(cfg)?;
    let request = PaymentRequest::from_order(gateway.merchant(), &order)?;
    let signed = gateway.sign_payment(&request)?;
    if html {
        print!("{}", gateway.payment_form(&signed));
    } else {
        println!("{}", serde_json::to_string_pretty(&signed.form_fields())?);
    }
    Ok(())
}
