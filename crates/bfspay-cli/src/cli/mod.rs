//! CLI for the bfspay checksum adapter.

mod commands;

use anyhow::Result;
use bfspay_core::checksum::{FieldLayout, PAYMENT_REQUEST, PAYMENT_RESPONSE, STATUS_CHECK};
use bfspay_core::config::{self, GatewayConfig};
use bfspay_core::message::{MessageError, PaymentOrder, ReturnUrls};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use commands::{run_sign, run_source, run_status, run_verify};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bfspay")]
#[command(about = "bfspay: sign and verify RMA BFS payment messages", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/bfspay/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Merchant private key (overrides keys.private_key).
    #[arg(long, global = true, value_name = "PATH")]
    pub key: Option<PathBuf>,

    /// Bank certificate or public key (overrides keys.bank_certificate).
    #[arg(long, global = true, value_name = "PATH")]
    pub cert: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Message layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    PaymentRequest,
    StatusCheck,
    PaymentResponse,
}

impl LayoutArg {
    pub fn layout(self) -> FieldLayout {
        match self {
            LayoutArg::PaymentRequest => PAYMENT_REQUEST,
            LayoutArg::StatusCheck => STATUS_CHECK,
            LayoutArg::PaymentResponse => PAYMENT_RESPONSE,
        }
    }
}

/// Order details shared by `sign` and `status`.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Merchant order number (bfs_orderNo).
    #[arg(long)]
    pub order_no: String,
    /// Amount, e.g. 100 or 100.50.
    #[arg(long)]
    pub amount: String,
    /// Remitter email.
    #[arg(long)]
    pub email: String,
    /// Payment description.
    #[arg(long)]
    pub description: String,
    /// Transaction time yyyyMMddHHmmss (defaults to now).
    #[arg(long, value_name = "YYYYMMDDHHMMSS")]
    pub txn_time: Option<String>,
}

impl From<OrderArgs> for PaymentOrder {
    fn from(a: OrderArgs) -> Self {
        PaymentOrder {
            order_no: a.order_no,
            amount: a.amount,
            remitter_email: a.email,
            description: a.description,
            txn_time: a.txn_time,
        }
    }
}

/// Merchant return URLs; give all three or none.
#[derive(Debug, Clone, Default, Args)]
pub struct ReturnUrlArgs {
    /// Redirect after a successful payment.
    #[arg(long, value_name = "URL", requires_all = ["failure_url", "cancel_url"])]
    pub success_url: Option<String>,
    /// Redirect after a failed payment.
    #[arg(long, value_name = "URL", requires_all = ["success_url", "cancel_url"])]
    pub failure_url: Option<String>,
    /// Redirect when the remitter cancels.
    #[arg(long, value_name = "URL", requires_all = ["success_url", "failure_url"])]
    pub cancel_url: Option<String>,
}

impl ReturnUrlArgs {
    pub fn resolve(&self) -> Result<Option<ReturnUrls>, MessageError> {
        match (&self.success_url, &self.failure_url, &self.cancel_url) {
            (Some(s), Some(f), Some(c)) => ReturnUrls::new(s, f, c).map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the `|`-joined source string of a message.
    Source {
        /// Which field order to apply.
        #[arg(long, value_enum, default_value = "payment-request")]
        layout: LayoutArg,
        /// JSON object or url-encoded fields; "-" reads stdin.
        input: String,
    },

    /// Build and sign a payment request.
    Sign {
        #[command(flatten)]
        order: OrderArgs,
        /// Print the auto-submit HTML form instead of JSON.
        #[arg(long)]
        html: bool,
    },

    /// Verify a payment response from the bank and notify the merchant
    /// webhook if one is configured.
    Verify {
        /// JSON object or url-encoded fields; "-" reads stdin.
        input: String,
        #[command(flatten)]
        urls: ReturnUrlArgs,
    },

    /// Query the switch for the status of an earlier payment.
    Status {
        #[command(flatten)]
        order: OrderArgs,
        #[command(flatten)]
        urls: ReturnUrlArgs,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        apply_key_overrides(&mut cfg, &cli);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Source { layout, input } => run_source(layout.layout(), &input)?,
            CliCommand::Sign { order, html } => run_sign(&cfg, order.into(), html)?,
            CliCommand::Verify { input, urls } => run_verify(&cfg, &input, urls.resolve()?).await?,
            CliCommand::Status { order, urls } => {
                run_status(&cfg, order.into(), urls.resolve()?).await?
            }
        }

        Ok(())
    }
}

fn apply_key_overrides(cfg: &mut GatewayConfig, cli: &Cli) {
    if let Some(key) = &cli.key {
        cfg.keys.private_key = Some(key.clone());
    }
    if let Some(cert) = &cli.cert {
        cfg.keys.bank_certificate = Some(cert.clone());
    }
}

#[cfg(test)]
mod tests;
