use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pki::SignatureAlgorithm;

/// Beneficiary details stamped on every outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// Beneficiary (merchant) id issued by RMA, `bfs_benfId`.
    pub beneficiary_id: String,
    /// Beneficiary bank code, `bfs_benfBankCode`.
    pub bank_code: String,
    /// Transaction currency, `bfs_txnCurrency`.
    pub currency: String,
    /// Protocol version, `bfs_version`.
    pub version: String,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            beneficiary_id: "BE10000001".to_string(),
            bank_code: "01".to_string(),
            currency: "BTN".to_string(),
            version: "1.0".to_string(),
        }
    }
}

/// Key material locations. Both are required before the gateway can start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Merchant RSA private key (PEM).
    #[serde(default)]
    pub private_key: Option<PathBuf>,
    /// Bank certificate (PEM or DER) or PEM public key used to verify replies.
    #[serde(default)]
    pub bank_certificate: Option<PathBuf>,
}

/// Signature algorithm per message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmsConfig {
    #[serde(default = "default_request_algorithm")]
    pub payment_request: SignatureAlgorithm,
    #[serde(default = "default_reply_algorithm")]
    pub status_check: SignatureAlgorithm,
    #[serde(default = "default_reply_algorithm")]
    pub payment_response: SignatureAlgorithm,
}

fn default_request_algorithm() -> SignatureAlgorithm {
    SignatureAlgorithm::Sha256WithRsa
}

fn default_reply_algorithm() -> SignatureAlgorithm {
    SignatureAlgorithm::Sha1WithRsa
}

impl Default for AlgorithmsConfig {
    fn default() -> Self {
        Self {
            payment_request: default_request_algorithm(),
            status_check: default_reply_algorithm(),
            payment_response: default_reply_algorithm(),
        }
    }
}

/// BFS switch endpoints and HTTP timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Payment page the browser form is submitted to.
    pub payment_url: String,
    /// Status query endpoint.
    pub status_url: String,
    /// Merchant webhook told about final outcomes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    15
}

fn default_timeout() -> u64 {
    30
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            payment_url: "https://bfssecure.rma.org.bt/BFSSecure/makePayment".to_string(),
            status_url: "https://bfssecure.rma.org.bt/BFSSecure/checkStatus".to_string(),
            webhook_url: None,
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Global configuration loaded from `~/.config/bfspay/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub merchant: MerchantConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub algorithms: AlgorithmsConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bfspay")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GatewayConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GatewayConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<GatewayConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: GatewayConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
