use serde::{Deserialize, Serialize};

use crate::zap::format::DEFAULT_DECIMALS;

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787";

/// Zap dialog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZapConfig {
    /// Finance gateway serving balances, pool stats and zapper calls
    pub gateway_url: String,
    /// Connected wallet account (empty when no wallet is connected)
    pub account: String,
    /// Decimals of the zappable tokens
    pub token_decimals: u8,
}

impl Default for ZapConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            account: String::new(),
            token_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl ZapConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            gateway_url: lookup("ZAP_GATEWAY_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            account: lookup("ZAP_ACCOUNT")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            token_decimals: lookup("ZAP_TOKEN_DECIMALS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DECIMALS),
        }
    }

    /// Check if a wallet account is configured
    pub fn is_valid(&self) -> bool {
        !self.account.is_empty()
    }
}
