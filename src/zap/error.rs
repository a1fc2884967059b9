// src/zap/error.rs
//! Error type shared by the zap provider and the gateway client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZapError {
    #[error("Network error: {0}")] Network(#[from] reqwest::Error),

    #[error("Gateway returned {status} for {endpoint}")] Gateway {
        endpoint: String,
        status: u16,
    },

    #[error("Decode error: {0}")] Decode(String),

    #[error("Invalid amount: {0}")] InvalidAmount(String),

    #[error("No wallet account configured")] NoAccount,

    #[error("Unknown asset: {0}")] UnknownAsset(String),
}

impl ZapError {
    /// Errors worth retrying by simply asking again
    pub fn is_transient(&self) -> bool {
        match self {
            ZapError::Network(_) => true,
            ZapError::Gateway { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type ZapResult<T> = std::result::Result<T, ZapError>;
