// src/zap/types.rs
//! Type definitions for zapping into Grape Finance liquidity pools

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::zap::error::ZapError;

pub const GRAPE_TICKER: &str = "GRAPE";
pub const WINE_TICKER: &str = "WINE";
pub const MIM_TICKER: &str = "MIM";

/// Tokens the zapper accepts as input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZapAsset {
    #[default]
    Mim,
    Wine,
    Grape,
}

impl ZapAsset {
    /// Selector order
    pub const ALL: [ZapAsset; 3] = [ZapAsset::Mim, ZapAsset::Wine, ZapAsset::Grape];

    pub fn ticker(&self) -> &'static str {
        match self {
            ZapAsset::Mim => MIM_TICKER,
            ZapAsset::Wine => WINE_TICKER,
            ZapAsset::Grape => GRAPE_TICKER,
        }
    }
}

impl fmt::Display for ZapAsset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

impl FromStr for ZapAsset {
    type Err = ZapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MIM_TICKER => Ok(ZapAsset::Mim),
            WINE_TICKER => Ok(ZapAsset::Wine),
            GRAPE_TICKER => Ok(ZapAsset::Grape),
            other => Err(ZapError::UnknownAsset(other.to_string())),
        }
    }
}

/// Liquidity pools whose statistics back the LP estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LpPool {
    GrapeMim,
    WineMim,
}

impl LpPool {
    pub const ALL: [LpPool; 2] = [LpPool::GrapeMim, LpPool::WineMim];

    pub fn name(&self) -> &'static str {
        match self {
            LpPool::GrapeMim => "GRAPE-MIM-LP",
            LpPool::WineMim => "WINE-MIM-LP",
        }
    }

    /// Pool whose stats apply to a target LP token name.
    /// Anything not prefixed with GRAPE falls back to the WINE pool.
    pub fn for_token_name(token_name: &str) -> Self {
        if token_name.starts_with(GRAPE_TICKER) {
            LpPool::GrapeMim
        } else {
            LpPool::WineMim
        }
    }

    /// Symbols of (token0, token1) as the zapper reports its split.
    /// Non-WINE pools pair MIM with GRAPE; the old dialog labelled token1 WINE
    /// there, which was wrong for GRAPE-MIM-LP.
    pub fn split_symbols(token_name: &str) -> (&'static str, &'static str) {
        if token_name.starts_with(WINE_TICKER) {
            (WINE_TICKER, MIM_TICKER)
        } else {
            (MIM_TICKER, GRAPE_TICKER)
        }
    }
}

/// Pool statistics as reported by the finance gateway.
/// Quantities stay as the decimal strings the gateway sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpStats {
    pub token_amount: String,
    pub mim_amount: String,
    pub price_of_one: String,
    pub total_liquidity: String,
    pub total_supply: String,
}

impl LpStats {
    /// MIM backing one LP token, if the gateway sent a usable number
    pub fn mim_per_lp(&self) -> Option<f64> {
        self.mim_amount.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Projected split of a zap into the pool's two constituents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZapEstimate {
    pub token0: String,
    pub token1: String,
}

impl ZapEstimate {
    pub fn zero() -> Self {
        Self {
            token0: "0".to_string(),
            token1: "0".to_string(),
        }
    }

    pub fn from_pair(pair: [String; 2]) -> Self {
        let [token0, token1] = pair;
        Self { token0, token1 }
    }

    pub fn is_zero(&self) -> bool {
        self.token0 == "0" && self.token1 == "0"
    }
}

impl Default for ZapEstimate {
    fn default() -> Self {
        Self::zero()
    }
}

/// What the user confirmed: zap `amount` of `zap_asset` into `lp_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZapOrder {
    pub zap_asset: ZapAsset,
    pub lp_name: String,
    pub amount: String,
}
