// src/zap/format.rs
//! Amount validation and display formatting for the zap dialog

use alloy_primitives::U256;

use crate::zap::types::{LpPool, LpStats, ZapEstimate};

/// Fractional digits shown for balances
pub const DISPLAY_FRACTION_DIGITS: u8 = 4;

/// Default ERC-20 decimals
pub const DEFAULT_DECIMALS: u8 = 18;

/// Format a raw token amount with `fraction_digits` decimals, truncating
/// (never rounding) whatever lies beyond them.
pub fn get_display_balance(raw: U256, decimals: u8, fraction_digits: u8) -> String {
    let scaled = if decimals >= fraction_digits {
        raw / pow10(decimals - fraction_digits)
    } else {
        raw * pow10(fraction_digits - decimals)
    };

    if fraction_digits == 0 {
        return scaled.to_string();
    }

    let unit = pow10(fraction_digits);
    let whole = scaled / unit;
    let frac = (scaled % unit).to_string();
    format!("{}.{:0>width$}", whole, frac, width = fraction_digits as usize)
}

fn pow10(exp: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// A finite decimal number. Surrounding whitespace is tolerated.
pub fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v.is_finite())
        .unwrap_or(false)
}

/// Empty input or a numeric zero ("0", "0.", "0.00")
pub fn is_zero_amount(value: &str) -> bool {
    value.is_empty() || value.trim().parse::<f64>().map(|v| v == 0.0).unwrap_or(false)
}

/// Rendered "Zap Estimations" block
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateSummary {
    /// LP tokens received, None while pool stats are missing or unusable
    pub lp_amount: Option<f64>,
    pub token0: f64,
    pub token1: f64,
    pub token0_symbol: &'static str,
    pub token1_symbol: &'static str,
}

impl EstimateSummary {
    pub fn new(estimate: &ZapEstimate, token_name: &str, stats: Option<&LpStats>) -> Self {
        let token0 = estimate.token0.parse::<f64>().unwrap_or(0.0);
        let token1 = estimate.token1.parse::<f64>().unwrap_or(0.0);
        let (token0_symbol, token1_symbol) = LpPool::split_symbols(token_name);

        let lp_amount = stats
            .and_then(LpStats::mim_per_lp)
            .filter(|per_lp| *per_lp > 0.0)
            .map(|per_lp| token0 / per_lp)
            .filter(|v| v.is_finite());

        Self {
            lp_amount,
            token0,
            token1,
            token0_symbol,
            token1_symbol,
        }
    }

    pub fn lp_amount_text(&self) -> String {
        match self.lp_amount {
            Some(amount) => format!("{}", amount),
            None => "—".to_string(),
        }
    }

    pub fn split_text(&self) -> String {
        format!(
            "({} {} / {} {})",
            self.token0, self.token0_symbol, self.token1, self.token1_symbol
        )
    }
}
