// src/zap/mod.rs
//! Zapping a single token into a Grape Finance LP position

pub mod approval;
pub mod client;
pub mod controller;
pub mod error;
pub mod format;
pub mod provider;
pub mod types;

pub use approval::{ApprovalEvent, ApprovalState, ApprovalTracker, ConfirmMode};
pub use client::ZapperClient;
pub use controller::{ConfirmAction, EstimateRequest, InputChange, ZapController};
pub use error::{ZapError, ZapResult};
pub use format::EstimateSummary;
pub use provider::{SharedProvider, ZapBalances, ZapProvider};
pub use types::*;
