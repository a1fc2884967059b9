// src/zap/controller.rs
//! State behind the zap dialog, kept free of any rendering concerns.
//!
//! Handlers return the collaborator call to make (if any) instead of making it,
//! so the view decides how to run it and tests can drive it directly.

use crate::zap::approval::{ApprovalEvent, ApprovalTracker, ConfirmMode};
use crate::zap::error::ZapResult;
use crate::zap::format::{get_display_balance, is_numeric, is_zero_amount, DISPLAY_FRACTION_DIGITS, DEFAULT_DECIMALS};
use crate::zap::provider::{ZapBalances, ZapProvider};
use crate::zap::types::{LpPool, ZapAsset, ZapEstimate, ZapOrder};

/// An estimate the view must fetch. `seq` ties the answer back to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateRequest {
    pub seq: u64,
    pub asset: ZapAsset,
    pub lp_name: String,
    pub amount: String,
}

impl EstimateRequest {
    /// Ask the provider for this estimate
    pub async fn resolve(&self, provider: &dyn ZapProvider) -> ZapResult<[String; 2]> {
        provider.estimate_zap_in(self.asset, &self.lp_name, &self.amount).await
    }
}

/// Outcome of editing the amount field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputChange {
    /// Not a usable number; nothing changed. Carries the stored text the
    /// field has to be put back to.
    Rejected(String),
    /// Empty or zero; stored and estimate cleared
    Reset,
    /// Stored; fetch this estimate
    Estimate(EstimateRequest),
}

/// Outcome of pressing the confirm button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    RequestApproval(ZapAsset),
    Proceed(ZapOrder),
    /// An approval is already in flight
    Busy,
}

#[derive(Debug, Clone)]
pub struct ZapController {
    lp_name: String,
    decimals: u8,
    asset: ZapAsset,
    balances: ZapBalances,
    balance_display: String,
    input: String,
    estimate: ZapEstimate,
    approval: ApprovalTracker,
    next_seq: u64,
    awaiting: Option<u64>,
}

impl ZapController {
    pub fn new(lp_name: impl Into<String>, decimals: Option<u8>) -> Self {
        let decimals = decimals.unwrap_or(DEFAULT_DECIMALS);
        let balances = ZapBalances::default();
        let asset = ZapAsset::default();
        Self {
            lp_name: lp_name.into(),
            decimals,
            asset,
            balance_display: get_display_balance(balances.get(asset), decimals, DISPLAY_FRACTION_DIGITS),
            balances,
            input: String::new(),
            estimate: ZapEstimate::zero(),
            approval: ApprovalTracker::new(),
            next_seq: 0,
            awaiting: None,
        }
    }

    pub fn lp_name(&self) -> &str {
        &self.lp_name
    }

    pub fn pool(&self) -> LpPool {
        LpPool::for_token_name(&self.lp_name)
    }

    pub fn asset(&self) -> ZapAsset {
        self.asset
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn balance_display(&self) -> &str {
        &self.balance_display
    }

    pub fn estimate(&self) -> &ZapEstimate {
        &self.estimate
    }

    pub fn approval(&self) -> &ApprovalTracker {
        &self.approval
    }

    pub fn is_estimating(&self) -> bool {
        self.awaiting.is_some()
    }

    /// New balances arrived; refresh the display for the current asset
    pub fn set_balances(&mut self, balances: ZapBalances) {
        self.balances = balances;
        self.refresh_balance_display();
    }

    /// Switch the input asset. The allowance must be re-checked, and a pending
    /// amount is re-estimated against the new asset.
    pub fn select_asset(&mut self, asset: ZapAsset) -> Option<EstimateRequest> {
        self.asset = asset;
        self.refresh_balance_display();
        self.approval.handle(ApprovalEvent::AssetChanged);

        if is_zero_amount(&self.input) {
            self.awaiting = None;
            return None;
        }
        Some(self.issue_request(self.input.clone()))
    }

    pub fn change_input(&mut self, value: &str) -> InputChange {
        let value = value.trim();
        if value.starts_with('-') {
            return InputChange::Rejected(self.input.clone());
        }

        if is_zero_amount(value) {
            self.input = value.to_string();
            self.estimate = ZapEstimate::zero();
            // Anything still in flight belongs to an amount that is gone
            self.awaiting = None;
            return InputChange::Reset;
        }

        if !is_numeric(value) {
            return InputChange::Rejected(self.input.clone());
        }

        self.input = value.to_string();
        InputChange::Estimate(self.issue_request(value.to_string()))
    }

    /// Fill the field with the whole displayed balance
    pub fn select_max(&mut self) -> InputChange {
        let max = self.balance_display.clone();
        self.change_input(&max)
    }

    /// Store an estimate if it answers the newest request. Returns whether it was kept.
    pub fn apply_estimate(&mut self, seq: u64, pair: [String; 2]) -> bool {
        if self.awaiting != Some(seq) {
            log::debug!("Dropping stale zap estimate #{} (awaiting {:?})", seq, self.awaiting);
            return false;
        }
        self.awaiting = None;
        self.estimate = ZapEstimate::from_pair(pair);
        true
    }

    /// An estimate call failed; keep the previous figures
    pub fn fail_estimate(&mut self, seq: u64) {
        if self.awaiting == Some(seq) {
            self.awaiting = None;
        }
    }

    /// Feed an allowance result or approval outcome for `asset`. Outcomes for
    /// an asset that is no longer selected are dropped. Returns whether it applied.
    pub fn handle_approval(&mut self, asset: ZapAsset, event: ApprovalEvent) -> bool {
        if asset != self.asset {
            log::debug!("Dropping {:?} for {} while {} is selected", event, asset, self.asset);
            return false;
        }
        self.approval.handle(event);
        true
    }

    pub fn confirm(&mut self) -> ConfirmAction {
        if self.approval.is_in_flight() {
            return ConfirmAction::Busy;
        }
        match self.approval.confirm_mode() {
            ConfirmMode::Approve => {
                self.approval.handle(ApprovalEvent::Requested);
                ConfirmAction::RequestApproval(self.asset)
            }
            ConfirmMode::Proceed => ConfirmAction::Proceed(ZapOrder {
                zap_asset: self.asset,
                lp_name: self.lp_name.clone(),
                amount: self.input.clone(),
            }),
        }
    }

    fn issue_request(&mut self, amount: String) -> EstimateRequest {
        self.next_seq += 1;
        self.awaiting = Some(self.next_seq);
        EstimateRequest {
            seq: self.next_seq,
            asset: self.asset,
            lp_name: self.lp_name.clone(),
            amount,
        }
    }

    fn refresh_balance_display(&mut self) {
        self.balance_display = get_display_balance(self.balances.get(self.asset), self.decimals, DISPLAY_FRACTION_DIGITS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zap::approval::ApprovalState;
    use crate::zap::provider::mock::MockProvider;
    use alloy_primitives::U256;

    const LP: &str = "GRAPE-MIM-LP";

    fn ether(tenths_of_thousandth: u64) -> U256 {
        // value in units of 1e-4 tokens
        U256::from(tenths_of_thousandth) * U256::from(100_000_000_000_000u64)
    }

    fn fixed_balances() -> ZapBalances {
        ZapBalances {
            mim: ether(125_000),
            wine: U256::ZERO,
            grape: ether(1_000_000),
        }
    }

    fn estimate_of(change: InputChange) -> EstimateRequest {
        match change {
            InputChange::Estimate(request) => request,
            other => panic!("expected an estimate request, got {:?}", other),
        }
    }

    fn pair(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn test_defaults() {
        let controller = ZapController::new(LP, None);
        assert_eq!(controller.asset(), ZapAsset::Mim);
        assert_eq!(controller.input(), "");
        assert_eq!(controller.balance_display(), "0.0000");
        assert!(controller.estimate().is_zero());
        assert_eq!(controller.approval().button_label(), "Approve");
    }

    #[test]
    fn test_selecting_each_asset_shows_its_balance() {
        let mut controller = ZapController::new(LP, Some(18));
        controller.set_balances(fixed_balances());
        assert_eq!(controller.balance_display(), "12.5000");

        for (asset, expected) in [
            (ZapAsset::Wine, "0.0000"),
            (ZapAsset::Grape, "100.0000"),
            (ZapAsset::Mim, "12.5000"),
        ] {
            assert_eq!(controller.select_asset(asset), None);
            assert_eq!(controller.balance_display(), expected);
        }
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let mut controller = ZapController::new(LP, None);
        let request = estimate_of(controller.change_input("10"));
        assert!(controller.apply_estimate(request.seq, pair("4", "6")));

        for bad in ["abc", "10x", "1.2.3", "-3", "inf"] {
            assert_eq!(controller.change_input(bad), InputChange::Rejected("10".to_string()));
            assert_eq!(controller.input(), "10");
            assert_eq!(controller.estimate(), &ZapEstimate { token0: "4".into(), token1: "6".into() });
        }
    }

    #[test]
    fn test_zero_and_empty_reset_estimate() {
        let mut controller = ZapController::new(LP, None);
        for reset in ["0", ""] {
            let request = estimate_of(controller.change_input("10"));
            controller.apply_estimate(request.seq, pair("4", "6"));

            assert_eq!(controller.change_input(reset), InputChange::Reset);
            assert_eq!(controller.input(), reset);
            assert_eq!(controller.estimate(), &ZapEstimate::zero());
            assert!(!controller.is_estimating());
        }
    }

    #[test]
    fn test_select_max_uses_displayed_balance() {
        let mut controller = ZapController::new(LP, None);
        controller.set_balances(fixed_balances());
        controller.select_asset(ZapAsset::Grape);

        let request = estimate_of(controller.select_max());
        assert_eq!(controller.input(), controller.balance_display());
        assert_eq!(request.amount, "100.0000");
        assert_eq!(request.asset, ZapAsset::Grape);
        assert_eq!(request.lp_name, LP);

        // Nothing to zap with an empty balance
        controller.select_asset(ZapAsset::Wine);
        assert_eq!(controller.select_max(), InputChange::Reset);
        assert_eq!(controller.input(), "0.0000");
    }

    #[test]
    fn test_stale_estimates_are_dropped() {
        let mut controller = ZapController::new(LP, None);
        let first = estimate_of(controller.change_input("1"));
        let second = estimate_of(controller.change_input("12"));
        assert!(second.seq > first.seq);

        // Second answer lands first, then the first one straggles in
        assert!(controller.apply_estimate(second.seq, pair("5", "7")));
        assert!(!controller.apply_estimate(first.seq, pair("1", "1")));
        assert_eq!(controller.estimate().token0, "5");

        // A late answer after clearing the field is ignored too
        let third = estimate_of(controller.change_input("3"));
        controller.change_input("");
        assert!(!controller.apply_estimate(third.seq, pair("9", "9")));
        assert!(controller.estimate().is_zero());
    }

    #[test]
    fn test_asset_change_reestimates_pending_amount() {
        let mut controller = ZapController::new(LP, None);
        controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved: true });
        let first = estimate_of(controller.change_input("10"));

        let request = controller.select_asset(ZapAsset::Wine).expect("re-estimate");
        assert_eq!(request.asset, ZapAsset::Wine);
        assert_eq!(request.amount, "10");
        assert!(!controller.apply_estimate(first.seq, pair("1", "1")));
        assert_eq!(controller.approval().state(), ApprovalState::Unknown);
    }

    #[test]
    fn test_confirm_requires_approval_first() {
        let mut controller = ZapController::new(LP, None);
        controller.change_input("10");
        controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved: false });

        assert_eq!(controller.confirm(), ConfirmAction::RequestApproval(ZapAsset::Mim));
        // Second click while the approval is pending does nothing
        assert_eq!(controller.confirm(), ConfirmAction::Busy);

        controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved: true });
        assert_eq!(
            controller.confirm(),
            ConfirmAction::Proceed(ZapOrder {
                zap_asset: ZapAsset::Mim,
                lp_name: LP.to_string(),
                amount: "10".to_string(),
            })
        );
    }

    #[test]
    fn test_whitespace_and_negative_zero() {
        let mut controller = ZapController::new(LP, None);
        let request = estimate_of(controller.change_input(" 7 "));
        assert_eq!(controller.input(), "7");
        assert_eq!(request.amount, controller.input());

        controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved: true });
        match controller.confirm() {
            ConfirmAction::Proceed(order) => assert_eq!(order.amount, "7"),
            other => panic!("expected an order, got {:?}", other),
        }

        assert_eq!(controller.change_input("-0"), InputChange::Rejected("7".to_string()));
        assert_eq!(controller.input(), "7");
    }

    #[test]
    fn test_rejected_input_restores_stored_text() {
        let mut controller = ZapController::new(LP, None);
        assert_eq!(controller.change_input("x"), InputChange::Rejected(String::new()));
        estimate_of(controller.change_input("10"));
        assert_eq!(controller.change_input("10a"), InputChange::Rejected("10".to_string()));
        // The next keystroke on top of the restored text is accepted again
        assert_eq!(estimate_of(controller.change_input("105")).amount, "105");
    }

    #[test]
    fn test_late_approval_failure_for_previous_asset_is_ignored() {
        let mut controller = ZapController::new(LP, None);
        controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved: false });
        assert_eq!(controller.confirm(), ConfirmAction::RequestApproval(ZapAsset::Mim));

        controller.select_asset(ZapAsset::Wine);
        controller.handle_approval(ZapAsset::Wine, ApprovalEvent::Checked { approved: false });
        assert_eq!(controller.confirm(), ConfirmAction::RequestApproval(ZapAsset::Wine));
        assert_eq!(controller.confirm(), ConfirmAction::Busy);

        // The MIM approval fails after the switch
        assert!(!controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Failed));
        assert!(controller.approval().is_in_flight());
        assert_eq!(controller.confirm(), ConfirmAction::Busy);
    }

    #[test]
    fn test_allowance_for_previous_asset_is_ignored() {
        let mut controller = ZapController::new(LP, None);
        controller.select_asset(ZapAsset::Grape);

        assert!(!controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved: true }));
        assert_eq!(controller.approval().state(), ApprovalState::Unknown);
        assert_eq!(controller.approval().button_label(), "Approve");

        assert!(controller.handle_approval(ZapAsset::Grape, ApprovalEvent::Checked { approved: true }));
        assert!(controller.approval().is_approved());
    }

    #[tokio::test]
    async fn test_end_to_end_estimate() {
        let mut provider = MockProvider::default();
        provider.estimates.insert("10".to_string(), pair("4", "6"));

        let mut controller = ZapController::new(LP, None);
        assert_eq!(controller.select_asset(ZapAsset::Mim), None);
        let request = estimate_of(controller.change_input("10"));
        let answer = request.resolve(&provider).await.unwrap();
        assert!(controller.apply_estimate(request.seq, answer));

        assert_eq!(controller.estimate(), &ZapEstimate { token0: "4".into(), token1: "6".into() });
        assert_eq!(provider.calls(), vec!["estimate:MIM:GRAPE-MIM-LP:10".to_string()]);
    }

    #[tokio::test]
    async fn test_confirm_flow_against_provider() {
        let provider = MockProvider::default();
        let mut controller = ZapController::new(LP, None);
        controller.change_input("2.5");

        let approved = provider.approval_status(controller.asset()).await.unwrap();
        controller.handle_approval(ZapAsset::Mim, ApprovalEvent::Checked { approved });

        let mut orders = Vec::new();
        if let ConfirmAction::RequestApproval(asset) = controller.confirm() {
            provider.approve_zapper(asset).await.unwrap();
            let approved = provider.approval_status(asset).await.unwrap();
            controller.handle_approval(asset, ApprovalEvent::Checked { approved });
        }
        if let ConfirmAction::Proceed(order) = controller.confirm() {
            orders.push(order);
        }

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].amount, "2.5");
        assert!(!provider.calls().iter().any(|c| c.starts_with("zap:")));
    }
}
