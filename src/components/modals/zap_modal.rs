use dioxus::prelude::*;
use dioxus::document::eval;
use crate::zap::{
    ApprovalEvent, ConfirmAction, EstimateRequest, EstimateSummary, InputChange, LpStats, SharedProvider,
    ZapAsset, ZapBalances, ZapController, ZapOrder, ZapProvider,
};

/// Fetch an estimate and hand it back to the controller, which drops it if a
/// newer request was issued meanwhile.
fn spawn_estimate(provider: SharedProvider, mut controller: Signal<ZapController>, request: EstimateRequest) {
    spawn(async move {
        match request.resolve(&*provider).await {
            Ok(pair) => {
                println!("📊 Zap estimate #{} for {} {}: {:?}", request.seq, request.amount, request.asset, pair);
                controller.write().apply_estimate(request.seq, pair);
            }
            Err(e) => {
                log::error!("Zap estimate #{} for {} {} failed: {}", request.seq, request.amount, request.asset, e);
                controller.write().fail_estimate(request.seq);
            }
        }
    });
}

/// Re-read the zapper allowance for `asset`
async fn refresh_approval(provider: &dyn ZapProvider, mut controller: Signal<ZapController>, asset: ZapAsset) {
    let event = match provider.approval_status(asset).await {
        Ok(approved) => ApprovalEvent::Checked { approved },
        Err(e) => {
            log::error!("Allowance check for {} failed: {}", asset, e);
            ApprovalEvent::Failed
        }
    };

    controller.write().handle_approval(asset, event);
}

const AMOUNT_FIELD_ID: &str = "zap-amount-field";

/// Script putting the amount field back to `stored`. The renderer skips the
/// update when the rendered value did not change, so a rejected keystroke
/// would otherwise stay visible.
fn restore_amount_script(stored: &str) -> String {
    let literal = serde_json::to_string(stored).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "const field = document.getElementById('{}'); if (field) {{ field.value = {}; }}",
        AMOUNT_FIELD_ID, literal
    )
}

fn spawn_approval_check(provider: SharedProvider, controller: Signal<ZapController>, asset: ZapAsset) {
    spawn(async move {
        refresh_approval(&*provider, controller, asset).await;
    });
}

#[component]
pub fn ZapModal(
    provider: SharedProvider,
    token_name: String,
    decimals: Option<u8>,
    onconfirm: EventHandler<ZapOrder>,
    onclose: EventHandler<()>,
) -> Element {
    let lp_name = token_name.clone();
    let mut controller = use_signal(move || ZapController::new(lp_name, decimals));

    let mut lp_stats = use_signal(|| None as Option<LpStats>);
    let pool = controller.peek().pool();

    // Balances, pool stats and the default asset's allowance, once per opening
    let provider_for_mount = provider.clone();
    use_hook(move || {
        let provider = provider_for_mount.clone();
        spawn(async move {
            match ZapBalances::load(&*provider).await {
                Ok(balances) => controller.write().set_balances(balances),
                Err(e) => log::error!("Failed to load zap balances: {}", e),
            }
            match provider.lp_stats(pool).await {
                Ok(stats) => lp_stats.set(Some(stats)),
                Err(e) => log::warn!("No stats for {}: {}", pool.name(), e),
            }
        });
        let asset = controller.peek().asset();
        spawn_approval_check(provider_for_mount, controller, asset);
    });

    let provider_for_asset = provider.clone();
    let handle_change_asset = move |e: Event<FormData>| {
        let asset = match e.value().parse::<ZapAsset>() {
            Ok(asset) => asset,
            Err(err) => {
                log::warn!("Ignoring asset selection: {}", err);
                return;
            }
        };
        let request = controller.write().select_asset(asset);
        if let Some(request) = request {
            spawn_estimate(provider_for_asset.clone(), controller, request);
        }
        spawn_approval_check(provider_for_asset.clone(), controller, asset);
    };

    let provider_for_input = provider.clone();
    let handle_change = move |e: Event<FormData>| {
        let change = controller.write().change_input(&e.value());
        match change {
            InputChange::Estimate(request) => spawn_estimate(provider_for_input.clone(), controller, request),
            InputChange::Rejected(stored) => {
                let _ = eval(&restore_amount_script(&stored));
            }
            InputChange::Reset => {}
        }
    };

    let provider_for_max = provider.clone();
    let handle_select_max = move |_| {
        let change = controller.write().select_max();
        if let InputChange::Estimate(request) = change {
            spawn_estimate(provider_for_max.clone(), controller, request);
        }
    };

    let provider_for_confirm = provider.clone();
    let handle_confirm = move |_| {
        let action = controller.write().confirm();
        match action {
            ConfirmAction::RequestApproval(asset) => {
                let provider = provider_for_confirm.clone();
                spawn(async move {
                    match provider.approve_zapper(asset).await {
                        Ok(tx_hash) => {
                            println!("✅ Zapper approval for {} submitted: {}", asset, tx_hash);
                            refresh_approval(&*provider, controller, asset).await;
                        }
                        Err(e) => {
                            log::error!("Zapper approval for {} failed: {}", asset, e);
                            controller.write().handle_approval(asset, ApprovalEvent::Failed);
                        }
                    }
                });
            }
            ConfirmAction::Proceed(order) => {
                println!("🚀 Confirming zap: {} {} -> {}", order.amount, order.zap_asset, order.lp_name);
                onconfirm.call(order);
            }
            ConfirmAction::Busy => {}
        }
    };

    let state = controller.read();
    let asset = state.asset();
    let input = state.input().to_string();
    let balance = state.balance_display().to_string();
    let button_label = state.approval().button_label();
    let approving = state.approval().is_in_flight();
    let estimating = state.is_estimating();
    let summary = EstimateSummary::new(state.estimate(), state.lp_name(), lp_stats.read().as_ref());
    drop(state);

    let lp_amount = summary.lp_amount_text();
    let split = summary.split_text();

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| onclose.call(()),

            div {
                class: "modal-content zap-modal",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "zap-header",
                    h2 { class: "modal-title", "Zap in {token_name}" }
                    button {
                        class: "zap-close-button",
                        onclick: move |_| onclose.call(()),
                        "×"
                    }
                }

                div { class: "zap-spacer" }

                label {
                    class: "zap-label",
                    "Select asset to zap with"
                }
                select {
                    id: "zap-asset-select",
                    class: "zap-asset-picker",
                    value: "{asset}",
                    onchange: handle_change_asset,

                    for choice in ZapAsset::ALL {
                        option {
                            value: "{choice}",
                            selected: choice == asset,
                            "{choice}"
                        }
                    }
                }

                // Amount field with the MAX shortcut
                div {
                    class: "zap-token-input",
                    div {
                        class: "zap-available",
                        "{balance} {asset} Available"
                    }
                    div {
                        class: "zap-input-row",
                        input {
                            id: AMOUNT_FIELD_ID,
                            class: "zap-amount-field",
                            r#type: "text",
                            placeholder: "0",
                            value: "{input}",
                            oninput: handle_change,
                        }
                        span { class: "zap-input-symbol", "{asset}" }
                        button {
                            class: "zap-max-button",
                            onclick: handle_select_max,
                            "MAX"
                        }
                    }
                }

                div { class: "zap-section-label", "Zap Estimations" }
                div {
                    class: "zap-description",
                    if estimating {
                        "Estimating..."
                    } else {
                        "{token_name}: {lp_amount}"
                    }
                }
                div {
                    class: "zap-description",
                    "{split}"
                }

                div {
                    class: "modal-buttons",
                    button {
                        class: "modal-button primary",
                        disabled: approving,
                        onclick: handle_confirm,
                        "{button_label}"
                    }
                }

                div { class: "zap-spacer" }
                div {
                    class: "zap-info-alert",
                    "You need to manually stake the LP tokens after zapping. This feature piggybacks off of the Piggy Finance zapper."
                }
            }
        }
    }
}
