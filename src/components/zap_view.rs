use dioxus::prelude::*;
use crate::config::ZapConfig;
use crate::components::modals::ZapModal;
use crate::zap::{LpPool, SharedProvider, ZapOrder};

/// Zap success modal component
#[component]
pub fn ZapSuccessModal(
    tx_hash: String,
    order: ZapOrder,
    onclose: EventHandler<()>,
) -> Element {
    let explorer_url = format!("https://snowtrace.io/tx/{}", tx_hash);

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| onclose.call(()),

            div {
                class: "modal-content",
                onclick: move |e| e.stop_propagation(),

                h2 { class: "modal-title", "Zap Submitted! 🎉" }

                div {
                    class: "tx-icon-container",
                    div { class: "tx-success-icon", "✓" }
                }

                div {
                    class: "zap-summary",
                    div {
                        class: "zap-summary-row",
                        span { "Zapped:" }
                        span { "{order.amount} {order.zap_asset}" }
                    }
                    div {
                        class: "zap-summary-row",
                        span { "Into:" }
                        span { "{order.lp_name}" }
                    }
                }

                div {
                    class: "zap-info-alert",
                    "Remember to stake your {order.lp_name} tokens to start earning."
                }

                div {
                    class: "transaction-details",
                    div {
                        class: "wallet-field",
                        label { "Transaction Hash:" }
                        div {
                            class: "address-display",
                            title: "Transaction hash",
                            "{tx_hash}"
                        }
                    }
                    a {
                        class: "explorer-button",
                        href: "{explorer_url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "View on Snowtrace"
                    }
                }

                div { class: "modal-buttons",
                    button {
                        class: "modal-button primary",
                        onclick: move |_| onclose.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}

/// Pool list with a zap entry point per pool
#[component]
pub fn ZapView() -> Element {
    let provider = use_context::<SharedProvider>();
    let config = use_context::<ZapConfig>();

    let mut active_lp = use_signal(|| None as Option<String>);
    let mut zapping = use_signal(|| false);
    let mut error_message = use_signal(|| None as Option<String>);
    let mut completed = use_signal(|| None as Option<(ZapOrder, String)>);

    let provider_for_zap = provider.clone();
    let handle_confirm = move |order: ZapOrder| {
        let provider = provider_for_zap.clone();
        active_lp.set(None);
        zapping.set(true);
        error_message.set(None);

        spawn(async move {
            match provider.zap_in(&order).await {
                Ok(tx_hash) => {
                    log::info!("Zap into {} confirmed: {}", order.lp_name, tx_hash);
                    completed.set(Some((order, tx_hash)));
                }
                Err(e) => {
                    log::error!("Zap into {} failed: {}", order.lp_name, e);
                    let hint = if e.is_transient() { " - please try again" } else { "" };
                    error_message.set(Some(format!("Zap failed: {}{}", e, hint)));
                }
            }
            zapping.set(false);
        });
    };

    if let Some((order, tx_hash)) = completed() {
        return rsx! {
            ZapSuccessModal {
                tx_hash,
                order,
                onclose: move |_| completed.set(None),
            }
        };
    }

    rsx! {
        div {
            class: "zap-view",

            h1 { class: "zap-view-title", "Zap into LP" }

            if !config.is_valid() {
                div {
                    class: "warning-message",
                    "No wallet connected. Set ZAP_ACCOUNT to the account you want to zap from."
                }
            }

            if let Some(error) = error_message() {
                div { class: "error-message", "{error}" }
            }

            if zapping() {
                div { class: "zap-progress", "Zapping..." }
            }

            div {
                class: "zap-pool-list",
                for pool in LpPool::ALL {
                    div {
                        key: "{pool.name()}",
                        class: "zap-pool-card",
                        span { class: "zap-pool-name", "{pool.name()}" }
                        button {
                            class: "modal-button primary",
                            disabled: zapping() || !config.is_valid(),
                            onclick: move |_| active_lp.set(Some(pool.name().to_string())),
                            "Zap"
                        }
                    }
                }
            }

            if let Some(lp_name) = active_lp() {
                ZapModal {
                    provider: provider.clone(),
                    token_name: lp_name,
                    decimals: Some(config.token_decimals),
                    onconfirm: handle_confirm,
                    onclose: move |_| active_lp.set(None),
                }
            }
        }
    }
}
