use dioxus::prelude::*;

mod config;
mod zap;
mod components;

use components::*;
use config::ZapConfig;
use zap::{SharedProvider, ZapperClient};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    ZapView {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // The renderer may already own the global logger
    let _ = env_logger::try_init();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(ZapConfig::from_env);
    use_context_provider(move || {
        log::info!("Using finance gateway at {}", config.gateway_url);
        SharedProvider::new(ZapperClient::new(&config))
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
