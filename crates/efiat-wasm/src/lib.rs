//! # eFiat WASM
//!
//! Browser host for the eFiat dApp. Loading the module wires the page:
//!
//! ```html
//! <script src="https://unpkg.com/@metamask/onboarding/dist/metamask-onboarding.bundle.js"></script>
//! <script id="efiat-config" type="application/json">
//!   { "forwarderOrigin": "http://localhost:9010" }
//! </script>
//! <script type="module">
//!   import init from './pkg/efiat_wasm.js';
//!   init();
//! </script>
//! ```
//!
//! The inline config is optional; without it the defaults from
//! [`AppConfig::default`] apply.

use efiat::{AppConfig, Session, Startup};
use efiat_error::{EfiatError, Result};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod dom;
mod source;
mod wallet;

pub use dom::{DomDocument, DomElement};
pub use source::FetchSource;
pub use wallet::BrowserWallet;

/// Id of the optional inline JSON configuration
pub const CONFIG_SCRIPT_ID: &str = "efiat-config";

// Initialize panic hook for better error messages in browser console
#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

// ============================================================================
// Initialization
// ============================================================================

/// Module entry point: installs the console hooks and starts the app once the
/// DOM is ready.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::error!("eFiat needs a browser window");
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| spawn_local(run_logged()));
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::error!("could not wait for the page to load: {e:?}");
        }
    } else {
        spawn_local(run_logged());
    }
}

/// Returns the eFiat WASM version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

async fn run_logged() {
    if let Err(e) = run().await {
        log::error!("eFiat failed to start ({:?}): {e}", e.code());
    }
}

async fn run() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| EfiatError::Other("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| EfiatError::Other("no document".into()))?;
    let page = Rc::new(DomDocument::new(window.clone(), document));
    let config = config_from_script(page.text_of(CONFIG_SCRIPT_ID))?;

    let wallet = Rc::new(BrowserWallet::from_window(&window));
    let source = FetchSource::new(window);

    match Session::initialize(config, wallet, &source, page).await? {
        Startup::Onboarding(onboarding) => {
            let onboarding = Rc::new(onboarding);
            let handler = Rc::clone(&onboarding);
            onboarding.view().buttons.connect.on_click(move || {
                if let Err(e) = handler.on_install_click() {
                    log::error!("{e}");
                }
            });
        }
        Startup::Ready(session) => bind_actions(Rc::new(session)),
    }
    Ok(())
}

// ============================================================================
// Click handlers
// ============================================================================

fn bind_actions(session: Rc<Session<BrowserWallet, DomDocument>>) {
    let buttons = &session.view().buttons;

    let s = Rc::clone(&session);
    buttons.connect.on_click(move || {
        let s = Rc::clone(&s);
        spawn_local(async move { s.on_connect().await });
    });

    let s = Rc::clone(&session);
    buttons.deposit.on_click(move || {
        let s = Rc::clone(&s);
        spawn_local(async move {
            if let Err(e) = s.on_deposit().await {
                log::error!("deposit failed: {e}");
            }
        });
    });

    let s = Rc::clone(&session);
    buttons.withdraw.on_click(move || {
        let s = Rc::clone(&s);
        spawn_local(async move {
            if let Err(e) = s.on_withdraw().await {
                log::error!("withdraw failed: {e}");
            }
        });
    });
}

/// Configuration from the inline script's text, or the defaults when the page
/// has none
pub fn config_from_script(text: Option<String>) -> Result<AppConfig> {
    match text {
        Some(text) if !text.trim().is_empty() => AppConfig::from_json(&text),
        _ => Ok(AppConfig::default()),
    }
}
