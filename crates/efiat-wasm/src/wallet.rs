//! `window.ethereum` as a [`WalletProvider`].

use async_trait::async_trait;
use efiat_error::{EfiatError, Result};
use efiat_traits::WalletProvider;
use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

#[wasm_bindgen]
extern "C" {
    /// The vendor onboarding library, loaded by the page as a global
    type MetaMaskOnboarding;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> std::result::Result<MetaMaskOnboarding, JsValue>;

    #[wasm_bindgen(method, catch, js_name = startOnboarding)]
    fn start_onboarding(this: &MetaMaskOnboarding) -> std::result::Result<(), JsValue>;
}

/// The injected EIP-1193 provider, if any
pub struct BrowserWallet {
    ethereum: Option<JsValue>,
}

impl BrowserWallet {
    /// Looks up `window.ethereum`
    pub fn from_window(window: &Window) -> Self {
        let ethereum = Reflect::get(window, &JsValue::from_str("ethereum"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null());
        Self { ethereum }
    }

    fn ethereum(&self, method: &str) -> Result<&JsValue> {
        self.ethereum
            .as_ref()
            .ok_or_else(|| EfiatError::remote(method, "window.ethereum is not available"))
    }
}

#[async_trait(?Send)]
impl WalletProvider for BrowserWallet {
    fn is_installed(&self) -> bool {
        self.ethereum
            .as_ref()
            .and_then(|ethereum| Reflect::get(ethereum, &JsValue::from_str("isMetaMask")).ok())
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false)
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let ethereum = self.ethereum(method)?;
        let remote = |e: JsValue| EfiatError::remote(method, js_error_message(&e));

        let args = Object::new();
        Reflect::set(&args, &"method".into(), &JsValue::from_str(method)).map_err(remote)?;
        Reflect::set(&args, &"params".into(), &to_js(method, &params)?).map_err(remote)?;

        let request: Function = Reflect::get(ethereum, &"request".into())
            .map_err(remote)?
            .dyn_into()
            .map_err(|_| EfiatError::remote(method, "ethereum.request is not a function"))?;
        let promise: Promise = request
            .call1(ethereum, &args)
            .map_err(remote)?
            .dyn_into()
            .map_err(|_| EfiatError::remote(method, "ethereum.request did not return a promise"))?;

        let result = JsFuture::from(promise).await.map_err(remote)?;
        log::trace!("{method} resolved");
        serde_wasm_bindgen::from_value(result).map_err(|e| EfiatError::remote(method, e))
    }

    fn start_onboarding(&self, forwarder_origin: &str) -> Result<()> {
        let onboarding_error = |e: JsValue| {
            EfiatError::Other(format!("wallet onboarding failed: {}", js_error_message(&e)))
        };

        let options = Object::new();
        Reflect::set(
            &options,
            &"forwarderOrigin".into(),
            &JsValue::from_str(forwarder_origin),
        )
        .map_err(onboarding_error)?;
        MetaMaskOnboarding::new(&options)
            .and_then(|onboarding| onboarding.start_onboarding())
            .map_err(onboarding_error)
    }
}

fn to_js(method: &str, params: &Value) -> Result<JsValue> {
    params
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| EfiatError::remote(method, e))
}

/// Best-effort text of a thrown JS value: `message` of an Error or an
/// EIP-1193 provider error, the value itself if it is a string
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
