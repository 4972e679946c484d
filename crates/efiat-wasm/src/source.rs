//! Descriptor documents fetched over HTTP from the page's origin.

use crate::wallet::js_error_message;
use async_trait::async_trait;
use efiat_error::{EfiatError, Result};
use efiat_traits::DescriptorSource;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

/// Fetches descriptors with the browser `fetch` API
pub struct FetchSource {
    window: Window,
}

impl FetchSource {
    /// Creates a source fetching through `window`
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl DescriptorSource for FetchSource {
    async fn fetch_json(&self, location: &str) -> Result<Value> {
        let fetch_error =
            |e: wasm_bindgen::JsValue| EfiatError::fetch(location, js_error_message(&e));

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);
        let request = Request::new_with_str_and_init(location, &opts).map_err(fetch_error)?;

        let response: Response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(fetch_error)?
            .dyn_into()
            .map_err(|_| EfiatError::fetch(location, "fetch did not return a Response"))?;
        if !response.ok() {
            return Err(EfiatError::fetch(
                location,
                format!("HTTP {} {}", response.status(), response.status_text()),
            ));
        }

        let text = JsFuture::from(response.text().map_err(fetch_error)?)
            .await
            .map_err(fetch_error)?
            .as_string()
            .ok_or_else(|| EfiatError::fetch(location, "response body is not text"))?;
        // parsed here rather than by the browser so key order is kept as written
        serde_json::from_str(&text).map_err(|e| EfiatError::fetch(location, e))
    }
}
