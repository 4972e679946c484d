//! The host page as a [`Document`].

use efiat_traits::{Document, Element};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

/// A page element
#[derive(Clone)]
pub struct DomElement {
    inner: web_sys::Element,
}

impl DomElement {
    /// Replaces the element's click handler. The handler lives as long as the
    /// page.
    pub fn on_click(&self, handler: impl FnMut() + 'static) {
        let Some(element) = self.inner.dyn_ref::<HtmlElement>() else {
            log::warn!("#{} cannot take a click handler", self.inner.id());
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(handler);
        element.set_onclick(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }
}

impl Element for DomElement {
    fn set_text(&self, text: &str) {
        self.inner.set_text_content(Some(text));
    }

    fn text(&self) -> String {
        self.inner.text_content().unwrap_or_default()
    }

    fn value(&self) -> String {
        self.inner
            .dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.inner.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.inner.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else {
            let result = if disabled {
                self.inner.set_attribute("disabled", "")
            } else {
                self.inner.remove_attribute("disabled")
            };
            if let Err(e) = result {
                log::error!("could not toggle #{} disabled: {e:?}", self.inner.id());
            }
        }
    }
}

/// The browser document and its window
pub struct DomDocument {
    window: Window,
    document: web_sys::Document,
}

impl DomDocument {
    /// Wraps the window's document
    pub fn new(window: Window, document: web_sys::Document) -> Self {
        Self { window, document }
    }

    /// Text content of element `id`, if present
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }
}

impl Document for DomDocument {
    type Element = DomElement;

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)
            .map(|inner| DomElement { inner })
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert failed: {e:?}");
        }
    }
}
