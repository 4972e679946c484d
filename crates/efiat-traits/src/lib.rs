//! # eFiat Traits
//!
//! Seams between the eFiat client logic and the three things it does not own:
//! the injected wallet extension, the location the contract descriptors are
//! served from, and the host page.
//!
//! ## Core Traits
//!
//! - [`WalletProvider`] - EIP-1193 style request/response wallet
//! - [`DescriptorSource`] - Fetches a JSON document by location
//! - [`Document`] / [`Element`] - Element lookup, text sinks, input sources
//!
//! Everything runs on the browser's single event loop, so the async traits are
//! declared `?Send` and implementations are free to hold `JsValue`s.
//!
//! ## Example
//!
//! ```ignore
//! use efiat_traits::prelude::*;
//!
//! async fn first_account<W: WalletProvider>(wallet: &W) -> Option<String> {
//!     wallet.request_accounts().await.ok()?.into_iter().next()
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use efiat_error::{EfiatError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::rc::Rc;

/// JSON-RPC method names issued through the wallet provider
pub mod rpc {
    /// Prompts the user to expose their accounts to the page
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    /// Read-only contract call
    pub const CALL: &str = "eth_call";
    /// Signs and submits a transaction from the connected account
    pub const SEND_TRANSACTION: &str = "eth_sendTransaction";
    /// Native currency balance of an address
    pub const GET_BALANCE: &str = "eth_getBalance";
}

/// Represents a transaction hash returned by the wallet on submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl TxHash {
    /// Creates a new TxHash from a string
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TxHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TxHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An injected browser wallet speaking the EIP-1193 request interface.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Returns true when the extension is injected and identifies as the
    /// supported vendor
    fn is_installed(&self) -> bool;

    /// Issues a JSON-RPC request and resolves with the raw result
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Starts the vendor's install flow. The page is expected to reload
    /// once the extension is installed.
    fn start_onboarding(&self, forwarder_origin: &str) -> Result<()>;

    /// Asks the user to connect and returns the exposed accounts in wallet order
    async fn request_accounts(&self) -> Result<Vec<String>> {
        let value = self.request(rpc::REQUEST_ACCOUNTS, json!([])).await?;
        serde_json::from_value(value).map_err(|e| EfiatError::remote(rpc::REQUEST_ACCOUNTS, e))
    }
}

#[async_trait(?Send)]
impl<T: WalletProvider + ?Sized> WalletProvider for Rc<T> {
    fn is_installed(&self) -> bool {
        (**self).is_installed()
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        (**self).request(method, params).await
    }

    fn start_onboarding(&self, forwarder_origin: &str) -> Result<()> {
        (**self).start_onboarding(forwarder_origin)
    }
}

/// Somewhere contract descriptors can be fetched from
#[async_trait(?Send)]
pub trait DescriptorSource {
    /// Fetches and parses the JSON document at `location`.
    ///
    /// Fails with [`EfiatError::Fetch`] when the document is unreachable or
    /// not valid JSON.
    async fn fetch_json(&self, location: &str) -> Result<Value>;
}

/// A single page element. Labels are written, inputs are read, buttons are
/// toggled; one trait covers all three.
pub trait Element {
    /// Replaces the element's text
    fn set_text(&self, text: &str);

    /// Returns the element's current text
    fn text(&self) -> String;

    /// Returns the current value of an input element
    fn value(&self) -> String;

    /// Enables or disables the element
    fn set_disabled(&self, disabled: bool);
}

/// The host page
pub trait Document {
    /// Element handle type
    type Element: Element;

    /// Looks up an element by id
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Shows a blocking message to the user
    fn alert(&self, message: &str);
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{rpc, DescriptorSource, Document, Element, TxHash, WalletProvider};
}
