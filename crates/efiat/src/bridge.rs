//! Wallet detection, onboarding and account access.

use efiat_error::{EfiatError, Result};
use efiat_traits::{rpc, Element, WalletProvider};
use std::rc::Rc;

/// Connect button text when no wallet is installed
pub const INSTALL_TEXT: &str = "Click here to install MetaMask!";
/// Connect button text once onboarding was started
pub const ONBOARDING_TEXT: &str = "Onboarding in progress";
/// Connect button text when a wallet is installed
pub const CONNECT_TEXT: &str = "Connect";
/// Connect button text after a deposit was submitted
pub const REFRESH_TEXT: &str = "Refresh";

/// Where the page stands with the user's wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletState {
    /// No supported extension injected
    Uninstalled,
    /// Extension present, accounts not yet exposed
    InstalledDisconnected,
    /// Accounts exposed, in wallet order. Terminal.
    Connected(Vec<String>),
}

impl WalletState {
    /// True unless the extension is missing
    pub fn is_installed(&self) -> bool {
        !matches!(self, Self::Uninstalled)
    }

    /// Exposed accounts, once connected
    pub fn accounts(&self) -> Option<&[String]> {
        match self {
            Self::Connected(accounts) => Some(accounts),
            _ => None,
        }
    }

    /// Exposed accounts; empty unless connected
    pub fn into_accounts(self) -> Vec<String> {
        match self {
            Self::Connected(accounts) => accounts,
            _ => Vec::new(),
        }
    }

    /// Text the connect button shows in this state
    pub fn button_text(&self) -> &'static str {
        match self {
            Self::Uninstalled => INSTALL_TEXT,
            Self::InstalledDisconnected | Self::Connected(_) => CONNECT_TEXT,
        }
    }
}

/// Drives the wallet through detection and connection
pub struct WalletBridge<P> {
    provider: Rc<P>,
    forwarder_origin: String,
}

impl<P: WalletProvider> WalletBridge<P> {
    /// Creates a bridge over `provider`
    pub fn new(provider: Rc<P>, forwarder_origin: impl Into<String>) -> Self {
        Self {
            provider,
            forwarder_origin: forwarder_origin.into(),
        }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &Rc<P> {
        &self.provider
    }

    /// Detects the extension without prompting the user
    pub fn detect(&self) -> WalletState {
        if self.provider.is_installed() {
            WalletState::InstalledDisconnected
        } else {
            WalletState::Uninstalled
        }
    }

    /// Detects the extension and labels and enables the connect button
    pub fn prepare_button<E: Element>(&self, button: &E) -> WalletState {
        let state = self.detect();
        button.set_text(state.button_text());
        button.set_disabled(false);
        log::debug!("wallet state at startup: {state:?}");
        state
    }

    /// Install click: starts the vendor onboarding flow. The page stays in
    /// this state until it is reloaded.
    pub fn start_onboarding<E: Element>(&self, button: &E) -> Result<()> {
        button.set_text(ONBOARDING_TEXT);
        button.set_disabled(true);
        log::info!("starting wallet onboarding via {}", self.forwarder_origin);
        self.provider.start_onboarding(&self.forwarder_origin)
    }

    /// Requests account access. An empty account list is a
    /// [`EfiatError::RemoteCall`].
    pub async fn connect(&self) -> Result<WalletState> {
        let accounts = self.provider.request_accounts().await?;
        if accounts.is_empty() {
            return Err(EfiatError::remote(
                rpc::REQUEST_ACCOUNTS,
                "wallet exposed no accounts",
            ));
        }
        log::info!("wallet connected with {} account(s)", accounts.len());
        Ok(WalletState::Connected(accounts))
    }
}
