//! Application session: everything initialization produces, built once and
//! only read by the click handlers afterwards.

use crate::bridge::{WalletBridge, WalletState};
use crate::config::AppConfig;
use crate::controller::{alert_user_facing, ActionController, Deposit};
use crate::presenter::BalancePresenter;
use crate::view::ViewBinding;
use efiat_contracts::{load_contracts, ContractRegistry, Submitted, WalletSigner};
use efiat_error::{EfiatError, Result};
use efiat_traits::{rpc, DescriptorSource, Document, WalletProvider};
use std::rc::Rc;

/// Result of initialization
pub enum Startup<P, D: Document> {
    /// No wallet installed; the connect button offers onboarding
    Onboarding(Onboarding<P, D>),
    /// Wallet connected and contracts loaded
    Ready(Session<P, D>),
}

/// Page state while the wallet is missing
pub struct Onboarding<P, D: Document> {
    bridge: WalletBridge<P>,
    view: ViewBinding<D::Element>,
}

impl<P: WalletProvider, D: Document> Onboarding<P, D> {
    /// Connect button handler: starts the vendor install flow
    pub fn on_install_click(&self) -> Result<()> {
        self.bridge.start_onboarding(&self.view.buttons.connect)
    }

    /// Bound page elements
    pub fn view(&self) -> &ViewBinding<D::Element> {
        &self.view
    }
}

/// A connected session
pub struct Session<P, D: Document> {
    config: AppConfig,
    document: Rc<D>,
    view: ViewBinding<D::Element>,
    accounts: Vec<String>,
    signer: WalletSigner<P>,
    contracts: ContractRegistry<P>,
}

impl<P: WalletProvider, D: Document> Session<P, D> {
    /// Validates `config`, binds the page, detects the wallet and, when it is
    /// installed, connects it and loads every configured contract.
    ///
    /// Configuration, binding, descriptor and connection failures all abort
    /// startup.
    pub async fn initialize<S>(
        config: AppConfig,
        provider: Rc<P>,
        source: &S,
        document: Rc<D>,
    ) -> Result<Startup<P, D>>
    where
        S: DescriptorSource + ?Sized,
    {
        config.validate()?;
        let view = ViewBinding::bind(&*document, &config.element_ids)?;
        let bridge = WalletBridge::new(provider, config.forwarder_origin.clone());

        if bridge.prepare_button(&view.buttons.connect) == WalletState::Uninstalled {
            log::warn!("no wallet extension found, offering onboarding");
            return Ok(Startup::Onboarding(Onboarding { bridge, view }));
        }

        let accounts = bridge.connect().await?.into_accounts();
        let first = accounts
            .first()
            .ok_or_else(|| {
                EfiatError::remote(rpc::REQUEST_ACCOUNTS, "wallet exposed no accounts")
            })?;
        let signer = WalletSigner::from_account(Rc::clone(bridge.provider()), first)?;

        let proxies = load_contracts(source, &config.locations(), &signer).await?;
        let contracts = ContractRegistry::from_loaded(&config.names(), proxies)?;
        log::info!("session ready with {} contracts", contracts.len());

        Ok(Startup::Ready(Session {
            config,
            document,
            view,
            accounts,
            signer,
            contracts,
        }))
    }

    /// Configuration the session was built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Bound page elements
    pub fn view(&self) -> &ViewBinding<D::Element> {
        &self.view
    }

    /// Accounts the wallet exposed at startup
    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    /// Signer for the first account
    pub fn signer(&self) -> &WalletSigner<P> {
        &self.signer
    }

    /// Loaded contracts
    pub fn contracts(&self) -> &ContractRegistry<P> {
        &self.contracts
    }

    /// Balance presenter over this session
    pub fn presenter(&self) -> BalancePresenter<'_, P, D::Element> {
        BalancePresenter::new(
            &self.contracts,
            &self.signer,
            &self.accounts,
            &self.view,
            self.config.precision,
        )
    }

    /// Action controller over this session
    pub fn controller(&self) -> ActionController<'_, P, D::Element> {
        ActionController::new(&self.contracts, &self.signer, &self.view, self.presenter())
    }

    /// Connect button handler. Failures are logged only.
    pub async fn on_connect(&self) {
        if let Err(e) = self.presenter().refresh().await {
            log::error!("refresh failed: {e}");
        }
    }

    /// Deposit button handler. Input errors are alerted and yield `None`;
    /// submission failures propagate.
    pub async fn on_deposit(&self) -> Result<Option<Deposit>> {
        let result = self.controller().approve_and_deposit().await;
        alert_user_facing(&*self.document, result)
    }

    /// Withdraw button handler. Input errors are alerted and yield `None`;
    /// submission failures propagate.
    pub async fn on_withdraw(&self) -> Result<Option<Submitted>> {
        let result = self.controller().withdraw().await;
        alert_user_facing(&*self.document, result)
    }
}
