//! # eFiat
//!
//! Browser-independent core of the eFiat dApp: connects the user's wallet,
//! loads the protocol contracts, renders balances and runs the deposit and
//! withdraw actions.
//!
//! ## Flow
//!
//! 1. [`Session::initialize`] validates the [`AppConfig`], binds the page
//!    ([`ViewBinding`]) and detects the wallet ([`WalletBridge`]).
//! 2. Without a wallet it yields [`Startup::Onboarding`]; the connect button
//!    then starts the vendor install flow.
//! 3. With a wallet it requests accounts, loads every configured descriptor
//!    and yields a ready [`Session`].
//! 4. Click handlers call [`Session::on_connect`], [`Session::on_deposit`] and
//!    [`Session::on_withdraw`].
//!
//! ```ignore
//! use efiat::prelude::*;
//!
//! match Session::initialize(AppConfig::default(), wallet, &source, document).await? {
//!     Startup::Ready(session) => session.on_connect().await,
//!     Startup::Onboarding(page) => page.on_install_click()?,
//! }
//! ```
//!
//! The wallet, descriptor source and page are traits from `efiat-traits`; the
//! `efiat-wasm` crate implements them over `web-sys`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bridge;
pub mod config;
pub mod controller;
pub mod presenter;
pub mod session;
pub mod view;

pub use bridge::{WalletBridge, WalletState};
pub use config::{AppConfig, ContractEntry, DisplayPrecision};
pub use controller::{ActionController, Deposit};
pub use presenter::BalancePresenter;
pub use session::{Onboarding, Session, Startup};
pub use view::{ElementIds, ViewBinding};

pub use efiat_contracts as contracts;
pub use efiat_error::{EfiatError, ErrorCode, Result};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        AppConfig, EfiatError, ElementIds, Onboarding, Result, Session, Startup, WalletState,
    };
    pub use efiat_contracts::{ContractName, Submitted, TokenAmount};
    pub use efiat_traits::prelude::*;
}
