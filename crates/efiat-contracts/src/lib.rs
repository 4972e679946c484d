//! # eFiat Contracts
//!
//! Loads the protocol's contract descriptors and turns each into a
//! [`ContractProxy`] that issues calls through the user's wallet.
//!
//! A descriptor is a build artifact with an `abi` array and a `networks`
//! mapping of deployments. The loader picks the most recent deployment of each
//! descriptor and binds it to the connected [`WalletSigner`]:
//!
//! ```ignore
//! use efiat_contracts::prelude::*;
//!
//! let signer = WalletSigner::from_account(wallet, &accounts[0])?;
//! let proxies = load_contracts(&source, &["./MockWETH.json"], &signer).await?;
//! let balance = Erc20Token::new(&proxies[0]).balance_of(signer.account()).await?;
//! println!("{}", TokenAmount::from_raw(balance).format_fixed(4));
//! ```
//!
//! Calls are encoded against the descriptor ABI with alloy's dynamic ABI
//! support, so a proxy can call any method its descriptor declares. The typed
//! wrappers in [`protocol`] cover the methods the client itself needs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod amount;
pub use amount::{parse_base_units, parse_uint_literal, TokenAmount, BASE_DECIMALS};
pub mod descriptor;
pub use descriptor::{ContractDescriptor, DeploymentRecord};
mod loader;
pub use loader::load_contracts;
pub mod protocol;
mod proxy;
pub use proxy::{CallArg, ContractProxy, Submitted};
pub mod registry;
pub use registry::{ContractName, ContractRegistry};
mod signer;
pub use signer::WalletSigner;

pub use alloy;

/// Commonly used items
pub mod prelude {
    pub use crate::protocol::{Accountant, Erc20Token, ReserveHouse};
    pub use crate::{
        load_contracts, parse_base_units, CallArg, ContractName, ContractProxy, ContractRegistry,
        Submitted, TokenAmount, WalletSigner,
    };
    pub use alloy::primitives::{Address, U256};
}
