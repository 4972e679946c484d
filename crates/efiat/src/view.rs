//! Typed access to the page elements the client reads and writes.

use efiat_error::{EfiatError, Result};
use efiat_traits::{Document, Element};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ids of every element the page must provide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    /// Install / connect / refresh button
    pub connect_button: String,
    /// Approve-and-deposit button
    pub deposit_button: String,
    /// Withdraw button
    pub withdraw_button: String,
    /// Mint button (no handler)
    pub mint_button: String,
    /// Payback button (no handler)
    pub payback_button: String,

    /// Deposit amount input
    pub deposit_input: String,
    /// Withdraw amount input
    pub withdraw_input: String,
    /// Mint amount input
    pub mint_input: String,
    /// Reserve address input
    pub reserve_address_input: String,
    /// Payback amount input
    pub payback_input: String,

    /// Connected account
    pub account_label: String,
    /// Native currency balance
    pub native_balance_label: String,
    /// Wrapped collateral contract address
    pub weth_address_label: String,
    /// Wrapped collateral balance
    pub weth_balance_label: String,
    /// Deposited reserves
    pub reserves_label: String,
    /// Reserves locked against minted coin
    pub locked_reserves_label: String,
    /// Stable asset balance
    pub fiat_balance_label: String,
    /// Minted stable asset
    pub minted_label: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            connect_button: "connectButton".into(),
            deposit_button: "depositButton".into(),
            withdraw_button: "withdrawButton".into(),
            mint_button: "mintButton".into(),
            payback_button: "paybackButton".into(),
            deposit_input: "wethDepositInput".into(),
            withdraw_input: "wethWithdrawInput".into(),
            mint_input: "efiatMintInput".into(),
            reserve_address_input: "reserveAddrToUse".into(),
            payback_input: "efiatPaybackInput".into(),
            account_label: "getAccountsResult".into(),
            native_balance_label: "getAccountBalance".into(),
            weth_address_label: "mockwethAddr".into(),
            weth_balance_label: "getWETHBalance".into(),
            reserves_label: "yourReserves".into(),
            locked_reserves_label: "lockedReserves".into(),
            fiat_balance_label: "getEFIATBalance".into(),
            minted_label: "yourMinted".into(),
        }
    }
}

impl ElementIds {
    /// All ids in page order: buttons, inputs, labels
    pub fn all(&self) -> [&str; 18] {
        [
            self.connect_button.as_str(),
            self.deposit_button.as_str(),
            self.withdraw_button.as_str(),
            self.mint_button.as_str(),
            self.payback_button.as_str(),
            self.deposit_input.as_str(),
            self.withdraw_input.as_str(),
            self.mint_input.as_str(),
            self.reserve_address_input.as_str(),
            self.payback_input.as_str(),
            self.account_label.as_str(),
            self.native_balance_label.as_str(),
            self.weth_address_label.as_str(),
            self.weth_balance_label.as_str(),
            self.reserves_label.as_str(),
            self.locked_reserves_label.as_str(),
            self.fiat_balance_label.as_str(),
            self.minted_label.as_str(),
        ]
    }

    /// Ids must be non-empty and distinct
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in self.all() {
            if id.trim().is_empty() {
                return Err(EfiatError::Config("element id must not be empty".into()));
            }
            if !seen.insert(id) {
                return Err(EfiatError::Config(format!("element id '{id}' used twice")));
            }
        }
        Ok(())
    }
}

/// The page's buttons
pub struct Buttons<E> {
    /// Install / connect / refresh
    pub connect: E,
    /// Approve-and-deposit
    pub deposit: E,
    /// Withdraw
    pub withdraw: E,
    /// Mint
    pub mint: E,
    /// Payback
    pub payback: E,
}

/// The page's inputs
pub struct Inputs<E> {
    /// Deposit amount
    pub deposit: E,
    /// Withdraw amount
    pub withdraw: E,
    /// Mint amount
    pub mint: E,
    /// Reserve address
    pub reserve_address: E,
    /// Payback amount
    pub payback: E,
}

/// The page's display labels
pub struct Labels<E> {
    /// Connected account
    pub account: E,
    /// Native balance
    pub native_balance: E,
    /// Wrapped collateral address
    pub weth_address: E,
    /// Wrapped collateral balance
    pub weth_balance: E,
    /// Deposited reserves
    pub reserves: E,
    /// Locked reserves
    pub locked_reserves: E,
    /// Stable asset balance
    pub fiat_balance: E,
    /// Minted stable asset
    pub minted: E,
}

/// Every element handle, resolved once at startup
pub struct ViewBinding<E> {
    /// Buttons
    pub buttons: Buttons<E>,
    /// Inputs
    pub inputs: Inputs<E>,
    /// Labels
    pub labels: Labels<E>,
}

impl<E: Element> ViewBinding<E> {
    /// Resolves every id against `document`.
    ///
    /// Fails with a single [`EfiatError::ViewBinding`] naming every missing
    /// id. Mint and payback have no handler and are disabled here.
    pub fn bind<D>(document: &D, ids: &ElementIds) -> Result<Self>
    where
        D: Document<Element = E> + ?Sized,
    {
        let mut missing = Vec::new();
        let mut lookup = |id: &str| {
            let element = document.element_by_id(id);
            if element.is_none() {
                missing.push(id.to_string());
            }
            element
        };

        let connect = lookup(&ids.connect_button);
        let deposit = lookup(&ids.deposit_button);
        let withdraw = lookup(&ids.withdraw_button);
        let mint = lookup(&ids.mint_button);
        let payback = lookup(&ids.payback_button);

        let deposit_input = lookup(&ids.deposit_input);
        let withdraw_input = lookup(&ids.withdraw_input);
        let mint_input = lookup(&ids.mint_input);
        let reserve_address = lookup(&ids.reserve_address_input);
        let payback_input = lookup(&ids.payback_input);

        let account = lookup(&ids.account_label);
        let native_balance = lookup(&ids.native_balance_label);
        let weth_address = lookup(&ids.weth_address_label);
        let weth_balance = lookup(&ids.weth_balance_label);
        let reserves = lookup(&ids.reserves_label);
        let locked_reserves = lookup(&ids.locked_reserves_label);
        let fiat_balance = lookup(&ids.fiat_balance_label);
        let minted = lookup(&ids.minted_label);

        let binding = (|| {
            Some(Self {
                buttons: Buttons {
                    connect: connect?,
                    deposit: deposit?,
                    withdraw: withdraw?,
                    mint: mint?,
                    payback: payback?,
                },
                inputs: Inputs {
                    deposit: deposit_input?,
                    withdraw: withdraw_input?,
                    mint: mint_input?,
                    reserve_address: reserve_address?,
                    payback: payback_input?,
                },
                labels: Labels {
                    account: account?,
                    native_balance: native_balance?,
                    weth_address: weth_address?,
                    weth_balance: weth_balance?,
                    reserves: reserves?,
                    locked_reserves: locked_reserves?,
                    fiat_balance: fiat_balance?,
                    minted: minted?,
                },
            })
        })();

        match binding {
            Some(binding) if missing.is_empty() => {
                binding.buttons.mint.set_disabled(true);
                binding.buttons.payback.set_disabled(true);
                log::debug!("bound {} page elements", ids.all().len());
                Ok(binding)
            }
            _ => Err(EfiatError::ViewBinding(missing.join(", "))),
        }
    }
}
