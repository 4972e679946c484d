//! Deposit and withdraw actions.
//!
//! Both actions return as soon as the wallet accepts the transactions for
//! submission. Nothing waits for them to be mined.

use crate::bridge::REFRESH_TEXT;
use crate::presenter::BalancePresenter;
use crate::view::ViewBinding;
use efiat_contracts::protocol::{Accountant, Erc20Token, ReserveHouse};
use efiat_contracts::{parse_base_units, ContractName, ContractRegistry, Submitted, WalletSigner};
use efiat_error::{EfiatError, Result};
use efiat_traits::{Document, Element, WalletProvider};

/// Alert for an empty deposit amount
pub const DEPOSIT_AMOUNT_REQUIRED: &str = "enter deposit amount value!";
/// Alert for a missing or malformed withdraw amount
pub const WITHDRAW_AMOUNT_REQUIRED: &str = "enter withdraw amount value!";
/// Alert for a withdraw larger than the deposited reserves
pub const WITHDRAW_EXCEEDS_RESERVES: &str = "cannot withdraw more than reserves!";

/// The two transactions of an approve-and-deposit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    /// Allowance granted to the reserve house
    pub approval: Submitted,
    /// The deposit itself
    pub deposit: Submitted,
}

/// Text to alert the user with, for errors the user can fix
pub fn alert_text(error: &EfiatError) -> Option<String> {
    match error {
        EfiatError::Validation(message) => Some(message.clone()),
        EfiatError::InsufficientBalance { .. } => Some(WITHDRAW_EXCEEDS_RESERVES.to_string()),
        _ => None,
    }
}

/// Shows user-facing errors as an alert and swallows them; everything else
/// propagates.
pub fn alert_user_facing<D, T>(document: &D, result: Result<T>) -> Result<Option<T>>
where
    D: Document + ?Sized,
{
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => match alert_text(&e) {
            Some(text) => {
                log::debug!("rejected user input: {e}");
                document.alert(&text);
                Ok(None)
            }
            None => Err(e),
        },
    }
}

/// Runs the deposit and withdraw buttons
pub struct ActionController<'a, P, E> {
    contracts: &'a ContractRegistry<P>,
    signer: &'a WalletSigner<P>,
    view: &'a ViewBinding<E>,
    presenter: BalancePresenter<'a, P, E>,
}

impl<'a, P: WalletProvider, E: Element> ActionController<'a, P, E> {
    /// Creates a controller; `presenter` is re-run after a withdraw
    pub fn new(
        contracts: &'a ContractRegistry<P>,
        signer: &'a WalletSigner<P>,
        view: &'a ViewBinding<E>,
        presenter: BalancePresenter<'a, P, E>,
    ) -> Self {
        Self {
            contracts,
            signer,
            view,
            presenter,
        }
    }

    /// Approves the reserve house for the amount in the deposit input, then
    /// deposits it.
    ///
    /// The input text reaches both calls unmodified and must be a plain
    /// decimal or `0x` integer of base units. Empty or malformed input is a
    /// [`EfiatError::Validation`] and submits nothing.
    pub async fn approve_and_deposit(&self) -> Result<Deposit> {
        let raw = self.view.inputs.deposit.value();
        if raw.trim().is_empty() {
            return Err(EfiatError::Validation(DEPOSIT_AMOUNT_REQUIRED.to_string()));
        }

        let weth = Erc20Token::new(self.contracts.require(ContractName::Weth)?);
        let house = ReserveHouse::new(self.contracts.require(ContractName::ReserveHouse)?);

        let approval = weth.approve(house.address()?, &raw).await?;
        log::info!("approval submitted: {}", approval.tx_hash);
        let deposit = house.deposit(&raw).await?;
        log::info!("deposit submitted: {}", deposit.tx_hash);

        self.view.buttons.connect.set_text(REFRESH_TEXT);
        Ok(Deposit { approval, deposit })
    }

    /// Withdraws the amount in the withdraw input, then refreshes the labels.
    ///
    /// The amount is base units, decimal or `0x` hex. Malformed input is a
    /// [`EfiatError::Validation`]; more than the deposited reserves is
    /// [`EfiatError::InsufficientBalance`]. Neither submits anything.
    pub async fn withdraw(&self) -> Result<Submitted> {
        let raw = self.view.inputs.withdraw.value();
        let house = ReserveHouse::new(self.contracts.require(ContractName::ReserveHouse)?);
        let accountant = Accountant::new(self.contracts.require(ContractName::Accountant)?);

        let token_id = house.reserve_token_id().await?;
        let reserves = accountant
            .balance_of(self.signer.account(), token_id)
            .await?;

        let amount = parse_base_units(&raw, WITHDRAW_AMOUNT_REQUIRED)?;
        if amount > reserves {
            return Err(EfiatError::InsufficientBalance {
                have: reserves.to_string(),
                need: amount.to_string(),
            });
        }

        let submitted = house.withdraw(amount).await?;
        log::info!("withdraw submitted: {}", submitted.tx_hash);

        if let Err(e) = self.presenter.refresh().await {
            log::error!("refresh after withdraw failed: {e}");
        }
        Ok(submitted)
    }
}
