//! Renders the connected account's balances into the page.

use crate::config::DisplayPrecision;
use crate::view::ViewBinding;
use efiat_contracts::alloy::primitives::U256;
use efiat_contracts::protocol::{Accountant, Erc20Token, ReserveHouse};
use efiat_contracts::{ContractName, ContractRegistry, TokenAmount, WalletSigner};
use efiat_error::Result;
use efiat_traits::{Element, WalletProvider};

/// Account label text when the wallet exposed nothing
pub const NO_ACCOUNT_TEXT: &str = "Not able to get accounts";

/// Writes balances into the bound labels. Borrowed from the session for the
/// length of one refresh.
pub struct BalancePresenter<'a, P, E> {
    contracts: &'a ContractRegistry<P>,
    signer: &'a WalletSigner<P>,
    accounts: &'a [String],
    view: &'a ViewBinding<E>,
    precision: DisplayPrecision,
}

impl<'a, P: WalletProvider, E: Element> BalancePresenter<'a, P, E> {
    /// Creates a presenter
    pub fn new(
        contracts: &'a ContractRegistry<P>,
        signer: &'a WalletSigner<P>,
        accounts: &'a [String],
        view: &'a ViewBinding<E>,
        precision: DisplayPrecision,
    ) -> Self {
        Self {
            contracts,
            signer,
            accounts,
            view,
            precision,
        }
    }

    /// Re-renders every label.
    ///
    /// The account and native balance are written together once the balance
    /// read succeeds; if it fails nothing is written. The four token reads
    /// then run concurrently and each writes only its own label; one failing
    /// read leaves the others untouched. The first failure is returned once
    /// all four have settled.
    pub async fn refresh(&self) -> Result<()> {
        let native = self.signer.native_balance().await?;
        let labels = &self.view.labels;
        labels.account.set_text(
            self.accounts
                .first()
                .map(String::as_str)
                .unwrap_or(NO_ACCOUNT_TEXT),
        );
        labels
            .native_balance
            .set_text(&self.collateral(native.into()));

        let (weth, reserves, fiat, minted) = futures::join!(
            self.load_weth_balance(),
            self.load_reserves(),
            self.load_fiat_balance(),
            self.load_minted(),
        );
        let results = [
            ("wrapped collateral", weth),
            ("deposited reserves", reserves),
            ("stable asset", fiat),
            ("minted stable asset", minted),
        ];

        let mut first_error = None;
        for (what, result) in results {
            if let Err(e) = result {
                log::warn!("could not load {what} balance: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn load_weth_balance(&self) -> Result<()> {
        let weth = Erc20Token::new(self.contracts.require(ContractName::Weth)?);
        let balance = weth.balance_of(self.signer.account()).await?;
        let labels = &self.view.labels;
        labels.weth_address.set_text(&weth.address()?.to_string());
        labels.weth_balance.set_text(&self.collateral(balance.into()));
        Ok(())
    }

    async fn load_reserves(&self) -> Result<()> {
        let house = ReserveHouse::new(self.contracts.require(ContractName::ReserveHouse)?);
        let token_id = house.reserve_token_id().await?;
        let balance = self.accountant_balance(token_id).await?;
        self.view
            .labels
            .reserves
            .set_text(&self.collateral(balance.into()));
        Ok(())
    }

    async fn load_fiat_balance(&self) -> Result<()> {
        let fiat = Erc20Token::new(self.contracts.require(ContractName::Fiat)?);
        let balance = fiat.balance_of(self.signer.account()).await?;
        self.view
            .labels
            .fiat_balance
            .set_text(&self.stable(balance.into()));
        Ok(())
    }

    async fn load_minted(&self) -> Result<()> {
        let house = ReserveHouse::new(self.contracts.require(ContractName::ReserveHouse)?);
        let token_id = house.backed_token_id().await?;
        let balance = self.accountant_balance(token_id).await?;
        self.view.labels.minted.set_text(&self.stable(balance.into()));
        Ok(())
    }

    async fn accountant_balance(&self, token_id: U256) -> Result<U256> {
        Accountant::new(self.contracts.require(ContractName::Accountant)?)
            .balance_of(self.signer.account(), token_id)
            .await
    }

    fn collateral(&self, amount: TokenAmount) -> String {
        amount.format_fixed(self.precision.collateral)
    }

    fn stable(&self, amount: TokenAmount) -> String {
        amount.format_fixed(self.precision.stable)
    }
}
