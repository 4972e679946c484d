//! Typed views over the proxies for the handful of methods the client uses.

use crate::proxy::{CallArg, ContractProxy, Submitted};
use alloy::primitives::{Address, U256};
use efiat_error::Result;
use efiat_traits::WalletProvider;

/// ERC-20 token: the wrapped collateral and the stable asset
pub struct Erc20Token<'a, P> {
    proxy: &'a ContractProxy<P>,
}

impl<'a, P: WalletProvider> Erc20Token<'a, P> {
    /// Wraps a proxy
    pub fn new(proxy: &'a ContractProxy<P>) -> Self {
        Self { proxy }
    }

    /// Token contract address
    pub fn address(&self) -> Result<Address> {
        self.proxy.address()
    }

    /// Balance of `owner` in base units
    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.proxy.call_uint("balanceOf", &[owner.into()]).await
    }

    /// Allows `spender` to pull `amount`. The amount text is passed through
    /// unmodified.
    pub async fn approve(&self, spender: Address, amount: &str) -> Result<Submitted> {
        self.proxy
            .send("approve", &[spender.into(), CallArg::from(amount)])
            .await
    }
}

/// The house holding deposited collateral
pub struct ReserveHouse<'a, P> {
    proxy: &'a ContractProxy<P>,
}

impl<'a, P: WalletProvider> ReserveHouse<'a, P> {
    /// Wraps a proxy
    pub fn new(proxy: &'a ContractProxy<P>) -> Self {
        Self { proxy }
    }

    /// Reserve house address, the spender for deposits
    pub fn address(&self) -> Result<Address> {
        self.proxy.address()
    }

    /// Accountant token id of deposited reserves
    pub async fn reserve_token_id(&self) -> Result<U256> {
        self.proxy.call_uint("reserveTokenID", &[]).await
    }

    /// Accountant token id of minted coin backed by these reserves
    pub async fn backed_token_id(&self) -> Result<U256> {
        self.proxy.call_uint("backedTokenID", &[]).await
    }

    /// Deposits `amount` of collateral. The amount text is passed through
    /// unmodified.
    pub async fn deposit(&self, amount: &str) -> Result<Submitted> {
        self.proxy.send("deposit", &[CallArg::from(amount)]).await
    }

    /// Withdraws `amount` of collateral
    pub async fn withdraw(&self, amount: U256) -> Result<Submitted> {
        self.proxy.send("withdraw", &[amount.into()]).await
    }
}

/// Multi-token ledger
pub struct Accountant<'a, P> {
    proxy: &'a ContractProxy<P>,
}

impl<'a, P: WalletProvider> Accountant<'a, P> {
    /// Wraps a proxy
    pub fn new(proxy: &'a ContractProxy<P>) -> Self {
        Self { proxy }
    }

    /// Balance of `owner` for ledger token `token_id`
    pub async fn balance_of(&self, owner: Address, token_id: U256) -> Result<U256> {
        self.proxy
            .call_uint("balanceOf", &[owner.into(), token_id.into()])
            .await
    }
}
