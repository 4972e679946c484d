use alloy::primitives::{Address, U256};
use efiat_error::{EfiatError, Result};
use efiat_traits::{rpc, TxHash, WalletProvider};
use serde_json::{json, Value};
use std::rc::Rc;

/// The connected account, able to read through and submit transactions via
/// the wallet extension.
pub struct WalletSigner<P> {
    provider: Rc<P>,
    account: Address,
}

impl<P> Clone for WalletSigner<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            account: self.account,
        }
    }
}

impl<P: WalletProvider> WalletSigner<P> {
    /// Binds a signer to `account`
    pub fn new(provider: Rc<P>, account: Address) -> Self {
        Self { provider, account }
    }

    /// Parses the account string returned by the wallet and binds a signer to it
    pub fn from_account(provider: Rc<P>, account: &str) -> Result<Self> {
        let account: Address = account.parse().map_err(|e| {
            EfiatError::remote(rpc::REQUEST_ACCOUNTS, format!("invalid account '{account}': {e}"))
        })?;
        Ok(Self::new(provider, account))
    }

    /// Returns the signing account
    pub fn account(&self) -> Address {
        self.account
    }

    /// Returns the underlying wallet provider
    pub fn provider(&self) -> &Rc<P> {
        &self.provider
    }

    /// Executes a read-only call and returns the raw return data
    pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let params = json!([
            {
                "from": self.account.to_string(),
                "to": to.to_string(),
                "data": encode_hex(data),
            },
            "latest"
        ]);
        let value = self.provider.request(rpc::CALL, params).await?;
        decode_hex(rpc::CALL, &value)
    }

    /// Submits a transaction and returns as soon as the wallet hands back its
    /// hash. Inclusion is not awaited.
    pub async fn send_transaction(&self, to: Address, data: &[u8]) -> Result<TxHash> {
        let params = json!([{
            "from": self.account.to_string(),
            "to": to.to_string(),
            "data": encode_hex(data),
        }]);
        let value = self.provider.request(rpc::SEND_TRANSACTION, params).await?;
        value
            .as_str()
            .map(TxHash::from)
            .ok_or_else(|| {
                EfiatError::remote(rpc::SEND_TRANSACTION, format!("unexpected result {value}"))
            })
    }

    /// Native currency balance of the signing account, in base units
    pub async fn native_balance(&self) -> Result<U256> {
        let params = json!([self.account.to_string(), "latest"]);
        let value = self.provider.request(rpc::GET_BALANCE, params).await?;
        let quantity = value.as_str().ok_or_else(|| {
            EfiatError::remote(rpc::GET_BALANCE, format!("unexpected result {value}"))
        })?;
        let digits = quantity.trim_start_matches("0x");
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str_radix(digits, 16).map_err(|e| {
            EfiatError::remote(rpc::GET_BALANCE, format!("invalid quantity '{quantity}': {e}"))
        })
    }
}

fn encode_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn decode_hex(method: &str, value: &Value) -> Result<Vec<u8>> {
    let text = value
        .as_str()
        .ok_or_else(|| EfiatError::remote(method, format!("unexpected result {value}")))?;
    hex::decode(text.trim_start_matches("0x")).map_err(|e| EfiatError::remote(method, e))
}
