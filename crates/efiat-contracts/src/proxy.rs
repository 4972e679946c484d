use crate::amount::parse_uint_literal;
use crate::descriptor::DeploymentRecord;
use crate::signer::WalletSigner;
use alloy::dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, U256};
use efiat_error::{EfiatError, Result};
use efiat_traits::{TxHash, WalletProvider};
use std::fmt;
use std::rc::Rc;

/// An argument to a contract method.
///
/// `Literal` is a raw string coerced by the method's parameter type at encode
/// time, the way a user-typed amount is handed to the contract unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// Already-typed value
    Value(DynSolValue),
    /// Text to coerce against the ABI parameter type
    Literal(String),
}

impl From<Address> for CallArg {
    fn from(address: Address) -> Self {
        CallArg::Value(DynSolValue::Address(address))
    }
}

impl From<U256> for CallArg {
    fn from(value: U256) -> Self {
        CallArg::Value(DynSolValue::Uint(value, 256))
    }
}

impl From<&str> for CallArg {
    fn from(text: &str) -> Self {
        CallArg::Literal(text.to_string())
    }
}

impl From<String> for CallArg {
    fn from(text: String) -> Self {
        CallArg::Literal(text)
    }
}

/// A transaction the wallet accepted for submission.
///
/// Submission is the whole contract: the transaction may still be pending,
/// replaced or reverted when this is returned. Nothing waits for a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    /// Contract the transaction was sent to
    pub contract: String,
    /// Method invoked
    pub method: String,
    /// Hash reported by the wallet
    pub tx_hash: TxHash,
}

impl fmt::Display for Submitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} {}", self.contract, self.method, self.tx_hash)
    }
}

/// A remote contract reached through the wallet: one deployment address, the
/// descriptor's interface and the connected signer.
pub struct ContractProxy<P> {
    name: String,
    address: std::result::Result<Address, String>,
    abi: Rc<JsonAbi>,
    signer: WalletSigner<P>,
}

impl<P> fmt::Debug for ContractProxy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractProxy")
            .field("name", &self.name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl<P: WalletProvider> ContractProxy<P> {
    /// Builds a proxy. A missing deployment or an unparsable address does not
    /// fail here; every later call reports [`EfiatError::Address`] instead.
    pub fn new(
        name: impl Into<String>,
        deployment: Option<&DeploymentRecord>,
        abi: JsonAbi,
        signer: WalletSigner<P>,
    ) -> Self {
        let address = match deployment.map(|record| record.address.as_deref()) {
            None => Err("descriptor has no deployments".to_string()),
            Some(None) => Err("deployment has no address".to_string()),
            Some(Some(address)) => address
                .parse::<Address>()
                .map_err(|e| format!("invalid address '{address}': {e}")),
        };
        Self {
            name: name.into(),
            address,
            abi: Rc::new(abi),
            signer,
        }
    }

    /// Contract name used in logs and errors
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deployment address
    pub fn address(&self) -> Result<Address> {
        self.address.clone().map_err(|reason| EfiatError::Address {
            contract: self.name.clone(),
            reason,
        })
    }

    /// The descriptor interface
    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// The signer calls are issued with
    pub fn signer(&self) -> &WalletSigner<P> {
        &self.signer
    }

    /// Calls a view method and returns the decoded outputs
    pub async fn call(&self, method: &str, args: &[CallArg]) -> Result<Vec<DynSolValue>> {
        let to = self.address()?;
        let (function, data) = self.encode(method, args)?;
        let output = self
            .signer
            .call(to, &data)
            .await
            .map_err(|e| self.remote_error(method, e))?;
        function
            .abi_decode_output(&output)
            .map_err(|e| EfiatError::Abi(format!("{}.{method}: {e}", self.name)))
    }

    /// Calls a view method whose first output is an unsigned integer
    pub async fn call_uint(&self, method: &str, args: &[CallArg]) -> Result<U256> {
        let outputs = self.call(method, args).await?;
        outputs
            .first()
            .and_then(DynSolValue::as_uint)
            .map(|(value, _)| value)
            .ok_or_else(|| EfiatError::Abi(format!("{}.{method} did not return a uint", self.name)))
    }

    /// Submits a state-changing method call
    pub async fn send(&self, method: &str, args: &[CallArg]) -> Result<Submitted> {
        let to = self.address()?;
        let (_, data) = self.encode(method, args)?;
        let tx_hash = self
            .signer
            .send_transaction(to, &data)
            .await
            .map_err(|e| self.remote_error(method, e))?;
        log::info!("{}.{method} submitted: {tx_hash}", self.name);
        Ok(Submitted {
            contract: self.name.clone(),
            method: method.to_string(),
            tx_hash,
        })
    }

    /// ABI-encodes a call, resolving overloads by argument count
    pub fn encode(&self, method: &str, args: &[CallArg]) -> Result<(&Function, Vec<u8>)> {
        let function = self
            .abi
            .function(method)
            .and_then(|overloads| overloads.iter().find(|f| f.inputs.len() == args.len()))
            .ok_or_else(|| {
                EfiatError::Abi(format!(
                    "{} has no method {method} taking {} argument(s)",
                    self.name,
                    args.len()
                ))
            })?;

        let values = function
            .inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| match arg {
                CallArg::Value(value) => Ok(value.clone()),
                CallArg::Literal(text) => {
                    let ty: DynSolType = param
                        .resolve()
                        .map_err(|e| EfiatError::Abi(format!("{}.{method}: {e}", self.name)))?;
                    let invalid =
                        || EfiatError::Validation(format!("'{text}' is not a valid {}", param.ty));
                    match ty {
                        // plain integers only: no units, fractions or separators
                        DynSolType::Uint(bits) => parse_uint_literal(text)
                            .filter(|value| value.bit_len() <= bits)
                            .map(|value| DynSolValue::Uint(value, bits))
                            .ok_or_else(invalid),
                        ty => ty.coerce_str(text).map_err(|_| invalid()),
                    }
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let data = function
            .abi_encode_input(&values)
            .map_err(|e| EfiatError::Abi(format!("{}.{method}: {e}", self.name)))?;
        Ok((function, data))
    }

    fn remote_error(&self, method: &str, err: EfiatError) -> EfiatError {
        match err {
            EfiatError::RemoteCall { reason, .. } => {
                EfiatError::remote(format!("{}.{method}", self.name), reason)
            }
            other => other,
        }
    }
}
