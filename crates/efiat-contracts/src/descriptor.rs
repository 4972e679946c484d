//! Contract descriptors: the build artifacts that pair a contract's ABI with
//! its deployment history.

use alloy::json_abi::JsonAbi;
use efiat_error::{EfiatError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a descriptor's `networks` mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Address the contract was deployed at. A record without one still loads;
    /// calls through it fail with [`EfiatError::Address`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Hash of the deployment transaction, when recorded
    #[serde(default, rename = "transactionHash", skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl DeploymentRecord {
    /// Reads the fields the client uses, ignoring everything else. Only the
    /// selected deployment is ever used, so stale entries never fail a load.
    fn from_entry(entry: &Value) -> Self {
        let field = |name: &str| entry.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            address: field("address"),
            transaction_hash: field("transactionHash"),
        }
    }
}

/// A parsed contract descriptor
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    /// `contractName` from the artifact, if present
    pub contract_name: Option<String>,
    /// The callable interface
    pub abi: JsonAbi,
    /// Deployments keyed as in the document, in document order
    pub networks: Vec<(String, DeploymentRecord)>,
}

impl ContractDescriptor {
    /// Parses a fetched descriptor document.
    ///
    /// `location` is only used for error reporting. A document without an
    /// `abi` array is malformed; a missing or empty `networks` mapping is not,
    /// and neither is a deployment entry lacking an address.
    pub fn from_json(location: &str, value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EfiatError::fetch(location, "descriptor is not a JSON object"))?;

        let abi_value = object
            .get("abi")
            .ok_or_else(|| EfiatError::fetch(location, "descriptor has no `abi` field"))?;
        if !abi_value.is_array() {
            return Err(EfiatError::fetch(location, "`abi` is not an array"));
        }
        let abi: JsonAbi = serde_json::from_value(abi_value.clone())
            .map_err(|e| EfiatError::fetch(location, format!("invalid abi: {e}")))?;

        let mut networks = Vec::new();
        match object.get("networks") {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (key, entry) in map {
                    networks.push((key.clone(), DeploymentRecord::from_entry(entry)));
                }
            }
            Some(_) => return Err(EfiatError::fetch(location, "`networks` is not an object")),
        }

        let contract_name = object
            .get("contractName")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            contract_name,
            abi,
            networks,
        })
    }

    /// Returns the most recent deployment: the last key of `networks` in the
    /// order a browser enumerates object keys.
    ///
    /// Integer-like keys enumerate first in ascending numeric order, then all
    /// other keys in document order. `None` when nothing was deployed.
    pub fn latest_deployment(&self) -> Option<(&str, &DeploymentRecord)> {
        if let Some((key, record)) = self
            .networks
            .iter()
            .rev()
            .find(|(key, _)| array_index(key).is_none())
        {
            return Some((key.as_str(), record));
        }
        self.networks
            .iter()
            .max_by_key(|(key, _)| array_index(key))
            .map(|(key, record)| (key.as_str(), record))
    }

    /// Network keys in enumeration order
    pub fn network_keys(&self) -> Vec<&str> {
        let mut indexed: Vec<(u32, &str)> = self
            .networks
            .iter()
            .filter_map(|(key, _)| array_index(key).map(|i| (i, key.as_str())))
            .collect();
        indexed.sort_by_key(|(i, _)| *i);

        indexed
            .into_iter()
            .map(|(_, key)| key)
            .chain(
                self.networks
                    .iter()
                    .filter(|(key, _)| array_index(key).is_none())
                    .map(|(key, _)| key.as_str()),
            )
            .collect()
    }
}

/// Canonical array index: decimal without leading zeros, below 2^32 - 1
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}
