//! Application configuration.

use crate::view::ElementIds;
use efiat_contracts::{ContractName, BASE_DECIMALS};
use efiat_error::{EfiatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Directory the build artifacts are served from by default
pub const DEFAULT_ARTIFACT_DIR: &str = "./../build/contracts";

/// Origin handed to the wallet vendor's onboarding flow by default
pub const DEFAULT_FORWARDER_ORIGIN: &str = "http://localhost:9010";

/// Contracts the session cannot run without
pub const REQUIRED_CONTRACTS: [ContractName; 4] = [
    ContractName::Accountant,
    ContractName::ReserveHouse,
    ContractName::Fiat,
    ContractName::Weth,
];

/// Where one contract's descriptor lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    /// Role of the contract
    pub name: ContractName,
    /// Descriptor location
    pub location: String,
}

/// Decimal places used when rendering balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayPrecision {
    /// Native currency, wrapped collateral and reserves
    pub collateral: u8,
    /// Stable asset balances
    pub stable: u8,
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self {
            collateral: 4,
            stable: 2,
        }
    }
}

/// Configuration for the dApp client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Descriptors to load, in load order
    pub contracts: Vec<ContractEntry>,
    /// Page element ids
    pub element_ids: ElementIds,
    /// Forwarder origin for wallet onboarding
    pub forwarder_origin: String,
    /// Balance rendering
    pub precision: DisplayPrecision,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new().with_artifact_dir(DEFAULT_ARTIFACT_DIR)
    }
}

impl AppConfig {
    /// Creates a configuration with no contracts and default everything else
    pub fn new() -> Self {
        Self {
            contracts: Vec::new(),
            element_ids: ElementIds::default(),
            forwarder_origin: DEFAULT_FORWARDER_ORIGIN.to_string(),
            precision: DisplayPrecision::default(),
        }
    }

    /// Parses and validates a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Points every known contract at `{dir}/{artifact}.json`
    pub fn with_artifact_dir(mut self, dir: &str) -> Self {
        let dir = dir.trim_end_matches('/');
        self.contracts = ContractName::ALL
            .iter()
            .map(|name| ContractEntry {
                name: *name,
                location: format!("{dir}/{}.json", name.artifact()),
            })
            .collect();
        self
    }

    /// Sets the location of one contract, keeping its load position if it
    /// was already configured
    pub fn with_contract(mut self, name: ContractName, location: impl Into<String>) -> Self {
        let location = location.into();
        match self.contracts.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.location = location,
            None => self.contracts.push(ContractEntry { name, location }),
        }
        self
    }

    /// Drops a contract from the load list
    pub fn without_contract(mut self, name: ContractName) -> Self {
        self.contracts.retain(|entry| entry.name != name);
        self
    }

    /// Sets the page element ids
    pub fn with_element_ids(mut self, ids: ElementIds) -> Self {
        self.element_ids = ids;
        self
    }

    /// Sets the onboarding forwarder origin
    pub fn with_forwarder_origin(mut self, origin: impl Into<String>) -> Self {
        self.forwarder_origin = origin.into();
        self
    }

    /// Sets the decimal places for collateral and stable balances
    pub fn with_precision(mut self, collateral: u8, stable: u8) -> Self {
        self.precision = DisplayPrecision { collateral, stable };
        self
    }

    /// Contract names in load order
    pub fn names(&self) -> Vec<ContractName> {
        self.contracts.iter().map(|entry| entry.name).collect()
    }

    /// Descriptor locations in load order
    pub fn locations(&self) -> Vec<&str> {
        self.contracts
            .iter()
            .map(|entry| entry.location.as_str())
            .collect()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.contracts {
            if !seen.insert(entry.name) {
                return Err(EfiatError::Config(format!(
                    "contract {} configured twice",
                    entry.name
                )));
            }
            if entry.location.trim().is_empty() {
                return Err(EfiatError::Config(format!(
                    "contract {} has an empty location",
                    entry.name
                )));
            }
        }
        if let Some(name) = REQUIRED_CONTRACTS.iter().find(|name| !seen.contains(*name)) {
            return Err(EfiatError::Config(format!("contract {name} is not configured")));
        }

        if !(self.forwarder_origin.starts_with("http://")
            || self.forwarder_origin.starts_with("https://"))
        {
            return Err(EfiatError::Config(format!(
                "forwarder origin '{}' is not an http(s) origin",
                self.forwarder_origin
            )));
        }

        for places in [self.precision.collateral, self.precision.stable] {
            if places > BASE_DECIMALS {
                return Err(EfiatError::Config(format!(
                    "cannot display {places} decimal places of an {BASE_DECIMALS}-decimal amount"
                )));
            }
        }

        self.element_ids.validate()
    }
}
