//! Named access to the loaded contracts.

use crate::proxy::ContractProxy;
use efiat_error::{EfiatError, Result};
use efiat_traits::WalletProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The contracts of the eFiat protocol the client knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractName {
    /// Multi-token ledger of deposited reserves and minted coin
    Accountant,
    /// Mints and burns the stable asset against reserves
    CoinHouse,
    /// Holds deposited collateral
    ReserveHouse,
    /// Price feed
    Oracle,
    /// The stable asset token
    Fiat,
    /// The wrapped collateral token
    Weth,
}

impl ContractName {
    /// All contracts, in the order their artifacts are loaded by default
    pub const ALL: [ContractName; 6] = [
        ContractName::Accountant,
        ContractName::CoinHouse,
        ContractName::ReserveHouse,
        ContractName::Oracle,
        ContractName::Fiat,
        ContractName::Weth,
    ];

    /// Build artifact name
    pub fn artifact(&self) -> &'static str {
        match self {
            Self::Accountant => "AssetsAccountant",
            Self::CoinHouse => "HouseOfCoin",
            Self::ReserveHouse => "HouseOfReserve",
            Self::Oracle => "MockOracle",
            Self::Fiat => "DigitalFiat",
            Self::Weth => "MockWETH",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.artifact())
    }
}

/// Loaded proxies keyed by contract name
pub struct ContractRegistry<P> {
    contracts: BTreeMap<ContractName, ContractProxy<P>>,
}

impl<P: WalletProvider> ContractRegistry<P> {
    /// Pairs loader output with the names it was loaded for.
    ///
    /// `names[i]` labels `proxies[i]`; lengths must match and names must be
    /// unique.
    pub fn from_loaded(names: &[ContractName], proxies: Vec<ContractProxy<P>>) -> Result<Self> {
        if names.len() != proxies.len() {
            return Err(EfiatError::Config(format!(
                "{} contract names for {} loaded descriptors",
                names.len(),
                proxies.len()
            )));
        }
        let mut contracts = BTreeMap::new();
        for (name, proxy) in names.iter().zip(proxies) {
            if contracts.insert(*name, proxy).is_some() {
                return Err(EfiatError::Config(format!("contract {name} configured twice")));
            }
        }
        Ok(Self { contracts })
    }

    /// Looks up a contract
    pub fn get(&self, name: ContractName) -> Option<&ContractProxy<P>> {
        self.contracts.get(&name)
    }

    /// Looks up a contract the caller cannot work without
    pub fn require(&self, name: ContractName) -> Result<&ContractProxy<P>> {
        self.get(name)
            .ok_or_else(|| EfiatError::Config(format!("contract {name} is not configured")))
    }

    /// Names of the loaded contracts
    pub fn names(&self) -> impl Iterator<Item = ContractName> + '_ {
        self.contracts.keys().copied()
    }

    /// Number of loaded contracts
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// True when nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
