//! # eFiat Testing Infrastructure
//!
//! Test doubles for the three collaborators of the eFiat client:
//! - [`MockWallet`] - scripted EIP-1193 wallet that answers stubbed contract
//!   reads and records submitted transactions
//! - [`MockSource`] - in-memory descriptor source that records fetch order
//! - [`MockDocument`] - page with settable inputs, readable labels and alerts
//!
//! plus descriptor [`fixtures`] and proptest strategies.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use efiat_testing::*;
//!
//! let wallet = MockWallet::connected(&[TEST_ACCOUNT]);
//! wallet.stub_uint(fixtures::address(6), "balanceOf(address)", &[owner], U256::from(1u8));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use efiat_error::{EfiatError, Result};
use efiat_traits::{rpc, DescriptorSource, Document, Element, WalletProvider};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Account every mock wallet exposes unless told otherwise
pub const TEST_ACCOUNT: &str = "0x0000000000000000000000000000000000000abc";

// ============================================================================
// Wallet
// ============================================================================

/// A transaction captured by [`MockWallet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTransaction {
    /// `from` field as sent
    pub from: String,
    /// Target contract
    pub to: Address,
    /// Calldata
    pub data: Vec<u8>,
}

impl SentTransaction {
    /// Function selector of the calldata
    pub fn selector(&self) -> [u8; 4] {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&self.data[..4]);
        selector
    }

    /// The `index`-th static argument word read as a uint
    pub fn uint_arg(&self, index: usize) -> U256 {
        let start = 4 + 32 * index;
        U256::from_be_slice(&self.data[start..start + 32])
    }

    /// The `index`-th static argument word read as an address
    pub fn address_arg(&self, index: usize) -> Address {
        let start = 4 + 32 * index;
        Address::from_slice(&self.data[start + 12..start + 32])
    }
}

#[derive(Default)]
struct WalletState {
    installed: bool,
    accounts: Vec<String>,
    native_balance: U256,
    calls: HashMap<(Address, Vec<u8>), Vec<u8>>,
    rejections: HashMap<String, String>,
    requests: Vec<(String, Value)>,
    transactions: Vec<SentTransaction>,
    onboarding: Vec<String>,
}

/// Scripted wallet extension
#[derive(Default)]
pub struct MockWallet {
    state: RefCell<WalletState>,
}

impl MockWallet {
    /// An installed wallet that exposes `accounts` on request
    pub fn connected(accounts: &[&str]) -> Self {
        let wallet = Self::default();
        {
            let mut state = wallet.state.borrow_mut();
            state.installed = true;
            state.accounts = accounts.iter().map(|a| a.to_string()).collect();
        }
        wallet
    }

    /// No extension injected
    pub fn uninstalled() -> Self {
        Self::default()
    }

    /// Sets the native balance returned by `eth_getBalance`
    pub fn set_native_balance(&self, wei: U256) {
        self.state.borrow_mut().native_balance = wei;
    }

    /// Answers `eth_call` to `to` with exact `calldata` by `output`
    pub fn stub_call(&self, to: Address, calldata: Vec<u8>, output: Vec<u8>) {
        self.state.borrow_mut().calls.insert((to, calldata), output);
    }

    /// Answers `signature(args..)` on `to` with a single uint256
    pub fn stub_uint(&self, to: Address, signature: &str, args: &[DynSolValue], value: U256) {
        let mut calldata = fixtures::selector(signature).to_vec();
        calldata.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
        self.stub_call(to, calldata, value.to_be_bytes::<32>().to_vec());
    }

    /// Makes every request for `method` fail with `reason`
    pub fn reject(&self, method: &str, reason: &str) {
        self.state
            .borrow_mut()
            .rejections
            .insert(method.to_string(), reason.to_string());
    }

    /// Every request seen, in order
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.state.borrow().requests.clone()
    }

    /// Methods of every request seen, in order
    pub fn methods(&self) -> Vec<String> {
        self.state
            .borrow()
            .requests
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    /// Transactions submitted, in order
    pub fn transactions(&self) -> Vec<SentTransaction> {
        self.state.borrow().transactions.clone()
    }

    /// Forwarder origins onboarding was started with
    pub fn onboarding_started(&self) -> Vec<String> {
        self.state.borrow().onboarding.clone()
    }

    fn call_target(method: &str, params: &Value) -> Result<(Address, Vec<u8>)> {
        let tx = &params[0];
        let to = tx["to"]
            .as_str()
            .and_then(|s| s.parse::<Address>().ok())
            .ok_or_else(|| EfiatError::remote(method, "missing `to`"))?;
        let data = tx["data"]
            .as_str()
            .map(|s| hex::decode(s.trim_start_matches("0x")))
            .transpose()
            .map_err(|e| EfiatError::remote(method, e))?
            .unwrap_or_default();
        Ok((to, data))
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockWallet {
    fn is_installed(&self) -> bool {
        self.state.borrow().installed
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let mut state = self.state.borrow_mut();
        state.requests.push((method.to_string(), params.clone()));

        if let Some(reason) = state.rejections.get(method) {
            return Err(EfiatError::remote(method, reason));
        }
        if !state.installed {
            return Err(EfiatError::remote(method, "wallet not installed"));
        }

        match method {
            rpc::REQUEST_ACCOUNTS => Ok(json!(state.accounts)),
            rpc::GET_BALANCE => Ok(json!(format!("0x{:x}", state.native_balance))),
            rpc::CALL => {
                let key = Self::call_target(method, &params)?;
                state
                    .calls
                    .get(&key)
                    .map(|output| json!(format!("0x{}", hex::encode(output))))
                    .ok_or_else(|| EfiatError::remote(method, "execution reverted"))
            }
            rpc::SEND_TRANSACTION => {
                let (to, data) = Self::call_target(method, &params)?;
                let from = params[0]["from"].as_str().unwrap_or_default().to_string();
                state.transactions.push(SentTransaction { from, to, data });
                Ok(json!(format!("0x{:064x}", state.transactions.len())))
            }
            other => Err(EfiatError::remote(other, "unsupported method")),
        }
    }

    fn start_onboarding(&self, forwarder_origin: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .onboarding
            .push(forwarder_origin.to_string());
        Ok(())
    }
}

// ============================================================================
// Descriptor Source
// ============================================================================

/// In-memory descriptor source
#[derive(Default)]
pub struct MockSource {
    documents: HashMap<String, Value>,
    fetches: RefCell<Vec<String>>,
}

impl MockSource {
    /// Empty source; every fetch fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `document` at `location`
    pub fn with(mut self, location: &str, document: Value) -> Self {
        self.documents.insert(location.to_string(), document);
        self
    }

    /// Locations fetched, in order
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DescriptorSource for MockSource {
    async fn fetch_json(&self, location: &str) -> Result<Value> {
        self.fetches.borrow_mut().push(location.to_string());
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| EfiatError::fetch(location, "404 Not Found"))
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Default, Clone)]
struct ElementState {
    text: String,
    value: String,
    disabled: bool,
}

type Elements = Rc<RefCell<BTreeMap<String, ElementState>>>;

/// Handle to an element of a [`MockDocument`]
#[derive(Clone)]
pub struct MockElement {
    id: String,
    elements: Elements,
}

impl MockElement {
    fn with_state<R>(&self, f: impl FnOnce(&mut ElementState) -> R) -> R {
        let mut elements = self.elements.borrow_mut();
        f(elements.entry(self.id.clone()).or_default())
    }
}

impl Element for MockElement {
    fn set_text(&self, text: &str) {
        self.with_state(|state| state.text = text.to_string());
    }

    fn text(&self) -> String {
        self.with_state(|state| state.text.clone())
    }

    fn value(&self) -> String {
        self.with_state(|state| state.value.clone())
    }

    fn set_disabled(&self, disabled: bool) {
        self.with_state(|state| state.disabled = disabled);
    }
}

/// A page holding a fixed set of element ids
#[derive(Default)]
pub struct MockDocument {
    elements: Elements,
    alerts: RefCell<Vec<String>>,
}

impl MockDocument {
    /// A page containing exactly `ids`
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let elements = ids
            .into_iter()
            .map(|id| (id.as_ref().to_string(), ElementState::default()))
            .collect();
        Self {
            elements: Rc::new(RefCell::new(elements)),
            alerts: RefCell::new(Vec::new()),
        }
    }

    /// Types `value` into input `id`
    pub fn set_value(&self, id: &str, value: &str) {
        if let Some(state) = self.elements.borrow_mut().get_mut(id) {
            state.value = value.to_string();
        }
    }

    /// Current text of element `id` (empty if absent)
    pub fn text(&self, id: &str) -> String {
        self.elements
            .borrow()
            .get(id)
            .map(|state| state.text.clone())
            .unwrap_or_default()
    }

    /// Whether element `id` is disabled
    pub fn is_disabled(&self, id: &str) -> bool {
        self.elements
            .borrow()
            .get(id)
            .map(|state| state.disabled)
            .unwrap_or(false)
    }

    /// Alerts shown so far
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Document for MockDocument {
    type Element = MockElement;

    fn element_by_id(&self, id: &str) -> Option<MockElement> {
        self.elements.borrow().contains_key(id).then(|| MockElement {
            id: id.to_string(),
            elements: Rc::clone(&self.elements),
        })
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

// ============================================================================
// Descriptor Fixtures
// ============================================================================

/// Descriptor documents and ABIs shaped like the protocol's build artifacts
pub mod fixtures {
    use alloy::primitives::{keccak256, Address};
    use serde_json::{json, Map, Value};

    /// Artifact names in default load order
    pub const ARTIFACT_NAMES: [&str; 6] = [
        "AssetsAccountant",
        "HouseOfCoin",
        "HouseOfReserve",
        "MockOracle",
        "DigitalFiat",
        "MockWETH",
    ];

    /// Deterministic address with `n` in the low bytes
    pub fn address(n: u64) -> Address {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Address::from(bytes)
    }

    /// First four bytes of the keccak hash of `signature`
    pub fn selector(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    fn function(name: &str, inputs: &[(&str, &str)], outputs: &[&str], mutability: &str) -> Value {
        json!({
            "type": "function",
            "name": name,
            "inputs": inputs
                .iter()
                .map(|(n, t)| json!({"name": n, "type": t, "internalType": t}))
                .collect::<Vec<_>>(),
            "outputs": outputs
                .iter()
                .map(|t| json!({"name": "", "type": t, "internalType": t}))
                .collect::<Vec<_>>(),
            "stateMutability": mutability,
        })
    }

    /// ERC-20 subset used by the wrapped collateral and the stable asset
    pub fn erc20_abi() -> Value {
        json!([
            function("balanceOf", &[("account", "address")], &["uint256"], "view"),
            function(
                "approve",
                &[("spender", "address"), ("amount", "uint256")],
                &["bool"],
                "nonpayable",
            ),
            function("decimals", &[], &["uint8"], "view"),
        ])
    }

    /// ERC-1155 style ledger
    pub fn accountant_abi() -> Value {
        json!([
            function(
                "balanceOf",
                &[("account", "address"), ("id", "uint256")],
                &["uint256"],
                "view",
            ),
        ])
    }

    /// Collateral house
    pub fn reserve_house_abi() -> Value {
        json!([
            function("reserveTokenID", &[], &["uint256"], "view"),
            function("backedTokenID", &[], &["uint256"], "view"),
            function("deposit", &[("amount", "uint256")], &[], "nonpayable"),
            function("withdraw", &[("amount", "uint256")], &[], "nonpayable"),
        ])
    }

    /// Concatenation of several ABIs, for a contract playing more than one role
    pub fn merged_abi(abis: &[Value]) -> Value {
        Value::Array(
            abis.iter()
                .filter_map(Value::as_array)
                .flatten()
                .cloned()
                .collect(),
        )
    }

    /// A build artifact with `networks` entries in the given order
    pub fn descriptor(name: &str, abi: Value, networks: &[(&str, Address)]) -> Value {
        let mut map = Map::new();
        for (key, address) in networks {
            map.insert(
                key.to_string(),
                json!({"address": address.to_string(), "events": {}, "links": {}}),
            );
        }
        json!({
            "contractName": name,
            "abi": abi,
            "networks": Value::Object(map),
        })
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Base-unit amounts up to 10^9 whole tokens
pub fn base_units() -> impl Strategy<Value = U256> {
    (0u128..=1_000_000_000_000_000_000_000_000_000u128).prop_map(U256::from)
}

/// Pairs `(balance, request)` with `request > balance`
pub fn overdrawn_request() -> impl Strategy<Value = (U256, U256)> {
    (base_units(), 1u64..=u64::MAX)
        .prop_map(|(balance, excess)| (balance, balance + U256::from(excess)))
}

/// Decimal text a user might type for an amount
pub fn amount_text() -> impl Strategy<Value = String> {
    base_units().prop_map(|amount| amount.to_string())
}

/// Text that is not a base-unit amount
pub fn malformed_amount_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[0-9]{1,5}\\.[0-9]{1,5}",
        "-[1-9][0-9]{0,5}",
        "[a-z]{1,8}",
        "[1-9]{1,3}_[0-9]{3}",
        Just("0x".to_string()),
        "[1-9][0-9]{0,3} (wei|gwei|ether)",
    ]
}

// ============================================================================
// Tests
// ============================================================================
