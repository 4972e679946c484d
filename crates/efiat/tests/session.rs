//! Session-level tests: startup, balance rendering and the deposit/withdraw
//! actions, run against a scripted wallet, descriptor source and page.
//!
//! Tests cover:
//! - Startup paths (no wallet, missing elements, bad descriptors)
//! - Balance rendering and partial failures
//! - Approve-and-deposit and withdraw, including rejected input

use efiat::bridge::{CONNECT_TEXT, INSTALL_TEXT, ONBOARDING_TEXT, REFRESH_TEXT};
use efiat::contracts::alloy::dyn_abi::DynSolValue;
use efiat::contracts::alloy::primitives::{Address, U256};
use efiat::controller::{
    DEPOSIT_AMOUNT_REQUIRED, WITHDRAW_AMOUNT_REQUIRED, WITHDRAW_EXCEEDS_RESERVES,
};
use efiat::prelude::*;
use efiat_testing::{fixtures, MockDocument, MockSource, MockWallet, TEST_ACCOUNT};
use serde_json::{json, Value};
use std::rc::Rc;

const RESERVE_TOKEN_ID: u64 = 11;
const BACKED_TOKEN_ID: u64 = 12;

fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u8))
}

fn owner() -> Address {
    TEST_ACCOUNT.parse().unwrap()
}

/// Deployment address of each contract in the standard page
fn address_of(name: ContractName) -> Address {
    let index = ContractName::ALL.iter().position(|n| *n == name).unwrap();
    fixtures::address(index as u64 + 1)
}

fn abi_of(name: ContractName) -> Value {
    match name {
        ContractName::Accountant => fixtures::accountant_abi(),
        ContractName::ReserveHouse => fixtures::reserve_house_abi(),
        ContractName::Fiat | ContractName::Weth => fixtures::erc20_abi(),
        ContractName::CoinHouse | ContractName::Oracle => json!([]),
    }
}

/// The page, wallet and descriptor files a test runs against
struct Page {
    wallet: Rc<MockWallet>,
    source: MockSource,
    document: Rc<MockDocument>,
    config: AppConfig,
}

impl Page {
    /// All six default descriptors, each with a single deployment
    fn standard() -> Self {
        Self::with_descriptors(|name| {
            fixtures::descriptor(name.artifact(), abi_of(name), &[("5777", address_of(name))])
        })
    }

    fn with_descriptors(descriptor: impl Fn(ContractName) -> Value) -> Self {
        let config = AppConfig::default();
        let mut source = MockSource::new();
        for entry in &config.contracts {
            source = source.with(&entry.location, descriptor(entry.name));
        }
        Self {
            wallet: Rc::new(MockWallet::connected(&[TEST_ACCOUNT])),
            source,
            document: Rc::new(MockDocument::with_ids(ElementIds::default().all())),
            config,
        }
    }

    /// Stubs every read a refresh issues
    fn stub_balances(&self, native: U256, weth: U256, reserves: U256, fiat: U256, minted: U256) {
        let house = address_of(ContractName::ReserveHouse);
        let accountant = address_of(ContractName::Accountant);
        let wallet = &self.wallet;

        wallet.set_native_balance(native);
        wallet.stub_uint(house, "reserveTokenID()", &[], U256::from(RESERVE_TOKEN_ID));
        wallet.stub_uint(house, "backedTokenID()", &[], U256::from(BACKED_TOKEN_ID));
        for (token, balance) in [(ContractName::Weth, weth), (ContractName::Fiat, fiat)] {
            wallet.stub_uint(
                address_of(token),
                "balanceOf(address)",
                &[DynSolValue::Address(owner())],
                balance,
            );
        }
        for (id, balance) in [(RESERVE_TOKEN_ID, reserves), (BACKED_TOKEN_ID, minted)] {
            wallet.stub_uint(
                accountant,
                "balanceOf(address,uint256)",
                &[DynSolValue::Address(owner()), DynSolValue::Uint(U256::from(id), 256)],
                balance,
            );
        }
    }

    async fn start(&self) -> Result<Startup<MockWallet, MockDocument>> {
        Session::initialize(
            self.config.clone(),
            Rc::clone(&self.wallet),
            &self.source,
            Rc::clone(&self.document),
        )
        .await
    }

    async fn session(&self) -> Session<MockWallet, MockDocument> {
        match self.start().await.unwrap() {
            Startup::Ready(session) => session,
            Startup::Onboarding(_) => panic!("expected a connected session"),
        }
    }

    fn text(&self, id: &str) -> String {
        self.document.text(id)
    }
}

// ============================================================================
// Startup
// ============================================================================

mod startup_tests {
    use super::*;

    #[tokio::test]
    async fn test_loads_contracts_in_configured_order() {
        let page = Page::standard();
        let session = page.session().await;

        assert_eq!(page.source.fetches(), page.config.locations());
        assert_eq!(session.contracts().len(), 6);
        for name in ContractName::ALL {
            let proxy = session.contracts().require(name).unwrap();
            assert_eq!(proxy.name(), name.artifact());
            assert_eq!(proxy.address().unwrap(), address_of(name));
        }
        assert_eq!(session.accounts(), [TEST_ACCOUNT.to_string()]);
        assert_eq!(session.signer().account(), owner());
    }

    #[tokio::test]
    async fn test_installed_wallet_shows_connect() {
        let page = Page::standard();
        let _session = page.session().await;

        assert_eq!(page.text("connectButton"), CONNECT_TEXT);
        assert!(!page.document.is_disabled("connectButton"));
        assert!(page.document.is_disabled("mintButton"));
        assert!(page.document.is_disabled("paybackButton"));
        assert_eq!(page.wallet.methods(), vec!["eth_requestAccounts".to_string()]);
    }

    #[tokio::test]
    async fn test_no_wallet_offers_onboarding() {
        let mut page = Page::standard();
        page.wallet = Rc::new(MockWallet::uninstalled());

        let onboarding = match page.start().await.unwrap() {
            Startup::Onboarding(onboarding) => onboarding,
            Startup::Ready(_) => panic!("no wallet should mean no session"),
        };
        assert_eq!(page.text("connectButton"), INSTALL_TEXT);
        assert!(page.source.fetches().is_empty());

        onboarding.on_install_click().unwrap();
        assert_eq!(page.text("connectButton"), ONBOARDING_TEXT);
        assert!(page.document.is_disabled("connectButton"));
        assert_eq!(
            page.wallet.onboarding_started(),
            vec!["http://localhost:9010".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_elements_fail_fast() {
        let mut page = Page::standard();
        let ids = ElementIds::default();
        let present: Vec<_> = ids
            .all()
            .into_iter()
            .filter(|id| *id != "getWETHBalance" && *id != "withdrawButton")
            .collect();
        page.document = Rc::new(MockDocument::with_ids(present));

        match page.start().await {
            Err(EfiatError::ViewBinding(missing)) => {
                assert!(missing.contains("getWETHBalance"));
                assert!(missing.contains("withdrawButton"));
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("binding should fail"),
        }
        assert!(page.wallet.requests().is_empty());
        assert!(page.source.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_descriptor_aborts() {
        let mut page = Page::standard();
        page.source = MockSource::new().with(
            &page.config.contracts[0].location,
            fixtures::descriptor("AssetsAccountant", fixtures::accountant_abi(), &[]),
        );

        let err = page.start().await.err().unwrap();
        assert!(matches!(err, EfiatError::Fetch { .. }));
        assert!(err.is_fatal());
        assert_eq!(page.source.fetches().len(), 2);
    }

    #[tokio::test]
    async fn test_descriptor_without_abi_aborts() {
        let page =
            Page::with_descriptors(|name| json!({"contractName": name.artifact(), "networks": {}}));
        assert!(matches!(page.start().await, Err(EfiatError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_connection_rejected() {
        let page = Page::standard();
        page.wallet.reject("eth_requestAccounts", "User rejected the request.");
        assert!(matches!(page.start().await, Err(EfiatError::RemoteCall { .. })));
        assert!(page.source.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_latest_deployment_is_used() {
        let page = Page::with_descriptors(|name| {
            fixtures::descriptor(
                name.artifact(),
                abi_of(name),
                &[
                    ("1637600000000", fixtures::address(90)),
                    ("5777", fixtures::address(91)),
                    ("1637700000000", address_of(name)),
                ],
            )
        });
        let session = page.session().await;
        assert_eq!(
            session.contracts().require(ContractName::Weth).unwrap().address().unwrap(),
            address_of(ContractName::Weth)
        );
    }

    #[tokio::test]
    async fn test_stale_deployment_without_address_is_ignored() {
        let page = Page::with_descriptors(|name| {
            let mut descriptor =
                fixtures::descriptor(name.artifact(), abi_of(name), &[("5777", address_of(name))]);
            descriptor["networks"]["1"] = json!({"events": {}});
            descriptor
        });
        let session = page.session().await;
        assert_eq!(
            session.contracts().require(ContractName::Oracle).unwrap().address().unwrap(),
            address_of(ContractName::Oracle)
        );
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut page = Page::standard();
        page.config = page.config.without_contract(ContractName::ReserveHouse);
        assert!(matches!(page.start().await, Err(EfiatError::Config(_))));
    }
}

// ============================================================================
// Balance rendering
// ============================================================================

mod presenter_tests {
    use super::*;

    #[tokio::test]
    async fn test_one_unit_renders_fixed_places() {
        let page = Page::standard();
        page.stub_balances(ether(1), ether(1), ether(1), ether(1), ether(1));
        let session = page.session().await;

        session.presenter().refresh().await.unwrap();

        assert_eq!(page.text("getAccountsResult"), TEST_ACCOUNT);
        assert_eq!(page.text("getAccountBalance"), "1.0000");
        assert_eq!(page.text("getWETHBalance"), "1.0000");
        assert_eq!(page.text("yourReserves"), "1.0000");
        assert_eq!(page.text("getEFIATBalance"), "1.00");
        assert_eq!(page.text("yourMinted"), "1.00");
        assert_eq!(
            page.text("mockwethAddr"),
            address_of(ContractName::Weth).to_string()
        );
    }

    #[tokio::test]
    async fn test_rounding_and_precision() {
        let page = Page::standard();
        // 2.71828 ETH native, 0.005 stable
        page.stub_balances(
            U256::from(2_718_280_000_000_000_000u64),
            U256::ZERO,
            U256::from(123_456_789_000_000_000u64),
            U256::from(5_000_000_000_000_000u64),
            U256::from(994_999_999_999_999_999u64),
        );
        let session = page.session().await;
        session.presenter().refresh().await.unwrap();

        assert_eq!(page.text("getAccountBalance"), "2.7183");
        assert_eq!(page.text("getWETHBalance"), "0.0000");
        assert_eq!(page.text("yourReserves"), "0.1235");
        assert_eq!(page.text("getEFIATBalance"), "0.01");
        assert_eq!(page.text("yourMinted"), "0.99");
    }

    #[tokio::test]
    async fn test_configured_precision() {
        let mut page = Page::standard();
        page.config = page.config.clone().with_precision(2, 0);
        page.stub_balances(ether(3), ether(3), ether(3), ether(7), ether(7));
        let session = page.session().await;
        session.presenter().refresh().await.unwrap();

        assert_eq!(page.text("getAccountBalance"), "3.00");
        assert_eq!(page.text("getEFIATBalance"), "7");
    }

    #[tokio::test]
    async fn test_failed_read_leaves_other_labels() {
        let page = Page::standard();
        page.stub_balances(ether(1), ether(2), ether(3), ether(4), ether(5));
        // the stable asset read reverts
        page.wallet.stub_call(
            address_of(ContractName::Fiat),
            {
                let mut data = fixtures::selector("balanceOf(address)").to_vec();
                let args = DynSolValue::Tuple(vec![DynSolValue::Address(owner())]);
                data.extend(args.abi_encode_params());
                data
            },
            Vec::new(),
        );
        let session = page.session().await;

        let result = session.presenter().refresh().await;
        assert!(result.is_err());
        assert_eq!(page.text("getWETHBalance"), "2.0000");
        assert_eq!(page.text("yourReserves"), "3.0000");
        assert_eq!(page.text("getEFIATBalance"), "");
        assert_eq!(page.text("yourMinted"), "5.00");
    }

    #[tokio::test]
    async fn test_missing_deployment_fails_only_its_reads() {
        let page = Page::with_descriptors(|name| {
            let networks: &[(&str, Address)] = if name == ContractName::Weth {
                &[]
            } else {
                &[("5777", address_of(name))]
            };
            fixtures::descriptor(name.artifact(), abi_of(name), networks)
        });
        page.stub_balances(ether(1), ether(1), ether(1), ether(1), ether(1));
        let session = page.session().await;

        let err = session.presenter().refresh().await.unwrap_err();
        assert!(matches!(err, EfiatError::Address { .. }));
        assert_eq!(page.text("getWETHBalance"), "");
        assert_eq!(page.text("mockwethAddr"), "");
        assert_eq!(page.text("yourReserves"), "1.0000");
        assert_eq!(page.text("getEFIATBalance"), "1.00");
    }

    #[tokio::test]
    async fn test_connect_click_only_logs_failures() {
        let page = Page::standard();
        page.wallet.reject("eth_getBalance", "internal error");
        let session = page.session().await;

        session.on_connect().await;
        assert_eq!(page.text("getAccountsResult"), "");
        assert_eq!(page.text("getAccountBalance"), "");
        assert_eq!(page.text("getWETHBalance"), "");
        assert!(page.document.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_sends_nothing() {
        let page = Page::standard();
        page.stub_balances(ether(1), ether(1), ether(1), ether(1), ether(1));
        let session = page.session().await;
        session.on_connect().await;
        session.on_connect().await;
        assert!(page.wallet.transactions().is_empty());
    }
}

// ============================================================================
// Actions
// ============================================================================

mod action_tests {
    use super::*;

    #[tokio::test]
    async fn test_deposit_approves_then_deposits() {
        let page = Page::standard();
        let session = page.session().await;
        page.document.set_value("wethDepositInput", "5");

        let deposit = session.on_deposit().await.unwrap().unwrap();
        assert_eq!(deposit.approval.method, "approve");
        assert_eq!(deposit.deposit.method, "deposit");

        let sent = page.wallet.transactions();
        assert_eq!(sent.len(), 2);

        assert_eq!(sent[0].to, address_of(ContractName::Weth));
        assert_eq!(sent[0].selector(), fixtures::selector("approve(address,uint256)"));
        assert_eq!(sent[0].address_arg(0), address_of(ContractName::ReserveHouse));
        assert_eq!(sent[0].uint_arg(1), U256::from(5u8));

        assert_eq!(sent[1].to, address_of(ContractName::ReserveHouse));
        assert_eq!(sent[1].selector(), fixtures::selector("deposit(uint256)"));
        assert_eq!(sent[1].uint_arg(0), U256::from(5u8));

        assert_eq!(page.text("connectButton"), REFRESH_TEXT);
    }

    #[tokio::test]
    async fn test_empty_deposit_alerts() {
        let page = Page::standard();
        let session = page.session().await;
        page.document.set_value("wethDepositInput", "  ");

        assert_eq!(session.on_deposit().await.unwrap(), None);
        assert_eq!(page.document.alerts(), vec![DEPOSIT_AMOUNT_REQUIRED.to_string()]);
        assert!(page.wallet.transactions().is_empty());

        let err = session.controller().approve_and_deposit().await.unwrap_err();
        assert!(matches!(err, EfiatError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_deposit_alerts() {
        let page = Page::standard();
        let session = page.session().await;
        page.document.set_value("wethDepositInput", "five");

        assert_eq!(session.on_deposit().await.unwrap(), None);
        assert_eq!(page.document.alerts().len(), 1);
        assert!(page.document.alerts()[0].contains("five"));
        assert!(page.wallet.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_deposit_takes_no_unit_suffix() {
        for input in ["1 ether", "1.5 gwei", "1_000"] {
            let page = Page::standard();
            let session = page.session().await;
            page.document.set_value("wethDepositInput", input);

            assert_eq!(session.on_deposit().await.unwrap(), None, "input {input:?}");
            assert_eq!(page.document.alerts().len(), 1);
            assert!(page.wallet.transactions().is_empty());
            assert_eq!(page.text("connectButton"), CONNECT_TEXT);
        }
    }

    #[tokio::test]
    async fn test_rejected_deposit_propagates() {
        let page = Page::standard();
        let session = page.session().await;
        page.wallet.reject("eth_sendTransaction", "User denied transaction signature.");
        page.document.set_value("wethDepositInput", "5");

        let err = session.on_deposit().await.unwrap_err();
        assert!(matches!(err, EfiatError::RemoteCall { .. }));
        assert!(!err.is_user_facing());
        assert!(page.document.alerts().is_empty());
        assert_eq!(page.text("connectButton"), CONNECT_TEXT);
    }

    #[tokio::test]
    async fn test_withdraw_more_than_reserves() {
        let page = Page::standard();
        page.stub_balances(U256::ZERO, U256::ZERO, U256::from(50u8), U256::ZERO, U256::ZERO);
        let session = page.session().await;
        page.document.set_value("wethWithdrawInput", "100");

        let err = session.controller().withdraw().await.unwrap_err();
        assert!(matches!(err, EfiatError::InsufficientBalance { .. }));

        assert_eq!(session.on_withdraw().await.unwrap(), None);
        assert_eq!(page.document.alerts(), vec![WITHDRAW_EXCEEDS_RESERVES.to_string()]);
        assert!(page.wallet.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_empty_withdraw_alerts() {
        let page = Page::standard();
        page.stub_balances(U256::ZERO, U256::ZERO, U256::from(50u8), U256::ZERO, U256::ZERO);
        let session = page.session().await;

        let err = session.controller().withdraw().await.unwrap_err();
        assert!(matches!(err, EfiatError::Validation(_)));

        assert_eq!(session.on_withdraw().await.unwrap(), None);
        assert_eq!(page.document.alerts(), vec![WITHDRAW_AMOUNT_REQUIRED.to_string()]);
        assert!(page.wallet.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_rejects_loose_integer_text() {
        for input in ["1_000", "0x", "1e3"] {
            let page = Page::standard();
            page.stub_balances(U256::ZERO, U256::ZERO, U256::from(5000u16), U256::ZERO, U256::ZERO);
            let session = page.session().await;
            page.document.set_value("wethWithdrawInput", input);

            assert_eq!(session.on_withdraw().await.unwrap(), None, "input {input:?}");
            assert_eq!(page.document.alerts(), vec![WITHDRAW_AMOUNT_REQUIRED.to_string()]);
            assert!(page.wallet.transactions().is_empty());
        }
    }

    #[tokio::test]
    async fn test_withdraw_submits_and_refreshes() {
        let page = Page::standard();
        page.stub_balances(ether(1), ether(1), U256::from(50u8), ether(1), ether(1));
        let session = page.session().await;
        page.document.set_value("wethWithdrawInput", "0x20");

        let submitted = session.on_withdraw().await.unwrap().unwrap();
        assert_eq!(submitted.method, "withdraw");
        assert_eq!(submitted.contract, "HouseOfReserve");

        let sent = page.wallet.transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].selector(), fixtures::selector("withdraw(uint256)"));
        assert_eq!(sent[0].uint_arg(0), U256::from(32u8));

        assert_eq!(page.text("getAccountBalance"), "1.0000");
        assert_eq!(page.text("yourReserves"), "0.0000");
    }

    #[tokio::test]
    async fn test_withdraw_entire_reserves() {
        let page = Page::standard();
        page.stub_balances(U256::ZERO, U256::ZERO, U256::from(50u8), U256::ZERO, U256::ZERO);
        let session = page.session().await;
        page.document.set_value("wethWithdrawInput", "50");

        assert!(session.on_withdraw().await.unwrap().is_some());
        assert!(page.document.alerts().is_empty());
    }
}

// ============================================================================
// End to end
// ============================================================================

mod end_to_end_tests {
    use super::*;

    /// Two descriptors: one ledger-and-house contract, one token contract
    #[tokio::test]
    async fn test_two_descriptor_page() {
        let house = fixtures::address(0x4001);
        let token = fixtures::address(0x4002);
        let config = AppConfig::new()
            .with_contract(ContractName::Accountant, "house.json")
            .with_contract(ContractName::ReserveHouse, "house.json")
            .with_contract(ContractName::Fiat, "token.json")
            .with_contract(ContractName::Weth, "token.json");
        let source = MockSource::new()
            .with(
                "house.json",
                fixtures::descriptor(
                    "HouseOfReserve",
                    fixtures::merged_abi(&[
                        fixtures::accountant_abi(),
                        fixtures::reserve_house_abi(),
                    ]),
                    &[("5777", house)],
                ),
            )
            .with(
                "token.json",
                fixtures::descriptor("MockWETH", fixtures::erc20_abi(), &[("5777", token)]),
            );

        let wallet = Rc::new(MockWallet::connected(&[TEST_ACCOUNT]));
        wallet.set_native_balance(ether(2));
        wallet.stub_uint(house, "reserveTokenID()", &[], U256::from(RESERVE_TOKEN_ID));
        wallet.stub_uint(house, "backedTokenID()", &[], U256::from(BACKED_TOKEN_ID));
        wallet.stub_uint(token, "balanceOf(address)", &[DynSolValue::Address(owner())], ether(3));
        for (id, balance) in [(RESERVE_TOKEN_ID, ether(4)), (BACKED_TOKEN_ID, ether(5))] {
            wallet.stub_uint(
                house,
                "balanceOf(address,uint256)",
                &[DynSolValue::Address(owner()), DynSolValue::Uint(U256::from(id), 256)],
                balance,
            );
        }
        let document = Rc::new(MockDocument::with_ids(ElementIds::default().all()));

        let startup = Session::initialize(config, Rc::clone(&wallet), &source, Rc::clone(&document))
            .await
            .unwrap();
        let session = match startup {
            Startup::Ready(session) => session,
            Startup::Onboarding(_) => panic!("wallet is installed"),
        };
        session.on_connect().await;

        assert_eq!(document.text("getAccountsResult"), TEST_ACCOUNT);
        assert_eq!(document.text("getAccountBalance"), "2.0000");
        assert_eq!(document.text("mockwethAddr"), token.to_string());
        assert_eq!(document.text("getWETHBalance"), "3.0000");
        assert_eq!(document.text("yourReserves"), "4.0000");
        assert_eq!(document.text("getEFIATBalance"), "3.00");
        assert_eq!(document.text("yourMinted"), "5.00");

        assert!(wallet.transactions().is_empty());
        assert!(!wallet.methods().iter().any(|m| m == "eth_sendTransaction"));
        assert!(document.alerts().is_empty());
    }
}

// ============================================================================
// Properties
// ============================================================================

mod property_tests {
    use super::*;
    use efiat_testing::{base_units, malformed_amount_text, overdrawn_request};
    use futures::executor::block_on;
    use proptest::prelude::*;

    fn withdraw(reserves: U256, input: &str) -> (Result<Option<Submitted>>, Page) {
        let page = Page::standard();
        page.stub_balances(U256::ZERO, U256::ZERO, reserves, U256::ZERO, U256::ZERO);
        let result = block_on(async {
            let session = page.session().await;
            page.document.set_value("wethWithdrawInput", input);
            session.controller().withdraw().await.map(Some)
        });
        (result, page)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_overdraw_never_submits((reserves, request) in overdrawn_request()) {
            let (result, page) = withdraw(reserves, &request.to_string());
            let is_insufficient = matches!(result, Err(EfiatError::InsufficientBalance { .. }));
            prop_assert!(is_insufficient);
            prop_assert!(page.wallet.transactions().is_empty());
        }

        #[test]
        fn test_malformed_withdraw_never_submits(input in malformed_amount_text()) {
            let (result, page) = withdraw(U256::MAX, &input);
            let is_validation = matches!(result, Err(EfiatError::Validation(_)));
            prop_assert!(is_validation);
            prop_assert!(page.wallet.transactions().is_empty());
        }

        #[test]
        fn test_covered_withdraw_submits_once(reserves in base_units()) {
            let (result, page) = withdraw(reserves, &reserves.to_string());
            prop_assert!(result.is_ok());
            let sent = page.wallet.transactions();
            prop_assert_eq!(sent.len(), 1);
            prop_assert_eq!(sent[0].uint_arg(0), reserves);
        }
    }
}
