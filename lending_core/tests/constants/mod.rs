use multiversx_sc::types::{TestAddress, TestSCAddress};
use multiversx_sc_scenario::imports::{MxscPath, TestTokenIdentifier};

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

pub const RATE_SCALE: u128 = 1_000_000_000;
pub const THRESHOLD_SCALE: u128 = 10_000_000;

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const BORROWER_ADDRESS: TestAddress = TestAddress::new("borrower");
pub const LENDER_ADDRESS: TestAddress = TestAddress::new("lender");
pub const LENDER2_ADDRESS: TestAddress = TestAddress::new("lender2");
pub const LIQUIDATOR_ADDRESS: TestAddress = TestAddress::new("liquidator");

pub const LENDING_CORE_ADDRESS: TestSCAddress = TestSCAddress::new("lending-core");
pub const ORACLE_MOCK_ADDRESS: TestSCAddress = TestSCAddress::new("oracle-mock");

pub const LENDING_CORE_PATH: MxscPath = MxscPath::new("../output/lending_core.mxsc.json");
pub const ORACLE_MOCK_PATH: MxscPath = MxscPath::new("../oracle_mock/output/oracle_mock.mxsc.json");

pub const COLLATERAL_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("COLL-abcdef");
pub const DEBT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("DEBT-abcdef");
pub const COLLATERAL_DECIMALS: usize = 18;
pub const DEBT_DECIMALS: usize = 18;
