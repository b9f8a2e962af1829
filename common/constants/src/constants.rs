#![no_std]

/// One year, exactly, for interest accrual. No leap-year smoothing.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// `rate` is expressed against this scale: `rate = 1e8` means 10% annualized.
pub const RATE_SCALE: u64 = 1_000_000_000;
/// `liquidationThreshold` is expressed against this scale: `8e6` means 80%.
pub const THRESHOLD_SCALE: u64 = 10_000_000;
/// `stakeBps` is expressed against this scale: `100` means 1%.
pub const STAKE_SCALE: u64 = 10_000;

/// Fixed protocol fee rate charged by the oracle on every report, 1%.
pub const ORACLE_PROTOCOL_FEE_RATE: u64 = 100_000;
/// Seconds the oracle holds a report open for disputes before it can settle.
pub const ORACLE_SETTLEMENT_DELAY: u64 = 300;
/// Seconds a fresh dispute keeps the report open past the last challenge.
pub const ORACLE_DISPUTE_DELAY: u64 = 60;
/// Multiplier applied to the dispute bond for each escalation bracket.
pub const ORACLE_FEE_BRACKET_MULTIPLIER: u64 = 200;
/// The oracle's initial liquidity seed is this fraction of the loan's supply.
pub const ORACLE_LIQUIDITY_SEED_DIVISOR: u128 = 10;

/// Minimum age of an unfilled offer before its author may cancel it.
pub const OFFER_CANCEL_WAIT: u64 = 60;

/// Base grace period granted after a failed liquidation that settles past maturity.
pub const GRACE_PERIOD_BASE: u64 = 300;
/// Grace period scales with how long the failed liquidation was open, at this multiplier.
pub const GRACE_PERIOD_DURATION_MULTIPLIER: u64 = 2;
/// A liquidation opened within this many seconds of maturity still earns a grace period
/// on failure, even if the oracle settles before `start + term`.
pub const GRACE_PERIOD_NEAR_MATURITY_WINDOW: u64 = 300;
