#![no_std]

multiversx_sc::imports!();

pub use common_structs::OracleRatio;

/// Outbound interface the core calls to open a liquidation price report. The oracle's own
/// dispute/settlement machinery lives entirely on the other side of this call and is out of
/// scope here; the core only needs `openReport` and, on the oracle's own schedule, a callback
/// into `onOracleSettle` (declared on the core's contract trait, not here).
#[multiversx_sc::proxy]
pub trait PriceOracleProxy {
    #[payable("*")]
    #[endpoint(openReport)]
    fn open_report(
        &self,
        lending_id: u64,
        collateral_asset: EgldOrEsdtTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier,
        proposal_collateral: BigUint,
        proposal_debt: BigUint,
        protocol_fee_rate: BigUint,
        settlement_delay: u64,
        dispute_delay: u64,
        fee_bracket_multiplier: u64,
    ) -> u64;
}

/// Inbound interface the oracle calls once a report settles. Declared here so the oracle side
/// (and its mocks) can depend only on `common-proxies`, not on the core crate itself.
#[multiversx_sc::proxy]
pub trait LendingCoreCallbackProxy {
    #[endpoint(onOracleSettle)]
    fn on_oracle_settle(
        &self,
        report_id: u64,
        final_ratio: OracleRatio<Self::Api>,
        fees_collateral: BigUint,
        fees_debt: BigUint,
        settle_time: u64,
    );
}
