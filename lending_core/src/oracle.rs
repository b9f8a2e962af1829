use common_constants::{
    ORACLE_DISPUTE_DELAY, ORACLE_FEE_BRACKET_MULTIPLIER, ORACLE_LIQUIDITY_SEED_DIVISOR,
    ORACLE_PROTOCOL_FEE_RATE, ORACLE_SETTLEMENT_DELAY,
};
use common_proxies::PriceOracleProxy;

use crate::storage;

multiversx_sc::imports!();

/// `OracleBridge`: the outbound call that opens a price report, and the bookkeeping
/// (`reportId -> lendingId`) that routes the oracle's eventual callback back to the specific
/// loan awaiting it. The oracle's own dispute/settlement mechanism is a separate contract and
/// out of scope here.
#[multiversx_sc::module]
pub trait OracleBridgeModule: storage::StorageModule {
    /// Opens a price report for `lending_id`, forwarding `oracle_amount_debt` of the loan's
    /// debt asset to the oracle as its bonding payment. Returns the report id and records the
    /// `reportId -> lendingId` mapping so `onOracleSettle` can route the eventual callback.
    fn open_price_report(
        &self,
        lending_id: u64,
        collateral_asset: &EgldOrEsdtTokenIdentifier,
        debt_asset: &EgldOrEsdtTokenIdentifier,
        proposal_collateral: &BigUint,
        oracle_amount_debt: &BigUint,
    ) -> u64 {
        let oracle_address = self.oracle_address().get();

        let report_id = self
            .tx()
            .to(&oracle_address)
            .typed(PriceOracleProxy)
            .open_report(
                lending_id,
                collateral_asset.clone(),
                debt_asset.clone(),
                proposal_collateral.clone(),
                oracle_amount_debt.clone(),
                BigUint::from(ORACLE_PROTOCOL_FEE_RATE),
                ORACLE_SETTLEMENT_DELAY,
                ORACLE_DISPUTE_DELAY,
                ORACLE_FEE_BRACKET_MULTIPLIER,
            )
            .egld_or_single_esdt(debt_asset, 0u64, oracle_amount_debt)
            .returns(ReturnsResult)
            .sync_call();

        self.report_lending_id(report_id).set(lending_id);
        report_id
    }

    /// The initial price proposal offered alongside a fresh liquidation's price report:
    /// `supply / 10` of the collateral asset.
    fn liquidity_seed(&self, supply: &BigUint) -> BigUint {
        supply / BigUint::from(ORACLE_LIQUIDITY_SEED_DIVISOR)
    }
}
