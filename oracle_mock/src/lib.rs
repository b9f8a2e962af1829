#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_proxies::LendingCoreCallbackProxy;
use common_structs::OracleRatio;

/// A minimal stand-in for the real price oracle (dispute auctions, fee accrual - entirely out
/// of scope per the core's own spec). Exposes just the two calls `lending_core` actually needs:
/// `openReport`, which escrows the debt-asset proposal bond and remembers which core contract
/// and loan it belongs to, and a test-only `settleReport` that lets a whitebox test drive the
/// callback directly instead of simulating a real dispute auction.
#[multiversx_sc::contract]
pub trait OracleMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    #[storage_mapper("report_count")]
    fn report_count(&self) -> SingleValueMapper<u64>;

    #[view(getReportCore)]
    #[storage_mapper("report_core")]
    fn report_core(&self, report_id: u64) -> SingleValueMapper<ManagedAddress>;

    #[view(getReportLendingId)]
    #[storage_mapper("report_lending_id")]
    fn report_lending_id(&self, report_id: u64) -> SingleValueMapper<u64>;

    #[storage_mapper("report_debt_asset")]
    fn report_debt_asset(&self, report_id: u64) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[storage_mapper("report_debt_bond")]
    fn report_debt_bond(&self, report_id: u64) -> SingleValueMapper<BigUint>;

    #[storage_mapper("report_collateral_asset")]
    fn report_collateral_asset(&self, report_id: u64) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[payable("*")]
    #[endpoint(openReport)]
    #[allow(clippy::too_many_arguments)]
    fn open_report(
        &self,
        lending_id: u64,
        collateral_asset: EgldOrEsdtTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier,
        _proposal_collateral: BigUint,
        proposal_debt: BigUint,
        _protocol_fee_rate: BigUint,
        _settlement_delay: u64,
        _dispute_delay: u64,
        _fee_bracket_multiplier: u64,
    ) -> u64 {
        let payment = self.call_value().egld_or_single_esdt();
        require!(payment.token_identifier == debt_asset, "wrong bond asset");
        require!(payment.amount == proposal_debt, "wrong bond amount");

        let report_id = self.report_count().get() + 1;
        self.report_count().set(report_id);

        self.report_core(report_id).set(self.blockchain().get_caller());
        self.report_lending_id(report_id).set(lending_id);
        self.report_debt_asset(report_id).set(debt_asset);
        self.report_debt_bond(report_id).set(proposal_debt);
        self.report_collateral_asset(report_id).set(collateral_asset);

        report_id
    }

    /// Test-only entry point standing in for the real oracle's settlement auction: returns the
    /// escrowed debt-asset bond to the core contract, forwards `fees_collateral`/`fees_debt` as
    /// the protocol's remitted cut (the mock must be pre-funded by the test harness to cover
    /// both), and invokes `onOracleSettle` on the core with the supplied final ratio.
    #[payable("*")]
    #[endpoint(settleReport)]
    fn settle_report(
        &self,
        report_id: u64,
        final_ratio_collateral: BigUint,
        final_ratio_debt: BigUint,
        fees_collateral: BigUint,
        fees_debt: BigUint,
    ) {
        let core = self.report_core(report_id).get();
        let debt_asset = self.report_debt_asset(report_id).get();
        let collateral_asset = self.report_collateral_asset(report_id).get();
        let bond = self.report_debt_bond(report_id).get();
        let settle_time = self.blockchain().get_block_timestamp();

        self.report_core(report_id).clear();
        self.report_lending_id(report_id).clear();
        self.report_debt_asset(report_id).clear();
        self.report_debt_bond(report_id).clear();
        self.report_collateral_asset(report_id).clear();

        self.tx()
            .to(&core)
            .egld_or_single_esdt(&debt_asset, 0u64, &(&bond + &fees_debt))
            .transfer();
        if fees_collateral > 0 {
            self.tx()
                .to(&core)
                .egld_or_single_esdt(&collateral_asset, 0u64, &fees_collateral)
                .transfer();
        }

        self.tx()
            .to(&core)
            .typed(LendingCoreCallbackProxy)
            .on_oracle_settle(
                report_id,
                OracleRatio {
                    collateral: final_ratio_collateral,
                    debt: final_ratio_debt,
                },
                fees_collateral,
                fees_debt,
                settle_time,
            )
            .sync_call();
    }
}
