use common_constants::{
    GRACE_PERIOD_BASE, GRACE_PERIOD_DURATION_MULTIPLIER, GRACE_PERIOD_NEAR_MATURITY_WINDOW,
};
use common_errors::{ERROR_ARRANGEMENT_EXPIRED, ERROR_STALE_REQUEST, ERROR_WRONG_LIQUIDATOR};
use common_structs::{LiquidationOutcome, LoanStatus, OracleRatio};

use crate::{custody, oracle, storage, validation};

multiversx_sc::imports!();

/// Liquidation: opening a price report against an `Active` loan suspected of breaching its
/// threshold, and resolving the oracle's eventual callback into one of the three outcomes of
/// (failed / underwater / equity-remaining). Implements `liquidate` and
/// `onOracleSettle`.
#[multiversx_sc::module]
pub trait LiquidationModule:
    storage::StorageModule
    + custody::CustodyModule
    + oracle::OracleBridgeModule
    + validation::ValidationModule
    + common_math::NumericKernelModule
    + common_events::EventsModule
{
    #[allow(clippy::too_many_arguments)]
    fn open_liquidation(
        &self,
        lending_id: u64,
        expected_supply_amount: BigUint,
        oracle_amount_debt: BigUint,
        expected_borrow_amount: BigUint,
        expected_start: u64,
        expected_stake_bps: BigUint,
        expected_initial_liquidity: BigUint,
    ) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_active(&loan);
        require!(self.now() <= loan.maturity(), ERROR_ARRANGEMENT_EXPIRED);

        let caller = self.blockchain().get_caller();
        if !loan.allow_any_liquidator {
            require!(caller == loan.lender, ERROR_WRONG_LIQUIDATOR);
        }

        require!(
            loan.supply_amount == expected_supply_amount
                && loan.borrow_amount == expected_borrow_amount
                && loan.start == expected_start
                && loan.stake_bps == expected_stake_bps,
            ERROR_STALE_REQUEST
        );

        let stake = self.token_stake(&loan.supply_amount, &loan.stake_bps);
        let liquidity_seed = self.liquidity_seed(&loan.supply_amount);
        require!(
            liquidity_seed == expected_initial_liquidity,
            ERROR_STALE_REQUEST
        );

        let combined_collateral = &stake + &liquidity_seed;
        self.pull_two(
            &loan.collateral_asset,
            &combined_collateral,
            &loan.debt_asset,
            &oracle_amount_debt,
        );

        let report_id = self.open_price_report(
            lending_id,
            &loan.collateral_asset,
            &loan.debt_asset,
            &liquidity_seed,
            &oracle_amount_debt,
        );

        loan.status = LoanStatus::InLiquidation;
        loan.liquidator = caller.clone();
        loan.liquidation_start = self.now();
        loan.pending_report_id = report_id;
        loan.pending_oracle_bond = oracle_amount_debt;
        self.loans(lending_id).set(loan);

        self.liquidation_opened_event(lending_id, &caller, report_id);
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_oracle_settlement(
        &self,
        report_id: u64,
        final_ratio: OracleRatio<Self::Api>,
        fees_collateral: BigUint,
        fees_debt: BigUint,
        settle_time: u64,
    ) {
        self.require_caller(&self.oracle_address().get());

        let mapper = self.report_lending_id(report_id);
        if mapper.is_empty() {
            // Unknown or already-settled report id: a silent no-op.
            return;
        }
        let lending_id = mapper.get();
        let mut loan = self.loans(lending_id).get();
        if loan.status != LoanStatus::InLiquidation {
            return;
        }
        mapper.clear();

        let debt_now = self.owed_now(&loan.borrow_amount, &loan.rate, loan.term, loan.start, self.now());
        let debt_supply_terms =
            self.debt_in_supply_terms(&debt_now, &final_ratio.collateral, &final_ratio.debt);

        let outcome =
            self.resolve_liquidation(&loan.supply_amount, &debt_supply_terms, &loan.liquidation_threshold);

        let liquidator = loan.liquidator.clone();
        let lender = loan.lender.clone();
        let borrower = loan.borrower.clone();
        let collateral_asset = loan.collateral_asset.clone();
        let debt_asset = loan.debt_asset.clone();

        let stake = self.token_stake(&loan.supply_amount, &loan.stake_bps);
        let liquidity_seed = self.liquidity_seed(&loan.supply_amount);
        let oracle_bond = loan.pending_oracle_bond.clone();
        // The liquidator's liquidity seed (collateral) and price-proposal bond (debt) return to
        // them in every outcome — both are the liquidator's own stake, not a fee or forfeiture;
        // only the equity/underwater split below ever routes collateral elsewhere.
        self.push(&collateral_asset, &liquidator, &liquidity_seed);
        self.push(&debt_asset, &liquidator, &oracle_bond);

        // Partial repayments accrued in `repaidDebt` rather than reaching the lender as they
        // came in (see servicing::repay_debt_impl); a terminal outcome here must flush them
        // now, the same as claimCollateral does, or they'd be stranded once repaidDebt's
        // obligation is no longer tracked against a live loan.
        let repaid_debt = loan.repaid_debt.clone();

        match outcome {
            LiquidationOutcome::Failed => {
                loan.supply_amount += &stake;
                loan.grace_period = self.grace_period_for_failed_liquidation(&loan, settle_time);
                loan.status = LoanStatus::Active;
                loan.liquidator = ManagedAddress::zero();
                loan.liquidation_start = 0;
                loan.pending_report_id = 0;
                loan.pending_oracle_bond = BigUint::zero();
                self.loans(lending_id).set(&loan);
            }
            LiquidationOutcome::Underwater => {
                loan.status = LoanStatus::Finished;
                self.loans(lending_id).set(&loan);

                self.push(&collateral_asset, &lender, &loan.supply_amount);
                self.push(&collateral_asset, &liquidator, &stake);
                self.push(&debt_asset, &lender, &repaid_debt);
            }
            LiquidationOutcome::EquityRemaining => {
                let buffer = &loan.supply_amount - &debt_supply_terms;
                let (lender_piece, liquidator_piece) = self.equity_split(&buffer);

                loan.status = LoanStatus::Finished;
                self.loans(lending_id).set(&loan);

                self.push(&collateral_asset, &lender, &(&debt_supply_terms + &lender_piece));
                self.push(&collateral_asset, &liquidator, &(&liquidator_piece + &stake));
                self.push(&debt_asset, &lender, &repaid_debt);
            }
        }

        let (fee_collateral_borrower, fee_collateral_lender, fee_collateral_liquidator) =
            self.fee_split(&fees_collateral);
        self.push(&collateral_asset, &borrower, &fee_collateral_borrower);
        self.push(&collateral_asset, &lender, &fee_collateral_lender);
        self.push(&collateral_asset, &liquidator, &fee_collateral_liquidator);

        let (fee_debt_borrower, fee_debt_lender, fee_debt_liquidator) = self.fee_split(&fees_debt);
        self.push(&debt_asset, &borrower, &fee_debt_borrower);
        self.push(&debt_asset, &lender, &fee_debt_lender);
        self.push(&debt_asset, &liquidator, &fee_debt_liquidator);

        self.liquidation_settled_event(lending_id, report_id, &outcome, loan.grace_period);
    }

    /// `300 + 2 * (settleTime - liquidationStart)` once the liquidation settles within the
    /// near-maturity window or past maturity; zero otherwise. The near-maturity and
    /// past-maturity branches share one formula rather than two separate ones.
    fn grace_period_for_failed_liquidation(
        &self,
        loan: &common_structs::Loan<Self::Api>,
        settle_time: u64,
    ) -> u64 {
        let maturity = loan.maturity();
        let near_maturity_from = maturity.saturating_sub(GRACE_PERIOD_NEAR_MATURITY_WINDOW);
        if settle_time > maturity || settle_time > near_maturity_from {
            GRACE_PERIOD_BASE
                + (settle_time.saturating_sub(loan.liquidation_start)) * GRACE_PERIOD_DURATION_MULTIPLIER
        } else {
            0
        }
    }
}
