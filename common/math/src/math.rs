#![no_std]

use common_constants::{RATE_SCALE, SECONDS_PER_YEAR, THRESHOLD_SCALE, STAKE_SCALE};
use common_structs::LiquidationOutcome;

multiversx_sc::imports!();

/// Pure integer math shared by every transition: interest accrual, fee/equity splits and the
/// liquidation-threshold comparison. No state, no storage mappers - every function is a total
/// function of its arguments, so the rounding rules below are the only place grief vectors
/// around remainders can hide.
#[multiversx_sc::module]
pub trait NumericKernelModule {
    /// Interest owed if the loan ran the full term, truncating like Solidity integer division.
    #[inline]
    fn owed_at_maturity(&self, principal: &BigUint, rate: &BigUint, term: u64) -> BigUint {
        let interest = principal * term * rate / (BigUint::from(RATE_SCALE) * SECONDS_PER_YEAR);
        principal + &interest
    }

    /// Interest owed as of `now`, linear in elapsed time and capped at `term`. `now <= start`
    /// yields zero interest rather than a negative elapsed time.
    fn owed_now(
        &self,
        principal: &BigUint,
        rate: &BigUint,
        term: u64,
        start: u64,
        now: u64,
    ) -> BigUint {
        let elapsed = if now <= start {
            0u64
        } else {
            core::cmp::min(now - start, term)
        };
        let interest = principal * elapsed * rate / (BigUint::from(RATE_SCALE) * SECONDS_PER_YEAR);
        principal + &interest
    }

    /// Converts a debt-asset amount into collateral-asset ("supply") terms using the oracle's
    /// final settled ratio.
    #[inline]
    fn debt_in_supply_terms(
        &self,
        debt_amount: &BigUint,
        ratio_collateral: &BigUint,
        ratio_debt: &BigUint,
    ) -> BigUint {
        debt_amount * ratio_collateral / ratio_debt
    }

    /// True once debt, expressed in supply terms, exceeds `supply * threshold`.
    #[inline]
    fn liquidation_breached(
        &self,
        supply: &BigUint,
        debt_supply_terms: &BigUint,
        threshold: &BigUint,
    ) -> bool {
        debt_supply_terms > &(supply * threshold / THRESHOLD_SCALE)
    }

    /// Splits a liquidation-equity buffer lender/liquidator, odd unit to the liquidator.
    fn equity_split(&self, buffer_supply: &BigUint) -> (BigUint, BigUint) {
        let lender_piece = buffer_supply / 2u64;
        let liquidator_piece = buffer_supply - &lender_piece;
        (lender_piece, liquidator_piece)
    }

    /// Splits an oracle protocol fee 50% borrower / 25% lender / 25% liquidator, remainder
    /// (from either halving) to the liquidator, who bears the oracle gas/stake risk.
    fn fee_split(&self, total_fee: &BigUint) -> (BigUint, BigUint, BigUint) {
        let borrower_share = total_fee / 2u64;
        let lender_share = &borrower_share / 2u64;
        let liquidator_share = total_fee - &borrower_share - &lender_share;
        (borrower_share, lender_share, liquidator_share)
    }

    /// The liquidator's required collateral-asset bond for opening a liquidation.
    #[inline]
    fn token_stake(&self, supply: &BigUint, stake_bps: &BigUint) -> BigUint {
        supply * stake_bps / STAKE_SCALE
    }

    /// Case-splits a settled liquidation into failed / underwater / equity-remaining.
    fn resolve_liquidation(
        &self,
        supply: &BigUint,
        debt_supply_terms: &BigUint,
        threshold: &BigUint,
    ) -> LiquidationOutcome {
        if !self.liquidation_breached(supply, debt_supply_terms, threshold) {
            LiquidationOutcome::Failed
        } else if debt_supply_terms >= supply {
            LiquidationOutcome::Underwater
        } else {
            LiquidationOutcome::EquityRemaining
        }
    }
}
