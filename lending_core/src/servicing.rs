use common_errors::{ERROR_EXPIRED, ERROR_NOT_EXPIRED};
use common_structs::LoanStatus;

use crate::{custody, validation};

multiversx_sc::imports!();

/// Day-to-day servicing of an already-`Active` loan, before anything goes wrong:
/// `topUpCollateral`, `repayDebt`, `claimCollateral`.
#[multiversx_sc::module]
pub trait ServicingModule:
    validation::ValidationModule + custody::CustodyModule + common_math::NumericKernelModule
{
    fn top_up_collateral_impl(&self, lending_id: u64, amount: BigUint) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_caller(&loan.borrower);
        self.require_active_lowercase_liquidation_guard(&loan);

        self.pull_exact(&loan.collateral_asset, &amount);
        loan.supply_amount += amount;
        self.loans(lending_id).set(loan);
    }

    /// Pulls exactly `amount` of the debt asset from the borrower (the `#[payable]` endpoint
    /// enforces this), applies up to `outstanding` of it to the loan and refunds any excess.
    /// Partial payments accrue in `repaidDebt` rather than reaching the lender immediately;
    /// only a full payoff (or a later `claimCollateral`) disburses them.
    /// Returns `(transferred, outstanding_after, finished)` for the caller to emit events from.
    fn repay_debt_impl(&self, lending_id: u64, amount: BigUint) -> (BigUint, BigUint, bool) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_caller(&loan.borrower);
        self.require_active_lowercase_liquidation_guard(&loan);
        require!(self.now() <= loan.expiration_with_grace(), ERROR_EXPIRED);

        self.pull_exact(&loan.debt_asset, &amount);

        let owed_at_maturity = self.owed_at_maturity(&loan.borrow_amount, &loan.rate, loan.term);
        let outstanding = &owed_at_maturity - &loan.repaid_debt;
        let transfer = if amount > outstanding {
            outstanding.clone()
        } else {
            amount.clone()
        };
        let refund = &amount - &transfer;

        let lender = loan.lender.clone();
        let borrower = loan.borrower.clone();
        let debt_asset = loan.debt_asset.clone();

        let finished = transfer == outstanding;
        if finished {
            // A full payoff must also flush whatever `repaid_debt` prior partial repayments
            // accrued and held in custody — the lender's payout here is the whole
            // `owed_at_maturity`, not just this call's `transfer`, or that held balance would
            // be stranded once `repaid_debt`'s obligation stops being tracked against a live
            // loan. Mirrors claim_collateral_impl and the liquidation settlement branches.
            let payoff = &transfer + &loan.repaid_debt;
            loan.status = LoanStatus::Finished;
            let collateral_asset = loan.collateral_asset.clone();
            let supply_amount = loan.supply_amount.clone();
            self.loans(lending_id).set(loan);

            self.push(&debt_asset, &lender, &payoff);
            self.push(&collateral_asset, &borrower, &supply_amount);
        } else {
            loan.repaid_debt += &transfer;
            self.loans(lending_id).set(loan);
        }
        self.push(&debt_asset, &borrower, &refund);

        (transfer, &outstanding - &transfer, finished)
    }

    fn claim_collateral_impl(&self, lending_id: u64) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_active(&loan);
        require!(self.now() > loan.expiration_with_grace(), ERROR_NOT_EXPIRED);

        loan.status = LoanStatus::Finished;
        let lender = loan.lender.clone();
        let collateral_asset = loan.collateral_asset.clone();
        let debt_asset = loan.debt_asset.clone();
        let supply_amount = loan.supply_amount.clone();
        let repaid_debt = loan.repaid_debt.clone();
        self.loans(lending_id).set(loan);

        self.push(&collateral_asset, &lender, &supply_amount);
        self.push(&debt_asset, &lender, &repaid_debt);
    }
}
