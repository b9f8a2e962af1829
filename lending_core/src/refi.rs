use common_errors::{
    ERROR_ALREADY_CHOSEN, ERROR_CANCEL_TOO_SOON, ERROR_EXPIRED, ERROR_EXTRA_DEMANDED_CHANGED,
    ERROR_NO_BORROW_OFFER, ERROR_OFFER_CANCELLED, ERROR_PARAMS_ALREADY_SET,
    ERROR_REFI_NONCE_ALREADY_ACCEPTED, ERROR_REFI_PARAMS_NOT_SET, ERROR_REPAID_DEBT_CHANGED,
    ERROR_SUPPLY_BELOW_MINIMUM,
};
use common_constants::OFFER_CANCEL_WAIT;
use common_structs::RefiParams;

use crate::{custody, storage, validation};

multiversx_sc::imports!();

/// Refinancing: a borrower facing a loan close to its current lender's terms can ask for
/// better ones (or cash out extra debt / pull collateral) without unwinding the loan, by
/// rotating it to a new lender mid-flight. Implements `changeRefiParams`,
/// `offerRefiBorrow`, `acceptRefiOffer`, `cancelRefiBorrowOffer`.
#[multiversx_sc::module]
pub trait RefiModule:
    storage::StorageModule
    + custody::CustodyModule
    + validation::ValidationModule
    + common_math::NumericKernelModule
{
    fn set_refi_params(&self, lending_id: u64, extra_demanded: BigUint, supply_pulled: BigUint) {
        let loan = self.get_loan_or_fail(lending_id);
        self.require_caller(&loan.borrower);
        self.require_active(&loan);

        let existing = self.refi_params(lending_id).get();
        require!(!existing.set, ERROR_PARAMS_ALREADY_SET);

        let nonce = if existing.nonce == 0 { 1 } else { existing.nonce };
        self.refi_params(lending_id).set(RefiParams {
            set: true,
            extra_demanded,
            supply_pulled,
            nonce,
        });
    }

    fn place_refi_borrow_offer(
        &self,
        lending_id: u64,
        rate: BigUint,
        allow_any_liquidator: bool,
        repaid_debt_expected: BigUint,
        extra_demanded_expected: BigUint,
        min_supply_post_refi: BigUint,
    ) -> MultiValue2<u64, u64> {
        let loan = self.get_loan_or_fail(lending_id);
        let params = self.refi_params(lending_id).get();
        require!(params.set, ERROR_REFI_PARAMS_NOT_SET);

        let owed_now = self.owed_now(&loan.borrow_amount, &loan.rate, loan.term, loan.start, self.now());
        let pull_amount = owed_now + &extra_demanded_expected - &repaid_debt_expected;
        self.pull_exact(&loan.debt_asset, &pull_amount);

        let nonce = params.nonce;
        let offer_number = self.next_refi_offer_number(lending_id, nonce);
        self.refi_offers(lending_id, nonce, offer_number).set(common_structs::RefiOffer {
            lender: self.blockchain().get_caller(),
            rate,
            allow_any_liquidator,
            created_at: self.now(),
            repaid_debt_expected,
            extra_demanded_expected,
            min_supply_post_refi,
            amount_pulled: pull_amount,
            chosen: false,
            cancelled: false,
        });

        (offer_number, nonce).into()
    }

    fn accept_refi_offer_impl(&self, lending_id: u64, offer_number: u64, nonce: u64) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_caller(&loan.borrower);
        self.require_active(&loan);
        require!(self.now() <= loan.maturity(), ERROR_EXPIRED);

        let params = self.refi_params(lending_id).get();
        require!(nonce == params.nonce, ERROR_REFI_NONCE_ALREADY_ACCEPTED);

        let mut refi_offer = self.refi_offers(lending_id, nonce, offer_number).get();
        require!(!refi_offer.cancelled, ERROR_OFFER_CANCELLED);
        require!(!refi_offer.chosen, ERROR_ALREADY_CHOSEN);

        require!(
            loan.repaid_debt == refi_offer.repaid_debt_expected,
            ERROR_REPAID_DEBT_CHANGED
        );
        require!(
            params.extra_demanded == refi_offer.extra_demanded_expected,
            ERROR_EXTRA_DEMANDED_CHANGED
        );
        require!(
            &loan.supply_amount - &params.supply_pulled >= refi_offer.min_supply_post_refi,
            ERROR_SUPPLY_BELOW_MINIMUM
        );

        // `repaidDebt` was never forwarded as it accrued (it is held for terminal
        // disbursement), so the old lender's full payoff is the whole `owedNow` — the
        // freshly-pulled shortfall (`owedNow - repaidDebt`, what the new lender's offer
        // sized) plus the `repaidDebt` already sitting in custody from this loan's partial
        // repayments.
        let payoff_old_lender =
            self.owed_now(&loan.borrow_amount, &loan.rate, loan.term, loan.start, self.now());
        let new_borrow_amount =
            self.owed_at_maturity(&loan.borrow_amount, &loan.rate, loan.term) + &params.extra_demanded;

        refi_offer.chosen = true;
        self.refi_offers(lending_id, nonce, offer_number).set(&refi_offer);

        let old_lender = loan.lender.clone();
        let borrower = loan.borrower.clone();
        let debt_asset = loan.debt_asset.clone();
        let collateral_asset = loan.collateral_asset.clone();
        let extra_demanded = params.extra_demanded.clone();
        let supply_pulled = params.supply_pulled.clone();

        loan.lender = refi_offer.lender.clone();
        loan.rate = refi_offer.rate.clone();
        loan.allow_any_liquidator = refi_offer.allow_any_liquidator;
        loan.borrow_amount = new_borrow_amount.clone();
        loan.supply_amount -= &supply_pulled;
        loan.start = self.now();
        loan.repaid_debt = BigUint::zero();
        loan.grace_period = 0;
        self.loans(lending_id).set(&loan);

        self.refi_params(lending_id).set(RefiParams {
            set: false,
            extra_demanded: BigUint::zero(),
            supply_pulled: BigUint::zero(),
            nonce: nonce + 1,
        });

        self.push(&debt_asset, &old_lender, &payoff_old_lender);
        self.push(&debt_asset, &borrower, &extra_demanded);
        self.push(&collateral_asset, &borrower, &supply_pulled);
    }

    fn cancel_refi_borrow_offer_impl(&self, lending_id: u64, nonce: u64, offer_number: u64) {
        let loan = self.get_loan_or_fail(lending_id);
        let mut refi_offer = self.refi_offers(lending_id, nonce, offer_number).get();

        // Checked before `cancelled`, mirroring `cancelBorrowOffer`: a re-cancel surfaces as
        // "no borrow offer" rather than "offer cancelled".
        require!(refi_offer.amount_pulled > 0, ERROR_NO_BORROW_OFFER);
        require!(!refi_offer.chosen, ERROR_ALREADY_CHOSEN);
        self.require_caller(&refi_offer.lender);
        require!(
            self.now() >= refi_offer.created_at + OFFER_CANCEL_WAIT,
            ERROR_CANCEL_TOO_SOON
        );

        let refund_amount = refi_offer.amount_pulled.clone();
        refi_offer.cancelled = true;
        refi_offer.amount_pulled = BigUint::zero();
        self.refi_offers(lending_id, nonce, offer_number).set(&refi_offer);

        self.push(&loan.debt_asset, &refi_offer.lender, &refund_amount);
    }
}
