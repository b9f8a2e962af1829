use common_constants::OFFER_CANCEL_WAIT;
use common_errors::{
    ERROR_ALREADY_CHOSEN, ERROR_CANCEL_TOO_SOON, ERROR_CANT_BORROW_ZERO, ERROR_CANT_SUPPLY_ZERO,
    ERROR_EXPIRED, ERROR_NO_BORROW_OFFER, ERROR_OFFER_CANCELLED,
};
use common_structs::{Loan, LoanStatus, Offer};

use crate::{custody, storage, validation};

multiversx_sc::imports!();

/// Request/offer/accept/cancel: the bilateral matching phase of a loan, before any lender is
/// locked in. Implements `request`, `offerBorrow`, `acceptOffer`,
/// `cancelBorrowRequest` and `cancelBorrowOffer`.
#[multiversx_sc::module]
pub trait RequestsModule:
    storage::StorageModule + custody::CustodyModule + validation::ValidationModule
{
    fn create_loan_request(
        &self,
        term: u64,
        offer_expiration: u64,
        collateral_asset: EgldOrEsdtTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier,
        liquidation_threshold: BigUint,
        supply_amount: BigUint,
        borrow_amount: BigUint,
        stake_bps: BigUint,
    ) -> u64 {
        require!(supply_amount > 0, ERROR_CANT_SUPPLY_ZERO);
        require!(borrow_amount > 0, ERROR_CANT_BORROW_ZERO);

        let borrower = self.pull_exact(&collateral_asset, &supply_amount);

        let lending_id = self.next_loan_id();
        let loan = Loan {
            borrower,
            lender: ManagedAddress::zero(),
            collateral_asset,
            debt_asset,
            supply_amount,
            borrow_amount,
            rate: BigUint::zero(),
            term,
            offer_expiration,
            liquidation_threshold,
            stake_bps,
            start: 0,
            repaid_debt: BigUint::zero(),
            allow_any_liquidator: false,
            grace_period: 0,
            status: LoanStatus::Requested,
            liquidator: ManagedAddress::zero(),
            liquidation_start: 0,
            pending_report_id: 0,
            pending_oracle_bond: BigUint::zero(),
        };
        self.loans(lending_id).set(loan);

        lending_id
    }

    fn place_borrow_offer(
        &self,
        lending_id: u64,
        amount: BigUint,
        rate: BigUint,
        allow_any_liquidator: bool,
    ) -> u64 {
        let loan = self.get_loan_or_fail(lending_id);
        self.require_requested(&loan);
        require!(self.now() <= loan.offer_expiration, ERROR_EXPIRED);

        let lender = self.pull_exact(&loan.debt_asset, &amount);

        let offer_number = self.next_offer_number(lending_id);
        self.offers(lending_id, offer_number).set(Offer {
            lender,
            amount,
            rate,
            allow_any_liquidator,
            created_at: self.now(),
            chosen: false,
            cancelled: false,
        });

        offer_number
    }

    fn accept_borrow_offer(&self, lending_id: u64, offer_number: u64) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_caller(&loan.borrower);
        self.require_requested(&loan);

        let mut offer = self.offers(lending_id, offer_number).get();
        require!(!offer.cancelled, ERROR_OFFER_CANCELLED);
        require!(!offer.chosen, ERROR_ALREADY_CHOSEN);

        offer.chosen = true;
        self.offers(lending_id, offer_number).set(&offer);

        loan.lender = offer.lender;
        loan.borrow_amount = offer.amount.clone();
        loan.rate = offer.rate.clone();
        loan.allow_any_liquidator = offer.allow_any_liquidator;
        loan.start = self.now();
        loan.status = LoanStatus::Active;

        let borrower = loan.borrower.clone();
        let debt_asset = loan.debt_asset.clone();
        let borrow_amount = loan.borrow_amount.clone();
        self.loans(lending_id).set(loan);

        self.push(&debt_asset, &borrower, &borrow_amount);
    }

    fn cancel_loan_request(&self, lending_id: u64) {
        let mut loan = self.get_loan_or_fail(lending_id);
        self.require_caller(&loan.borrower);
        self.require_requested(&loan);

        loan.status = LoanStatus::Cancelled;
        let borrower = loan.borrower.clone();
        let collateral_asset = loan.collateral_asset.clone();
        let supply_amount = loan.supply_amount.clone();
        self.loans(lending_id).set(loan);

        self.push(&collateral_asset, &borrower, &supply_amount);
    }

    fn cancel_borrow_offer_impl(&self, lending_id: u64, offer_number: u64) {
        let loan = self.get_loan_or_fail(lending_id);
        let mut offer = self.offers(lending_id, offer_number).get();

        // Checked before `cancelled`, per spec: a re-cancel surfaces as "no borrow offer".
        require!(offer.amount > 0, ERROR_NO_BORROW_OFFER);
        require!(!offer.chosen, ERROR_ALREADY_CHOSEN);
        self.require_caller(&offer.lender);
        require!(
            self.now() >= offer.created_at + OFFER_CANCEL_WAIT,
            ERROR_CANCEL_TOO_SOON
        );

        let refund_amount = offer.amount.clone();
        offer.cancelled = true;
        offer.amount = BigUint::zero();
        self.offers(lending_id, offer_number).set(&offer);

        self.push(&loan.debt_asset, &offer.lender, &refund_amount);
    }
}
