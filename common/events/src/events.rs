#![no_std]

multiversx_sc::imports!();

pub use common_structs::*;

/// Every state-changing transition on a loan emits exactly one of these, indexed by
/// `lending_id` so indexers can replay a loan's full history without re-deriving it from
/// storage diffs.
#[multiversx_sc::module]
pub trait EventsModule {
    #[event("loan_requested")]
    fn loan_requested_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] borrower: &ManagedAddress,
        #[indexed] collateral_asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] debt_asset: &EgldOrEsdtTokenIdentifier,
        supply_amount: &BigUint,
        borrow_amount: &BigUint,
    );

    #[event("borrow_offered")]
    fn borrow_offered_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] offer_number: u64,
        #[indexed] lender: &ManagedAddress,
        amount: &BigUint,
        rate: &BigUint,
    );

    #[event("offer_accepted")]
    fn offer_accepted_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] offer_number: u64,
        #[indexed] lender: &ManagedAddress,
        borrow_amount: &BigUint,
        start: u64,
    );

    #[event("borrow_request_cancelled")]
    fn borrow_request_cancelled_event(&self, #[indexed] lending_id: u64);

    #[event("borrow_offer_cancelled")]
    fn borrow_offer_cancelled_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] offer_number: u64,
    );

    #[event("refi_params_changed")]
    fn refi_params_changed_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] nonce: u64,
        extra_demanded: &BigUint,
        supply_pulled: &BigUint,
    );

    #[event("refi_offered")]
    fn refi_offered_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] nonce: u64,
        #[indexed] offer_number: u64,
        #[indexed] lender: &ManagedAddress,
        rate: &BigUint,
    );

    #[event("refi_accepted")]
    fn refi_accepted_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] nonce: u64,
        #[indexed] offer_number: u64,
        new_lender: &ManagedAddress,
        new_borrow_amount: &BigUint,
    );

    #[event("refi_offer_cancelled")]
    fn refi_offer_cancelled_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] nonce: u64,
        #[indexed] offer_number: u64,
    );

    #[event("collateral_topped_up")]
    fn collateral_topped_up_event(
        &self,
        #[indexed] lending_id: u64,
        amount: &BigUint,
        new_supply_amount: &BigUint,
    );

    #[event("debt_repaid")]
    fn debt_repaid_event(
        &self,
        #[indexed] lending_id: u64,
        amount: &BigUint,
        remaining_outstanding: &BigUint,
    );

    #[event("loan_finished")]
    fn loan_finished_event(&self, #[indexed] lending_id: u64, #[indexed] reason: &ManagedBuffer);

    #[event("liquidation_opened")]
    fn liquidation_opened_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] liquidator: &ManagedAddress,
        #[indexed] report_id: u64,
    );

    #[event("liquidation_settled")]
    fn liquidation_settled_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] report_id: u64,
        #[indexed] outcome: &LiquidationOutcome,
        grace_period: u64,
    );

    #[event("collateral_claimed")]
    fn collateral_claimed_event(
        &self,
        #[indexed] lending_id: u64,
        #[indexed] claimant: &ManagedAddress,
    );
}
