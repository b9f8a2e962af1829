#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod custody;
pub mod liquidation;
pub mod oracle;
pub mod refi;
pub mod requests;
pub mod servicing;
pub mod storage;
pub mod validation;
pub mod views;

pub use common_structs::*;

/// Peer-to-peer collateralized lending: a deterministic state machine over bilateral,
/// fixed-term loans. Every public transition below validates against `storage`-held state,
/// issues `custody`/`oracle` side effects, and commits the result back to storage - there is
/// no suspension point within a transition; the only asynchronous boundary is the oracle
/// settlement callback (`onOracleSettle`), which re-enters a loan already `InLiquidation`.
#[multiversx_sc::contract]
pub trait LendingCore:
    storage::StorageModule
    + custody::CustodyModule
    + oracle::OracleBridgeModule
    + validation::ValidationModule
    + requests::RequestsModule
    + refi::RefiModule
    + servicing::ServicingModule
    + liquidation::LiquidationModule
    + views::ViewsModule
    + common_math::NumericKernelModule
    + common_events::EventsModule
{
    /// The oracle contract address is the one piece of genuinely external configuration this
    /// protocol needs - there is no asset allowlist or interest-rate curve to configure.
    #[init]
    fn init(&self, oracle_address: ManagedAddress) {
        self.oracle_address().set(oracle_address);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Opens a loan request: pulls `supply_amount` of `collateral_asset` from the caller
    /// (who becomes the borrower) and creates a loan in `Requested`, open to offers until
    /// `offer_expiration`.
    #[payable("*")]
    #[endpoint(request)]
    #[allow(clippy::too_many_arguments)]
    fn request(
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
        let lending_id = self.create_loan_request(
            term,
            offer_expiration,
            collateral_asset.clone(),
            debt_asset.clone(),
            liquidation_threshold,
            supply_amount.clone(),
            borrow_amount.clone(),
            stake_bps,
        );

        self.loan_requested_event(
            lending_id,
            &self.blockchain().get_caller(),
            &collateral_asset,
            &debt_asset,
            &supply_amount,
            &borrow_amount,
        );

        lending_id
    }

    /// Bids `amount` of the loan's debt asset against a still-`Requested` loan.
    #[payable("*")]
    #[endpoint(offerBorrow)]
    fn offer_borrow(
        &self,
        lending_id: u64,
        amount: BigUint,
        rate: BigUint,
        allow_any_liquidator: bool,
    ) -> u64 {
        let offer_number =
            self.place_borrow_offer(lending_id, amount.clone(), rate.clone(), allow_any_liquidator);

        self.borrow_offered_event(
            lending_id,
            offer_number,
            &self.blockchain().get_caller(),
            &amount,
            &rate,
        );

        offer_number
    }

    /// The borrower accepts a pending offer, moving the loan to `Active` and receiving the
    /// principal.
    #[endpoint(acceptOffer)]
    fn accept_offer(&self, lending_id: u64, offer_number: u64) {
        self.accept_borrow_offer(lending_id, offer_number);

        let loan = self.loans(lending_id).get();
        self.offer_accepted_event(lending_id, offer_number, &loan.lender, &loan.borrow_amount, loan.start);
    }

    /// The borrower withdraws a still-`Requested` loan, recovering the pledged collateral.
    /// Any offers already placed against it remain independently cancellable by their lenders.
    #[endpoint(cancelBorrowRequest)]
    fn cancel_borrow_request(&self, lending_id: u64) {
        self.cancel_loan_request(lending_id);
        self.borrow_request_cancelled_event(lending_id);
    }

    /// An offer's lender recovers their bid once it has sat unfilled for at least
    /// `OFFER_CANCEL_WAIT` seconds and was never chosen.
    #[endpoint(cancelBorrowOffer)]
    fn cancel_borrow_offer(&self, lending_id: u64, offer_number: u64) {
        self.cancel_borrow_offer_impl(lending_id, offer_number);
        self.borrow_offer_cancelled_event(lending_id, offer_number);
    }

    /// The borrower opens a refinance window on an `Active` loan, asking for cash-out and/or
    /// a collateral pull to be funded by whichever lender's refi-offer they later accept.
    #[endpoint(changeRefiParams)]
    fn change_refi_params(&self, lending_id: u64, extra_demanded: BigUint, supply_pulled: BigUint) {
        self.set_refi_params(lending_id, extra_demanded.clone(), supply_pulled.clone());

        let nonce = self.refi_params(lending_id).get().nonce;
        self.refi_params_changed_event(lending_id, nonce, &extra_demanded, &supply_pulled);
    }

    /// A lender bids to refinance an open refi window, pulling the debt-asset amount their
    /// offer would require upfront.
    #[payable("*")]
    #[endpoint(offerRefiBorrow)]
    fn offer_refi_borrow(
        &self,
        lending_id: u64,
        rate: BigUint,
        allow_any_liquidator: bool,
        repaid_debt_expected: BigUint,
        extra_demanded_expected: BigUint,
        min_supply_post_refi: BigUint,
    ) -> MultiValue2<u64, u64> {
        let result = self.place_refi_borrow_offer(
            lending_id,
            rate.clone(),
            allow_any_liquidator,
            repaid_debt_expected,
            extra_demanded_expected,
            min_supply_post_refi,
        );
        let (offer_number, nonce) = result.clone().into_tuple();

        self.refi_offered_event(lending_id, nonce, offer_number, &self.blockchain().get_caller(), &rate);

        result
    }

    /// The borrower accepts a refi-offer: the old lender is paid off, the borrower receives
    /// any cash-out and pulled collateral, and the loan restarts under the new lender's terms.
    #[endpoint(acceptRefiOffer)]
    fn accept_refi_offer(&self, lending_id: u64, offer_number: u64, nonce: u64) {
        self.accept_refi_offer_impl(lending_id, offer_number, nonce);

        let loan = self.loans(lending_id).get();
        self.refi_accepted_event(lending_id, nonce, offer_number, &loan.lender, &loan.borrow_amount);
    }

    /// Symmetric to `cancelBorrowOffer`, scoped to a `(nonce, offerNumber)` refi-offer.
    #[endpoint(cancelRefiBorrowOffer)]
    fn cancel_refi_borrow_offer(&self, lending_id: u64, nonce: u64, offer_number: u64) {
        self.cancel_refi_borrow_offer_impl(lending_id, nonce, offer_number);
        self.refi_offer_cancelled_event(lending_id, nonce, offer_number);
    }

    /// Adds collateral to an `Active` loan outside of a refinance.
    #[payable("*")]
    #[endpoint(topUpCollateral)]
    fn top_up_collateral(&self, lending_id: u64, amount: BigUint) {
        self.top_up_collateral_impl(lending_id, amount.clone());

        let loan = self.loans(lending_id).get();
        self.collateral_topped_up_event(lending_id, &amount, &loan.supply_amount);
    }

    /// Repays up to `amount` of the loan's outstanding debt. A full repay finishes the loan
    /// and returns the collateral; a partial repay accrues toward `repaidDebt`.
    #[payable("*")]
    #[endpoint(repayDebt)]
    fn repay_debt(&self, lending_id: u64, amount: BigUint) {
        let (transferred, remaining, finished) = self.repay_debt_impl(lending_id, amount);

        self.debt_repaid_event(lending_id, &transferred, &remaining);
        if finished {
            self.loan_finished_event(lending_id, &ManagedBuffer::from(b"repaid"));
        }
    }

    /// Opens a liquidation against an `Active` loan past its threshold: a price report is
    /// opened with the oracle and the loan is locked in `InLiquidation` until settlement.
    #[payable("*")]
    #[endpoint(liquidate)]
    #[allow(clippy::too_many_arguments)]
    fn liquidate(
        &self,
        lending_id: u64,
        expected_supply_amount: BigUint,
        oracle_amount_debt: BigUint,
        expected_borrow_amount: BigUint,
        expected_start: u64,
        expected_stake_bps: BigUint,
        expected_initial_liquidity: BigUint,
    ) {
        self.open_liquidation(
            lending_id,
            expected_supply_amount,
            oracle_amount_debt,
            expected_borrow_amount,
            expected_start,
            expected_stake_bps,
            expected_initial_liquidity,
        );
    }

    /// Inbound callback from the oracle contract once a price report settles. Routes to the
    /// loan awaiting `report_id`; a no-op for an unknown or already-resolved report.
    #[endpoint(onOracleSettle)]
    fn on_oracle_settle(
        &self,
        report_id: u64,
        final_ratio: OracleRatio<Self::Api>,
        fees_collateral: BigUint,
        fees_debt: BigUint,
        settle_time: u64,
    ) {
        self.resolve_oracle_settlement(report_id, final_ratio, fees_collateral, fees_debt, settle_time);
    }

    /// Any caller may claim an expired, non-liquidating loan on the lender's behalf once the
    /// grace-adjusted maturity has passed.
    #[endpoint(claimCollateral)]
    fn claim_collateral(&self, lending_id: u64) {
        self.claim_collateral_impl(lending_id);

        let caller = self.blockchain().get_caller();
        self.collateral_claimed_event(lending_id, &caller);
    }
}
