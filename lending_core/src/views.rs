use common_structs::{Loan, Offer, RefiOffer, RefiParams};

use crate::{storage, validation};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// A loan's raw stored fields plus the derived figures a client would otherwise have to
/// replicate off-chain: current accrued debt, maturity and grace-adjusted expiration.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode)]
pub struct LoanView<M: ManagedTypeApi> {
    pub loan: Loan<M>,
    pub owed_now: BigUint<M>,
    pub maturity: u64,
    pub expiration_with_grace: u64,
}

/// Read-only projections of loan / offer / refi state for clients. Pure computation over
/// `LoanStore` + `NumericKernel`; no side effects, no authorization.
#[multiversx_sc::module]
pub trait ViewsModule: storage::StorageModule + validation::ValidationModule + common_math::NumericKernelModule {
    #[view(getLoanView)]
    fn get_loan_view(&self, lending_id: u64) -> LoanView<Self::Api> {
        let loan = self.get_loan_or_fail(lending_id);
        let owed_now = self.owed_now(&loan.borrow_amount, &loan.rate, loan.term, loan.start, self.now());
        let maturity = loan.maturity();
        let expiration_with_grace = loan.expiration_with_grace();

        LoanView {
            loan,
            owed_now,
            maturity,
            expiration_with_grace,
        }
    }

    #[view(getOfferView)]
    fn get_offer_view(&self, lending_id: u64, offer_number: u64) -> Offer<Self::Api> {
        self.offers(lending_id, offer_number).get()
    }

    #[view(getRefiParamsView)]
    fn get_refi_params_view(&self, lending_id: u64) -> RefiParams<Self::Api> {
        self.refi_params(lending_id).get()
    }

    #[view(getRefiOfferView)]
    fn get_refi_offer_view(
        &self,
        lending_id: u64,
        nonce: u64,
        offer_number: u64,
    ) -> RefiOffer<Self::Api> {
        self.refi_offers(lending_id, nonce, offer_number).get()
    }
}
