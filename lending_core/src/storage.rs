use common_structs::{Loan, Offer, RefiOffer, RefiParams};

multiversx_sc::imports!();

/// `LoanStore`: indexed storage for loans and their subordinate collections. Pure storage and
/// lookup - every policy check (authorization, status, staleness) lives in the transition
/// modules, not here.
#[multiversx_sc::module]
pub trait StorageModule {
    #[view(getOracleAddress)]
    #[storage_mapper("oracle_address")]
    fn oracle_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("loan_count")]
    fn loan_count(&self) -> SingleValueMapper<u64>;

    #[view(getLoan)]
    #[storage_mapper("loans")]
    fn loans(&self, lending_id: u64) -> SingleValueMapper<Loan<Self::Api>>;

    #[storage_mapper("offer_count")]
    fn offer_count(&self, lending_id: u64) -> SingleValueMapper<u64>;

    #[view(getOffer)]
    #[storage_mapper("offers")]
    fn offers(&self, lending_id: u64, offer_number: u64) -> SingleValueMapper<Offer<Self::Api>>;

    #[view(getRefiParams)]
    #[storage_mapper("refi_params")]
    fn refi_params(&self, lending_id: u64) -> SingleValueMapper<RefiParams<Self::Api>>;

    #[storage_mapper("refi_offer_count")]
    fn refi_offer_count(&self, lending_id: u64, nonce: u64) -> SingleValueMapper<u64>;

    #[view(getRefiOffer)]
    #[storage_mapper("refi_offers")]
    fn refi_offers(
        &self,
        lending_id: u64,
        nonce: u64,
        offer_number: u64,
    ) -> SingleValueMapper<RefiOffer<Self::Api>>;

    #[storage_mapper("report_lending_id")]
    fn report_lending_id(&self, report_id: u64) -> SingleValueMapper<u64>;

    #[storage_mapper("report_count")]
    fn report_count(&self) -> SingleValueMapper<u64>;

    fn next_loan_id(&self) -> u64 {
        let next = self.loan_count().get() + 1;
        self.loan_count().set(next);
        next
    }

    fn next_offer_number(&self, lending_id: u64) -> u64 {
        let next = self.offer_count(lending_id).get() + 1;
        self.offer_count(lending_id).set(next);
        next
    }

    fn next_refi_offer_number(&self, lending_id: u64, nonce: u64) -> u64 {
        let next = self.refi_offer_count(lending_id, nonce).get() + 1;
        self.refi_offer_count(lending_id, nonce).set(next);
        next
    }

    fn next_report_id(&self) -> u64 {
        let next = self.report_count().get() + 1;
        self.report_count().set(next);
        next
    }
}
