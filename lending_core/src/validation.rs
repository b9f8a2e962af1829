use common_errors::{
    ERROR_IN_LIQUIDATION, ERROR_LENDING_ID_ACTIVE, ERROR_LENDING_ID_CANCELLED,
    ERROR_LENDING_ID_FINISHED, ERROR_LENDING_ID_IN_LIQUIDATION, ERROR_WRONG_SENDER,
};
use common_structs::{Loan, LoanStatus};

use crate::storage;

multiversx_sc::imports!();

/// Shared authorization and status guards used by every transition in `LoanStateMachine`, so
/// each of the closed-set error reasons is asserted from exactly one place.
#[multiversx_sc::module]
pub trait ValidationModule: storage::StorageModule {
    fn get_loan_or_fail(&self, lending_id: u64) -> Loan<Self::Api> {
        self.loans(lending_id).get()
    }

    fn require_caller(&self, expected: &ManagedAddress) {
        let caller = self.blockchain().get_caller();
        require!(&caller == expected, ERROR_WRONG_SENDER);
    }

    /// Guards `request`-phase operations (offerBorrow, acceptOffer, cancelBorrowRequest):
    /// the loan must still be `Requested`.
    fn require_requested(&self, loan: &Loan<Self::Api>) {
        match loan.status {
            LoanStatus::Cancelled => sc_panic!(ERROR_LENDING_ID_CANCELLED),
            LoanStatus::Finished => sc_panic!(ERROR_LENDING_ID_FINISHED),
            LoanStatus::Active | LoanStatus::InLiquidation => sc_panic!(ERROR_LENDING_ID_ACTIVE),
            LoanStatus::Requested => {}
        }
    }

    /// Guards operations that require `Active` and explicitly forbid `InLiquidation`, using the
    /// `"lendingId in liquidation"` reason (acceptRefiOffer, changeRefiParams, liquidate,
    /// claimCollateral).
    fn require_active(&self, loan: &Loan<Self::Api>) {
        match loan.status {
            LoanStatus::Cancelled => sc_panic!(ERROR_LENDING_ID_CANCELLED),
            LoanStatus::Finished => sc_panic!(ERROR_LENDING_ID_FINISHED),
            LoanStatus::Requested => sc_panic!(ERROR_LENDING_ID_ACTIVE),
            LoanStatus::InLiquidation => sc_panic!(ERROR_LENDING_ID_IN_LIQUIDATION),
            LoanStatus::Active => {}
        }
    }

    /// Same as `require_active`, but the not-`InLiquidation` branch uses the lowercase
    /// `"in liquidation"` reason, matching topUpCollateral/repayDebt verbatim.
    fn require_active_lowercase_liquidation_guard(&self, loan: &Loan<Self::Api>) {
        match loan.status {
            LoanStatus::Cancelled => sc_panic!(ERROR_LENDING_ID_CANCELLED),
            LoanStatus::Finished => sc_panic!(ERROR_LENDING_ID_FINISHED),
            LoanStatus::Requested => sc_panic!(ERROR_LENDING_ID_ACTIVE),
            LoanStatus::InLiquidation => sc_panic!(ERROR_IN_LIQUIDATION),
            LoanStatus::Active => {}
        }
    }

    fn require_in_liquidation(&self, loan: &Loan<Self::Api>) {
        require!(
            loan.status == LoanStatus::InLiquidation,
            ERROR_LENDING_ID_IN_LIQUIDATION
        );
    }

    fn now(&self) -> u64 {
        self.blockchain().get_block_timestamp()
    }
}
