use common_errors::ERROR_CUSTODY_FAILURE;

multiversx_sc::imports!();

/// `ValueCustody`: a thin adapter over the chain's own ledger. "Pull" is the payment the
/// caller attached to a `#[payable]` endpoint, checked against what the transition expects;
/// "push" is an outbound transfer. The VM gives us atomicity per call for free - either the
/// whole transaction's storage and balance effects land, or none do - so this module only
/// needs to validate, never to stage or roll back anything itself.
#[multiversx_sc::module]
pub trait CustodyModule {
    /// Validates that the single payment attached to this call is exactly `asset` for exactly
    /// `amount`, and returns the caller. Used by every endpoint that pulls one asset.
    fn pull_exact(&self, asset: &EgldOrEsdtTokenIdentifier, amount: &BigUint) -> ManagedAddress {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().egld_or_single_esdt();
        require!(&payment.token_identifier == asset, ERROR_CUSTODY_FAILURE);
        require!(&payment.amount == amount, ERROR_CUSTODY_FAILURE);
        caller
    }

    /// Validates that the two payments attached to this call cover `first_asset`/`first_amount`
    /// and `second_asset`/`second_amount` (in either order, and tolerating the degenerate case
    /// where both expected assets are the same, in which case a single combined payment is
    /// accepted). Used by `liquidate`, which pulls a collateral-asset stake/liquidity bundle
    /// alongside a debt-asset oracle proposal amount.
    fn pull_two(
        &self,
        first_asset: &EgldOrEsdtTokenIdentifier,
        first_amount: &BigUint,
        second_asset: &EgldOrEsdtTokenIdentifier,
        second_amount: &BigUint,
    ) -> ManagedAddress {
        let caller = self.blockchain().get_caller();

        if first_asset == second_asset {
            let combined = first_amount + second_amount;
            let payment = self.call_value().egld_or_single_esdt();
            require!(&payment.token_identifier == first_asset, ERROR_CUSTODY_FAILURE);
            require!(payment.amount == combined, ERROR_CUSTODY_FAILURE);
            return caller;
        }

        let payments = self.call_value().all_transfers();
        require!(payments.len() == 2, ERROR_CUSTODY_FAILURE);

        let mut seen_first = false;
        let mut seen_second = false;
        for payment in payments.iter() {
            if &payment.token_identifier == first_asset && &payment.amount == first_amount {
                seen_first = true;
            } else if &payment.token_identifier == second_asset && &payment.amount == second_amount
            {
                seen_second = true;
            }
        }
        require!(seen_first && seen_second, ERROR_CUSTODY_FAILURE);
        caller
    }

    /// Pushes `amount` of `asset` to `to`. A no-op for a zero amount, so callers never need to
    /// guard the call site themselves.
    fn push(&self, asset: &EgldOrEsdtTokenIdentifier, to: &ManagedAddress, amount: &BigUint) {
        if amount == &BigUint::zero() {
            return;
        }
        self.tx().to(to).egld_or_single_esdt(asset, 0u64, amount).transfer();
    }
}
