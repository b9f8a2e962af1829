#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// The single primary status a loan occupies at any time. Fields that only make sense in
/// one state (liquidator, liquidation start, pending report id) live on `Loan` itself rather
/// than in separate variants, to keep the storage mapper a single flat value per loan id.
#[type_abi]
#[derive(ManagedVecItem, NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, Eq, PartialEq, Debug)]
pub enum LoanStatus {
    Requested,
    Active,
    InLiquidation,
    Finished,
    Cancelled,
}

impl LoanStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Finished | LoanStatus::Cancelled)
    }
}

/// The oracle's final settlement price, expressed as `collateral` units of the loan's
/// collateral asset per `debt` units of its debt asset.
#[type_abi]
#[derive(ManagedVecItem, NestedEncode, NestedDecode, TopEncode, TopDecode, Clone)]
pub struct OracleRatio<M: ManagedTypeApi> {
    pub collateral: BigUint<M>,
    pub debt: BigUint<M>,
}

/// A single bilateral loan, keyed by its `lendingId`. Offers, refi-params and refi-offers
/// live in subordinate storage mappers keyed off this id; this struct holds only what applies
/// to the loan as a whole.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct Loan<M: ManagedTypeApi> {
    pub borrower: ManagedAddress<M>,
    pub lender: ManagedAddress<M>,

    pub collateral_asset: EgldOrEsdtTokenIdentifier<M>,
    pub debt_asset: EgldOrEsdtTokenIdentifier<M>,

    pub supply_amount: BigUint<M>,
    pub borrow_amount: BigUint<M>,
    pub rate: BigUint<M>,
    pub term: u64,
    pub offer_expiration: u64,
    pub liquidation_threshold: BigUint<M>,
    pub stake_bps: BigUint<M>,

    pub start: u64,
    pub repaid_debt: BigUint<M>,
    pub allow_any_liquidator: bool,
    pub grace_period: u64,

    pub status: LoanStatus,

    pub liquidator: ManagedAddress<M>,
    pub liquidation_start: u64,
    pub pending_report_id: u64,
    /// The debt-asset bond the liquidator posted to open the current price report. Refunded to
    /// them in full on settlement, whatever the outcome — it is a price proposal, not a fee.
    pub pending_oracle_bond: BigUint<M>,
}

impl<M: ManagedTypeApi> Loan<M> {
    pub fn maturity(&self) -> u64 {
        self.start + self.term
    }

    pub fn expiration_with_grace(&self) -> u64 {
        self.start + self.term + self.grace_period
    }
}

/// One lender's bid against a `Requested` loan.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct Offer<M: ManagedTypeApi> {
    pub lender: ManagedAddress<M>,
    pub amount: BigUint<M>,
    pub rate: BigUint<M>,
    pub allow_any_liquidator: bool,
    pub created_at: u64,
    pub chosen: bool,
    pub cancelled: bool,
}

/// At most one of these is live per loan at a time; it records the borrower's ask for a
/// refinance and gates which nonce of `RefiOffer`s is currently biddable.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct RefiParams<M: ManagedTypeApi> {
    pub set: bool,
    pub extra_demanded: BigUint<M>,
    pub supply_pulled: BigUint<M>,
    pub nonce: u64,
}

/// One lender's bid against the currently open `RefiParams` nonce.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct RefiOffer<M: ManagedTypeApi> {
    pub lender: ManagedAddress<M>,
    pub rate: BigUint<M>,
    pub allow_any_liquidator: bool,
    pub created_at: u64,
    pub repaid_debt_expected: BigUint<M>,
    pub extra_demanded_expected: BigUint<M>,
    pub min_supply_post_refi: BigUint<M>,
    /// Debt-asset amount actually pulled from the offering lender at placement time. Stored
    /// rather than recomputed on cancel, because the loan's rate/start may have moved on to a
    /// later refi nonce by the time this offer (at an older, still-live nonce) is cancelled.
    pub amount_pulled: BigUint<M>,
    pub chosen: bool,
    pub cancelled: bool,
}

/// Outcome of resolving a settled liquidation, returned by `NumericKernelModule::resolve_liquidation`
/// so the liquidation module can apply state/custody effects without recomputing the case split.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Eq, Debug)]
pub enum LiquidationOutcome {
    /// Breach threshold was not reached: loan stays `Active`, stake is forfeit to the borrower.
    Failed,
    /// Debt exceeds supply in supply-terms: lender takes all remaining supply.
    Underwater,
    /// Supply exceeds debt in supply-terms: the surplus buffer is split lender/liquidator.
    EquityRemaining,
}
