use crate::{constants::*, proxys::{LendingCoreProxy, OracleMockProxy}};

use multiversx_sc::types::{
    BigUint, EgldOrEsdtTokenIdentifier, ManagedAddress, MultiValue2, TestTokenIdentifier,
};
use multiversx_sc_scenario::{
    api::StaticApi, imports::{ExpectMessage, ReturnsNewManagedAddress, ReturnsResult},
    ScenarioTxRun, ScenarioWorld,
};

use common_structs::{Loan, Offer, RefiOffer, RefiParams};

/// Main test state: the deployed core and oracle mock, plus the scenario world backing them.
pub struct LendingCoreTestState {
    pub world: ScenarioWorld,
    pub lending_sc: ManagedAddress<StaticApi>,
    pub oracle_sc: ManagedAddress<StaticApi>,
}

impl Default for LendingCoreTestState {
    fn default() -> Self {
        Self::new()
    }
}

impl LendingCoreTestState {
    pub fn new() -> Self {
        let mut world = world();
        setup_owner(&mut world);

        let oracle_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(OracleMockProxy)
            .init()
            .code(ORACLE_MOCK_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        let lending_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(LendingCoreProxy)
            .init(oracle_sc.clone())
            .code(LENDING_CORE_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        Self {
            world,
            lending_sc,
            oracle_sc,
        }
    }

    pub fn change_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    // ============================================
    // CORE TRANSITIONS
    // ============================================

    #[allow(clippy::too_many_arguments)]
    pub fn request(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        term: u64,
        offer_expiration: u64,
        collateral_asset: TestTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier<StaticApi>,
        liquidation_threshold: u64,
        supply_amount: BigUint<StaticApi>,
        borrow_amount: BigUint<StaticApi>,
        stake_bps: u64,
    ) -> u64 {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .request(
                term,
                offer_expiration,
                EgldOrEsdtTokenIdentifier::esdt(collateral_asset.to_token_identifier()),
                debt_asset,
                BigUint::from(liquidation_threshold),
                supply_amount.clone(),
                borrow_amount,
                BigUint::from(stake_bps),
            )
            .esdt(multiversx_sc::types::TestEsdtTransfer(
                collateral_asset,
                0,
                supply_amount,
            ))
            .returns(ReturnsResult)
            .run()
    }

    pub fn offer_borrow(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        debt_token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        rate: u64,
        allow_any_liquidator: bool,
    ) -> u64 {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .offer_borrow(lending_id, amount.clone(), BigUint::from(rate), allow_any_liquidator)
            .esdt(multiversx_sc::types::TestEsdtTransfer(debt_token, 0, amount))
            .returns(ReturnsResult)
            .run()
    }

    pub fn accept_offer(&mut self, from: &multiversx_sc::types::TestAddress, lending_id: u64, offer_number: u64) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .accept_offer(lending_id, offer_number)
            .run();
    }

    pub fn accept_offer_expect_error(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        offer_number: u64,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .accept_offer(lending_id, offer_number)
            .returns(ExpectMessage(error_message))
            .run();
    }

    pub fn cancel_borrow_request(&mut self, from: &multiversx_sc::types::TestAddress, lending_id: u64) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .cancel_borrow_request(lending_id)
            .run();
    }

    pub fn cancel_borrow_request_expect_error(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .cancel_borrow_request(lending_id)
            .returns(ExpectMessage(error_message))
            .run();
    }

    pub fn cancel_borrow_offer(&mut self, from: &multiversx_sc::types::TestAddress, lending_id: u64, offer_number: u64) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .cancel_borrow_offer(lending_id, offer_number)
            .run();
    }

    pub fn cancel_borrow_offer_expect_error(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        offer_number: u64,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .cancel_borrow_offer(lending_id, offer_number)
            .returns(ExpectMessage(error_message))
            .run();
    }

    pub fn change_refi_params(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        extra_demanded: BigUint<StaticApi>,
        supply_pulled: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .change_refi_params(lending_id, extra_demanded, supply_pulled)
            .run();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn offer_refi_borrow(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        debt_token: TestTokenIdentifier,
        pull_amount: BigUint<StaticApi>,
        rate: u64,
        allow_any_liquidator: bool,
        repaid_debt_expected: BigUint<StaticApi>,
        extra_demanded_expected: BigUint<StaticApi>,
        min_supply_post_refi: BigUint<StaticApi>,
    ) -> (u64, u64) {
        let result: MultiValue2<u64, u64> = self
            .world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .offer_refi_borrow(
                lending_id,
                BigUint::from(rate),
                allow_any_liquidator,
                repaid_debt_expected,
                extra_demanded_expected,
                min_supply_post_refi,
            )
            .esdt(multiversx_sc::types::TestEsdtTransfer(debt_token, 0, pull_amount))
            .returns(ReturnsResult)
            .run();
        result.into_tuple()
    }

    pub fn accept_refi_offer(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        offer_number: u64,
        nonce: u64,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .accept_refi_offer(lending_id, offer_number, nonce)
            .run();
    }

    pub fn cancel_refi_borrow_offer(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        nonce: u64,
        offer_number: u64,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .cancel_refi_borrow_offer(lending_id, nonce, offer_number)
            .run();
    }

    pub fn top_up_collateral(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        collateral_token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .top_up_collateral(lending_id, amount.clone())
            .esdt(multiversx_sc::types::TestEsdtTransfer(collateral_token, 0, amount))
            .run();
    }

    pub fn repay_debt(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        debt_token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .repay_debt(lending_id, amount.clone())
            .esdt(multiversx_sc::types::TestEsdtTransfer(debt_token, 0, amount))
            .run();
    }

    pub fn repay_debt_expect_error(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        debt_token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .repay_debt(lending_id, amount.clone())
            .esdt(multiversx_sc::types::TestEsdtTransfer(debt_token, 0, amount))
            .returns(ExpectMessage(error_message))
            .run();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn liquidate(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        collateral_token: TestTokenIdentifier,
        debt_token: TestTokenIdentifier,
        stake_plus_seed: BigUint<StaticApi>,
        oracle_amount_debt: BigUint<StaticApi>,
        expected_supply_amount: BigUint<StaticApi>,
        expected_borrow_amount: BigUint<StaticApi>,
        expected_start: u64,
        expected_stake_bps: u64,
        expected_initial_liquidity: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .liquidate(
                lending_id,
                expected_supply_amount,
                oracle_amount_debt.clone(),
                expected_borrow_amount,
                expected_start,
                BigUint::from(expected_stake_bps),
                expected_initial_liquidity,
            )
            .multi_esdt(vec![
                multiversx_sc::types::EsdtTokenPayment::new(
                    collateral_token.to_token_identifier(),
                    0,
                    stake_plus_seed,
                ),
                multiversx_sc::types::EsdtTokenPayment::new(
                    debt_token.to_token_identifier(),
                    0,
                    oracle_amount_debt,
                ),
            ])
            .run();
    }

    pub fn settle_report(
        &mut self,
        report_id: u64,
        final_ratio_collateral: BigUint<StaticApi>,
        final_ratio_debt: BigUint<StaticApi>,
        fees_collateral: BigUint<StaticApi>,
        fees_debt: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(self.oracle_sc.clone())
            .typed(OracleMockProxy)
            .settle_report(
                report_id,
                final_ratio_collateral,
                final_ratio_debt,
                fees_collateral,
                fees_debt,
            )
            .run();
    }

    pub fn claim_collateral(&mut self, from: &multiversx_sc::types::TestAddress, lending_id: u64) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .claim_collateral(lending_id)
            .run();
    }

    pub fn claim_collateral_expect_error(
        &mut self,
        from: &multiversx_sc::types::TestAddress,
        lending_id: u64,
        error_message: &str,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .claim_collateral(lending_id)
            .returns(ExpectMessage(error_message))
            .run();
    }

    // ============================================
    // VIEWS
    // ============================================

    pub fn get_loan(&mut self, lending_id: u64) -> Loan<StaticApi> {
        self.world
            .query()
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .loans(lending_id)
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_offer(&mut self, lending_id: u64, offer_number: u64) -> Offer<StaticApi> {
        self.world
            .query()
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .offers(lending_id, offer_number)
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_refi_params(&mut self, lending_id: u64) -> RefiParams<StaticApi> {
        self.world
            .query()
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .refi_params(lending_id)
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_refi_offer(&mut self, lending_id: u64, nonce: u64, offer_number: u64) -> RefiOffer<StaticApi> {
        self.world
            .query()
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .refi_offers(lending_id, nonce, offer_number)
            .returns(ReturnsResult)
            .run()
    }

    /// The loan plus its derived `owedNow`/`maturity`/`expirationWithGrace` figures, so callers
    /// don't have to replicate interest accrual off-chain to size an exact repay.
    pub fn get_loan_view(&mut self, lending_id: u64) -> lending_core::views::LoanView<StaticApi> {
        self.world
            .query()
            .to(self.lending_sc.clone())
            .typed(LendingCoreProxy)
            .get_loan_view(lending_id)
            .returns(ReturnsResult)
            .run()
    }

    pub fn check_esdt_balance(
        &mut self,
        address: &multiversx_sc::types::TestAddress,
        token: TestTokenIdentifier,
        amount: &BigUint<StaticApi>,
    ) {
        self.world.check_account(*address).esdt_balance(token, amount);
    }

    /// Same as `check_esdt_balance`, against the core contract's own account — used to assert
    /// no stranded or skimmed funds once a batch of loans has reached a terminal state.
    pub fn check_contract_esdt_balance(&mut self, token: TestTokenIdentifier, amount: &BigUint<StaticApi>) {
        self.world.check_account(self.lending_sc.clone()).esdt_balance(token, amount);
    }
}

/// Initialize the world with both contracts registered.
pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(LENDING_CORE_PATH, lending_core::ContractBuilder);
    blockchain.register_contract(ORACLE_MOCK_PATH, oracle_mock::ContractBuilder);

    blockchain
}

pub fn setup_owner(world: &mut ScenarioWorld) {
    world.account(OWNER_ADDRESS).nonce(1).balance(BigUint::from(0u64));
}

/// Funds `address` with both test tokens, in generous amounts for ad-hoc scenario math.
pub fn fund_account(world: &mut ScenarioWorld, address: multiversx_sc::types::TestAddress) {
    world
        .account(address)
        .nonce(1)
        .esdt_balance(
            COLLATERAL_TOKEN,
            BigUint::from(10_000_000u64) * BigUint::from(10u64).pow(COLLATERAL_DECIMALS as u32),
        )
        .esdt_balance(
            DEBT_TOKEN,
            BigUint::from(10_000_000u64) * BigUint::from(10u64).pow(DEBT_DECIMALS as u32),
        );
}

/// Funds the oracle mock so it can forward `fees_collateral` during `settleReport` without
/// ever holding a standing balance beyond what a settlement actually needs.
pub fn fund_oracle_with_collateral(state: &mut LendingCoreTestState, amount: BigUint<StaticApi>) {
    state
        .world
        .tx()
        .from(OWNER_ADDRESS)
        .to(state.oracle_sc.clone())
        .egld_or_single_esdt(
            &EgldOrEsdtTokenIdentifier::esdt(COLLATERAL_TOKEN),
            0u64,
            &amount,
        )
        .transfer()
        .run();
}

/// Same as `fund_oracle_with_collateral`, but for the `fees_debt` cut `settleReport` forwards
/// alongside the escrowed debt-asset bond.
pub fn fund_oracle_with_debt(state: &mut LendingCoreTestState, amount: BigUint<StaticApi>) {
    state
        .world
        .tx()
        .from(OWNER_ADDRESS)
        .to(state.oracle_sc.clone())
        .egld_or_single_esdt(&EgldOrEsdtTokenIdentifier::esdt(DEBT_TOKEN), 0u64, &amount)
        .transfer()
        .run();
}
