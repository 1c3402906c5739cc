//! # Legion Sale Contract
//!
//! Settlement engine shared by every Legion sale variant: fixed-price,
//! sealed-bid auction and pre-liquid. One deployed instance runs one sale.
//!
//! | Phase          | Entry Point(s)                                                  |
//! |----------------|-----------------------------------------------------------------|
//! | Bootstrap      | [`LegionSale::initialize`]                                      |
//! | Fundraising    | `invest`, `refund`                                              |
//! | Results        | `set_accepted_capital`, `initialize_publish_sale_results`, `publish_sale_results` |
//! | Settlement     | `supply_tokens`, `withdraw_raised_capital`                      |
//! | Investor exits | `withdraw_excess_invested_capital`, `claim_token_allocation`, `release_vested_tokens` |
//! | Cancellation   | `cancel_sale`, `cancel_expired_sale`, `withdraw_capital_if_canceled` |
//! | Operator admin | `emergency_withdraw`, `sync_legion_addresses`, `pause_sale`, `unpause_sale` |
//! | Project admin  | `update_vesting_terms` (pre-liquid only)                        |
//! | Queries        | `sale_config`, `sale_status`, `investor_position`, `investor_sealed_bid`, `sale_phase`, `legion_addresses`, `is_paused`, `decrypt_sealed_bid`, `role_of` |
//!
//! ## Architecture
//!
//! Authorization lives in [`rbac`], persistence in `storage`, and every
//! variant-dependent rule in `variant`. The pure pieces (fee arithmetic,
//! sealed-bid cipher, co-signature digest, Merkle verification) are leaf
//! modules with their own tests. This file holds the entry points and the
//! state machine guards.
//!
//! Every entry point writes all of its state before the first token transfer
//! or cross-contract call. The only write that follows an interaction is the
//! escrow reference returned by the vesting issuer, and the settlement flag
//! guarding that claim is already stored by then.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, log, token, Address, BytesN, Env, Vec,
};

pub mod events;
pub mod fees;
pub mod merkle;
pub mod rbac;
pub mod registry;
pub mod sealed_bid;
pub mod signature;
pub mod vesting;
mod phase;
mod storage;
mod types;
mod variant;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod testutils;

pub use rbac::Role;
pub use types::{
    InvestPayload, InvestorPosition, LegionAddresses, SaleConfig, SaleInitParams, SalePhase,
    SaleStatus, SaleVariant, SealedBid, VestingSchedule, VestingTerms,
};
pub use variant::{MAX_LOCKUP_PERIOD, MAX_REFUND_PERIOD, MAX_SALE_PERIOD, MIN_PERIOD};
use vesting::VestingIssuerClient;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Authorization
    NotCalledByLegion = 1,
    NotCalledByProject = 2,

    // State
    AlreadyInitialized = 10,
    NotInitialized = 11,
    SaleIsPaused = 12,
    SaleIsCanceled = 13,
    SaleIsNotCanceled = 14,
    SaleHasEnded = 15,
    SaleHasNotEnded = 16,
    PrefundAllocationPeriodNotEnded = 17,
    RefundPeriodIsOver = 18,
    RefundPeriodIsNotOver = 19,
    LockupPeriodIsNotOver = 20,
    SaleResultsAlreadyPublished = 21,
    SaleResultsNotPublished = 22,
    CancelLocked = 23,
    CancelNotLocked = 24,
    TokensAlreadySupplied = 25,
    TokensNotSupplied = 26,
    CapitalAlreadyWithdrawn = 27,
    CapitalNotRaised = 28,
    InvestorHasRefunded = 29,
    InvestorHasClaimedExcess = 30,
    AlreadySettled = 31,
    NoCapitalInvested = 32,
    PrivateKeyNotPublished = 33,
    NoVestingEscrow = 34,
    NotSupportedForVariant = 35,
    InvestorPositionNotFound = 36,

    // Validation
    InvalidAmount = 40,
    InvestmentBelowMinimum = 41,
    InvalidPeriodConfig = 42,
    InvalidFeeConfig = 43,
    InvalidVestingConfig = 44,
    InvalidTokenAmountSupplied = 45,
    InvalidFeeAmount = 46,
    SignatureAlreadyUsed = 47,
    InvalidInvestPayload = 48,
    InvalidMerkleProof = 49,
    InvalidBidPublicKey = 50,
    InvalidSalt = 51,
    InvalidBidPrivateKey = 52,
    InvalidSealedBid = 53,
    InvalidWithdrawAmount = 54,
    InvalidCapitalAccepted = 55,
    Overflow = 56,
}

#[contract]
pub struct LegionSale;

#[contractimpl]
impl LegionSale {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the sale and resolve the Legion addresses from the registry.
    ///
    /// Called once by the deploying factory in the same transaction as the
    /// deployment, so it takes no caller. A second call fails with
    /// `AlreadyInitialized`.
    pub fn initialize(env: Env, params: SaleInitParams) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        params.variant.validate_periods(&params)?;
        fees::validate_rates(params.legion_capital_fee_bps, params.referrer_capital_fee_bps)?;
        fees::validate_rates(params.legion_token_fee_bps, params.referrer_token_fee_bps)?;
        params.vesting_terms.validate()?;
        if params.minimum_invest_amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let config = phase::build_config(&params, env.ledger().timestamp())?;
        storage::save_config(&env, &config);
        storage::save_status(&env, &SaleStatus::new());

        registry::resolve(&env, &config.registry);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Fundraising
    // ─────────────────────────────────────────────────────────

    /// Invest `amount` of the bid token.
    ///
    /// `signature` is the Legion signer's ed25519 signature over
    /// [`signature::invest_digest`]. An invalid signature traps.
    pub fn invest(
        env: Env,
        investor: Address,
        amount: i128,
        payload: InvestPayload,
        signature: BytesN<64>,
    ) -> Result<(), Error> {
        investor.require_auth();
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if amount < config.minimum_invest_amount {
            return Err(Error::InvestmentBelowMinimum);
        }
        config
            .variant
            .check_invest_window(&config, env.ledger().timestamp())?;
        config.variant.check_invest_payload(&env, &investor, &payload)?;

        let legion = storage::load_legion(&env)?;
        signature::verify_invest_signature(&env, &legion.signer, &investor, &payload, &signature)?;

        let mut position = storage::load_position(&env, &investor).unwrap_or_else(InvestorPosition::new);
        if position.has_refunded {
            return Err(Error::InvestorHasRefunded);
        }
        if position.has_claimed_excess {
            return Err(Error::InvestorHasClaimedExcess);
        }

        position.invested_capital = checked_add(position.invested_capital, amount)?;
        status.total_capital_raised = checked_add(status.total_capital_raised, amount)?;
        storage::save_position(&env, &investor, &position);
        if let InvestPayload::Sealed(bid) = payload {
            storage::save_sealed_bid(&env, &investor, &bid);
        }
        storage::save_status(&env, &status);

        token::Client::new(&env, &config.bid_token).transfer(
            &investor,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_invested(&env, investor, amount, position.invested_capital);
        Ok(())
    }

    /// Return the caller's full investment during the refund window.
    pub fn refund(env: Env, investor: Address) -> Result<(), Error> {
        investor.require_auth();
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        let now = env.ledger().timestamp();
        if now < config.end_time {
            return Err(Error::SaleHasNotEnded);
        }
        if now >= config.refund_end_time {
            return Err(Error::RefundPeriodIsOver);
        }

        let mut position = storage::require_position(&env, &investor)?;
        if position.has_refunded {
            return Err(Error::InvestorHasRefunded);
        }
        let amount = position.invested_capital;
        if amount == 0 {
            return Err(Error::NoCapitalInvested);
        }

        position.invested_capital = 0;
        position.has_refunded = true;
        status.total_capital_raised = checked_sub(status.total_capital_raised, amount)?;
        storage::save_position(&env, &investor, &position);
        storage::save_status(&env, &status);

        token::Client::new(&env, &config.bid_token).transfer(
            &env.current_contract_address(),
            &investor,
            &amount,
        );

        events::emit_capital_refunded(&env, investor, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Cancellation
    // ─────────────────────────────────────────────────────────

    /// Cancel the sale. Only possible before results are published and,
    /// for auctions, before the operator locks cancellation.
    ///
    /// If the project had already withdrawn capital it must return it in the
    /// same call.
    pub fn cancel_sale(env: Env, project: Address) -> Result<(), Error> {
        project.require_auth();
        rbac::require_project(&env, &project)?;
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if status.results_published {
            return Err(Error::SaleResultsAlreadyPublished);
        }
        if status.publish_initialized {
            return Err(Error::CancelLocked);
        }

        let mut returned = 0;
        if status.capital_withdrawn {
            returned = status.total_capital_withdrawn;
            status.capital_withdrawn = false;
            status.total_capital_withdrawn = 0;
        }
        status.canceled = true;
        storage::save_status(&env, &status);

        if returned > 0 {
            token::Client::new(&env, &config.bid_token).transfer(
                &project,
                &env.current_contract_address(),
                &returned,
            );
        }

        events::emit_sale_canceled(&env, project, returned);
        Ok(())
    }

    /// Operator backstop: cancel a sale whose project never supplied tokens
    /// by the end of the lockup period. Ignores the auction cancel lock.
    pub fn cancel_expired_sale(env: Env, operator: Address) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if env.ledger().timestamp() < config.lockup_end_time {
            return Err(Error::LockupPeriodIsNotOver);
        }
        if status.tokens_supplied {
            return Err(Error::TokensAlreadySupplied);
        }

        status.canceled = true;
        status.canceled_expired = true;
        storage::save_status(&env, &status);

        events::emit_sale_expired(&env, operator);
        Ok(())
    }

    /// Return the caller's remaining capital after cancellation.
    pub fn withdraw_capital_if_canceled(env: Env, investor: Address) -> Result<(), Error> {
        investor.require_auth();
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        if !status.canceled {
            return Err(Error::SaleIsNotCanceled);
        }

        let mut position = storage::require_position(&env, &investor)?;
        let amount = position.invested_capital;
        if amount == 0 {
            return Err(Error::NoCapitalInvested);
        }

        position.invested_capital = 0;
        status.total_capital_raised = checked_sub(status.total_capital_raised, amount)?;
        storage::save_position(&env, &investor, &position);
        storage::save_status(&env, &status);

        token::Client::new(&env, &config.bid_token).transfer(
            &env.current_contract_address(),
            &investor,
            &amount,
        );

        events::emit_canceled_capital_withdrawn(&env, investor, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Results
    // ─────────────────────────────────────────────────────────

    /// Publish or replace the accepted-capital root while the refund window
    /// is still open.
    pub fn set_accepted_capital(env: Env, operator: Address, root: BytesN<32>) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if env.ledger().timestamp() >= config.refund_end_time {
            return Err(Error::RefundPeriodIsOver);
        }

        status.accepted_capital_root = Some(root.clone());
        storage::save_status(&env, &status);

        events::emit_accepted_capital_set(&env, operator, root);
        Ok(())
    }

    /// First step of the auction reveal: lock cancellation.
    pub fn initialize_publish_sale_results(env: Env, operator: Address) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        let (config, mut status) = storage::load_sale(&env)?;

        if !config.variant.requires_two_step_publish() {
            return Err(Error::NotSupportedForVariant);
        }
        require_not_canceled(&status)?;
        require_refund_over(&env, &config)?;
        if status.results_published {
            return Err(Error::SaleResultsAlreadyPublished);
        }
        if status.publish_initialized {
            return Err(Error::CancelLocked);
        }

        status.publish_initialized = true;
        storage::save_status(&env, &status);

        events::emit_publish_initialized(&env, operator);
        Ok(())
    }

    /// Publish the claim and accepted-capital roots with the totals they
    /// commit to. Auctions must pass the private key matching the sale's
    /// public key; other variants must pass `None`.
    pub fn publish_sale_results(
        env: Env,
        operator: Address,
        claim_root: BytesN<32>,
        accepted_capital_root: BytesN<32>,
        tokens_allocated: i128,
        capital_accepted: i128,
        private_key: Option<BytesN<32>>,
    ) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;
        require_refund_over(&env, &config)?;
        if status.results_published {
            return Err(Error::SaleResultsAlreadyPublished);
        }

        if tokens_allocated <= 0 {
            return Err(Error::InvalidAmount);
        }
        if capital_accepted < 0 || capital_accepted > status.total_capital_raised {
            return Err(Error::InvalidCapitalAccepted);
        }
        if config.variant.requires_two_step_publish() && !status.publish_initialized {
            return Err(Error::CancelNotLocked);
        }
        config.variant.check_reveal(&env, &private_key)?;

        status.results_published = true;
        status.claim_root = Some(claim_root.clone());
        status.accepted_capital_root = Some(accepted_capital_root.clone());
        status.total_tokens_allocated = tokens_allocated;
        status.capital_accepted = capital_accepted;
        if private_key.is_some() {
            status.private_key = private_key;
            status.capital_raised_at_decryption = status.total_capital_raised;
        }
        storage::save_status(&env, &status);

        events::emit_sale_results_published(
            &env,
            operator,
            claim_root,
            accepted_capital_root,
            tokens_allocated,
            capital_accepted,
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Supply the sold tokens plus both token fees.
    ///
    /// `amount` must equal the published allocation and the fees must match
    /// the configured rates exactly. The project transfers
    /// `amount + legion_fee + referrer_fee` in total.
    pub fn supply_tokens(
        env: Env,
        project: Address,
        amount: i128,
        legion_fee: i128,
        referrer_fee: i128,
    ) -> Result<(), Error> {
        project.require_auth();
        rbac::require_project(&env, &project)?;
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if !status.results_published {
            return Err(Error::SaleResultsNotPublished);
        }
        if status.tokens_supplied {
            return Err(Error::TokensAlreadySupplied);
        }
        fees::verify_supplied_tokens(
            &config,
            status.total_tokens_allocated,
            amount,
            legion_fee,
            referrer_fee,
        )?;

        status.tokens_supplied = true;
        status.tokens_supplied_at = env.ledger().timestamp();
        storage::save_status(&env, &status);

        let legion = storage::load_legion(&env)?;
        let ask = token::Client::new(&env, &config.ask_token);
        ask.transfer(&project, &env.current_contract_address(), &amount);
        if legion_fee > 0 {
            ask.transfer(&project, &legion.fee_receiver, &legion_fee);
        }
        if referrer_fee > 0 {
            ask.transfer(&project, &config.referrer_fee_receiver, &referrer_fee);
        }

        events::emit_tokens_supplied(&env, project, amount, legion_fee, referrer_fee);
        Ok(())
    }

    /// Pay the accepted capital to the project, net of capital fees.
    pub fn withdraw_raised_capital(env: Env, project: Address) -> Result<(), Error> {
        project.require_auth();
        rbac::require_project(&env, &project)?;
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;
        require_refund_over(&env, &config)?;

        if !status.tokens_supplied {
            return Err(Error::TokensNotSupplied);
        }
        if status.capital_withdrawn {
            return Err(Error::CapitalAlreadyWithdrawn);
        }
        if status.capital_accepted <= 0 {
            return Err(Error::CapitalNotRaised);
        }

        let split = fees::capital_fees(&config, status.capital_accepted)?;
        status.capital_withdrawn = true;
        status.total_capital_withdrawn = status.capital_accepted;
        storage::save_status(&env, &status);

        let legion = storage::load_legion(&env)?;
        let bid = token::Client::new(&env, &config.bid_token);
        let sale = env.current_contract_address();
        if split.net > 0 {
            bid.transfer(&sale, &project, &split.net);
        }
        if split.legion > 0 {
            bid.transfer(&sale, &legion.fee_receiver, &split.legion);
        }
        if split.referrer > 0 {
            bid.transfer(&sale, &config.referrer_fee_receiver, &split.referrer);
        }

        events::emit_capital_withdrawn(&env, project, split.net, split.legion, split.referrer);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Investor exits
    // ─────────────────────────────────────────────────────────

    /// Withdraw capital that was not accepted. The proof is for the leaf
    /// `(investor, invested_capital - amount)` in the accepted-capital tree.
    pub fn withdraw_excess_invested_capital(
        env: Env,
        investor: Address,
        amount: i128,
        proof: Vec<BytesN<32>>,
    ) -> Result<(), Error> {
        investor.require_auth();
        require_not_paused(&env)?;
        let (config, mut status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let mut position = storage::require_position(&env, &investor)?;
        if position.has_refunded {
            return Err(Error::InvestorHasRefunded);
        }
        if position.has_claimed_excess {
            return Err(Error::InvestorHasClaimedExcess);
        }
        if amount > position.invested_capital {
            return Err(Error::InvalidWithdrawAmount);
        }

        let accepted = position.invested_capital - amount;
        let leaf = merkle::accepted_capital_leaf(&env, &investor, accepted);
        let root = status
            .accepted_capital_root
            .clone()
            .ok_or(Error::InvalidMerkleProof)?;
        if !merkle::verify(&env, &root, &leaf, &proof) {
            log!(&env, "accepted capital proof rejected", investor, accepted);
            return Err(Error::InvalidMerkleProof);
        }

        position.has_claimed_excess = true;
        position.invested_capital = accepted;
        status.total_capital_raised = checked_sub(status.total_capital_raised, amount)?;
        storage::save_position(&env, &investor, &position);
        storage::save_status(&env, &status);

        token::Client::new(&env, &config.bid_token).transfer(
            &env.current_contract_address(),
            &investor,
            &amount,
        );

        events::emit_excess_withdrawn(&env, investor, amount);
        Ok(())
    }

    /// Claim the token allocation proven by the claim tree.
    ///
    /// The TGE share is paid out directly; the rest is moved to the vesting
    /// issuer, which opens an escrow for the investor. `vesting` overrides the
    /// sale's default terms and is part of the proven leaf.
    pub fn claim_token_allocation(
        env: Env,
        investor: Address,
        amount: i128,
        vesting: Option<VestingTerms>,
        proof: Vec<BytesN<32>>,
    ) -> Result<(), Error> {
        investor.require_auth();
        require_not_paused(&env)?;
        let (config, status) = storage::load_sale(&env)?;
        require_not_canceled(&status)?;

        if !status.tokens_supplied {
            return Err(Error::TokensNotSupplied);
        }
        let mut position = storage::require_position(&env, &investor)?;
        if position.has_refunded {
            return Err(Error::InvestorHasRefunded);
        }
        if position.has_settled {
            return Err(Error::AlreadySettled);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let leaf = merkle::claim_leaf(&env, &investor, amount, &vesting);
        let root = status.claim_root.clone().ok_or(Error::SaleResultsNotPublished)?;
        if !merkle::verify(&env, &root, &leaf, &proof) {
            log!(&env, "claim proof rejected", investor, amount);
            return Err(Error::InvalidMerkleProof);
        }

        let terms = vesting.unwrap_or(config.vesting_terms.clone());
        terms.validate()?;
        let (immediate, vesting_amount) = fees::tge_split(amount, terms.tge_rate_bps)?;

        position.has_settled = true;
        storage::save_position(&env, &investor, &position);

        let ask = token::Client::new(&env, &config.ask_token);
        let sale = env.current_contract_address();
        if immediate > 0 {
            ask.transfer(&sale, &investor, &immediate);
        }

        if vesting_amount > 0 {
            let issuer = storage::load_legion(&env)?.vesting_issuer;
            ask.transfer(&sale, &issuer, &vesting_amount);
            let escrow_id = VestingIssuerClient::new(&env, &issuer).create_vesting(
                &sale,
                &investor,
                &config.ask_token,
                &vesting_amount,
                &terms.schedule(status.tokens_supplied_at),
            );
            position.vesting_issuer = Some(issuer);
            position.escrow_id = Some(escrow_id);
            storage::save_position(&env, &investor, &position);
        }

        events::emit_allocation_claimed(
            &env,
            investor,
            amount,
            immediate,
            vesting_amount,
            position.vesting_issuer,
            position.escrow_id,
        );
        Ok(())
    }

    /// Release whatever has vested in the caller's escrow. Returns the amount
    /// released, which may be zero.
    ///
    /// Not gated by the pause switch: the issuer's `release` is open to
    /// anyone, so the escrow can always be released directly.
    pub fn release_vested_tokens(env: Env, investor: Address) -> Result<i128, Error> {
        investor.require_auth();
        let position = storage::require_position(&env, &investor)?;
        let (issuer, escrow_id) = match (position.vesting_issuer, position.escrow_id) {
            (Some(issuer), Some(escrow_id)) => (issuer, escrow_id),
            _ => return Err(Error::NoVestingEscrow),
        };

        let amount = VestingIssuerClient::new(&env, &issuer).release(&escrow_id);

        events::emit_vested_tokens_released(&env, investor, escrow_id, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Operator admin
    // ─────────────────────────────────────────────────────────

    /// Move any token out of the sale. Allowed in every phase, including
    /// while paused.
    pub fn emergency_withdraw(
        env: Env,
        operator: Address,
        receiver: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &receiver,
            &amount,
        );

        log!(&env, "emergency withdrawal", receiver, amount);
        events::emit_emergency_withdrawal(&env, operator, receiver, token, amount);
        Ok(())
    }

    /// Re-read the Legion addresses from the registry.
    pub fn sync_legion_addresses(env: Env, operator: Address) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        let config = storage::load_config(&env)?;

        let addresses = registry::resolve(&env, &config.registry);

        events::emit_legion_addresses_synced(&env, operator, addresses);
        Ok(())
    }

    pub fn pause_sale(env: Env, operator: Address) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        storage::set_paused(&env, true);
        events::emit_sale_paused(&env, operator);
        Ok(())
    }

    pub fn unpause_sale(env: Env, operator: Address) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_legion(&env, &operator)?;
        storage::set_paused(&env, false);
        events::emit_sale_unpaused(&env, operator);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Project admin
    // ─────────────────────────────────────────────────────────

    /// Replace the default vesting terms of a pre-liquid sale until tokens
    /// are supplied.
    pub fn update_vesting_terms(
        env: Env,
        project: Address,
        terms: VestingTerms,
    ) -> Result<(), Error> {
        project.require_auth();
        rbac::require_project(&env, &project)?;
        require_not_paused(&env)?;
        let (mut config, status) = storage::load_sale(&env)?;

        if !config.variant.allows_vesting_updates() {
            return Err(Error::NotSupportedForVariant);
        }
        require_not_canceled(&status)?;
        if status.tokens_supplied {
            return Err(Error::TokensAlreadySupplied);
        }
        terms.validate()?;

        config.vesting_terms = terms.clone();
        storage::save_config(&env, &config);

        events::emit_vesting_terms_updated(&env, project, terms);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn sale_config(env: Env) -> Result<SaleConfig, Error> {
        storage::load_config(&env)
    }

    pub fn sale_status(env: Env) -> Result<SaleStatus, Error> {
        storage::load_status(&env)
    }

    pub fn investor_position(env: Env, investor: Address) -> Option<InvestorPosition> {
        storage::load_position(&env, &investor)
    }

    /// Latest sealed bid lodged by `investor` (auction only).
    pub fn investor_sealed_bid(env: Env, investor: Address) -> Option<SealedBid> {
        storage::load_sealed_bid(&env, &investor)
    }

    /// Phase derived from the stored status and the current ledger time.
    pub fn sale_phase(env: Env) -> Result<SalePhase, Error> {
        let (config, status) = storage::load_sale(&env)?;
        Ok(phase::current_phase(&config, &status, env.ledger().timestamp()))
    }

    pub fn legion_addresses(env: Env) -> Result<LegionAddresses, Error> {
        storage::load_legion(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Decrypt an investor's latest sealed bid once the auction key is public.
    pub fn decrypt_sealed_bid(env: Env, investor: Address) -> Result<i128, Error> {
        let (config, status) = storage::load_sale(&env)?;
        if config.variant.auction_key().is_none() {
            return Err(Error::NotSupportedForVariant);
        }
        let private_key = status.private_key.ok_or(Error::PrivateKeyNotPublished)?;
        storage::require_position(&env, &investor)?;
        let bid = storage::load_sealed_bid(&env, &investor).ok_or(Error::InvalidSealedBid)?;
        sealed_bid::decrypt(&env, &bid, &private_key)
    }

    /// Return the role held by `address`, or `None`.
    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        rbac::role_of(&env, &address)
    }
}

// ─────────────────────────────────────────────────────────
// Guards
// ─────────────────────────────────────────────────────────

fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::SaleIsPaused);
    }
    Ok(())
}

fn require_not_canceled(status: &SaleStatus) -> Result<(), Error> {
    if status.canceled {
        return Err(Error::SaleIsCanceled);
    }
    Ok(())
}

fn require_refund_over(env: &Env, config: &SaleConfig) -> Result<(), Error> {
    if env.ledger().timestamp() < config.refund_end_time {
        return Err(Error::RefundPeriodIsNotOver);
    }
    Ok(())
}

fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

fn checked_sub(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_sub(b).ok_or(Error::Overflow)
}
