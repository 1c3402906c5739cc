//! # Types
//!
//! Shared data structures used across all modules of the Legion sale.
//!
//! ## Config / Status / Position split
//!
//! - [`SaleConfig`]: written once by `initialize`; the only later mutation is
//!   `update_vesting_terms` on a pre-liquid sale before tokens are supplied.
//! - [`SaleStatus`]: one-way flags and running totals, written on every
//!   state-machine transition.
//! - [`InvestorPosition`]: one entry per investor, created on first
//!   investment. An auction bidder's latest [`SealedBid`] is kept in its own
//!   entry next to the position.
//!
//! ## Phases
//!
//! [`SalePhase`] is never stored; it is derived from config, status and the
//! ledger timestamp by [`crate::phase::current_phase`]:
//!
//! ```text
//! Prefund ─► PrefundAllocation ─► Active ─► RefundWindow ─► AwaitingResults
//!                                                              │
//!                     (auction) ResultsPublishInitialized ◄────┤
//!                                          │                   ▼
//!                                          └──────────► ResultsPublished
//!                                                              │
//!                                TokensSupplied ◄──────────────┘
//!                                      │
//!                                      ▼
//!                              SettlementComplete
//!
//! any state before ResultsPublished ──► Canceled
//! any state before TokensSupplied   ──► CanceledExpired (after lockup)
//! ```

use soroban_sdk::{contracttype, Address, BytesN};

/// Price-discovery flavour of a sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaleVariant {
    /// Fixed token price (informational, in bid-token units per ask token).
    FixedPrice(i128),
    /// Sealed-bid auction keyed by the sale's BLS12-381 G1 public key.
    SealedBidAuction(BytesN<96>),
    /// Pre-liquid sale with project-adjustable vesting terms.
    PreLiquid,
}

/// Default vesting terms for allocations claimed from the sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTerms {
    pub cliff_duration: u64,
    pub vesting_duration: u64,
    /// Share of the allocation released at TGE, in basis points.
    pub tge_rate_bps: u32,
}

/// Schedule handed to the vesting issuer. Field layout must match the
/// issuer's own schedule type.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    pub start_time: u64,
    pub cliff_duration: u64,
    pub vesting_duration: u64,
    pub tge_rate_bps: u32,
}

/// Parameters supplied once at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleInitParams {
    pub project_admin: Address,
    pub bid_token: Address,
    pub ask_token: Address,
    pub registry: Address,
    pub referrer_fee_receiver: Address,
    pub prefund_period: u64,
    pub prefund_allocation_period: u64,
    pub sale_period: u64,
    pub refund_period: u64,
    pub lockup_period: u64,
    pub legion_capital_fee_bps: u32,
    pub legion_token_fee_bps: u32,
    pub referrer_capital_fee_bps: u32,
    pub referrer_token_fee_bps: u32,
    pub minimum_invest_amount: i128,
    pub vesting_terms: VestingTerms,
    pub variant: SaleVariant,
}

/// Persisted sale configuration with the absolute timeline derived from the
/// configured periods.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub project_admin: Address,
    pub bid_token: Address,
    pub ask_token: Address,
    pub registry: Address,
    pub referrer_fee_receiver: Address,
    pub start_time: u64,
    pub prefund_end_time: u64,
    pub prefund_allocation_end_time: u64,
    pub end_time: u64,
    pub refund_end_time: u64,
    pub lockup_end_time: u64,
    pub legion_capital_fee_bps: u32,
    pub legion_token_fee_bps: u32,
    pub referrer_capital_fee_bps: u32,
    pub referrer_token_fee_bps: u32,
    pub minimum_invest_amount: i128,
    pub vesting_terms: VestingTerms,
    pub variant: SaleVariant,
}

/// Mutable sale status. Every boolean is one-way except `capital_withdrawn`,
/// which the project clears only by returning the capital on cancellation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleStatus {
    /// Capital currently held on behalf of investors.
    pub total_capital_raised: i128,
    /// Capital counted toward allocations, published with the results.
    pub capital_accepted: i128,
    /// Gross capital paid out by `withdraw_raised_capital`.
    pub total_capital_withdrawn: i128,
    pub total_tokens_allocated: i128,
    pub canceled: bool,
    pub canceled_expired: bool,
    /// Auction cancellation lock set by `initialize_publish_sale_results`.
    pub publish_initialized: bool,
    pub results_published: bool,
    pub tokens_supplied: bool,
    pub tokens_supplied_at: u64,
    pub capital_withdrawn: bool,
    pub accepted_capital_root: Option<BytesN<32>>,
    pub claim_root: Option<BytesN<32>>,
    /// Auction private key, revealed once with the results.
    pub private_key: Option<BytesN<32>>,
    pub capital_raised_at_decryption: i128,
}

impl SaleStatus {
    pub fn new() -> Self {
        SaleStatus {
            total_capital_raised: 0,
            capital_accepted: 0,
            total_capital_withdrawn: 0,
            total_tokens_allocated: 0,
            canceled: false,
            canceled_expired: false,
            publish_initialized: false,
            results_published: false,
            tokens_supplied: false,
            tokens_supplied_at: 0,
            capital_withdrawn: false,
            accepted_capital_root: None,
            claim_root: None,
            private_key: None,
            capital_raised_at_decryption: 0,
        }
    }
}

/// An encrypted bid amount bound to one investor and one sale key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SealedBid {
    /// Masked amount as a big-endian scalar-field element.
    pub encrypted_amount: BytesN<32>,
    /// Ephemeral point `G·r` chosen by the bidder.
    pub ephemeral_key: BytesN<96>,
    /// Sale key the bid was encrypted to.
    pub public_key: BytesN<96>,
    /// Must equal the investing account.
    pub salt: Address,
}

/// Variant-specific part of an investment, covered by the co-signature.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvestPayload {
    /// Single-use nonce (fixed-price and pre-liquid sales).
    Nonce(u64),
    /// Sealed bid (auction sales).
    Sealed(SealedBid),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorPosition {
    pub invested_capital: i128,
    pub has_refunded: bool,
    pub has_claimed_excess: bool,
    pub has_settled: bool,
    /// Issuer holding the vesting escrow, set on a claim with a vesting share.
    pub vesting_issuer: Option<Address>,
    pub escrow_id: Option<u64>,
}

impl InvestorPosition {
    pub fn new() -> Self {
        InvestorPosition {
            invested_capital: 0,
            has_refunded: false,
            has_claimed_excess: false,
            has_settled: false,
            vesting_issuer: None,
            escrow_id: None,
        }
    }
}

/// Legion identities resolved from the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegionAddresses {
    pub bid_operator: Address,
    /// ed25519 public key of the off-chain investment co-signer.
    pub signer: BytesN<32>,
    pub fee_receiver: Address,
    pub vesting_issuer: Address,
}

/// Derived lifecycle phase.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    Prefund,
    PrefundAllocation,
    Active,
    RefundWindow,
    AwaitingResults,
    ResultsPublishInitialized,
    ResultsPublished,
    TokensSupplied,
    SettlementComplete,
    Canceled,
    CanceledExpired,
}
