//! # Sale variants
//!
//! Fixed-price, sealed-bid auction and pre-liquid sales share one engine.
//! Everything that differs between them is answered here, so the entry
//! points in `lib.rs` never branch on the variant themselves.

use soroban_sdk::{Address, BytesN, Env};

use crate::sealed_bid;
use crate::types::{InvestPayload, SaleConfig, SaleInitParams, SaleVariant};
use crate::Error;

const HOUR: u64 = 60 * 60;
const WEEK: u64 = 7 * 24 * HOUR;

pub const MIN_PERIOD: u64 = HOUR;
pub const MAX_SALE_PERIOD: u64 = 12 * WEEK;
pub const MAX_REFUND_PERIOD: u64 = 2 * WEEK;
pub const MAX_LOCKUP_PERIOD: u64 = 52 * WEEK;

fn within(value: u64, max: u64) -> bool {
    (MIN_PERIOD..=max).contains(&value)
}

impl SaleVariant {
    /// Period bounds. Only fixed-price sales have a prefund phase.
    pub fn validate_periods(&self, params: &SaleInitParams) -> Result<(), Error> {
        let common = within(params.sale_period, MAX_SALE_PERIOD)
            && within(params.refund_period, MAX_REFUND_PERIOD)
            && within(params.lockup_period, MAX_LOCKUP_PERIOD);

        let prefund = match self {
            SaleVariant::FixedPrice(_) => {
                within(params.prefund_period, MAX_SALE_PERIOD)
                    && within(params.prefund_allocation_period, MAX_SALE_PERIOD)
            }
            SaleVariant::SealedBidAuction(_) | SaleVariant::PreLiquid => {
                params.prefund_period == 0 && params.prefund_allocation_period == 0
            }
        };

        if !(common && prefund) {
            return Err(Error::InvalidPeriodConfig);
        }
        if let SaleVariant::FixedPrice(price) = self {
            if *price <= 0 {
                return Err(Error::InvalidAmount);
            }
        }
        Ok(())
    }

    /// Whether an investment is allowed at `now`.
    pub fn check_invest_window(&self, config: &SaleConfig, now: u64) -> Result<(), Error> {
        if now >= config.end_time {
            return Err(Error::SaleHasEnded);
        }
        if let SaleVariant::FixedPrice(_) = self {
            if now >= config.prefund_end_time && now < config.prefund_allocation_end_time {
                return Err(Error::PrefundAllocationPeriodNotEnded);
            }
        }
        Ok(())
    }

    /// Check that the payload kind matches the variant and, for auctions,
    /// that the sealed bid is bound to this sale and this investor and can be
    /// decrypted once the key is revealed.
    pub fn check_invest_payload(
        &self,
        env: &Env,
        investor: &Address,
        payload: &InvestPayload,
    ) -> Result<(), Error> {
        match (self, payload) {
            (SaleVariant::SealedBidAuction(public_key), InvestPayload::Sealed(bid)) => {
                sealed_bid::verify_binding(bid, investor, public_key)?;
                sealed_bid::verify_ciphertext(env, bid)
            }
            (SaleVariant::FixedPrice(_) | SaleVariant::PreLiquid, InvestPayload::Nonce(_)) => {
                Ok(())
            }
            _ => Err(Error::InvalidInvestPayload),
        }
    }

    /// Auctions lock cancellation before the results (and key) are revealed.
    pub fn requires_two_step_publish(&self) -> bool {
        matches!(self, SaleVariant::SealedBidAuction(_))
    }

    /// Validate the variant-specific part of `publish_sale_results`.
    pub fn check_reveal(
        &self,
        env: &Env,
        private_key: &Option<BytesN<32>>,
    ) -> Result<(), Error> {
        match (self, private_key) {
            (SaleVariant::SealedBidAuction(public_key), Some(key)) => {
                sealed_bid::verify_private_key(env, key, public_key)
            }
            (SaleVariant::SealedBidAuction(_), None) => Err(Error::InvalidBidPrivateKey),
            (_, Some(_)) => Err(Error::NotSupportedForVariant),
            (_, None) => Ok(()),
        }
    }

    /// Only pre-liquid sales allow the project to change vesting terms.
    pub fn allows_vesting_updates(&self) -> bool {
        matches!(self, SaleVariant::PreLiquid)
    }

    pub fn auction_key(&self) -> Option<BytesN<96>> {
        match self {
            SaleVariant::SealedBidAuction(public_key) => Some(public_key.clone()),
            _ => None,
        }
    }
}
