//! # Fees
//!
//! Pure basis-point arithmetic shared by `supply_tokens`, `withdraw_raised_capital`
//! and `claim_token_allocation`. All results round down.

use crate::types::SaleConfig;
use crate::Error;

pub const BPS_DENOMINATOR: i128 = 10_000;

/// A gross amount split into the Legion fee, the referrer fee and the net remainder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeSplit {
    pub legion: i128,
    pub referrer: i128,
    pub net: i128,
}

/// `amount * bps / 10_000`.
pub fn fee(amount: i128, bps: u32) -> Result<i128, Error> {
    amount
        .checked_mul(bps as i128)
        .map(|v| v / BPS_DENOMINATOR)
        .ok_or(Error::Overflow)
}

fn split(amount: i128, legion_bps: u32, referrer_bps: u32) -> Result<FeeSplit, Error> {
    let legion = fee(amount, legion_bps)?;
    let referrer = fee(amount, referrer_bps)?;
    Ok(FeeSplit {
        legion,
        referrer,
        net: amount - legion - referrer,
    })
}

/// Fees owed on the tokens sold.
pub fn token_fees(config: &SaleConfig, tokens_allocated: i128) -> Result<FeeSplit, Error> {
    split(
        tokens_allocated,
        config.legion_token_fee_bps,
        config.referrer_token_fee_bps,
    )
}

/// Fees owed on the capital raised.
pub fn capital_fees(config: &SaleConfig, capital: i128) -> Result<FeeSplit, Error> {
    split(
        capital,
        config.legion_capital_fee_bps,
        config.referrer_capital_fee_bps,
    )
}

/// Check the amounts passed to `supply_tokens` against the published allocation.
///
/// `amount` must equal the allocation and both fees must match the computed
/// values exactly. The project transfers `amount + legion_fee + referrer_fee`
/// in total.
pub fn verify_supplied_tokens(
    config: &SaleConfig,
    tokens_allocated: i128,
    amount: i128,
    legion_fee: i128,
    referrer_fee: i128,
) -> Result<(), Error> {
    if amount != tokens_allocated {
        return Err(Error::InvalidTokenAmountSupplied);
    }
    let expected = token_fees(config, tokens_allocated)?;
    if legion_fee != expected.legion || referrer_fee != expected.referrer {
        return Err(Error::InvalidFeeAmount);
    }
    Ok(())
}

/// Split an allocation into the share paid at TGE and the share that vests.
pub fn tge_split(allocation: i128, tge_rate_bps: u32) -> Result<(i128, i128), Error> {
    let immediate = fee(allocation, tge_rate_bps)?;
    Ok((immediate, allocation - immediate))
}

/// Fee rates are individually and jointly capped at 100%.
pub fn validate_rates(legion_bps: u32, referrer_bps: u32) -> Result<(), Error> {
    if legion_bps as i128 + referrer_bps as i128 > BPS_DENOMINATOR {
        return Err(Error::InvalidFeeConfig);
    }
    Ok(())
}
