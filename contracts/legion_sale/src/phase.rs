//! Timeline derivation and phase reporting.

use crate::types::{SaleConfig, SaleInitParams, SalePhase, SaleStatus};
use crate::Error;

/// Build the persisted config, turning periods into absolute timestamps
/// starting at `now`.
pub fn build_config(params: &SaleInitParams, now: u64) -> Result<SaleConfig, Error> {
    let prefund_end_time = now
        .checked_add(params.prefund_period)
        .ok_or(Error::Overflow)?;
    let prefund_allocation_end_time = prefund_end_time
        .checked_add(params.prefund_allocation_period)
        .ok_or(Error::Overflow)?;
    let end_time = prefund_allocation_end_time
        .checked_add(params.sale_period)
        .ok_or(Error::Overflow)?;
    let refund_end_time = end_time
        .checked_add(params.refund_period)
        .ok_or(Error::Overflow)?;
    let lockup_end_time = refund_end_time
        .checked_add(params.lockup_period)
        .ok_or(Error::Overflow)?;

    Ok(SaleConfig {
        project_admin: params.project_admin.clone(),
        bid_token: params.bid_token.clone(),
        ask_token: params.ask_token.clone(),
        registry: params.registry.clone(),
        referrer_fee_receiver: params.referrer_fee_receiver.clone(),
        start_time: now,
        prefund_end_time,
        prefund_allocation_end_time,
        end_time,
        refund_end_time,
        lockup_end_time,
        legion_capital_fee_bps: params.legion_capital_fee_bps,
        legion_token_fee_bps: params.legion_token_fee_bps,
        referrer_capital_fee_bps: params.referrer_capital_fee_bps,
        referrer_token_fee_bps: params.referrer_token_fee_bps,
        minimum_invest_amount: params.minimum_invest_amount,
        vesting_terms: params.vesting_terms.clone(),
        variant: params.variant.clone(),
    })
}

/// Phase of the sale at `now`. Status flags take precedence over the clock.
pub fn current_phase(config: &SaleConfig, status: &SaleStatus, now: u64) -> SalePhase {
    if status.canceled {
        return if status.canceled_expired {
            SalePhase::CanceledExpired
        } else {
            SalePhase::Canceled
        };
    }
    if status.tokens_supplied {
        return if status.capital_withdrawn {
            SalePhase::SettlementComplete
        } else {
            SalePhase::TokensSupplied
        };
    }
    if status.results_published {
        return SalePhase::ResultsPublished;
    }
    if status.publish_initialized {
        return SalePhase::ResultsPublishInitialized;
    }

    if now < config.prefund_end_time {
        SalePhase::Prefund
    } else if now < config.prefund_allocation_end_time {
        SalePhase::PrefundAllocation
    } else if now < config.end_time {
        SalePhase::Active
    } else if now < config.refund_end_time {
        SalePhase::RefundWindow
    } else {
        SalePhase::AwaitingResults
    }
}
