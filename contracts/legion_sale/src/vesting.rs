//! # Vesting issuance
//!
//! On a first successful claim the engine pays the TGE share directly and
//! hands the rest to the vesting issuer, which returns an escrow ID that is
//! recorded on the investor's position.

use soroban_sdk::{contractclient, Address, Env};

use crate::types::{VestingSchedule, VestingTerms};
use crate::Error;

/// Upper bound on any vesting duration (520 weeks).
pub const MAX_VESTING_DURATION: u64 = 520 * 7 * 24 * 60 * 60;

#[contractclient(name = "VestingIssuerClient")]
pub trait VestingIssuerInterface {
    /// Lock `amount` of `token` (already transferred to the issuer) for
    /// `beneficiary`. Returns the escrow ID.
    fn create_vesting(
        env: Env,
        funder: Address,
        beneficiary: Address,
        token: Address,
        amount: i128,
        schedule: VestingSchedule,
    ) -> u64;

    /// Release whatever has vested to the beneficiary.
    fn release(env: Env, escrow_id: u64) -> i128;
}

impl VestingTerms {
    pub fn validate(&self) -> Result<(), Error> {
        if self.vesting_duration == 0
            || self.vesting_duration > MAX_VESTING_DURATION
            || self.cliff_duration > self.vesting_duration
            || self.tge_rate_bps > 10_000
        {
            return Err(Error::InvalidVestingConfig);
        }
        Ok(())
    }

    /// Schedule starting at `start_time` (the TGE).
    pub fn schedule(&self, start_time: u64) -> VestingSchedule {
        VestingSchedule {
            start_time,
            cliff_duration: self.cliff_duration,
            vesting_duration: self.vesting_duration,
            tge_rate_bps: self.tge_rate_bps,
        }
    }
}
