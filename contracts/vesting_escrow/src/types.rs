//! # Types
//!
//! An [`Escrow`] is created once by a funder (a Legion sale) and afterwards
//! only its `released` counter moves:
//!
//! ```text
//! created ──► partially released ──► fully released
//! ```

use soroban_sdk::{contracttype, Address};

/// Maximum vesting duration accepted by the issuer (520 weeks).
pub const MAX_VESTING_DURATION: u64 = 520 * 7 * 24 * 60 * 60;

/// Vesting schedule handed over by the funder.
///
/// Mirrors the sale's schedule type field for field so both contracts encode
/// it identically. `tge_rate_bps` is informational here: the immediate share
/// is paid out by the funder and only the remainder is escrowed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    pub start_time: u64,
    pub cliff_duration: u64,
    pub vesting_duration: u64,
    pub tge_rate_bps: u32,
}

impl VestingSchedule {
    pub fn is_valid(&self) -> bool {
        self.vesting_duration > 0
            && self.vesting_duration <= MAX_VESTING_DURATION
            && self.cliff_duration <= self.vesting_duration
            && self.tge_rate_bps <= 10_000
    }

    pub fn cliff_end(&self) -> u64 {
        self.start_time.saturating_add(self.cliff_duration)
    }

    pub fn end(&self) -> u64 {
        self.start_time.saturating_add(self.vesting_duration)
    }
}

/// A single beneficiary's escrow.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Escrow {
    pub id: u64,
    pub funder: Address,
    pub beneficiary: Address,
    pub token: Address,
    /// Amount locked at creation.
    pub total_amount: i128,
    /// Amount already transferred to the beneficiary.
    pub released: i128,
    pub schedule: VestingSchedule,
}

impl Escrow {
    /// Amount vested at `timestamp` under a linear schedule with a cliff.
    pub fn vested_at(&self, timestamp: u64) -> i128 {
        let schedule = &self.schedule;
        if timestamp < schedule.cliff_end() {
            return 0;
        }
        if timestamp >= schedule.end() {
            return self.total_amount;
        }
        let elapsed = (timestamp - schedule.start_time) as i128;
        let duration = schedule.vesting_duration as i128;
        // Split total = q * duration + r so the product never exceeds total.
        let q = self.total_amount / duration;
        let r = self.total_amount % duration;
        q * elapsed + r * elapsed / duration
    }

    pub fn releasable_at(&self, timestamp: u64) -> i128 {
        self.vested_at(timestamp) - self.released
    }
}
