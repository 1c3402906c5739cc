//! # Vesting Escrow Issuer
//!
//! Holds the vesting portion of a Legion token allocation and releases it to
//! the beneficiary along a linear schedule with a cliff.
//!
//! | Phase     | Entry Point(s)                                      |
//! |-----------|-----------------------------------------------------|
//! | Issuance  | [`VestingEscrow::create_vesting`]                   |
//! | Release   | [`VestingEscrow::release`]                          |
//! | Queries   | `get_escrow`, `vested_amount`, `releasable_amount`, `escrow_count` |
//!
//! The funder transfers the escrowed tokens to this contract *before* calling
//! `create_vesting`; issuance only succeeds when the contract's balance covers
//! every outstanding commitment in that token.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

pub mod events;
mod storage;
mod types;


pub use types::{Escrow, VestingSchedule, MAX_VESTING_DURATION};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    EscrowNotFound = 1,
    InvalidAmount = 2,
    InvalidSchedule = 3,
    Underfunded = 4,
    Overflow = 5,
}

#[contract]
pub struct VestingEscrow;

#[contractimpl]
impl VestingEscrow {
    /// Lock `amount` of `token` for `beneficiary` under `schedule`.
    ///
    /// - `funder` must authorize; when the funder is the calling contract this
    ///   is satisfied by the invocation itself.
    /// - The tokens must already sit in this contract's balance.
    ///
    /// Returns the new escrow ID.
    pub fn create_vesting(
        env: Env,
        funder: Address,
        beneficiary: Address,
        token: Address,
        amount: i128,
        schedule: VestingSchedule,
    ) -> Result<u64, Error> {
        funder.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if !schedule.is_valid() {
            return Err(Error::InvalidSchedule);
        }

        let committed = storage::committed(&env, &token)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let balance = token::Client::new(&env, &token).balance(&env.current_contract_address());
        if balance < committed {
            return Err(Error::Underfunded);
        }

        let id = storage::next_escrow_id(&env);
        let escrow = Escrow {
            id,
            funder: funder.clone(),
            beneficiary: beneficiary.clone(),
            token: token.clone(),
            total_amount: amount,
            released: 0,
            schedule,
        };
        storage::save_escrow(&env, &escrow);
        storage::set_committed(&env, &token, committed);

        events::emit_escrow_created(&env, id, funder, beneficiary, token, amount);
        Ok(id)
    }

    /// Transfer everything vested so far to the beneficiary.
    ///
    /// Anyone may trigger a release; funds only ever move to the beneficiary.
    /// Returns the amount transferred, which is 0 before the cliff.
    pub fn release(env: Env, escrow_id: u64) -> Result<i128, Error> {
        let mut escrow = storage::load_escrow(&env, escrow_id)?;
        let amount = escrow.releasable_at(env.ledger().timestamp());
        if amount <= 0 {
            return Ok(0);
        }

        escrow.released += amount;
        storage::save_escrow(&env, &escrow);
        let committed = storage::committed(&env, &escrow.token) - amount;
        storage::set_committed(&env, &escrow.token, committed);

        token::Client::new(&env, &escrow.token).transfer(
            &env.current_contract_address(),
            &escrow.beneficiary,
            &amount,
        );

        events::emit_tokens_released(&env, escrow_id, escrow.beneficiary, amount);
        Ok(amount)
    }

    pub fn get_escrow(env: Env, escrow_id: u64) -> Result<Escrow, Error> {
        storage::load_escrow(&env, escrow_id)
    }

    /// Amount vested at `timestamp`, released or not.
    pub fn vested_amount(env: Env, escrow_id: u64, timestamp: u64) -> Result<i128, Error> {
        Ok(storage::load_escrow(&env, escrow_id)?.vested_at(timestamp))
    }

    /// Amount a `release` call would transfer right now.
    pub fn releasable_amount(env: Env, escrow_id: u64) -> Result<i128, Error> {
        let escrow = storage::load_escrow(&env, escrow_id)?;
        Ok(escrow.releasable_at(env.ledger().timestamp()))
    }

    pub fn escrow_count(env: Env) -> u64 {
        storage::escrow_count(&env)
    }
}
