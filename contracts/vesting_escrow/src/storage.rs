//! # Storage
//!
//! | Key               | Tier       | Type     | Description                          |
//! |-------------------|------------|----------|--------------------------------------|
//! | `EscrowCount`     | Instance   | `u64`    | Auto-increment escrow ID counter     |
//! | `Committed(tok)`  | Instance   | `i128`   | Unreleased escrowed amount per token |
//! | `Escrow(id)`      | Persistent | `Escrow` | One beneficiary's escrow             |

use soroban_sdk::{contracttype, Address, Env};

use crate::types::Escrow;
use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    EscrowCount,
    Committed(Address),
    Escrow(u64),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read and increment the escrow counter, returning the ID to use.
pub fn next_escrow_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::EscrowCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::EscrowCount, &(current + 1));
    current
}

pub fn escrow_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::EscrowCount)
        .unwrap_or(0)
}

pub fn committed(env: &Env, token: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Committed(token.clone()))
        .unwrap_or(0)
}

pub fn set_committed(env: &Env, token: &Address, amount: i128) {
    bump_instance(env);
    env.storage()
        .instance()
        .set(&DataKey::Committed(token.clone()), &amount);
}

pub fn save_escrow(env: &Env, escrow: &Escrow) {
    let key = DataKey::Escrow(escrow.id);
    env.storage().persistent().set(&key, escrow);
    bump_persistent(env, &key);
}

pub fn load_escrow(env: &Env, id: u64) -> Result<Escrow, Error> {
    let key = DataKey::Escrow(id);
    let escrow: Escrow = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::EscrowNotFound)?;
    bump_persistent(env, &key);
    Ok(escrow)
}
