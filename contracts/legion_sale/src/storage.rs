//! # Storage
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key          | Type              | Description                              |
//! |--------------|-------------------|------------------------------------------|
//! | `Config`     | `SaleConfig`      | Write-once sale configuration            |
//! | `Status`     | `SaleStatus`      | Flags, totals, roots, revealed key       |
//! | `Legion`     | `LegionAddresses` | Identities resolved from the registry    |
//! | `Paused`     | `bool`            | Operator pause switch                    |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type               | Description                      |
//! |----------------------|--------------------|----------------------------------|
//! | `Position(investor)` | `InvestorPosition` | One entry per investor           |
//! | `SealedBid(investor)`| `SealedBid`        | Latest auction bid               |
//! | `UsedDigest(hash)`   | `bool`             | Consumed nonce-bound signatures  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::types::{InvestorPosition, LegionAddresses, SaleConfig, SaleStatus, SealedBid};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Status,
    Legion,
    Paused,
    Position(Address),
    SealedBid(Address),
    UsedDigest(BytesN<32>),
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

// ── Instance Storage Helpers ─────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load_config(env: &Env) -> Result<SaleConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn save_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_status(env: &Env) -> Result<SaleStatus, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .ok_or(Error::NotInitialized)
}

pub fn save_status(env: &Env, status: &SaleStatus) {
    env.storage().instance().set(&DataKey::Status, status);
}

/// Load config and status together; the common prologue of every entry point.
pub fn load_sale(env: &Env) -> Result<(SaleConfig, SaleStatus), Error> {
    Ok((load_config(env)?, load_status(env)?))
}

pub fn load_legion(env: &Env) -> Result<LegionAddresses, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Legion)
        .ok_or(Error::NotInitialized)
}

pub fn save_legion(env: &Env, addresses: &LegionAddresses) {
    env.storage().instance().set(&DataKey::Legion, addresses);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

pub fn load_position(env: &Env, investor: &Address) -> Option<InvestorPosition> {
    let key = DataKey::Position(investor.clone());
    let position = env.storage().persistent().get(&key);
    if position.is_some() {
        bump_persistent(env, &key);
    }
    position
}

/// Load a position that must exist.
pub fn require_position(env: &Env, investor: &Address) -> Result<InvestorPosition, Error> {
    load_position(env, investor).ok_or(Error::InvestorPositionNotFound)
}

pub fn save_position(env: &Env, investor: &Address, position: &InvestorPosition) {
    let key = DataKey::Position(investor.clone());
    env.storage().persistent().set(&key, position);
    bump_persistent(env, &key);
}

pub fn load_sealed_bid(env: &Env, investor: &Address) -> Option<SealedBid> {
    let key = DataKey::SealedBid(investor.clone());
    let bid = env.storage().persistent().get(&key);
    if bid.is_some() {
        bump_persistent(env, &key);
    }
    bid
}

/// Replace the investor's cached bid with the latest one.
pub fn save_sealed_bid(env: &Env, investor: &Address, bid: &SealedBid) {
    let key = DataKey::SealedBid(investor.clone());
    env.storage().persistent().set(&key, bid);
    bump_persistent(env, &key);
}

pub fn is_signature_used(env: &Env, digest: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::UsedDigest(digest.clone()))
}

pub fn mark_signature_used(env: &Env, digest: &BytesN<32>) {
    let key = DataKey::UsedDigest(digest.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
