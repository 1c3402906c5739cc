//! # Address registry
//!
//! Legion identities are not read ambiently on each call. They are resolved
//! from the registry contract at initialization and stored; afterwards they
//! only change through an explicit `sync_legion_addresses` call.

use soroban_sdk::{contractclient, Address, Env};

use crate::storage;
use crate::types::LegionAddresses;

#[contractclient(name = "AddressRegistryClient")]
pub trait AddressRegistryInterface {
    /// Current bid operator, signer key, fee receiver and vesting issuer.
    fn legion_addresses(env: Env) -> LegionAddresses;
}

/// Read the registry and persist the result.
pub fn resolve(env: &Env, registry: &Address) -> LegionAddresses {
    let addresses = AddressRegistryClient::new(env, registry).legion_addresses();
    storage::save_legion(env, &addresses);
    addresses
}
