//! # Access control
//!
//! A sale has two privileged principals:
//!
//! ```text
//! Legion bid operator   resolved from the registry; runs the sale
//! Project admin         fixed in the config; supplies tokens, withdraws capital
//! ```
//!
//! Everyone else is an investor. Roles are not stored separately: they are
//! derived from the config and the synced Legion addresses, so a registry
//! sync moves the operator role without any further bookkeeping.
//!
//! Guards assume the caller has already called `require_auth()`.

use soroban_sdk::{contracttype, Address, Env};

use crate::storage;
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Can publish results, set roots, pause, sync and emergency-withdraw.
    LegionOperator,
    /// Can cancel, supply tokens, withdraw raised capital, update vesting terms.
    ProjectAdmin,
}

/// Assert that `caller` is the current Legion bid operator.
pub fn require_legion(env: &Env, caller: &Address) -> Result<(), Error> {
    if storage::load_legion(env)?.bid_operator != *caller {
        return Err(Error::NotCalledByLegion);
    }
    Ok(())
}

/// Assert that `caller` is the project admin.
pub fn require_project(env: &Env, caller: &Address) -> Result<(), Error> {
    if storage::load_config(env)?.project_admin != *caller {
        return Err(Error::NotCalledByProject);
    }
    Ok(())
}

/// Role held by `address`, if any. The operator role wins if both match.
pub fn role_of(env: &Env, address: &Address) -> Option<Role> {
    if let Ok(legion) = storage::load_legion(env) {
        if legion.bid_operator == *address {
            return Some(Role::LegionOperator);
        }
    }
    match storage::load_config(env) {
        Ok(config) if config.project_admin == *address => Some(Role::ProjectAdmin),
        _ => None,
    }
}
