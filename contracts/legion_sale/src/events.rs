use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::types::{LegionAddresses, VestingTerms};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invested {
    pub investor: Address,
    pub amount: i128,
    pub invested_capital: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapitalRefunded {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleCanceled {
    pub project: Address,
    /// Previously withdrawn capital pulled back from the project.
    pub capital_returned: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleExpired {
    pub operator: Address,
    pub canceled_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AcceptedCapitalSet {
    pub operator: Address,
    pub root: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublishInitialized {
    pub operator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleResultsPublished {
    pub operator: Address,
    pub claim_root: BytesN<32>,
    pub accepted_capital_root: BytesN<32>,
    pub tokens_allocated: i128,
    pub capital_accepted: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensSupplied {
    pub project: Address,
    pub amount: i128,
    pub legion_fee: i128,
    pub referrer_fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapitalWithdrawn {
    pub project: Address,
    pub net: i128,
    pub legion_fee: i128,
    pub referrer_fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExcessCapitalWithdrawn {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationClaimed {
    pub investor: Address,
    pub amount: i128,
    /// Paid out immediately at TGE.
    pub immediate: i128,
    /// Locked with the vesting issuer.
    pub vesting: i128,
    /// Set only when `vesting > 0`.
    pub vesting_issuer: Option<Address>,
    pub escrow_id: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanceledCapitalWithdrawn {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestedTokensReleased {
    pub investor: Address,
    pub escrow_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawal {
    pub operator: Address,
    pub receiver: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegionAddressesSynced {
    pub operator: Address,
    pub addresses: LegionAddresses,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SalePauseChanged {
    pub operator: Address,
    pub paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTermsUpdated {
    pub project: Address,
    pub terms: VestingTerms,
}

pub fn emit_invested(env: &Env, investor: Address, amount: i128, invested_capital: i128) {
    let topics = (symbol_short!("invested"), investor.clone());
    let data = Invested {
        investor,
        amount,
        invested_capital,
    };
    env.events().publish(topics, data);
}

pub fn emit_capital_refunded(env: &Env, investor: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), investor.clone());
    env.events()
        .publish(topics, CapitalRefunded { investor, amount });
}

pub fn emit_sale_canceled(env: &Env, project: Address, capital_returned: i128) {
    let topics = (symbol_short!("canceled"), project.clone());
    let data = SaleCanceled {
        project,
        capital_returned,
    };
    env.events().publish(topics, data);
}

pub fn emit_sale_expired(env: &Env, operator: Address) {
    let topics = (symbol_short!("expired"), operator.clone());
    let data = SaleExpired {
        operator,
        canceled_at: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn emit_accepted_capital_set(env: &Env, operator: Address, root: BytesN<32>) {
    let topics = (symbol_short!("accepted"), operator.clone());
    env.events()
        .publish(topics, AcceptedCapitalSet { operator, root });
}

pub fn emit_publish_initialized(env: &Env, operator: Address) {
    let topics = (symbol_short!("publ_init"), operator.clone());
    env.events().publish(topics, PublishInitialized { operator });
}

pub fn emit_sale_results_published(
    env: &Env,
    operator: Address,
    claim_root: BytesN<32>,
    accepted_capital_root: BytesN<32>,
    tokens_allocated: i128,
    capital_accepted: i128,
) {
    let topics = (symbol_short!("results"), operator.clone());
    let data = SaleResultsPublished {
        operator,
        claim_root,
        accepted_capital_root,
        tokens_allocated,
        capital_accepted,
    };
    env.events().publish(topics, data);
}

pub fn emit_tokens_supplied(
    env: &Env,
    project: Address,
    amount: i128,
    legion_fee: i128,
    referrer_fee: i128,
) {
    let topics = (symbol_short!("supplied"), project.clone());
    let data = TokensSupplied {
        project,
        amount,
        legion_fee,
        referrer_fee,
    };
    env.events().publish(topics, data);
}

pub fn emit_capital_withdrawn(
    env: &Env,
    project: Address,
    net: i128,
    legion_fee: i128,
    referrer_fee: i128,
) {
    let topics = (symbol_short!("withdrawn"), project.clone());
    let data = CapitalWithdrawn {
        project,
        net,
        legion_fee,
        referrer_fee,
    };
    env.events().publish(topics, data);
}

pub fn emit_excess_withdrawn(env: &Env, investor: Address, amount: i128) {
    let topics = (symbol_short!("excess"), investor.clone());
    env.events()
        .publish(topics, ExcessCapitalWithdrawn { investor, amount });
}

pub fn emit_allocation_claimed(
    env: &Env,
    investor: Address,
    amount: i128,
    immediate: i128,
    vesting: i128,
    vesting_issuer: Option<Address>,
    escrow_id: Option<u64>,
) {
    let topics = (symbol_short!("claimed"), investor.clone());
    let data = AllocationClaimed {
        investor,
        amount,
        immediate,
        vesting,
        vesting_issuer,
        escrow_id,
    };
    env.events().publish(topics, data);
}

pub fn emit_canceled_capital_withdrawn(env: &Env, investor: Address, amount: i128) {
    let topics = (symbol_short!("recovered"), investor.clone());
    env.events()
        .publish(topics, CanceledCapitalWithdrawn { investor, amount });
}

pub fn emit_vested_tokens_released(env: &Env, investor: Address, escrow_id: u64, amount: i128) {
    let topics = (symbol_short!("released"), investor.clone());
    let data = VestedTokensReleased {
        investor,
        escrow_id,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_emergency_withdrawal(
    env: &Env,
    operator: Address,
    receiver: Address,
    token: Address,
    amount: i128,
) {
    let topics = (symbol_short!("emergency"), operator.clone());
    let data = EmergencyWithdrawal {
        operator,
        receiver,
        token,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_legion_addresses_synced(env: &Env, operator: Address, addresses: LegionAddresses) {
    let topics = (symbol_short!("synced"), operator.clone());
    env.events()
        .publish(topics, LegionAddressesSynced { operator, addresses });
}

pub fn emit_sale_paused(env: &Env, operator: Address) {
    let topics = (symbol_short!("paused"), operator.clone());
    let data = SalePauseChanged {
        operator,
        paused: true,
    };
    env.events().publish(topics, data);
}

pub fn emit_sale_unpaused(env: &Env, operator: Address) {
    let topics = (symbol_short!("unpaused"), operator.clone());
    let data = SalePauseChanged {
        operator,
        paused: false,
    };
    env.events().publish(topics, data);
}

pub fn emit_vesting_terms_updated(env: &Env, project: Address, terms: VestingTerms) {
    let topics = (symbol_short!("vesting"), project.clone());
    env.events()
        .publish(topics, VestingTermsUpdated { project, terms });
}
