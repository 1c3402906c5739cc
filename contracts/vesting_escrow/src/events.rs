use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowCreated {
    pub escrow_id: u64,
    pub funder: Address,
    pub beneficiary: Address,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensReleased {
    pub escrow_id: u64,
    pub beneficiary: Address,
    pub amount: i128,
}

pub fn emit_escrow_created(
    env: &Env,
    escrow_id: u64,
    funder: Address,
    beneficiary: Address,
    token: Address,
    amount: i128,
) {
    let topics = (symbol_short!("created"), escrow_id);
    let data = EscrowCreated {
        escrow_id,
        funder,
        beneficiary,
        token,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_tokens_released(env: &Env, escrow_id: u64, beneficiary: Address, amount: i128) {
    let topics = (symbol_short!("released"), escrow_id);
    let data = TokensReleased {
        escrow_id,
        beneficiary,
        amount,
    };
    env.events().publish(topics, data);
}
