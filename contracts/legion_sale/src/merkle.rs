//! # Merkle whitelist verification
//!
//! Two roots are published per sale:
//!
//! - the **accepted-capital** root, leaves `(investor, accepted_capital)`;
//! - the **claim** root, leaves `(investor, token_amount, Option<VestingTerms>)`.
//!
//! Hashing scheme, with domain separation between leaves and inner nodes:
//!
//! - leaf: `sha256(0x00 || xdr(leaf))`
//! - node: `sha256(0x01 || min(a, b) || max(a, b))`
//!
//! Sorting each pair makes proofs position-free: a proof is just the list of
//! sibling hashes from the leaf up to the root.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::types::VestingTerms;

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

pub fn hash_leaf(env: &Env, data: &Bytes) -> BytesN<32> {
    let mut payload = Bytes::from_array(env, &[LEAF_PREFIX]);
    payload.append(data);
    env.crypto().sha256(&payload).into()
}

pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let (left, right) = if a.to_array() <= b.to_array() {
        (a, b)
    } else {
        (b, a)
    };
    let mut payload = Bytes::from_array(env, &[NODE_PREFIX]);
    payload.extend_from_array(&left.to_array());
    payload.extend_from_array(&right.to_array());
    env.crypto().sha256(&payload).into()
}

pub fn accepted_capital_leaf(env: &Env, investor: &Address, accepted_capital: i128) -> BytesN<32> {
    hash_leaf(env, &(investor.clone(), accepted_capital).to_xdr(env))
}

pub fn claim_leaf(
    env: &Env,
    investor: &Address,
    amount: i128,
    vesting: &Option<VestingTerms>,
) -> BytesN<32> {
    hash_leaf(env, &(investor.clone(), amount, vesting.clone()).to_xdr(env))
}

pub fn compute_root(env: &Env, leaf: &BytesN<32>, proof: &Vec<BytesN<32>>) -> BytesN<32> {
    let mut node = leaf.clone();
    for sibling in proof.iter() {
        node = hash_pair(env, &node, &sibling);
    }
    node
}

pub fn verify(env: &Env, root: &BytesN<32>, leaf: &BytesN<32>, proof: &Vec<BytesN<32>>) -> bool {
    compute_root(env, leaf, proof) == *root
}
