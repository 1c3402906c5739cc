//! Shared fixtures for the sale tests: a registry stand-in, the off-chain
//! co-signer, a Merkle tree builder and a fully wired sale.

extern crate std;

use core::cell::Cell;

use ed25519_dalek::{Signer, SigningKey};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, BytesN, Env, Vec,
};
use vesting_escrow::{VestingEscrow, VestingEscrowClient};

use crate::types::{
    InvestPayload, LegionAddresses, SaleInitParams, SaleVariant, SealedBid, VestingTerms,
};
use crate::{merkle, sealed_bid, signature, LegionSale, LegionSaleClient};

pub const HOUR: u64 = 60 * 60;
pub const DAY: u64 = 24 * HOUR;
pub const WEEK: u64 = 7 * DAY;

pub const START: u64 = 1_700_000_000;
pub const PREFUND: u64 = DAY;
pub const PREFUND_ALLOCATION: u64 = DAY;
pub const SALE: u64 = WEEK;
pub const REFUND: u64 = 2 * DAY;
pub const LOCKUP: u64 = 4 * WEEK;

pub const LEGION_FEE_BPS: u32 = 250;
pub const REFERRER_FEE_BPS: u32 = 100;
pub const MIN_INVEST: i128 = 1_000;

pub const E18: i128 = 1_000_000_000_000_000_000;

pub type Proofs = std::vec::Vec<Vec<BytesN<32>>>;

// ── Registry stand-in ────────────────────────────────────────────────

#[contracttype]
enum RegistryKey {
    Addresses,
}

#[contract]
pub struct MockRegistry;

#[contractimpl]
impl MockRegistry {
    pub fn set_legion_addresses(env: Env, addresses: LegionAddresses) {
        env.storage()
            .instance()
            .set(&RegistryKey::Addresses, &addresses);
    }

    pub fn legion_addresses(env: Env) -> LegionAddresses {
        env.storage()
            .instance()
            .get(&RegistryKey::Addresses)
            .unwrap()
    }
}

// ── Merkle trees ─────────────────────────────────────────────────────

/// Build a sorted-pair tree over `leaves`; returns the root and one proof per
/// leaf. An odd node is carried up unchanged; an empty tree has a zero root.
pub fn merkle_tree(env: &Env, leaves: &[BytesN<32>]) -> (BytesN<32>, Proofs) {
    if leaves.is_empty() {
        return (BytesN::from_array(env, &[0u8; 32]), Proofs::new());
    }
    let mut proofs: Proofs = leaves.iter().map(|_| Vec::new(env)).collect();
    let mut level: std::vec::Vec<(BytesN<32>, std::vec::Vec<usize>)> = leaves
        .iter()
        .enumerate()
        .map(|(i, leaf)| (leaf.clone(), std::vec![i]))
        .collect();

    while level.len() > 1 {
        let mut next = std::vec::Vec::new();
        for pair in level.chunks(2) {
            if let [(a, under_a), (b, under_b)] = pair {
                for i in under_a {
                    proofs[*i].push_back(b.clone());
                }
                for i in under_b {
                    proofs[*i].push_back(a.clone());
                }
                let mut members = under_a.clone();
                members.extend(under_b.iter().copied());
                next.push((merkle::hash_pair(env, a, b), members));
            } else {
                next.push(pair[0].clone());
            }
        }
        level = next;
    }

    (level[0].0.clone(), proofs)
}

/// Accepted-capital tree over `(investor, accepted)` entries.
pub fn accepted_tree(
    env: &Env,
    entries: &[(Address, i128)],
) -> (BytesN<32>, Proofs) {
    let leaves: std::vec::Vec<BytesN<32>> = entries
        .iter()
        .map(|(investor, accepted)| merkle::accepted_capital_leaf(env, investor, *accepted))
        .collect();
    merkle_tree(env, &leaves)
}

/// Claim tree over `(investor, tokens, vesting override)` entries.
pub fn claim_tree(
    env: &Env,
    entries: &[(Address, i128, Option<VestingTerms>)],
) -> (BytesN<32>, Proofs) {
    let leaves: std::vec::Vec<BytesN<32>> = entries
        .iter()
        .map(|(investor, amount, vesting)| merkle::claim_leaf(env, investor, *amount, vesting))
        .collect();
    merkle_tree(env, &leaves)
}

// ── Keys ─────────────────────────────────────────────────────────────

/// A canonical BLS scalar derived from `seed`.
pub fn bls_key(env: &Env, seed: u8) -> BytesN<32> {
    let mut bytes = [seed; 32];
    bytes[0] = 0x01;
    BytesN::from_array(env, &bytes)
}

pub const AUCTION_KEY_SEED: u8 = 42;

// ── Sale fixture ─────────────────────────────────────────────────────

pub struct TestSale {
    pub env: Env,
    pub client: LegionSaleClient<'static>,
    pub bid: token::Client<'static>,
    pub ask: token::Client<'static>,
    pub registry: MockRegistryClient<'static>,
    pub issuer: VestingEscrowClient<'static>,
    pub project: Address,
    pub operator: Address,
    pub fee_receiver: Address,
    pub referrer: Address,
    pub signer: SigningKey,
    nonce: Cell<u64>,
}

pub fn default_vesting() -> VestingTerms {
    VestingTerms {
        cliff_duration: DAY,
        vesting_duration: 10 * DAY,
        tge_rate_bps: 1_000,
    }
}

pub fn fixed_price() -> SaleVariant {
    SaleVariant::FixedPrice(2 * E18)
}

pub fn auction_variant(env: &Env) -> SaleVariant {
    let public_key = sealed_bid::public_key_from_private(env, &bls_key(env, AUCTION_KEY_SEED)).unwrap();
    SaleVariant::SealedBidAuction(public_key)
}

impl TestSale {
    /// Deploy tokens, registry, issuer and an uninitialized sale.
    pub fn deploy() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START);

        let token_admin = Address::generate(&env);
        let bid = env.register_stellar_asset_contract_v2(token_admin.clone());
        let ask = env.register_stellar_asset_contract_v2(token_admin);
        let bid = token::Client::new(&env, &bid.address());
        let ask = token::Client::new(&env, &ask.address());

        let signer = SigningKey::from_bytes(&[7u8; 32]);
        let operator = Address::generate(&env);
        let fee_receiver = Address::generate(&env);
        let issuer = VestingEscrowClient::new(&env, &env.register(VestingEscrow, ()));

        let registry = MockRegistryClient::new(&env, &env.register(MockRegistry, ()));
        registry.set_legion_addresses(&LegionAddresses {
            bid_operator: operator.clone(),
            signer: BytesN::from_array(&env, &signer.verifying_key().to_bytes()),
            fee_receiver: fee_receiver.clone(),
            vesting_issuer: issuer.address.clone(),
        });

        let client = LegionSaleClient::new(&env, &env.register(LegionSale, ()));

        TestSale {
            project: Address::generate(&env),
            referrer: Address::generate(&env),
            env,
            client,
            bid,
            ask,
            registry,
            issuer,
            operator,
            fee_receiver,
            signer,
            nonce: Cell::new(0),
        }
    }

    pub fn params(&self, variant: SaleVariant) -> SaleInitParams {
        let fixed = matches!(variant, SaleVariant::FixedPrice(_));
        SaleInitParams {
            project_admin: self.project.clone(),
            bid_token: self.bid.address.clone(),
            ask_token: self.ask.address.clone(),
            registry: self.registry.address.clone(),
            referrer_fee_receiver: self.referrer.clone(),
            prefund_period: if fixed { PREFUND } else { 0 },
            prefund_allocation_period: if fixed { PREFUND_ALLOCATION } else { 0 },
            sale_period: SALE,
            refund_period: REFUND,
            lockup_period: LOCKUP,
            legion_capital_fee_bps: LEGION_FEE_BPS,
            legion_token_fee_bps: LEGION_FEE_BPS,
            referrer_capital_fee_bps: REFERRER_FEE_BPS,
            referrer_token_fee_bps: REFERRER_FEE_BPS,
            minimum_invest_amount: MIN_INVEST,
            vesting_terms: default_vesting(),
            variant,
        }
    }

    /// Deploy and initialize a sale of the given variant.
    pub fn new(variant: fn(&Env) -> SaleVariant) -> Self {
        let sale = Self::deploy();
        let params = sale.params(variant(&sale.env));
        sale.client.initialize(&params);
        sale
    }

    pub fn fixed() -> Self {
        Self::new(|_| fixed_price())
    }

    pub fn auction() -> Self {
        Self::new(auction_variant)
    }

    pub fn pre_liquid() -> Self {
        Self::new(|_| SaleVariant::PreLiquid)
    }

    // ── Time ─────────────────────────────────────────────────────

    pub fn jump_to(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// Move to the open investment phase (past any prefund allocation window).
    pub fn to_active(&self) {
        let config = self.client.sale_config();
        self.jump_to(config.prefund_allocation_end_time);
    }

    pub fn to_refund_window(&self) {
        self.jump_to(self.client.sale_config().end_time);
    }

    pub fn to_refund_over(&self) {
        self.jump_to(self.client.sale_config().refund_end_time);
    }

    pub fn to_lockup_over(&self) {
        self.jump_to(self.client.sale_config().lockup_end_time);
    }

    // ── Investing ────────────────────────────────────────────────

    pub fn sign(&self, investor: &Address, payload: &InvestPayload) -> BytesN<64> {
        let digest = signature::invest_digest(
            &self.env,
            investor,
            &self.client.address,
            &self.env.ledger().network_id(),
            payload,
        );
        let signature = self.signer.sign(&digest.to_array());
        BytesN::from_array(&self.env, &signature.to_bytes())
    }

    pub fn fund(&self, investor: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.bid.address).mint(investor, &amount);
    }

    /// New funded investor that has invested `amount` with a signed nonce.
    pub fn investor(&self, amount: i128) -> Address {
        let investor = Address::generate(&self.env);
        self.invest(&investor, amount, self.next_nonce());
        investor
    }

    pub fn invest(&self, investor: &Address, amount: i128, nonce: u64) {
        self.fund(investor, amount);
        let payload = InvestPayload::Nonce(nonce);
        let signature = self.sign(investor, &payload);
        self.client.invest(investor, &amount, &payload, &signature);
    }

    /// New funded investor that has placed a sealed bid of `bid_amount`
    /// backed by `capital`.
    pub fn bidder(&self, capital: i128, bid_amount: i128, ephemeral_seed: u8) -> Address {
        let investor = Address::generate(&self.env);
        self.fund(&investor, capital);
        let payload = InvestPayload::Sealed(self.seal(&investor, bid_amount, ephemeral_seed));
        let signature = self.sign(&investor, &payload);
        self.client.invest(&investor, &capital, &payload, &signature);
        investor
    }

    pub fn seal(&self, salt: &Address, amount: i128, ephemeral_seed: u8) -> SealedBid {
        let public_key = self.client.sale_config().variant.auction_key().unwrap();
        sealed_bid::encrypt(
            &self.env,
            amount,
            &public_key,
            &bls_key(&self.env, ephemeral_seed),
            salt,
        )
        .unwrap()
    }

    pub fn next_nonce(&self) -> u64 {
        let nonce = self.nonce.get();
        self.nonce.set(nonce + 1);
        nonce
    }

    // ── Settlement ───────────────────────────────────────────────

    pub fn mint_ask(&self, to: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.ask.address).mint(to, &amount);
    }

    /// Token fees owed on `tokens_allocated` under the fixture rates.
    pub fn token_fees(tokens_allocated: i128) -> (i128, i128) {
        (
            tokens_allocated * LEGION_FEE_BPS as i128 / 10_000,
            tokens_allocated * REFERRER_FEE_BPS as i128 / 10_000,
        )
    }

    /// Fund the project and supply exactly what the published results require.
    pub fn supply(&self) {
        let allocated = self.client.sale_status().total_tokens_allocated;
        let (legion_fee, referrer_fee) = Self::token_fees(allocated);
        self.mint_ask(&self.project, allocated + legion_fee + referrer_fee);
        self.client
            .supply_tokens(&self.project, &allocated, &legion_fee, &referrer_fee);
    }

    /// Publish results over the given entries with totals summed from them.
    /// Returns the claim and accepted-capital proofs in entry order.
    pub fn publish(
        &self,
        claims: &[(Address, i128, Option<VestingTerms>)],
        accepted: &[(Address, i128)],
        private_key: Option<BytesN<32>>,
    ) -> (Proofs, Proofs) {
        let (claim_root, claim_proofs) = claim_tree(&self.env, claims);
        let (accepted_root, accepted_proofs) = accepted_tree(&self.env, accepted);
        let tokens_allocated: i128 = claims.iter().map(|(_, amount, _)| amount).sum();
        let capital_accepted: i128 = accepted.iter().map(|(_, amount)| amount).sum();
        self.client.publish_sale_results(
            &self.operator,
            &claim_root,
            &accepted_root,
            &tokens_allocated,
            &capital_accepted,
            &private_key,
        );
        (claim_proofs, accepted_proofs)
    }
}
