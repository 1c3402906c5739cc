//! # Sealed-bid cipher
//!
//! ElGamal-style encryption of bid amounts over the BLS12-381 G1 group, using
//! the host's curve and scalar-field arithmetic.
//!
//! ```text
//! G            fixed base point (hash-to-curve of a constant tag)
//! sk, PK=G·sk  sale key pair; PK is configured, sk is revealed with the results
//! r,  R=G·r    bidder's ephemeral key pair
//! S = PK·r = R·sk                shared point
//! k = H(S || xdr(salt)) mod q    mask, bound to the bidder's account
//! c = amount + k                 ciphertext (scalar field)
//! amount = c + (−k)              decryption
//! ```
//!
//! Binding the salt into the mask means a ciphertext lifted from another
//! account decrypts to noise. At invest time the engine additionally rejects
//! any bid whose salt is not the caller or whose key is not the sale's key.

use soroban_sdk::{
    crypto::bls12_381::{Fr, G1Affine},
    log,
    xdr::ToXdr,
    Address, Bytes, BytesN, Env, U256,
};

use crate::types::SealedBid;
use crate::Error;

const BASE_POINT_MSG: &[u8] = b"LEGION_SEALED_BID_BASE_POINT";
const BASE_POINT_DST: &[u8] = b"LEGION-SEALED-BID-V1_XMD:SHA-256_SSWU_RO_";
const MASK_TAG: &[u8] = b"LEGION_SEALED_BID_MASK_V1";

/// Scalars with any of the top three bits set may exceed the group order.
const SCALAR_HIGH_BITS: u8 = 0xe0;

/// Order of the BLS12-381 scalar field, big-endian.
const FR_MODULUS: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

/// Compression, infinity and sort flags of an uncompressed G1 encoding.
const POINT_FLAG_BITS: u8 = 0xe0;

fn base_point(env: &Env) -> G1Affine {
    env.crypto().bls12_381().hash_to_g1(
        &Bytes::from_slice(env, BASE_POINT_MSG),
        &Bytes::from_slice(env, BASE_POINT_DST),
    )
}

/// Parse a secret scalar, rejecting values that are not canonical.
fn secret_scalar(bytes: &BytesN<32>) -> Result<Fr, Error> {
    if bytes.to_array()[0] & SCALAR_HIGH_BITS != 0 {
        return Err(Error::InvalidBidPrivateKey);
    }
    if bytes.to_array() == [0u8; 32] {
        return Err(Error::InvalidBidPrivateKey);
    }
    Ok(Fr::from_bytes(bytes.clone()))
}

fn mask(env: &Env, shared: &G1Affine, salt: &Address) -> Fr {
    let mut payload = Bytes::from_slice(env, MASK_TAG);
    payload.extend_from_array(&shared.to_bytes().to_array());
    payload.append(&salt.clone().to_xdr(env));
    let mut digest: [u8; 32] = env.crypto().sha256(&payload).to_array();
    digest[0] &= !SCALAR_HIGH_BITS;
    Fr::from_bytes(BytesN::from_array(env, &digest))
}

/// `G·sk`, the public key matching a private scalar.
pub fn public_key_from_private(env: &Env, private_key: &BytesN<32>) -> Result<BytesN<96>, Error> {
    let sk = secret_scalar(private_key)?;
    Ok(env.crypto().bls12_381().g1_mul(&base_point(env), &sk).to_bytes())
}

/// Check a revealed private key against the configured public key.
pub fn verify_private_key(
    env: &Env,
    private_key: &BytesN<32>,
    public_key: &BytesN<96>,
) -> Result<(), Error> {
    if public_key_from_private(env, private_key)? != *public_key {
        log!(env, "revealed key does not reproduce the sale public key");
        return Err(Error::InvalidBidPrivateKey);
    }
    Ok(())
}

/// Check that a bid was sealed for this sale and this investor.
pub fn verify_binding(
    bid: &SealedBid,
    investor: &Address,
    sale_public_key: &BytesN<96>,
) -> Result<(), Error> {
    if bid.public_key != *sale_public_key {
        return Err(Error::InvalidBidPublicKey);
    }
    if bid.salt != *investor {
        return Err(Error::InvalidSalt);
    }
    Ok(())
}

/// Check that a bid can later be decrypted: the ciphertext is a canonical
/// scalar and the ephemeral key is a finite point of the G1 subgroup.
///
/// Encodings that parse but lie off the curve are rejected by the host and
/// abort the call.
pub fn verify_ciphertext(env: &Env, bid: &SealedBid) -> Result<(), Error> {
    if bid.encrypted_amount.to_array() >= FR_MODULUS {
        return Err(Error::InvalidSealedBid);
    }
    if bid.ephemeral_key.to_array()[0] & POINT_FLAG_BITS != 0 {
        return Err(Error::InvalidSealedBid);
    }
    let ephemeral = G1Affine::from_bytes(bid.ephemeral_key.clone());
    if !env.crypto().bls12_381().g1_is_in_subgroup(&ephemeral) {
        return Err(Error::InvalidSealedBid);
    }
    Ok(())
}

/// Seal `amount` to `public_key` for the account `salt`.
///
/// Runs client side in practice; exposed so tooling and tests share one
/// implementation with the on-ledger decryption.
pub fn encrypt(
    env: &Env,
    amount: i128,
    public_key: &BytesN<96>,
    ephemeral_secret: &BytesN<32>,
    salt: &Address,
) -> Result<SealedBid, Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    let bls = env.crypto().bls12_381();
    let r = secret_scalar(ephemeral_secret)?;
    let ephemeral = bls.g1_mul(&base_point(env), &r);
    let shared = bls.g1_mul(&G1Affine::from_bytes(public_key.clone()), &r);

    let plain = Fr::from(U256::from_u128(env, amount as u128));
    let encrypted = bls.fr_add(&plain, &mask(env, &shared, salt));

    Ok(SealedBid {
        encrypted_amount: encrypted.to_bytes(),
        ephemeral_key: ephemeral.to_bytes(),
        public_key: public_key.clone(),
        salt: salt.clone(),
    })
}

/// Recover the amount sealed in `bid` with the sale's private key.
pub fn decrypt(env: &Env, bid: &SealedBid, private_key: &BytesN<32>) -> Result<i128, Error> {
    let bls = env.crypto().bls12_381();
    let sk = secret_scalar(private_key)?;
    let shared = bls.g1_mul(&G1Affine::from_bytes(bid.ephemeral_key.clone()), &sk);

    let encrypted = Fr::from_bytes(bid.encrypted_amount.clone());
    let plain = bls.fr_sub(&encrypted, &mask(env, &shared, &bid.salt));

    let amount = plain
        .to_u256()
        .to_u128()
        .filter(|v| *v > 0 && *v <= i128::MAX as u128)
        .ok_or(Error::InvalidSealedBid)?;
    Ok(amount as i128)
}
