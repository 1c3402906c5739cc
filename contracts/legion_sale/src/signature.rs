//! # Investment co-signatures
//!
//! Every investment must carry an ed25519 signature from the Legion signer
//! over a digest binding the investor, this sale and the network:
//!
//! ```text
//! sha256("LEGION_INVEST_V1" || xdr(investor) || xdr(sale) || network_id || binding)
//! ```
//!
//! `binding` is the big-endian nonce for [`InvestPayload::Nonce`] and empty for
//! [`InvestPayload::Sealed`]: auction bids are replay-protected by the salt
//! embedded in the sealed bid instead. Nonce digests are single use.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::storage;
use crate::types::InvestPayload;
use crate::Error;

const INVEST_TAG: &[u8] = b"LEGION_INVEST_V1";

/// Digest the signer signs to authorize `investor` in the sale at `sale`.
pub fn invest_digest(
    env: &Env,
    investor: &Address,
    sale: &Address,
    network_id: &BytesN<32>,
    payload: &InvestPayload,
) -> BytesN<32> {
    let mut message = Bytes::from_slice(env, INVEST_TAG);
    message.append(&investor.clone().to_xdr(env));
    message.append(&sale.clone().to_xdr(env));
    message.extend_from_array(&network_id.to_array());
    if let InvestPayload::Nonce(nonce) = payload {
        message.extend_from_array(&nonce.to_be_bytes());
    }
    env.crypto().sha256(&message).into()
}

/// Verify the signature for an investment and consume nonce-bound digests.
///
/// An invalid signature traps the host, rolling back the invocation.
pub fn verify_invest_signature(
    env: &Env,
    signer: &BytesN<32>,
    investor: &Address,
    payload: &InvestPayload,
    signature: &BytesN<64>,
) -> Result<(), Error> {
    let digest = invest_digest(
        env,
        investor,
        &env.current_contract_address(),
        &env.ledger().network_id(),
        payload,
    );

    if let InvestPayload::Nonce(_) = payload {
        if storage::is_signature_used(env, &digest) {
            return Err(Error::SignatureAlreadyUsed);
        }
    }

    env.crypto().ed25519_verify(
        signer,
        &Bytes::from_array(env, &digest.to_array()),
        signature,
    );

    if let InvestPayload::Nonce(_) = payload {
        storage::mark_signature_used(env, &digest);
    }
    Ok(())
}
