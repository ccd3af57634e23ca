// Copyright 2024 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use alloy_primitives::{hex, Address, U256};
use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
use thiserror::Error as ThisError;

use crate::{
    envelope::{CreateEnvelope, SignedEnvelope},
    keccak::keccak,
    signature::{TxSignature, MAX_CHAIN_ID},
};

/// Length in bytes of a secp256k1 secret key.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Error returned by the [TxSigner].
#[derive(Debug, ThisError)]
pub enum SignerError {
    /// The secret is not hex encoded.
    #[error("private key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// The secret has the wrong number of bytes.
    #[error("private key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),
    /// The secret is not a valid secp256k1 scalar.
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidKey(#[source] k256::ecdsa::Error),
    /// The chain ID cannot be folded into an EIP-155 `v` value.
    #[error("chain id {0} is too large, the maximum is 9223372036854775789")]
    ChainIdTooLarge(u64),
    /// The ECDSA primitive failed.
    #[error("signing failed")]
    Signing(#[source] k256::ecdsa::Error),
}

/// Computes the account address of a public key: the last 20 bytes of the Keccak hash
/// of its uncompressed encoding.
pub(crate) fn public_key_to_address(key: &VerifyingKey) -> Address {
    let public_key = key.to_encoded_point(false);
    let public_key = public_key.as_bytes();
    debug_assert_eq!(public_key[0], 0x04);
    let hash = keccak(&public_key[1..]);

    Address::from_slice(&hash[12..])
}

/// Signs contract-creation envelopes with a single secp256k1 key.
///
/// Signatures are deterministic (RFC 6979) and always use the lower of the two
/// possible `s` values.
#[derive(Clone)]
pub struct TxSigner {
    key: SigningKey,
    address: Address,
}

impl TxSigner {
    pub fn from_bytes(secret: &[u8]) -> Result<Self, SignerError> {
        if secret.len() != SECRET_KEY_LENGTH {
            return Err(SignerError::InvalidKeyLength(secret.len()));
        }
        let key = SigningKey::from_slice(secret).map_err(SignerError::InvalidKey)?;
        let address = public_key_to_address(key.verifying_key());

        Ok(Self { key, address })
    }

    /// Parses a hex encoded secret. Surrounding whitespace and a `0x` prefix are
    /// ignored.
    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let bytes = hex::decode(secret.trim())?;
        Self::from_bytes(&bytes)
    }

    /// Returns the address of the sending account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs the envelope, consuming it.
    pub fn sign(&self, envelope: CreateEnvelope) -> Result<SignedEnvelope, SignerError> {
        if let Some(chain_id) = envelope.chain_id.filter(|&id| id > MAX_CHAIN_ID) {
            return Err(SignerError::ChainIdTooLarge(chain_id));
        }
        let hash = envelope.signing_hash();
        let (mut signature, mut recovery_id) = self
            .key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(SignerError::Signing)?;
        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let (r, s) = signature.split_bytes();
        let signature = TxSignature::new(
            recovery_id.is_y_odd(),
            U256::from_be_slice(&r),
            U256::from_be_slice(&s),
            envelope.chain_id,
        )
        .ok_or(SignerError::ChainIdTooLarge(envelope.chain_id.unwrap_or_default()))?;

        Ok(SignedEnvelope::new(envelope, signature))
    }
}

impl fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
