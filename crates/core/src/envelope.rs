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

use alloy_primitives::{hex, Address, Bytes, ChainId, TxNumber, B256, U256};
use alloy_rlp::Decodable;
use anyhow::Context;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey as K256VerifyingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::{
    encoding::{self, Field},
    keccak::keccak,
    signature::TxSignature,
    signer::public_key_to_address,
};

/// Gas limit used when none is configured; large enough for any development network.
pub const DEFAULT_GAS_LIMIT: U256 = U256::from_limbs([0x000f_ffff_ffff_ffff, 0, 0, 0]);

/// Error returned when decoding a signed envelope.
#[derive(Debug, ThisError)]
pub enum EnvelopeError {
    /// The input is not a well-formed canonical encoding.
    #[error("malformed encoding: {0}")]
    Rlp(#[from] alloy_rlp::Error),
    /// The destination field is not empty.
    #[error("destination is not empty, only contract creation is supported")]
    NotCreate,
    /// Extra bytes follow the encoded list, or follow the last field inside it.
    #[error("trailing data after the transaction")]
    TrailingData,
    /// `v` is neither a legacy nor an EIP-155 value.
    #[error("invalid signature v value {0}")]
    InvalidV(u64),
}

/// The fee and value settings applied to every deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    /// Price per unit of gas; zero is accepted by private and development networks.
    pub gas_price: U256,
    /// Upper bound on the gas the deployment may consume.
    pub gas_limit: U256,
    /// Native currency transferred to the new contract.
    pub value: U256,
    /// Chain ID folded into the signature according to EIP-155. `None` produces a
    /// legacy signature without replay protection.
    pub chain_id: Option<ChainId>,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            gas_price: U256::ZERO,
            gas_limit: DEFAULT_GAS_LIMIT,
            value: U256::ZERO,
            chain_id: None,
        }
    }
}

/// An unsigned contract-creation transaction.
///
/// The destination is not stored: it is always empty, which is what marks the
/// transaction as a contract creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateEnvelope {
    /// Number of transactions previously sent by the sender.
    pub nonce: TxNumber,
    /// The price, in Wei, paid per unit of gas.
    pub gas_price: U256,
    /// The maximum amount of gas allocated for the deployment.
    pub gas_limit: U256,
    /// The amount, in Wei, sent along with the creation.
    pub value: U256,
    /// The compiled bytecode to deploy.
    pub data: Bytes,
    /// Chain ID used for signing only; never part of the broadcast encoding.
    pub chain_id: Option<ChainId>,
}

impl CreateEnvelope {
    pub fn new(bytecode: impl Into<Bytes>, nonce: TxNumber, gas: &GasConfig) -> Self {
        Self {
            nonce,
            gas_price: gas.gas_price,
            gas_limit: gas.gas_limit,
            value: gas.value,
            data: bytecode.into(),
            chain_id: gas.chain_id,
        }
    }

    /// The six transaction fields in canonical order.
    fn fields(&self) -> [Field<'_>; 6] {
        [
            Field::from(self.nonce),
            Field::from(self.gas_price),
            Field::from(self.gas_limit),
            Field::Bytes(&[]),
            Field::from(self.value),
            Field::from(&self.data),
        ]
    }

    /// Returns the canonical encoding that gets hashed and signed.
    ///
    /// According to EIP-155, if `chain_id` is present, `(chain_id, 0, 0)` is appended
    /// to the six transaction fields. Without a chain ID the payload is exactly the
    /// unsigned transaction.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut fields = self.fields().to_vec();
        if let Some(chain_id) = self.chain_id {
            fields.extend([
                Field::from(chain_id),
                Field::from(0u64),
                Field::from(0u64),
            ]);
        }
        encoding::encode_list(&fields)
    }

    /// Computes the Keccak hash of the signing payload.
    pub fn signing_hash(&self) -> B256 {
        keccak(self.signing_payload())
    }
}

/// A contract-creation transaction together with its signature.
///
/// Only the signer and [SignedEnvelope::decode] construct values of this type, and
/// there is no way to reach the fields mutably, so a signed envelope always carries
/// the signature it was created or received with. Changing anything requires cloning
/// the [CreateEnvelope] and signing again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedEnvelope {
    essence: CreateEnvelope,
    signature: TxSignature,
}

impl SignedEnvelope {
    pub(crate) fn new(essence: CreateEnvelope, signature: TxSignature) -> Self {
        Self { essence, signature }
    }

    /// Returns the signed transaction fields.
    pub fn essence(&self) -> &CreateEnvelope {
        &self.essence
    }

    pub fn signature(&self) -> &TxSignature {
        &self.signature
    }

    /// Returns the canonical encoding of all nine fields, as broadcast to the network.
    pub fn encoded(&self) -> Vec<u8> {
        let [nonce, gas_price, gas_limit, to, value, data] = self.essence.fields();
        encoding::encode_list(&[
            nonce,
            gas_price,
            gas_limit,
            to,
            value,
            data,
            Field::from(self.signature.v),
            Field::from(self.signature.r),
            Field::from(self.signature.s),
        ])
    }

    /// Returns the `0x`-prefixed hex form of [SignedEnvelope::encoded].
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.encoded())
    }

    /// Computes the transaction hash, which is the Keccak hash of the signed encoding.
    pub fn hash(&self) -> B256 {
        keccak(self.encoded())
    }

    /// Decodes a signed contract-creation transaction.
    ///
    /// The input must contain exactly one list and no trailing data.
    pub fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, EnvelopeError> {
        let mut buf = bytes.as_ref();
        let header = alloy_rlp::Header::decode(&mut buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString.into());
        }
        if buf.len() < header.payload_length {
            return Err(alloy_rlp::Error::InputTooShort.into());
        }
        if buf.len() > header.payload_length {
            return Err(EnvelopeError::TrailingData);
        }

        let nonce = TxNumber::decode(&mut buf)?;
        let gas_price = U256::decode(&mut buf)?;
        let gas_limit = U256::decode(&mut buf)?;
        let to = alloy_rlp::Header::decode(&mut buf)?;
        if to.list || to.payload_length != 0 {
            return Err(EnvelopeError::NotCreate);
        }
        let value = U256::decode(&mut buf)?;
        let data = Bytes::decode(&mut buf)?;
        let v = u64::decode(&mut buf)?;
        let r = U256::decode(&mut buf)?;
        let s = U256::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(EnvelopeError::TrailingData);
        }

        let signature = TxSignature { v, r, s };
        if signature.y_parity().is_none() {
            return Err(EnvelopeError::InvalidV(v));
        }
        let essence = CreateEnvelope {
            nonce,
            gas_price,
            gas_limit,
            value,
            data,
            chain_id: signature.chain_id(),
        };

        Ok(Self { essence, signature })
    }

    /// Recovers the address of the account that signed the transaction.
    pub fn recover_signer(&self) -> anyhow::Result<Address> {
        let is_y_odd = self.signature.y_parity().context("v invalid")?;
        let signature = K256Signature::from_scalars(
            self.signature.r.to_be_bytes::<32>(),
            self.signature.s.to_be_bytes::<32>(),
        )
        .context("r, s invalid")?;

        let verify_key = K256VerifyingKey::recover_from_prehash(
            self.essence.signing_hash().as_slice(),
            &signature,
            RecoveryId::new(is_y_odd, false),
        )
        .context("invalid signature")?;

        Ok(public_key_to_address(&verify_key))
    }
}
