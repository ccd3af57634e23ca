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

use alloy_primitives::{ChainId, U256};
use serde::{Deserialize, Serialize};

/// Offset of `v` for signatures without replay protection.
pub const LEGACY_V_OFFSET: u64 = 27;
/// Offset of `v` for [EIP-155](https://eips.ethereum.org/EIPS/eip-155) signatures,
/// before adding `2 * chain_id`.
pub const EIP155_V_OFFSET: u64 = 35;
/// Largest chain ID whose EIP-155 `v` fits in a `u64` for either parity.
pub const MAX_CHAIN_ID: ChainId = (u64::MAX - EIP155_V_OFFSET - 1) / 2;

/// The `v`, `r` and `s` components of a recoverable ECDSA signature over a
/// transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl TxSignature {
    /// Builds the signature from the curve point parity, folding in the chain ID if
    /// one is given.
    ///
    /// Returns `None` if the chain ID is above [MAX_CHAIN_ID].
    pub fn new(y_odd: bool, r: U256, s: U256, chain_id: Option<ChainId>) -> Option<Self> {
        let v = match chain_id {
            None => LEGACY_V_OFFSET + y_odd as u64,
            Some(chain_id) if chain_id <= MAX_CHAIN_ID => {
                EIP155_V_OFFSET + 2 * chain_id + y_odd as u64
            }
            Some(_) => return None,
        };
        Some(Self { v, r, s })
    }

    /// Returns the chain_id of the V value, if any.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self.v {
            value @ EIP155_V_OFFSET..=u64::MAX => Some((value - EIP155_V_OFFSET) / 2),
            _ => None,
        }
    }

    /// Returns the parity of the y-value of the curve point for which `r` is the
    /// x-value, or `None` if `v` is not a valid legacy or EIP-155 value.
    pub fn y_parity(&self) -> Option<bool> {
        match self.v {
            27 => Some(false),
            28 => Some(true),
            value @ EIP155_V_OFFSET..=u64::MAX => Some((value - EIP155_V_OFFSET) % 2 == 1),
            _ => None,
        }
    }
}
