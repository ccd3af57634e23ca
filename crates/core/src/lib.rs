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

//! Construction and signing of contract-creation transactions.

pub mod encoding;
pub mod envelope;
pub mod keccak;
pub mod signature;
pub mod signer;

pub use alloy_primitives::{Address, Bytes, ChainId, B256, U256};

pub use envelope::{CreateEnvelope, EnvelopeError, GasConfig, SignedEnvelope, DEFAULT_GAS_LIMIT};
pub use signature::{TxSignature, MAX_CHAIN_ID};
pub use signer::{SignerError, TxSigner};
