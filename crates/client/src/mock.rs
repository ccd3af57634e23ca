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

//! In-memory [Transport] that records every call.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use alloy::primitives::{address, hex, Address, B256, U256, U64};
use async_trait::async_trait;
use deployer_core::keccak::keccak;

use crate::{
    error::DeployError,
    json_rpc::{GET_TRANSACTION_COUNT, GET_TRANSACTION_RECEIPT, SEND_RAW_TRANSACTION},
    receipt::DeploymentReceipt,
    transport::Transport,
};

pub const CONTRACT_ADDRESS: Address = address!("8a0a87f0d7e7aa5a50d6bd0cd1a4fc4c32c6b9e9");

#[derive(Debug, Default)]
pub struct MockTransport {
    pub nonce: u64,
    /// Number of receipt queries answered with `None` before the receipt appears.
    pub pending_polls: usize,
    /// Fails every call with a network error.
    pub unreachable: bool,
    /// Fails receipt queries with a network error, after a successful send.
    pub receipt_unreachable: bool,
    /// JSON-RPC error returned by `eth_sendRawTransaction`.
    pub rejection: Option<(i64, String)>,
    pub reverted: bool,

    pub count_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub receipt_calls: AtomicUsize,
    pub sent: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn with_nonce(nonce: u64) -> Self {
        Self {
            nonce,
            ..Default::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
            + self.send_calls.load(Ordering::SeqCst)
            + self.receipt_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn check_reachable(&self, method: &'static str) -> Result<(), DeployError> {
        if self.unreachable {
            return Err(DeployError::network(method, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn transaction_count(&self, _address: Address) -> Result<u64, DeployError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable(GET_TRANSACTION_COUNT)?;
        Ok(self.nonce)
    }

    async fn send_raw_transaction(&self, signed_hex: &str) -> Result<B256, DeployError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable(SEND_RAW_TRANSACTION)?;
        if let Some((code, message)) = &self.rejection {
            return Err(DeployError::Rejection {
                method: SEND_RAW_TRANSACTION,
                code: *code,
                message: message.clone(),
            });
        }
        self.sent.lock().unwrap().push(signed_hex.to_string());
        Ok(keccak(hex::decode(signed_hex).unwrap()))
    }

    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<DeploymentReceipt>, DeployError> {
        let polls = self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable(GET_TRANSACTION_RECEIPT)?;
        if self.receipt_unreachable {
            return Err(DeployError::network(GET_TRANSACTION_RECEIPT, "connection reset"));
        }
        if polls < self.pending_polls {
            return Ok(None);
        }
        Ok(Some(DeploymentReceipt {
            transaction_hash: hash,
            block_hash: Some(B256::repeat_byte(0x11)),
            block_number: Some(U64::from(28)),
            from: None,
            gas_used: Some(U256::from(195_089)),
            cumulative_gas_used: Some(U256::from(195_089)),
            status: Some(U64::from(!self.reverted as u8)),
            contract_address: Some(CONTRACT_ADDRESS),
            other: BTreeMap::new(),
        }))
    }
}
