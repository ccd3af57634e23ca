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

//! Common utilities for json-rpc

use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";

pub const GET_TRANSACTION_COUNT: &str = "eth_getTransactionCount";
pub const SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";
pub const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";

/// Request id used for dumped `eth_sendRawTransaction` calls.
pub const SEND_RAW_TRANSACTION_ID: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest<T> {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: T,
}

impl JsonRpcRequest<[String; 1]> {
    /// Builds the self-contained `eth_sendRawTransaction` call for a `0x`-prefixed
    /// signed transaction.
    pub fn send_raw_transaction(signed_hex: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: SEND_RAW_TRANSACTION_ID,
            method: SEND_RAW_TRANSACTION.to_string(),
            params: [signed_hex],
        }
    }
}

// curl --location --request POST 'http://localhost:8545' --header 'Content-Type: application/json' --data-raw '{
// "jsonrpc": "2.0",
// "id": 2,
// "method": "eth_sendRawTransaction",
// "params": ["0xf852..."]
// }'

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order() {
        let request = JsonRpcRequest::send_raw_transaction("0xabcd".to_string());
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"jsonrpc":"2.0","id":2,"method":"eth_sendRawTransaction","params":["0xabcd"]}"#
        );
    }
}
