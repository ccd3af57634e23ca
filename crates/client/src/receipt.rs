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

use std::collections::BTreeMap;

use alloy::primitives::{Address, B256, U256, U64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The node's report on a processed transaction, as returned by
/// `eth_getTransactionReceipt`.
///
/// Only the fields relevant to a deployment are typed; everything else the node
/// sends (logs, bloom, ...) is kept verbatim in `other` so the printed receipt is
/// complete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReceipt {
    pub transaction_hash: B256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_gas_used: Option<U256>,
    /// `1` on success, `0` on failure. Absent on nodes that predate the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<U64>,
    /// Address of the created contract.
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl DeploymentReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status == U64::from(1))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};
    use serde_json::json;

    use super::*;

    fn node_receipt() -> Value {
        json!({
            "transactionHash": "0x4564df56e2a396bd9c7ad279577352ac63edc149420b1d170105bc3e8a4b15dc",
            "transactionIndex": "0x0",
            "blockHash": "0x2e1d3fd8e5a0f1c0b8b5a1d2a6d9c4c0e2f2e7ce3d27c5f1c76b4a3b1d8f0e11",
            "blockNumber": "0x1c",
            "from": "0x1cca28600d7491365520b31b466f88647b9839ec",
            "to": null,
            "gasUsed": "0x2fa11",
            "cumulativeGasUsed": "0x2fa11",
            "contractAddress": "0x8a0a87f0d7e7aa5a50d6bd0cd1a4fc4c32c6b9e9",
            "logs": [],
            "logsBloom": "0x00",
            "status": "0x1"
        })
    }

    #[test]
    fn deserialize() {
        let receipt: DeploymentReceipt = serde_json::from_value(node_receipt()).unwrap();
        assert_eq!(
            receipt.transaction_hash,
            b256!("4564df56e2a396bd9c7ad279577352ac63edc149420b1d170105bc3e8a4b15dc")
        );
        assert_eq!(receipt.block_number, Some(U64::from(0x1c)));
        assert_eq!(receipt.gas_used, Some(U256::from(0x2fa11)));
        assert_eq!(
            receipt.contract_address,
            Some(address!("8a0a87f0d7e7aa5a50d6bd0cd1a4fc4c32c6b9e9"))
        );
        assert!(receipt.succeeded());
        assert!(receipt.other.contains_key("logs"));
        assert!(receipt.other.contains_key("logsBloom"));
    }

    #[test]
    fn keeps_unknown_fields() {
        let receipt: DeploymentReceipt = serde_json::from_value(node_receipt()).unwrap();
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["logs"], json!([]));
        assert_eq!(value["transactionIndex"], json!("0x0"));
        assert_eq!(value["status"], json!("0x1"));
    }

    #[test]
    fn failed_status() {
        let mut value = node_receipt();
        value["status"] = json!("0x0");
        let receipt: DeploymentReceipt = serde_json::from_value(value).unwrap();
        assert!(!receipt.succeeded());
    }

    #[test]
    fn missing_status() {
        let receipt: DeploymentReceipt = serde_json::from_value(json!({
            "transactionHash": "0x4564df56e2a396bd9c7ad279577352ac63edc149420b1d170105bc3e8a4b15dc",
            "root": "0x0000000000000000000000000000000000000000000000000000000000000000"
        }))
        .unwrap();
        assert!(receipt.succeeded());
        assert_eq!(receipt.contract_address, None);
    }
}
