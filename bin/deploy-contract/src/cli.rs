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

use std::{path::PathBuf, time::Duration};

use deployer_client::{Dispatch, DEFAULT_POLL_INTERVAL};
use deployer_core::{ChainId, GasConfig, MAX_CHAIN_ID, U256};

/// Deploy a compiled contract with a legacy contract-creation transaction
#[derive(clap::Parser, Debug, Clone)]
#[command(name = "deploy-contract")]
#[command(bin_name = "deploy-contract")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Bytecode file to deploy. [default: first *.wasm in --artifact-dir]
    pub artifact: Option<PathBuf>,

    /// Directory searched for an artifact when none is given.
    #[clap(long, require_equals = true, default_value = "target")]
    pub artifact_dir: PathBuf,

    /// JSON-RPC endpoint of the node.
    #[clap(long, require_equals = true, default_value = "http://localhost:8545")]
    pub gateway: String,

    /// Print the eth_sendRawTransaction request instead of sending it.
    #[clap(long)]
    pub dump_json: bool,

    /// File holding the hex-encoded private key. Falls back to $DEPLOYER_PRIVATE_KEY.
    #[clap(long, require_equals = true, env = "DEPLOYER_PRIVATE_KEY_FILE")]
    pub private_key_file: Option<PathBuf>,

    /// Gas price in wei, decimal or 0x-prefixed hex.
    #[clap(long, require_equals = true, default_value = "0", value_parser = parse_quantity)]
    pub gas_price: U256,

    /// Gas limit, decimal or 0x-prefixed hex.
    #[clap(long, require_equals = true, default_value = "0xfffffffffffff", value_parser = parse_quantity)]
    pub gas_limit: U256,

    /// Value transferred to the new contract, in wei.
    #[clap(long, require_equals = true, default_value = "0", value_parser = parse_quantity)]
    pub value: U256,

    /// Sign with EIP-155 replay protection for this chain.
    #[clap(long, require_equals = true, value_parser = clap::value_parser!(u64).range(..=MAX_CHAIN_ID))]
    pub chain_id: Option<ChainId>,

    /// Use this nonce instead of querying the node.
    #[clap(long, require_equals = true)]
    pub nonce: Option<u64>,

    /// Milliseconds between two receipt queries.
    #[clap(long, require_equals = true, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    pub poll_interval_ms: u64,
}

impl Cli {
    pub fn gas_config(&self) -> GasConfig {
        GasConfig {
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            value: self.value,
            chain_id: self.chain_id,
        }
    }

    pub fn dispatch(&self) -> Dispatch {
        if self.dump_json {
            Dispatch::DumpRequest
        } else {
            Dispatch::SubmitAndAwait {
                poll_interval: Duration::from_millis(self.poll_interval_ms),
            }
        }
    }
}

fn parse_quantity(s: &str) -> Result<U256, String> {
    s.parse::<U256>()
        .map_err(|err| format!("invalid quantity {s:?}: {err}"))
}
