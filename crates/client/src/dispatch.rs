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

use std::{
    io::{self, Write},
    time::Duration,
};

use alloy::primitives::B256;
use deployer_core::SignedEnvelope;
use log::{debug, info, warn};

use crate::{
    error::DeployError, json_rpc::JsonRpcRequest, receipt::DeploymentReceipt,
    transport::Transport,
};

/// Default period between two receipt queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// What to do with a signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Print the `eth_sendRawTransaction` request instead of sending it.
    DumpRequest,
    /// Send the transaction and wait for its receipt.
    SubmitAndAwait { poll_interval: Duration },
}

impl Dispatch {
    pub fn submit() -> Self {
        Dispatch::SubmitAndAwait {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Emits the signed transaction according to `mode`.
///
/// `out` receives either the request JSON or the receipt JSON, never both.
pub async fn dispatch<T, W>(
    mode: &Dispatch,
    transport: &T,
    signed: &SignedEnvelope,
    out: &mut W,
) -> Result<(), DeployError>
where
    T: Transport + ?Sized,
    W: Write,
{
    match *mode {
        Dispatch::DumpRequest => dump_request(signed, out),
        Dispatch::SubmitAndAwait { poll_interval } => {
            let receipt = submit_and_await(transport, signed, poll_interval).await?;
            serde_json::to_writer_pretty(&mut *out, &receipt).map_err(io::Error::from)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn dump_request<W: Write>(signed: &SignedEnvelope, out: &mut W) -> Result<(), DeployError> {
    let request = JsonRpcRequest::send_raw_transaction(signed.to_hex());
    serde_json::to_writer(&mut *out, &request).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

async fn submit_and_await<T: Transport + ?Sized>(
    transport: &T,
    signed: &SignedEnvelope,
    poll_interval: Duration,
) -> Result<DeploymentReceipt, DeployError> {
    let expected = signed.hash();
    info!("Sending transaction {expected}");
    let hash = transport.send_raw_transaction(&signed.to_hex()).await?;
    if hash != expected {
        warn!("Node reported transaction hash {hash}, expected {expected}");
    }

    let receipt = wait_for_receipt(transport, hash, poll_interval).await?;
    if !receipt.succeeded() {
        let receipt = serde_json::to_string(&receipt).map_err(io::Error::from)?;
        return Err(DeployError::Reverted(hash, receipt));
    }
    match receipt.contract_address {
        Some(address) => info!("Contract deployed at {address}"),
        None => warn!("Receipt of {hash} carries no contract address"),
    }

    Ok(receipt)
}

async fn wait_for_receipt<T: Transport + ?Sized>(
    transport: &T,
    hash: B256,
    poll_interval: Duration,
) -> Result<DeploymentReceipt, DeployError> {
    loop {
        if let Some(receipt) = transport.transaction_receipt(hash).await? {
            return Ok(receipt);
        }
        debug!("Transaction {hash} pending, retrying in {poll_interval:?}");
        tokio::time::sleep(poll_interval).await;
    }
}
