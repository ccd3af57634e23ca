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

use std::io::Write;

use alloy::primitives::B256;
use deployer_core::{Bytes, CreateEnvelope, GasConfig, TxSigner};
use log::info;

use crate::{
    dispatch::{dispatch, Dispatch},
    error::DeployError,
    nonce::resolve_nonce,
    transport::Transport,
};

/// Everything needed to deploy one contract.
#[derive(Clone, Debug)]
pub struct DeployRequest {
    pub bytecode: Bytes,
    pub gas: GasConfig,
    /// Nonce to use instead of querying the node.
    pub nonce: Option<u64>,
    pub dispatch: Dispatch,
}

/// Resolves the nonce, builds and signs the creation transaction, and dispatches it.
///
/// Returns the hash of the signed transaction.
pub async fn deploy<T, W>(
    request: &DeployRequest,
    signer: &TxSigner,
    transport: &T,
    out: &mut W,
) -> Result<B256, DeployError>
where
    T: Transport + ?Sized,
    W: Write,
{
    let nonce = match request.nonce {
        Some(nonce) => nonce,
        None => resolve_nonce(transport, signer.address()).await?,
    };

    let envelope = CreateEnvelope::new(request.bytecode.clone(), nonce, &request.gas);
    let signed = signer.sign(envelope)?;
    let hash = signed.hash();
    info!(
        "Signed creation transaction {hash} from {} with nonce {nonce}, {} bytes of code",
        signer.address(),
        request.bytecode.len()
    );

    dispatch(&request.dispatch, transport, &signed, out).await?;

    Ok(hash)
}
