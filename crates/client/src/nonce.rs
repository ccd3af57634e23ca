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

use alloy::primitives::Address;
use log::info;

use crate::{error::DeployError, transport::Transport};

/// Queries the current transaction count of the sending account, once.
pub async fn resolve_nonce<T: Transport + ?Sized>(
    transport: &T,
    address: Address,
) -> Result<u64, DeployError> {
    let nonce = transport.transaction_count(address).await?;
    info!("Account {address} has nonce {nonce}");

    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::mock::MockTransport;

    #[tokio::test]
    async fn resolves_once() {
        let transport = MockTransport::with_nonce(41);
        let nonce = resolve_nonce(&transport, Address::ZERO).await.unwrap();
        assert_eq!(nonce, 41);
        assert_eq!(transport.count_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_retry() {
        let transport = MockTransport {
            unreachable: true,
            ..Default::default()
        };
        let err = resolve_nonce(&transport, Address::ZERO).await.unwrap_err();
        assert!(matches!(err, DeployError::Network { .. }));
        assert_eq!(transport.total_calls(), 1);
    }
}
