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

use alloy::{
    primitives::{Address, B256},
    providers::{Provider as AlloyProvider, ProviderBuilder, RootProvider},
    rpc::client::RpcClient,
    transports::{
        http::{Client, Http},
        RpcError, TransportError,
    },
};
use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::{
    error::DeployError,
    json_rpc::{GET_TRANSACTION_COUNT, GET_TRANSACTION_RECEIPT, SEND_RAW_TRANSACTION},
    receipt::DeploymentReceipt,
};

/// The node calls the deployment needs.
///
/// A single handle is constructed per invocation and passed explicitly to every stage
/// that talks to the node.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the number of transactions sent from `address`, at the latest block.
    async fn transaction_count(&self, address: Address) -> Result<u64, DeployError>;

    /// Submits a `0x`-prefixed signed transaction and returns the hash reported by the
    /// node.
    async fn send_raw_transaction(&self, signed_hex: &str) -> Result<B256, DeployError>;

    /// Returns the receipt of the transaction, or `None` while it is still pending.
    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<DeploymentReceipt>, DeployError>;
}

/// JSON-RPC over HTTP.
///
/// Each call is attempted exactly once; there is no retry layer.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http_client: RootProvider<Http<Client>>,
}

impl HttpTransport {
    pub fn new(gateway: &str) -> Result<Self, DeployError> {
        let url: Url = gateway.parse().map_err(|err| {
            DeployError::configuration(format!("invalid gateway URL {gateway:?}: {err}"))
        })?;

        let client = RpcClient::builder().http(url);
        let http_client = ProviderBuilder::new().on_client(client);

        Ok(HttpTransport { http_client })
    }
}

/// Splits transport failures into node rejections and everything else.
fn map_error(method: &'static str, err: TransportError) -> DeployError {
    match err {
        RpcError::ErrorResp(payload) => DeployError::Rejection {
            method,
            code: payload.code,
            message: payload.message.to_string(),
        },
        err => DeployError::network(method, err),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn transaction_count(&self, address: Address) -> Result<u64, DeployError> {
        debug!("Querying RPC for transaction count: {address}");

        self.http_client
            .get_transaction_count(address)
            .await
            .map_err(|err| map_error(GET_TRANSACTION_COUNT, err))
    }

    async fn send_raw_transaction(&self, signed_hex: &str) -> Result<B256, DeployError> {
        debug!("Sending raw transaction: {} bytes", signed_hex.len().saturating_sub(2) / 2);

        self.http_client
            .client()
            .request(SEND_RAW_TRANSACTION, (signed_hex.to_string(),))
            .await
            .map_err(|err| map_error(SEND_RAW_TRANSACTION, err))
    }

    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<DeploymentReceipt>, DeployError> {
        debug!("Querying RPC for transaction receipt: {hash}");

        self.http_client
            .client()
            .request(GET_TRANSACTION_RECEIPT, (hash,))
            .await
            .map_err(|err| map_error(GET_TRANSACTION_RECEIPT, err))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        task::JoinHandle,
    };

    use super::*;

    /// Reads one HTTP request and returns its JSON body.
    async fn read_request(stream: &mut TcpStream) -> Value {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request was complete");
            buf.extend_from_slice(&chunk[..n]);

            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map_or(0, |value| value.trim().parse::<usize>().unwrap());
            let body = end + 4;
            if buf.len() >= body + length {
                return serde_json::from_slice(&buf[body..body + length]).unwrap();
            }
        }
    }

    /// Answers a single JSON-RPC call with `reply` merged into the response object.
    async fn fake_node(reply: Value) -> (String, JoinHandle<Value>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let mut response = json!({ "jsonrpc": "2.0", "id": request["id"] });
            for (key, value) in reply.as_object().unwrap() {
                response[key] = value.clone();
            }
            let body = response.to_string();
            let http = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(http.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            request
        });

        (url, handle)
    }

    #[test]
    fn invalid_gateway() {
        let err = HttpTransport::new("localhost 8545").unwrap_err();
        assert!(matches!(err, DeployError::Configuration(_)));
    }

    #[tokio::test]
    async fn unreachable_node() {
        // nothing listens on the discard port
        let transport = HttpTransport::new("http://127.0.0.1:9").unwrap();
        let err = transport
            .transaction_count(Address::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DeployError::Network {
                method: GET_TRANSACTION_COUNT,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn error_response_is_rejection() {
        let (url, node) = fake_node(json!({
            "error": { "code": -32000, "message": "nonce too low" }
        }))
        .await;
        let transport = HttpTransport::new(&url).unwrap();

        let err = transport
            .send_raw_transaction("0xabcd")
            .await
            .unwrap_err();
        match err {
            DeployError::Rejection {
                method,
                code,
                message,
            } => {
                assert_eq!(method, SEND_RAW_TRANSACTION);
                assert_eq!(code, -32000);
                assert_eq!(message, "nonce too low");
            }
            err => panic!("unexpected error: {err:?}"),
        }

        let request = node.await.unwrap();
        assert_eq!(request["method"], SEND_RAW_TRANSACTION);
        assert_eq!(request["params"], json!(["0xabcd"]));
    }

    #[tokio::test]
    async fn malformed_result_is_network_error() {
        let (url, node) = fake_node(json!({ "result": "nope" })).await;
        let transport = HttpTransport::new(&url).unwrap();

        let err = transport
            .send_raw_transaction("0xabcd")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DeployError::Network {
                method: SEND_RAW_TRANSACTION,
                ..
            }
        ));
        node.await.unwrap();
    }

    #[tokio::test]
    async fn pending_receipt() {
        let (url, node) = fake_node(json!({ "result": null })).await;
        let transport = HttpTransport::new(&url).unwrap();

        let receipt = transport.transaction_receipt(B256::ZERO).await.unwrap();
        assert_eq!(receipt, None);

        let request = node.await.unwrap();
        assert_eq!(request["method"], GET_TRANSACTION_RECEIPT);
    }
}
