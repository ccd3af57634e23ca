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

use deployer_core::{SignerError, B256};
use thiserror::Error as ThisError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the deployment pipeline. None of them are recovered from.
#[derive(Debug, ThisError)]
pub enum DeployError {
    /// Malformed private key, missing or unreadable artifact, invalid gateway URL.
    /// Always raised before any network I/O.
    #[error("invalid configuration: {0}")]
    Configuration(BoxError),
    /// The node could not be reached or returned a malformed response.
    #[error("{method} failed")]
    Network {
        method: &'static str,
        #[source]
        source: BoxError,
    },
    /// The node answered the call with a JSON-RPC error.
    #[error("node rejected {method} (code {code}): {message}")]
    Rejection {
        method: &'static str,
        code: i64,
        message: String,
    },
    /// The transaction was included, but its execution failed.
    #[error("transaction {0} reverted, receipt: {1}")]
    Reverted(B256, String),
    /// Writing the request or the receipt failed.
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

impl DeployError {
    pub fn configuration(err: impl Into<BoxError>) -> Self {
        DeployError::Configuration(err.into())
    }

    pub fn network(method: &'static str, err: impl Into<BoxError>) -> Self {
        DeployError::Network {
            method,
            source: err.into(),
        }
    }
}

impl From<SignerError> for DeployError {
    fn from(err: SignerError) -> Self {
        DeployError::Configuration(Box::new(err))
    }
}
