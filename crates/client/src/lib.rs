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

pub mod dispatch;
pub mod error;
pub mod json_rpc;
pub mod nonce;
pub mod pipeline;
pub mod receipt;
pub mod transport;

#[cfg(test)]
mod mock;

pub use dispatch::{dispatch, Dispatch, DEFAULT_POLL_INTERVAL};
pub use error::DeployError;
pub use nonce::resolve_nonce;
pub use pipeline::{deploy, DeployRequest};
pub use receipt::DeploymentReceipt;
pub use transport::{HttpTransport, Transport};
