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
    fs, io,
    path::{Path, PathBuf},
};

use deployer_core::{SignerError, TxSigner};
use thiserror::Error as ThisError;

/// Environment variable holding the hex-encoded key when no key file is given.
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";

#[derive(Debug, ThisError)]
pub enum SecretError {
    #[error("no private key: pass --private-key-file or set DEPLOYER_PRIVATE_KEY")]
    Missing,
    #[error("cannot read private key file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Key(#[from] SignerError),
}

/// Builds the signer from the key file, or from the value of [PRIVATE_KEY_ENV].
pub fn load_signer(file: Option<&Path>, env_value: Option<String>) -> Result<TxSigner, SecretError> {
    let secret = match file {
        Some(path) => fs::read_to_string(path).map_err(|source| SecretError::Read {
            path: path.to_path_buf(),
            source,
        })?,
        None => env_value.ok_or(SecretError::Missing)?,
    };

    Ok(TxSigner::from_hex(&secret)?)
}
