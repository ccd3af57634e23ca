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

use deployer_core::Bytes;
use log::{debug, info};
use thiserror::Error as ThisError;

pub const ARTIFACT_EXTENSION: &str = "wasm";

#[derive(Debug, ThisError)]
pub enum ArtifactError {
    #[error("no *.wasm artifact found in {0}")]
    NotFound(PathBuf),
    #[error("cannot list artifact directory {path}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read artifact {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns `explicit` if set, otherwise the first `*.wasm` file in `dir` by name.
pub fn locate(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf, ArtifactError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let list_err = |source| ArtifactError::ListDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION) {
            candidates.push(path);
        }
    }
    candidates.sort();
    debug!("Artifact candidates in {}: {candidates:?}", dir.display());

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ArtifactError::NotFound(dir.to_path_buf()))
}

/// Reads the bytecode at `path` verbatim.
pub fn load(path: &Path) -> Result<Bytes, ArtifactError> {
    let code = fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} bytes of code from {}", code.len(), path.display());

    Ok(code.into())
}
