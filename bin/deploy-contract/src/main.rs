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

use std::{env, io::Write, process::ExitCode};

use clap::Parser;
use deployer_client::{deploy, DeployError, DeployRequest, HttpTransport};
use log::info;

use crate::cli::Cli;

mod artifact;
mod cli;
mod secret;

async fn run(cli: Cli) -> anyhow::Result<()> {
    let signer = secret::load_signer(
        cli.private_key_file.as_deref(),
        env::var(secret::PRIVATE_KEY_ENV).ok(),
    )
    .map_err(DeployError::configuration)?;
    let path = artifact::locate(cli.artifact.as_deref(), &cli.artifact_dir)
        .map_err(DeployError::configuration)?;
    let bytecode = artifact::load(&path).map_err(DeployError::configuration)?;
    let transport = HttpTransport::new(&cli.gateway)?;

    let request = DeployRequest {
        bytecode,
        gas: cli.gas_config(),
        nonce: cli.nonce,
        dispatch: cli.dispatch(),
    };
    info!("Deploying {} from {} via {}", path.display(), signer.address(), cli.gateway);

    let mut stdout = std::io::stdout().lock();
    deploy(&request, &signer, &transport, &mut stdout).await?;
    stdout.flush()?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: Could not deploy contract");
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
