// SPDX-License-Identifier: Apache-2.0

#![deny(clippy::all)]

mod contracts;
mod error;

use error::Error;

use structopt::StructOpt;

#[async_trait::async_trait]
trait Command: StructOpt {
    async fn run(self) -> Result<(), Error>;
}

#[derive(StructOpt)]
#[structopt(name = "client", about = "Talks to a contract registry.")]
pub enum Commands {
    Contracts(contracts::Contracts),
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    match Commands::from_args() {
        Commands::Contracts(cmd) => cmd.run().await,
    }
}
