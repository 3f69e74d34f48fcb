// SPDX-License-Identifier: Apache-2.0

use super::{Command, Error};

use koine::{codec, Contract};

use std::path::PathBuf;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use structopt::StructOpt;

const CBOR: &str = "application/cbor";

fn endpoint(base: &reqwest::Url, id: Option<&str>) -> Result<reqwest::Url, Error> {
    let mut url = base.join("contracts")?;
    if let Some(id) = id {
        // Pushed as one segment, so the id is escaped rather than resolved.
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl)?
            .push(id);
    }

    Ok(url)
}

/// How `add` stores a contract.
#[derive(Debug, PartialEq)]
enum Submission {
    Create,
    Replace(String),
}

impl Submission {
    fn choose(replace: bool, contract: &Contract) -> Result<Self, Error> {
        match (replace, contract.id()) {
            (false, _) => Ok(Submission::Create),
            (true, Some(id)) if !id.is_empty() => Ok(Submission::Replace(id.to_string())),
            (true, _) => Err(Error::MissingId),
        }
    }
}

async fn body(response: reqwest::Response) -> Result<Vec<u8>, Error> {
    let response = Error::check_header(response, CONTENT_TYPE, CBOR)?;
    Ok(response.bytes().await?.to_vec())
}

fn summary(contract: &Contract) -> String {
    let mut line = format!(
        "{} {} v{} ({})",
        contract.id().unwrap_or("-"),
        contract.name().unwrap_or("<unnamed>"),
        contract
            .version()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".into()),
        contract
            .contract_type()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "untyped".into()),
    );

    let plugins: Vec<String> = contract
        .plugin_contracts()
        .iter()
        .map(|p| format!("{}:{}", p.plugin_id.as_deref().unwrap_or("-"), p.direction.as_str()))
        .collect();
    if !plugins.is_empty() {
        line.push_str(&format!(" [{}]", plugins.join(", ")));
    }

    line
}

#[derive(StructOpt)]
pub struct List {
    /// The server base URL
    #[structopt(short, long, env = "CONTRACTMGR_URL")]
    url: reqwest::Url,
}

#[async_trait::async_trait]
impl Command for List {
    async fn run(self) -> Result<(), Error> {
        let url = endpoint(&self.url, None)?;
        debug!("GET {}", url);

        let response = reqwest::get(url).await?;
        let response = response.error_for_status()?;
        let contracts = codec::from_cbor_list(&body(response).await?)?;
        for contract in contracts {
            println!("{}", summary(&contract));
        }

        Ok(())
    }
}

#[derive(StructOpt)]
pub struct Show {
    /// The server base URL
    #[structopt(short, long, env = "CONTRACTMGR_URL")]
    url: reqwest::Url,

    /// The contract id
    id: String,
}

#[async_trait::async_trait]
impl Command for Show {
    async fn run(self) -> Result<(), Error> {
        let url = endpoint(&self.url, Some(&self.id))?;
        debug!("GET {}", url);

        let response = reqwest::get(url).await?;
        let response = response.error_for_status()?;
        let contract = codec::from_cbor(&body(response).await?)?;
        println!("{}", codec::to_json(&contract)?);
        Ok(())
    }
}

#[derive(StructOpt)]
pub struct Add {
    /// The server base URL
    #[structopt(short, long, env = "CONTRACTMGR_URL")]
    url: reqwest::Url,

    /// Store under the id found in the file, replacing any existing contract
    #[structopt(long)]
    replace: bool,

    /// JSON file holding the contract
    #[structopt(parse(from_os_str))]
    file: PathBuf,
}

#[async_trait::async_trait]
impl Command for Add {
    async fn run(self) -> Result<(), Error> {
        let text = tokio::fs::read_to_string(&self.file).await?;
        let contract = codec::from_json(&text)?;
        let encoded = codec::to_cbor(&contract)?;

        let client = reqwest::Client::new();
        let (request, expected) = match Submission::choose(self.replace, &contract)? {
            Submission::Replace(id) => {
                let url = endpoint(&self.url, Some(&id))?;
                debug!("PUT {}", url);
                (client.put(url), StatusCode::OK)
            }

            Submission::Create => {
                let url = endpoint(&self.url, None)?;
                debug!("POST {}", url);
                (client.post(url), StatusCode::CREATED)
            }
        };

        let response = request
            .header(CONTENT_TYPE, CBOR)
            .body(encoded)
            .send()
            .await?;
        let response = Error::check_status(response, expected)?;
        let stored = codec::from_cbor(&body(response).await?)?;
        println!("{}", summary(&stored));
        Ok(())
    }
}

#[derive(StructOpt)]
pub struct Remove {
    /// The server base URL
    #[structopt(short, long, env = "CONTRACTMGR_URL")]
    url: reqwest::Url,

    /// The contract id
    id: String,
}

#[async_trait::async_trait]
impl Command for Remove {
    async fn run(self) -> Result<(), Error> {
        let url = endpoint(&self.url, Some(&self.id))?;
        debug!("DELETE {}", url);

        let response = reqwest::Client::new().delete(url).send().await?;
        Error::check_status(response, StatusCode::NO_CONTENT)?;
        Ok(())
    }
}

#[derive(StructOpt)]
pub enum Contracts {
    List(List),
    Show(Show),
    Add(Add),
    Remove(Remove),
}

#[async_trait::async_trait]
impl Command for Contracts {
    async fn run(self) -> Result<(), Error> {
        match self {
            Self::List(cmd) => cmd.run().await,
            Self::Show(cmd) => cmd.run().await,
            Self::Add(cmd) => cmd.run().await,
            Self::Remove(cmd) => cmd.run().await,
        }
    }
}
