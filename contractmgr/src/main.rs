// SPDX-License-Identifier: Apache-2.0

#![deny(clippy::all)]

mod listener;
mod registry;

use listener::Listener;
use registry::Registry;

use koine::{codec, Contract};

use std::convert::Infallible;
use std::path::PathBuf;

use log::{debug, info, warn};
use percent_encoding::percent_decode_str;
use structopt::StructOpt;
use tokio::net::{TcpListener, UnixListener};
use tokio_stream::wrappers::{TcpListenerStream, UnixListenerStream};
use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::{Response, StatusCode};
use warp::Filter;

const CBOR: &str = "application/cbor";

/// Largest request body accepted, in bytes.
const BODY_LIMIT: u64 = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot load seed file: {0}")]
    Seed(#[from] codec::Error),
}

#[derive(Debug, StructOpt)]
#[structopt(name = "contractmgr", about = "Stores and serves plugin contracts.")]
struct Options {
    /// The listening socket address or fd
    listen: Listener,

    /// JSON file with contracts to load at startup
    #[structopt(long, parse(from_os_str))]
    seed: Option<PathBuf>,
}

fn empty(code: StatusCode) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    *response.status_mut() = code;
    response
}

fn cbor(code: StatusCode, encoded: Result<Vec<u8>, codec::Error>) -> Response<Vec<u8>> {
    match encoded {
        Ok(body) => {
            let mut response = Response::new(body);
            *response.status_mut() = code;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(CBOR));
            response
        }

        Err(e) => {
            warn!("failed to encode response: {}", e);
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn decode(content_type: Option<String>, body: &[u8]) -> Result<Contract, StatusCode> {
    if content_type.as_deref() != Some(CBOR) {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    codec::from_cbor(body).map_err(|e| {
        debug!("rejecting request body: {}", e);
        StatusCode::BAD_REQUEST
    })
}

/// Turns a raw `{id}` path segment back into the contract id.
fn decode_id(segment: &str) -> Result<String, StatusCode> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|id| id.into_owned())
        .map_err(|e| {
            debug!("rejecting contract id {:?}: {}", segment, e);
            StatusCode::BAD_REQUEST
        })
}

async fn list(registry: Registry) -> Result<Response<Vec<u8>>, Infallible> {
    let contracts = registry.list().await;
    Ok(cbor(StatusCode::OK, codec::to_cbor_list(&contracts)))
}

async fn show(segment: String, registry: Registry) -> Result<Response<Vec<u8>>, Infallible> {
    let id = match decode_id(&segment) {
        Ok(id) => id,
        Err(code) => return Ok(empty(code)),
    };

    Ok(match registry.get(&id).await {
        None => empty(StatusCode::NOT_FOUND),
        Some(contract) => cbor(StatusCode::OK, codec::to_cbor(&contract)),
    })
}

async fn create(
    content_type: Option<String>,
    body: warp::hyper::body::Bytes,
    registry: Registry,
) -> Result<Response<Vec<u8>>, Infallible> {
    let contract = match decode(content_type, &body) {
        Ok(contract) => contract,
        Err(code) => return Ok(empty(code)),
    };

    Ok(match registry.create(contract).await {
        Ok(stored) => {
            info!("created contract {}", stored.id().unwrap_or_default());
            cbor(StatusCode::CREATED, codec::to_cbor(&stored))
        }

        Err(conflict) => {
            debug!("{}", conflict);
            empty(StatusCode::CONFLICT)
        }
    })
}

async fn replace(
    segment: String,
    content_type: Option<String>,
    body: warp::hyper::body::Bytes,
    registry: Registry,
) -> Result<Response<Vec<u8>>, Infallible> {
    let id = match decode_id(&segment) {
        Ok(id) => id,
        Err(code) => return Ok(empty(code)),
    };

    let contract = match decode(content_type, &body) {
        Ok(contract) => contract,
        Err(code) => return Ok(empty(code)),
    };

    let (stored, replaced) = registry.replace(id, contract).await;
    info!(
        "{} contract {}",
        if replaced { "replaced" } else { "created" },
        stored.id().unwrap_or_default()
    );

    Ok(cbor(StatusCode::OK, codec::to_cbor(&stored)))
}

async fn remove(segment: String, registry: Registry) -> Result<Response<Vec<u8>>, Infallible> {
    let id = match decode_id(&segment) {
        Ok(id) => id,
        Err(code) => return Ok(empty(code)),
    };

    Ok(match registry.remove(&id).await {
        None => empty(StatusCode::NOT_FOUND),
        Some(_) => {
            info!("removed contract {}", id);
            empty(StatusCode::NO_CONTENT)
        }
    })
}

async fn serve<I>(incoming: I, registry: Registry) -> Result<(), Error>
where
    I: futures_core::stream::TryStream + Send,
    I::Ok: tokio::io::AsyncRead + tokio::io::AsyncWrite + Send + 'static + Unpin,
    I::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let registry = warp::any().map(move || registry.clone());
    let body = warp::header::optional::<String>("content-type")
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::bytes());

    // Client is requesting details of all contracts.
    let get_contracts = warp::path!("contracts")
        .and(warp::filters::method::get())
        .and(registry.clone())
        .and_then(list);

    // Client is requesting details of a single contract.
    let get_contracts_id = warp::path!("contracts" / String)
        .and(warp::filters::method::get())
        .and(registry.clone())
        .and_then(show);

    // Client is submitting a new contract.
    let post_contracts = warp::path!("contracts")
        .and(warp::filters::method::post())
        .and(body.clone())
        .and(registry.clone())
        .and_then(create);

    // Client is storing a contract under a known id.
    let put_contracts_id = warp::path!("contracts" / String)
        .and(warp::filters::method::put())
        .and(body)
        .and(registry.clone())
        .and_then(replace);

    let delete_contracts_id = warp::path!("contracts" / String)
        .and(warp::filters::method::delete())
        .and(registry)
        .and_then(remove);

    let routes = get_contracts
        .or(get_contracts_id)
        .or(post_contracts)
        .or(put_contracts_id)
        .or(delete_contracts_id)
        .with(warp::log("contractmgr"));

    warp::serve(routes).run_incoming(incoming).await;
    Ok(())
}

fn load(seed: Option<PathBuf>) -> Result<Registry, Error> {
    let contracts = match seed {
        None => Vec::new(),
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            let contracts = codec::from_json_list(&text)?;
            info!("loaded {} contracts from {}", contracts.len(), path.display());
            contracts
        }
    };

    Ok(Registry::with_contracts(contracts))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let options = Options::from_args();
    let registry = load(options.seed)?;
    info!(
        "serving {} contracts on {}",
        registry.count().await,
        options.listen.describe()
    );

    match options.listen {
        Listener::Unix(socket) => {
            socket.set_nonblocking(true)?;
            let listen = UnixListener::from_std(socket)?;
            let stream = UnixListenerStream::new(listen);
            serve(stream, registry).await
        }

        Listener::Tcp(socket) => {
            socket.set_nonblocking(true)?;
            let listen = TcpListener::from_std(socket)?;
            let stream = TcpListenerStream::new(listen);
            serve(stream, registry).await
        }
    }
}
