// SPDX-License-Identifier: Apache-2.0

use reqwest::header::{AsHeaderName, HeaderValue};
use reqwest::{Response, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Codec(#[from] koine::codec::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("server url cannot hold a path")]
    InvalidBaseUrl,

    #[error("contract has no id to replace")]
    MissingId,

    #[error("unexpected response header value")]
    InvalidHeaderValue,

    #[error("server answered {0}")]
    Status(StatusCode),
}

impl Error {
    pub fn check_header(
        response: Response,
        key: impl AsHeaderName,
        val: &'static str,
    ) -> Result<Response, Self> {
        if response.headers().get(key) != Some(&HeaderValue::from_static(val)) {
            return Err(Error::InvalidHeaderValue);
        }

        Ok(response)
    }

    pub fn check_status(response: Response, expected: StatusCode) -> Result<Response, Self> {
        match response.status() {
            status if status == expected => Ok(response),
            status => Err(Error::Status(status)),
        }
    }
}
