use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::dns_parser::{self, EncodeError, ResponseCode};

/// Why a resolution failed
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not encode query: {0}")]
    Encode(#[from] EncodeError),
    #[error("malformed response: {0}")]
    Decode(#[from] dns_parser::Error),
    #[error("no response from {server} within {timeout:?}")]
    Timeout { server: SocketAddr, timeout: Duration },
    #[error("failed to exchange datagrams with {server}: {source}")]
    Transport {
        server: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("no answer for {name}: {rcode}")]
    NoAnswer { name: String, rcode: ResponseCode },
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("response id {actual:#06x} does not match query id {expected:#06x}")]
    UnexpectedId { expected: u16, actual: u16 },
    #[error("server answered with a query instead of a response")]
    NotAResponse,
}

/// Well-formed responses that did not lead to an address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("no root servers configured")]
    NoRootServers,
    #[error("response for {name} holds neither an answer nor a referral")]
    NoReferral { name: String },
    #[error("no glue address for name server {nameserver}")]
    MissingGlue { nameserver: String },
    #[error("no answer after {hops} queries")]
    HopLimitExceeded { hops: usize },
    #[error("alias chain longer than {hops} hops")]
    TooManyAliases { hops: usize },
}
