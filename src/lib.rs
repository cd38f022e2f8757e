//! Resolve domain names with DNS messages built and parsed by hand.
//!
//! Queries go over UDP either to a single recursive resolver or, starting
//! at a root server, down the chain of referrals to the authoritative
//! server for the name.
//!
//! ```no_run
//! use rawdns::Config;
//!
//! let ip = rawdns::resolve("example.com", &Config::iterative()).unwrap();
//! println!("example.com is at {}", ip);
//! ```

pub mod dns_parser;

mod config;
mod error;
mod resolver;
mod transport;

pub use crate::config::{Config, Mode, DEFAULT_MAX_HOPS, DEFAULT_TIMEOUT, ROOT_SERVERS};
pub use crate::error::{Error, ResolutionError};
pub use crate::resolver::Resolver;
pub use crate::transport::{Transport, UdpTransport, MAX_DATAGRAM_SIZE};

use std::net::Ipv4Addr;

pub const DNS_PORT: u16 = 53;

/// Resolves `name` to the first IPv4 address found, over UDP
pub fn resolve(name: &str, config: &Config) -> Result<Ipv4Addr, Error> {
    Resolver::new(config.clone()).resolve(name)
}
