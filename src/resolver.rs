use log::{debug, warn};
use rand::{thread_rng, Rng};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::config::{Config, Mode};
use crate::dns_parser::{self, Class, Name, Packet, RRData, ResponseCode, Type};
use crate::transport::{Transport, UdpTransport};
use crate::{Error, ResolutionError, DNS_PORT};

/// What the answer section says about the name that was asked
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Address(Ipv4Addr),
    /// The name is an alias, and the message does not resolve the target
    Alias(String),
    Nothing,
}

/// Resolves names to IPv4 addresses according to its `Config`
///
/// Holds no state between calls besides the configuration; every call
/// owns its own sockets, buffers and hop counters.
#[derive(Debug, Clone)]
pub struct Resolver<T = UdpTransport> {
    config: Config,
    transport: T,
}

impl Resolver<UdpTransport> {
    pub fn new(config: Config) -> Resolver<UdpTransport> {
        Resolver::with_transport(config, UdpTransport)
    }
}

impl<T: Transport> Resolver<T> {
    pub fn with_transport(config: Config, transport: T) -> Resolver<T> {
        Resolver { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Looks up the first A record of `name`
    pub fn resolve(&self, name: &str) -> Result<Ipv4Addr, Error> {
        match self.config.mode {
            Mode::Recursive { server } => self.resolve_recursive(name, server),
            Mode::Iterative { ref roots } => {
                let root = *roots.first().ok_or(ResolutionError::NoRootServers)?;
                self.resolve_iterative(name, root)
            }
        }
    }

    fn resolve_recursive(&self, name: &str, server: SocketAddr) -> Result<Ipv4Addr, Error> {
        let mut target = name.to_owned();
        for _ in 0..=self.config.max_hops {
            let (id, buf) = self.exchange(server, &target, true)?;
            let packet = parse_response(id, &buf)?;
            check_response_code(&packet, &target)?;

            match follow_answers(&packet, &target) {
                Answer::Address(ip) => return Ok(ip),
                Answer::Alias(alias) => {
                    debug!("{} is an alias for {}", target, alias);
                    target = alias;
                }
                Answer::Nothing => {
                    return Err(Error::NoAnswer {
                        name: target,
                        rcode: packet.header.response_code,
                    })
                }
            }
        }
        Err(ResolutionError::TooManyAliases {
            hops: self.config.max_hops,
        }
        .into())
    }

    fn resolve_iterative(&self, name: &str, root: SocketAddr) -> Result<Ipv4Addr, Error> {
        let mut target = name.to_owned();
        let mut server = root;
        for _ in 0..self.config.max_hops {
            let (id, buf) = self.exchange(server, &target, false)?;
            let packet = parse_response(id, &buf)?;
            check_response_code(&packet, &target)?;

            match follow_answers(&packet, &target) {
                Answer::Address(ip) => return Ok(ip),
                Answer::Alias(alias) => {
                    debug!("{} is an alias for {}, restarting at {}", target, alias, root);
                    target = alias;
                    server = root;
                }
                Answer::Nothing => {
                    let (nameserver, ip) = find_referral(&packet, &target)?;
                    debug!("referred to {} ({}) for {}", nameserver, ip, target);
                    server = SocketAddr::new(IpAddr::V4(ip), DNS_PORT);
                }
            }
        }
        Err(ResolutionError::HopLimitExceeded {
            hops: self.config.max_hops,
        }
        .into())
    }

    /// Sends an A query for `name` and returns the query id with the raw response
    fn exchange(
        &self,
        server: SocketAddr,
        name: &str,
        recursion: bool,
    ) -> Result<(u16, Vec<u8>), Error> {
        let id = thread_rng().gen::<u16>();
        let query = dns_parser::encode_query(name, Type::A, Class::IN, id, recursion)?;
        debug!("querying {} for {}", server, name);
        let response = self.transport.query(server, &query, self.config.timeout)?;
        Ok((id, response))
    }
}

fn parse_response(id: u16, buf: &[u8]) -> Result<Packet<'_>, Error> {
    let packet = Packet::parse(buf)?;
    if packet.header.query {
        return Err(Error::NotAResponse);
    }
    if packet.header.id != id {
        return Err(Error::UnexpectedId {
            expected: id,
            actual: packet.header.id,
        });
    }
    if packet.header.truncated {
        warn!("response {:#06x} is truncated, using what arrived", id);
    }
    Ok(packet)
}

fn check_response_code(packet: &Packet, name: &str) -> Result<(), Error> {
    match packet.header.response_code {
        ResponseCode::NoError => Ok(()),
        rcode => Err(Error::NoAnswer {
            name: name.to_owned(),
            rcode,
        }),
    }
}

/// Follows CNAME records in the answer section, starting from `name`
///
/// The first A record owned by `name` or by any alias reached from it wins.
fn follow_answers(packet: &Packet, name: &str) -> Answer {
    let start = Name::FromStr(name.into());
    let mut current = start.clone();
    // Each step consumes one CNAME, so a looping chain stops here.
    for _ in 0..=packet.answers.len() {
        let address = packet.answers.iter().find_map(|record| match record.data {
            RRData::A(ip) if record.name == current => Some(ip),
            _ => None,
        });
        if let Some(ip) = address {
            return Answer::Address(ip);
        }
        let alias = packet.answers.iter().find_map(|record| match record.data {
            RRData::CNAME(ref target) if record.name == current => Some(target.clone()),
            _ => None,
        });
        match alias {
            Some(target) => current = target,
            None => break,
        }
    }
    if current == start {
        Answer::Nothing
    } else {
        Answer::Alias(current.to_string())
    }
}

/// Picks the first name server in the authority section that has glue
fn find_referral(packet: &Packet, name: &str) -> Result<(String, Ipv4Addr), ResolutionError> {
    let mut first_nameserver = None;
    for record in &packet.nameservers {
        let nameserver = match record.data {
            RRData::NS(ref nameserver) => nameserver,
            _ => continue,
        };
        first_nameserver.get_or_insert(nameserver);
        let glue = packet.additional.iter().find_map(|glue| match glue.data {
            RRData::A(ip) if glue.name == *nameserver => Some(ip),
            _ => None,
        });
        if let Some(ip) = glue {
            return Ok((nameserver.to_string(), ip));
        }
    }
    match first_nameserver {
        Some(nameserver) => Err(ResolutionError::MissingGlue {
            nameserver: nameserver.to_string(),
        }),
        None => Err(ResolutionError::NoReferral {
            name: name.to_owned(),
        }),
    }
}
