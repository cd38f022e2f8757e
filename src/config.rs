use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::DNS_PORT;

/// IPv4 addresses of the root servers a.root-servers.net through m.root-servers.net
///
/// See <https://www.iana.org/domains/root/servers>
pub const ROOT_SERVERS: [Ipv4Addr; 13] = [
    Ipv4Addr::new(198, 41, 0, 4),
    Ipv4Addr::new(170, 247, 170, 2),
    Ipv4Addr::new(192, 33, 4, 12),
    Ipv4Addr::new(199, 7, 91, 13),
    Ipv4Addr::new(192, 203, 230, 10),
    Ipv4Addr::new(192, 5, 5, 241),
    Ipv4Addr::new(192, 112, 36, 4),
    Ipv4Addr::new(198, 97, 190, 53),
    Ipv4Addr::new(192, 36, 148, 17),
    Ipv4Addr::new(192, 58, 128, 30),
    Ipv4Addr::new(193, 0, 14, 129),
    Ipv4Addr::new(199, 7, 83, 42),
    Ipv4Addr::new(202, 12, 27, 33),
];

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_HOPS: usize = 16;

/// Where queries go first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Ask one recursive resolver with the recursion-desired bit set
    Recursive { server: SocketAddr },
    /// Walk down from the first root server, following referrals
    Iterative { roots: Vec<SocketAddr> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// How long to wait for each response datagram
    pub timeout: Duration,
    /// Queries per resolution in iterative mode, alias re-queries in
    /// recursive mode
    pub max_hops: usize,
}

impl Config {
    pub fn recursive(server: SocketAddr) -> Config {
        Config {
            mode: Mode::Recursive { server },
            ..Config::iterative()
        }
    }

    pub fn iterative() -> Config {
        let roots = ROOT_SERVERS
            .iter()
            .map(|&ip| SocketAddr::new(IpAddr::V4(ip), DNS_PORT))
            .collect();
        Config {
            mode: Mode::Iterative { roots },
            timeout: DEFAULT_TIMEOUT,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    pub fn with_roots(mut self, roots: Vec<SocketAddr>) -> Config {
        self.mode = Mode::Iterative { roots };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Config {
        self.timeout = timeout;
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Config {
        self.max_hops = max_hops;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::iterative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_walk_from_a_root() {
        let config = Config::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_hops, 16);
        match config.mode {
            Mode::Iterative { ref roots } => {
                assert_eq!(roots.len(), 13);
                assert_eq!(roots[0], "198.41.0.4:53".parse().unwrap());
            }
            ref other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn recursive_keeps_other_settings() {
        let server: SocketAddr = "9.9.9.9:53".parse().unwrap();
        let config = Config::recursive(server)
            .with_timeout(Duration::from_millis(250))
            .with_max_hops(3);
        assert_eq!(config.mode, Mode::Recursive { server });
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.max_hops, 3);
    }
}
