use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;

use rawdns::dns_parser::{self, Class, Packet, Type};
use rawdns::{Config, Mode, Resolver, Transport, UdpTransport};

#[derive(Parser)]
#[command(name = "resolve")]
#[command(about = "Resolve names to IPv4 addresses with hand-built DNS queries")]
struct Cli {
    /// Names to resolve
    #[arg(required = true)]
    names: Vec<String>,

    /// Ask this recursive resolver instead of walking down from the root
    #[arg(short, long, value_name = "ADDR")]
    server: Option<SocketAddr>,

    /// Per-query timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Referral and alias hop budget
    #[arg(long, default_value_t = rawdns::DEFAULT_MAX_HOPS)]
    max_hops: usize,

    /// Also print the decoded response of a single query to the first server
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> ExitCode {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters("rawdns=info");
    builder.parse_default_env();
    builder.init();

    let cli = Cli::parse();
    let config = match cli.server {
        Some(server) => Config::recursive(server),
        None => Config::iterative(),
    }
    .with_timeout(Duration::from_millis(cli.timeout_ms))
    .with_max_hops(cli.max_hops);

    let resolver = Resolver::new(config);
    let mut failed = false;
    for name in &cli.names {
        if cli.verbose {
            dump(&resolver, name);
        }
        match resolver.resolve(name) {
            Ok(ip) => println!("{} IP is {}", name, ip),
            Err(err) => {
                eprintln!("can't resolve {}: {}", name, err);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints the decoded response of one query to the first configured server
fn dump(resolver: &Resolver, name: &str) {
    let (server, recursion) = match resolver.config().mode {
        Mode::Recursive { server } => (server, true),
        Mode::Iterative { ref roots } => match roots.first() {
            Some(&root) => (root, false),
            None => return,
        },
    };
    let query = match dns_parser::encode_query(name, Type::A, Class::IN, 0x5a5a, recursion) {
        Ok(query) => query,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    let response = match UdpTransport.query(server, &query, resolver.config().timeout) {
        Ok(response) => response,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    match Packet::parse(&response) {
        Ok(packet) => println!("response from {}:\n{}", server, packet),
        Err(err) => eprintln!("{}", err),
    }
}
