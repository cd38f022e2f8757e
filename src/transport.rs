use log::trace;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::io::ErrorKind::{TimedOut, WouldBlock};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use crate::Error;

/// Receive buffer size; larger datagrams are cut off by the kernel
pub const MAX_DATAGRAM_SIZE: usize = 4096;

/// Finest timeout `SO_RCVTIMEO` can express; anything shorter becomes zero,
/// which the kernel reads as "wait forever"
const MIN_TIMEOUT: Duration = Duration::from_micros(1);

/// One request/response datagram exchange with a name server
pub trait Transport {
    fn query(&self, server: SocketAddr, payload: &[u8], timeout: Duration)
        -> Result<Vec<u8>, Error>;
}

/// Plain UDP, one socket per exchange
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    fn socket(server: SocketAddr, timeout: Duration) -> io::Result<UdpSocket> {
        let any: IpAddr = match server {
            SocketAddr::V4(_) => Ipv4Addr::UNSPECIFIED.into(),
            SocketAddr::V6(_) => Ipv6Addr::UNSPECIFIED.into(),
        };
        let socket = Socket::new(Domain::for_address(server), Type::DGRAM, Some(Protocol::UDP))?;
        socket.bind(&SockAddr::from(SocketAddr::new(any, 0)))?;
        // Connected, so the kernel drops datagrams from any other peer.
        socket.connect(&SockAddr::from(server))?;
        socket.set_read_timeout(Some(timeout))?;
        Ok(socket.into())
    }
}

impl Transport for UdpTransport {
    fn query(
        &self,
        server: SocketAddr,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, Error> {
        let transport_error = |source: io::Error| Error::Transport { server, source };
        if timeout < MIN_TIMEOUT {
            return Err(Error::Timeout { server, timeout });
        }

        let socket = UdpTransport::socket(server, timeout).map_err(transport_error)?;
        let sent = socket.send(payload).map_err(transport_error)?;
        trace!("sent {} bytes to {}", sent, server);

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let len = match socket.recv(&mut buf) {
            Ok(len) => len,
            Err(ref err) if err.kind() == WouldBlock || err.kind() == TimedOut => {
                return Err(Error::Timeout { server, timeout })
            }
            Err(err) => return Err(transport_error(err)),
        };
        trace!("received {} bytes from {}", len, server);

        buf.truncate(len);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn local_server() -> (UdpSocket, SocketAddr) {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr)
    }

    #[test]
    fn exchanges_one_datagram() {
        let (server, addr) = local_server();
        let handle = thread::spawn(move || {
            let mut buf = [0u8; 512];
            let (len, peer) = server.recv_from(&mut buf).unwrap();
            let mut reply = buf[..len].to_vec();
            reply.reverse();
            server.send_to(&reply, peer).unwrap();
        });

        let response = UdpTransport
            .query(addr, b"\x01\x02\x03", Duration::from_secs(5))
            .unwrap();
        assert_eq!(response, b"\x03\x02\x01");
        handle.join().unwrap();
    }

    #[test]
    fn silent_server_times_out() {
        let (_server, addr) = local_server();
        let timeout = Duration::from_millis(100);
        match UdpTransport.query(addr, b"\x00", timeout) {
            Err(Error::Timeout {
                server,
                timeout: waited,
            }) => {
                assert_eq!(server, addr);
                assert_eq!(waited, timeout);
            }
            other => panic!("expected a timeout, got {:?}", other),
        }
    }

    #[test]
    fn zero_timeout_gives_up_at_once() {
        let (server, addr) = local_server();
        for &timeout in &[Duration::ZERO, Duration::from_nanos(999)] {
            match UdpTransport.query(addr, b"\x00", timeout) {
                Err(Error::Timeout { timeout: waited, .. }) => assert_eq!(waited, timeout),
                other => panic!("expected a timeout, got {:?}", other),
            }
        }
        // Nothing was sent.
        server.set_nonblocking(true).unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(server.recv_from(&mut buf).unwrap_err().kind(), WouldBlock);
    }
}
