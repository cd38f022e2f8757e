use std::fmt;

/// The TYPE value of a resource record, also used as QTYPE
///
/// Codes this crate does not interpret are kept as `Unknown` so a packet
/// carrying them still parses.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Type {
    /// a host address
    A,
    /// an authoritative name server
    NS,
    /// the canonical name for an alias
    CNAME,
    /// marks the start of a zone of authority
    SOA,
    /// a domain name pointer
    PTR,
    /// mail exchange
    MX,
    /// text strings
    TXT,
    /// IPv6 host address
    AAAA,
    /// service record
    SRV,
    /// a request for all records (QTYPE only)
    All,
    Unknown(u16),
}

impl Type {
    pub fn parse(code: u16) -> Type {
        match code {
            1 => Type::A,
            2 => Type::NS,
            5 => Type::CNAME,
            6 => Type::SOA,
            12 => Type::PTR,
            15 => Type::MX,
            16 => Type::TXT,
            28 => Type::AAAA,
            33 => Type::SRV,
            255 => Type::All,
            x => Type::Unknown(x),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Type::A => 1,
            Type::NS => 2,
            Type::CNAME => 5,
            Type::SOA => 6,
            Type::PTR => 12,
            Type::MX => 15,
            Type::TXT => 16,
            Type::AAAA => 28,
            Type::SRV => 33,
            Type::All => 255,
            Type::Unknown(x) => x,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Type::Unknown(code) => write!(f, "TYPE{}", code),
            Type::All => f.write_str("ANY"),
            ref known => fmt::Debug::fmt(known, f),
        }
    }
}

/// The CLASS value of a resource record, also used as QCLASS
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Class {
    /// the Internet
    IN,
    /// the CHAOS class
    CH,
    /// Hesiod
    HS,
    /// any class (QCLASS only)
    Any,
    Unknown(u16),
}

impl Class {
    pub fn parse(code: u16) -> Class {
        match code {
            1 => Class::IN,
            3 => Class::CH,
            4 => Class::HS,
            255 => Class::Any,
            x => Class::Unknown(x),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Class::IN => 1,
            Class::CH => 3,
            Class::HS => 4,
            Class::Any => 255,
            Class::Unknown(x) => x,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Class::Unknown(code) => write!(f, "CLASS{}", code),
            Class::Any => f.write_str("ANY"),
            ref known => fmt::Debug::fmt(known, f),
        }
    }
}

/// The OPCODE value according to RFC 1035
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    StandardQuery,
    InverseQuery,
    ServerStatusRequest,
    Reserved(u8),
}

impl From<u8> for Opcode {
    fn from(code: u8) -> Opcode {
        match code {
            0 => Opcode::StandardQuery,
            1 => Opcode::InverseQuery,
            2 => Opcode::ServerStatusRequest,
            x => Opcode::Reserved(x),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        match opcode {
            Opcode::StandardQuery => 0,
            Opcode::InverseQuery => 1,
            Opcode::ServerStatusRequest => 2,
            Opcode::Reserved(x) => x,
        }
    }
}

/// The RCODE value according to RFC 1035
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(u8),
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> ResponseCode {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            x => ResponseCode::Reserved(x),
        }
    }
}

impl From<ResponseCode> for u8 {
    fn from(code: ResponseCode) -> u8 {
        match code {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Reserved(x) => x,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResponseCode::NoError => f.write_str("no error"),
            ResponseCode::FormatError => {
                f.write_str("format error (name server could not interpret the request)")
            }
            ResponseCode::ServerFailure => f.write_str("server failure"),
            ResponseCode::NameError => f.write_str("name error (domain does not exist)"),
            ResponseCode::NotImplemented => {
                f.write_str("not implemented (name server does not support the request type)")
            }
            ResponseCode::Refused => f.write_str("refused (name server policy)"),
            ResponseCode::Reserved(x) => write!(f, "reserved response code {}", x),
        }
    }
}
