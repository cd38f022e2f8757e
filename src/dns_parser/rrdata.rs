use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::{Error, Name, Type};

/// The enumeration that represents known types of DNS resource records data
#[derive(Debug, Clone)]
pub enum RRData<'a> {
    CNAME(Name<'a>),
    NS(Name<'a>),
    PTR(Name<'a>),
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    MX {
        preference: u16,
        exchange: Name<'a>,
    },
    SOA {
        primary_ns: Name<'a>,
        mailbox: Name<'a>,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum_ttl: u32,
    },
    TXT(&'a [u8]),
    // Anything that can't be parsed yet
    Unknown {
        typ: Type,
        data: &'a [u8],
    },
}

impl<'a> RRData<'a> {
    pub fn typ(&self) -> Type {
        match *self {
            RRData::CNAME(..) => Type::CNAME,
            RRData::NS(..) => Type::NS,
            RRData::PTR(..) => Type::PTR,
            RRData::A(..) => Type::A,
            RRData::AAAA(..) => Type::AAAA,
            RRData::MX { .. } => Type::MX,
            RRData::SOA { .. } => Type::SOA,
            RRData::TXT(..) => Type::TXT,
            RRData::Unknown { typ, .. } => typ,
        }
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        match *self {
            RRData::CNAME(ref name) | RRData::NS(ref name) | RRData::PTR(ref name) => {
                name.write_to(writer)
            }

            RRData::A(ip) => writer.write_u32::<BigEndian>(ip.into()),

            RRData::AAAA(ip) => writer.write_all(&ip.octets()),
            RRData::MX {
                preference,
                ref exchange,
            } => {
                writer.write_u16::<BigEndian>(preference)?;
                exchange.write_to(writer)
            }
            RRData::SOA {
                ref primary_ns,
                ref mailbox,
                serial,
                refresh,
                retry,
                expire,
                minimum_ttl,
            } => {
                primary_ns.write_to(writer)?;
                mailbox.write_to(writer)?;
                for value in [serial, refresh, retry, expire, minimum_ttl].iter() {
                    writer.write_u32::<BigEndian>(*value)?;
                }
                Ok(())
            }
            RRData::TXT(data) => writer.write_all(data),
            RRData::Unknown { data, .. } => writer.write_all(data),
        }
    }

    /// Interprets `rdata`, a slice of `original`
    ///
    /// Names inside the record data may point anywhere in `original`.
    pub fn parse(typ: Type, rdata: &'a [u8], original: &'a [u8]) -> Result<RRData<'a>, Error> {
        match typ {
            Type::A => {
                if rdata.len() != 4 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::A(Ipv4Addr::from(BigEndian::read_u32(rdata))))
            }
            Type::AAAA => {
                if rdata.len() != 16 {
                    return Err(Error::WrongRdataLength);
                }
                let mut octets = [0u8; 16];
                octets.copy_from_slice(rdata);
                Ok(RRData::AAAA(Ipv6Addr::from(octets)))
            }
            Type::CNAME => Ok(RRData::CNAME(parse_whole_name(rdata, original)?)),
            Type::NS => Ok(RRData::NS(parse_whole_name(rdata, original)?)),
            Type::PTR => Ok(RRData::PTR(parse_whole_name(rdata, original)?)),
            Type::MX => {
                if rdata.len() < 3 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::MX {
                    preference: BigEndian::read_u16(&rdata[..2]),
                    exchange: parse_whole_name(&rdata[2..], original)?,
                })
            }
            Type::SOA => {
                let (primary_ns, first) = Name::scan(rdata, original)?;
                let (mailbox, second) = Name::scan(&rdata[first..], original)?;
                let numbers = &rdata[first + second..];
                if numbers.len() != 20 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::SOA {
                    primary_ns,
                    mailbox,
                    serial: BigEndian::read_u32(&numbers[..4]),
                    refresh: BigEndian::read_u32(&numbers[4..8]),
                    retry: BigEndian::read_u32(&numbers[8..12]),
                    expire: BigEndian::read_u32(&numbers[12..16]),
                    minimum_ttl: BigEndian::read_u32(&numbers[16..20]),
                })
            }
            Type::TXT => Ok(RRData::TXT(rdata)),
            typ => Ok(RRData::Unknown {
                typ: typ,
                data: rdata,
            }),
        }
    }
}

/// A name that must span the whole of `data`
fn parse_whole_name<'a>(data: &'a [u8], original: &'a [u8]) -> Result<Name<'a>, Error> {
    let (name, consumed) = Name::scan(data, original)?;
    if consumed != data.len() {
        return Err(Error::WrongRdataLength);
    }
    Ok(name)
}

impl<'a> fmt::Display for RRData<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RRData::CNAME(ref name) | RRData::NS(ref name) | RRData::PTR(ref name) => {
                write!(f, "{}", name)
            }
            RRData::A(ip) => write!(f, "{}", ip),
            RRData::AAAA(ip) => write!(f, "{}", ip),
            RRData::MX {
                preference,
                ref exchange,
            } => write!(f, "{} {}", preference, exchange),
            RRData::SOA {
                ref primary_ns,
                ref mailbox,
                serial,
                refresh,
                retry,
                expire,
                minimum_ttl,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                primary_ns, mailbox, serial, refresh, retry, expire, minimum_ttl
            ),
            RRData::TXT(data) => write!(f, "{:?}", String::from_utf8_lossy(data)),
            RRData::Unknown { data, .. } => write!(f, "\\# {}", data.len()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_a() {
        let data = b"\x5d\xb8\xd8\x22";
        match RRData::parse(Type::A, data, data).unwrap() {
            RRData::A(ip) => assert_eq!(ip, Ipv4Addr::new(93, 184, 216, 34)),
            other => panic!("unexpected record data: {:?}", other),
        }
    }

    #[test]
    fn a_must_be_four_bytes() {
        let data = b"\x5d\xb8\xd8";
        assert_eq!(
            RRData::parse(Type::A, data, data).unwrap_err(),
            Error::WrongRdataLength
        );
        let data = b"\x5d\xb8\xd8\x22\x00";
        assert_eq!(
            RRData::parse(Type::A, data, data).unwrap_err(),
            Error::WrongRdataLength
        );
    }

    #[test]
    fn ns_points_into_whole_message() {
        // "com" at offset 0, then NS rdata "a.gtld-servers" + pointer to "com"
        let packet = b"\x03com\x00\x01a\x0cgtld-servers\xc0\x00";
        let rdata = &packet[5..];
        match RRData::parse(Type::NS, rdata, packet).unwrap() {
            RRData::NS(name) => assert_eq!(name.to_string(), "a.gtld-servers.com"),
            other => panic!("unexpected record data: {:?}", other),
        }
    }

    #[test]
    fn name_must_fill_rdata() {
        let packet = b"\x03com\x00\xff";
        assert_eq!(
            RRData::parse(Type::CNAME, packet, packet).unwrap_err(),
            Error::WrongRdataLength
        );
    }

    #[test]
    fn unknown_types_keep_raw_data() {
        let data = b"\x01\x02\x03";
        let parsed = RRData::parse(Type::Unknown(99), data, data).unwrap();
        assert_eq!(parsed.typ(), Type::Unknown(99));
        let mut buf = Vec::new();
        parsed.write_to(&mut buf).unwrap();
        assert_eq!(&buf[..], &data[..]);
    }
}
