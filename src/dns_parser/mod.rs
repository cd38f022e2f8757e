//! Hand-written RFC 1035 message codec
//!
//! Encoding goes through [`Builder`](struct.Builder.html); decoding through
//! [`Packet::parse`](struct.Packet.html#method.parse), which borrows the
//! datagram buffer for the lifetime of the packet.

mod builder;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod rrdata;
mod structs;

pub use self::builder::{Additional, Answers, Builder, Nameservers, Questions, MAX_UDP_PAYLOAD};
pub use self::enums::{Class, Opcode, ResponseCode, Type};
pub use self::error::{EncodeError, Error};
pub use self::header::{Header, HEADER_SIZE};
pub use self::name::{Labels, Name, MAX_LABEL_LENGTH, MAX_NAME_LENGTH, MAX_POINTER_HOPS};
pub use self::rrdata::RRData;
pub use self::structs::{Packet, Question, ResourceRecord};

/// Encodes a single-question query
///
/// Fails when `name` has a label longer than 63 bytes, an empty label, or
/// is longer than 255 bytes on the wire.
pub fn encode_query(
    name: &str,
    qtype: Type,
    qclass: Class,
    id: u16,
    recursion_desired: bool,
) -> Result<Vec<u8>, EncodeError> {
    let qname = Name::from_str(name)?;
    let builder = Builder::new_query(id, recursion_desired).add_question(&qname, qtype, qclass);
    // A single question is at most 12 + 255 + 4 bytes, far below the limit.
    Ok(builder.build().unwrap_or_else(|x| x))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_example_com() {
        let query = encode_query("example.com", Type::A, Class::IN, 0x1234, true).unwrap();
        assert_eq!(
            &query[..12],
            b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00"
        );
        assert_eq!(&query[12..], b"\x07example\x03com\x00\x00\x01\x00\x01");
    }

    #[test]
    fn query_round_trip() {
        for &(name, qtype, id, rd) in [
            ("example.com", Type::A, 0x1234, true),
            ("a.root-servers.net", Type::NS, 0, false),
            ("WwW.Rust-Lang.org.", Type::CNAME, 0xffff, true),
            (".", Type::NS, 42, false),
        ]
        .iter()
        {
            let query = encode_query(name, qtype, Class::IN, id, rd).unwrap();
            let packet = Packet::parse(&query).unwrap();
            assert_eq!(packet.header.id, id);
            assert!(packet.header.query);
            assert_eq!(packet.header.recursion_desired, rd);
            assert_eq!(packet.header.response_code, ResponseCode::NoError);
            assert_eq!(packet.header.questions, 1);
            assert_eq!(packet.header.answers, 0);
            assert_eq!(packet.header.nameservers, 0);
            assert_eq!(packet.header.additional, 0);
            assert_eq!(packet.questions.len(), 1);
            let question = &packet.questions[0];
            assert_eq!(question.qname.to_string(), name.trim_end_matches('.'));
            assert_eq!(question.qtype, qtype);
            assert_eq!(question.qclass, Class::IN);
        }
    }

    #[test]
    fn encode_rejects_long_label() {
        let name = format!("{}.com", "x".repeat(64));
        assert!(matches!(
            encode_query(&name, Type::A, Class::IN, 1, true),
            Err(EncodeError::LabelTooLong(_))
        ));
    }
}
