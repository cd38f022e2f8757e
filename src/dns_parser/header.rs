use byteorder::{BigEndian, ByteOrder};

use super::{Error, Opcode, ResponseCode};

mod flag {
    pub const QUERY: u16 = 0b1000_0000_0000_0000;
    pub const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
    pub const AUTHORITATIVE: u16 = 0b0000_0100_0000_0000;
    pub const TRUNCATED: u16 = 0b0000_0010_0000_0000;
    pub const RECURSION_DESIRED: u16 = 0b0000_0001_0000_0000;
    pub const RECURSION_AVAILABLE: u16 = 0b0000_0000_1000_0000;
    pub const RESPONSE_CODE_MASK: u16 = 0b0000_0000_0000_1111;
}

pub const HEADER_SIZE: usize = 12;

/// Represents parsed header of the packet
///
/// `query` is true for queries (the QR bit is clear).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub id: u16,
    pub query: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    /// Parses the fixed 12 byte header. Reserved (Z) bits are ignored.
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }
        let flags = BigEndian::read_u16(&data[2..4]);
        Ok(Header {
            id: BigEndian::read_u16(&data[..2]),
            query: flags & flag::QUERY == 0,
            opcode: Opcode::from(((flags & flag::OPCODE_MASK) >> 11) as u8),
            authoritative: flags & flag::AUTHORITATIVE != 0,
            truncated: flags & flag::TRUNCATED != 0,
            recursion_desired: flags & flag::RECURSION_DESIRED != 0,
            recursion_available: flags & flag::RECURSION_AVAILABLE != 0,
            response_code: ResponseCode::from((flags & flag::RESPONSE_CODE_MASK) as u8),
            questions: BigEndian::read_u16(&data[4..6]),
            answers: BigEndian::read_u16(&data[6..8]),
            nameservers: BigEndian::read_u16(&data[8..10]),
            additional: BigEndian::read_u16(&data[10..12]),
        })
    }

    /// Writes the header into the first 12 bytes of `data`
    ///
    /// # Panics
    ///
    /// When the buffer is shorter than 12 bytes
    pub fn write(&self, data: &mut [u8]) {
        assert!(data.len() >= HEADER_SIZE, "header buffer is too short");
        let mut flags = 0u16;
        flags |= (u16::from(u8::from(self.opcode)) << 11) & flag::OPCODE_MASK;
        flags |= u16::from(u8::from(self.response_code)) & flag::RESPONSE_CODE_MASK;
        if !self.query {
            flags |= flag::QUERY;
        }
        if self.authoritative {
            flags |= flag::AUTHORITATIVE;
        }
        if self.truncated {
            flags |= flag::TRUNCATED;
        }
        if self.recursion_desired {
            flags |= flag::RECURSION_DESIRED;
        }
        if self.recursion_available {
            flags |= flag::RECURSION_AVAILABLE;
        }
        BigEndian::write_u16(&mut data[..2], self.id);
        BigEndian::write_u16(&mut data[2..4], flags);
        BigEndian::write_u16(&mut data[4..6], self.questions);
        BigEndian::write_u16(&mut data[6..8], self.answers);
        BigEndian::write_u16(&mut data[8..10], self.nameservers);
        BigEndian::write_u16(&mut data[10..12], self.additional);
    }

    pub fn set_truncated(data: &mut [u8]) {
        let flags = BigEndian::read_u16(&data[2..4]) | flag::TRUNCATED;
        BigEndian::write_u16(&mut data[2..4], flags);
    }

    pub fn inc_questions(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[4..6])
    }

    pub fn inc_answers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[6..8])
    }

    pub fn inc_nameservers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[8..10])
    }

    pub fn inc_additional(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(&mut data[10..12])
    }

    fn inc_count(field: &mut [u8]) -> Option<u16> {
        let count = BigEndian::read_u16(field).checked_add(1)?;
        BigEndian::write_u16(field, count);
        Some(count)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_response_header() {
        let data = b"\x12\x34\x81\x83\x00\x01\x00\x00\x00\x01\x00\x00";
        let header = Header::parse(data).unwrap();
        assert_eq!(
            header,
            Header {
                id: 0x1234,
                query: false,
                opcode: Opcode::StandardQuery,
                authoritative: false,
                truncated: false,
                recursion_desired: true,
                recursion_available: true,
                response_code: ResponseCode::NameError,
                questions: 1,
                answers: 0,
                nameservers: 1,
                additional: 0,
            }
        );
    }

    #[test]
    fn write_then_parse() {
        let header = Header {
            id: 0xbeef,
            query: false,
            opcode: Opcode::StandardQuery,
            authoritative: true,
            truncated: true,
            recursion_desired: false,
            recursion_available: true,
            response_code: ResponseCode::Refused,
            questions: 1,
            answers: 2,
            nameservers: 3,
            additional: 4,
        };
        let mut buf = [0u8; 12];
        header.write(&mut buf);
        assert_eq!(&buf[..4], b"\xbe\xef\x86\x85");
        assert_eq!(Header::parse(&buf).unwrap(), header);
    }

    #[test]
    fn short_header() {
        assert_eq!(Header::parse(b"\x00\x01\x00"), Err(Error::HeaderTooShort));
    }

    #[test]
    fn counters() {
        let mut buf = [0u8; 12];
        assert_eq!(Header::inc_additional(&mut buf), Some(1));
        assert_eq!(Header::inc_additional(&mut buf), Some(2));
        let header = Header::parse(&buf).unwrap();
        assert_eq!(header.additional, 2);
        assert_eq!(header.answers, 0);
        buf[4] = 0xff;
        buf[5] = 0xff;
        assert_eq!(Header::inc_questions(&mut buf), None);
    }
}
