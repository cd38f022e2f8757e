use byteorder::{BigEndian, ByteOrder};

use super::header::HEADER_SIZE;
use super::{Class, Error, Header, Name, Packet, Question, RRData, ResourceRecord, Type};

/// Smallest possible resource record: root name, type, class, ttl, rdlength
const MIN_RECORD_SIZE: usize = 11;
/// Smallest possible question: root name, type, class
const MIN_QUESTION_SIZE: usize = 5;

/// Read position in an immutable packet buffer
///
/// Every read advances `offset`; compression pointers are resolved by
/// `Name::scan` against the whole buffer without moving the cursor.
struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < len {
            return Err(Error::UnexpectedEOF);
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    fn read_name(&mut self) -> Result<Name<'a>, Error> {
        let (name, consumed) = Name::scan(&self.data[self.offset..], self.data)?;
        self.offset += consumed;
        Ok(name)
    }

    /// Fails early when `count` items of at least `min_size` bytes can't fit
    fn expect_room(&self, count: u16, min_size: usize) -> Result<(), Error> {
        if count as usize * min_size > self.remaining() {
            return Err(Error::UnexpectedEOF);
        }
        Ok(())
    }
}

impl<'a> Packet<'a> {
    /// Parse a full DNS packet and return the structure
    ///
    /// Bytes after the last declared record are ignored.
    pub fn parse(data: &'a [u8]) -> Result<Packet<'a>, Error> {
        let header = Header::parse(data)?;
        let mut cursor = Cursor {
            data: data,
            offset: HEADER_SIZE,
        };

        cursor.expect_room(header.questions, MIN_QUESTION_SIZE)?;
        let mut questions = Vec::with_capacity(header.questions as usize);
        for _ in 0..header.questions {
            let qname = cursor.read_name()?;
            let qtype = Type::parse(cursor.read_u16()?);
            let qclass = Class::parse(cursor.read_u16()?);
            questions.push(Question {
                qname,
                qtype,
                qclass,
            });
        }

        let answers = parse_records(&mut cursor, header.answers)?;
        let nameservers = parse_records(&mut cursor, header.nameservers)?;
        let additional = parse_records(&mut cursor, header.additional)?;

        Ok(Packet {
            header: header,
            questions: questions,
            answers: answers,
            nameservers: nameservers,
            additional: additional,
        })
    }
}

fn parse_records<'a>(
    cursor: &mut Cursor<'a>,
    count: u16,
) -> Result<Vec<ResourceRecord<'a>>, Error> {
    cursor.expect_room(count, MIN_RECORD_SIZE)?;
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(parse_record(cursor)?);
    }
    Ok(records)
}

fn parse_record<'a>(cursor: &mut Cursor<'a>) -> Result<ResourceRecord<'a>, Error> {
    let name = cursor.read_name()?;
    let typ = Type::parse(cursor.read_u16()?);
    let cls = Class::parse(cursor.read_u16()?);
    let ttl = cursor.read_u32()?;
    let rdlength = cursor.read_u16()? as usize;
    let rdata = cursor.take(rdlength)?;
    Ok(ResourceRecord {
        name,
        cls,
        ttl,
        data: RRData::parse(typ, rdata, cursor.data)?,
    })
}
