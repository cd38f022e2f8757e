use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use super::header::HEADER_SIZE;
use super::{Class, Header, Name, Opcode, RRData, ResponseCode, Type};

/// Largest message a plain (non EDNS) UDP exchange may carry
pub const MAX_UDP_PAYLOAD: usize = 512;

pub enum Questions {}
pub enum Answers {}
pub enum Nameservers {}
pub enum Additional {}

pub trait MoveTo<T> {}
impl<T> MoveTo<T> for T {}

impl MoveTo<Answers> for Questions {}

impl MoveTo<Nameservers> for Questions {}
impl MoveTo<Nameservers> for Answers {}

impl MoveTo<Additional> for Questions {}
impl MoveTo<Additional> for Answers {}
impl MoveTo<Additional> for Nameservers {}

/// Allows to build a DNS packet
///
/// Both query and answer packets may be built with this interface. Sections
/// must be filled in wire order, which the type parameter enforces. Names are
/// always written uncompressed.
pub struct Builder<S> {
    buf: Vec<u8>,
    max_size: Option<usize>,
    _state: PhantomData<S>,
}

impl Builder<Questions> {
    /// Creates a new query
    ///
    /// Initially all sections are empty. You're expected to fill
    /// the questions section with `add_question`
    pub fn new_query(id: u16, recursion: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id: id,
            query: true,
            opcode: Opcode::StandardQuery,
            authoritative: false,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: false,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    pub fn new_response(id: u16, recursion: bool, authoritative: bool) -> Builder<Questions> {
        Builder::with_header(Header {
            id: id,
            query: false,
            opcode: Opcode::StandardQuery,
            authoritative: authoritative,
            truncated: false,
            recursion_desired: recursion,
            recursion_available: recursion,
            response_code: ResponseCode::NoError,
            questions: 0,
            answers: 0,
            nameservers: 0,
            additional: 0,
        })
    }

    fn with_header(head: Header) -> Builder<Questions> {
        let mut buf = Vec::with_capacity(MAX_UDP_PAYLOAD);
        buf.extend([0u8; HEADER_SIZE].iter());
        head.write(&mut buf[..HEADER_SIZE]);
        Builder {
            buf: buf,
            max_size: Some(MAX_UDP_PAYLOAD),
            _state: PhantomData,
        }
    }
}

impl<T> Builder<T> {
    fn write_rr(&mut self, name: &Name, cls: Class, ttl: u32, data: &RRData) {
        name.write_to(&mut self.buf).unwrap();
        self.buf.write_u16::<BigEndian>(data.typ().code()).unwrap();
        self.buf.write_u16::<BigEndian>(cls.code()).unwrap();
        self.buf.write_u32::<BigEndian>(ttl).unwrap();

        let size_offset = self.buf.len();
        self.buf.write_u16::<BigEndian>(0).unwrap();

        let data_offset = self.buf.len();
        data.write_to(&mut self.buf).unwrap();
        let data_size = self.buf.len() - data_offset;

        BigEndian::write_u16(
            &mut self.buf[size_offset..size_offset + 2],
            data_size as u16,
        );
    }

    /// Returns the final packet
    ///
    /// When packet is not truncated method returns `Ok(packet)`. If
    /// packet is truncated the method returns `Err(packet)`. In both
    /// cases the packet is fully valid.
    ///
    /// In the client implementation it's probably unwise to send truncated
    /// packet, as it doesn't make sense.
    pub fn build(mut self) -> Result<Vec<u8>, Vec<u8>> {
        match self.max_size {
            Some(max_size) if self.buf.len() > max_size => {
                Header::set_truncated(&mut self.buf[..HEADER_SIZE]);
                Err(self.buf)
            }
            _ => Ok(self.buf),
        }
    }

    pub fn move_to<U>(self) -> Builder<U>
    where
        T: MoveTo<U>,
    {
        Builder {
            buf: self.buf,
            max_size: self.max_size,
            _state: PhantomData,
        }
    }

    /// Overwrites the RCODE bits of the header
    pub fn set_response_code(&mut self, code: ResponseCode) {
        if let Ok(mut header) = Header::parse(&self.buf) {
            header.response_code = code;
            header.write(&mut self.buf[..HEADER_SIZE]);
        }
    }
}

impl<T: MoveTo<Questions>> Builder<T> {
    /// Adds a question to the packet
    ///
    /// # Panics
    ///
    /// * There are already 65535 questions in the buffer.
    pub fn add_question(self, qname: &Name, qtype: Type, qclass: Class) -> Builder<Questions> {
        let mut builder = self.move_to::<Questions>();

        qname.write_to(&mut builder.buf).unwrap();
        builder.buf.write_u16::<BigEndian>(qtype.code()).unwrap();
        builder.buf.write_u16::<BigEndian>(qclass.code()).unwrap();
        Header::inc_questions(&mut builder.buf).expect("Too many questions");
        builder
    }
}

impl<T: MoveTo<Answers>> Builder<T> {
    pub fn add_answer(self, name: &Name, cls: Class, ttl: u32, data: &RRData) -> Builder<Answers> {
        let mut builder = self.move_to::<Answers>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_answers(&mut builder.buf).expect("Too many answers");

        builder
    }
}

impl<T: MoveTo<Nameservers>> Builder<T> {
    pub fn add_nameserver(
        self,
        name: &Name,
        cls: Class,
        ttl: u32,
        data: &RRData,
    ) -> Builder<Nameservers> {
        let mut builder = self.move_to::<Nameservers>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_nameservers(&mut builder.buf).expect("Too many nameservers");

        builder
    }
}

impl<T: MoveTo<Additional>> Builder<T> {
    pub fn add_additional(
        self,
        name: &Name,
        cls: Class,
        ttl: u32,
        data: &RRData,
    ) -> Builder<Additional> {
        let mut builder = self.move_to::<Additional>();

        builder.write_rr(name, cls, ttl, data);
        Header::inc_additional(&mut builder.buf).expect("Too many additional answers");

        builder
    }
}
