use std::fmt;

use super::{Class, Header, Name, RRData, Type};

/// Parsed DNS packet
#[derive(Debug)]
pub struct Packet<'a> {
    pub header: Header,
    pub questions: Vec<Question<'a>>,
    pub answers: Vec<ResourceRecord<'a>>,
    pub nameservers: Vec<ResourceRecord<'a>>,
    pub additional: Vec<ResourceRecord<'a>>,
}

/// A parsed chunk of data in the Query section of the packet
#[derive(Debug)]
pub struct Question<'a> {
    pub qname: Name<'a>,
    pub qtype: Type,
    pub qclass: Class,
}

/// A single DNS record
///
/// Records of the types resolution cares about are parsed, others are kept
/// as an unparsed slice of bytes.
#[derive(Debug)]
pub struct ResourceRecord<'a> {
    pub name: Name<'a>,
    pub cls: Class,
    pub ttl: u32,
    pub data: RRData<'a>,
}

impl<'a> fmt::Display for Question<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qclass, self.qtype)
    }
}

impl<'a> fmt::Display for ResourceRecord<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name,
            self.ttl,
            self.cls,
            self.data.typ(),
            self.data
        )
    }
}

/// Multi-line, dig-like rendering of the whole packet
impl<'a> fmt::Display for Packet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "id {}, {}, {}",
            self.header.id,
            if self.header.query { "query" } else { "response" },
            self.header.response_code
        )?;
        write!(
            f,
            "counts: question {}, answer {}, authority {}, additional {}",
            self.questions.len(),
            self.answers.len(),
            self.nameservers.len(),
            self.additional.len()
        )?;
        for question in &self.questions {
            write!(f, "\n  question    {}", question)?;
        }
        let sections = [
            ("answer    ", &self.answers),
            ("authority ", &self.nameservers),
            ("additional", &self.additional),
        ];
        for &(title, records) in sections.iter() {
            for record in records.iter() {
                write!(f, "\n  {}  {}", title, record)?;
            }
        }
        Ok(())
    }
}
