use std::borrow::Cow;
use std::fmt;
use std::fmt::Write;
use std::io;
use std::str::from_utf8;

use byteorder::WriteBytesExt;

use super::{EncodeError, Error};

/// Upper bound on compression pointers followed while reading one name
pub const MAX_POINTER_HOPS: usize = 64;

/// Longest name on the wire, length octets and root label included
pub const MAX_NAME_LENGTH: usize = 255;

pub const MAX_LABEL_LENGTH: usize = 63;

const POINTER_MASK: u8 = 0b1100_0000;

/// The DNS name as stored in the original packet
///
/// This is contains just a reference to a slice that contains the data.
/// You may turn this into a string using `.to_string()`
#[derive(Debug, Clone)]
pub enum Name<'a> {
    FromPacket {
        /// Labels up to and including the terminating zero byte or the
        /// first compression pointer
        labels: &'a [u8],
        /// This is the original buffer. The compressed names in original
        /// are calculated in this buffer
        original: &'a [u8],
    },

    FromStr(Cow<'a, str>),
}

impl<'a> Name<'a> {
    /// Reads a name starting at the beginning of `data`
    ///
    /// `data` is a suffix of `original` (or of a slice of it, for names inside
    /// RDATA). Pointers are resolved against `original`. Returns the name and
    /// the number of bytes the name occupies in `data`.
    pub fn scan(data: &'a [u8], original: &'a [u8]) -> Result<(Name<'a>, usize), Error> {
        let mut buf = data;
        let mut pos = 0;
        let mut consumed = None;
        let mut hops = 0;
        let mut name_length = 1;
        loop {
            let byte = *buf.get(pos).ok_or(Error::UnexpectedEOF)?;
            match byte & POINTER_MASK {
                0 if byte == 0 => {
                    let consumed = consumed.unwrap_or(pos + 1);
                    return Ok((
                        Name::FromPacket {
                            labels: &data[..consumed],
                            original: original,
                        },
                        consumed,
                    ));
                }
                0 => {
                    let end = pos + 1 + byte as usize;
                    if end >= buf.len() {
                        return Err(Error::UnexpectedEOF);
                    }
                    if from_utf8(&buf[pos + 1..end]).is_err() {
                        return Err(Error::LabelIsNotAscii);
                    }
                    name_length += byte as usize + 1;
                    if name_length > MAX_NAME_LENGTH {
                        return Err(Error::NameTooLong);
                    }
                    pos = end;
                }
                POINTER_MASK => {
                    let low = *buf.get(pos + 1).ok_or(Error::UnexpectedEOF)?;
                    let offset = pointer_offset(byte, low);
                    if consumed.is_none() {
                        consumed = Some(pos + 2);
                    }
                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(Error::TooManyPointers(MAX_POINTER_HOPS));
                    }
                    if offset >= original.len() {
                        return Err(Error::PointerOutOfBounds(offset));
                    }
                    buf = original;
                    pos = offset;
                }
                _ => return Err(Error::UnknownLabelFormat),
            }
        }
    }

    /// Wraps a textual name, checking that it can be encoded
    ///
    /// A single trailing dot is accepted. Both `""` and `"."` denote the root.
    pub fn from_str<T: Into<Cow<'a, str>>>(name: T) -> Result<Name<'a>, EncodeError> {
        let name = name.into();
        let mut length = 1;
        for label in text_labels(&name) {
            if label.is_empty() {
                return Err(EncodeError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(EncodeError::LabelTooLong(label.to_owned()));
            }
            length += label.len() + 1;
        }
        if length > MAX_NAME_LENGTH {
            return Err(EncodeError::NameTooLong(name.to_string()));
        }
        Ok(Name::FromStr(name))
    }

    /// Iterates over the labels of the name, compression pointers resolved
    pub fn labels(&self) -> Labels<'_> {
        match *self {
            Name::FromPacket { labels, original } => Labels::Packet {
                buf: labels,
                original: original,
                pos: 0,
                hops: 0,
            },
            Name::FromStr(ref name) => Labels::Text(text_labels(name)),
        }
    }

    /// Writes the name uncompressed
    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for label in self.labels() {
            writer.write_u8(label.len() as u8)?;
            writer.write_all(label)?;
        }
        writer.write_u8(0)
    }
}

fn pointer_offset(high: u8, low: u8) -> usize {
    (((high & !POINTER_MASK) as usize) << 8) | low as usize
}

fn text_labels(name: &str) -> std::str::Split<'_, char> {
    let name = name.strip_suffix('.').unwrap_or(name);
    // "".split('.') yields one empty item; the root name has no labels.
    let mut split = name.split('.');
    if name.is_empty() {
        split.next();
    }
    split
}

/// Iterator returned by [`Name::labels`](enum.Name.html#method.labels)
pub enum Labels<'a> {
    Packet {
        buf: &'a [u8],
        original: &'a [u8],
        pos: usize,
        hops: usize,
    },
    Text(std::str::Split<'a, char>),
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        match *self {
            Labels::Text(ref mut split) => split.next().map(str::as_bytes),
            Labels::Packet {
                ref mut buf,
                original,
                ref mut pos,
                ref mut hops,
            } => loop {
                // `scan` validated the name, so any malformed byte just ends
                // the iteration.
                let data: &'a [u8] = *buf;
                let byte = *data.get(*pos)?;
                match byte & POINTER_MASK {
                    0 if byte == 0 => return None,
                    0 => {
                        let end = *pos + 1 + byte as usize;
                        let label = data.get(*pos + 1..end)?;
                        *pos = end;
                        return Some(label);
                    }
                    POINTER_MASK => {
                        *hops += 1;
                        if *hops > MAX_POINTER_HOPS {
                            return None;
                        }
                        *pos = pointer_offset(byte, *data.get(*pos + 1)?);
                        *buf = original;
                    }
                    _ => return None,
                }
            },
        }
    }
}

impl<'a> fmt::Display for Name<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if let Name::FromStr(ref name) = *self {
            let name: &str = name;
            return fmt.write_str(name.strip_suffix('.').unwrap_or(name));
        }
        for (i, label) in self.labels().enumerate() {
            if i != 0 {
                fmt.write_char('.')?;
            }
            fmt.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

/// Names compare label by label, ignoring ASCII case
impl<'a, 'b> PartialEq<Name<'b>> for Name<'a> {
    fn eq(&self, other: &Name<'b>) -> bool {
        let mut ours = self.labels();
        let mut theirs = other.labels();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => continue,
                _ => return false,
            }
        }
    }
}

impl<'a> Eq for Name<'a> {}

#[cfg(test)]
mod test {
    use super::*;

    fn encode(name: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        Name::from_str(name.to_owned())
            .unwrap()
            .write_to(&mut buf)
            .unwrap();
        buf
    }

    #[test]
    fn encode_labels() {
        assert_eq!(encode("example.com"), b"\x07example\x03com\x00");
        assert_eq!(encode("example.com."), b"\x07example\x03com\x00");
        assert_eq!(encode("."), b"\x00");
        assert_eq!(encode(""), b"\x00");
    }

    #[test]
    fn encode_keeps_case() {
        assert_eq!(encode("ExAmple.COM"), b"\x07ExAmple\x03COM\x00");
    }

    #[test]
    fn reject_bad_names() {
        let label = "a".repeat(64);
        assert_eq!(
            Name::from_str(format!("{}.com", label)).unwrap_err(),
            EncodeError::LabelTooLong(label)
        );
        assert!(Name::from_str(format!("{}.com", "a".repeat(63))).is_ok());
        assert!(matches!(
            Name::from_str("a..com"),
            Err(EncodeError::EmptyLabel(_))
        ));
        // 4 * (63 + 1) + 1 = 257 bytes on the wire
        let long = vec!["b".repeat(63); 4].join(".");
        assert!(matches!(
            Name::from_str(long),
            Err(EncodeError::NameTooLong(_))
        ));
        // 3 * 64 + (61 + 1) + 1 = 255 bytes
        let longest = format!("{}.{}", vec!["c".repeat(63); 3].join("."), "d".repeat(61));
        assert!(Name::from_str(longest).is_ok());
    }

    #[test]
    fn scan_plain() {
        let data = b"\x03www\x07example\x03com\x00\x00\x01";
        let (name, consumed) = Name::scan(data, data).unwrap();
        assert_eq!(consumed, 17);
        assert_eq!(name.to_string(), "www.example.com");
    }

    #[test]
    fn scan_compressed_matches_uncompressed() {
        // "example.com" at offset 0, then "www" + pointer to offset 0
        let data = b"\x07example\x03com\x00\x03www\xc0\x00";
        let (plain, _) = Name::scan(data, data).unwrap();
        let (compressed, consumed) = Name::scan(&data[13..], data).unwrap();
        assert_eq!(consumed, 6);
        assert_eq!(compressed.to_string(), "www.example.com");
        assert_eq!(compressed, Name::from_str("www.example.com").unwrap());

        let mut buf = Vec::new();
        compressed.write_to(&mut buf).unwrap();
        assert_eq!(&buf[..], b"\x03www\x07example\x03com\x00");
        assert_eq!(plain.to_string(), "example.com");
    }

    #[test]
    fn pointer_to_pointer() {
        let data = b"\x03com\x00\x07example\xc0\x00\x03www\xc0\x05";
        let (name, consumed) = Name::scan(&data[15..], data).unwrap();
        assert_eq!(consumed, 6);
        assert_eq!(name.to_string(), "www.example.com");
    }

    #[test]
    fn self_pointer() {
        let data = b"\xc0\x00";
        assert_eq!(
            Name::scan(data, data).unwrap_err(),
            Error::TooManyPointers(MAX_POINTER_HOPS)
        );
    }

    #[test]
    fn pointer_cycle() {
        let data = b"\x01a\xc0\x04\x01b\xc0\x00";
        assert_eq!(
            Name::scan(data, data).unwrap_err(),
            Error::TooManyPointers(MAX_POINTER_HOPS)
        );
    }

    #[test]
    fn pointer_out_of_bounds() {
        let data = b"\x03www\xc0\x40";
        assert_eq!(
            Name::scan(data, data).unwrap_err(),
            Error::PointerOutOfBounds(0x40)
        );
    }

    #[test]
    fn truncated_names() {
        assert_eq!(Name::scan(b"\x07exam", b"\x07exam").unwrap_err(), Error::UnexpectedEOF);
        assert_eq!(Name::scan(b"\x03com", b"\x03com").unwrap_err(), Error::UnexpectedEOF);
        assert_eq!(Name::scan(b"\xc0", b"\xc0").unwrap_err(), Error::UnexpectedEOF);
        assert_eq!(Name::scan(b"", b"").unwrap_err(), Error::UnexpectedEOF);
    }

    #[test]
    fn reserved_label_format() {
        let data = b"\x40abc\x00";
        assert_eq!(Name::scan(data, data).unwrap_err(), Error::UnknownLabelFormat);
    }

    #[test]
    fn decoded_name_too_long() {
        // Five 63 byte labels, each stored once and chained by pointers
        let mut data = Vec::new();
        let mut previous: Option<usize> = None;
        for _ in 0..5 {
            let start = data.len();
            data.push(63);
            data.extend(std::iter::repeat(b'x').take(63));
            match previous {
                None => data.push(0),
                Some(offset) => {
                    data.push(0xc0 | (offset >> 8) as u8);
                    data.push(offset as u8);
                }
            }
            previous = Some(start);
        }
        let last = previous.unwrap();
        assert_eq!(
            Name::scan(&data[last..], &data).unwrap_err(),
            Error::NameTooLong
        );
    }

    #[test]
    fn case_insensitive_eq() {
        let data = b"\x07EXAMPLE\x03com\x00";
        let (name, _) = Name::scan(data, data).unwrap();
        assert_eq!(name, Name::from_str("example.COM.").unwrap());
        assert!(name != Name::from_str("example.org").unwrap());
        assert!(name != Name::from_str("www.example.com").unwrap());
    }
}
