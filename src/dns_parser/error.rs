use thiserror::Error;

/// Error parsing DNS packet
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("packet is smaller than header size")]
    HeaderTooShort,
    #[error("packet has incomplete data")]
    UnexpectedEOF,
    #[error("wrong (too short or too long) size of RDATA")]
    WrongRdataLength,
    #[error("label in domain name has unknown label format")]
    UnknownLabelFormat,
    #[error("invalid characters encountered while reading label")]
    LabelIsNotAscii,
    #[error("compression pointer to offset {0} is outside of the packet")]
    PointerOutOfBounds(usize),
    #[error("more than {0} compression pointers followed while reading name")]
    TooManyPointers(usize),
    #[error("domain name is longer than 255 bytes")]
    NameTooLong,
}

/// Error encoding a domain name given as text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("label {0:?} is longer than 63 bytes")]
    LabelTooLong(String),
    #[error("domain name {0:?} contains an empty label")]
    EmptyLabel(String),
    #[error("domain name {0:?} is longer than 255 bytes")]
    NameTooLong(String),
}
