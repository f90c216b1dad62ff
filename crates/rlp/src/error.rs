use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),
    
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    #[error("Truncated item: needs {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
    
    #[error("Item index {index} out of range for list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    
    #[error("Integer overflow")]
    IntegerOverflow,
    
    #[error("Leading zeros in integer")]
    LeadingZeros,
    
    #[error("Non-canonical long length prefix for {0} bytes")]
    NonCanonicalLength(usize),
    
    #[error("Nesting deeper than {0} levels")]
    DepthExceeded(usize),
    
    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),
    
    #[error("Invalid UTF-8 string")]
    InvalidUtf8,
    
    #[error("Invalid RLP data: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    #[error("Length of length {0} does not fit in a single header byte")]
    LengthOfLengthOverflow(usize),
}

pub type Result<T> = std::result::Result<T, RlpError>;
