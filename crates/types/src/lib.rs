pub mod bytes;
pub mod uint;

pub use bytes::Bytes;
pub use uint::{UintExt, U128, U256, U512};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
    
    #[error("Invalid length: expected at most {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, TypesError>;
