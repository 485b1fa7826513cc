use thiserror::Error;

pub type Result<T> = std::result::Result<T, VarbeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VarbeError {
    #[error("varint truncated: ran out of input after {0} continuation bytes")]
    Truncated(usize),
}
