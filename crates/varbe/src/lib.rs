pub mod error;
pub mod varint;

pub use crate::error::{Result, VarbeError};
pub use crate::varint::{
    append_varint, get_varint, put_varint, read_varint, varint_len, MAX_VARINT_LEN,
};
