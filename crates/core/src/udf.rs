//! Registered UDF module files

use crate::error::{Error, Result};

/// Size of a UDF file content hash, in bytes
pub const UDF_FILE_HASH_SIZE: usize = 20;

/// Language of a UDF module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UdfType {
    /// Lua source
    Lua = 0,
}

impl UdfType {
    /// Numeric type code
    pub fn code(self) -> i64 {
        self as u8 as i64
    }
}

impl TryFrom<i64> for UdfType {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(UdfType::Lua),
            other => Err(Error::invalid_param(format!("unknown UDF type {}", other))),
        }
    }
}

/// A UDF module as listed or fetched from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfFile {
    /// Module file name
    pub name: String,
    /// Content hash
    pub hash: [u8; UDF_FILE_HASH_SIZE],
    /// Module language
    pub udf_type: UdfType,
    /// Module source; empty when only the listing was requested
    pub content: Vec<u8>,
}
