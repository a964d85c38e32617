//! Store-imposed limits
//!
//! The bin-name limit is a database constraint that the converter only
//! surfaces in strict-types mode; lenient mode passes long names through and
//! lets the store decide. Nesting depth is always enforced so that recursive
//! conversion cannot exhaust the stack.

use crate::error::{Error, Result};

/// Maximum bin name length in bytes
pub const BIN_NAME_MAX_LEN: usize = 14;

/// Default maximum nesting depth for lists, maps and records
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Limits applied during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum bin name length (default: 14)
    pub max_bin_name_len: usize,

    /// Maximum container nesting depth (default: 128)
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_bin_name_len: BIN_NAME_MAX_LEN,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl Limits {
    /// Validate a bin name length
    ///
    /// Only called in strict-types mode.
    pub fn validate_bin_name(&self, name: &str) -> Result<()> {
        let len = name.len();
        if len > self.max_bin_name_len {
            return Err(Error::BinNameTooLong {
                name: name.to_string(),
                len,
                max: self.max_bin_name_len,
            });
        }
        Ok(())
    }

    /// Validate a nesting depth reached during conversion
    pub fn validate_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_nesting_depth {
            return Err(Error::invalid_param(format!(
                "value nested {} levels deep, limit is {}",
                depth, self.max_nesting_depth
            )));
        }
        Ok(())
    }
}
