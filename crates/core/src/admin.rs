//! Admin-plane entities: privileges, roles and users
//!
//! These are flat records with no lifecycle of their own; they exist so the
//! converter can shape admin requests and responses.

use crate::error::{Error, Result};

/// Maximum length of a role or user name, in bytes
pub const ROLE_NAME_MAX_LEN: usize = 64;

/// Privilege codes understood by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrivilegeCode {
    /// Manage users and roles
    UserAdmin = 0,
    /// Manage the cluster
    SysAdmin = 1,
    /// Manage indexes and UDFs
    DataAdmin = 2,
    /// Read records
    Read = 10,
    /// Read and write records
    ReadWrite = 11,
    /// Read, write and run UDFs
    ReadWriteUdf = 12,
    /// Write records
    Write = 13,
}

impl PrivilegeCode {
    /// Numeric code
    pub fn code(self) -> i64 {
        self as u8 as i64
    }
}

impl TryFrom<i64> for PrivilegeCode {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        Ok(match code {
            0 => PrivilegeCode::UserAdmin,
            1 => PrivilegeCode::SysAdmin,
            2 => PrivilegeCode::DataAdmin,
            10 => PrivilegeCode::Read,
            11 => PrivilegeCode::ReadWrite,
            12 => PrivilegeCode::ReadWriteUdf,
            13 => PrivilegeCode::Write,
            other => {
                return Err(Error::invalid_param(format!(
                    "unknown privilege code {}",
                    other
                )))
            }
        })
    }
}

/// A privilege, optionally scoped to a namespace and set
///
/// Empty strings mean "not scoped".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Privilege {
    /// Privilege code
    pub code: PrivilegeCode,
    /// Namespace scope
    pub namespace: String,
    /// Set scope
    pub set: String,
}

impl Privilege {
    /// A privilege with no namespace or set scope
    pub fn global(code: PrivilegeCode) -> Self {
        Privilege {
            code,
            namespace: String::new(),
            set: String::new(),
        }
    }
}

/// A named, ordered collection of privileges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Role name
    pub name: String,
    /// Privileges in order
    pub privileges: Vec<Privilege>,
}

/// A user and the names of its roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User name
    pub name: String,
    /// Role names in order
    pub roles: Vec<String>,
}
