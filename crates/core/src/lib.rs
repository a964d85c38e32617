//! Core types for valbridge
//!
//! This crate defines the native side of the conversion layer:
//! - DbValue: closed variant type for stored values
//! - Sentinels: process-wide Null, Wildcard and Infinity singletons
//! - Key: record identity (namespace, set, identifier or digest)
//! - Record: bins plus metadata
//! - Privilege, Role, User: admin-plane entities
//! - UdfFile: registered UDF modules
//! - ScratchPool / Payload / Ownership: buffer lifetime tracking
//! - Limits: bin-name and nesting limits
//! - Error: the conversion error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod admin;
pub mod buffer;
pub mod error;
pub mod key;
pub mod limits;
pub mod pool;
pub mod record;
pub mod sentinel;
pub mod udf;
pub mod value;

pub use admin::{Privilege, PrivilegeCode, Role, User, ROLE_NAME_MAX_LEN};
pub use buffer::{cow_ownership, Ownership, Payload};
pub use error::{Error, ErrorKind, ErrorReport, Result};
pub use key::{Digest, IdentifierKind, Key, KeyId, DIGEST_SIZE};
pub use limits::{Limits, BIN_NAME_MAX_LEN, DEFAULT_MAX_NESTING_DEPTH};
pub use pool::{ScratchBuf, ScratchPool, DEFAULT_POOL_CAPACITY};
pub use record::{Bin, Metadata, Record};
pub use sentinel::{Sentinel, SentinelKind, SentinelRef};
pub use udf::{UdfFile, UdfType, UDF_FILE_HASH_SIZE};
pub use value::{BytesType, DbBytes, DbValue};
