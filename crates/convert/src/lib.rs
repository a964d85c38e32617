//! Conversion layer for valbridge
//!
//! - Converter: host value <-> store value, with serializer dispatch
//! - Record shaping: bins + metadata <-> `(key, meta, bins)`
//! - Key resolution: namespace, set, identifier or digest
//! - Admin conversions: privileges, roles, users
//! - CDT context paths and index arguments
//! - UDF module listings
//! - ConverterConfig: `valbridge.toml` settings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod admin;
pub mod cdt;
pub mod config;
pub mod converter;
pub mod key;
pub mod record;
pub mod udf;

pub use admin::{
    privileges_from_host, privileges_to_host, role_to_host, roles_to_host, strings_from_host,
    strings_to_host, user_to_host, users_to_host,
};
pub use cdt::{index_from_host, CdtContext, CdtContextItem, CTX_KEY};
pub use config::{ConverterConfig, StringMode, CONFIG_FILE_NAME};
pub use converter::Converter;
pub use key::{key_from_host, key_to_host, resolve_key};
pub use record::{metadata_from_host, metadata_to_host, BatchRead};
pub use udf::{udf_file_to_host, udf_files_to_host};
