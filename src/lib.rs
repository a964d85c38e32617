//! valbridge - value conversion between a dynamic host runtime and a
//! key-value store
//!
//! Host objects ([`HostValue`]) become store values ([`DbValue`]), records
//! and keys on the write path, and come back on the read path.
//!
//! # Quick Start
//!
//! ```ignore
//! use valbridge::{Converter, ConverterConfig, HostValue};
//!
//! let conv = Converter::new(ConverterConfig::default())?;
//! let pool = conv.new_pool();
//!
//! let value = HostValue::from(42i64);
//! let db = conv.host_to_db(&value, conv.default_policy(), &pool)?;
//! assert_eq!(conv.db_to_host(&db)?, value);
//! ```
//!
//! # Architecture
//!
//! - `valbridge-core`: the store-side value model, keys, records, errors
//! - `valbridge-host`: the host object model and serializers
//! - `valbridge-convert`: the converter, record shaper and key resolver

pub use valbridge_convert::*;
pub use valbridge_core::{
    Bin, BytesType, DbBytes, DbValue, Digest, Error, ErrorKind, ErrorReport, IdentifierKind,
    Key, KeyId, Limits, Metadata, Ownership, Payload, Privilege, PrivilegeCode, Record, Result,
    Role, ScratchPool, SentinelKind, SentinelRef, UdfFile, UdfType, User, DIGEST_SIZE,
    ROLE_NAME_MAX_LEN, UDF_FILE_HASH_SIZE,
};
pub use valbridge_host::{
    Geospatial, HostStr, HostValue, IdentitySerializer, NativeSerializer, Serializer,
    SerializerPolicy,
};
