//! Serializer plugin boundary
//!
//! Host values with no native store variant (booleans, byte arrays, tuples,
//! arbitrary objects) are written as tagged bytes produced by a
//! [`Serializer`]. Which serializer runs on write is chosen by the
//! [`SerializerPolicy`] of the call; which one runs on read is chosen by the
//! persisted [`BytesType`] tag.

use crate::value::HostValue;
use tracing::debug;
use valbridge_core::{BytesType, Error, Result};

/// Converts host values to bytes and back
///
/// Implementations must be thread-safe: one serializer is shared by every
/// call made through a converter.
pub trait Serializer: Send + Sync {
    /// Encode a host value
    fn serialize(&self, value: &HostValue) -> Result<Vec<u8>>;

    /// Decode bytes that were stored with the given sub-type
    fn deserialize(&self, data: &[u8], subtype: BytesType) -> Result<HostValue>;
}

/// Which serializer a write uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializerPolicy {
    /// Byte buffers pass through; everything else is rejected
    Identity,
    /// Host-native encoding
    Native,
    /// The registered user serializer
    User,
    /// Reject every value that needs serializing
    None,
}

impl SerializerPolicy {
    /// Sub-type tag the produced bytes are stored with
    pub fn subtype(self) -> BytesType {
        match self {
            SerializerPolicy::Native => BytesType::Native,
            SerializerPolicy::Identity | SerializerPolicy::User | SerializerPolicy::None => {
                BytesType::Blob
            }
        }
    }

    /// Config name of the policy
    pub fn name(self) -> &'static str {
        match self {
            SerializerPolicy::Identity => "identity",
            SerializerPolicy::Native => "native",
            SerializerPolicy::User => "user",
            SerializerPolicy::None => "none",
        }
    }
}

impl std::str::FromStr for SerializerPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "identity" => Ok(SerializerPolicy::Identity),
            "native" => Ok(SerializerPolicy::Native),
            "user" => Ok(SerializerPolicy::User),
            "none" => Ok(SerializerPolicy::None),
            other => Err(Error::invalid_param(format!(
                "unknown serializer '{}', expected one of identity, native, user, none",
                other
            ))),
        }
    }
}

/// Host-native encoding, backed by bincode
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSerializer;

impl Serializer for NativeSerializer {
    fn serialize(&self, value: &HostValue) -> Result<Vec<u8>> {
        debug!(host_type = value.type_name(), "native serialize");
        bincode::serialize(value).map_err(|e| {
            Error::client(format!("cannot serialize {}: {}", value.type_name(), e))
        })
    }

    fn deserialize(&self, data: &[u8], _subtype: BytesType) -> Result<HostValue> {
        bincode::deserialize(data)
            .map_err(|e| Error::client(format!("cannot deserialize {} bytes: {}", data.len(), e)))
    }
}

/// Pass-through of raw byte buffers
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySerializer;

impl Serializer for IdentitySerializer {
    fn serialize(&self, value: &HostValue) -> Result<Vec<u8>> {
        match value {
            HostValue::Bytes(b) | HostValue::ByteArray(b) => Ok(b.clone()),
            other => Err(Error::invalid_param(format!(
                "identity serializer accepts only byte buffers, got {}",
                other.type_name()
            ))),
        }
    }

    fn deserialize(&self, data: &[u8], _subtype: BytesType) -> Result<HostValue> {
        Ok(HostValue::Bytes(data.to_vec()))
    }
}
