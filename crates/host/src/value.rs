//! Host object model
//!
//! [`HostValue`] stands in for whatever a dynamic-language object is. The
//! converter only relies on its capability set: checking which shape a
//! value has and extracting primitives from it.
//!
//! A few distinctions matter to the conversion rules and are kept apart
//! here on purpose:
//! - `Str` (legacy byte-string text) versus `Unicode` (UTF-16 code units
//!   that may hold lone surrogates and can fail to transcode)
//! - `Bytes` (immutable) versus `ByteArray` (mutable)
//! - `None` versus the tagged `DbNull` wrapper
//! - `List` versus `Tuple`
//!
//! Host integers are wider than the store's 64-bit integers so that
//! overflow can be observed rather than wrapped.

use crate::geo::Geospatial;
use serde::{Deserialize, Serialize};
use std::fmt;
use valbridge_core::{Error, Result};

/// Host text as UTF-16 code units
///
/// Not every `HostStr` is valid Unicode: a lone surrogate is representable
/// here but has no UTF-8 encoding.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostStr(Vec<u16>);

impl HostStr {
    /// Wrap raw code units
    pub fn from_units(units: Vec<u16>) -> Self {
        HostStr(units)
    }

    /// The raw code units
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Transcode to UTF-8
    ///
    /// Fails with `UnicodeEncodingFailure` on unpaired surrogates.
    pub fn to_utf8(&self) -> Result<String> {
        String::from_utf16(&self.0).map_err(|_| {
            Error::unicode(format!(
                "text of {} code units is not encodable as UTF-8",
                self.0.len()
            ))
        })
    }
}

impl From<&str> for HostStr {
    fn from(s: &str) -> Self {
        HostStr(s.encode_utf16().collect())
    }
}

impl fmt::Debug for HostStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf16_lossy(&self.0))
    }
}

/// A host-language object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HostValue {
    /// The host's native null
    None,
    /// Boolean
    Bool(bool),
    /// Arbitrary-width integer (modelled as i128)
    Int(i128),
    /// Floating point
    Float(f64),
    /// Legacy byte-string text
    Str(String),
    /// Unicode text
    Unicode(HostStr),
    /// Immutable raw bytes
    Bytes(Vec<u8>),
    /// Mutable byte buffer
    ByteArray(Vec<u8>),
    /// Mutable ordered sequence
    List(Vec<HostValue>),
    /// Immutable ordered sequence
    Tuple(Vec<HostValue>),
    /// Key/value mapping; order carries no meaning
    Dict(Vec<(HostValue, HostValue)>),
    /// Tagged GeoJSON wrapper
    Geospatial(Geospatial),
    /// Tagged "database null" wrapper
    DbNull,
    /// Tagged match-any marker
    Wildcard,
    /// Tagged max-value marker
    Infinity,
    /// Any other object, identified by class name
    Object {
        /// Class name
        class: String,
        /// Opaque object state
        state: Vec<u8>,
    },
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        use HostValue::*;
        match (self, other) {
            (None, None) | (DbNull, DbNull) | (Wildcard, Wildcard) | (Infinity, Infinity) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Unicode(a), Unicode(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (ByteArray(a), ByteArray(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Tuple(a), Tuple(b)) => a == b,
            (Dict(a), Dict(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
            }
            (Geospatial(a), Geospatial(b)) => a == b,
            (
                Object {
                    class: ca,
                    state: sa,
                },
                Object {
                    class: cb,
                    state: sb,
                },
            ) => ca == cb && sa == sb,
            _ => false,
        }
    }
}

impl HostValue {
    /// Unicode text
    pub fn unicode(s: &str) -> Self {
        HostValue::Unicode(HostStr::from(s))
    }

    /// Legacy byte-string text
    pub fn legacy(s: &str) -> Self {
        HostValue::Str(s.to_string())
    }

    /// A mapping from pairs
    pub fn dict(pairs: impl IntoIterator<Item = (HostValue, HostValue)>) -> Self {
        HostValue::Dict(pairs.into_iter().collect())
    }

    /// A tuple from items
    pub fn tuple(items: impl IntoIterator<Item = HostValue>) -> Self {
        HostValue::Tuple(items.into_iter().collect())
    }

    /// Host type name, for error messages
    pub fn type_name(&self) -> &str {
        match self {
            HostValue::None => "None",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) => "int",
            HostValue::Float(_) => "float",
            HostValue::Str(_) => "str",
            HostValue::Unicode(_) => "unicode",
            HostValue::Bytes(_) => "bytes",
            HostValue::ByteArray(_) => "bytearray",
            HostValue::List(_) => "list",
            HostValue::Tuple(_) => "tuple",
            HostValue::Dict(_) => "dict",
            HostValue::Geospatial(_) => "Geospatial",
            HostValue::DbNull => "null",
            HostValue::Wildcard => "CDTWildcard",
            HostValue::Infinity => "CDTInfinite",
            HostValue::Object { class, .. } => class,
        }
    }

    /// Whether the value may be used as a mapping key
    pub fn is_hashable(&self) -> bool {
        match self {
            HostValue::List(_) | HostValue::Dict(_) | HostValue::ByteArray(_) => false,
            HostValue::Tuple(items) => items.iter().all(HostValue::is_hashable),
            _ => true,
        }
    }

    /// True for the host null only; `DbNull` is a distinct value
    pub fn is_none(&self) -> bool {
        matches!(self, HostValue::None)
    }

    /// Get as integer if this is an Int
    pub fn as_int(&self) -> Option<i128> {
        match self {
            HostValue::Int(i) => Some(*i),
            _ => Option::None,
        }
    }

    /// Get the items if this is a List
    pub fn as_list(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::List(items) => Some(items),
            _ => Option::None,
        }
    }

    /// Get the items if this is a Tuple
    pub fn as_tuple(&self) -> Option<&[HostValue]> {
        match self {
            HostValue::Tuple(items) => Some(items),
            _ => Option::None,
        }
    }

    /// Get the entries if this is a Dict
    pub fn as_dict(&self) -> Option<&[(HostValue, HostValue)]> {
        match self {
            HostValue::Dict(entries) => Some(entries),
            _ => Option::None,
        }
    }

    /// True if this is text equal to `s`, in either representation
    pub fn is_text(&self, s: &str) -> bool {
        match self {
            HostValue::Str(t) => t == s,
            HostValue::Unicode(u) => u.units().iter().copied().eq(s.encode_utf16()),
            _ => false,
        }
    }

    /// Look up a Dict entry by text key
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.as_dict()?
            .iter()
            .find(|(k, _)| k.is_text(key))
            .map(|(_, v)| v)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::unicode(s)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<i64> for HostValue {
    fn from(i: i64) -> Self {
        HostValue::Int(i as i128)
    }
}

impl From<i128> for HostValue {
    fn from(i: i128) -> Self {
        HostValue::Int(i)
    }
}

impl From<f64> for HostValue {
    fn from(f: f64) -> Self {
        HostValue::Float(f)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(items: Vec<HostValue>) -> Self {
        HostValue::List(items)
    }
}

impl From<Geospatial> for HostValue {
    fn from(g: Geospatial) -> Self {
        HostValue::Geospatial(g)
    }
}
