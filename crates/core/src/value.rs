//! Database value types
//!
//! This module defines:
//! - DbValue: the closed set of values the native client stores
//! - DbBytes / BytesType: raw octets and their persisted sub-type tag
//!
//! ## Value Model
//!
//! - Exactly one variant is active at a time.
//! - `Integer(1) != Double(1.0)`: different variants are never equal.
//! - `Bytes` are not `String`, and the sub-type tag is part of a `Bytes`
//!   value's identity.
//! - Double uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`.
//! - Map equality ignores entry order.
//! - Null, Wildcard and Infinity are handles to process-wide singletons.
//!
//! Text and byte payloads carry their ownership: a value may borrow from the
//! host object it was converted from for the lifetime `'a`, or own its
//! buffer. [`DbValue::into_owned`] detaches a value from caller memory.

use crate::buffer::{cow_ownership, Ownership, Payload};
use crate::record::Record;
use crate::sentinel::{SentinelKind, SentinelRef};
use std::borrow::Cow;

/// Sub-type tag stored alongside `Bytes`
///
/// The tag is persisted with the value and selects the deserializer on
/// read-back, independently of how the value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BytesType {
    /// No type information
    Undef = 0,
    /// Encoded integer
    Integer = 1,
    /// Encoded double
    Double = 2,
    /// Encoded string
    String = 3,
    /// Opaque bytes (raw buffers and user serializers)
    Blob = 4,
    /// Java serialization
    Java = 7,
    /// C# serialization
    CSharp = 8,
    /// Host-native serialization
    Native = 9,
    /// Ruby serialization
    Ruby = 10,
    /// PHP serialization
    Php = 11,
    /// Erlang serialization
    Erlang = 12,
    /// Packed map
    Map = 19,
    /// Packed list
    List = 20,
    /// GeoJSON text
    GeoJson = 23,
}

impl BytesType {
    /// Numeric tag as persisted by the store
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a persisted tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => BytesType::Undef,
            1 => BytesType::Integer,
            2 => BytesType::Double,
            3 => BytesType::String,
            4 => BytesType::Blob,
            7 => BytesType::Java,
            8 => BytesType::CSharp,
            9 => BytesType::Native,
            10 => BytesType::Ruby,
            11 => BytesType::Php,
            12 => BytesType::Erlang,
            19 => BytesType::Map,
            20 => BytesType::List,
            23 => BytesType::GeoJson,
            _ => return None,
        })
    }
}

/// Raw octets with a sub-type tag
#[derive(Debug, Clone, PartialEq)]
pub struct DbBytes<'a> {
    /// The octets and who releases them
    pub payload: Payload<'a>,
    /// Persisted sub-type
    pub subtype: BytesType,
}

impl<'a> DbBytes<'a> {
    /// Create a tagged byte value
    pub fn new(payload: Payload<'a>, subtype: BytesType) -> Self {
        DbBytes { payload, subtype }
    }

    /// The octets
    pub fn as_slice(&self) -> &[u8] {
        self.payload.as_slice()
    }

    /// Who releases the octets
    pub fn ownership(&self) -> Ownership {
        self.payload.ownership()
    }
}

/// A value as the native client stores it
#[derive(Debug, Clone)]
pub enum DbValue<'a> {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point (IEEE-754)
    Double(f64),
    /// UTF-8 text, owned or borrowed
    String(Cow<'a, str>),
    /// Tagged raw octets
    Bytes(DbBytes<'a>),
    /// Ordered sequence
    List(Vec<DbValue<'a>>),
    /// Key/value pairs; order carries no meaning
    Map(Vec<(DbValue<'a>, DbValue<'a>)>),
    /// GeoJSON text
    GeoJson(Cow<'a, str>),
    /// The null singleton
    Null(SentinelRef),
    /// Match-any comparison marker
    Wildcard(SentinelRef),
    /// Max-value comparison marker
    Infinity(SentinelRef),
    /// A nested record
    Record(Box<Record<'a>>),
}

impl PartialEq for DbValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DbValue::Integer(a), DbValue::Integer(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (DbValue::Double(a), DbValue::Double(b)) => a == b,
            (DbValue::String(a), DbValue::String(b)) => a == b,
            (DbValue::Bytes(a), DbValue::Bytes(b)) => a == b,
            (DbValue::List(a), DbValue::List(b)) => a == b,
            (DbValue::Map(a), DbValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(bk, bv)| bk == k && bv == v)
                    })
            }
            (DbValue::GeoJson(a), DbValue::GeoJson(b)) => a == b,
            (DbValue::Null(_), DbValue::Null(_)) => true,
            (DbValue::Wildcard(_), DbValue::Wildcard(_)) => true,
            (DbValue::Infinity(_), DbValue::Infinity(_)) => true,
            (DbValue::Record(a), DbValue::Record(b)) => a == b,
            // Different variants are never equal
            _ => false,
        }
    }
}

impl<'a> DbValue<'a> {
    /// A new handle to the null singleton
    pub fn null() -> Self {
        DbValue::Null(SentinelRef::null())
    }

    /// A new handle to the wildcard singleton
    pub fn wildcard() -> Self {
        DbValue::Wildcard(SentinelRef::wildcard())
    }

    /// A new handle to the infinity singleton
    pub fn infinity() -> Self {
        DbValue::Infinity(SentinelRef::infinity())
    }

    /// Owned bytes with a sub-type
    pub fn bytes(data: Vec<u8>, subtype: BytesType) -> Self {
        DbValue::Bytes(DbBytes::new(Payload::Owned(data), subtype))
    }

    /// Owned opaque bytes
    pub fn blob(data: Vec<u8>) -> Self {
        Self::bytes(data, BytesType::Blob)
    }

    /// Get the variant name
    pub fn type_name(&self) -> &'static str {
        match self {
            DbValue::Integer(_) => "Integer",
            DbValue::Double(_) => "Double",
            DbValue::String(_) => "String",
            DbValue::Bytes(_) => "Bytes",
            DbValue::List(_) => "List",
            DbValue::Map(_) => "Map",
            DbValue::GeoJson(_) => "GeoJson",
            DbValue::Null(_) => "Null",
            DbValue::Wildcard(_) => "Wildcard",
            DbValue::Infinity(_) => "Infinity",
            DbValue::Record(_) => "Record",
        }
    }

    /// The sentinel behind a Null, Wildcard or Infinity value
    pub fn sentinel(&self) -> Option<&SentinelRef> {
        match self {
            DbValue::Null(s) | DbValue::Wildcard(s) | DbValue::Infinity(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null(_))
    }

    /// Check if this is a comparison-only marker (Wildcard or Infinity)
    pub fn is_query_only(&self) -> bool {
        matches!(
            self.sentinel().map(SentinelRef::kind),
            Some(SentinelKind::Wildcard | SentinelKind::Infinity)
        )
    }

    /// Get as i64 if this is an Integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DbValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Double value
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DbValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DbValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the tagged bytes if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&DbBytes<'a>> {
        match self {
            DbValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the elements if this is a List value
    pub fn as_list(&self) -> Option<&[DbValue<'a>]> {
        match self {
            DbValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get the entries if this is a Map value
    pub fn as_map(&self) -> Option<&[(DbValue<'a>, DbValue<'a>)]> {
        match self {
            DbValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Ownership of the top-level buffer, if this variant has one
    pub fn ownership(&self) -> Option<Ownership> {
        match self {
            DbValue::String(s) | DbValue::GeoJson(s) => Some(cow_ownership(s)),
            DbValue::Bytes(b) => Some(b.ownership()),
            _ => None,
        }
    }

    /// Detach from caller memory and any scratch pool
    pub fn into_owned(self) -> DbValue<'static> {
        match self {
            DbValue::Integer(i) => DbValue::Integer(i),
            DbValue::Double(d) => DbValue::Double(d),
            DbValue::String(s) => DbValue::String(Cow::Owned(s.into_owned())),
            DbValue::Bytes(b) => DbValue::Bytes(DbBytes::new(b.payload.into_owned(), b.subtype)),
            DbValue::List(l) => DbValue::List(l.into_iter().map(DbValue::into_owned).collect()),
            DbValue::Map(m) => DbValue::Map(
                m.into_iter()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
            ),
            DbValue::GeoJson(g) => DbValue::GeoJson(Cow::Owned(g.into_owned())),
            DbValue::Null(s) => DbValue::Null(s),
            DbValue::Wildcard(s) => DbValue::Wildcard(s),
            DbValue::Infinity(s) => DbValue::Infinity(s),
            DbValue::Record(r) => DbValue::Record(Box::new(r.into_owned())),
        }
    }
}

// ============================================================================
// From implementations for ergonomic construction
// ============================================================================

impl From<i64> for DbValue<'_> {
    fn from(i: i64) -> Self {
        DbValue::Integer(i)
    }
}

impl From<f64> for DbValue<'_> {
    fn from(d: f64) -> Self {
        DbValue::Double(d)
    }
}

impl<'a> From<&'a str> for DbValue<'a> {
    fn from(s: &'a str) -> Self {
        DbValue::String(Cow::Borrowed(s))
    }
}

impl From<String> for DbValue<'_> {
    fn from(s: String) -> Self {
        DbValue::String(Cow::Owned(s))
    }
}

impl<'a> From<Vec<DbValue<'a>>> for DbValue<'a> {
    fn from(l: Vec<DbValue<'a>>) -> Self {
        DbValue::List(l)
    }
}

impl From<()> for DbValue<'_> {
    fn from(_: ()) -> Self {
        DbValue::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ScratchPool;

    #[test]
    fn test_value_integer() {
        let value = DbValue::Integer(42);
        assert!(matches!(value, DbValue::Integer(42)));
        assert_eq!(value.as_int(), Some(42));
        assert_eq!(value.as_double(), None);
    }

    #[test]
    fn test_value_string_ownership() {
        let text = String::from("hello");
        let borrowed = DbValue::from(text.as_str());
        let owned = DbValue::from(text.clone());
        assert_eq!(borrowed, owned);
        assert_eq!(borrowed.ownership(), Some(Ownership::Borrowed));
        assert_eq!(owned.ownership(), Some(Ownership::Owned));
    }

    #[test]
    fn test_bytes_subtype_is_part_of_identity() {
        let a = DbValue::bytes(vec![1, 2], BytesType::Blob);
        let b = DbValue::bytes(vec![1, 2], BytesType::Native);
        assert_ne!(a, b);
        assert_eq!(a, DbValue::blob(vec![1, 2]));
    }

    #[test]
    fn test_integer_not_equal_double() {
        assert_ne!(DbValue::Integer(1), DbValue::Double(1.0));
    }

    #[test]
    fn test_nan_not_equal_nan() {
        assert_ne!(DbValue::Double(f64::NAN), DbValue::Double(f64::NAN));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(DbValue::Double(-0.0), DbValue::Double(0.0));
    }

    #[test]
    fn test_bytes_not_equal_string() {
        let s = DbValue::from("hello");
        let b = DbValue::blob(b"hello".to_vec());
        assert_ne!(s, b);
    }

    #[test]
    fn test_map_equality_order_independent() {
        let m1 = DbValue::Map(vec![
            (DbValue::from("a"), DbValue::Integer(1)),
            (DbValue::from("b"), DbValue::Integer(2)),
        ]);
        let m2 = DbValue::Map(vec![
            (DbValue::from("b"), DbValue::Integer(2)),
            (DbValue::from("a"), DbValue::Integer(1)),
        ]);
        assert_eq!(m1, m2);
    }

    #[test]
    fn test_map_inequality_extra_entry() {
        let m1 = DbValue::Map(vec![(DbValue::from("a"), DbValue::Integer(1))]);
        let m2 = DbValue::Map(vec![
            (DbValue::from("a"), DbValue::Integer(1)),
            (DbValue::from("b"), DbValue::Integer(2)),
        ]);
        assert_ne!(m1, m2);
    }

    #[test]
    fn test_sentinel_variants() {
        assert!(DbValue::null().is_null());
        assert!(!DbValue::null().is_query_only());
        assert!(DbValue::wildcard().is_query_only());
        assert!(DbValue::infinity().is_query_only());
        assert_ne!(DbValue::wildcard(), DbValue::infinity());
        assert_eq!(DbValue::wildcard(), DbValue::wildcard());
        assert!(DbValue::Integer(0).sentinel().is_none());
    }

    #[test]
    fn test_null_not_equal_to_other_types() {
        assert_ne!(DbValue::null(), DbValue::Integer(0));
        assert_ne!(DbValue::null(), DbValue::Double(0.0));
        assert_ne!(DbValue::null(), DbValue::from(""));
        assert_ne!(DbValue::null(), DbValue::List(vec![]));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(DbValue::Integer(1).type_name(), "Integer");
        assert_eq!(DbValue::Double(1.0).type_name(), "Double");
        assert_eq!(DbValue::from("").type_name(), "String");
        assert_eq!(DbValue::blob(vec![]).type_name(), "Bytes");
        assert_eq!(DbValue::List(vec![]).type_name(), "List");
        assert_eq!(DbValue::Map(vec![]).type_name(), "Map");
        assert_eq!(DbValue::GeoJson("{}".into()).type_name(), "GeoJson");
        assert_eq!(DbValue::null().type_name(), "Null");
        assert_eq!(DbValue::wildcard().type_name(), "Wildcard");
        assert_eq!(DbValue::infinity().type_name(), "Infinity");
    }

    #[test]
    fn test_into_owned_detaches() {
        let text = String::from("borrowed");
        let raw = vec![1u8, 2, 3];
        let value = DbValue::List(vec![
            DbValue::from(text.as_str()),
            DbValue::Bytes(DbBytes::new(Payload::Borrowed(&raw), BytesType::Blob)),
        ]);
        let owned: DbValue<'static> = value.into_owned();
        drop(text);
        drop(raw);

        let items = owned.as_list().unwrap();
        assert_eq!(items[0].as_str(), Some("borrowed"));
        assert_eq!(items[0].ownership(), Some(Ownership::Owned));
        assert_eq!(items[1].ownership(), Some(Ownership::Owned));
    }

    #[test]
    fn test_into_owned_returns_pool_slot() {
        let pool = ScratchPool::new();
        let buf = pool.take(vec![1]).unwrap();
        let value = DbValue::Bytes(DbBytes::new(Payload::Scratch(buf), BytesType::Native));
        assert_eq!(pool.live(), 1);
        let owned = value.into_owned();
        assert_eq!(pool.live(), 0);
        assert_eq!(owned.as_bytes().unwrap().subtype, BytesType::Native);
    }

    #[test]
    fn test_bytes_type_tags() {
        for t in [
            BytesType::Undef,
            BytesType::Blob,
            BytesType::Native,
            BytesType::GeoJson,
            BytesType::List,
        ] {
            assert_eq!(BytesType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(BytesType::Blob.tag(), 4);
        assert_eq!(BytesType::Native.tag(), 9);
        assert_eq!(BytesType::from_tag(5), None);
    }

    #[test]
    fn test_from_unit_is_null() {
        let v: DbValue<'_> = ().into();
        assert!(v.is_null());
    }

    #[test]
    fn test_nested_list_equality() {
        let inner = DbValue::List(vec![DbValue::Integer(1), DbValue::Integer(2)]);
        let v1 = DbValue::List(vec![inner.clone(), DbValue::null()]);
        let v2 = DbValue::List(vec![inner, DbValue::null()]);
        assert_eq!(v1, v2);
    }
}
