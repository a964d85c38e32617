//! Record identity
//!
//! A [`Key`] names a record: namespace, optional set, and exactly one
//! identifier. The identifier is either a user key (string, integer or raw
//! bytes) or a precomputed 20-byte digest. Digests are computed by the
//! native layer, never here.
//!
//! String and byte identifiers carry their ownership. An identifier that was
//! transcoded or duplicated is `Owned` and released with the key; one that
//! views caller memory is `Borrowed` and is never released by the key.

use crate::buffer::{cow_ownership, Ownership};
use std::borrow::Cow;
use std::fmt;

/// Size of a record digest in bytes
pub const DIGEST_SIZE: usize = 20;

/// A 20-byte record digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_SIZE]);

impl Digest {
    /// Build a digest from a slice of exactly [`DIGEST_SIZE`] bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; DIGEST_SIZE]>::try_from(bytes).ok().map(Digest)
    }

    /// The digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

/// Which kind of identifier a key carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// UTF-8 string user key
    String,
    /// Integer user key
    Integer,
    /// Raw byte user key
    Bytes,
    /// Precomputed digest
    Digest,
}

/// The identifying part of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyId<'a> {
    /// String user key
    String(Cow<'a, str>),
    /// Integer user key
    Integer(i64),
    /// Raw byte user key (never empty)
    Bytes(Cow<'a, [u8]>),
    /// Digest only, no user key
    Digest(Digest),
}

impl<'a> KeyId<'a> {
    /// Which kind of identifier this is
    pub fn kind(&self) -> IdentifierKind {
        match self {
            KeyId::String(_) => IdentifierKind::String,
            KeyId::Integer(_) => IdentifierKind::Integer,
            KeyId::Bytes(_) => IdentifierKind::Bytes,
            KeyId::Digest(_) => IdentifierKind::Digest,
        }
    }

    /// Who releases the identifier buffer
    ///
    /// Integers and digests are stored inline and report `Owned`.
    pub fn ownership(&self) -> Ownership {
        match self {
            KeyId::String(s) => cow_ownership(s),
            KeyId::Bytes(b) => cow_ownership(b),
            KeyId::Integer(_) | KeyId::Digest(_) => Ownership::Owned,
        }
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> KeyId<'static> {
        match self {
            KeyId::String(s) => KeyId::String(Cow::Owned(s.into_owned())),
            KeyId::Integer(i) => KeyId::Integer(i),
            KeyId::Bytes(b) => KeyId::Bytes(Cow::Owned(b.into_owned())),
            KeyId::Digest(d) => KeyId::Digest(d),
        }
    }
}

/// Record identity: namespace, optional set, identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key<'a> {
    /// Namespace
    pub namespace: Cow<'a, str>,
    /// Set within the namespace
    pub set: Option<Cow<'a, str>>,
    /// User key or digest
    pub id: KeyId<'a>,
}

impl<'a> Key<'a> {
    /// Create a key
    pub fn new(
        namespace: impl Into<Cow<'a, str>>,
        set: Option<Cow<'a, str>>,
        id: KeyId<'a>,
    ) -> Self {
        Key {
            namespace: namespace.into(),
            set,
            id,
        }
    }

    /// The digest, if this key was built from one
    pub fn digest(&self) -> Option<&Digest> {
        match &self.id {
            KeyId::Digest(d) => Some(d),
            _ => None,
        }
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> Key<'static> {
        Key {
            namespace: Cow::Owned(self.namespace.into_owned()),
            set: self.set.map(|s| Cow::Owned(s.into_owned())),
            id: self.id.into_owned(),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.namespace, self.set.as_deref().unwrap_or(""))?;
        match &self.id {
            KeyId::String(s) => write!(f, "{}", s),
            KeyId::Integer(i) => write!(f, "{}", i),
            KeyId::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            KeyId::Digest(d) => write!(f, "{:?}", d),
        }
    }
}
