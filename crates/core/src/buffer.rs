//! Ownership tags for buffers handed to the native layer
//!
//! A buffer is either owned (released together with the value that holds
//! it), borrowed (a view into caller memory that must never be released by
//! the value), or pooled (returned to a [`ScratchPool`](crate::ScratchPool)
//! slot on release). The tag travels with the buffer; it is never inferred
//! from addresses.

use crate::pool::ScratchBuf;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

/// Who releases a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Freshly allocated, released with its holder
    Owned,
    /// View into caller memory, never released by its holder
    Borrowed,
    /// Occupies a scratch pool slot until released
    Scratch,
}

/// Ownership of a `Cow` buffer
pub fn cow_ownership<T: ?Sized + ToOwned>(cow: &Cow<'_, T>) -> Ownership {
    match cow {
        Cow::Borrowed(_) => Ownership::Borrowed,
        Cow::Owned(_) => Ownership::Owned,
    }
}

/// Raw octets backing a `Bytes` value
pub enum Payload<'a> {
    /// View into caller memory
    Borrowed(&'a [u8]),
    /// Heap buffer owned by the value
    Owned(Vec<u8>),
    /// Buffer taken from a scratch pool
    Scratch(ScratchBuf),
}

impl<'a> Payload<'a> {
    /// The bytes
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Payload::Borrowed(b) => b,
            Payload::Owned(v) => v,
            Payload::Scratch(s) => s.as_slice(),
        }
    }

    /// Who releases this buffer
    pub fn ownership(&self) -> Ownership {
        match self {
            Payload::Borrowed(_) => Ownership::Borrowed,
            Payload::Owned(_) => Ownership::Owned,
            Payload::Scratch(_) => Ownership::Scratch,
        }
    }

    /// Copy into an owned buffer, releasing any pool slot
    pub fn into_owned(self) -> Payload<'static> {
        match self {
            Payload::Borrowed(b) => Payload::Owned(b.to_vec()),
            Payload::Owned(v) => Payload::Owned(v),
            Payload::Scratch(s) => Payload::Owned(s.as_slice().to_vec()),
        }
    }
}

impl Deref for Payload<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

// Cloning never duplicates a pool slot; clones are plain owned copies.
impl Clone for Payload<'_> {
    fn clone(&self) -> Self {
        match self {
            Payload::Borrowed(b) => Payload::Borrowed(b),
            Payload::Owned(v) => Payload::Owned(v.clone()),
            Payload::Scratch(s) => Payload::Owned(s.as_slice().to_vec()),
        }
    }
}

impl PartialEq for Payload<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.ownership(), self.as_slice())
    }
}

impl From<Vec<u8>> for Payload<'static> {
    fn from(v: Vec<u8>) -> Self {
        Payload::Owned(v)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(b: &'a [u8]) -> Self {
        Payload::Borrowed(b)
    }
}
