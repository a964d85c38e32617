//! Records: named bins plus metadata
//!
//! A [`Record`] holds an optional [`Key`], an ordered list of bins and the
//! record [`Metadata`]. Setting a bin whose name already exists replaces the
//! value in place, matching how the store treats a record as a bin map.

use crate::buffer::{cow_ownership, Ownership};
use crate::key::Key;
use crate::value::DbValue;
use std::borrow::Cow;

/// Record metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Metadata {
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Generation counter
    pub generation: u16,
}

/// A named value within a record
#[derive(Debug, Clone, PartialEq)]
pub struct Bin<'a> {
    /// Bin name
    pub name: Cow<'a, str>,
    /// Bin value
    pub value: DbValue<'a>,
}

impl<'a> Bin<'a> {
    /// Create a bin
    pub fn new(name: impl Into<Cow<'a, str>>, value: DbValue<'a>) -> Self {
        Bin {
            name: name.into(),
            value,
        }
    }

    /// Who releases the name buffer
    pub fn name_ownership(&self) -> Ownership {
        cow_ownership(&self.name)
    }
}

/// A record entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record<'a> {
    /// Record identity, if known
    pub key: Option<Key<'a>>,
    /// Bins in insertion order
    pub bins: Vec<Bin<'a>>,
    /// TTL and generation
    pub metadata: Metadata,
}

impl<'a> Record<'a> {
    /// Create an empty record with room for `capacity` bins
    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            key: None,
            bins: Vec::with_capacity(capacity),
            metadata: Metadata::default(),
        }
    }

    /// Attach a key
    pub fn with_key(mut self, key: Key<'a>) -> Self {
        self.key = Some(key);
        self
    }

    /// Set a bin, replacing any bin of the same name
    pub fn set(&mut self, name: impl Into<Cow<'a, str>>, value: DbValue<'a>) {
        let name = name.into();
        match self.bins.iter_mut().find(|b| b.name == name) {
            Some(bin) => bin.value = value,
            None => self.bins.push(Bin { name, value }),
        }
    }

    /// Look up a bin value by name
    pub fn get(&self, name: &str) -> Option<&DbValue<'a>> {
        self.bins.iter().find(|b| b.name == name).map(|b| &b.value)
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True if the record has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> Record<'static> {
        Record {
            key: self.key.map(Key::into_owned),
            bins: self
                .bins
                .into_iter()
                .map(|b| Bin {
                    name: Cow::Owned(b.name.into_owned()),
                    value: b.value.into_owned(),
                })
                .collect(),
            metadata: self.metadata,
        }
    }
}
