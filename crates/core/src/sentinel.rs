//! Process-wide sentinel singletons
//!
//! `Null`, `Wildcard` and `Infinity` carry no payload. Each exists once per
//! process as a static [`Sentinel`]; values refer to it through a
//! [`SentinelRef`] handle that bumps an atomic reference count on creation
//! and releases it on drop. The statics are never mutated beyond the count.
//!
//! Wildcard and Infinity are only meaningful in comparison and filter
//! contexts. Their identity is structural: two handles are the same sentinel
//! when they point at the same static, see [`SentinelRef::ptr_eq`].

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which sentinel a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentinelKind {
    /// The null value
    Null,
    /// Match-any comparison marker
    Wildcard,
    /// Max-value comparison marker
    Infinity,
}

/// A process-wide singleton with a reference count
pub struct Sentinel {
    kind: SentinelKind,
    refs: AtomicUsize,
}

impl Sentinel {
    const fn new(kind: SentinelKind) -> Self {
        Sentinel {
            kind,
            refs: AtomicUsize::new(0),
        }
    }

    /// Which sentinel this is
    pub fn kind(&self) -> SentinelKind {
        self.kind
    }

    /// Number of live handles
    pub fn refs(&self) -> usize {
        self.refs.load(Ordering::Acquire)
    }
}

/// The null singleton
pub static NULL: Sentinel = Sentinel::new(SentinelKind::Null);
/// The wildcard singleton
pub static WILDCARD: Sentinel = Sentinel::new(SentinelKind::Wildcard);
/// The infinity singleton
pub static INFINITY: Sentinel = Sentinel::new(SentinelKind::Infinity);

/// Counted handle to one of the sentinel statics
pub struct SentinelRef(&'static Sentinel);

impl SentinelRef {
    /// Reserve a handle to the given sentinel
    pub fn reserve(kind: SentinelKind) -> Self {
        let sentinel = match kind {
            SentinelKind::Null => &NULL,
            SentinelKind::Wildcard => &WILDCARD,
            SentinelKind::Infinity => &INFINITY,
        };
        sentinel.refs.fetch_add(1, Ordering::AcqRel);
        SentinelRef(sentinel)
    }

    /// Handle to the null singleton
    pub fn null() -> Self {
        Self::reserve(SentinelKind::Null)
    }

    /// Handle to the wildcard singleton
    pub fn wildcard() -> Self {
        Self::reserve(SentinelKind::Wildcard)
    }

    /// Handle to the infinity singleton
    pub fn infinity() -> Self {
        Self::reserve(SentinelKind::Infinity)
    }

    /// Which sentinel this handle refers to
    pub fn kind(&self) -> SentinelKind {
        self.0.kind
    }

    /// The static behind this handle
    pub fn sentinel(&self) -> &'static Sentinel {
        self.0
    }

    /// True if both handles refer to the same static
    pub fn ptr_eq(a: &SentinelRef, b: &SentinelRef) -> bool {
        std::ptr::eq(a.0, b.0)
    }
}

impl Clone for SentinelRef {
    fn clone(&self) -> Self {
        self.0.refs.fetch_add(1, Ordering::AcqRel);
        SentinelRef(self.0)
    }
}

impl Drop for SentinelRef {
    fn drop(&mut self) {
        self.0.refs.fetch_sub(1, Ordering::AcqRel);
    }
}

impl PartialEq for SentinelRef {
    fn eq(&self, other: &Self) -> bool {
        SentinelRef::ptr_eq(self, other)
    }
}

impl fmt::Debug for SentinelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.kind)
    }
}
