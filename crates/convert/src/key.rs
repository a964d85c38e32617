//! Key identity resolution
//!
//! A key is built from a namespace, an optional set, and either a user
//! identifier or a 20-byte digest. When both are supplied the identifier
//! wins and the digest is ignored.

use crate::converter::host_text;
use std::borrow::Cow;
use tracing::debug;
use valbridge_core::{Digest, Error, Key, KeyId, Result, DIGEST_SIZE};
use valbridge_host::HostValue;

/// Build a key from its host parts
///
/// A host `None` for `set`, `identifier` or `digest` counts as absent.
pub fn resolve_key<'a>(
    namespace: &'a HostValue,
    set: Option<&'a HostValue>,
    identifier: Option<&'a HostValue>,
    digest: Option<&'a HostValue>,
) -> Result<Key<'a>> {
    let namespace = host_text(namespace, "namespace")?;
    let set = match present(set) {
        Some(set) => Some(host_text(set, "set")?),
        None => None,
    };

    let id = match (present(identifier), present(digest)) {
        (Some(identifier), digest) => {
            if digest.is_some() {
                debug!(namespace = %namespace, "key has both identifier and digest, ignoring digest");
            }
            key_id_from_host(identifier)?
        }
        (None, Some(digest)) => KeyId::Digest(digest_from_host(digest)?),
        (None, None) => {
            return Err(Error::invalid_param(
                "key requires either an identifier or a digest",
            ))
        }
    };

    Ok(Key::new(namespace, set, id))
}

fn present(value: Option<&HostValue>) -> Option<&HostValue> {
    value.filter(|v| !v.is_none())
}

fn key_id_from_host(value: &HostValue) -> Result<KeyId<'_>> {
    match value {
        HostValue::Str(s) => Ok(KeyId::String(Cow::Borrowed(s.as_str()))),
        HostValue::Unicode(u) => Ok(KeyId::String(Cow::Owned(u.to_utf8()?))),
        HostValue::Int(i) => i64::try_from(*i).map(KeyId::Integer).map_err(|_| {
            Error::invalid_param(format!("integer key {} does not fit in 64 bits", i))
        }),
        HostValue::Bytes(b) | HostValue::ByteArray(b) => {
            if b.is_empty() {
                return Err(Error::invalid_param("byte key must not be empty"));
            }
            Ok(KeyId::Bytes(Cow::Borrowed(b.as_slice())))
        }
        other => Err(Error::invalid_param(format!(
            "key must be a string, integer or bytes, got {}",
            other.type_name()
        ))),
    }
}

fn digest_from_host(value: &HostValue) -> Result<Digest> {
    match value {
        HostValue::Bytes(b) | HostValue::ByteArray(b) => Digest::from_slice(b).ok_or_else(|| {
            Error::invalid_param(format!(
                "digest must be {} bytes, got {}",
                DIGEST_SIZE,
                b.len()
            ))
        }),
        other => Err(Error::invalid_param(format!(
            "digest must be bytes, got {}",
            other.type_name()
        ))),
    }
}

/// Build a key from a host tuple or dict
///
/// Accepted shapes: `(ns, set, key)`, `(ns, set, key, digest)`, or a dict
/// with `ns`, `set`, `key` and `digest` entries.
pub fn key_from_host(value: &HostValue) -> Result<Key<'_>> {
    match value {
        HostValue::Tuple(items) if items.len() == 3 || items.len() == 4 => {
            resolve_key(&items[0], Some(&items[1]), Some(&items[2]), items.get(3))
        }
        HostValue::Tuple(items) => Err(Error::invalid_param(format!(
            "key tuple must have 3 or 4 items, got {}",
            items.len()
        ))),
        HostValue::Dict(_) => {
            let namespace = value
                .get("ns")
                .ok_or_else(|| Error::invalid_param("key dict requires 'ns'"))?;
            resolve_key(namespace, value.get("set"), value.get("key"), value.get("digest"))
        }
        other => Err(Error::invalid_param(format!(
            "key must be a tuple or dict, got {}",
            other.type_name()
        ))),
    }
}

/// Render a key as `(ns, set, key, digest)`
///
/// Missing parts render as `None`, including an empty namespace or set.
/// The digest renders as a byte array.
pub fn key_to_host(key: &Key<'_>) -> HostValue {
    let text = |s: &str| {
        if s.is_empty() {
            HostValue::None
        } else {
            HostValue::unicode(s)
        }
    };
    let namespace = text(key.namespace.as_ref());
    let set = key.set.as_deref().map(text).unwrap_or(HostValue::None);
    let (user_key, digest) = match &key.id {
        KeyId::String(s) => (HostValue::unicode(s), HostValue::None),
        KeyId::Integer(i) => (HostValue::Int(*i as i128), HostValue::None),
        KeyId::Bytes(b) => (HostValue::ByteArray(b.to_vec()), HostValue::None),
        KeyId::Digest(d) => (HostValue::None, HostValue::ByteArray(d.as_bytes().to_vec())),
    };
    HostValue::Tuple(vec![namespace, set, user_key, digest])
}
