//! Value conversion between host objects and store values
//!
//! [`Converter`] holds immutable configuration only; every call brings its
//! own [`ScratchPool`], so one converter can be shared across threads.
//!
//! Host to store dispatch is a single `match` whose arms follow a fixed
//! precedence. Booleans are tested before integers, text before bytes,
//! the tagged wrappers before the plain float check, and anything left over
//! goes to the serializer policy.
//!
//! Containers are built atomically: if any child fails, every child
//! converted so far is dropped before the error propagates, which returns
//! their scratch buffers to the pool.

use crate::config::{ConverterConfig, StringMode};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;
use valbridge_core::{
    BytesType, DbBytes, DbValue, Error, ErrorReport, Limits, Payload, Result, ScratchPool,
};
use valbridge_host::{
    Geospatial, HostStr, HostValue, IdentitySerializer, NativeSerializer, Serializer,
    SerializerPolicy,
};

/// Converts values in both directions
pub struct Converter {
    config: ConverterConfig,
    policy: SerializerPolicy,
    string_mode: StringMode,
    limits: Limits,
    user_serializer: Option<Arc<dyn Serializer>>,
}

impl Converter {
    /// Create a converter from a validated configuration
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Converter {
            policy: config.serializer_policy()?,
            string_mode: config.string_mode()?,
            limits: Limits::default(),
            user_serializer: None,
            config,
        })
    }

    /// Register the user serializer
    ///
    /// It serves `SerializerPolicy::User` on write and `Blob` bytes on read.
    pub fn with_user_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.user_serializer = Some(serializer);
        self
    }

    /// Replace the conversion limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The configuration this converter was built from
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The configured default serializer policy
    pub fn default_policy(&self) -> SerializerPolicy {
        self.policy
    }

    /// Active limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// A fresh scratch pool sized from the configuration
    pub fn new_pool(&self) -> ScratchPool {
        ScratchPool::with_capacity(self.config.pool_capacity)
    }

    // ========================================================================
    // Host -> store
    // ========================================================================

    /// Convert a host value into a store value
    ///
    /// The result may borrow text and byte payloads from `value`.
    pub fn host_to_db<'a>(
        &self,
        value: &'a HostValue,
        policy: SerializerPolicy,
        pool: &ScratchPool,
    ) -> Result<DbValue<'a>> {
        self.to_db(value, policy, pool, 0)
    }

    /// Convert the value argument of a single-bin operation
    ///
    /// Same as [`Converter::host_to_db`] except that a top-level `ByteArray`
    /// is stored as a borrowed `Blob` without going through the serializer.
    /// Byte arrays nested inside containers are still serialized.
    pub fn op_value_to_db<'a>(
        &self,
        value: &'a HostValue,
        policy: SerializerPolicy,
        pool: &ScratchPool,
    ) -> Result<DbValue<'a>> {
        match value {
            HostValue::ByteArray(b) => Ok(DbValue::Bytes(DbBytes::new(
                Payload::Borrowed(b.as_slice()),
                BytesType::Blob,
            ))),
            other => self.to_db(other, policy, pool, 0),
        }
    }

    fn to_db<'a>(
        &self,
        value: &'a HostValue,
        policy: SerializerPolicy,
        pool: &ScratchPool,
        depth: usize,
    ) -> Result<DbValue<'a>> {
        match value {
            HostValue::Bool(_) => self.serialize(value, policy, pool),
            HostValue::Int(i) => i64::try_from(*i).map(DbValue::Integer).map_err(|_| {
                Error::invalid_param(format!("integer {} does not fit in 64 bits", i))
            }),
            HostValue::Unicode(s) => Ok(DbValue::String(Cow::Owned(s.to_utf8()?))),
            HostValue::Str(s) => Ok(DbValue::String(Cow::Borrowed(s.as_str()))),
            HostValue::Bytes(b) => Ok(DbValue::Bytes(DbBytes::new(
                Payload::Borrowed(b.as_slice()),
                BytesType::Blob,
            ))),
            HostValue::Geospatial(geo) => {
                if self.config.geo_enabled {
                    Ok(DbValue::GeoJson(Cow::Owned(geo.dumps()?)))
                } else {
                    debug!("geo support disabled, serializing geospatial data");
                    self.serialize(&geo.to_host(), policy, pool)
                }
            }
            HostValue::ByteArray(_) => self.serialize(value, policy, pool),
            HostValue::List(items) => {
                self.limits.validate_depth(depth + 1)?;
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.to_db(item, policy, pool, depth + 1)?);
                }
                Ok(DbValue::List(out))
            }
            HostValue::Dict(entries) => {
                self.limits.validate_depth(depth + 1)?;
                let mut out = Vec::with_capacity(entries.len());
                for (k, v) in entries {
                    let key = self.to_db(k, policy, pool, depth + 1)?;
                    let val = self.to_db(v, policy, pool, depth + 1)?;
                    out.push((key, val));
                }
                Ok(DbValue::Map(out))
            }
            HostValue::None | HostValue::DbNull => Ok(DbValue::null()),
            HostValue::Wildcard => Ok(DbValue::wildcard()),
            HostValue::Infinity => Ok(DbValue::infinity()),
            HostValue::Float(f) => Ok(DbValue::Double(*f)),
            HostValue::Tuple(_) | HostValue::Object { .. } => self.serialize(value, policy, pool),
        }
    }

    /// Route a value through the serializer policy into a pooled buffer
    fn serialize<'a>(
        &self,
        value: &HostValue,
        policy: SerializerPolicy,
        pool: &ScratchPool,
    ) -> Result<DbValue<'a>> {
        debug!(
            host_type = value.type_name(),
            policy = policy.name(),
            "serializing value"
        );
        let data = match policy {
            SerializerPolicy::Identity => IdentitySerializer.serialize(value)?,
            SerializerPolicy::Native => NativeSerializer.serialize(value)?,
            SerializerPolicy::User => self
                .user_serializer
                .as_ref()
                .ok_or_else(|| Error::client("no user serializer registered"))?
                .serialize(value)?,
            SerializerPolicy::None => {
                return Err(Error::invalid_param(format!(
                    "cannot store {} without a serializer",
                    value.type_name()
                )))
            }
        };
        let buf = pool.take(data)?;
        Ok(DbValue::Bytes(DbBytes::new(
            Payload::Scratch(buf),
            policy.subtype(),
        )))
    }

    // ========================================================================
    // Store -> host
    // ========================================================================

    /// Convert a store value into a host value
    pub fn db_to_host(&self, value: &DbValue<'_>) -> Result<HostValue> {
        self.to_host(value, 0)
    }

    pub(crate) fn to_host(&self, value: &DbValue<'_>, depth: usize) -> Result<HostValue> {
        match value {
            DbValue::Integer(i) => Ok(HostValue::Int(*i as i128)),
            DbValue::Double(d) => Ok(HostValue::Float(*d)),
            DbValue::String(s) => Ok(self.string_to_host(s)),
            DbValue::Bytes(b) => self.bytes_to_host(b),
            DbValue::List(items) => {
                self.check_read_depth(depth + 1)?;
                items
                    .iter()
                    .map(|item| self.to_host(item, depth + 1))
                    .collect::<Result<Vec<_>>>()
                    .map(HostValue::List)
            }
            DbValue::Map(entries) => {
                self.check_read_depth(depth + 1)?;
                let mut out = Vec::with_capacity(entries.len());
                for (k, v) in entries {
                    let key = self.to_host(k, depth + 1)?;
                    if !key.is_hashable() {
                        return Err(Error::client(format!(
                            "map key of type {} cannot be a dict key",
                            key.type_name()
                        )));
                    }
                    out.push((key, self.to_host(v, depth + 1)?));
                }
                Ok(HostValue::Dict(out))
            }
            DbValue::GeoJson(text) => Geospatial::loads(text).map(HostValue::Geospatial),
            DbValue::Null(_) => Ok(HostValue::None),
            DbValue::Wildcard(_) => Ok(HostValue::Wildcard),
            DbValue::Infinity(_) => Ok(HostValue::Infinity),
            DbValue::Record(record) => {
                self.check_read_depth(depth + 1)?;
                self.record_to_host(record, None, false, depth + 1)
            }
        }
    }

    /// Like [`Converter::db_to_host`], but a top-level list is read as
    /// alternating key/value items
    pub fn db_to_host_flattened(&self, value: &DbValue<'_>) -> Result<HostValue> {
        self.to_host_flattened(value, 0)
    }

    pub(crate) fn to_host_flattened(
        &self,
        value: &DbValue<'_>,
        depth: usize,
    ) -> Result<HostValue> {
        match value {
            DbValue::List(items) => self.pairs_to_host(items, depth),
            other => self.to_host(other, depth),
        }
    }

    /// Rebuild `[k1, v1, k2, v2]` as `[(k1, v1), (k2, v2)]`
    ///
    /// An odd number of items is `ClientInternal`.
    pub fn flatten_pairs(&self, items: &[DbValue<'_>]) -> Result<HostValue> {
        self.pairs_to_host(items, 0)
    }

    fn pairs_to_host(&self, items: &[DbValue<'_>], depth: usize) -> Result<HostValue> {
        if items.len() % 2 != 0 {
            return Err(Error::client(format!(
                "cannot pair up a list of {} items",
                items.len()
            )));
        }
        self.check_read_depth(depth + 1)?;
        items
            .chunks_exact(2)
            .map(|pair| {
                Ok(HostValue::Tuple(vec![
                    self.to_host(&pair[0], depth + 1)?,
                    self.to_host(&pair[1], depth + 1)?,
                ]))
            })
            .collect::<Result<Vec<_>>>()
            .map(HostValue::List)
    }

    /// Depth check for the read path, reported as `ClientInternal`
    fn check_read_depth(&self, depth: usize) -> Result<()> {
        if depth > self.limits.max_nesting_depth {
            return Err(Error::client(format!(
                "stored value nested {} levels deep, limit is {}",
                depth, self.limits.max_nesting_depth
            )));
        }
        Ok(())
    }

    fn string_to_host(&self, s: &str) -> HostValue {
        match self.string_mode {
            StringMode::Legacy if s.is_ascii() => HostValue::Str(s.to_string()),
            StringMode::Legacy | StringMode::Unicode => HostValue::Unicode(HostStr::from(s)),
        }
    }

    fn bytes_to_host(&self, bytes: &DbBytes<'_>) -> Result<HostValue> {
        match bytes.subtype {
            BytesType::Native => NativeSerializer.deserialize(bytes.as_slice(), bytes.subtype),
            BytesType::Blob => match &self.user_serializer {
                Some(user) => user.deserialize(bytes.as_slice(), bytes.subtype),
                None => Ok(HostValue::Bytes(bytes.as_slice().to_vec())),
            },
            _ => Ok(HostValue::Bytes(bytes.as_slice().to_vec())),
        }
    }

    /// Render an error report as the host exception tuple
    /// `(code, message, file, line, in_doubt)`
    pub fn error_to_host(&self, report: &ErrorReport) -> HostValue {
        HostValue::Tuple(vec![
            HostValue::Int(report.code as i128),
            HostValue::unicode(&report.message),
            HostValue::None,
            HostValue::None,
            HostValue::Bool(report.in_doubt),
        ])
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter {
            config: ConverterConfig::default(),
            policy: SerializerPolicy::Native,
            string_mode: StringMode::Unicode,
            limits: Limits::default(),
            user_serializer: None,
        }
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .field("limits", &self.limits)
            .field("user_serializer", &self.user_serializer.is_some())
            .finish()
    }
}

/// Borrow or transcode host text
///
/// `Str` is borrowed, `Unicode` is transcoded into an owned buffer. Any
/// other type is `InvalidParam`, naming `what` was expected.
pub(crate) fn host_text<'a>(value: &'a HostValue, what: &str) -> Result<Cow<'a, str>> {
    match value {
        HostValue::Str(s) => Ok(Cow::Borrowed(s.as_str())),
        HostValue::Unicode(u) => Ok(Cow::Owned(u.to_utf8()?)),
        other => Err(Error::invalid_param(format!(
            "{} must be a string, got {}",
            what,
            other.type_name()
        ))),
    }
}
