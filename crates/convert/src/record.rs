//! Record shaping
//!
//! Write path: a host bins dict plus optional metadata dict becomes a
//! [`Record`]. Read path: a record becomes the host tuple
//! `(key, meta, bins)`.
//!
//! Assembly is all-or-nothing. The first failing bin, or invalid metadata
//! after every bin succeeded, drops the partially built record.

use crate::converter::{host_text, Converter};
use crate::key::key_to_host;
use std::borrow::Cow;
use tracing::trace;
use valbridge_core::{Error, Key, Metadata, Record, Result, ScratchPool};
use valbridge_host::{HostValue, SerializerPolicy};

/// One entry of a batch read: the requested key and the record, if found
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRead<'a> {
    /// Requested key
    pub key: Key<'a>,
    /// The record, or `None` when it was not found
    pub record: Option<Record<'a>>,
}

impl<'a> BatchRead<'a> {
    /// A batch entry whose record was found
    pub fn found(key: Key<'a>, record: Record<'a>) -> Self {
        BatchRead {
            key,
            record: Some(record),
        }
    }

    /// A batch entry whose record was not found
    pub fn missing(key: Key<'a>) -> Self {
        BatchRead { key, record: None }
    }
}

impl Converter {
    /// Build a record from a host bins dict and optional metadata dict
    pub fn assemble_record<'a>(
        &self,
        bins: &'a HostValue,
        meta: Option<&'a HostValue>,
        policy: SerializerPolicy,
        pool: &ScratchPool,
    ) -> Result<Record<'a>> {
        let entries = bins.as_dict().ok_or_else(|| {
            Error::invalid_param(format!("record must be a dict, got {}", bins.type_name()))
        })?;

        let mut record = Record::with_capacity(entries.len());
        for (name, value) in entries {
            let name = self.bin_name_from_host(name)?;
            trace!(bin = %name, host_type = value.type_name(), "converting bin");
            let value = self.host_to_db(value, policy, pool)?;
            record.set(name, value);
        }

        if let Some(metadata) = metadata_from_host(meta)? {
            record.metadata = metadata;
        }
        Ok(record)
    }

    /// Convert a host bin name
    ///
    /// In strict-types mode the name is checked against the store limit.
    pub fn bin_name_from_host<'a>(&self, name: &'a HostValue) -> Result<Cow<'a, str>> {
        let name = host_text(name, "bin name")?;
        if self.config().strict_types {
            self.limits().validate_bin_name(&name)?;
        }
        Ok(name)
    }

    /// Convert the bin name of an operation
    ///
    /// Accepts a `ByteArray` holding UTF-8 text in addition to the text
    /// types, with the same strict-mode length check.
    pub fn op_bin_name_from_host<'a>(&self, name: &'a HostValue) -> Result<Cow<'a, str>> {
        let name = match name {
            HostValue::ByteArray(b) => std::str::from_utf8(b)
                .map(Cow::Borrowed)
                .map_err(|_| Error::invalid_param("bin name bytes are not valid UTF-8"))?,
            other => host_text(other, "bin name")?,
        };
        if self.config().strict_types {
            self.limits().validate_bin_name(&name)?;
        }
        Ok(name)
    }

    /// Render a record as `(key, meta, bins)`
    ///
    /// `key_override` wins over the record's own key.
    pub fn disassemble_record(
        &self,
        record: &Record<'_>,
        key_override: Option<&Key<'_>>,
    ) -> Result<HostValue> {
        self.record_to_host(record, key_override, false, 0)
    }

    /// Like [`Converter::disassemble_record`], reading list bins as
    /// key/value pairs
    pub fn disassemble_record_flattened(
        &self,
        record: &Record<'_>,
        key_override: Option<&Key<'_>>,
    ) -> Result<HostValue> {
        self.record_to_host(record, key_override, true, 0)
    }

    pub(crate) fn record_to_host(
        &self,
        record: &Record<'_>,
        key_override: Option<&Key<'_>>,
        flatten: bool,
        depth: usize,
    ) -> Result<HostValue> {
        let key = key_override
            .or(record.key.as_ref())
            .map(key_to_host)
            .unwrap_or(HostValue::None);
        let meta = metadata_to_host(&record.metadata);

        let mut bins = Vec::with_capacity(record.len());
        for bin in &record.bins {
            let value = if flatten {
                self.to_host_flattened(&bin.value, depth)?
            } else {
                self.to_host(&bin.value, depth)?
            };
            bins.push((HostValue::unicode(&bin.name), value));
        }

        Ok(HostValue::Tuple(vec![key, meta, HostValue::Dict(bins)]))
    }

    /// Render operate results as an ordered list of `(name, value)`
    ///
    /// Unlike the bins dict this keeps order and repeated names.
    pub fn operate_bins_to_host(&self, record: &Record<'_>) -> Result<HostValue> {
        record
            .bins
            .iter()
            .map(|bin| {
                Ok(HostValue::Tuple(vec![
                    HostValue::unicode(&bin.name),
                    self.db_to_host(&bin.value)?,
                ]))
            })
            .collect::<Result<Vec<_>>>()
            .map(HostValue::List)
    }

    /// Render batch read results as a list of record tuples
    ///
    /// A missing record renders as `(key, None, None)`.
    pub fn batch_results_to_host(&self, reads: &[BatchRead<'_>]) -> Result<HostValue> {
        reads
            .iter()
            .map(|read| match &read.record {
                Some(record) => self.disassemble_record(record, Some(&read.key)),
                None => Ok(HostValue::Tuple(vec![
                    key_to_host(&read.key),
                    HostValue::None,
                    HostValue::None,
                ])),
            })
            .collect::<Result<Vec<_>>>()
            .map(HostValue::List)
    }
}

/// Validate an optional metadata dict
///
/// `None` and the host null both mean "no metadata". `ttl` must fit in
/// `u32` and `gen` in `u16`; missing entries default to zero.
pub fn metadata_from_host(meta: Option<&HostValue>) -> Result<Option<Metadata>> {
    let meta = match meta {
        None | Some(HostValue::None) => return Ok(None),
        Some(meta) => meta,
    };
    if meta.as_dict().is_none() {
        return Err(Error::invalid_param(format!(
            "metadata must be a dict, got {}",
            meta.type_name()
        )));
    }

    let mut metadata = Metadata::default();
    if let Some(ttl) = meta.get("ttl") {
        metadata.ttl = meta_int(ttl, "ttl")?;
    }
    if let Some(gen) = meta.get("gen") {
        metadata.generation = meta_int(gen, "gen")?;
    }
    Ok(Some(metadata))
}

fn meta_int<T: TryFrom<i128>>(value: &HostValue, field: &str) -> Result<T> {
    let i = value.as_int().ok_or_else(|| {
        Error::invalid_param(format!(
            "metadata '{}' must be an integer, got {}",
            field,
            value.type_name()
        ))
    })?;
    T::try_from(i).map_err(|_| {
        Error::invalid_param(format!("metadata '{}' value {} is out of range", field, i))
    })
}

/// Render metadata as `{"ttl": .., "gen": ..}`
pub fn metadata_to_host(metadata: &Metadata) -> HostValue {
    HostValue::Dict(vec![
        (HostValue::unicode("ttl"), HostValue::Int(metadata.ttl as i128)),
        (
            HostValue::unicode("gen"),
            HostValue::Int(metadata.generation as i128),
        ),
    ])
}
