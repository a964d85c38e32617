//! Collection (CDT) context paths and index values
//!
//! An operation dict may carry a `ctx` list describing how to descend into
//! nested lists and maps before the operation applies. Each item is a dict
//! `{"id": <selector id>, "value": <selector value>}`.

use crate::converter::Converter;
use valbridge_core::{DbValue, Error, Result, ScratchPool};
use valbridge_host::{HostValue, SerializerPolicy};

/// Operation dict entry holding the context list
pub const CTX_KEY: &str = "ctx";

/// One step of a context path
#[derive(Debug, Clone, PartialEq)]
pub enum CdtContextItem<'a> {
    /// List element by index
    ListIndex(i64),
    /// List element by rank
    ListRank(i64),
    /// List element by value
    ListValue(DbValue<'a>),
    /// Map entry by index
    MapIndex(i64),
    /// Map entry by rank
    MapRank(i64),
    /// Map entry by key
    MapKey(DbValue<'a>),
    /// Map entry by value
    MapValue(DbValue<'a>),
}

impl CdtContextItem<'_> {
    /// Wire id of the selector
    pub fn id(&self) -> u8 {
        match self {
            CdtContextItem::ListIndex(_) => 0x10,
            CdtContextItem::ListRank(_) => 0x11,
            CdtContextItem::ListValue(_) => 0x13,
            CdtContextItem::MapIndex(_) => 0x20,
            CdtContextItem::MapRank(_) => 0x21,
            CdtContextItem::MapKey(_) => 0x22,
            CdtContextItem::MapValue(_) => 0x23,
        }
    }
}

/// An ordered context path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CdtContext<'a> {
    /// Steps, outermost first
    pub items: Vec<CdtContextItem<'a>>,
}

impl<'a> CdtContext<'a> {
    /// Number of steps
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for an empty path
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Converter {
    /// Read the context path of an operation dict
    ///
    /// Returns `Ok(None)` when the operation has no `ctx` entry. Every
    /// malformed item is `InvalidParam`.
    pub fn cdt_ctx_from_host<'a>(
        &self,
        op: &'a HostValue,
        policy: SerializerPolicy,
        pool: &ScratchPool,
    ) -> Result<Option<CdtContext<'a>>> {
        let ctx = match op.get(CTX_KEY) {
            Some(ctx) => ctx,
            None => return Ok(None),
        };
        let items = ctx.as_list().ok_or_else(|| {
            Error::invalid_param(format!("failed to convert {}: not a list", CTX_KEY))
        })?;

        let mut out = CdtContext {
            items: Vec::with_capacity(items.len()),
        };
        for item in items {
            out.items.push(self.ctx_item_from_host(item, policy, pool)?);
        }
        Ok(Some(out))
    }

    fn ctx_item_from_host<'a>(
        &self,
        item: &'a HostValue,
        policy: SerializerPolicy,
        pool: &ScratchPool,
    ) -> Result<CdtContextItem<'a>> {
        let malformed = |what: &str| Error::invalid_param(format!("failed to convert {}: {}", CTX_KEY, what));

        let id = item
            .get("id")
            .and_then(HostValue::as_int)
            .ok_or_else(|| malformed("item needs an integer 'id'"))?;
        let value = item
            .get("value")
            .ok_or_else(|| malformed("item needs a 'value'"))?;

        let int_value = || {
            value
                .as_int()
                .and_then(|v| i64::try_from(v).ok())
                .ok_or_else(|| malformed("selector value must be a 64-bit integer"))
        };
        let db_value = || {
            self.host_to_db(value, policy, pool)
                .map_err(|e| malformed(&e.to_string()))
        };

        Ok(match id {
            0x10 => CdtContextItem::ListIndex(int_value()?),
            0x11 => CdtContextItem::ListRank(int_value()?),
            0x13 => CdtContextItem::ListValue(db_value()?),
            0x20 => CdtContextItem::MapIndex(int_value()?),
            0x21 => CdtContextItem::MapRank(int_value()?),
            0x22 => CdtContextItem::MapKey(db_value()?),
            0x23 => CdtContextItem::MapValue(db_value()?),
            other => return Err(malformed(&format!("unknown ctx operation {:#x}", other))),
        })
    }
}

/// Read an index or offset argument
///
/// Only integers that fit in 64 bits are accepted.
pub fn index_from_host(value: &HostValue) -> Result<i64> {
    let i = value.as_int().ok_or_else(|| {
        Error::invalid_param(format!(
            "offset should be an integer, got {}",
            value.type_name()
        ))
    })?;
    i64::try_from(i)
        .map_err(|_| Error::invalid_param(format!("integer value {} exceeds 64 bits", i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, value: HostValue) -> HostValue {
        HostValue::dict([
            (HostValue::legacy("id"), HostValue::from(id)),
            (HostValue::legacy("value"), value),
        ])
    }

    fn op(ctx: Vec<HostValue>) -> HostValue {
        HostValue::dict([
            (HostValue::legacy("bin"), HostValue::legacy("b")),
            (HostValue::legacy(CTX_KEY), HostValue::List(ctx)),
        ])
    }

    #[test]
    fn test_absent_ctx() {
        let conv = Converter::default();
        let pool = ScratchPool::new();
        let op = HostValue::dict([(HostValue::legacy("bin"), HostValue::legacy("b"))]);
        assert_eq!(
            conv.cdt_ctx_from_host(&op, SerializerPolicy::Native, &pool)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_ctx_items() {
        let conv = Converter::default();
        let pool = ScratchPool::new();
        let op = op(vec![
            item(0x10, HostValue::Int(-1)),
            item(0x22, HostValue::legacy("k")),
            item(0x21, HostValue::Int(0)),
        ]);
        let ctx = conv
            .cdt_ctx_from_host(&op, SerializerPolicy::Native, &pool)
            .unwrap()
            .unwrap();
        assert_eq!(
            ctx.items,
            vec![
                CdtContextItem::ListIndex(-1),
                CdtContextItem::MapKey(DbValue::from("k")),
                CdtContextItem::MapRank(0),
            ]
        );
        assert_eq!(ctx.items[1].id(), 0x22);
    }

    #[test]
    fn test_malformed_ctx() {
        let conv = Converter::default();
        let pool = ScratchPool::new();
        let cases = vec![
            op(vec![item(0x10, HostValue::legacy("x"))]),
            op(vec![item(0x99, HostValue::Int(1))]),
            op(vec![HostValue::dict([(
                HostValue::legacy("id"),
                HostValue::Int(0x10),
            )])]),
            op(vec![HostValue::Int(3)]),
            HostValue::dict([(HostValue::legacy(CTX_KEY), HostValue::Int(1))]),
        ];
        for case in cases {
            let err = conv
                .cdt_ctx_from_host(&case, SerializerPolicy::Native, &pool)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidParam { .. }), "{:?}", case);
        }
    }

    #[test]
    fn test_ctx_value_failure_is_invalid_param() {
        let conv = Converter::default();
        let pool = ScratchPool::new();
        let op = op(vec![
            item(0x13, HostValue::Bool(true)),
            item(0x23, HostValue::Bool(false)),
        ]);
        let err = conv
            .cdt_ctx_from_host(&op, SerializerPolicy::User, &pool)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParam { .. }));
        assert_eq!(pool.live(), 0);
    }

    #[test]
    fn test_index_from_host() {
        assert_eq!(index_from_host(&HostValue::Int(-3)).unwrap(), -3);
        assert!(matches!(
            index_from_host(&HostValue::Int(i128::from(u64::MAX))),
            Err(Error::InvalidParam { .. })
        ));
        assert!(index_from_host(&HostValue::Float(1.0)).is_err());
    }
}
