//! CDT context paths through the facade

use crate::common::{converter, dict};
use valbridge::{index_from_host, CdtContextItem, DbValue, ErrorKind, HostValue, CTX_KEY};

fn ctx_item(id: i64, value: HostValue) -> HostValue {
    dict(vec![("id", HostValue::from(id)), ("value", value)])
}

#[test]
fn nested_map_then_list_path() {
    let conv = converter();
    let pool = conv.new_pool();
    let op = dict(vec![
        ("op", HostValue::Int(1)),
        (
            CTX_KEY,
            HostValue::List(vec![
                ctx_item(0x22, HostValue::unicode("scores")),
                ctx_item(0x13, HostValue::Int(7)),
                ctx_item(0x23, HostValue::List(vec![HostValue::Int(1)])),
            ]),
        ),
    ]);
    let ctx = conv
        .cdt_ctx_from_host(&op, conv.default_policy(), &pool)
        .unwrap()
        .unwrap();
    assert_eq!(ctx.len(), 3);
    assert_eq!(ctx.items[0], CdtContextItem::MapKey(DbValue::from("scores")));
    assert_eq!(ctx.items[1], CdtContextItem::ListValue(DbValue::Integer(7)));
    assert_eq!(
        ctx.items[2],
        CdtContextItem::MapValue(DbValue::List(vec![DbValue::Integer(1)]))
    );
}

#[test]
fn empty_ctx_list_is_an_empty_path() {
    let conv = converter();
    let pool = conv.new_pool();
    let op = dict(vec![(CTX_KEY, HostValue::List(vec![]))]);
    let ctx = conv
        .cdt_ctx_from_host(&op, conv.default_policy(), &pool)
        .unwrap()
        .unwrap();
    assert!(ctx.is_empty());
}

#[test]
fn index_arguments() {
    assert_eq!(index_from_host(&HostValue::Int(5)).unwrap(), 5);
    assert_eq!(
        index_from_host(&HostValue::unicode("5")).unwrap_err().kind(),
        ErrorKind::InvalidParam
    );
}
