//! Record assembly and disassembly through the facade

use crate::common::{converter, dict, strict_converter};
use valbridge::{
    metadata_to_host, BatchRead, DbValue, ErrorKind, HostValue, Key, KeyId, Metadata,
    SerializerPolicy,
};

#[test]
fn write_then_read_record() {
    let conv = converter();
    let pool = conv.new_pool();
    let bins = dict(vec![
        ("name", HostValue::unicode("Ann")),
        ("age", HostValue::Int(31)),
        ("score", HostValue::Float(9.5)),
        ("tags", HostValue::List(vec![HostValue::unicode("a"), HostValue::unicode("b")])),
        ("active", HostValue::Bool(true)),
        ("raw", HostValue::Bytes(vec![0, 1, 2])),
        ("missing", HostValue::None),
    ]);
    let meta = dict(vec![("ttl", HostValue::Int(60)), ("gen", HostValue::Int(4))]);

    let record = conv
        .assemble_record(&bins, Some(&meta), SerializerPolicy::Native, &pool)
        .unwrap();
    assert_eq!(record.len(), 7);
    assert_eq!(
        record.metadata,
        Metadata {
            ttl: 60,
            generation: 4
        }
    );
    assert!(record.get("missing").map(DbValue::is_null).unwrap_or(false));

    let host = conv.disassemble_record(&record, None).unwrap();
    let parts = host.as_tuple().unwrap();
    assert_eq!(parts[0], HostValue::None);
    assert_eq!(parts[1], metadata_to_host(&record.metadata));
    assert_eq!(parts[2], bins);
}

#[test]
fn record_key_override() {
    let conv = converter();
    let record = valbridge::Record::default().with_key(Key::new(
        "test",
        None,
        KeyId::Integer(1),
    ));
    let override_key = Key::new("test", None, KeyId::Integer(2));
    let host = conv
        .disassemble_record(&record, Some(&override_key))
        .unwrap();
    assert_eq!(
        host.as_tuple().unwrap()[0].as_tuple().unwrap()[2],
        HostValue::Int(2)
    );
}

#[test]
fn strict_mode_rejects_long_bin_names() {
    let conv = strict_converter();
    let pool = conv.new_pool();
    let ok = dict(vec![("fourteen_chars", HostValue::Int(1))]);
    assert!(conv
        .assemble_record(&ok, None, SerializerPolicy::Native, &pool)
        .is_ok());

    let long = dict(vec![("fifteen_chars__", HostValue::Int(1))]);
    let err = conv
        .assemble_record(&long, None, SerializerPolicy::Native, &pool)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BinNameTooLong);

    let name = HostValue::unicode("fifteen_chars__");
    assert!(conv.bin_name_from_host(&name).is_err());
    assert!(converter().bin_name_from_host(&name).is_ok());
}

#[test]
fn metadata_errors_abort_assembly() {
    let conv = converter();
    let pool = conv.new_pool();
    let bins = dict(vec![("a", HostValue::Bool(true))]);
    for meta in [
        HostValue::List(vec![]),
        dict(vec![("ttl", HostValue::unicode("60"))]),
        dict(vec![("gen", HostValue::Int(-1))]),
        dict(vec![("ttl", HostValue::Int(u32::MAX as i128 + 1))]),
    ] {
        let err = conv
            .assemble_record(&bins, Some(&meta), SerializerPolicy::Native, &pool)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam, "{:?}", meta);
    }
    assert_eq!(pool.live(), 0);
}

#[test]
fn nested_record_value_reads_as_tuple() {
    let conv = converter();
    let mut inner = valbridge::Record::default();
    inner.set("x", DbValue::Integer(1));
    let value = DbValue::Record(Box::new(inner));
    let host = conv.db_to_host(&value).unwrap();
    assert_eq!(host.as_tuple().map(|t| t.len()), Some(3));
}

#[test]
fn batch_and_operate_shapes() {
    let conv = converter();
    let mut found = valbridge::Record::default();
    found.set("v", DbValue::from("x"));

    let reads = vec![
        BatchRead::found(Key::new("test", Some("s".into()), KeyId::Integer(1)), found.clone()),
        BatchRead::missing(Key::new("test", Some("s".into()), KeyId::Integer(2))),
    ];
    let host = conv.batch_results_to_host(&reads).unwrap();
    let items = host.as_list().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0].as_tuple().unwrap()[2],
        dict(vec![("v", HostValue::unicode("x"))])
    );
    assert_eq!(items[1].as_tuple().unwrap()[2], HostValue::None);

    let ops = conv.operate_bins_to_host(&found).unwrap();
    assert_eq!(
        ops,
        HostValue::List(vec![HostValue::tuple([
            HostValue::unicode("v"),
            HostValue::unicode("x")
        ])])
    );
}
