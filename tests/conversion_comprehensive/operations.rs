//! Single-bin operation arguments through the facade

use crate::common::{converter, dict, strict_converter};
use valbridge::{BytesType, DbValue, ErrorKind, HostValue, SerializerPolicy};

#[test]
fn operation_byte_array_value_is_raw_blob() {
    let conv = converter();
    let pool = conv.new_pool();
    let value = HostValue::ByteArray(b"payload".to_vec());

    let op_value = conv
        .op_value_to_db(&value, SerializerPolicy::Native, &pool)
        .unwrap();
    let bytes = op_value.as_bytes().unwrap();
    assert_eq!(bytes.subtype, BytesType::Blob);
    assert_eq!(bytes.as_slice(), b"payload");

    let stored = conv
        .host_to_db(&value, SerializerPolicy::Native, &pool)
        .unwrap();
    assert_eq!(stored.as_bytes().unwrap().subtype, BytesType::Native);
}

#[test]
fn operation_values_otherwise_match_host_to_db() {
    let conv = converter();
    let pool = conv.new_pool();
    let value = dict(vec![("k", HostValue::List(vec![HostValue::Int(1)]))]);
    let op_value = conv
        .op_value_to_db(&value, SerializerPolicy::Native, &pool)
        .unwrap();
    let stored = conv
        .host_to_db(&value, SerializerPolicy::Native, &pool)
        .unwrap();
    assert_eq!(op_value, stored);
    assert!(matches!(op_value, DbValue::Map(_)));
}

#[test]
fn operation_bin_names() {
    let name = HostValue::ByteArray(b"hits".to_vec());
    assert_eq!(converter().op_bin_name_from_host(&name).unwrap(), "hits");

    let long = HostValue::ByteArray(b"fifteen_letters".to_vec());
    let err = strict_converter().op_bin_name_from_host(&long).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BinNameTooLong);
}
