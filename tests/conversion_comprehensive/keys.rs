//! Key resolution through the facade

use valbridge::{
    key_from_host, key_to_host, resolve_key, Digest, ErrorKind, HostValue, IdentifierKind, KeyId,
    Ownership,
};

#[test]
fn identifier_kinds() {
    let ns = HostValue::unicode("test");
    let cases = vec![
        (HostValue::legacy("k"), IdentifierKind::String),
        (HostValue::unicode("k"), IdentifierKind::String),
        (HostValue::Int(-7), IdentifierKind::Integer),
        (HostValue::Bytes(vec![1]), IdentifierKind::Bytes),
        (HostValue::ByteArray(vec![1]), IdentifierKind::Bytes),
    ];
    for (id, kind) in cases {
        let key = resolve_key(&ns, None, Some(&id), None).unwrap();
        assert_eq!(key.id.kind(), kind, "{:?}", id);
    }
}

#[test]
fn borrowed_identifiers_do_not_copy() {
    let ns = HostValue::legacy("test");
    let id = HostValue::Bytes(vec![9; 4]);
    let key = resolve_key(&ns, None, Some(&id), None).unwrap();
    assert_eq!(key.id.ownership(), Ownership::Borrowed);
    assert_eq!(key.namespace.as_ref(), "test");

    let owned = key.into_owned();
    assert_eq!(owned.id.ownership(), Ownership::Owned);
}

#[test]
fn digest_only_key() {
    let tuple = HostValue::tuple([
        HostValue::unicode("test"),
        HostValue::unicode("demo"),
        HostValue::None,
        HostValue::ByteArray(vec![3; 20]),
    ]);
    let key = key_from_host(&tuple).unwrap();
    assert_eq!(key.id, KeyId::Digest(Digest([3; 20])));
    assert_eq!(
        key_to_host(&key),
        HostValue::tuple([
            HostValue::unicode("test"),
            HostValue::unicode("demo"),
            HostValue::None,
            HostValue::ByteArray(vec![3; 20]),
        ])
    );
}

#[test]
fn malformed_keys() {
    let ns = HostValue::unicode("test");
    let bad_digest = HostValue::Bytes(vec![0; 21]);
    assert_eq!(
        resolve_key(&ns, None, None, Some(&bad_digest))
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidParam
    );
    let list_id = HostValue::List(vec![]);
    assert_eq!(
        resolve_key(&ns, None, Some(&list_id), None)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidParam
    );
    assert!(key_from_host(&HostValue::unicode("test:demo:k")).is_err());
}
