//! Admin-plane conversions through the facade

use valbridge::{
    privileges_from_host, privileges_to_host, role_to_host, roles_to_host, strings_from_host,
    strings_to_host, udf_files_to_host, user_to_host, ErrorKind, HostValue, Privilege,
    PrivilegeCode, Role, UdfFile, UdfType, User, ROLE_NAME_MAX_LEN, UDF_FILE_HASH_SIZE,
};

#[test]
fn privileges_round_trip_through_host() {
    let privileges = vec![
        Privilege::global(PrivilegeCode::SysAdmin),
        Privilege {
            code: PrivilegeCode::ReadWriteUdf,
            namespace: "test".to_string(),
            set: "demo".to_string(),
        },
    ];
    let host = privileges_to_host(&privileges);
    assert_eq!(privileges_from_host(&host).unwrap(), privileges);

    let role = Role {
        name: "ops".to_string(),
        privileges: privileges.clone(),
    };
    assert_eq!(role_to_host(&role), host);
    assert_eq!(roles_to_host(&[role]).get("ops"), Some(&host));
}

#[test]
fn user_roles() {
    let user = User {
        name: "ann".to_string(),
        roles: vec!["read".to_string()],
    };
    assert_eq!(
        user_to_host(&user),
        HostValue::List(vec![HostValue::unicode("read")])
    );
    let names = strings_from_host(&user_to_host(&user), ROLE_NAME_MAX_LEN).unwrap();
    assert_eq!(names, user.roles);
    assert_eq!(strings_to_host(&names), user_to_host(&user));
}

#[test]
fn name_lists_fail_as_client_errors() {
    let long = HostValue::List(vec![HostValue::unicode(&"r".repeat(64))]);
    assert_eq!(
        strings_from_host(&long, ROLE_NAME_MAX_LEN)
            .unwrap_err()
            .kind(),
        ErrorKind::ClientInternal
    );
}

#[test]
fn udf_listing_shape() {
    let files = vec![UdfFile {
        name: "agg.lua".to_string(),
        hash: [1; UDF_FILE_HASH_SIZE],
        udf_type: UdfType::Lua,
        content: b"return 1".to_vec(),
    }];
    let host = udf_files_to_host(&files);
    let entry = &host.as_list().unwrap()[0];
    assert!(entry.get("name").unwrap().is_text("agg.lua"));
    assert_eq!(entry.get("type"), Some(&HostValue::Int(0)));
    assert_eq!(
        entry.get("hash"),
        Some(&HostValue::ByteArray(vec![1; UDF_FILE_HASH_SIZE]))
    );
    assert_eq!(
        entry.get("content"),
        Some(&HostValue::ByteArray(b"return 1".to_vec()))
    );
}
