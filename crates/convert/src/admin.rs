//! Admin-plane conversions: privileges, roles, users and name lists
//!
//! These produce owned values only; admin entities never borrow from the
//! host objects they were read from.

use crate::converter::host_text;
use valbridge_core::{Error, Privilege, PrivilegeCode, Result, Role, User};
use valbridge_host::HostValue;

/// Read a list of privilege dicts
///
/// `code` is mandatory; `ns` and `set` default to empty (unscoped).
pub fn privileges_from_host(value: &HostValue) -> Result<Vec<Privilege>> {
    let items = value.as_list().ok_or_else(|| {
        Error::invalid_param(format!(
            "privileges must be a list, got {}",
            value.type_name()
        ))
    })?;
    items.iter().map(privilege_from_host).collect()
}

fn privilege_from_host(value: &HostValue) -> Result<Privilege> {
    if value.as_dict().is_none() {
        return Err(Error::invalid_param(format!(
            "privilege must be a dict, got {}",
            value.type_name()
        )));
    }
    let code = value
        .get("code")
        .ok_or_else(|| Error::invalid_param("code is a compulsory parameter in privileges"))?;
    let code = code
        .as_int()
        .and_then(|c| i64::try_from(c).ok())
        .ok_or_else(|| Error::invalid_param("privilege code must be an integer"))?;

    let scope = |field: &str| -> Result<String> {
        match value.get(field) {
            None | Some(HostValue::None) => Ok(String::new()),
            Some(v) => Ok(host_text(v, field)?.into_owned()),
        }
    };

    Ok(Privilege {
        code: PrivilegeCode::try_from(code)?,
        namespace: scope("ns")?,
        set: scope("set")?,
    })
}

/// Render privileges as a list of `{"ns", "set", "code"}` dicts
pub fn privileges_to_host(privileges: &[Privilege]) -> HostValue {
    HostValue::List(
        privileges
            .iter()
            .map(|p| {
                HostValue::Dict(vec![
                    (HostValue::unicode("ns"), HostValue::unicode(&p.namespace)),
                    (HostValue::unicode("set"), HostValue::unicode(&p.set)),
                    (HostValue::unicode("code"), HostValue::Int(p.code.code() as i128)),
                ])
            })
            .collect(),
    )
}

/// Render one role as its privilege list
pub fn role_to_host(role: &Role) -> HostValue {
    privileges_to_host(&role.privileges)
}

/// Render roles as a dict of role name to privilege list
pub fn roles_to_host(roles: &[Role]) -> HostValue {
    HostValue::Dict(
        roles
            .iter()
            .map(|r| (HostValue::unicode(&r.name), role_to_host(r)))
            .collect(),
    )
}

/// Render one user as its role name list
pub fn user_to_host(user: &User) -> HostValue {
    strings_to_host(&user.roles)
}

/// Render users as a dict of user name to role name list
pub fn users_to_host(users: &[User]) -> HostValue {
    HostValue::Dict(
        users
            .iter()
            .map(|u| (HostValue::unicode(&u.name), user_to_host(u)))
            .collect(),
    )
}

/// Read a list of names, each shorter than `max_len` bytes
///
/// Every failure here is `ClientInternal`.
pub fn strings_from_host(value: &HostValue, max_len: usize) -> Result<Vec<String>> {
    let items = value
        .as_list()
        .ok_or_else(|| Error::client(format!("not a list: {}", value.type_name())))?;
    items
        .iter()
        .map(|item| {
            let s = match item {
                HostValue::Str(s) => s.clone(),
                HostValue::Unicode(u) => u
                    .to_utf8()
                    .map_err(|_| Error::client("unable to convert unicode string"))?,
                other => {
                    return Err(Error::client(format!(
                        "item is not a string: {}",
                        other.type_name()
                    )))
                }
            };
            if s.len() >= max_len {
                return Err(Error::client(format!(
                    "string of {} bytes exceeds max length {}",
                    s.len(),
                    max_len
                )));
            }
            Ok(s)
        })
        .collect()
}

/// Render names as a list of text
pub fn strings_to_host(strings: &[String]) -> HostValue {
    HostValue::List(strings.iter().map(|s| HostValue::unicode(s)).collect())
}
