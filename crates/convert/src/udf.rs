//! UDF module listings

use valbridge_core::UdfFile;
use valbridge_host::HostValue;

/// Render a UDF file as `{"name", "hash", "type", "content"}`
///
/// Hash and content come back as byte arrays.
pub fn udf_file_to_host(file: &UdfFile) -> HostValue {
    HostValue::Dict(vec![
        (HostValue::unicode("name"), HostValue::unicode(&file.name)),
        (HostValue::unicode("hash"), HostValue::ByteArray(file.hash.to_vec())),
        (HostValue::unicode("type"), HostValue::Int(file.udf_type.code() as i128)),
        (HostValue::unicode("content"), HostValue::ByteArray(file.content.clone())),
    ])
}

/// Render a UDF listing as a list of file dicts, in order
pub fn udf_files_to_host(files: &[UdfFile]) -> HostValue {
    HostValue::List(files.iter().map(udf_file_to_host).collect())
}
