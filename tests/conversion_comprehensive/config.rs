//! Configuration-driven behavior

use tempfile::TempDir;
use valbridge::{
    Converter, ConverterConfig, DbValue, HostValue, SerializerPolicy, StringMode,
    CONFIG_FILE_NAME,
};

#[test]
fn default_toml_file_builds_a_converter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, ConverterConfig::default_toml()).unwrap();

    let config = ConverterConfig::from_file(&path).unwrap();
    let conv = Converter::new(config).unwrap();
    assert_eq!(conv.default_policy(), SerializerPolicy::Native);
    assert_eq!(conv.new_pool().capacity(), 4096);
}

#[test]
fn legacy_string_mode() {
    let config = ConverterConfig::from_toml_str("string_mode = \"legacy\"").unwrap();
    assert_eq!(config.string_mode().unwrap(), StringMode::Legacy);
    let conv = Converter::new(config).unwrap();

    assert_eq!(
        conv.db_to_host(&DbValue::from("plain")).unwrap(),
        HostValue::legacy("plain")
    );
    assert_eq!(
        conv.db_to_host(&DbValue::from("ünïcode")).unwrap(),
        HostValue::unicode("ünïcode")
    );
}

#[test]
fn pool_capacity_from_config() {
    let conv = Converter::new(ConverterConfig::from_toml_str("pool_capacity = 1").unwrap()).unwrap();
    let pool = conv.new_pool();
    let two = HostValue::List(vec![HostValue::Bool(true), HostValue::Bool(false)]);
    assert!(conv
        .host_to_db(&two, SerializerPolicy::Native, &pool)
        .is_err());
    assert_eq!(pool.live(), 0);
}

#[test]
fn invalid_config_is_rejected_before_use() {
    let config = ConverterConfig {
        serializer: "yaml".to_string(),
        ..ConverterConfig::default()
    };
    assert!(Converter::new(config).is_err());
}
