//! Shared helpers for the comprehensive suite

use valbridge::{Converter, ConverterConfig, HostValue};

/// Install a test-writer subscriber once so conversion logs show up with
/// `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// A converter with default configuration
pub fn converter() -> Converter {
    init_tracing();
    Converter::new(ConverterConfig::default()).unwrap()
}

/// A converter with strict type checking
pub fn strict_converter() -> Converter {
    init_tracing();
    Converter::new(ConverterConfig {
        strict_types: true,
        ..ConverterConfig::default()
    })
    .unwrap()
}

/// Build a dict with text keys
pub fn dict(pairs: Vec<(&str, HostValue)>) -> HostValue {
    HostValue::dict(pairs.into_iter().map(|(k, v)| (HostValue::unicode(k), v)))
}
