//! GeoJSON wrapper
//!
//! A [`Geospatial`] holds parsed GeoJSON. It serializes as its text form so
//! that non-self-describing codecs (bincode) can carry it.

use crate::value::{HostStr, HostValue};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use valbridge_core::{Error, Result};

/// Tagged GeoJSON value
#[derive(Debug, Clone, PartialEq)]
pub struct Geospatial {
    data: JsonValue,
}

impl Geospatial {
    /// Wrap parsed GeoJSON data
    pub fn new(data: JsonValue) -> Self {
        Geospatial { data }
    }

    /// The parsed data
    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    /// Render as GeoJSON text
    pub fn dumps(&self) -> Result<String> {
        serde_json::to_string(&self.data)
            .map_err(|e| Error::client(format!("cannot render GeoJSON: {}", e)))
    }

    /// Parse GeoJSON text
    ///
    /// Fails with `ClientInternal`: stored GeoJSON that does not parse is a
    /// state the client cannot recover from.
    pub fn loads(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map(Geospatial::new)
            .map_err(|e| Error::client(format!("cannot parse GeoJSON: {}", e)))
    }

    /// The data as plain host values
    pub fn to_host(&self) -> HostValue {
        json_to_host(&self.data)
    }
}

fn json_to_host(value: &JsonValue) -> HostValue {
    match value {
        JsonValue::Null => HostValue::None,
        JsonValue::Bool(b) => HostValue::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                HostValue::Int(i as i128)
            } else if let Some(u) = n.as_u64() {
                HostValue::Int(u as i128)
            } else {
                HostValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => HostValue::Unicode(HostStr::from(s.as_str())),
        JsonValue::Array(items) => HostValue::List(items.iter().map(json_to_host).collect()),
        JsonValue::Object(map) => HostValue::Dict(
            map.iter()
                .map(|(k, v)| (HostValue::unicode(k), json_to_host(v)))
                .collect(),
        ),
    }
}

impl Serialize for Geospatial {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let text = self.dumps().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Geospatial {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Geospatial::loads(&text).map_err(serde::de::Error::custom)
    }
}
