//! Host side of valbridge
//!
//! - HostValue / HostStr: the host object model
//! - Geospatial: tagged GeoJSON wrapper
//! - Serializer: plugin boundary for values without a native variant

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geo;
pub mod serializer;
pub mod value;

pub use geo::Geospatial;
pub use serializer::{IdentitySerializer, NativeSerializer, Serializer, SerializerPolicy};
pub use value::{HostStr, HostValue};
