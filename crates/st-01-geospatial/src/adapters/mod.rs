//! Adapters Layer
//!
//! - `StaticGazetteer` - In-memory candidate list, defaults to `US_CITIES`

pub mod static_gazetteer;

pub use static_gazetteer::StaticGazetteer;
