//! Ports Layer
//!
//! - `inbound`: what the scheduler and composition root call
//! - `outbound`: what the engine depends on

pub mod inbound;
pub mod outbound;

pub use inbound::UpdateEngineApi;
pub use outbound::{
    MockTimeSource, NotificationSink, ShipmentRepository, SystemTimeSource, TimeSource,
};
pub use st_01_geospatial::CityGazetteer;
