//! In-memory gazetteer

use crate::domain::{ReferenceCity, US_CITIES};
use crate::ports::CityGazetteer;

/// Gazetteer backed by a fixed, ordered list of cities.
#[derive(Debug, Clone)]
pub struct StaticGazetteer {
    cities: Vec<ReferenceCity>,
}

impl StaticGazetteer {
    /// Create a gazetteer over the given candidates, keeping their order.
    pub fn new(cities: Vec<ReferenceCity>) -> Self {
        Self { cities }
    }

    /// Create a gazetteer with no candidates. Every lookup yields the
    /// `Unknown` sentinel.
    pub fn empty() -> Self {
        Self { cities: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for StaticGazetteer {
    fn default() -> Self {
        Self::new(US_CITIES.to_vec())
    }
}

impl CityGazetteer for StaticGazetteer {
    fn reference_cities(&self) -> &[ReferenceCity] {
        &self.cities
    }
}
