//! Observed weather snapshots.

use serde::{Deserialize, Serialize};

use crate::condition::WeatherAttribute;

/// One set of observed weather values, fetched at evaluation time.
///
/// Fields are optional so that a snapshot missing a watched attribute is a
/// defined lookup failure in the comparator rather than a parse failure at
/// the provider boundary. A well-formed provider response populates all
/// three.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
}

impl WeatherSnapshot {
    /// Look up the observed value for a watched attribute.
    pub fn value_of(&self, attribute: WeatherAttribute) -> Option<f64> {
        match attribute {
            WeatherAttribute::Temp => self.temperature,
            WeatherAttribute::Pressure => self.pressure,
            WeatherAttribute::Humidity => self.humidity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_of_maps_each_attribute() {
        let snapshot = WeatherSnapshot {
            temperature: Some(25.0),
            pressure: Some(1000.0),
            humidity: Some(50.0),
        };
        assert_eq!(snapshot.value_of(WeatherAttribute::Temp), Some(25.0));
        assert_eq!(snapshot.value_of(WeatherAttribute::Pressure), Some(1000.0));
        assert_eq!(snapshot.value_of(WeatherAttribute::Humidity), Some(50.0));
    }

    #[test]
    fn value_of_missing_attribute_is_none() {
        let snapshot = WeatherSnapshot {
            temperature: Some(25.0),
            ..Default::default()
        };
        assert_eq!(snapshot.value_of(WeatherAttribute::Humidity), None);
    }
}
