use crate::accessors::GeoUtils;
use crate::error::AccessError;
use fhir_model::Address;
use serde::Serialize;
use std::fmt;

pub const GEO_LOCATION_URI: &str = "http://hl7.org/fhir/StructureDefinition/geolocation";

const LATITUDE_URL: &str = "latitude";
const LONGITUDE_URL: &str = "longitude";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AccessError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AccessError::malformed(format!(
                "latitude {} is out of range",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AccessError::malformed(format!(
                "longitude {} is out of range",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Point coordinates in `[longitude,latitude]` order.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.longitude, self.latitude)
    }
}

/// Reads the FHIR geolocation extension of an address.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardGeoUtils;

impl GeoUtils for StandardGeoUtils {
    fn location(&self, address: &Address) -> Result<Option<Location>, AccessError> {
        let Some(geo) = address.extension(GEO_LOCATION_URI) else {
            return Ok(None);
        };

        let coordinate = |url: &str| {
            geo.child(url)
                .and_then(|e| e.value_decimal)
                .ok_or_else(|| {
                    AccessError::malformed(format!("geolocation extension has no {}", url))
                })
        };
        let latitude = coordinate(LATITUDE_URL)?;
        let longitude = coordinate(LONGITUDE_URL)?;

        Location::new(latitude, longitude).map(Some)
    }
}
