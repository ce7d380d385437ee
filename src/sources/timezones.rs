use super::common::{self, ApiError};
use log::*;
use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/\
                                       master/geojson/ne_10m_time_zones.geojson";
const ZONE_PROPERTY: &str = "zone";
/// Anything further from UTC than a full day is not a real zone offset.
const MAX_ZONE_OFFSET_HOURS: f64 = 24.0;


#[derive(Deserialize, Debug)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}
impl From<FeatureCollection> for Vec<RawFeature> {
    fn from(collection: FeatureCollection) -> Self {
        collection.features
    }
}

/// One polygon record as it arrives from the dataset. Geometry is never inspected.
#[derive(Deserialize, Debug, Clone)]
pub struct RawFeature {
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}
impl RawFeature {
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }

    /// The `zone` property as a number, whether it was encoded as a decimal string or a JSON number.
    /// Offsets beyond a day in either direction count as unreadable.
    pub fn zone_offset(&self) -> Option<f64> {
        let offset = match self.properties()?.get(ZONE_PROPERTY)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };

        (offset.abs() <= MAX_ZONE_OFFSET_HOURS).then_some(offset)
    }
}

/// What to do with a feature whose `zone` is missing or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingZonePolicy {
    #[default]
    Skip,
    Zero,
}

/// A dataset feature with a usable UTC offset.
#[derive(Debug, Clone, PartialEq)]
pub struct TimezoneFeature {
    pub raw_zone_offset: f64,
    pub geometry: Value,
    pub properties: Map<String, Value>,
}


pub async fn fetch_features(client: &reqwest::Client, url: &str) -> Result<Vec<RawFeature>, ApiError> {
    debug!("Requesting timezone dataset from {}", url);
    common::fetch_json::<Vec<RawFeature>, FeatureCollection>(client, url).await
}

pub fn collect_features(raw_features: Vec<RawFeature>, policy: MissingZonePolicy) -> Vec<TimezoneFeature> {
    raw_features.into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let raw_zone_offset = match (raw.zone_offset(), policy) {
                (Some(offset), _) => offset,
                (None, MissingZonePolicy::Zero) => {
                    warn!("Feature #{} has no readable zone, treating it as UTC", idx);
                    0.0
                },
                (None, MissingZonePolicy::Skip) => {
                    warn!("Feature #{} has no readable zone, leaving it out", idx);
                    return None;
                },
            };

            Some(TimezoneFeature {
                raw_zone_offset,
                geometry: raw.geometry,
                properties: raw.properties.unwrap_or_default(),
            })
        })
        .collect()
}
