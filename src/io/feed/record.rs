//! Wire record of the live JSON feed.
//!
//! ```json
//! { "car_distance": 0.25, "scans": [0, 812.0, 815.5, ...] }
//! ```
//!
//! `scans[d]` is the reading at degree `d`. Producers are not strict about
//! types, so decoding is lenient where it can be without guessing:
//! - `car_distance` may be a number or a numeric string; missing or `null`
//!   means no motion
//! - `null` entries in `scans` mean no return
//! - a missing `scans` array is a decode failure

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::Scan;

/// Raw record as found in the feed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Distance traveled since the previous scan.
    #[serde(default, deserialize_with = "lenient_distance")]
    pub car_distance: f32,
    /// Range readings indexed by degree.
    #[serde(deserialize_with = "nullable_ranges")]
    pub scans: Vec<f32>,
}

impl ScanRecord {
    /// Decode a record from the feed's JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl From<ScanRecord> for Scan {
    fn from(record: ScanRecord) -> Self {
        Scan::new(record.scans, record.car_distance)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f32),
    Text(String),
}

fn lenient_distance<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientNumber>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(LenientNumber::Number(v)) => Ok(v),
        Some(LenientNumber::Text(s)) => s
            .trim()
            .parse::<f32>()
            .map_err(|e| serde::de::Error::custom(format!("car_distance {:?}: {}", s, e))),
    }
}

fn nullable_ranges<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let ranges = Vec::<Option<f32>>::deserialize(deserializer)?;
    Ok(ranges.into_iter().map(|r| r.unwrap_or(0.0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_numeric_record() {
        let record = ScanRecord::from_json(r#"{"car_distance": 1.5, "scans": [0, 2, 3.5]}"#)
            .unwrap();
        assert_eq!(record.car_distance, 1.5);
        assert_eq!(record.scans, vec![0.0, 2.0, 3.5]);
    }

    #[test]
    fn test_decode_string_distance() {
        let record = ScanRecord::from_json(r#"{"car_distance": " 0.75 ", "scans": []}"#).unwrap();
        assert_eq!(record.car_distance, 0.75);
    }

    #[test]
    fn test_missing_or_null_distance_means_no_motion() {
        let missing = ScanRecord::from_json(r#"{"scans": [1]}"#).unwrap();
        let null = ScanRecord::from_json(r#"{"car_distance": null, "scans": [1]}"#).unwrap();
        assert_eq!(missing.car_distance, 0.0);
        assert_eq!(null.car_distance, 0.0);
    }

    #[test]
    fn test_null_readings_are_no_return() {
        let record = ScanRecord::from_json(r#"{"car_distance": 0, "scans": [1, null, 2]}"#)
            .unwrap();
        assert_eq!(record.scans, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_partial_write_fails_to_decode() {
        assert!(ScanRecord::from_json(r#"{"car_distance": 1.0, "scans": [1, 2,"#).is_err());
        assert!(ScanRecord::from_json("").is_err());
    }

    #[test]
    fn test_missing_scans_fails_to_decode() {
        assert!(ScanRecord::from_json(r#"{"car_distance": 1.0}"#).is_err());
    }

    #[test]
    fn test_non_numeric_distance_fails_to_decode() {
        assert!(ScanRecord::from_json(r#"{"car_distance": "fast", "scans": []}"#).is_err());
    }

    #[test]
    fn test_record_into_scan() {
        let record = ScanRecord {
            car_distance: 2.0,
            scans: vec![1.0, 0.0],
        };
        let scan: Scan = record.into();
        assert_eq!(scan.distance_traveled, 2.0);
        assert_eq!(scan.ranges, vec![1.0, 0.0]);
        assert!(scan.heading_degrees.is_none());
    }
}
