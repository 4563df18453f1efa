//! Typed arguments for the sensor and member operations.
//!
//! Each struct converts into [`RequestParams`], validating value ranges on the
//! way. Anything left at its default is simply not set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pa_core::error::{PaError, PaResult};

use crate::params::RequestParams;

/// Where a sensor is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Outside,
    Inside,
}

impl LocationType {
    /// Upstream numeric code (0 = outside, 1 = inside).
    pub fn code(&self) -> i64 {
        match self {
            LocationType::Outside => 0,
            LocationType::Inside => 1,
        }
    }
}

/// A geographic rectangle given by its north-west and south-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub nwlng: f64,
    pub nwlat: f64,
    pub selng: f64,
    pub selat: f64,
}

impl BoundingBox {
    pub fn new(nwlng: f64, nwlat: f64, selng: f64, selat: f64) -> Self {
        Self {
            nwlng,
            nwlat,
            selng,
            selat,
        }
    }

    fn validate(&self) -> PaResult<()> {
        check_longitude("nwlng", self.nwlng)?;
        check_latitude("nwlat", self.nwlat)?;
        check_longitude("selng", self.selng)?;
        check_latitude("selat", self.selat)?;
        Ok(())
    }

    fn apply(&self, params: &mut RequestParams) {
        params
            .set("nwlng", self.nwlng)
            .set("nwlat", self.nwlat)
            .set("selng", self.selng)
            .set("selat", self.selat);
    }
}

/// Options for reading a single sensor or a single group member.
#[derive(Debug, Clone, Default)]
pub struct SensorQuery {
    /// Fields to return, in the order the columns should appear.
    pub fields: Vec<String>,
    /// Sensor-specific key for a private device.
    pub read_key: Option<String>,
    /// Correction factor used with the `pm2.5_alt` field.
    pub cf: Option<f64>,
}

/// Member reads accept the same options as single-sensor reads.
pub type MemberQuery = SensorQuery;

impl SensorQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn read_key(mut self, key: impl Into<String>) -> Self {
        self.read_key = Some(key.into());
        self
    }

    pub fn cf(mut self, cf: f64) -> Self {
        self.cf = Some(cf);
        self
    }

    /// Write the set options into `params`.
    pub fn apply(&self, params: &mut RequestParams) -> PaResult<()> {
        if let Some(cf) = self.cf {
            check_finite("cf", cf)?;
        }
        params
            .set_list("fields", &self.fields)
            .set_opt("read_key", self.read_key.clone())
            .set_opt("cf", self.cf);
        Ok(())
    }
}

/// Filters for reading many sensors at once.
#[derive(Debug, Clone, Default)]
pub struct SensorsQuery {
    /// Fields to return, in the order the columns should appear.
    pub fields: Vec<String>,
    pub location_type: Option<LocationType>,
    /// Keys for private devices to include.
    pub read_keys: Vec<String>,
    /// Restrict results to these sensor indices.
    pub show_only: Vec<u64>,
    /// Exclude sensors last modified before this instant.
    pub modified_since: Option<DateTime<Utc>>,
    /// Only include sensors updated within this many seconds.
    pub max_age: Option<u64>,
    pub bounds: Option<BoundingBox>,
    /// Correction factor used with the `pm2.5_alt` field.
    pub cf: Option<f64>,
}

impl SensorsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn location_type(mut self, location_type: LocationType) -> Self {
        self.location_type = Some(location_type);
        self
    }

    pub fn read_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn show_only(mut self, sensor_indices: impl IntoIterator<Item = u64>) -> Self {
        self.show_only = sensor_indices.into_iter().collect();
        self
    }

    pub fn modified_since(mut self, since: DateTime<Utc>) -> Self {
        self.modified_since = Some(since);
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn cf(mut self, cf: f64) -> Self {
        self.cf = Some(cf);
        self
    }

    /// Write the set filters into `params`.
    pub fn apply(&self, params: &mut RequestParams) -> PaResult<()> {
        if let Some(cf) = self.cf {
            check_finite("cf", cf)?;
        }
        if let Some(ref bounds) = self.bounds {
            bounds.validate()?;
        }

        params
            .set_list("fields", &self.fields)
            .set_opt("location_type", self.location_type.map(|l| l.code()))
            .set_list("read_keys", &self.read_keys)
            .set_list("show_only", &self.show_only)
            .set_opt("modified_since", self.modified_since.map(|t| t.timestamp()))
            .set_opt("max_age", self.max_age);
        if let Some(ref bounds) = self.bounds {
            bounds.apply(params);
        }
        params.set_opt("cf", self.cf);
        Ok(())
    }
}

/// A sensor to add to a group.
///
/// Public sensors are added by `sensor_index` or `sensor_id`. Private sensors
/// need `sensor_id` plus the registered `owner_email`, and `location_type` if
/// one was given at registration.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub sensor_index: Option<u64>,
    /// Device id from the sensor label.
    pub sensor_id: Option<String>,
    pub owner_email: Option<String>,
    pub location_type: Option<LocationType>,
}

impl NewMember {
    /// A public sensor identified by its index.
    pub fn by_index(sensor_index: u64) -> Self {
        Self {
            sensor_index: Some(sensor_index),
            ..Self::default()
        }
    }

    /// A sensor identified by the device id on its label.
    pub fn by_id(sensor_id: impl Into<String>) -> Self {
        Self {
            sensor_id: Some(sensor_id.into()),
            ..Self::default()
        }
    }

    pub fn owner_email(mut self, email: impl Into<String>) -> Self {
        self.owner_email = Some(email.into());
        self
    }

    pub fn location_type(mut self, location_type: LocationType) -> Self {
        self.location_type = Some(location_type);
        self
    }

    /// Write the member fields into `params`. Combination rules are enforced
    /// by the encoder.
    pub fn apply(&self, params: &mut RequestParams) {
        params
            .set_opt("sensor_index", self.sensor_index)
            .set_opt("sensor_id", self.sensor_id.clone())
            .set_opt("owner_email", self.owner_email.clone())
            .set_opt("location_type", self.location_type.map(|l| l.code()));
    }
}

fn check_finite(name: &str, value: f64) -> PaResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, format!("must be a finite number, got {value}")))
    }
}

fn check_latitude(name: &str, value: f64) -> PaResult<()> {
    check_finite(name, value)?;
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, format!("latitude {value} is outside [-90, 90]")))
    }
}

fn check_longitude(name: &str, value: f64) -> PaResult<()> {
    check_finite(name, value)?;
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, format!("longitude {value} is outside [-180, 180]")))
    }
}

fn invalid(name: &str, reason: String) -> PaError {
    PaError::InvalidParameter {
        parameter: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use chrono::TimeZone;

    #[test]
    fn test_empty_sensor_query_sets_nothing() {
        let mut params = RequestParams::new();
        SensorQuery::new().apply(&mut params).unwrap();
        assert!(params.is_empty());

        SensorsQuery::new().apply(&mut params).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_sensors_query_encoding() {
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = SensorsQuery::new()
            .fields(["name", "pm2.5"])
            .location_type(LocationType::Outside)
            .show_only([131075, 131079])
            .modified_since(since)
            .max_age(3600);

        let mut params = RequestParams::new();
        query.apply(&mut params).unwrap();

        let names: Vec<&str> = params.names().collect();
        assert_eq!(
            names,
            vec!["fields", "location_type", "show_only", "modified_since", "max_age"]
        );
        assert_eq!(params.get("location_type"), Some(&ParamValue::Int(0)));
        assert_eq!(
            params.get("show_only").map(ParamValue::encode).as_deref(),
            Some("131075,131079")
        );
        assert_eq!(params.get("modified_since"), Some(&ParamValue::Int(1_704_067_200)));
    }

    #[test]
    fn test_bounding_box_sets_all_corners() {
        let query = SensorsQuery::new().bounds(BoundingBox::new(-122.6, 37.9, -122.3, 37.7));
        let mut params = RequestParams::new();
        query.apply(&mut params).unwrap();
        for corner in ["nwlng", "nwlat", "selng", "selat"] {
            assert!(params.contains(corner), "missing {corner}");
        }
    }

    #[test]
    fn test_bounding_box_out_of_range() {
        let query = SensorsQuery::new().bounds(BoundingBox::new(-122.6, 97.0, -122.3, 37.7));
        let err = query.apply(&mut RequestParams::new()).unwrap_err();
        assert!(matches!(
            err,
            PaError::InvalidParameter { ref parameter, .. } if parameter == "nwlat"
        ));
    }

    #[test]
    fn test_non_finite_cf_rejected() {
        let err = SensorQuery::new()
            .cf(f64::NAN)
            .apply(&mut RequestParams::new())
            .unwrap_err();
        assert!(matches!(err, PaError::InvalidParameter { .. }));
    }

    #[test]
    fn test_private_member_fields() {
        let member = NewMember::by_id("AB:CD:EF:01:23:45")
            .owner_email("owner@example.com")
            .location_type(LocationType::Inside);
        let mut params = RequestParams::new();
        member.apply(&mut params);
        assert!(!params.contains("sensor_index"));
        assert_eq!(params.get("location_type"), Some(&ParamValue::Int(1)));
        assert_eq!(
            params.get("owner_email"),
            Some(&ParamValue::Str("owner@example.com".into()))
        );
    }
}
