use chrono::{DateTime, Datelike, Local, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{SunError, SunResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Rejects NaN, infinities and anything outside [-90,90] x [-180,180].
    pub fn new(latitude: f64, longitude: f64) -> SunResult<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(SunError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

impl SunEvent {
    pub fn event_hour(self) -> f64 {
        match self {
            SunEvent::Sunrise => 6.0,
            SunEvent::Sunset => 18.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCondition {
    PolarDay,
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunGeometry {
    pub approximate_time: f64,
    pub mean_anomaly: f64,
    pub true_longitude: f64,
    pub right_ascension: f64,
    pub sin_declination: f64,
    pub cos_declination: f64,
    pub cos_hour_angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayResult {
    pub date: NaiveDate,
    pub sunrise: Option<DateTime<Tz>>,
    pub sunset: Option<DateTime<Tz>>,
    pub daylight_hours: f64,
    pub polar_day: bool,
    pub polar_night: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeResult {
    pub coordinate: Coordinate,
    pub timezone: Tz,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_count: i64,
    pub days: Vec<DayResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    Simple,
    Iso,
}

impl TimeFormat {
    pub fn from_simple_flag(simple: bool) -> Self {
        if simple {
            TimeFormat::Simple
        } else {
            TimeFormat::Iso
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn for_year(year: i32) -> SunResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| SunError::InvalidDate(format!("{year}-01-01")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| SunError::InvalidDate(format!("{year}-12-31")))?;
        Ok(Self { start, end })
    }

    pub fn current_year() -> SunResult<Self> {
        Self::for_year(Local::now().year())
    }

    pub fn parse(start: &str, end: &str) -> SunResult<Self> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

pub fn parse_date(s: &str) -> SunResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| SunError::InvalidDate(format!("{s}: {e}")))
}

// Wire shapes handed to the HTTP layer.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatesPayload {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangePayload {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub daylight_hours: Option<f64>,
    pub polar_day: bool,
    pub polar_night: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SunDataPayload {
    pub coordinates: CoordinatesPayload,
    pub timezone: String,
    pub date_range: DateRangePayload,
    pub data: Vec<DayRecord>,
}

impl SunDataPayload {
    pub fn to_json(&self) -> SunResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
