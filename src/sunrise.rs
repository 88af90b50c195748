use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use log::{debug, trace};

use crate::angles;
use crate::error::{SunError, SunResult};
use crate::timezone::TimezoneResolver;
use crate::types::{
    Coordinate, CoordinatesPayload, DateRange, DateRangePayload, DayRecord, DayResult,
    PolarCondition, RangeResult, SunDataPayload, SunEvent, TimeFormat,
};

pub fn is_polar_day(latitude: f64, date: NaiveDate) -> bool {
    let month = date.month();
    (latitude > 0.0 && (4..=8).contains(&month))
        || (latitude < 0.0 && (month >= 11 || month <= 2))
}

pub fn is_polar_night(latitude: f64, date: NaiveDate) -> bool {
    let month = date.month();
    (latitude > 0.0 && (month >= 11 || month <= 2))
        || (latitude < 0.0 && (5..=8).contains(&month))
}

pub fn classify_polar(latitude: f64, date: NaiveDate) -> PolarCondition {
    if is_polar_day(latitude, date) {
        PolarCondition::PolarDay
    } else {
        if !is_polar_night(latitude, date) {
            trace!(
                "no horizon crossing at latitude {} on {} outside polar months, treating as polar night",
                latitude,
                date
            );
        }
        PolarCondition::PolarNight
    }
}

fn utc_instant(date: NaiveDate, utc_hour: f64) -> SunResult<DateTime<Utc>> {
    let (hour, minute) = angles::split_hour(utc_hour);
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .checked_add_signed(Duration::minutes(i64::from(hour) * 60 + i64::from(minute)))
        .ok_or(SunError::DateOutOfRange(date))
}

pub fn sun_events_utc(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
) -> SunResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let n = angles::julian_day_number(date.year(), date.month(), date.day());
    let rise = angles::sun_geometry(latitude, longitude, n, SunEvent::Sunrise);
    let set = angles::sun_geometry(latitude, longitude, n, SunEvent::Sunset);

    let crosses = |cos_h: f64| (-1.0..=1.0).contains(&cos_h);
    if !crosses(rise.cos_hour_angle) || !crosses(set.cos_hour_angle) {
        return Ok(None);
    }

    let rise_hour = angles::utc_event_hour(&rise, longitude, SunEvent::Sunrise);
    let set_hour = angles::utc_event_hour(&set, longitude, SunEvent::Sunset);
    Ok(Some((utc_instant(date, rise_hour)?, utc_instant(date, set_hour)?)))
}

/// Moves sunset to the next UTC day when it lands before sunrise; if that
/// still spans a full day or more, moves sunrise to the previous day instead.
/// `None` when the shifted instant falls outside chrono's range.
pub fn reconcile_rollover(
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if sunset >= sunrise {
        return Some((sunrise, sunset));
    }
    let full_day = Duration::hours(24);

    let next_sunset = sunset.checked_add_signed(Duration::days(1))?;
    if next_sunset - sunrise < full_day {
        trace!("sunset {} moved to next day", sunset);
        return Some((sunrise, next_sunset));
    }

    let previous_sunrise = sunrise.checked_sub_signed(Duration::days(1))?;
    if sunset - previous_sunrise < full_day {
        trace!("sunrise {} moved to previous day", sunrise);
        return Some((previous_sunrise, sunset));
    }

    Some((sunrise, sunset))
}

pub fn daylight_hours<A: chrono::TimeZone, B: chrono::TimeZone>(
    sunrise: &DateTime<A>,
    sunset: &DateTime<B>,
) -> f64 {
    let seconds = sunset.timestamp() - sunrise.timestamp();
    round_hundredths(seconds as f64 / 3600.0)
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute_day(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    timezone: &Tz,
) -> SunResult<DayResult> {
    let coordinate = Coordinate::new(latitude, longitude)?;
    compute_day_at(&coordinate, date, timezone)
}

fn compute_day_at(
    coordinate: &Coordinate,
    date: NaiveDate,
    timezone: &Tz,
) -> SunResult<DayResult> {
    let events = sun_events_utc(coordinate.latitude, coordinate.longitude, date)?;
    let day = match events {
        Some((rise_utc, set_utc)) => {
            let (rise_utc, set_utc) =
                reconcile_rollover(rise_utc, set_utc).ok_or(SunError::DateOutOfRange(date))?;
            let sunrise = rise_utc.with_timezone(timezone);
            let sunset = set_utc.with_timezone(timezone);
            DayResult {
                date,
                daylight_hours: daylight_hours(&sunrise, &sunset),
                sunrise: Some(sunrise),
                sunset: Some(sunset),
                polar_day: false,
                polar_night: false,
            }
        }
        None => {
            let condition = classify_polar(coordinate.latitude, date);
            DayResult {
                date,
                sunrise: None,
                sunset: None,
                daylight_hours: match condition {
                    PolarCondition::PolarDay => 24.0,
                    PolarCondition::PolarNight => 0.0,
                },
                polar_day: condition == PolarCondition::PolarDay,
                polar_night: condition == PolarCondition::PolarNight,
            }
        }
    };
    Ok(day)
}

pub fn compute_range_in(
    coordinate: &Coordinate,
    start: NaiveDate,
    end: NaiveDate,
    timezone: Tz,
) -> SunResult<RangeResult> {
    if end < start {
        return Err(SunError::InvalidRange { start, end });
    }
    let range = DateRange::new(start, end);
    let day_count = range.day_count();
    debug!(
        "computing {} days at ({}, {}) in {}",
        day_count,
        coordinate.latitude,
        coordinate.longitude,
        timezone.name()
    );

    // `iter_days` stops short of `NaiveDate::MAX`.
    let days = std::iter::successors(Some(start), |date| date.succ_opt())
        .take_while(|date| *date <= end)
        .map(|date| compute_day_at(coordinate, date, &timezone))
        .collect::<SunResult<Vec<_>>>()?;

    Ok(RangeResult {
        coordinate: *coordinate,
        timezone,
        start,
        end,
        day_count,
        days,
    })
}

pub fn format_event(instant: &DateTime<Tz>, format: TimeFormat) -> String {
    match format {
        TimeFormat::Simple => instant.format("%H:%M").to_string(),
        TimeFormat::Iso => instant.to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

impl DayResult {
    pub fn polar_condition(&self) -> Option<PolarCondition> {
        if self.polar_day {
            Some(PolarCondition::PolarDay)
        } else if self.polar_night {
            Some(PolarCondition::PolarNight)
        } else {
            None
        }
    }

    pub fn to_record(&self, format: TimeFormat) -> DayRecord {
        DayRecord {
            date: self.date,
            sunrise: self.sunrise.as_ref().map(|t| format_event(t, format)),
            sunset: self.sunset.as_ref().map(|t| format_event(t, format)),
            daylight_hours: Some(self.daylight_hours),
            polar_day: self.polar_day,
            polar_night: self.polar_night,
        }
    }
}

impl RangeResult {
    pub fn to_payload(&self, format: TimeFormat) -> SunDataPayload {
        SunDataPayload {
            coordinates: CoordinatesPayload {
                lat: self.coordinate.latitude,
                lon: self.coordinate.longitude,
            },
            timezone: self.timezone.name().to_string(),
            date_range: DateRangePayload {
                start: self.start,
                end: self.end,
                days: self.day_count,
            },
            data: self.days.iter().map(|d| d.to_record(format)).collect(),
        }
    }
}

pub struct SolarCalculator<R> {
    resolver: R,
}

impl<R: TimezoneResolver> SolarCalculator<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn compute_day(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> SunResult<DayResult> {
        let coordinate = Coordinate::new(latitude, longitude)?;
        let timezone = self.resolver.resolve(&coordinate);
        compute_day_at(&coordinate, date, &timezone)
    }

    pub fn compute_range(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SunResult<RangeResult> {
        if end < start {
            return Err(SunError::InvalidRange { start, end });
        }
        let coordinate = Coordinate::new(latitude, longitude)?;
        let timezone = self.resolver.resolve(&coordinate);
        compute_range_in(&coordinate, start, end, timezone)
    }

    pub fn sun_data(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
        simple_time_format: bool,
    ) -> SunResult<SunDataPayload> {
        let range = self.compute_range(latitude, longitude, start, end)?;
        Ok(range.to_payload(TimeFormat::from_simple_flag(simple_time_format)))
    }

    pub fn sun_data_current_year(
        &self,
        latitude: f64,
        longitude: f64,
        format: TimeFormat,
    ) -> SunResult<SunDataPayload> {
        let range = DateRange::current_year()?;
        let result = self.compute_range(latitude, longitude, range.start, range.end)?;
        Ok(result.to_payload(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_utc_instant_truncates_minutes() {
        let t = utc_instant(date(2024, 6, 21), 9.999).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 6, 21, 9, 59, 0).unwrap());
    }

    #[test]
    fn test_reconcile_keeps_ordered_pair() {
        let rise = Utc.with_ymd_and_hms(2024, 6, 21, 9, 25, 0).unwrap();
        let set = Utc.with_ymd_and_hms(2024, 6, 21, 20, 31, 0).unwrap();
        assert_eq!(reconcile_rollover(rise, set), Some((rise, set)));
    }

    #[test]
    fn test_reconcile_moves_sunset_forward() {
        let rise = Utc.with_ymd_and_hms(2024, 6, 21, 9, 25, 0).unwrap();
        let set = Utc.with_ymd_and_hms(2024, 6, 21, 0, 31, 0).unwrap();
        let (r, s) = reconcile_rollover(rise, set).unwrap();
        assert_eq!(r, rise);
        assert_eq!(s, Utc.with_ymd_and_hms(2024, 6, 22, 0, 31, 0).unwrap());
    }

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths(15.0833333), 15.08);
        assert_eq!(round_hundredths(12.126), 12.13);
        assert_eq!(round_hundredths(0.0), 0.0);
    }

    #[test]
    fn test_classify_shoulder_month_is_night() {
        assert_eq!(classify_polar(80.0, date(2024, 3, 10)), PolarCondition::PolarNight);
        assert_eq!(classify_polar(80.0, date(2024, 10, 10)), PolarCondition::PolarNight);
        assert_eq!(classify_polar(0.0, date(2024, 6, 10)), PolarCondition::PolarNight);
    }

    #[test]
    fn test_reconcile_at_end_of_calendar() {
        let rise = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let set = NaiveDate::MAX.and_hms_opt(6, 0, 0).unwrap().and_utc();
        assert_eq!(reconcile_rollover(rise, set), None);
    }
}
