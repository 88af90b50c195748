use chrono_tz::Tz;
use log::warn;
use tzf_rs::DefaultFinder;

use crate::error::{SunError, SunResult};
use crate::types::Coordinate;

pub trait TimezoneResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Tz;
}

pub struct GeoTimezoneResolver {
    finder: DefaultFinder,
}

impl GeoTimezoneResolver {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }

    pub fn zone_name(&self, coordinate: &Coordinate) -> &str {
        self.finder.get_tz_name(coordinate.longitude, coordinate.latitude)
    }
}

impl Default for GeoTimezoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneResolver for GeoTimezoneResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Tz {
        let name = self.zone_name(coordinate);
        if name.is_empty() {
            warn!(
                "no timezone found at ({}, {}), using UTC",
                coordinate.latitude, coordinate.longitude
            );
        }
        zone_or_utc(name)
    }
}

fn zone_or_utc(name: &str) -> Tz {
    if name.is_empty() {
        return Tz::UTC;
    }
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!("timezone {:?} not in tz database, using UTC", name);
            Tz::UTC
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimezoneResolver(pub Tz);

impl TimezoneResolver for FixedTimezoneResolver {
    fn resolve(&self, _coordinate: &Coordinate) -> Tz {
        self.0
    }
}

impl<R: TimezoneResolver + ?Sized> TimezoneResolver for &R {
    fn resolve(&self, coordinate: &Coordinate) -> Tz {
        (**self).resolve(coordinate)
    }
}

pub fn parse_timezone(name: &str) -> SunResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SunError::UnknownTimezone(name.to_string()))
}
