pub mod angles;
pub mod error;
pub mod sunrise;
pub mod timezone;
pub mod types;

pub use angles::{
    deg_to_rad, julian_day_number, normalize_angle, rad_to_deg, sun_geometry, utc_event_hour,
    DEGREES_PER_HOUR, HORIZON_ALTITUDE,
};

pub use error::{SunError, SunResult};

pub use sunrise::{
    classify_polar, compute_day, compute_range_in, daylight_hours, format_event, is_polar_day,
    is_polar_night, reconcile_rollover, sun_events_utc, SolarCalculator,
};

pub use timezone::{parse_timezone, FixedTimezoneResolver, GeoTimezoneResolver, TimezoneResolver};

pub use types::{
    parse_date, Coordinate, CoordinatesPayload, DateRange, DateRangePayload, DayRecord, DayResult,
    PolarCondition, RangeResult, SunDataPayload, SunEvent, SunGeometry, TimeFormat,
};
