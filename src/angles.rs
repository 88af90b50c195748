use crate::types::{SunEvent, SunGeometry};

pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Sun altitude at apparent rise/set: refraction plus the solar semi-diameter.
pub const HORIZON_ALTITUDE: f64 = -0.83;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn normalize_hours(hours: f64) -> f64 {
    hours.rem_euclid(24.0)
}

pub fn julian_day_number(year: i32, month: u32, day: u32) -> i32 {
    let month = month as i32;
    let n1 = 275 * month / 9;
    let n2 = (month + 9) / 12;
    let n3 = 1 + (year.rem_euclid(4) + 2) / 3;
    n1 - n2 * n3 + day as i32 - 30
}

pub fn longitude_hour(longitude: f64) -> f64 {
    longitude / DEGREES_PER_HOUR
}

pub fn approximate_time(n: i32, lng_hour: f64, event: SunEvent) -> f64 {
    n as f64 + (event.event_hour() - lng_hour) / 24.0
}

pub fn mean_anomaly(t: f64) -> f64 {
    0.9856 * t - 3.289
}

pub fn true_longitude(mean_anomaly: f64) -> f64 {
    let m = deg_to_rad(mean_anomaly);
    normalize_angle(mean_anomaly + 1.916 * m.sin() + 0.020 * (2.0 * m).sin() + 282.634)
}

pub fn right_ascension(true_longitude: f64) -> f64 {
    let ra = rad_to_deg((0.91764 * deg_to_rad(true_longitude).tan()).atan());
    let l_quadrant = (true_longitude / 90.0).floor() * 90.0;
    let ra_quadrant = (ra / 90.0).floor() * 90.0;
    (ra + l_quadrant - ra_quadrant) / DEGREES_PER_HOUR
}

pub fn declination(true_longitude: f64) -> (f64, f64) {
    let sin_dec = 0.39782 * deg_to_rad(true_longitude).sin();
    (sin_dec, sin_dec.asin().cos())
}

/// Cosine of the local hour angle at rise/set. Outside [-1,1] the sun
/// never crosses the horizon: above 1 it stays down, below -1 it stays up.
pub fn hour_angle_cos(latitude: f64, sin_dec: f64, cos_dec: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    (deg_to_rad(HORIZON_ALTITUDE).sin() - lat.sin() * sin_dec) / (lat.cos() * cos_dec)
}

pub fn sun_geometry(latitude: f64, longitude: f64, n: i32, event: SunEvent) -> SunGeometry {
    let t = approximate_time(n, longitude_hour(longitude), event);
    let m = mean_anomaly(t);
    let l = true_longitude(m);
    let ra = right_ascension(l);
    let (sin_dec, cos_dec) = declination(l);
    SunGeometry {
        approximate_time: t,
        mean_anomaly: m,
        true_longitude: l,
        right_ascension: ra,
        sin_declination: sin_dec,
        cos_declination: cos_dec,
        cos_hour_angle: hour_angle_cos(latitude, sin_dec, cos_dec),
    }
}

pub fn event_hour_angle(cos_h: f64, event: SunEvent) -> f64 {
    let h = rad_to_deg(cos_h.acos());
    match event {
        SunEvent::Sunrise => (360.0 - h) / DEGREES_PER_HOUR,
        SunEvent::Sunset => h / DEGREES_PER_HOUR,
    }
}

pub fn local_mean_time(hour_angle: f64, right_ascension: f64, approximate_time: f64) -> f64 {
    hour_angle + right_ascension - 0.06571 * approximate_time - 6.622
}

pub fn utc_event_hour(geometry: &SunGeometry, longitude: f64, event: SunEvent) -> f64 {
    let h = event_hour_angle(geometry.cos_hour_angle, event);
    let t = local_mean_time(h, geometry.right_ascension, geometry.approximate_time);
    normalize_hours(t - longitude_hour(longitude))
}

pub fn split_hour(utc_hour: f64) -> (u32, u32) {
    let hour = utc_hour.trunc();
    let minute = ((utc_hour - hour) * 60.0).trunc() as u32;
    ((hour as u32) % 24, minute.min(59))
}
