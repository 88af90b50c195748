use sun_data::sunrise::SolarCalculator;
use sun_data::timezone::GeoTimezoneResolver;
use sun_data::types::{parse_date, TimeFormat};

fn main() -> Result<(), sun_data::SunError> {
    let latitude = 40.7128;
    let longitude = -74.0060;
    let start = parse_date("2024-06-18")?;
    let end = parse_date("2024-06-24")?;

    let calc = SolarCalculator::new(GeoTimezoneResolver::new());
    let range = calc.compute_range(latitude, longitude, start, end)?;

    println!("=== Sunrise / Sunset ===");
    println!(
        "Location: New York, NY ({:.4}°N, {:.4}°W)",
        latitude, -longitude
    );
    println!("Timezone: {}", range.timezone.name());
    println!("Days: {}", range.day_count);
    println!();
    for day in &range.days {
        let record = day.to_record(TimeFormat::Simple);
        println!(
            "{}  rise {}  set {}  daylight {:.2} h",
            record.date,
            record.sunrise.as_deref().unwrap_or("--:--"),
            record.sunset.as_deref().unwrap_or("--:--"),
            day.daylight_hours
        );
    }
    println!();

    let svalbard = calc.sun_data(78.22, 15.65, start, start, false)?;
    println!("--- Longyearbyen, same start date ---");
    println!("{}", svalbard.to_json()?);
    Ok(())
}
