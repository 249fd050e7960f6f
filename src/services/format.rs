//! Clock-style rendering and parsing of durations

/// Render a number of seconds as `HH:MM:SS`
///
/// Components below ten get a leading zero; larger values are printed in
/// full, so hours may exceed two digits (`360000` → `"100:00:00"`).
/// Fractional seconds keep their fraction (`65.5` → `"00:01:05.5"`).
#[must_use]
pub fn format_duration(total_seconds: f64) -> String {
    let minutes = (total_seconds / 60.0).floor();
    let seconds = total_seconds % 60.0;
    let hours = (minutes / 60.0).floor();
    let minutes = minutes % 60.0;

    format!("{}:{}:{}", pad(hours), pad(minutes), pad(seconds))
}

fn pad(value: f64) -> String {
    if value < 10.0 {
        format!("0{value}")
    } else {
        format!("{value}")
    }
}

/// Parse a colon separated clock value such as `01:02:03.5` into seconds
///
/// Accepts one to three components (`SS`, `MM:SS`, `HH:MM:SS`); each must be
/// a finite, non-negative number.
#[must_use]
pub fn parse_clock_duration(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    parts.iter().try_fold(0.0_f64, |acc, part| {
        let component: f64 = part.trim().parse().ok()?;
        (component.is_finite() && component >= 0.0).then_some(acc * 60.0 + component)
    })
}
