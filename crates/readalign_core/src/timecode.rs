//! Display timecode formatting and parsing.
//!
//! The `m:ss.mmm` form shown in timing fields and accepted from user
//! input. This lives outside the fragment engine: operations there take
//! raw seconds, and the conversion happens at the collaborator layer.

/// Format seconds as `m:ss.mmm`.
///
/// Minutes are not zero-padded and not wrapped into hours; sub-millisecond
/// remainders are floored.
pub fn format_display_time(secs: f64) -> String {
    let secs = secs.max(0.0);
    let total_ms = (secs * 1000.0).floor() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let mins = total_secs / 60;
    format!("{}:{:02}.{:03}", mins, s, ms)
}

/// Parse a user-entered time string to seconds.
///
/// Accepts `m:ss`, `m:ss.mmm`, and bare seconds (`12.5`). Returns `None`
/// for anything else.
pub fn parse_display_time(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match input.split_once(':') {
        Some((mins, rest)) => {
            let mins: u64 = mins.parse().ok()?;
            let (secs, ms) = match rest.split_once('.') {
                Some((s, ms)) => (s, ms),
                None => (rest, "0"),
            };
            let secs: u64 = secs.parse().ok()?;
            if secs >= 60 {
                return None;
            }
            // "4" means 400ms, "45" 450ms: pad to three digits.
            let ms_padded = format!("{:0<3}", ms);
            let ms: u64 = ms_padded.get(..3)?.parse().ok()?;
            Some(mins as f64 * 60.0 + secs as f64 + ms as f64 / 1000.0)
        }
        None => {
            let secs: f64 = input.parse().ok()?;
            if secs.is_finite() && secs >= 0.0 {
                Some(secs)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_works() {
        assert_eq!(format_display_time(0.0), "0:00.000");
        assert_eq!(format_display_time(83.456), "1:23.456");
        assert_eq!(format_display_time(59.9994), "0:59.999");
        assert_eq!(format_display_time(600.0), "10:00.000");
        assert_eq!(format_display_time(-1.0), "0:00.000");
    }

    #[test]
    fn parse_works() {
        assert_eq!(parse_display_time("1:23.456"), Some(83.456));
        assert_eq!(parse_display_time("1:23"), Some(83.0));
        assert_eq!(parse_display_time("0:05.5"), Some(5.5));
        assert_eq!(parse_display_time("12.5"), Some(12.5));
        assert_eq!(parse_display_time(" 2:00.000 "), Some(120.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_display_time(""), None);
        assert_eq!(parse_display_time("abc"), None);
        assert_eq!(parse_display_time("1:75"), None);
        assert_eq!(parse_display_time("-3"), None);
        assert_eq!(parse_display_time("1:xx.000"), None);
    }

    #[test]
    fn roundtrip_to_millisecond_precision() {
        for secs in [0.0, 1.5, 83.456, 3599.999] {
            let formatted = format_display_time(secs);
            let parsed = parse_display_time(&formatted).unwrap();
            assert!((parsed - secs).abs() < 0.001, "{} -> {}", secs, formatted);
        }
    }
}
