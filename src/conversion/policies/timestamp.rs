use crate::conversion::domain::Diagnostics;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Magic timestamp text standing for the current instant
pub const NOW_CODE: &str = "now";

/// Date-time layouts accepted without a zone offset (assumed UTC)
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-time layouts with a `Z`, `+HH`, `+HHMM` or `+HH:MM` offset
const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Normalize a CVRF date/time text into a UTC ISO-8601 string
///
/// Returns the canonical `YYYY-MM-DDTHH:MM:SS.mmm+00:00` rendering, or `None`
/// together with a CRITICAL diagnostic naming the offending text.
pub fn normalize(text: &str) -> (Option<String>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    if text == NOW_CODE {
        return (Some(render(Utc::now())), diagnostics);
    }

    match parse(text.trim()) {
        Some(instant) => (Some(render(instant)), diagnostics),
        None => {
            diagnostics.critical(line_slug(&format!(
                "invalid time stamp provided {}: not an ISO-8601 date or date-time.",
                text
            )));
            (None, diagnostics)
        }
    }
}

/// Normalize and fold any diagnostics into `sink`
pub fn normalize_into(text: &str, sink: &mut Diagnostics) -> Option<String> {
    let (timestamp, diagnostics) = normalize(text);
    sink.extend(diagnostics);
    timestamp
}

fn parse(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(instant) = DateTime::parse_from_str(text, layout) {
            return Some(instant.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn render(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Replace line breaks so one diagnostic stays on one log line
fn line_slug(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}
