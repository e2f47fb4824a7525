//! Date-picker text and time-delta display.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Default date-picker display format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Parses and renders date-picker text in a configured format.
///
/// Input is tried against the display format first, then each alternate
/// input format in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    display: String,
    alt_inputs: Vec<String>,
    utc: bool,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, Vec::new(), false)
    }
}

impl DateFormatter {
    pub fn new(display: impl Into<String>, alt_inputs: Vec<String>, utc: bool) -> Self {
        Self {
            display: display.into(),
            alt_inputs,
            utc,
        }
    }

    /// A formatter that reads and writes UTC wall time.
    #[must_use]
    pub fn utc(mut self) -> Self {
        self.utc = true;
        self
    }

    /// Render epoch milliseconds in the display format.
    #[must_use]
    pub fn format(&self, ms: i64) -> Option<String> {
        let instant = DateTime::<Utc>::from_timestamp_millis(ms)?;
        let text = if self.utc {
            instant.format(&self.display).to_string()
        } else {
            instant.with_timezone(&Local).format(&self.display).to_string()
        };
        Some(text)
    }

    /// Parse picker text into epoch milliseconds; `None` for anything that
    /// matches no accepted format.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<i64> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let naive = std::iter::once(&self.display)
            .chain(self.alt_inputs.iter())
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())?;
        if self.utc {
            Some(naive.and_utc().timestamp_millis())
        } else {
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp_millis())
        }
    }
}

/// Render a millisecond delta as `[-][Nd ]HH:MM:SS`.
#[must_use]
pub fn format_delta(delta_ms: i64) -> String {
    let sign = if delta_ms < 0 { "-" } else { "" };
    let total_secs = delta_ms.unsigned_abs() / 1000;
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if days > 0 {
        format!("{sign}{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> DateFormatter {
        DateFormatter::new(
            DEFAULT_DATE_FORMAT,
            vec!["%Y-%m-%dT%H:%M:%S".to_string()],
            true,
        )
    }

    #[test]
    fn test_parse_display_format() {
        assert_eq!(utc().parse("2023/11/14 22:13:20"), Some(1_700_000_000_000));
    }

    #[test]
    fn test_parse_unpadded_and_alternate() {
        assert_eq!(utc().parse("1970/1/2 0:00:00"), Some(86_400_000));
        assert_eq!(utc().parse(" 2023-11-14T22:13:20 "), Some(1_700_000_000_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(utc().parse("yesterday"), None);
        assert_eq!(utc().parse(""), None);
        assert_eq!(utc().parse("2023/13/40 99:00:00"), None);
    }

    #[test]
    fn test_format_round_trip() {
        let text = utc().format(1_700_000_000_000).unwrap();
        assert_eq!(text, "2023/11/14 22:13:20");
        assert_eq!(utc().parse(&text), Some(1_700_000_000_000));
    }

    #[test]
    fn test_local_round_trip() {
        let local = DateFormatter::default();
        let text = local.format(1_700_000_000_000).unwrap();
        assert_eq!(local.parse(&text), Some(1_700_000_000_000));
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(3_600_000), "01:00:00");
        assert_eq!(format_delta(90_061_000), "1d 01:01:01");
        assert_eq!(format_delta(-5_000), "-00:00:05");
        assert_eq!(format_delta(0), "00:00:00");
    }
}
