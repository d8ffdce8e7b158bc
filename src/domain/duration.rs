use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;
const MAX_FRACTION_DIGITS: usize = 18;

/// A [`Duration`] written in compact unit notation, e.g. `1m30s` or `250ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct HumanDuration(pub Duration);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationParseError {
    input: String,
    reason: &'static str,
}

impl DurationParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid duration '{}': {} (expected e.g. '30s', '2m', '1h15m')",
            self.input, self.reason
        )
    }
}

impl std::error::Error for DurationParseError {}

/// Parses a duration such as `30s`, `1.5m` or `1h2m3s`.
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare
/// `0` is allowed; negative values are rejected.
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let trimmed = s.trim();
    let mut rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if rest.starts_with('-') {
        return Err(DurationParseError::new(s, "negative durations are not supported"));
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationParseError::new(s, "empty value"));
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        if unit.is_empty() {
            return Err(DurationParseError::new(s, "missing unit"));
        }
        let unit_nanos =
            unit_nanos(unit).ok_or_else(|| DurationParseError::new(s, "unknown unit"))?;
        let nanos = scale(number, unit_nanos)
            .ok_or_else(|| DurationParseError::new(s, "invalid number"))?;

        total_nanos = total_nanos
            .checked_add(nanos)
            .ok_or_else(|| DurationParseError::new(s, "value out of range"))?;
        rest = tail;
    }

    let secs = u64::try_from(total_nanos / NANOS_PER_SEC)
        .map_err(|_| DurationParseError::new(s, "value out of range"))?;
    Ok(Duration::new(secs, (total_nanos % NANOS_PER_SEC) as u32))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn scale(number: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit_nanos)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let digits: u128 = fraction.parse().ok()?;
        let denominator = 10u128.pow(fraction.len() as u32);
        nanos = nanos.checked_add(digits * unit_nanos / denominator)?;
    }

    Some(nanos)
}

/// Renders `value / unit` with a trimmed decimal fraction.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }

    let width = unit.to_string().len() - 1;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        if d.is_zero() {
            return f.write_str("0s");
        }

        let nanos = d.as_nanos();
        if nanos < NANOS_PER_SEC {
            let (unit, suffix) = if nanos < 1_000 {
                (1, "ns")
            } else if nanos < 1_000_000 {
                (1_000, "µs")
            } else {
                (1_000_000, "ms")
            };
            return write!(f, "{}{}", decimal(nanos, unit), suffix);
        }

        let secs = d.as_secs();
        let hours = secs / 3_600;
        let minutes = (secs % 3_600) / 60;
        let second_nanos = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(d.subsec_nanos());

        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if hours > 0 || minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{}s", decimal(second_nanos, NANOS_PER_SEC))
    }
}

impl FromStr for HumanDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(Self)
    }
}

impl From<Duration> for HumanDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

impl From<HumanDuration> for Duration {
    fn from(d: HumanDuration) -> Self {
        d.0
    }
}

impl Serialize for HumanDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse {
        use super::*;

        #[test]
        fn parses_single_units() {
            assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
            assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
            assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3_600));
            assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
            assert_eq!(parse_duration("7us").unwrap(), Duration::from_micros(7));
            assert_eq!(parse_duration("7µs").unwrap(), Duration::from_micros(7));
            assert_eq!(parse_duration("3ns").unwrap(), Duration::from_nanos(3));
        }

        #[test]
        fn parses_compound_values() {
            assert_eq!(
                parse_duration("1h2m3s").unwrap(),
                Duration::from_secs(3_600 + 120 + 3)
            );
            assert_eq!(
                parse_duration("1m30s").unwrap(),
                Duration::from_secs(90)
            );
        }

        #[test]
        fn parses_fractions() {
            assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1_500));
            assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
            assert_eq!(parse_duration("2.m").unwrap(), Duration::from_secs(120));
        }

        #[test]
        fn accepts_bare_zero_and_plus_sign() {
            assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
            assert_eq!(parse_duration("+5s").unwrap(), Duration::from_secs(5));
        }

        #[test]
        fn rejects_negative_values() {
            let err = parse_duration("-30s").unwrap_err();
            assert_eq!(err.input(), "-30s");
            assert!(err.to_string().contains("negative"));
        }

        #[test]
        fn rejects_missing_unit() {
            assert!(parse_duration("30").is_err());
            assert!(parse_duration("1m30").is_err());
        }

        #[test]
        fn rejects_unknown_unit() {
            assert!(parse_duration("3d").is_err());
            assert!(parse_duration("10sec").is_err());
        }

        #[test]
        fn rejects_garbage() {
            assert!(parse_duration("").is_err());
            assert!(parse_duration("abc").is_err());
            assert!(parse_duration(".s").is_err());
            assert!(parse_duration("1.2.3s").is_err());
        }
    }

    mod display {
        use super::*;

        fn show(d: Duration) -> String {
            HumanDuration(d).to_string()
        }

        #[test]
        fn zero_is_zero_seconds() {
            assert_eq!(show(Duration::ZERO), "0s");
        }

        #[test]
        fn whole_seconds() {
            assert_eq!(show(Duration::from_secs(9)), "9s");
            assert_eq!(show(Duration::from_secs(59)), "59s");
        }

        #[test]
        fn minutes_and_hours() {
            assert_eq!(show(Duration::from_secs(60)), "1m0s");
            assert_eq!(show(Duration::from_secs(90)), "1m30s");
            assert_eq!(show(Duration::from_secs(3_600)), "1h0m0s");
            assert_eq!(show(Duration::from_secs(3_723)), "1h2m3s");
        }

        #[test]
        fn fractional_seconds_are_trimmed() {
            assert_eq!(show(Duration::from_millis(1_500)), "1.5s");
            assert_eq!(show(Duration::from_millis(61_250)), "1m1.25s");
        }

        #[test]
        fn sub_second_units() {
            assert_eq!(show(Duration::from_millis(250)), "250ms");
            assert_eq!(show(Duration::from_micros(1_500)), "1.5ms");
            assert_eq!(show(Duration::from_micros(7)), "7µs");
            assert_eq!(show(Duration::from_nanos(42)), "42ns");
        }

        #[test]
        fn display_output_parses_back() {
            let d = Duration::from_millis(3_723_500);
            let rendered = show(d);
            assert_eq!(parse_duration(&rendered).unwrap(), d);
        }
    }

    mod serde_support {
        use super::*;

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Holder {
            wait: HumanDuration,
        }

        #[test]
        fn deserializes_from_string() {
            let holder: Holder = toml::from_str(r#"wait = "2m""#).unwrap();
            assert_eq!(holder.wait, HumanDuration(Duration::from_secs(120)));
        }

        #[test]
        fn rejects_invalid_string() {
            let result: std::result::Result<Holder, _> = toml::from_str(r#"wait = "soon""#);
            assert!(result.is_err());
        }

        #[test]
        fn serializes_as_string() {
            let holder = Holder {
                wait: HumanDuration(Duration::from_secs(90)),
            };
            let content = toml::to_string(&holder).unwrap();
            assert!(content.contains(r#"wait = "1m30s""#));
        }
    }
}
