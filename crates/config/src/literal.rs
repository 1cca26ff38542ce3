//! Size and duration literals used by profile directives.
//!
//! Sizes are integers with an optional binary unit suffix (`10k`, `5M`,
//! `1g`). Durations are either `0`, whole days (`7d`), or a composite of
//! hours, minutes, seconds and milliseconds (`1h30m`, `90s`). Days never mix
//! with the other units.

use std::time::Duration;

const SIZE_UNITS: [(char, u32); 4] = [('T', 4), ('G', 3), ('M', 2), ('K', 1)];

const MS_PER_SECOND: u128 = 1_000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u128 = 24 * MS_PER_HOUR;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// A literal that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct LiteralError {
    pub value: String,
    pub reason: String,
}

impl LiteralError {
    fn new(value: &str, reason: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a byte size such as `123`, `10k` or `2G` (multiples of 1024).
pub fn parse_size(text: &str) -> Result<u64, LiteralError> {
    let text = text.trim();
    let (digits, multiplier) = match text.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() => {
            let upper = c.to_ascii_uppercase();
            let Some(&(_, exp)) = SIZE_UNITS.iter().find(|(unit, _)| *unit == upper) else {
                return Err(LiteralError::new(
                    text,
                    format!("unknown size unit '{c}', expected one of k, m, g, t"),
                ));
            };
            (&text[..i], 1024u64.pow(exp))
        },
        _ => (text, 1),
    };
    let value = parse_digits(digits).ok_or_else(|| {
        LiteralError::new(text, "expected an integer with optional k/m/g/t suffix")
    })?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| LiteralError::new(text, "size does not fit in 64 bits"))
}

/// Render `bytes` with the largest unit that divides it exactly.
pub fn format_size(bytes: u64) -> String {
    if bytes != 0 {
        for (unit, exp) in SIZE_UNITS {
            let multiplier = 1024u64.pow(exp);
            if bytes % multiplier == 0 {
                return format!("{}{unit}", bytes / multiplier);
            }
        }
    }
    bytes.to_string()
}

/// Parse `0`, `<n>d`, or a composite like `10h5m` / `1h30m10s` / `250ms`.
pub fn parse_duration(text: &str) -> Result<Duration, LiteralError> {
    let text = text.trim();
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if let Some(days) = text.strip_suffix('d') {
        let days = parse_digits(days).ok_or_else(|| {
            LiteralError::new(
                text,
                "days must be a plain integer and cannot be combined with other units",
            )
        })?;
        let secs = days
            .checked_mul(SECS_PER_DAY)
            .ok_or_else(|| LiteralError::new(text, "duration out of range"))?;
        return Ok(Duration::from_secs(secs));
    }
    if text.contains('d') {
        return Err(LiteralError::new(text, "days cannot be combined with other units"));
    }
    parse_composite(text)
}

fn parse_composite(text: &str) -> Result<Duration, LiteralError> {
    if text.is_empty() {
        return Err(LiteralError::new(text, "empty duration"));
    }

    let mut total_ms: u64 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(LiteralError::new(text, "expected a number before each unit"));
        }
        let (digits, tail) = rest.split_at(digits_end);
        let unit_end = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let factor: u64 = match unit {
            "h" => 3_600_000,
            "m" => 60_000,
            "s" => 1_000,
            "ms" => 1,
            "" => return Err(LiteralError::new(text, "missing unit, expected h, m, s or ms")),
            other => {
                return Err(LiteralError::new(text, format!("unknown duration unit '{other}'")));
            },
        };
        let component = parse_digits(digits)
            .and_then(|n| n.checked_mul(factor))
            .and_then(|ms| total_ms.checked_add(ms))
            .ok_or_else(|| LiteralError::new(text, "duration out of range"))?;
        total_ms = component;
        rest = tail;
    }
    Ok(Duration::from_millis(total_ms))
}

/// A non-empty run of ASCII digits. Signs are not accepted.
fn parse_digits(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Render a duration the way [`parse_duration`] reads it back.
///
/// Precision below one millisecond is dropped.
pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms == 0 {
        return "0".to_string();
    }
    if ms % MS_PER_DAY == 0 {
        return format!("{}d", ms / MS_PER_DAY);
    }

    let components = [
        (ms / MS_PER_HOUR, "h"),
        (ms % MS_PER_HOUR / MS_PER_MINUTE, "m"),
        (ms % MS_PER_MINUTE / MS_PER_SECOND, "s"),
        (ms % MS_PER_SECOND, "ms"),
    ];
    components
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect()
}
