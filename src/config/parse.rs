use std::time::Duration;

use crate::error::ValidationError;

/// Fraction digits beyond this are ignored; they are below nanosecond
/// precision for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parses `30`, `250ms`, `1.5s`, `500us`, `90m`, `2h` or compounds such as
/// `1h30m` and `1m15.5s`. A bare integer is seconds. Zero is accepted.
pub(crate) fn parse_duration_value(value: &str) -> Result<Duration, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    if value.chars().all(|ch| ch.is_ascii_digit()) {
        return parse_number(value, value).map(Duration::from_secs);
    }

    let mut rest = value;
    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", tail),
        };
        let unit_len = tail
            .find(|ch: char| ch.is_ascii_digit() || ch == '.')
            .unwrap_or(tail.len());
        let (unit, remaining) = tail.split_at(unit_len);
        if (whole.is_empty() && fraction.is_empty()) || unit.is_empty() {
            return Err(ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            });
        }

        let segment = segment_nanos(whole, fraction, unit_nanos(unit)?, value)?;
        total_nanos = total_nanos
            .checked_add(segment)
            .ok_or(ValidationError::DurationOverflow)?;
        rest = remaining;
    }

    let nanos = u64::try_from(total_nanos).map_err(|_err| ValidationError::DurationOverflow)?;
    Ok(Duration::from_nanos(nanos))
}

fn split_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}

fn parse_number(digits: &str, value: &str) -> Result<u64, ValidationError> {
    digits
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })
}

fn segment_nanos(
    whole: &str,
    fraction: &str,
    unit: u128,
    value: &str,
) -> Result<u128, ValidationError> {
    let whole_nanos = if whole.is_empty() {
        0
    } else {
        u128::from(parse_number(whole, value)?)
            .checked_mul(unit)
            .ok_or(ValidationError::DurationOverflow)?
    };

    let fraction = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if fraction.is_empty() {
        return Ok(whole_nanos);
    }
    let digits = u32::try_from(fraction.len()).map_err(|_err| ValidationError::DurationOverflow)?;
    let scale = 10u128
        .checked_pow(digits)
        .ok_or(ValidationError::DurationOverflow)?;
    let fraction_nanos = u128::from(parse_number(fraction, value)?)
        .checked_mul(unit)
        .and_then(|scaled| scaled.checked_div(scale))
        .ok_or(ValidationError::DurationOverflow)?;

    whole_nanos
        .checked_add(fraction_nanos)
        .ok_or(ValidationError::DurationOverflow)
}

fn unit_nanos(unit: &str) -> Result<u128, ValidationError> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60_000_000_000,
        "h" => 3_600_000_000_000,
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };
    Ok(nanos)
}
