use crate::error::{Result, SpcError};

/// Converts a colon separated duration ("H:M", "H:M:S", or a bare number) into minutes.
///
/// Components are folded most significant first as a base 60 number, so "1:30" is 90 and
/// "2:15:30" is `(2 * 60 + 15) * 60 + 30`. A missing or blank duration counts as zero.
pub fn to_minutes(raw: Option<&str>) -> Result<i64> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Ok(0);
    }

    value.split(':').try_fold(0_i64, |acc, unit| {
        let unit = unit.trim();
        if unit.is_empty() || !unit.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(value, format!("component {unit:?} is not a whole number")));
        }

        let parsed: i64 = unit
            .parse()
            .map_err(|e| invalid(value, format!("component {unit:?}: {e}")))?;

        acc.checked_mul(60)
            .and_then(|shifted| shifted.checked_add(parsed))
            .ok_or_else(|| invalid(value, "value is too large".to_string()))
    })
}

fn invalid(value: &str, reason: String) -> SpcError {
    SpcError::InvalidDuration {
        value: value.to_string(),
        reason,
    }
}
