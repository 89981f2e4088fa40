use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::error::{Result, SpcError};

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// chrono format used to read every date column of the input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}

impl DateFormat {
    /// Rejects formats that cannot round-trip a calendar day.
    pub fn new(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(SpcError::Config(format!(
                "date format {pattern:?} contains an unknown specifier"
            )));
        }

        let probe = NaiveDate::from_ymd_opt(2021, 12, 31)
            .ok_or_else(|| SpcError::Config("invalid probe date".to_string()))?;
        let rendered = probe.format(pattern).to_string();

        match NaiveDate::parse_from_str(&rendered, pattern) {
            Ok(parsed) if parsed == probe => Ok(Self(pattern.to_string())),
            _ => Err(SpcError::Config(format!(
                "date format {pattern:?} does not describe a full calendar day"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self, value: &str) -> Result<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, &self.0).map_err(|source| SpcError::InvalidDate {
            value: value.to_string(),
            format: self.0.clone(),
            source,
        })
    }

    /// Blank cells are null rather than malformed.
    pub fn parse_optional(&self, value: Option<&str>) -> Result<Option<NaiveDate>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => self.parse(v).map(Some),
        }
    }
}
