use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::limits::ControlLimits;

/// Placeholder shown for names and descriptions that were never recorded.
pub const NOT_COMPLETE: &str = "Not Complete";

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRecord {
    pub id: String,
    pub site: String,
    pub description: String,
    pub scheduled: NaiveDate,
    /// Expected process time in hours.
    pub process_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
    pub external_reference: String,
    pub finish_date: Option<NaiveDate>,
    pub duration: Option<String>,
    /// `None` means the job has not been completed yet.
    pub job_code: Option<String>,
    pub name: Option<String>,
}

/// One row of the unified table: a scheduled job joined with one of its completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub external_reference: Option<String>,
    pub site: String,
    pub description: String,
    pub scheduled: NaiveDate,
    pub finish_date: Option<NaiveDate>,
    pub job_code: Option<String>,
    pub name: Option<String>,
    pub minutes: i64,
    pub expected_minutes: f64,
    pub limits: ControlLimits,
    /// Set only on completed visits, 1 when finished on the scheduled day.
    pub compliance: Option<u8>,
}

impl Visit {
    pub fn is_completed(&self) -> bool {
        self.job_code.is_some()
    }

    /// Text key used to group a visit with its siblings.
    pub fn reference_key(&self) -> &str {
        self.external_reference.as_deref().unwrap_or(&self.id)
    }
}

/// All visits of one identifier folded into a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapsedVisit {
    pub id: String,
    pub external_reference: String,
    pub site: String,
    pub description: String,
    pub name: String,
    pub scheduled: NaiveDate,
    pub finish_date: Option<NaiveDate>,
    pub minutes: i64,
    /// Only set when the identifier had more than one visit.
    pub visit_count: Option<usize>,
    pub expected_minutes: f64,
    pub limits: ControlLimits,
}
