use serde::{Deserialize, Serialize};

use super::dates::DateFormat;
use super::records::{CompletionRecord, ScheduleRecord};
use crate::error::Result;

/// One row of the schedule export, columns as named in the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Site", default)]
    pub site: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Day_Sched")]
    pub day_sched: String,
    /// Hours.
    #[serde(rename = "Process_Time")]
    pub process_time: f64,
}

/// One row of the completion log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRow {
    #[serde(rename = "External Reference")]
    pub external_reference: String,
    #[serde(rename = "Duration", default)]
    pub duration: Option<String>,
    #[serde(rename = "Finish Date", default)]
    pub finish_date: Option<String>,
    #[serde(rename = "Job Code", default)]
    pub job_code: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

pub fn parse_schedule(rows: &[ScheduleRow], format: &DateFormat) -> Result<Vec<ScheduleRecord>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let scheduled = format
                .parse(&row.day_sched)
                .map_err(|e| e.in_record("schedule", i + 1))?;

            Ok(ScheduleRecord {
                id: row.id.trim().to_string(),
                site: row.site.clone().unwrap_or_default(),
                description: row.description.clone().unwrap_or_default(),
                scheduled,
                process_time: row.process_time,
            })
        })
        .collect()
}

pub fn parse_completions(
    rows: &[CompletionRow],
    format: &DateFormat,
) -> Result<Vec<CompletionRecord>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let finish_date = format
                .parse_optional(row.finish_date.as_deref())
                .map_err(|e| e.in_record("completions", i + 1))?;

            Ok(CompletionRecord {
                external_reference: row.external_reference.trim().to_string(),
                finish_date,
                duration: row.duration.clone(),
                job_code: non_blank(row.job_code.as_deref()),
                name: non_blank(row.name.as_deref()),
            })
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
