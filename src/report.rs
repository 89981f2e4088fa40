use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::spc::pipeline::SpcTables;
use crate::spc::query::job_types;
use crate::spc::records::{CollapsedVisit, Visit};
use crate::spc::{ComplianceRecord, ProcessException, TraceGroups};

#[derive(Debug, Serialize, Deserialize)]
pub struct SpcReport {
    pub schedule_source: String,
    pub completions_source: String,
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub job_types: Vec<String>,
    pub visits: Vec<Visit>,
    pub not_done: Vec<Visit>,
    pub collapsed: Vec<CollapsedVisit>,
    pub exceptions: Vec<ProcessException>,
    pub compliance: Vec<ComplianceRecord>,
    pub traces: TraceGroups,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub scheduled_jobs: usize,
    pub total_visits: usize,
    pub completed_visits: usize,
    pub not_done_visits: usize,
    pub inspections: usize,
    pub exceptions: usize,
    /// On-time share of all completed visits, null when nothing was completed.
    pub compliance_rate: Option<f64>,
}

impl SpcReport {
    pub fn new(
        tables: SpcTables,
        scheduled_jobs: usize,
        schedule_source: String,
        completions_source: String,
    ) -> Self {
        let summary = summarize(&tables, scheduled_jobs);

        Self {
            schedule_source,
            completions_source,
            generated_at: Utc::now(),
            summary,
            job_types: job_types(&tables.visits),
            visits: tables.visits,
            not_done: tables.not_done,
            collapsed: tables.collapsed,
            exceptions: tables.exceptions,
            compliance: tables.compliance,
            traces: tables.traces,
        }
    }
}

fn summarize(tables: &SpcTables, scheduled_jobs: usize) -> ReportSummary {
    let on_time = tables
        .compliance
        .iter()
        .map(|day| day.on_time)
        .sum::<usize>();

    #[allow(clippy::cast_precision_loss)]
    let compliance_rate =
        (!tables.visits.is_empty()).then(|| on_time as f64 / tables.visits.len() as f64);

    ReportSummary {
        scheduled_jobs,
        total_visits: tables.visits.len() + tables.not_done.len(),
        completed_visits: tables.visits.len(),
        not_done_visits: tables.not_done.len(),
        inspections: tables.collapsed.len(),
        exceptions: tables.exceptions.len(),
        compliance_rate,
    }
}
