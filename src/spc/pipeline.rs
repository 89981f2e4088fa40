use log::{info, warn};

use super::compliance::ComplianceRecord;
use super::dates::DateFormat;
use super::exceptions::ProcessException;
use super::ingest::{self, CompletionRow, ScheduleRow};
use super::records::{CollapsedVisit, CompletionRecord, ScheduleRecord, Visit};
use super::traces::TraceGroups;
use super::{collapse, compliance, exceptions, reconcile, traces};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub date_format: DateFormat,
}

/// Every table derived from one schedule/completion snapshot.
#[derive(Debug, Clone)]
pub struct SpcTables {
    /// Completed visits with control limits and compliance flags.
    pub visits: Vec<Visit>,
    /// Visits without a job code.
    pub not_done: Vec<Visit>,
    pub collapsed: Vec<CollapsedVisit>,
    pub exceptions: Vec<ProcessException>,
    pub compliance: Vec<ComplianceRecord>,
    pub traces: TraceGroups,
}

/// Parses both raw tables and derives every SPC table from them. Any malformed date or
/// duration aborts the run before a single derived table is produced.
pub fn run(
    schedule: &[ScheduleRow],
    completions: &[CompletionRow],
    config: &PipelineConfig,
) -> Result<SpcTables> {
    let schedule = ingest::parse_schedule(schedule, &config.date_format)?;
    let completions = ingest::parse_completions(completions, &config.date_format)?;

    analyze(&schedule, &completions)
}

pub fn analyze(
    schedule: &[ScheduleRecord],
    completions: &[CompletionRecord],
) -> Result<SpcTables> {
    info!(
        "Running SPC pipeline over {} scheduled jobs and {} completions",
        schedule.len(),
        completions.len()
    );

    if schedule.is_empty() {
        warn!("Schedule is empty, every derived table will be empty");
    }

    let unified = reconcile::reconcile(schedule, completions)?;

    let collapsed = collapse::collapse(&unified);
    let exceptions = exceptions::detect(&collapsed);

    let (completed, not_done) = reconcile::split_completed(unified);
    let visits = compliance::flag(completed);
    let compliance = compliance::daily_series(&visits);
    let traces = traces::partition(&visits);

    info!(
        "{} completed visits, {} not done, {} exceptions",
        visits.len(),
        not_done.len(),
        exceptions.len()
    );

    Ok(SpcTables {
        visits,
        not_done,
        collapsed,
        exceptions,
        compliance,
        traces,
    })
}
