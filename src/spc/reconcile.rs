use std::collections::HashMap;

use log::{info, warn};

use super::duration::to_minutes;
use super::limits::ControlLimits;
use super::records::{CompletionRecord, ScheduleRecord, Visit};
use crate::error::Result;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Left joins the schedule against the completion log on `ID = External Reference`.
///
/// Schedule order is preserved and a job with several completions yields one visit per
/// completion, in log order. Jobs without any completion still produce a single visit with
/// zero minutes and no finish date.
pub fn reconcile(
    schedule: &[ScheduleRecord],
    completions: &[CompletionRecord],
) -> Result<Vec<Visit>> {
    let by_reference = index_completions(completions);
    let mut visits = Vec::with_capacity(schedule.len().max(completions.len()));
    let mut unmatched = 0;

    for job in schedule {
        let expected_minutes = job.process_time * MINUTES_PER_HOUR;

        match by_reference.get(job.id.trim()) {
            Some(matches) => {
                for completion in matches {
                    visits.push(Visit {
                        id: job.id.clone(),
                        external_reference: Some(completion.external_reference.trim().to_string()),
                        site: job.site.clone(),
                        description: job.description.clone(),
                        scheduled: job.scheduled,
                        finish_date: completion.finish_date,
                        job_code: completion.job_code.clone(),
                        name: completion.name.clone(),
                        minutes: to_minutes(completion.duration.as_deref())?,
                        expected_minutes,
                        limits: ControlLimits::around(expected_minutes),
                        compliance: None,
                    });
                }
            }
            None => {
                unmatched += 1;
                visits.push(Visit {
                    id: job.id.clone(),
                    external_reference: None,
                    site: job.site.clone(),
                    description: job.description.clone(),
                    scheduled: job.scheduled,
                    finish_date: None,
                    job_code: None,
                    name: None,
                    minutes: to_minutes(None)?,
                    expected_minutes,
                    limits: ControlLimits::around(expected_minutes),
                    compliance: None,
                });
            }
        }
    }

    if unmatched > 0 {
        warn!("{unmatched} scheduled jobs have no completion record");
    }
    info!(
        "Reconciled {} scheduled jobs with {} completion records into {} visits",
        schedule.len(),
        completions.len(),
        visits.len()
    );

    Ok(visits)
}

/// Splits the unified table into completed visits and visits with no job code.
pub fn split_completed(visits: Vec<Visit>) -> (Vec<Visit>, Vec<Visit>) {
    visits.into_iter().partition(Visit::is_completed)
}

fn index_completions(completions: &[CompletionRecord]) -> HashMap<&str, Vec<&CompletionRecord>> {
    completions.iter().fold(HashMap::new(), |mut index, completion| {
        index
            .entry(completion.external_reference.trim())
            .or_insert_with(Vec::new)
            .push(completion);
        index
    })
}
