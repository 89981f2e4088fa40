use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use super::records::Visit;

/// Share of visits scheduled for one day that were finished on that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub scheduled: NaiveDate,
    pub on_time: usize,
    pub total: usize,
    pub proportion: Option<f64>,
}

pub fn is_on_time(visit: &Visit) -> bool {
    visit.finish_date == Some(visit.scheduled)
}

/// Stamps the compliance flag on every completed visit. Incomplete visits are returned
/// untouched.
pub fn flag(visits: Vec<Visit>) -> Vec<Visit> {
    visits
        .into_iter()
        .map(|visit| {
            if !visit.is_completed() {
                return visit;
            }
            let compliance = u8::from(is_on_time(&visit));
            Visit {
                compliance: Some(compliance),
                ..visit
            }
        })
        .collect()
}

/// Daily on-time proportion over completed visits, ordered by scheduled date.
pub fn daily_series(visits: &[Visit]) -> Vec<ComplianceRecord> {
    let per_day = visits
        .iter()
        .filter(|v| v.is_completed())
        .fold(BTreeMap::<NaiveDate, (usize, usize)>::new(), |mut days, visit| {
            let entry = days.entry(visit.scheduled).or_default();
            entry.0 += usize::from(is_on_time(visit));
            entry.1 += 1;
            days
        });

    let series: Vec<ComplianceRecord> = per_day
        .into_iter()
        .map(|(scheduled, (on_time, total))| ComplianceRecord {
            scheduled,
            on_time,
            total,
            proportion: proportion(on_time, total),
        })
        .collect();

    info!("Computed compliance for {} scheduled days", series.len());

    series
}

/// `None` when there is nothing to divide by.
#[allow(clippy::cast_precision_loss)]
pub fn proportion(on_time: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| on_time as f64 / total as f64)
}
