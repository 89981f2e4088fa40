use chrono::NaiveDate;
use clap::ValueEnum;
use indexmap::IndexSet;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::limits::ControlLimits;
use super::pipeline::SpcTables;
use super::records::Visit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One line per job, one point per visit
    Individual,
    /// One point per job with all of its visits summed
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum ChartUpdate {
    /// Nothing matched the request; the chart should be left as it is.
    NoUpdate,
    Individual(IndividualChart),
    Total(TotalChart),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualChart {
    pub description: String,
    pub limits: ControlLimits,
    pub traces: Vec<TraceSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSeries {
    pub external_reference: String,
    pub points: Vec<TracePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub finish_date: Option<NaiveDate>,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalChart {
    pub description: String,
    pub limits: ControlLimits,
    pub points: Vec<TotalPoint>,
    /// First and last external reference, the x extent of the limit lines.
    pub limit_span: (String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalPoint {
    pub external_reference: String,
    pub minutes: i64,
    pub visit_count: Option<usize>,
}

/// Chart-ready data for one job type, or [`ChartUpdate::NoUpdate`] when either the
/// completed visits or the collapsed table has no row for it.
pub fn chart_data(tables: &SpcTables, description: &str, view: ViewMode) -> ChartUpdate {
    let visits: Vec<&Visit> = tables
        .visits
        .iter()
        .filter(|v| v.description == description)
        .collect();
    let mut collapsed: Vec<_> = tables
        .collapsed
        .iter()
        .filter(|c| c.description == description)
        .collect();

    let Some(first) = visits.first() else {
        warn!("No completed visits for job type {description:?}");
        return ChartUpdate::NoUpdate;
    };
    if collapsed.is_empty() {
        warn!("No inspections for job type {description:?}");
        return ChartUpdate::NoUpdate;
    }

    let limits = first.limits;

    match view {
        ViewMode::Individual => {
            let references: IndexSet<&str> = visits.iter().map(|v| v.reference_key()).collect();
            let traces: Vec<TraceSeries> = references
                .into_iter()
                .filter_map(|reference| {
                    tables.traces.get(reference).map(|trace| TraceSeries {
                        external_reference: reference.to_string(),
                        points: trace
                            .iter()
                            .map(|v| TracePoint {
                                finish_date: v.finish_date,
                                minutes: v.minutes,
                            })
                            .collect(),
                    })
                })
                .collect();

            info!("Charting {} traces for {description:?}", traces.len());

            ChartUpdate::Individual(IndividualChart {
                description: description.to_string(),
                limits,
                traces,
            })
        }
        ViewMode::Total => {
            collapsed.sort_by(|a, b| a.external_reference.cmp(&b.external_reference));

            let limit_span = (
                collapsed[0].external_reference.clone(),
                collapsed[collapsed.len() - 1].external_reference.clone(),
            );
            let points: Vec<TotalPoint> = collapsed
                .iter()
                .map(|c| TotalPoint {
                    external_reference: c.external_reference.clone(),
                    minutes: c.minutes,
                    visit_count: c.visit_count,
                })
                .collect();

            info!("Charting {} inspections for {description:?}", points.len());

            ChartUpdate::Total(TotalChart {
                description: description.to_string(),
                limits,
                points,
                limit_span,
            })
        }
    }
}

/// Distinct job types among completed visits, in first-seen order.
pub fn job_types(visits: &[Visit]) -> Vec<String> {
    visits
        .iter()
        .map(|v| v.description.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
