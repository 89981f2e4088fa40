use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use super::records::CollapsedVisit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessException {
    pub id: String,
    pub site: String,
    pub description: String,
    pub name: String,
    pub scheduled: NaiveDate,
    pub finish_date: Option<NaiveDate>,
    pub minutes: i64,
    pub lower_limit: f64,
    pub upper_limit: f64,
}

impl From<&CollapsedVisit> for ProcessException {
    fn from(row: &CollapsedVisit) -> Self {
        Self {
            id: row.id.clone(),
            site: row.site.clone(),
            description: row.description.clone(),
            name: row.name.clone(),
            scheduled: row.scheduled,
            finish_date: row.finish_date,
            minutes: row.minutes,
            lower_limit: row.limits.lower,
            upper_limit: row.limits.upper,
        }
    }
}

/// Inspections whose total time falls strictly outside their control limits.
pub fn detect(collapsed: &[CollapsedVisit]) -> Vec<ProcessException> {
    let exceptions: Vec<ProcessException> = collapsed
        .iter()
        .filter(|row| row.limits.is_out_of_control(row.minutes))
        .map(ProcessException::from)
        .collect();

    info!(
        "Found {} exceptions across {} inspections",
        exceptions.len(),
        collapsed.len()
    );

    exceptions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::collapse::collapse;
    use crate::spc::reconcile::reconcile;
    use crate::spc::test_support::{completion, job};

    fn exceptions_for(hours: f64, duration: &str) -> Vec<ProcessException> {
        let completions = vec![completion("1", duration, "01/01/2021", Some("X"))];
        let visits = reconcile(&[job("1", "Boiler", hours)], &completions).unwrap();
        detect(&collapse(&visits))
    }

    #[test]
    fn test_exactly_on_upper_limit_is_not_an_exception() {
        // 1h expected, upper limit 105 minutes
        assert!(exceptions_for(1.0, "1:45").is_empty());
    }

    #[test]
    fn test_just_above_upper_limit_is_an_exception() {
        // 1.1h expected, upper limit 115.5 minutes
        let exceptions = exceptions_for(1.1, "1:56");
        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].minutes, 116);
    }

    #[test]
    fn test_exactly_on_lower_limit_is_not_an_exception() {
        assert!(exceptions_for(1.0, "0:15").is_empty());
    }

    #[test]
    fn test_below_lower_limit_is_an_exception() {
        let exceptions = exceptions_for(1.0, "0:14");
        assert_eq!(exceptions.len(), 1);
        assert!((exceptions[0].lower_limit - 15.0).abs() < f64::EPSILON);
        assert!((exceptions[0].upper_limit - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unvisited_job_is_an_exception() {
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &[]).unwrap();

        let exceptions = detect(&collapse(&visits));

        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].minutes, 0);
        assert_eq!(exceptions[0].finish_date, None);
    }

    #[test]
    fn test_summed_duplicates_can_breach_upper_limit() {
        let completions = vec![
            completion("1", "1:00", "01/01/2021", Some("X")),
            completion("1", "1:00", "02/01/2021", Some("X")),
        ];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let exceptions = detect(&collapse(&visits));

        assert_eq!(exceptions.len(), 1);
        assert_eq!(exceptions[0].minutes, 120);
    }
}
