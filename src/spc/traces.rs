use indexmap::IndexMap;
use log::info;

use super::records::Visit;

/// Completed visits grouped by external reference, each group ordered by finish date.
pub type TraceGroups = IndexMap<String, Vec<Visit>>;

pub fn partition(visits: &[Visit]) -> TraceGroups {
    let mut groups = visits
        .iter()
        .filter(|v| v.is_completed())
        .fold(TraceGroups::new(), |mut groups, visit| {
            groups
                .entry(visit.reference_key().to_string())
                .or_default()
                .push(visit.clone());
            groups
        });

    for trace in groups.values_mut() {
        // stable, undated visits last
        trace.sort_by_key(|v| (v.finish_date.is_none(), v.finish_date));
    }

    info!("Partitioned visits into {} traces", groups.len());

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::reconcile::reconcile;
    use crate::spc::test_support::{completion, day, job};

    #[test]
    fn test_trace_is_sorted_by_finish_date() {
        let completions = vec![
            completion("1", "0:30", "10/01/2021", Some("X")),
            completion("1", "0:10", "02/01/2021", Some("X")),
            completion("1", "0:20", "06/01/2021", Some("X")),
        ];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let traces = partition(&visits);

        let dates: Vec<_> = traces["1"].iter().map(|v| v.finish_date).collect();
        assert_eq!(
            dates,
            vec![
                Some(day("02/01/2021")),
                Some(day("06/01/2021")),
                Some(day("10/01/2021"))
            ]
        );
    }

    #[test]
    fn test_one_trace_per_reference_in_first_seen_order() {
        let schedule = vec![job("2", "Meter", 1.0), job("1", "Boiler", 1.0)];
        let completions = vec![
            completion("1", "0:10", "01/01/2021", Some("X")),
            completion("2", "0:10", "01/01/2021", Some("X")),
        ];
        let visits = reconcile(&schedule, &completions).unwrap();

        let traces = partition(&visits);

        let keys: Vec<_> = traces.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2", "1"]);
    }

    #[test]
    fn test_incomplete_visits_are_left_out() {
        let schedule = vec![job("1", "Boiler", 1.0), job("2", "Meter", 1.0)];
        let completions = vec![
            completion("1", "0:10", "01/01/2021", Some("X")),
            completion("1", "0:10", "", None),
        ];
        let visits = reconcile(&schedule, &completions).unwrap();

        let traces = partition(&visits);

        assert_eq!(traces.len(), 1);
        assert_eq!(traces["1"].len(), 1);
    }

    #[test]
    fn test_undated_visits_sort_last() {
        let completions = vec![
            completion("1", "0:10", "", Some("X")),
            completion("1", "0:20", "03/01/2021", Some("X")),
        ];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let traces = partition(&visits);

        assert_eq!(traces["1"][0].minutes, 20);
        assert_eq!(traces["1"][1].finish_date, None);
    }
}
