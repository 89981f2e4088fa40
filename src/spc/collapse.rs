use indexmap::IndexMap;
use log::{debug, info};

use super::limits::ControlLimits;
use super::records::{CollapsedVisit, Visit, NOT_COMPLETE};

/// Folds the unified table into one row per identifier.
///
/// Runs over every reconciled visit, completed or not. Duplicated identifiers get their
/// minutes summed and their visit count recorded; singletons keep their own minutes and
/// leave the count unset. Metadata comes from the visit with the earliest finish date
/// (visits without one rank last, ties keep table order).
pub fn collapse(visits: &[Visit]) -> Vec<CollapsedVisit> {
    let groups = group_by_id(visits);

    let collapsed: Vec<CollapsedVisit> = groups
        .into_iter()
        .filter_map(|(id, group)| collapse_group(id, &group))
        .collect();

    info!(
        "Collapsed {} visits into {} inspections",
        visits.len(),
        collapsed.len()
    );

    collapsed
}

fn group_by_id(visits: &[Visit]) -> IndexMap<&str, Vec<&Visit>> {
    visits.iter().fold(IndexMap::new(), |mut groups, visit| {
        groups
            .entry(visit.id.as_str())
            .or_insert_with(Vec::new)
            .push(visit);
        groups
    })
}

fn collapse_group(id: &str, group: &[&Visit]) -> Option<CollapsedVisit> {
    let representative = group
        .iter()
        .min_by_key(|v| (v.finish_date.is_none(), v.finish_date))
        .copied()?;

    let minutes = group.iter().map(|v| v.minutes).sum();
    let visit_count = (group.len() > 1).then_some(group.len());

    if visit_count.is_some() {
        debug!("Identifier {id} has {} visits", group.len());
        if has_conflicting_metadata(group) {
            debug!(
                "Identifier {id} visits disagree on site or description, keeping {:?}",
                representative.description
            );
        }
    }

    Some(CollapsedVisit {
        id: id.to_string(),
        external_reference: representative.reference_key().to_string(),
        site: representative.site.clone(),
        description: or_not_complete(Some(&representative.description)),
        name: or_not_complete(representative.name.as_deref()),
        scheduled: representative.scheduled,
        finish_date: representative.finish_date,
        minutes,
        visit_count,
        expected_minutes: representative.expected_minutes,
        limits: ControlLimits::around(representative.expected_minutes),
    })
}

fn has_conflicting_metadata(group: &[&Visit]) -> bool {
    group.windows(2).any(|pair| {
        pair[0].site != pair[1].site || pair[0].description != pair[1].description
    })
}

fn or_not_complete(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_COMPLETE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::reconcile::reconcile;
    use crate::spc::test_support::{completion, day, job, named_completion};

    #[test]
    fn test_duplicates_are_summed_and_counted() {
        let completions = vec![
            completion("1", "0:10", "01/01/2021", Some("X")),
            completion("1", "0:20", "02/01/2021", Some("X")),
            completion("1", "0:30", "03/01/2021", Some("X")),
        ];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let collapsed = collapse(&visits);

        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].minutes, 60);
        assert_eq!(collapsed[0].visit_count, Some(3));
    }

    #[test]
    fn test_singleton_keeps_its_duration() {
        let completions = vec![completion("1", "0:45", "01/01/2021", Some("X"))];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let collapsed = collapse(&visits);

        assert_eq!(collapsed[0].minutes, 45);
        assert_eq!(collapsed[0].visit_count, None);
    }

    #[test]
    fn test_one_row_per_identifier_and_sum_preserved() {
        let schedule = vec![job("1", "Boiler", 1.0), job("2", "Meter", 1.0), job("3", "Meter", 1.0)];
        let completions = vec![
            completion("2", "0:05", "01/01/2021", Some("X")),
            completion("1", "0:10", "01/01/2021", Some("X")),
            completion("2", "0:07", "04/01/2021", Some("X")),
        ];
        let visits = reconcile(&schedule, &completions).unwrap();

        let collapsed = collapse(&visits);

        let ids: Vec<_> = collapsed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        let total: i64 = visits.iter().map(|v| v.minutes).sum();
        assert_eq!(collapsed.iter().map(|c| c.minutes).sum::<i64>(), total);
    }

    #[test]
    fn test_metadata_comes_from_earliest_finish() {
        let completions = vec![
            named_completion("1", "0:10", "05/01/2021", "Late Operative"),
            named_completion("1", "0:10", "", "Unfinished Operative"),
            named_completion("1", "0:10", "02/01/2021", "Early Operative"),
        ];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let collapsed = collapse(&visits);

        assert_eq!(collapsed[0].name, "Early Operative");
        assert_eq!(collapsed[0].finish_date, Some(day("02/01/2021")));
    }

    #[test]
    fn test_unmatched_jobs_stay_separate_and_are_labelled() {
        let schedule = vec![job("8", "Boiler", 1.0), job("9", "Boiler", 1.0)];
        let visits = reconcile(&schedule, &[]).unwrap();

        let collapsed = collapse(&visits);

        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].external_reference, "8");
        assert_eq!(collapsed[1].external_reference, "9");
        assert!(collapsed.iter().all(|c| c.name == NOT_COMPLETE));
    }

    #[test]
    fn test_blank_description_gets_sentinel() {
        let visits = reconcile(&[job("1", "  ", 1.0)], &[]).unwrap();

        assert_eq!(collapse(&visits)[0].description, NOT_COMPLETE);
    }

    #[test]
    fn test_incomplete_visits_count_towards_duplicates() {
        let completions = vec![
            completion("1", "0:15", "01/01/2021", Some("X")),
            completion("1", "0:25", "", None),
        ];
        let visits = reconcile(&[job("1", "Boiler", 1.0)], &completions).unwrap();

        let collapsed = collapse(&visits);

        assert_eq!(collapsed[0].minutes, 40);
        assert_eq!(collapsed[0].visit_count, Some(2));
    }
}
