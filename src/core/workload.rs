//! Workload aggregation: folds a team's (or a professional's) packages into
//! summary metrics anchored on the baseline week.
//!
//! A rotating package only occurs in a subset of calendar weeks, so summing
//! hours over every package would overstate the steady-state weekly load.
//! Anchoring on cycle-week 1 gives one reproducible snapshot that is
//! comparable across teams regardless of how individual rotations are
//! phased. This is a fixed convention, not a calendar simulation.

use crate::domain::model::{HourPackage, WorkloadSnapshot};
use std::collections::BTreeSet;

/// The single predicate deciding which packages count toward the baseline
/// week: non-recurring ones always, recurring ones when their cycle is
/// empty (active every week) or explicitly includes week 1.
pub fn is_active_in_baseline_week(pkg: &HourPackage) -> bool {
    if !pkg.schedule.recurring {
        return true;
    }
    pkg.schedule.cycle_weeks.is_empty() || pkg.schedule.cycle_weeks.contains(&1)
}

/// Fold a set of packages into a workload snapshot.
///
/// `linked_school_count` is the number of schools linked to the team, not
/// just those with baseline-week coverage: a team with uncovered schools
/// must show a correspondingly lower average. Zero linked schools yields an
/// average of 0.
pub fn summarize(packages: &[HourPackage], linked_school_count: usize) -> WorkloadSnapshot {
    let total_hours: f64 = packages.iter().map(|p| p.quantity_hours).sum();

    let baseline_week_packages: Vec<HourPackage> = packages
        .iter()
        .filter(|p| is_active_in_baseline_week(p))
        .cloned()
        .collect();

    let hours_in_schools: f64 = baseline_week_packages
        .iter()
        .filter(|p| p.package_type.is_school())
        .map(|p| p.quantity_hours)
        .sum();

    let schools_with_baseline_hours: BTreeSet<String> = baseline_week_packages
        .iter()
        .filter(|p| p.package_type.is_school())
        .filter_map(|p| p.school_ref.clone())
        .collect();

    let average_hours_per_school = if linked_school_count == 0 {
        0.0
    } else {
        hours_in_schools / linked_school_count as f64
    };

    WorkloadSnapshot {
        total_hours,
        baseline_week_packages,
        hours_in_schools,
        schools_with_baseline_hours,
        school_count: linked_school_count,
        average_hours_per_school,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PackageType, ScheduleFragment};

    fn pkg(id: &str, tipo: &str, school: Option<&str>, hours: f64, recurring: bool, weeks: &[u8]) -> HourPackage {
        HourPackage {
            id: id.to_string(),
            package_type: PackageType::from_label(tipo),
            quantity_hours: hours,
            professional_ref: "p1".to_string(),
            team_ref: "t1".to_string(),
            school_ref: school.map(str::to_string),
            schedule: ScheduleFragment {
                day_of_week: Some(1),
                start_time: "08:00".to_string(),
                end_time: "10:00".to_string(),
                recurring,
                cycle_weeks: weeks.to_vec(),
            },
        }
    }

    #[test]
    fn test_baseline_week_inclusion() {
        assert!(is_active_in_baseline_week(&pkg("a", "School", Some("1"), 1.0, false, &[])));
        assert!(is_active_in_baseline_week(&pkg("b", "School", Some("1"), 1.0, true, &[])));
        assert!(is_active_in_baseline_week(&pkg("c", "School", Some("1"), 1.0, true, &[1, 3])));
        assert!(!is_active_in_baseline_week(&pkg("d", "School", Some("1"), 1.0, true, &[2, 3, 4])));
    }

    #[test]
    fn test_total_hours_counts_every_package() {
        let packages = vec![
            pkg("a", "School", Some("1"), 2.0, false, &[]),
            pkg("b", "School", Some("2"), 3.0, true, &[2]),
            pkg("c", "GEI-Load", None, 1.5, false, &[]),
        ];
        let snapshot = summarize(&packages, 2);
        assert_eq!(snapshot.total_hours, 6.5);
    }

    #[test]
    fn test_school_hours_exclude_non_school_types_and_off_baseline_packages() {
        let packages = vec![
            pkg("a", "School", Some("1"), 2.0, false, &[]),
            pkg("b", "School", Some("2"), 3.0, true, &[2]),
            pkg("c", "GEI-Load", None, 4.0, false, &[]),
            pkg("d", "School", Some("3"), 1.0, true, &[1, 4]),
        ];
        let snapshot = summarize(&packages, 3);

        assert_eq!(snapshot.hours_in_schools, 3.0);
        assert_eq!(
            snapshot.schools_with_baseline_hours.iter().cloned().collect::<Vec<_>>(),
            vec!["1", "3"]
        );
        assert_eq!(snapshot.baseline_week_packages.len(), 3);
    }

    #[test]
    fn test_average_divides_by_all_linked_schools() {
        // 8 baseline hours over 2 covered schools, but the team is linked
        // to 4: the average must be 8/4, not 8/2.
        let packages = vec![
            pkg("a", "School", Some("1"), 5.0, false, &[]),
            pkg("b", "School", Some("2"), 3.0, false, &[]),
        ];
        let snapshot = summarize(&packages, 4);

        assert_eq!(snapshot.hours_in_schools, 8.0);
        assert_eq!(snapshot.school_count, 4);
        assert_eq!(snapshot.average_hours_per_school, 2.0);
    }

    #[test]
    fn test_zero_linked_schools_yields_zero_average() {
        let packages = vec![pkg("a", "School", Some("1"), 5.0, false, &[])];
        let snapshot = summarize(&packages, 0);
        assert_eq!(snapshot.average_hours_per_school, 0.0);
    }

    #[test]
    fn test_empty_input_yields_all_zero_metrics() {
        let snapshot = summarize(&[], 3);
        assert_eq!(snapshot.total_hours, 0.0);
        assert_eq!(snapshot.hours_in_schools, 0.0);
        assert!(snapshot.baseline_week_packages.is_empty());
        assert!(snapshot.schools_with_baseline_hours.is_empty());
        assert_eq!(snapshot.average_hours_per_school, 0.0);
    }

    #[test]
    fn test_end_to_end_example() {
        // P1 non-recurring, P2 rotating on week 2 only
        let p1 = pkg("P1", "School", Some("A"), 2.0, false, &[]);
        let p2 = pkg("P2", "School", Some("B"), 2.0, true, &[2]);

        let mut list = vec![p2.clone(), p1.clone()];
        crate::core::order::sort_packages(&mut list);
        assert_eq!(list[0].id, "P1");
        assert_eq!(list[1].id, "P2");

        let snapshot = summarize(&list, 2);
        assert_eq!(snapshot.baseline_week_packages.len(), 1);
        assert_eq!(snapshot.baseline_week_packages[0].id, "P1");
        assert_eq!(snapshot.hours_in_schools, 2.0);
        assert_eq!(snapshot.total_hours, 4.0);
    }
}
