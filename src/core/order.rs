//! Display ordering for hour packages.
//!
//! A single named comparator instead of per-screen sort callbacks: packages
//! group first by when they occur in the week, then unconditional commitments
//! before rotating ones, then by the shape of the rotation. The result is a
//! total order, so sorting is deterministic and idempotent.

use crate::domain::model::HourPackage;
use std::cmp::Ordering;

/// Packages without a day sort after every package that has one.
const MISSING_DAY: u8 = 99;

/// Sentinel for a missing position when comparing cycle-week sequences;
/// larger than any real week number so a strict prefix sorts first.
const MISSING_WEEK: u16 = 999;

/// Total order over canonical packages. Tie-break sequence: day of week,
/// start time, recurrence class (non-recurring first), cycle pattern,
/// end time, school id (numeric-aware), type label.
pub fn compare_packages(a: &HourPackage, b: &HourPackage) -> Ordering {
    let day_a = a.schedule.day_of_week.unwrap_or(MISSING_DAY);
    let day_b = b.schedule.day_of_week.unwrap_or(MISSING_DAY);

    day_a
        .cmp(&day_b)
        // Fixed-width zero-padded HH:MM, so the string compare is the time
        // compare
        .then_with(|| a.schedule.start_time.cmp(&b.schedule.start_time))
        .then_with(|| a.schedule.recurring.cmp(&b.schedule.recurring))
        .then_with(|| {
            if a.schedule.recurring && b.schedule.recurring {
                compare_cycles(&a.schedule.cycle_weeks, &b.schedule.cycle_weeks)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| a.schedule.end_time.cmp(&b.schedule.end_time))
        .then_with(|| {
            natural_cmp(
                a.school_ref.as_deref().unwrap_or(""),
                b.school_ref.as_deref().unwrap_or(""),
            )
        })
        .then_with(|| a.package_type.label().cmp(b.package_type.label()))
}

pub fn sort_packages(packages: &mut [HourPackage]) {
    packages.sort_by(compare_packages);
}

/// Lexicographic compare of two cycle-week sequences. The normalizer
/// guarantees both are deduplicated and ascending, so element-by-element
/// comparison with the missing-position sentinel yields `[1] < [1,3] < [2]`.
fn compare_cycles(a: &[u8], b: &[u8]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let wa = a.get(i).map(|w| u16::from(*w)).unwrap_or(MISSING_WEEK);
        let wb = b.get(i).map(|w| u16::from(*w)).unwrap_or(MISSING_WEEK);
        match wa.cmp(&wb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Numeric-aware string compare: digit runs are compared by value, so
/// "9" sorts before "10" and "A2" before "A10". Runs that differ only in
/// leading zeros compare equal and the scan continues.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let run_a = digit_run(a, &mut i);
            let run_b = digit_run(b, &mut j);
            let ord = run_a
                .len()
                .cmp(&run_b.len())
                .then_with(|| run_a.cmp(run_b));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            match a[i].cmp(&b[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                other => return other,
            }
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

/// Consume a run of ASCII digits starting at `*pos`, returning it with
/// leading zeros stripped (a run of all zeros keeps one).
fn digit_run<'a>(s: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    while *pos < s.len() && s[*pos].is_ascii_digit() {
        *pos += 1;
    }
    let run = &s[start..*pos];
    let zeros = run.iter().take_while(|c| **c == b'0').count();
    if zeros == run.len() {
        &run[run.len() - 1..]
    } else {
        &run[zeros..]
    }
}
