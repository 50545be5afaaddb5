//! Encounter ordering and the gap since each patient's previous encounter.

use std::cmp::Ordering;

use encounter_model::EncounterRow;

/// Missing values sort after every present value.
fn cmp_missing_last<T: Ord>(left: &Option<T>, right: &Option<T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by patient number, then encounter date.
///
/// Rows without a patient number or date go last within their level; ties
/// keep their original relative order.
pub fn sort_encounters(rows: &mut [EncounterRow]) {
    rows.sort_by(|left, right| {
        cmp_missing_last(&left.patient_number, &right.patient_number)
            .then_with(|| cmp_missing_last(&left.form_date, &right.form_date))
    });
}

/// Whole days between consecutive encounters of the same patient.
///
/// Expects rows already sorted. The first encounter of each patient, rows
/// without a patient number, and any gap where either date is missing get 0.
/// The difference is truncated toward zero.
pub fn assign_days_between(rows: &mut [EncounterRow]) {
    let gaps: Vec<i64> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let Some(previous) = idx.checked_sub(1).map(|prev| &rows[prev]) else {
                return 0;
            };
            if row.patient_number.is_none() || previous.patient_number != row.patient_number {
                return 0;
            }
            match (previous.form_date, row.form_date) {
                (Some(previous), Some(current)) => (current - previous).num_days(),
                _ => 0,
            }
        })
        .collect();
    for (row, gap) in rows.iter_mut().zip(gaps) {
        row.days_between_encounter = gap;
    }
}
