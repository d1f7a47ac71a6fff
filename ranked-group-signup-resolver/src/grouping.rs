//! Turns the flat registration list into per-student buckets the ordering
//! strategies walk.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ranked_group_signup_domain::{Registration, RegistrationStatus, StudentId};

/// One student's choices within a resolve pass, held as indices into the
/// registration slice so the pass keeps a single exclusive borrow of it.
#[derive(Debug)]
pub struct StudentChoices {
    /// Indices ascending by rank.
    pub ordered: Vec<usize>,
    /// The student's registrations can be created milliseconds apart, so the
    /// first-come order uses the earliest of them.
    pub earliest_submission: DateTime<Utc>,
}

/// Reset every registration to [`RegistrationStatus::Submitted`] and bucket
/// the slice by student, each bucket ordered by ascending rank.
///
/// The reset erases any outcome of a previous pass, which is what makes a
/// repeated resolve start from a clean slate instead of stale marks.
pub fn bucket_by_student(
    registrations: &mut [Registration],
) -> BTreeMap<StudentId, StudentChoices> {
    let mut students: BTreeMap<StudentId, StudentChoices> = BTreeMap::new();

    for (idx, registration) in registrations.iter_mut().enumerate() {
        registration.status = RegistrationStatus::Submitted;

        let entry = students
            .entry(registration.student)
            .or_insert_with(|| StudentChoices {
                ordered: Vec::new(),
                earliest_submission: registration.created_at,
            });
        entry.ordered.push(idx);
        if registration.created_at < entry.earliest_submission {
            entry.earliest_submission = registration.created_at;
        }
    }

    for choices in students.values_mut() {
        choices.ordered.sort_by_key(|&idx| registrations[idx].rank);
    }

    students
}
