//! Mutable state of one resolve pass: the registration slice under an
//! exclusive borrow, the per-student buckets, and the occupancy table.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use ranked_group_signup_domain::{Group, GroupId, Registration, RegistrationStatus, StudentId};

use crate::grouping::{bucket_by_student, StudentChoices};

pub struct ResolvePass<'a> {
    registrations: &'a mut [Registration],
    students: BTreeMap<StudentId, StudentChoices>,
    capacities: HashMap<GroupId, u32>,
    occupancy: HashMap<GroupId, u32>,
    /// Campaign group ids in ascending order, the base order for draws.
    group_ids: Vec<GroupId>,
}

impl<'a> ResolvePass<'a> {
    /// Rebuilds the pass state from the snapshot: statuses reset, buckets
    /// grouped, occupancy zeroed. Capacities are read-only for the whole
    /// pass.
    pub fn new(groups: &[Group], registrations: &'a mut [Registration]) -> Self {
        let students = bucket_by_student(registrations);
        Self {
            registrations,
            students,
            capacities: groups.iter().map(|group| (group.id, group.capacity)).collect(),
            occupancy: groups.iter().map(|group| (group.id, 0)).collect(),
            group_ids: groups.iter().map(|group| group.id).sorted().collect(),
        }
    }

    /// All bucketed student ids in ascending order. Strategies shuffle this
    /// themselves; the sorted base order keeps seeded draws reproducible.
    #[must_use]
    pub fn student_ids(&self) -> Vec<StudentId> {
        self.students.keys().copied().collect()
    }

    #[must_use]
    pub fn earliest_submission(&self, student: StudentId) -> DateTime<Utc> {
        self.students[&student].earliest_submission
    }

    /// Groups that still have a free seat, in ascending id order.
    #[must_use]
    pub fn open_groups(&self) -> Vec<GroupId> {
        self.group_ids
            .iter()
            .copied()
            .filter(|&group| self.has_room(group))
            .collect()
    }

    fn has_room(&self, group: GroupId) -> bool {
        let used = self.occupancy.get(&group).copied().unwrap_or(0);
        let capacity = self.capacities.get(&group).copied().unwrap_or(0);
        used < capacity
    }

    /// The shared allocation rule of the rank-honoring strategies: walk each
    /// student in `order` and seat them in the first group of their ranking
    /// that still has room. Every student leaves in a terminal state.
    pub fn assign_by_rank(&mut self, order: &[StudentId]) {
        for &student in order {
            let choices = self.students[&student].ordered.clone();
            let mut seated = false;
            for idx in choices {
                let group = self.registrations[idx].group;
                if !seated && self.has_room(group) {
                    self.registrations[idx].status = RegistrationStatus::Assigned;
                    *self.occupancy.entry(group).or_insert(0) += 1;
                    seated = true;
                } else {
                    self.registrations[idx].status = RegistrationStatus::Rejected;
                }
            }
            self.finalize_student(student);
        }
    }

    /// Seat `student` in `group` regardless of where they ranked it. Returns
    /// false when the student has no registration for that group, leaving
    /// them unseated for the finalizer to reject.
    pub fn assign_to_group(&mut self, student: StudentId, group: GroupId) -> bool {
        let found = self.students[&student]
            .ordered
            .iter()
            .copied()
            .find(|&idx| self.registrations[idx].group == group);
        match found {
            Some(idx) => {
                self.registrations[idx].status = RegistrationStatus::Assigned;
                *self.occupancy.entry(group).or_insert(0) += 1;
                true
            }
            None => false,
        }
    }

    /// Terminal-state guarantee: whatever the strategy did, every
    /// registration of `student` that is not assigned ends up rejected.
    /// Running this twice changes nothing.
    pub fn finalize_student(&mut self, student: StudentId) {
        for idx in self.students[&student].ordered.clone() {
            if self.registrations[idx].status != RegistrationStatus::Assigned {
                self.registrations[idx].status = RegistrationStatus::Rejected;
            }
        }
    }

    #[must_use]
    pub fn students_processed(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn assigned_total(&self) -> u32 {
        self.occupancy.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ranked_group_signup_domain::{CampaignId, Rank};

    use super::*;

    fn group(id: i32, capacity: u32) -> Group {
        Group {
            id: GroupId(id),
            campaign_id: CampaignId(1),
            name: format!("L{id}"),
            capacity,
        }
    }

    fn reg(student: i32, group: i32, rank: u32) -> Registration {
        Registration {
            student: StudentId(student),
            group: GroupId(group),
            rank: Rank(rank),
            status: RegistrationStatus::Submitted,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn rank_walk_falls_through_to_the_next_open_group() {
        let groups = vec![group(1, 1), group(2, 1)];
        let mut registrations = vec![
            reg(10, 1, 1),
            reg(10, 2, 2),
            reg(11, 1, 1),
            reg(11, 2, 2),
        ];
        let mut pass = ResolvePass::new(&groups, &mut registrations);

        pass.assign_by_rank(&[StudentId(10), StudentId(11)]);

        assert_eq!(registrations[0].status, RegistrationStatus::Assigned);
        assert_eq!(registrations[1].status, RegistrationStatus::Rejected);
        assert_eq!(registrations[2].status, RegistrationStatus::Rejected);
        assert_eq!(registrations[3].status, RegistrationStatus::Assigned);
    }

    #[test]
    fn zero_capacity_groups_never_seat_anyone() {
        let groups = vec![group(1, 0)];
        let mut registrations = vec![reg(10, 1, 1)];
        let mut pass = ResolvePass::new(&groups, &mut registrations);

        assert!(pass.open_groups().is_empty());
        pass.assign_by_rank(&[StudentId(10)]);

        assert_eq!(registrations[0].status, RegistrationStatus::Rejected);
    }

    #[test]
    fn finalize_is_idempotent() {
        let groups = vec![group(1, 1), group(2, 1)];
        let mut registrations = vec![reg(10, 1, 1), reg(10, 2, 2)];
        let mut pass = ResolvePass::new(&groups, &mut registrations);

        assert!(pass.assign_to_group(StudentId(10), GroupId(2)));
        pass.finalize_student(StudentId(10));
        pass.finalize_student(StudentId(10));

        assert_eq!(registrations[0].status, RegistrationStatus::Rejected);
        assert_eq!(registrations[1].status, RegistrationStatus::Assigned);
    }

    #[test]
    fn assigning_an_unranked_group_reports_failure() {
        let groups = vec![group(1, 1), group(2, 1)];
        let mut registrations = vec![reg(10, 1, 1)];
        let mut pass = ResolvePass::new(&groups, &mut registrations);

        assert!(!pass.assign_to_group(StudentId(10), GroupId(2)));
        pass.finalize_student(StudentId(10));

        assert_eq!(registrations[0].status, RegistrationStatus::Rejected);
    }
}
