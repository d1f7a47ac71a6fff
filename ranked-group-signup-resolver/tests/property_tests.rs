// Property-based tests: whatever the snapshot shape, the seed and the
// method, a resolve pass must end in a lawful terminal state.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ranked_group_signup_domain::{
    AssignmentMethod, Campaign, CampaignId, Group, GroupId, Rank, Registration,
    RegistrationStatus, StudentId,
};
use ranked_group_signup_resolver::resolve;

fn campaign(method: AssignmentMethod) -> Campaign {
    Campaign {
        id: CampaignId(1),
        title: "prop labs".to_owned(),
        starts_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap(),
        assignment_method: method,
        last_resolved_method: None,
    }
}

fn build_snapshot(
    capacities: &[u32],
    students: usize,
    time_spread: u32,
) -> (Vec<Group>, Vec<Registration>) {
    let groups: Vec<Group> = capacities
        .iter()
        .enumerate()
        .map(|(idx, &capacity)| Group {
            id: GroupId(i32::try_from(idx).unwrap() + 1),
            campaign_id: CampaignId(1),
            name: format!("G{}", idx + 1),
            capacity,
        })
        .collect();

    let mut registrations = Vec::new();
    for student in 0..students {
        let minute = u32::try_from(student).unwrap() % (time_spread + 1);
        let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 10, minute, 0).unwrap();
        for rank in 0..groups.len() {
            let group = &groups[(student + rank) % groups.len()];
            registrations.push(Registration {
                student: StudentId(i32::try_from(student).unwrap() + 1),
                group: group.id,
                rank: Rank(u32::try_from(rank).unwrap() + 1),
                status: RegistrationStatus::Submitted,
                created_at,
            });
        }
    }
    (groups, registrations)
}

fn method_from(idx: usize) -> AssignmentMethod {
    [
        AssignmentMethod::Fcfs,
        AssignmentMethod::Lottery,
        AssignmentMethod::Random,
    ][idx % 3]
}

proptest! {
    #[test]
    fn resolve_never_breaks_the_invariants(
        seed: u64,
        capacities in prop::collection::vec(0u32..4, 1..6),
        students in 1usize..20,
        method_idx in 0usize..3,
        time_spread in 0u32..5,
    ) {
        let campaign = campaign(method_from(method_idx));
        let (groups, mut registrations) = build_snapshot(&capacities, students, time_spread);
        let mut rng = StdRng::seed_from_u64(seed);

        let stats = resolve(&campaign, &groups, &mut registrations, &mut rng);

        // capacity invariant
        for group in &groups {
            let assigned = registrations
                .iter()
                .filter(|reg| reg.group == group.id && reg.status == RegistrationStatus::Assigned)
                .count();
            prop_assert!(assigned as u32 <= group.capacity);
        }

        // at most one seat per student
        for student in 1..=students {
            let seats = registrations
                .iter()
                .filter(|reg| {
                    reg.student == StudentId(i32::try_from(student).unwrap())
                        && reg.status == RegistrationStatus::Assigned
                })
                .count();
            prop_assert!(seats <= 1);
        }

        // totality
        prop_assert!(registrations
            .iter()
            .all(|reg| reg.status != RegistrationStatus::Submitted));

        // stats agree with the snapshot
        let assigned_total = registrations
            .iter()
            .filter(|reg| reg.status == RegistrationStatus::Assigned)
            .count();
        prop_assert_eq!(stats.total_assigned as usize, assigned_total);
        prop_assert_eq!(stats.students_processed, students);

        // a pass can never seat more than the campaign offers, nor more
        // students than exist
        let seats: u32 = capacities.iter().sum();
        prop_assert!(stats.total_assigned <= seats);
        prop_assert!(stats.total_assigned as usize <= students);
    }

    #[test]
    fn rank_honoring_methods_fill_all_reachable_seats(
        seed: u64,
        capacities in prop::collection::vec(1u32..4, 1..5),
        extra_students in 0usize..10,
        method_idx in 0usize..2,
    ) {
        // every student ranks every group, so with at least as many
        // students as seats no seat may stay empty
        let seats: u32 = capacities.iter().sum();
        let students = seats as usize + extra_students;
        let campaign = campaign(method_from(method_idx));
        let (groups, mut registrations) = build_snapshot(&capacities, students, 3);
        let mut rng = StdRng::seed_from_u64(seed);

        let stats = resolve(&campaign, &groups, &mut registrations, &mut rng);

        prop_assert_eq!(stats.total_assigned, seats);
    }
}
