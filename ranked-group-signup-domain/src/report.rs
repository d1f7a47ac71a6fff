//! Read-only views over a campaign's registration set, for the reporting
//! surfaces that consume resolve results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{
    Campaign, CampaignId, Group, GroupId, Rank, Registration, RegistrationStatus, StudentId,
};

/// Demand and occupancy of one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub group: GroupId,
    pub name: String,
    pub capacity: u32,
    /// Students the resolver placed here.
    pub assigned: u32,
    /// Students who put this group on rank 1 and were not rejected from it.
    pub first_choice_demand: u32,
    pub is_full: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub campaign: CampaignId,
    pub title: String,
    pub total_assigned: u32,
    pub groups: Vec<GroupStats>,
}

/// Stats for every group of the campaign, groups ordered by id.
#[must_use]
pub fn campaign_report(
    campaign: &Campaign,
    groups: &[Group],
    registrations: &[Registration],
) -> CampaignReport {
    let mut stats: Vec<GroupStats> = groups
        .iter()
        .filter(|group| group.campaign_id == campaign.id)
        .map(|group| {
            let assigned = count_status(registrations, group.id, RegistrationStatus::Assigned);
            let first_choice_demand = registrations
                .iter()
                .filter(|reg| {
                    reg.group == group.id
                        && reg.rank == Rank(1)
                        && reg.status != RegistrationStatus::Rejected
                })
                .count() as u32;
            GroupStats {
                group: group.id,
                name: group.name.clone(),
                capacity: group.capacity,
                assigned,
                first_choice_demand,
                is_full: assigned >= group.capacity,
            }
        })
        .collect();
    stats.sort_by_key(|entry| entry.group);

    CampaignReport {
        campaign: campaign.id,
        title: campaign.title.clone(),
        total_assigned: stats.iter().map(|entry| entry.assigned).sum(),
        groups: stats,
    }
}

fn count_status(registrations: &[Registration], group: GroupId, status: RegistrationStatus) -> u32 {
    registrations
        .iter()
        .filter(|reg| reg.group == group && reg.status == status)
        .count() as u32
}

/// One line of a student's "my groups" view.
#[derive(Debug, Clone, Serialize)]
pub struct StudentOutcome {
    pub group: GroupId,
    pub group_name: String,
    pub rank: Rank,
    pub status: RegistrationStatus,
    pub submitted_at: DateTime<Utc>,
}

/// All of one student's registrations with the group names joined in,
/// ordered by rank.
#[must_use]
pub fn student_outcomes(
    groups: &[Group],
    registrations: &[Registration],
    student: StudentId,
) -> Vec<StudentOutcome> {
    let mut outcomes: Vec<StudentOutcome> = registrations
        .iter()
        .filter(|reg| reg.student == student)
        .map(|reg| StudentOutcome {
            group: reg.group,
            group_name: groups
                .iter()
                .find(|group| group.id == reg.group)
                .map(|group| group.name.clone())
                .unwrap_or_default(),
            rank: reg.rank,
            status: reg.status,
            submitted_at: reg.created_at,
        })
        .collect();
    outcomes.sort_by_key(|outcome| outcome.rank);
    outcomes
}

/// Final seating of one group.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub group: GroupId,
    pub name: String,
    pub students: Vec<StudentId>,
}

/// The exported assignment roster: for every group of the campaign, the
/// students placed in it. Groups and students are ordered by id so the
/// export is stable.
#[must_use]
pub fn roster(
    campaign: &Campaign,
    groups: &[Group],
    registrations: &[Registration],
) -> Vec<RosterEntry> {
    let mut entries: Vec<RosterEntry> = groups
        .iter()
        .filter(|group| group.campaign_id == campaign.id)
        .map(|group| {
            let mut students: Vec<StudentId> = registrations
                .iter()
                .filter(|reg| {
                    reg.group == group.id && reg.status == RegistrationStatus::Assigned
                })
                .map(|reg| reg.student)
                .collect();
            students.sort_unstable();
            RosterEntry {
                group: group.id,
                name: group.name.clone(),
                students,
            }
        })
        .collect();
    entries.sort_by_key(|entry| entry.group);
    entries
}
