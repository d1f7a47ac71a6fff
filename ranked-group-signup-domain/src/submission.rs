//! Upstream validation of a student's ranked preference list.
//!
//! The resolver assumes every student ranked every group of the campaign
//! exactly once with pairwise distinct positive ranks. This is where that
//! contract is enforced, before any registration record exists.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::SubmissionError;
use crate::model::{Campaign, Group, GroupId, Rank, Registration, RegistrationStatus, StudentId};

/// One entry of a student's ranking, as handed in by the submission flow.
#[derive(Debug, Clone, Copy)]
pub struct RankedChoice {
    pub group: GroupId,
    pub rank: Rank,
}

/// Validate a ranking and turn it into one [`RegistrationStatus::Submitted`]
/// record per group, all stamped with the same submission instant.
///
/// `existing` is the campaign's current registration set; a student with any
/// record in it already submitted and is locked out of resubmitting.
pub fn submit_ranking(
    campaign: &Campaign,
    groups: &[Group],
    existing: &[Registration],
    student: StudentId,
    choices: &[RankedChoice],
    now: DateTime<Utc>,
) -> Result<Vec<Registration>, SubmissionError> {
    if choices.is_empty() {
        return Err(SubmissionError::EmptyRanking);
    }
    if !campaign.is_open_at(now) {
        return Err(SubmissionError::CampaignClosed(campaign.id));
    }
    if existing.iter().any(|reg| reg.student == student) {
        return Err(SubmissionError::AlreadySubmitted(student));
    }

    let campaign_groups: HashSet<GroupId> = groups
        .iter()
        .filter(|group| group.campaign_id == campaign.id)
        .map(|group| group.id)
        .collect();
    let ranked_groups: HashSet<GroupId> = choices.iter().map(|choice| choice.group).collect();
    if ranked_groups != campaign_groups || choices.len() != campaign_groups.len() {
        return Err(SubmissionError::RankingMismatch);
    }

    let mut seen_ranks = HashSet::new();
    for choice in choices {
        if choice.rank == Rank(0) {
            return Err(SubmissionError::ZeroRank);
        }
        if !seen_ranks.insert(choice.rank) {
            return Err(SubmissionError::DuplicateRank(choice.rank));
        }
    }

    debug!(student = student.0, count = choices.len(), "ranking accepted");

    Ok(choices
        .iter()
        .map(|choice| Registration {
            student,
            group: choice.group,
            rank: choice.rank,
            status: RegistrationStatus::Submitted,
            created_at: now,
        })
        .collect())
}
