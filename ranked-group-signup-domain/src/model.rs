use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// it needs to be ensured that the identifiers are unique per campaign, so
// integer ids hand-assigned by the collaborator are enough here

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub i32);

/// A student-assigned rank over their chosen groups, 1 = most preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u32);

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Waiting for a resolve pass.
    Submitted,
    /// The resolver placed the student into this group.
    Assigned,
    /// No seat for this choice.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentMethod {
    /// Order students by earliest submission time, then allocate by rank.
    Fcfs,
    /// Order students randomly, then allocate by rank.
    Lottery,
    /// Order students randomly and allocate to a random group with a free
    /// seat, ignoring ranks.
    Random,
}

impl fmt::Display for AssignmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "fcfs"),
            Self::Lottery => write!(f, "lottery"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// A time-boxed registration period with a set of groups and an assignment
/// method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub assignment_method: AssignmentMethod,
    /// Method of the last persisted resolve pass, if any. Advanced by the
    /// collaborator after it saves the pass results.
    pub last_resolved_method: Option<AssignmentMethod>,
}

impl Campaign {
    /// Whether the submission window is open at `instant`.
    #[must_use]
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        self.starts_at <= instant && instant <= self.ends_at
    }
}

/// A capacity-limited target a student can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub campaign_id: CampaignId,
    pub name: String,
    pub capacity: u32,
}

/// One (student, group, rank) preference record with a resolution status.
///
/// Occupancy of a group is never stored; it is always the count of
/// [`RegistrationStatus::Assigned`] registrations pointing at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub student: StudentId,
    pub group: GroupId,
    pub rank: Rank,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}
