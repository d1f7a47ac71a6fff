use crate::model::{CampaignId, Rank, StudentId};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("the ranking is empty")]
    EmptyRanking,
    #[error("campaign {0:?} is not accepting submissions at this time")]
    CampaignClosed(CampaignId),
    #[error("student {0:?} already submitted a ranking in this campaign")]
    AlreadySubmitted(StudentId),
    #[error("every group in the campaign must be ranked exactly once")]
    RankingMismatch,
    #[error("rank {0} appears more than once")]
    DuplicateRank(Rank),
    #[error("ranks start at 1")]
    ZeroRank,
}
