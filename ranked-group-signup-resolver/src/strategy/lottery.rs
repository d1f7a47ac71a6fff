use rand::seq::SliceRandom;
use rand::RngCore;
use ranked_group_signup_domain::AssignmentMethod;

use super::OrderingStrategy;
use crate::pass::ResolvePass;

/// Shuffle the students uniformly, then allocate by rank. Submission time
/// plays no role.
pub struct Lottery;

impl OrderingStrategy for Lottery {
    fn method(&self) -> AssignmentMethod {
        AssignmentMethod::Lottery
    }

    fn allocate(&self, pass: &mut ResolvePass<'_>, rng: &mut dyn RngCore) {
        let mut order = pass.student_ids();
        order.shuffle(rng);
        pass.assign_by_rank(&order);
    }
}
