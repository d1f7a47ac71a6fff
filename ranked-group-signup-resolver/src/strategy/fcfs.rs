use rand::seq::SliceRandom;
use rand::RngCore;
use ranked_group_signup_domain::AssignmentMethod;

use super::OrderingStrategy;
use crate::pass::ResolvePass;

/// Order students by their earliest submission instant, then allocate by
/// rank.
pub struct FirstComeFirstServed;

impl OrderingStrategy for FirstComeFirstServed {
    fn method(&self) -> AssignmentMethod {
        AssignmentMethod::Fcfs
    }

    fn allocate(&self, pass: &mut ResolvePass<'_>, rng: &mut dyn RngCore) {
        let mut order = pass.student_ids();
        // shuffle before the stable sort so students with the exact same
        // timestamp are not ordered by their id
        order.shuffle(rng);
        order.sort_by_key(|&student| pass.earliest_submission(student));
        pass.assign_by_rank(&order);
    }
}
