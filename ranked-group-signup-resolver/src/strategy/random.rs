use rand::seq::SliceRandom;
use rand::RngCore;
use ranked_group_signup_domain::AssignmentMethod;

use super::OrderingStrategy;
use crate::pass::ResolvePass;

/// Shuffle the students and drop each into a uniformly drawn group that
/// still has a seat. Ranks are ignored entirely; only the set of open
/// groups at the moment of the draw matters.
pub struct RandomDraw;

impl OrderingStrategy for RandomDraw {
    fn method(&self) -> AssignmentMethod {
        AssignmentMethod::Random
    }

    fn allocate(&self, pass: &mut ResolvePass<'_>, rng: &mut dyn RngCore) {
        let mut order = pass.student_ids();
        order.shuffle(rng);

        for student in order {
            let open = pass.open_groups();
            if let Some(&group) = open.choose(rng) {
                // the upstream every-group-ranked rule makes this lookup
                // total; a missing registration just leaves the student
                // unseated
                pass.assign_to_group(student, group);
            }
            pass.finalize_student(student);
        }
    }
}
