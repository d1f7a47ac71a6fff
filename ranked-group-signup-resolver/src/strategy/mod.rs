//! The interchangeable ordering policies of a resolve pass.
//!
//! All three walk the same per-student buckets and mutate the same
//! occupancy table; they differ only in how students are ordered and, for
//! [`RandomDraw`], in whether the ranking is honored at all.

pub mod fcfs;
pub mod lottery;
pub mod random;

use rand::RngCore;
use ranked_group_signup_domain::AssignmentMethod;

pub use self::fcfs::FirstComeFirstServed;
pub use self::lottery::Lottery;
pub use self::random::RandomDraw;
use crate::pass::ResolvePass;

pub trait OrderingStrategy {
    fn method(&self) -> AssignmentMethod;

    /// Order the students and seat them. Afterwards every registration of
    /// the pass is in a terminal state.
    ///
    /// The random source is injected so callers can seed it; none of the
    /// strategies reaches for a global generator.
    fn allocate(&self, pass: &mut ResolvePass<'_>, rng: &mut dyn RngCore);
}

/// Strategy for a campaign's selected method. Total over the enum.
#[must_use]
pub fn strategy_for(method: AssignmentMethod) -> Box<dyn OrderingStrategy> {
    match method {
        AssignmentMethod::Fcfs => Box::new(FirstComeFirstServed),
        AssignmentMethod::Lottery => Box::new(Lottery),
        AssignmentMethod::Random => Box::new(RandomDraw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_matches_every_method() {
        for method in [
            AssignmentMethod::Fcfs,
            AssignmentMethod::Lottery,
            AssignmentMethod::Random,
        ] {
            assert_eq!(strategy_for(method).method(), method);
        }
    }
}
