//! Assignment resolution for a registration campaign.
//!
//! One resolve pass takes a snapshot of a campaign's groups and
//! registrations, orders the students according to the campaign's method and
//! seats them greedily. Statuses are mutated in place under an exclusive
//! borrow; capacities are never written. The pass is total: well-formed
//! input cannot make it fail, and every registration leaves in a terminal
//! state.
//!
//! Storage, transport and identity are the collaborator's business — it
//! loads the snapshot, calls [`resolve`], persists the mutated statuses
//! together with the advanced method marker, and reports the returned stats.

pub mod grouping;
pub mod pass;
pub mod strategy;

use rand::RngCore;
use ranked_group_signup_domain::{AssignmentMethod, Campaign, Group, Registration};
use serde::Serialize;
use tracing::{debug, info};

use crate::pass::ResolvePass;
use crate::strategy::strategy_for;

/// Aggregate outcome of one resolve pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    /// Distinct students considered.
    pub students_processed: usize,
    /// Registrations that ended up assigned, summed over all groups.
    pub total_assigned: u32,
    pub method: AssignmentMethod,
}

/// Run one resolve pass over the campaign's registration snapshot.
///
/// Every pass starts by resetting all statuses, so re-running with the same
/// snapshot and method is idempotent in outcome, and running after the
/// snapshot changed recomputes from scratch. The caller must not run two
/// passes over the same campaign concurrently; the exclusive borrow of the
/// slice enforces that within a process.
pub fn resolve<R: RngCore>(
    campaign: &Campaign,
    groups: &[Group],
    registrations: &mut [Registration],
    rng: &mut R,
) -> ResolutionStats {
    let method = campaign.assignment_method;

    if registrations.is_empty() {
        return ResolutionStats {
            students_processed: 0,
            total_assigned: 0,
            method,
        };
    }

    let mut pass = ResolvePass::new(groups, registrations);
    debug!(
        campaign = campaign.id.0,
        %method,
        students = pass.students_processed(),
        "starting resolve pass"
    );

    strategy_for(method).allocate(&mut pass, rng);

    let stats = ResolutionStats {
        students_processed: pass.students_processed(),
        total_assigned: pass.assigned_total(),
        method,
    };
    info!(
        campaign = campaign.id.0,
        students = stats.students_processed,
        assigned = stats.total_assigned,
        %method,
        "resolve pass finished"
    );
    stats
}

/// Whether a fresh pass is due: the campaign's selected method differs from
/// the last persisted one, or the caller forces a re-draw.
#[must_use]
pub fn needs_resolution(campaign: &Campaign, force: bool) -> bool {
    force || campaign.last_resolved_method != Some(campaign.assignment_method)
}

/// Advance the marker once the collaborator has persisted the pass results.
pub fn mark_resolved(campaign: &mut Campaign) {
    campaign.last_resolved_method = Some(campaign.assignment_method);
}
