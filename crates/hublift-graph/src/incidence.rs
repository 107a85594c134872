//! Node-to-hub assignment and sparse incidence assembly.

use hublift_core::LiftError;
use rayon::prelude::*;
use sprs::{CsMat, TriMat};
use tracing::{debug, warn};

use crate::distance::DistanceTable;
use crate::hubs::HubSet;

/// Lower bound applied to inverse-distance weights.
pub const MIN_INFLUENCE_WEIGHT: f64 = 1e-4;

/// One nonzero of the node by hyperedge incidence matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidenceEntry {
    /// Row: the member node.
    pub node: usize,
    /// Column: the hub slot.
    pub hyperedge: usize,
    /// Membership weight, always positive.
    pub weight: f64,
}

/// Incidence entries plus the non-fatal conditions met while producing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidenceOutcome {
    /// Entries ordered by node, then by assignment order.
    pub entries: Vec<IncidenceEntry>,
    /// Number of inverse-distance weights raised to [`MIN_INFLUENCE_WEIGHT`].
    pub floored_weights: usize,
    /// Non-hub nodes with no reachable hub; their rows stay empty.
    pub unassigned: Vec<usize>,
}

/// Inverse-distance weight `max(1 / d, MIN_INFLUENCE_WEIGHT)`.
///
/// A hub at distance 0 (only reachable through zero-weight edges) gets weight 1, the same
/// as a hub's own membership. Subnormal distances saturate at `f64::MAX`.
pub fn influence_weight(distance: f64) -> f64 {
    if distance > 0.0 {
        (1.0 / distance).clamp(MIN_INFLUENCE_WEIGHT, f64::MAX)
    } else {
        1.0
    }
}

struct NodeAssignment {
    entries: Vec<IncidenceEntry>,
    floored: usize,
    unassigned: bool,
}

/// Assigns every node of `distances` to hyperedges.
///
/// Hubs join only their own hyperedge with weight 1. Every other node joins up to
/// `n_most_influential` of its reachable hubs, nearest first; equally distant hubs keep
/// traversal order. Weights are 1 unless `weight_influence` is set.
pub fn build_incidence(
    distances: &DistanceTable,
    hubs: &HubSet,
    n_most_influential: usize,
    weight_influence: bool,
) -> Result<IncidenceOutcome, LiftError> {
    if n_most_influential < 1 {
        return Err(LiftError::configuration(
            "invalid-n-most-influential",
            "n_most_influential must be at least 1",
        ));
    }

    let assignments: Vec<NodeAssignment> = (0..distances.len())
        .into_par_iter()
        .map(|node| assign_node(node, distances, hubs, n_most_influential, weight_influence))
        .collect();

    let mut outcome = IncidenceOutcome::default();
    for (node, assignment) in assignments.into_iter().enumerate() {
        outcome.floored_weights += assignment.floored;
        if assignment.unassigned {
            outcome.unassigned.push(node);
        }
        outcome.entries.extend(assignment.entries);
    }

    if !outcome.unassigned.is_empty() {
        warn!(
            nodes = outcome.unassigned.len(),
            "nodes cannot reach any hub; their incidence rows are empty"
        );
    }
    if outcome.floored_weights > 0 {
        debug!(
            floored = outcome.floored_weights,
            floor = MIN_INFLUENCE_WEIGHT,
            "floored inverse-distance weights"
        );
    }
    Ok(outcome)
}

fn assign_node(
    node: usize,
    distances: &DistanceTable,
    hubs: &HubSet,
    n_most_influential: usize,
    weight_influence: bool,
) -> NodeAssignment {
    if let Some(slot) = hubs.slot(node) {
        return NodeAssignment {
            entries: vec![IncidenceEntry {
                node,
                hyperedge: slot,
                weight: 1.0,
            }],
            floored: 0,
            unassigned: false,
        };
    }

    let mut reachable: Vec<(usize, f64)> = distances
        .row(node)
        .into_iter()
        .flat_map(|row| row.iter())
        .filter_map(|(target, distance)| hubs.slot(target).map(|slot| (slot, distance)))
        .collect();
    // stable: ties keep traversal order
    reachable.sort_by(|a, b| a.1.total_cmp(&b.1));
    reachable.truncate(n_most_influential);

    let mut floored = 0;
    let entries: Vec<IncidenceEntry> = reachable
        .into_iter()
        .map(|(slot, distance)| {
            let weight = if weight_influence {
                if distance > 0.0 && 1.0 / distance < MIN_INFLUENCE_WEIGHT {
                    floored += 1;
                }
                influence_weight(distance)
            } else {
                1.0
            };
            IncidenceEntry {
                node,
                hyperedge: slot,
                weight,
            }
        })
        .collect();

    NodeAssignment {
        unassigned: entries.is_empty(),
        entries,
        floored,
    }
}

/// Converts entries into a `(num_nodes, num_hyperedges)` CSR matrix.
pub fn assemble_incidence(
    num_nodes: usize,
    num_hyperedges: usize,
    entries: &[IncidenceEntry],
) -> CsMat<f64> {
    let mut triplets: TriMat<f64> =
        TriMat::with_capacity((num_nodes, num_hyperedges), entries.len());
    for entry in entries {
        triplets.add_triplet(entry.node, entry.hyperedge, entry.weight);
    }
    triplets.to_csr()
}
