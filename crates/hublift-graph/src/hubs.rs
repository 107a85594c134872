//! Percentile-based hub selection.

use hublift_core::LiftError;
use tracing::debug;

use crate::centrality::CentralityScores;

/// Nodes selected as hyperedge centres, enumerated in ascending node id.
///
/// Position in [`HubSet::hubs`] is the hub's slot, i.e. its hyperedge column.
#[derive(Debug, Clone, PartialEq)]
pub struct HubSet {
    hubs: Vec<usize>,
    slots: Vec<Option<usize>>,
    cutoff: Option<f64>,
}

impl HubSet {
    /// Returns hub node ids in slot order.
    pub fn hubs(&self) -> &[usize] {
        &self.hubs
    }

    /// Returns the hyperedge slot of `node`, or `None` if it is not a hub.
    pub fn slot(&self, node: usize) -> Option<usize> {
        self.slots.get(node).copied().flatten()
    }

    /// Returns whether `node` is a hub.
    pub fn contains(&self, node: usize) -> bool {
        self.slot(node).is_some()
    }

    /// Returns the score cutoff used for selection; `None` when there were no scores.
    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    /// Returns the number of hubs.
    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    /// Returns whether no hub was selected.
    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }
}

/// Selects every node whose score reaches the `(1 - th_percentile)` quantile.
///
/// Ties at the cutoff are all kept. An empty score vector yields an empty set.
pub fn select_hubs(scores: &CentralityScores, th_percentile: f64) -> Result<HubSet, LiftError> {
    if !(th_percentile > 0.0 && th_percentile <= 1.0) {
        return Err(LiftError::configuration(
            "invalid-th-percentile",
            "th_percentile must lie in (0, 1]",
        )
        .with_context("th_percentile", th_percentile));
    }
    let Some(cutoff) = quantile_linear(&scores.scores, 1.0 - th_percentile) else {
        return Ok(HubSet {
            hubs: Vec::new(),
            slots: Vec::new(),
            cutoff: None,
        });
    };

    let hubs: Vec<usize> = scores
        .scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score >= cutoff)
        .map(|(node, _)| node)
        .collect();
    let mut slots = vec![None; scores.len()];
    for (slot, &node) in hubs.iter().enumerate() {
        slots[node] = Some(slot);
    }
    debug!(cutoff, hubs = hubs.len(), nodes = scores.len(), "selected hubs");
    Ok(HubSet {
        hubs,
        slots,
        cutoff: Some(cutoff),
    })
}

/// Linear-interpolation quantile of `values` at `q` in `[0, 1]`.
///
/// The interpolated value never exceeds the upper bracketing sample, so the maximum
/// always clears a cutoff computed here.
pub fn quantile_linear(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let (low, high) = (sorted[lower], sorted[upper]);
    let fraction = position - lower as f64;
    let span = high - low;
    if fraction >= 0.5 {
        Some(high - span * (1.0 - fraction))
    } else {
        Some(low + span * fraction)
    }
}
