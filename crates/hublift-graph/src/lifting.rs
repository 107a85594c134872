//! The node-centrality lifting pipeline and its output.

use hublift_core::{FeatureTable, GraphInput, LiftError, LiftingConfig};
use serde::{Deserialize, Serialize};
use sprs::CsMat;
use tracing::{info, warn};

use crate::centrality::{pagerank, PageRankParams};
use crate::distance::all_pairs_distances;
use crate::hubs::select_hubs;
use crate::incidence::{assemble_incidence, build_incidence};
use crate::model::WeightedGraph;

/// A transform from a plain graph into a hypergraph incidence structure.
pub trait Lifting: Send + Sync {
    /// Lifts the topology of `input`.
    fn lift(&self, input: &GraphInput) -> Result<LiftedHypergraph, LiftError>;
}

/// Non-fatal degenerate conditions met during a lift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateInput {
    /// The graph has no nodes; the incidence matrix is `0 x 0`.
    NoNodes,
    /// The graph has nodes but no edges.
    NoEdges,
    /// Non-hub nodes that cannot reach any hub; their rows are empty.
    UnreachableFromHubs(Vec<usize>),
}

/// Numbers describing how a lift went.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiftDiagnostics {
    /// PageRank iterations performed.
    pub pagerank_iterations: usize,
    /// Whether PageRank met its tolerance.
    pub pagerank_converged: bool,
    /// Score cutoff used for hub selection.
    pub hub_cutoff: Option<f64>,
    /// Inverse-distance weights raised to the floor.
    pub floored_weights: usize,
    /// Degenerate conditions, in detection order.
    pub degenerate: Vec<DegenerateInput>,
}

/// Result of lifting a graph into the hypergraph domain.
#[derive(Debug, Clone)]
pub struct LiftedHypergraph {
    /// Sparse `(num_nodes, num_hyperedges)` incidence matrix in CSR layout.
    pub incidence_hyperedges: CsMat<f64>,
    /// Number of hyperedges, one per hub.
    pub num_hyperedges: usize,
    /// Hub node ids in hyperedge order.
    pub hubs: Vec<usize>,
    /// Node features, passed through unchanged.
    pub x_0: Option<FeatureTable>,
    /// Hub feature rows in hyperedge order, when passthrough is enabled and features exist.
    pub x_hyperedges: Option<FeatureTable>,
    /// Lift diagnostics.
    pub diagnostics: LiftDiagnostics,
}

impl LiftedHypergraph {
    /// Returns the number of node rows.
    pub fn num_nodes(&self) -> usize {
        self.incidence_hyperedges.rows()
    }

    /// Returns the nonzero `(hyperedge, weight)` pairs of a node's row, by column.
    pub fn row_entries(&self, node: usize) -> Vec<(usize, f64)> {
        self.incidence_hyperedges
            .outer_view(node)
            .map(|row| row.iter().map(|(col, &weight)| (col, weight)).collect())
            .unwrap_or_default()
    }

    /// Returns the node members of a hyperedge in ascending node order.
    pub fn hyperedge_members(&self, hyperedge: usize) -> Vec<usize> {
        (0..self.num_nodes())
            .filter(|&node| self.incidence_hyperedges.get(node, hyperedge).is_some())
            .collect()
    }
}

/// Hypergraph lifting that builds one hyperedge per high-PageRank hub and attaches every
/// other node to its nearest hubs by shortest-path distance.
#[derive(Debug, Clone, Default)]
pub struct NodeCentralityLifting {
    config: LiftingConfig,
}

impl NodeCentralityLifting {
    /// Creates the lifting after validating `config`.
    pub fn new(config: LiftingConfig) -> Result<Self, LiftError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &LiftingConfig {
        &self.config
    }
}

impl Lifting for NodeCentralityLifting {
    fn lift(&self, input: &GraphInput) -> Result<LiftedHypergraph, LiftError> {
        let config = &self.config;
        let graph = WeightedGraph::build(input, config.network_type)?;

        let mut degenerate = Vec::new();
        if graph.num_nodes() == 0 {
            warn!("lifting an empty graph");
            degenerate.push(DegenerateInput::NoNodes);
        } else if graph.num_edges() == 0 {
            warn!(nodes = graph.num_nodes(), "lifting a graph without edges");
            degenerate.push(DegenerateInput::NoEdges);
        }

        let distances = all_pairs_distances(&graph, config.network_type);
        let scores = pagerank(&graph, &PageRankParams::from(config));
        let hubs = select_hubs(&scores, config.th_percentile)?;
        let outcome = build_incidence(
            &distances,
            &hubs,
            config.n_most_influential,
            config.do_weight_hyperedge_influence,
        )?;
        if !outcome.unassigned.is_empty() {
            degenerate.push(DegenerateInput::UnreachableFromHubs(outcome.unassigned.clone()));
        }

        let incidence_hyperedges =
            assemble_incidence(graph.num_nodes(), hubs.len(), &outcome.entries);
        let x_hyperedges = match (
            config.do_hyperedge_node_assignment_feature_lifting_passthrough,
            input.node_features.as_ref(),
        ) {
            (true, Some(features)) => Some(features.select_rows(hubs.hubs())?),
            _ => None,
        };

        info!(
            nodes = graph.num_nodes(),
            hyperedges = hubs.len(),
            entries = outcome.entries.len(),
            "lifted graph to hypergraph"
        );
        Ok(LiftedHypergraph {
            incidence_hyperedges,
            num_hyperedges: hubs.len(),
            hubs: hubs.hubs().to_vec(),
            x_0: input.node_features.clone(),
            x_hyperedges,
            diagnostics: LiftDiagnostics {
                pagerank_iterations: scores.iterations,
                pagerank_converged: scores.converged,
                hub_cutoff: hubs.cutoff(),
                floored_weights: outcome.floored_weights,
                degenerate,
            },
        })
    }
}
