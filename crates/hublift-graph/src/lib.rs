#![deny(missing_docs)]

//! Centrality-based graph to hypergraph lifting.
//!
//! A graph is scored with PageRank, the top `th_percentile` of nodes become hubs, and every
//! hub defines one hyperedge. Non-hub nodes join the hyperedges of their nearest hubs by
//! shortest-path distance (hop count or accumulated edge weight). The result is a sparse
//! node by hyperedge incidence matrix.
//!
//! ```no_run
//! use hublift_core::{GraphInput, LiftingConfig};
//! use hublift_graph::{Lifting, NodeCentralityLifting};
//!
//! let lifting = NodeCentralityLifting::new(LiftingConfig::default())?;
//! let lifted = lifting.lift(&GraphInput::new(3, vec![(0, 1), (1, 2)]))?;
//! assert_eq!(lifted.num_nodes(), 3);
//! # Ok::<(), hublift_core::LiftError>(())
//! ```

pub mod centrality;
pub mod distance;
mod generators;
mod hash;
pub mod hubs;
pub mod incidence;
mod lifting;
mod model;
mod serialization;

pub use centrality::{pagerank, CentralityScores, PageRankParams};
pub use distance::{
    all_pairs_distances, single_source_dijkstra, single_source_hops, DistanceRow, DistanceTable,
};
pub use generators::{path_graph, random_graph, star_graph};
pub use hash::incidence_hash;
pub use hubs::{quantile_linear, select_hubs, HubSet};
pub use incidence::{
    assemble_incidence, build_incidence, influence_weight, IncidenceEntry, IncidenceOutcome,
    MIN_INFLUENCE_WEIGHT,
};
pub use lifting::{
    DegenerateInput, LiftDiagnostics, LiftedHypergraph, Lifting, NodeCentralityLifting,
};
pub use model::WeightedGraph;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{lifting_from_bytes, lifting_from_json, lifting_to_bytes, lifting_to_json};
