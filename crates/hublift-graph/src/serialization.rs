use hublift_core::{FeatureTable, LiftError, SchemaVersion};
use serde::{Deserialize, Serialize};
use sprs::CsMat;

use crate::incidence::{assemble_incidence, IncidenceEntry};
use crate::lifting::{LiftDiagnostics, LiftedHypergraph};

const SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the lift to a compact binary representation using `bincode`.
pub fn lifting_to_bytes(lifted: &LiftedHypergraph) -> Result<Vec<u8>, LiftError> {
    let serializable = SerializableLifting::from_lifted(lifted);
    bincode::serialize(&serializable)
        .map_err(|err| LiftError::serde("serialize-bytes", err.to_string()))
}

/// Restores a lift from its binary representation.
pub fn lifting_from_bytes(bytes: &[u8]) -> Result<LiftedHypergraph, LiftError> {
    let serializable: SerializableLifting = bincode::deserialize(bytes)
        .map_err(|err| LiftError::serde("deserialize-bytes", err.to_string()))?;
    serializable.into_lifted()
}

/// Serializes the lift to a JSON string with the incidence matrix as coordinate triplets.
pub fn lifting_to_json(lifted: &LiftedHypergraph) -> Result<String, LiftError> {
    let serializable = SerializableLifting::from_lifted(lifted);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| LiftError::serde("serialize-json", err.to_string()))
}

/// Restores a lift from a JSON string.
pub fn lifting_from_json(json: &str) -> Result<LiftedHypergraph, LiftError> {
    let serializable: SerializableLifting = serde_json::from_str(json)
        .map_err(|err| LiftError::serde("deserialize-json", err.to_string()))?;
    serializable.into_lifted()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableLifting {
    schema_version: SchemaVersion,
    num_nodes: usize,
    num_hyperedges: usize,
    hubs: Vec<usize>,
    triplets: Vec<(usize, usize, f64)>,
    x_0: Option<FeatureTable>,
    x_hyperedges: Option<FeatureTable>,
    diagnostics: LiftDiagnostics,
}

impl SerializableLifting {
    fn from_lifted(lifted: &LiftedHypergraph) -> Self {
        let triplets = (0..lifted.num_nodes())
            .flat_map(|node| {
                lifted
                    .row_entries(node)
                    .into_iter()
                    .map(move |(hyperedge, weight)| (node, hyperedge, weight))
            })
            .collect();
        Self {
            schema_version: SCHEMA_VERSION,
            num_nodes: lifted.num_nodes(),
            num_hyperedges: lifted.num_hyperedges,
            hubs: lifted.hubs.clone(),
            triplets,
            x_0: lifted.x_0.clone(),
            x_hyperedges: lifted.x_hyperedges.clone(),
            diagnostics: lifted.diagnostics.clone(),
        }
    }

    fn into_lifted(self) -> Result<LiftedHypergraph, LiftError> {
        if !SCHEMA_VERSION.is_compatible_with(&self.schema_version) {
            return Err(LiftError::serde("schema-mismatch", "unsupported lifting schema version")
                .with_context("found", format!("{:?}", self.schema_version))
                .with_context("expected", format!("{SCHEMA_VERSION:?}")));
        }
        if self.hubs.len() != self.num_hyperedges {
            return Err(LiftError::serde(
                "hub-count-mismatch",
                "hub list does not match the hyperedge count",
            )
            .with_context("hubs", self.hubs.len())
            .with_context("num_hyperedges", self.num_hyperedges));
        }
        let mut entries = Vec::with_capacity(self.triplets.len());
        for (node, hyperedge, weight) in self.triplets {
            if node >= self.num_nodes || hyperedge >= self.num_hyperedges {
                return Err(LiftError::serde(
                    "triplet-out-of-range",
                    "incidence entry outside matrix shape",
                )
                .with_context("node", node)
                .with_context("hyperedge", hyperedge));
            }
            entries.push(IncidenceEntry {
                node,
                hyperedge,
                weight,
            });
        }
        let incidence_hyperedges: CsMat<f64> =
            assemble_incidence(self.num_nodes, self.num_hyperedges, &entries);
        Ok(LiftedHypergraph {
            incidence_hyperedges,
            num_hyperedges: self.num_hyperedges,
            hubs: self.hubs,
            x_0: self.x_0,
            x_hyperedges: self.x_hyperedges,
            diagnostics: self.diagnostics,
        })
    }
}
