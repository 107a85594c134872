//! Lifting configuration and the network-type switch.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LiftError;

/// Selects both the edge/node weighting rule and the distance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum NetworkType {
    /// Scalar features become weights; distances accumulate edge weights (Dijkstra).
    #[default]
    Weighted,
    /// Every weight is 1; distances are hop counts (breadth-first search).
    Unweighted,
}

impl NetworkType {
    /// Returns the canonical string label.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Weighted => "weighted",
            NetworkType::Unweighted => "unweighted",
        }
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = LiftError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "weighted" => Ok(NetworkType::Weighted),
            "unweighted" => Ok(NetworkType::Unweighted),
            other => Err(LiftError::configuration(
                "unsupported-network-type",
                "network type not implemented",
            )
            .with_context("network_type", other)
            .with_hint("use \"weighted\" or \"unweighted\"")),
        }
    }
}

impl TryFrom<String> for NetworkType {
    type Error = LiftError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NetworkType> for String {
    fn from(value: NetworkType) -> Self {
        value.as_str().to_string()
    }
}

/// Options recognised by the node-centrality lifting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftingConfig {
    /// Weighting rule and distance metric.
    pub network_type: NetworkType,
    /// PageRank damping factor.
    pub alpha: f64,
    /// Fraction of top-influence nodes treated as hubs.
    pub th_percentile: f64,
    /// Maximum number of hubs a non-hub node is assigned to.
    pub n_most_influential: usize,
    /// Weight incidence entries by inverse shortest-path distance.
    pub do_weight_hyperedge_influence: bool,
    /// Emit the hub feature rows as hyperedge features.
    pub do_hyperedge_node_assignment_feature_lifting_passthrough: bool,
    /// PageRank iteration cap.
    pub max_iter: usize,
    /// Per-node PageRank tolerance; iteration stops once the L1 change drops below `n * tol`.
    pub tol: f64,
}

impl Default for LiftingConfig {
    fn default() -> Self {
        Self {
            network_type: NetworkType::Weighted,
            alpha: 0.85,
            th_percentile: 0.05,
            n_most_influential: 2,
            do_weight_hyperedge_influence: false,
            do_hyperedge_node_assignment_feature_lifting_passthrough: false,
            max_iter: 100,
            tol: 1e-6,
        }
    }
}

impl LiftingConfig {
    /// Parses a JSON document (missing fields take defaults) and validates it.
    pub fn from_json(json: &str) -> Result<Self, LiftError> {
        let config: LiftingConfig = serde_json::from_str(json).map_err(|err| {
            LiftError::configuration("invalid-config", "failed to parse lifting configuration")
                .with_context("reason", err)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every option against its admissible range.
    pub fn validate(&self) -> Result<(), LiftError> {
        if self.n_most_influential < 1 {
            return Err(LiftError::configuration(
                "invalid-n-most-influential",
                "n_most_influential must be at least 1",
            )
            .with_context("n_most_influential", self.n_most_influential));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(LiftError::configuration(
                "invalid-alpha",
                "damping factor must lie in the open interval (0, 1)",
            )
            .with_context("alpha", self.alpha));
        }
        if !(self.th_percentile > 0.0 && self.th_percentile <= 1.0) {
            return Err(LiftError::configuration(
                "invalid-th-percentile",
                "th_percentile must lie in (0, 1]",
            )
            .with_context("th_percentile", self.th_percentile));
        }
        if self.max_iter == 0 {
            return Err(LiftError::configuration(
                "invalid-max-iter",
                "PageRank requires at least one iteration",
            ));
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(LiftError::configuration(
                "invalid-tol",
                "tolerance must be finite and non-negative",
            )
            .with_context("tol", self.tol));
        }
        Ok(())
    }
}
