use hublift_core::{FeatureTable, GraphInput, NetworkType};
use hublift_graph::{pagerank, path_graph, star_graph, PageRankParams, WeightedGraph};

fn build(input: &GraphInput, network_type: NetworkType) -> WeightedGraph {
    WeightedGraph::build(input, network_type).unwrap()
}

fn assert_stochastic(scores: &[f64]) {
    assert!(scores.iter().all(|score| *score >= 0.0));
    let total: f64 = scores.iter().sum();
    assert!((total - 1.0).abs() < 1e-9, "scores sum to {total}");
}

#[test]
fn star_center_dominates() {
    let graph = build(&star_graph(5, 0), NetworkType::Unweighted);
    let result = pagerank(&graph, &PageRankParams::default());
    assert!(result.converged);
    assert_stochastic(&result.scores);
    for leaf in 1..5 {
        assert!(result.scores[0] > result.scores[leaf]);
        assert!((result.scores[leaf] - result.scores[1]).abs() < 1e-12);
    }
}

#[test]
fn three_node_path_matches_closed_form() {
    let graph = build(&path_graph(3), NetworkType::Unweighted);
    let params = PageRankParams {
        alpha: 0.85,
        max_iterations: 1_000,
        tolerance: 1e-12,
    };
    let result = pagerank(&graph, &params);
    let leaf = (0.85 / 2.0 + 0.15 / 3.0) / 1.85;
    assert!((result.scores[0] - leaf).abs() < 1e-8);
    assert!((result.scores[2] - leaf).abs() < 1e-8);
    assert!((result.scores[1] - (1.0 - 2.0 * leaf)).abs() < 1e-8);
}

#[test]
fn dangling_nodes_keep_mass() {
    let graph = build(&GraphInput::new(4, vec![(0, 1)]), NetworkType::Unweighted);
    let result = pagerank(&graph, &PageRankParams::default());
    assert_stochastic(&result.scores);
    assert_eq!(result.scores[2], result.scores[3]);
    assert!(result.scores[0] > result.scores[2]);
}

#[test]
fn heavier_edges_attract_mass() {
    let input = path_graph(3).with_edge_features(FeatureTable::scalars(vec![10.0, 1.0]));
    let graph = build(&input, NetworkType::Weighted);
    let result = pagerank(&graph, &PageRankParams::default());
    assert_stochastic(&result.scores);
    assert!(result.scores[0] > result.scores[2]);

    let flat = pagerank(&build(&input, NetworkType::Unweighted), &PageRankParams::default());
    assert!((flat.scores[0] - flat.scores[2]).abs() < 1e-12);
}

#[test]
fn iteration_cap_returns_last_iterate() {
    let graph = build(&path_graph(6), NetworkType::Unweighted);
    let params = PageRankParams {
        alpha: 0.85,
        max_iterations: 1,
        tolerance: 0.0,
    };
    let result = pagerank(&graph, &params);
    assert!(!result.converged);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.len(), 6);
    assert_stochastic(&result.scores);
}

#[test]
fn empty_graph_has_no_scores() {
    let graph = build(&GraphInput::new(0, Vec::new()), NetworkType::Weighted);
    let result = pagerank(&graph, &PageRankParams::default());
    assert!(result.is_empty());
    assert!(result.converged);
    assert_eq!(result.get(0), None);
}

#[test]
fn near_max_weights_keep_scores_stochastic() {
    let input = GraphInput::new(3, vec![(0, 1), (0, 2)])
        .with_edge_features(FeatureTable::scalars(vec![1e308, 1e308]));
    let heavy = pagerank(&build(&input, NetworkType::Weighted), &PageRankParams::default());
    assert_stochastic(&heavy.scores);

    let flat = pagerank(&build(&input, NetworkType::Unweighted), &PageRankParams::default());
    for (a, b) in heavy.scores.iter().zip(&flat.scores) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn subnormal_weights_score_like_unit_weights() {
    let input = star_graph(5, 0);
    let weights = vec![1e-310; input.edges.len()];
    let input = input.with_edge_features(FeatureTable::scalars(weights));
    let tiny = pagerank(&build(&input, NetworkType::Weighted), &PageRankParams::default());
    assert!(tiny.converged);
    assert!(tiny.scores.iter().all(|score| score.is_finite()));
    assert_stochastic(&tiny.scores);

    let flat = pagerank(&build(&input, NetworkType::Unweighted), &PageRankParams::default());
    for (a, b) in tiny.scores.iter().zip(&flat.scores) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn zero_weight_node_is_dangling() {
    let input = GraphInput::new(3, vec![(0, 1), (1, 2)])
        .with_edge_features(FeatureTable::scalars(vec![0.0, 2.0]));
    let result = pagerank(&build(&input, NetworkType::Weighted), &PageRankParams::default());
    assert_stochastic(&result.scores);
}
