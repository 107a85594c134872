use hublift_core::{FeatureTable, GraphInput, LiftError, LiftingConfig, NetworkType};
use hublift_graph::{
    incidence_hash, path_graph, random_graph, star_graph, DegenerateInput, LiftedHypergraph,
    Lifting, NodeCentralityLifting, MIN_INFLUENCE_WEIGHT,
};

fn lift(input: &GraphInput, config: LiftingConfig) -> LiftedHypergraph {
    NodeCentralityLifting::new(config).unwrap().lift(input).unwrap()
}

fn unweighted(th_percentile: f64, n_most_influential: usize) -> LiftingConfig {
    LiftingConfig {
        network_type: NetworkType::Unweighted,
        th_percentile,
        n_most_influential,
        ..LiftingConfig::default()
    }
}

#[test]
fn star_center_is_the_only_hyperedge() {
    let lifted = lift(&star_graph(5, 2), unweighted(0.05, 1));
    assert_eq!(lifted.num_hyperedges, 1);
    assert_eq!(lifted.hubs, vec![2]);
    assert_eq!(lifted.incidence_hyperedges.shape(), (5, 1));
    for node in 0..5 {
        assert_eq!(lifted.row_entries(node), vec![(0, 1.0)]);
    }
    assert_eq!(lifted.hyperedge_members(0), vec![0, 1, 2, 3, 4]);
    assert!(lifted.diagnostics.degenerate.is_empty());
}

#[test]
fn path_assigns_every_node_to_one_interior_hub() {
    let lifted = lift(&path_graph(5), unweighted(0.05, 1));
    assert!(lifted.num_hyperedges >= 1);
    assert!(lifted.hubs.iter().all(|hub| *hub == 1 || *hub == 3));
    for node in 0..5 {
        let row = lifted.row_entries(node);
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].1, 1.0);
    }
}

#[test]
fn non_hubs_take_nearest_hubs_first() {
    let mut config = unweighted(0.6, 2);
    config.do_weight_hyperedge_influence = true;
    let lifted = lift(&path_graph(5), config);
    assert_eq!(lifted.hubs, vec![1, 2, 3]);
    assert_eq!(lifted.row_entries(0), vec![(0, 1.0), (1, 0.5)]);
    assert_eq!(lifted.row_entries(4), vec![(1, 0.5), (2, 1.0)]);
    for (slot, hub) in lifted.hubs.iter().enumerate() {
        assert_eq!(lifted.row_entries(*hub), vec![(slot, 1.0)]);
    }
}

#[test]
fn components_never_share_hyperedges() {
    let input = GraphInput::new(5, vec![(0, 1), (1, 2), (3, 4)]);
    let lifted = lift(&input, unweighted(0.5, 2));
    assert_eq!(lifted.hubs, vec![1, 3, 4]);
    assert_eq!(lifted.row_entries(0), vec![(0, 1.0)]);
    assert_eq!(lifted.row_entries(2), vec![(0, 1.0)]);
    assert_eq!(lifted.row_entries(3), vec![(1, 1.0)]);
    assert_eq!(lifted.row_entries(4), vec![(2, 1.0)]);

    let sparse = lift(&input, unweighted(0.05, 2));
    assert_eq!(sparse.hubs, vec![1]);
    assert!(sparse.row_entries(3).is_empty());
    assert!(sparse.row_entries(4).is_empty());
    assert_eq!(
        sparse.diagnostics.degenerate,
        vec![DegenerateInput::UnreachableFromHubs(vec![3, 4])]
    );
}

#[test]
fn isolated_node_keeps_an_empty_row() {
    let input = GraphInput::new(5, vec![(0, 1), (1, 2), (2, 3)]);
    let lifted = lift(&input, unweighted(0.05, 2));
    assert!(lifted.hubs.iter().all(|hub| *hub == 1 || *hub == 2));
    assert!(lifted.row_entries(4).is_empty());
    assert!(lifted
        .diagnostics
        .degenerate
        .contains(&DegenerateInput::UnreachableFromHubs(vec![4])));
}

#[test]
fn inverse_distance_weights_use_edge_weights() {
    let input = star_graph(5, 0).with_edge_features(FeatureTable::scalars(vec![2.0; 4]));
    let config = LiftingConfig {
        do_weight_hyperedge_influence: true,
        ..LiftingConfig::default()
    };
    let lifted = lift(&input, config);
    assert_eq!(lifted.hubs, vec![0]);
    assert_eq!(lifted.row_entries(0), vec![(0, 1.0)]);
    for leaf in 1..5 {
        assert_eq!(lifted.row_entries(leaf), vec![(0, 0.5)]);
    }
    assert_eq!(lifted.diagnostics.floored_weights, 0);
}

#[test]
fn subnormal_edge_weights_still_select_the_center() {
    let input = star_graph(5, 2).with_edge_features(FeatureTable::scalars(vec![1e-310; 4]));
    let config = LiftingConfig {
        do_weight_hyperedge_influence: true,
        ..LiftingConfig::default()
    };
    let lifted = lift(&input, config);
    assert_eq!(lifted.num_hyperedges, 1);
    assert_eq!(lifted.hubs, vec![2]);
    assert_eq!(lifted.row_entries(2), vec![(0, 1.0)]);
    for leaf in [0, 1, 3, 4] {
        assert_eq!(lifted.row_entries(leaf), vec![(0, f64::MAX)]);
    }
}

#[test]
fn far_hubs_are_floored() {
    let input = star_graph(5, 0).with_edge_features(FeatureTable::scalars(vec![1e5; 4]));
    let config = LiftingConfig {
        do_weight_hyperedge_influence: true,
        ..LiftingConfig::default()
    };
    let lifted = lift(&input, config);
    for leaf in 1..5 {
        assert_eq!(lifted.row_entries(leaf), vec![(0, MIN_INFLUENCE_WEIGHT)]);
    }
    assert_eq!(lifted.diagnostics.floored_weights, 4);
}

#[test]
fn zero_distance_hub_gets_unit_weight() {
    let input = star_graph(5, 0).with_edge_features(FeatureTable::scalars(vec![0.0; 4]));
    let config = LiftingConfig {
        do_weight_hyperedge_influence: true,
        ..LiftingConfig::default()
    };
    let lifted = lift(&input, config);
    for node in 0..5 {
        for (_, weight) in lifted.row_entries(node) {
            assert!(weight.is_finite());
            assert!(weight > 0.0);
        }
    }
}

#[test]
fn unweighted_influence_is_always_one() {
    let input = random_graph(30, 60, 11);
    let lifted = lift(&input, unweighted(0.2, 3));
    for node in 0..30 {
        let row = lifted.row_entries(node);
        assert!(row.len() <= 3);
        assert!(row.iter().all(|(_, weight)| *weight == 1.0));
    }
}

#[test]
fn hub_features_pass_through() {
    let rows = (0..5).map(|i| vec![i as f64, 10.0 * i as f64]).collect();
    let features = FeatureTable::from_rows(rows).unwrap();
    let input = star_graph(5, 3).with_node_features(features.clone());
    let config = LiftingConfig {
        do_hyperedge_node_assignment_feature_lifting_passthrough: true,
        ..LiftingConfig::default()
    };
    let lifted = lift(&input, config.clone());
    assert_eq!(lifted.x_0.as_ref(), Some(&features));
    let hub_features = lifted.x_hyperedges.expect("hub features");
    assert_eq!(hub_features.rows(), 1);
    assert_eq!(hub_features.row(0), Some(&[3.0, 30.0][..]));

    let bare = lift(&star_graph(5, 3), config);
    assert!(bare.x_0.is_none());
    assert!(bare.x_hyperedges.is_none());

    let off = lift(&input, LiftingConfig::default());
    assert!(off.x_hyperedges.is_none());
    assert_eq!(off.x_0.as_ref(), Some(&features));
}

#[test]
fn degenerate_graphs_lift_to_empty_structures() {
    let empty = lift(&GraphInput::new(0, Vec::new()), LiftingConfig::default());
    assert_eq!(empty.num_hyperedges, 0);
    assert_eq!(empty.incidence_hyperedges.shape(), (0, 0));
    assert_eq!(empty.diagnostics.degenerate, vec![DegenerateInput::NoNodes]);

    let isolated = lift(&GraphInput::new(3, Vec::new()), LiftingConfig::default());
    assert_eq!(isolated.hubs, vec![0, 1, 2]);
    for node in 0..3 {
        assert_eq!(isolated.row_entries(node), vec![(node, 1.0)]);
    }
    assert_eq!(isolated.diagnostics.degenerate, vec![DegenerateInput::NoEdges]);
}

#[test]
fn configuration_errors_fail_fast() {
    let config = LiftingConfig {
        n_most_influential: 0,
        ..LiftingConfig::default()
    };
    let err = NodeCentralityLifting::new(config).unwrap_err();
    assert!(
        matches!(err, LiftError::Configuration(info) if info.code == "invalid-n-most-influential")
    );

    let input = path_graph(3).with_edge_features(FeatureTable::scalars(vec![1.0, -3.0]));
    let err = NodeCentralityLifting::default().lift(&input).unwrap_err();
    assert!(matches!(err, LiftError::Configuration(info) if info.code == "negative-edge-weight"));
}

#[test]
fn reruns_are_bit_identical() {
    let input = random_graph(40, 90, 5).with_edge_features(FeatureTable::scalars(
        (0..90).map(|i| 0.5 + (i % 7) as f64).collect(),
    ));
    let config = LiftingConfig {
        th_percentile: 0.15,
        n_most_influential: 3,
        do_weight_hyperedge_influence: true,
        ..LiftingConfig::default()
    };
    let lifting = NodeCentralityLifting::new(config).unwrap();
    let first = lifting.lift(&input).unwrap();
    let second = lifting.lift(&input).unwrap();
    assert_eq!(incidence_hash(&first), incidence_hash(&second));
    assert_eq!(first.hubs, second.hubs);
}
