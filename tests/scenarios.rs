//! Scenario tests for graphs and dispatch on small hand-built networks.

use u_dispatch::graph::{path_length, Chain, Clique, Edge, Graph, GraphError, TownGraph};
use u_dispatch::traffic::{CostAccounting, DispatchConfig, TrafficError, TrafficManager};

// ===========================================================================
// Fixtures
// ===========================================================================

/// `0 -(10)- 1`, with 2, 3 and 4 hanging off 1 at lengths 1, 2 and 3.
fn far_depot() -> Graph {
    Graph::try_from(vec![
        vec![(1, 10)],
        vec![(0, 10), (2, 1), (3, 2), (4, 3)],
        vec![(1, 1)],
        vec![(1, 2)],
        vec![(1, 3)],
    ])
    .expect("valid graph")
}

/// Same star shape with a short main leg and longer spokes.
fn near_depot() -> Graph {
    Graph::try_from(vec![
        vec![(1, 2)],
        vec![(0, 2), (2, 1), (3, 6), (4, 7)],
        vec![(1, 1)],
        vec![(1, 6)],
        vec![(1, 7)],
    ])
    .expect("valid graph")
}

fn five_towns() -> Vec<Vec<Edge>> {
    vec![
        vec![Edge::new(4, 6)],
        vec![Edge::new(2, 3), Edge::new(4, 1)],
        vec![Edge::new(1, 3), Edge::new(3, 2)],
        vec![Edge::new(2, 2), Edge::new(4, 7)],
        vec![Edge::new(0, 6), Edge::new(1, 1), Edge::new(3, 7)],
    ]
}

/// Walks `path` from `from`, returning its length if every hop is a real edge.
fn walk_length<G: TownGraph + ?Sized>(graph: &G, path: &[Edge], mut from: usize) -> Option<u64> {
    let mut total = 0;
    for edge in path {
        if graph.edge_length(from, edge.to).ok()? != Some(edge.length) {
            return None;
        }
        total += edge.length;
        from = edge.to;
    }
    Some(total)
}

struct Case {
    goods: [u64; 5],
    vehicles: [u64; 5],
    capacity: u64,
    shipment: u64,
    expected: u64,
    goods_after: [u64; 5],
    vehicles_after: [u64; 5],
}

fn run_case(graph: &Graph, case: &Case, config: DispatchConfig, round_trip: bool) {
    let mut tm = TrafficManager::new(graph, case.goods.to_vec(), case.vehicles.to_vec(), case.capacity)
        .expect("valid manager")
        .with_config(config);
    let total_goods = tm.total_goods();
    let total_vehicles = tm.total_vehicles();

    let result = if round_trip {
        tm.transport_with_returns(1, 0, case.shipment)
    } else {
        tm.transport(1, 0, case.shipment)
    };

    assert_eq!(result, Ok(case.expected), "shipment of {}", case.shipment);
    assert_eq!(tm.goods(), &case.goods_after);
    assert_eq!(tm.vehicles(), &case.vehicles_after);
    assert_eq!(tm.total_goods(), total_goods);
    assert_eq!(tm.total_vehicles(), total_vehicles);
    assert!(tm.totals_consistent());
}

fn depot_cases(expected: [u64; 5]) -> Vec<Case> {
    vec![
        Case {
            goods: [1, 14, 1, 1, 1],
            vehicles: [14, 14, 14, 28, 14],
            capacity: 14,
            shipment: 12,
            expected: expected[0],
            goods_after: [13, 2, 1, 1, 1],
            vehicles_after: [15, 13, 14, 28, 14],
        },
        Case {
            goods: [1, 15, 1, 1, 1],
            vehicles: [14, 14, 14, 28, 14],
            capacity: 14,
            shipment: 15,
            expected: expected[1],
            goods_after: [16, 0, 1, 1, 1],
            vehicles_after: [16, 12, 14, 28, 14],
        },
        Case {
            goods: [1, 15, 1, 1, 1],
            vehicles: [0, 0, 1, 1, 0],
            capacity: 13,
            shipment: 15,
            expected: expected[2],
            goods_after: [16, 0, 1, 1, 1],
            vehicles_after: [2, 0, 0, 0, 0],
        },
        Case {
            goods: [0, 16, 0, 0, 0],
            vehicles: [1, 0, 1, 1, 1],
            capacity: 5,
            shipment: 15,
            expected: expected[3],
            goods_after: [15, 1, 0, 0, 0],
            vehicles_after: [4, 0, 0, 0, 0],
        },
        Case {
            goods: [0, 16, 0, 0, 0],
            vehicles: [1, 0, 1, 1, 1],
            capacity: 5,
            shipment: 16,
            expected: expected[4],
            goods_after: [16, 0, 0, 0, 0],
            vehicles_after: [4, 0, 0, 0, 0],
        },
    ]
}

// ===========================================================================
// Graphs
// ===========================================================================

#[test]
fn test_graph_constructors() {
    let empty = Graph::default();
    assert_eq!(empty.size(), 0);
    assert_eq!(
        empty.edges(0).err(),
        Some(GraphError::VertexOutOfRange { vertex: 0, size: 0 })
    );

    let complete = Graph::complete(4);
    assert_eq!(complete.size(), 4);
    for from in 0..4 {
        let expected: Vec<Edge> = (0..4).filter(|&to| to != from).map(|to| Edge::new(to, 1)).collect();
        assert_eq!(complete.edges(from).expect("in range").as_ref(), expected.as_slice());
    }

    let list = five_towns();
    let graph = Graph::new(list.clone()).expect("valid graph");
    assert_eq!(graph.size(), 5);
    for (from, edges) in list.iter().enumerate() {
        assert_eq!(graph.edges(from).expect("in range").as_ref(), edges.as_slice());
    }
    assert_eq!(Graph::complete(6).size(), 6);
}

#[test]
fn test_graph_paths_are_walkable() {
    let graph = Graph::new(five_towns()).expect("valid graph");
    for from in 0..5 {
        let tree = graph.shortest_path_tree(from).expect("in range");
        for to in 0..5 {
            let any = graph.any_path(from, to).expect("in range");
            let shortest = graph.shortest_path(from, to).expect("in range");
            assert!(walk_length(&graph, &any, from).is_some());
            let len = walk_length(&graph, &shortest, from).expect("walkable");
            assert_eq!(Some(len), tree.distance(to));
            assert!(len <= path_length(&any));
            if from == to {
                assert!(any.is_empty());
                assert!(shortest.is_empty());
            }
        }
    }
    assert_eq!(graph.distance(0, 3).expect("in range"), Some(12));
}

#[test]
fn test_clique_scenarios() {
    let unit = Clique::new(6);
    assert_eq!(unit.edges_count(), 15);
    for i in 0..6 {
        for j in 0..6 {
            let any = unit.any_path(i, j).expect("in range");
            let shortest = unit.shortest_path(i, j).expect("in range");
            if i == j {
                assert!(any.is_empty() && shortest.is_empty());
            } else {
                assert!(walk_length(&unit, &any, i).is_some());
                assert_eq!(walk_length(&unit, &shortest, i), Some(1));
            }
        }
    }

    // Edge i-j has length i + j: any path found by BFS is the direct edge.
    let sums = Clique::from_adjacency(&[
        vec![Edge::new(1, 1), Edge::new(2, 2), Edge::new(3, 3)],
        vec![Edge::new(0, 1), Edge::new(2, 3), Edge::new(3, 4)],
        vec![Edge::new(0, 2), Edge::new(1, 3), Edge::new(3, 5)],
        vec![Edge::new(0, 3), Edge::new(1, 4), Edge::new(2, 5)],
    ])
    .expect("valid clique");
    for i in 0..4 {
        for j in (0..4).filter(|&j| j != i) {
            let any = sums.any_path(i, j).expect("in range");
            assert_eq!(walk_length(&sums, &any, i), Some((i + j) as u64));
        }
    }

    // Triangle inequality holds, so every shortest path is the direct edge.
    let triangle = Clique::from_adjacency(&[
        vec![Edge::new(1, 41), Edge::new(2, 21)],
        vec![Edge::new(0, 41), Edge::new(2, 32)],
        vec![Edge::new(0, 21), Edge::new(1, 32)],
    ])
    .expect("valid clique");
    assert_eq!(triangle.edges_count(), 3);
    for from in 0..3 {
        let paths = triangle.shortest_paths(from).expect("in range");
        for to in 0..3 {
            let direct = triangle.edge_length(from, to).expect("in range").unwrap_or(0);
            assert_eq!(walk_length(&triangle, &paths[to], from), Some(direct));
            assert_eq!(paths[to], triangle.shortest_path(from, to).expect("in range"));
        }
    }
}

#[test]
fn test_chain_matches_graph() {
    let list = vec![
        vec![Edge::new(1, 4)],
        vec![Edge::new(0, 4), Edge::new(2, 9)],
        vec![Edge::new(1, 9), Edge::new(3, 2)],
        vec![Edge::new(2, 2)],
    ];
    let chain = Chain::from_adjacency(&list).expect("valid chain");
    let graph = Graph::new(list).expect("valid graph");
    assert_eq!(chain.edges_count(), graph.edges_count());
    for from in 0..4 {
        for to in 0..4 {
            assert_eq!(
                chain.shortest_path(from, to).expect("in range"),
                graph.shortest_path(from, to).expect("in range")
            );
        }
    }
}

// ===========================================================================
// Traffic manager
// ===========================================================================

#[test]
fn test_manager_constructor() {
    let empty = Graph::default();
    let tm = TrafficManager::new(&empty, vec![], vec![], 1).expect("valid manager");
    assert_eq!(tm.total_goods(), 0);
    assert_eq!(tm.total_vehicles(), 0);

    let graph = Graph::complete(4);
    let tm = TrafficManager::new(&graph, vec![1, 2, 3, 42], vec![42, 1, 4, 8], 14).expect("valid manager");
    assert_eq!(tm.graph(), &Graph::complete(4));
    assert_eq!(tm.vehicle_capacity(), 14);
    assert_eq!(tm.goods(), &[1, 2, 3, 42]);
    assert_eq!(tm.vehicles(), &[42, 1, 4, 8]);
    assert_eq!(tm.total_goods(), 48);
    assert_eq!(tm.total_vehicles(), 55);
}

#[test]
fn test_manager_rejects_bad_indices() {
    let graph = Graph::complete(4);
    let mut tm = TrafficManager::new(&graph, vec![1, 2, 3, 42], vec![42, 1, 4, 8], 14).expect("valid manager");
    assert!(matches!(tm.goods_at(4), Err(TrafficError::Graph(_))));
    assert!(matches!(tm.set_goods_at(9, 1), Err(TrafficError::Graph(_))));
    assert!(matches!(tm.transport(0, 4, 1), Err(TrafficError::Graph(_))));
    assert!(matches!(tm.transport_with_returns(4, 0, 1), Err(TrafficError::Graph(_))));
    assert_eq!(tm.goods(), &[1, 2, 3, 42]);
}

#[test]
fn test_transport_last_step_costs() {
    let graph = far_depot();
    let config = DispatchConfig::new().with_cost_accounting(CostAccounting::LastStep);
    for case in depot_cases([10, 10, 12, 13, 20]) {
        run_case(&graph, &case, config, false);
    }
}

#[test]
fn test_transport_cumulative_costs() {
    let graph = far_depot();
    for case in depot_cases([10, 10, 13, 16, 26]) {
        run_case(&graph, &case, DispatchConfig::default(), false);
    }
}

#[test]
fn test_transport_with_returns_far_depot() {
    let graph = far_depot();
    for case in depot_cases([10, 10, 12, 13, 20]) {
        run_case(&graph, &case, DispatchConfig::default(), true);
    }
}

#[test]
fn test_transport_with_returns_near_depot() {
    let graph = near_depot();
    let mut cases = depot_cases([2, 2, 7, 7, 8]);
    cases[2].vehicles_after = [1, 0, 0, 1, 0];
    cases[3].vehicles_after = [1, 1, 0, 1, 1];
    cases[4].vehicles_after = [2, 1, 0, 0, 1];
    for case in cases {
        run_case(&graph, &case, DispatchConfig::default(), true);
    }
}

#[test]
fn test_cost_accounting_does_not_affect_round_trips() {
    let graph = near_depot();
    let config = DispatchConfig::new().with_cost_accounting(CostAccounting::LastStep);
    let mut cases = depot_cases([2, 2, 7, 7, 8]);
    cases[2].vehicles_after = [1, 0, 0, 1, 0];
    cases[3].vehicles_after = [1, 1, 0, 1, 1];
    cases[4].vehicles_after = [2, 1, 0, 0, 1];
    for case in cases {
        run_case(&graph, &case, config, true);
    }
}

#[test]
fn test_manager_over_trait_object() {
    let graph = far_depot();
    let dyn_graph: &dyn TownGraph = &graph;
    let mut tm = TrafficManager::new(dyn_graph, vec![0, 16, 0, 0, 0], vec![1, 0, 1, 1, 1], 5)
        .expect("valid manager");
    assert_eq!(tm.transport_with_returns(1, 0, 16), Ok(20));
    assert_eq!(tm.vehicles(), &[4, 0, 0, 0, 0]);
}
