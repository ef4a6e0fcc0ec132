//! Integration tests for graph-level validation: singletons, start/end, reachability.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use workflow_engine::config::EngineConfig;
use workflow_engine::parse::{self, NodeType, WorkflowGraph};
use workflow_engine::validate;
use workflow_engine::workflow::{
    check_workflow, has_more_than_one_invalid, validate_workflow, validate_workflow_path,
};

const ALL_SINGLETONS: [NodeType; 3] = [NodeType::Start, NodeType::End, NodeType::Conditional];

#[test]
fn validate_example_workflow_passes() {
    let json = include_str!("fixtures/example_workflow.json");
    let snapshot = parse::parse(json).expect("Should parse");
    let graph = WorkflowGraph::build(&snapshot.nodes, &snapshot.edges);
    let errors = validate::validate_graph(&snapshot.nodes, &graph, &ALL_SINGLETONS);
    assert!(errors.is_empty(), "Expected no validation errors, got: {:?}", errors);
}

#[test]
fn no_start_node() {
    let json = include_str!("fixtures/no_start.json");
    let snapshot = parse::parse(json).unwrap();
    let errors = validate_workflow(&snapshot.nodes, &snapshot.edges);
    assert!(errors.contains(&"No start node found".to_string()), "{:?}", errors);
}

#[test]
fn no_end_node() {
    let nodes = vec![start("1")];
    assert_eq!(validate_workflow_path(&nodes, &[]), vec!["No end node found"]);
}

#[test]
fn neither_start_nor_end_skips_reachability() {
    let nodes = vec![api("1", "API", "https://example.com")];
    assert_eq!(
        validate_workflow_path(&nodes, &[]),
        vec!["No start node found", "No end node found"]
    );
}

#[test]
fn no_complete_path() {
    let nodes = vec![start("start1"), end("end1")];
    assert_eq!(
        validate_workflow_path(&nodes, &[]),
        vec!["No complete path exists from start node start1 to end node end1"]
    );
}

#[test]
fn path_through_intermediate_node() {
    let nodes = vec![start("start1"), api("api1", "API", "https://a.com"), end("end1")];
    let edges = edges(&[("start1", "api1"), ("api1", "end1")]);
    assert!(validate_workflow_path(&nodes, &edges).is_empty());
}

#[test]
fn path_direction_matters() {
    let nodes = vec![start("s"), end("e")];
    let edges = edges(&[("e", "s")]);
    assert_eq!(validate_workflow_path(&nodes, &edges).len(), 1);
}

#[test]
fn cycle_does_not_prevent_path() {
    let json = include_str!("fixtures/cycle.json");
    let snapshot = parse::parse(json).unwrap();
    assert!(validate_workflow_path(&snapshot.nodes, &snapshot.edges).is_empty());
}

#[test]
fn cycle_without_exit_terminates() {
    let nodes = vec![start("s"), api("a", "A", "https://a.com"), end("e")];
    let edges = edges(&[("s", "a"), ("a", "s"), ("a", "a"), ("s", "s")]);
    assert_eq!(
        validate_workflow_path(&nodes, &edges),
        vec!["No complete path exists from start node s to end node e"]
    );
}

#[test]
fn first_start_and_end_are_used() {
    // The second start node reaches the end, but only the first is searched from.
    let nodes = vec![start("s1"), start("s2"), end("e1"), end("e2")];
    let edges = edges(&[("s2", "e1"), ("s1", "e2")]);
    assert_eq!(
        validate_workflow_path(&nodes, &edges),
        vec!["No complete path exists from start node s1 to end node e1"]
    );
}

#[test]
fn dangling_edges_are_tolerated() {
    let json = include_str!("fixtures/dangling_edge.json");
    let snapshot = parse::parse(json).unwrap();
    assert!(validate_workflow(&snapshot.nodes, &snapshot.edges).is_empty());
}

#[test]
fn duplicate_singletons_are_reported() {
    let json = include_str!("fixtures/duplicate_singletons.json");
    let snapshot = parse::parse(json).unwrap();
    let errors = has_more_than_one_invalid(&snapshot.nodes, &ALL_SINGLETONS);
    assert_eq!(
        errors,
        vec![
            "Cannot have more than one Start Node",
            "Cannot have more than one Conditional Node"
        ]
    );
}

#[test]
fn duplicate_end_nodes_reported() {
    let nodes = vec![end("1"), end("2")];
    assert!(
        has_more_than_one_invalid(&nodes, &ALL_SINGLETONS)
            .contains(&"Cannot have more than one End Node".to_string())
    );
}

#[test]
fn singleton_check_passes_on_unique_and_empty() {
    let nodes = vec![start("1"), end("2"), api("3", "A", "https://a.com"), api("4", "B", "https://b.com")];
    assert!(has_more_than_one_invalid(&nodes, &ALL_SINGLETONS).is_empty());
    assert!(has_more_than_one_invalid(&[], &ALL_SINGLETONS).is_empty());
}

#[test]
fn singleton_types_follow_config() {
    let nodes = vec![start("1"), conditional("2"), conditional("3"), end("4")];
    let edges = edges(&[("1", "2"), ("2", "4")]);

    let default_errors = check_workflow(&nodes, &edges, &EngineConfig::default());
    assert!(default_errors.iter().any(|e| e.code == "V001"), "{:?}", default_errors);

    let relaxed = EngineConfig {
        singleton_types: vec![NodeType::Start, NodeType::End],
        ..EngineConfig::default()
    };
    assert!(check_workflow(&nodes, &edges, &relaxed).is_empty());
}

#[test]
fn full_validation_orders_singletons_nodes_then_path() {
    let nodes = vec![
        start("1"),
        start("2"),
        form("3", "", vec![]),
        api("4", "Call", "not-a-url"),
        end("5"),
    ];
    let errors = validate_workflow(&nodes, &[]);
    assert_eq!(
        errors,
        vec![
            "Cannot have more than one Start Node",
            "Node 3 : Node name is required, At least one field must be configured",
            "Node 4 : Please enter a valid URL",
            "No complete path exists from start node 1 to end node 5",
        ]
    );
}

#[test]
fn coded_errors_carry_node_ids() {
    let nodes = vec![start("1"), form("2", "Form", vec![]), end("3")];
    let edges = edges(&[("1", "2"), ("2", "3")]);
    let errors = check_workflow(&nodes, &edges, &EngineConfig::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "N001");
    assert_eq!(errors[0].node_id.as_deref(), Some("2"));
    assert_eq!(
        errors[0].to_string(),
        "[Validate:N001] Node 2 : At least one field must be configured (node '2')"
    );
}

#[test]
fn validation_is_idempotent() {
    let json = include_str!("fixtures/duplicate_singletons.json");
    let snapshot = parse::parse(json).unwrap();
    let first = validate_workflow(&snapshot.nodes, &snapshot.edges);
    let second = validate_workflow(&snapshot.nodes, &snapshot.edges);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn graph_reachability_helper() {
    let nodes = vec![start("a"), api("b", "B", "https://b.com"), end("c")];
    let graph = WorkflowGraph::build(&nodes, &edges(&[("a", "b"), ("b", "b"), ("b", "c")]));
    assert!(graph.is_reachable("a", "c"));
    assert!(!graph.is_reachable("c", "a"));
    assert!(!graph.is_reachable("a", "missing"));
}
