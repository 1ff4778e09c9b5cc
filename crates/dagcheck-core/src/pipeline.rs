//! Pipeline data model and the analysis entry points.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::graph::{AnalyzeOptions, PipelineGraph};

/// A node of a submitted pipeline.
///
/// Only `id` takes part in the analysis; the other fields are carried
/// through unexamined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, expected to be unique within a pipeline
    pub id: String,
    /// Node type tag as set by the editor
    #[serde(rename = "type")]
    pub kind: String,
    /// Arbitrary node payload
    pub data: Map<String, Value>,
    /// Canvas position
    pub position: Map<String, Value>,
}

impl Node {
    /// Create a node with an empty payload and position.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data: Map::new(),
            position: Map::new(),
        }
    }
}

/// A directed edge between two nodes of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A pipeline as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Pipeline {
    /// Build the adjacency view of this pipeline.
    pub fn graph(&self, options: &AnalyzeOptions) -> Result<PipelineGraph<'_>> {
        PipelineGraph::build(
            self.nodes.iter().map(|node| node.id.as_str()),
            self.edges
                .iter()
                .map(|edge| (edge.source.as_str(), edge.target.as_str())),
            options,
        )
    }

    /// Count nodes and edges and decide whether the pipeline is a DAG.
    pub fn analyze(&self, options: &AnalyzeOptions) -> Result<Analysis> {
        self.graph(options).map(|graph| Analysis::of(&graph))
    }
}

/// Outcome of analyzing a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Number of node entries submitted
    pub num_nodes: usize,
    /// Number of edge entries submitted
    pub num_edges: usize,
    /// Whether the graph has no directed cycle
    pub is_dag: bool,
}

impl Analysis {
    /// Compute the analysis of an already built graph.
    pub fn of(graph: &PipelineGraph<'_>) -> Self {
        let is_dag = graph.is_acyclic();

        tracing::debug!(
            num_nodes = graph.node_count(),
            num_edges = graph.edge_count(),
            is_dag,
            "analyzed pipeline graph"
        );

        Self {
            num_nodes: graph.node_count(),
            num_edges: graph.edge_count(),
            is_dag,
        }
    }
}

/// Analyze a graph given as node ids and `(source, target)` pairs.
///
/// Every edge endpoint is checked against the node ids before any traversal
/// begins; a reference to an unknown node fails with
/// [`Error::UnknownNode`](crate::Error::UnknownNode).
pub fn analyze<'a, N, E>(nodes: N, edges: E, options: &AnalyzeOptions) -> Result<Analysis>
where
    N: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = (&'a str, &'a str)>,
{
    PipelineGraph::build(nodes, edges, options).map(|graph| Analysis::of(&graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Endpoint, Error};
    use crate::graph::DuplicatePolicy;

    fn pipeline(nodes: &[&str], edges: &[(&str, &str)]) -> Pipeline {
        Pipeline {
            nodes: nodes.iter().map(|&id| Node::new(id, "default")).collect(),
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, &(s, t))| Edge::new(format!("e{i}"), s, t))
                .collect(),
        }
    }

    fn run(nodes: &[&str], edges: &[(&str, &str)]) -> Result<Analysis> {
        pipeline(nodes, edges).analyze(&AnalyzeOptions::default())
    }

    #[test]
    fn test_empty_pipeline() {
        let analysis = run(&[], &[]).unwrap();
        assert_eq!(
            analysis,
            Analysis {
                num_nodes: 0,
                num_edges: 0,
                is_dag: true,
            }
        );
    }

    #[test]
    fn test_self_loop_is_not_a_dag() {
        let analysis = run(&["A"], &[("A", "A")]).unwrap();
        assert_eq!(analysis.num_nodes, 1);
        assert_eq!(analysis.num_edges, 1);
        assert!(!analysis.is_dag);
    }

    #[test]
    fn test_simple_chain() {
        let analysis = run(&["A", "B", "C"], &[("A", "B"), ("B", "C")]).unwrap();
        assert_eq!(
            analysis,
            Analysis {
                num_nodes: 3,
                num_edges: 2,
                is_dag: true,
            }
        );
    }

    #[test]
    fn test_simple_cycle() {
        let analysis = run(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]).unwrap();
        assert_eq!(analysis.num_edges, 3);
        assert!(!analysis.is_dag);
    }

    #[test]
    fn test_cycle_in_disconnected_component() {
        let analysis = run(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D"), ("D", "C")]).unwrap();
        assert_eq!(analysis.num_nodes, 4);
        assert!(!analysis.is_dag);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let p = pipeline(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "B")]);
        let options = AnalyzeOptions::default();
        assert_eq!(p.analyze(&options).unwrap(), p.analyze(&options).unwrap());
    }

    #[test]
    fn test_unknown_reference_fails() {
        let err = run(&["A", "B"], &[("A", "B"), ("B", "Z")]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownNode {
                edge: 1,
                endpoint: Endpoint::Target,
                node: "Z".to_string(),
            }
        );
    }

    #[test]
    fn test_counts_include_duplicates() {
        let analysis = run(&["A", "A", "B"], &[("A", "B"), ("A", "B")]).unwrap();
        assert_eq!(analysis.num_nodes, 3);
        assert_eq!(analysis.num_edges, 2);
        assert!(analysis.is_dag);
    }

    #[test]
    fn test_duplicate_node_edges_merge() {
        // Edges attached to either copy of B end up on the same node
        let analysis = run(&["A", "B", "B"], &[("A", "B"), ("B", "A")]).unwrap();
        assert!(!analysis.is_dag);
    }

    #[test]
    fn test_reject_duplicate_nodes() {
        let options = AnalyzeOptions {
            duplicate_nodes: DuplicatePolicy::Reject,
            ..Default::default()
        };
        let err = pipeline(&["A", "A"], &[]).analyze(&options).unwrap_err();
        assert!(matches!(err, Error::DuplicateNode(id) if id == "A"));
    }

    #[test]
    fn test_analyze_from_pairs() {
        let analysis = analyze(
            ["A", "B", "C"],
            [("A", "B"), ("B", "C"), ("C", "A")],
            &AnalyzeOptions::default(),
        )
        .unwrap();
        assert_eq!(analysis.num_nodes, 3);
        assert_eq!(analysis.num_edges, 3);
        assert!(!analysis.is_dag);
    }

    #[test]
    fn test_pipeline_deserializes_wire_format() {
        let json = r#"{
            "nodes": [
                {"id": "in", "type": "customInput", "data": {"name": "x"}, "position": {"x": 0, "y": 0}},
                {"id": "out", "type": "customOutput", "data": {}, "position": {"x": 250, "y": 10}}
            ],
            "edges": [
                {"id": "in-out", "source": "in", "target": "out"}
            ]
        }"#;

        let p: Pipeline = serde_json::from_str(json).unwrap();
        assert_eq!(p.nodes[0].kind, "customInput");
        assert_eq!(p.nodes[0].data["name"], "x");
        assert_eq!(p.edges[0].source, "in");

        let analysis = p.analyze(&AnalyzeOptions::default()).unwrap();
        let value = serde_json::to_value(analysis).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"num_nodes": 2, "num_edges": 1, "is_dag": true})
        );
    }

    #[test]
    fn test_node_requires_all_fields() {
        let json = r#"{"nodes": [{"id": "a", "type": "t", "data": {}}], "edges": []}"#;
        assert!(serde_json::from_str::<Pipeline>(json).is_err());
    }
}
