//! Types for the graph engine.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Endpoint, Error, Result};

/// What to do when the same node id or the same edge shows up twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Accept the input as-is. Repeated node ids collapse into one node,
    /// repeated edges stay parallel.
    #[default]
    Tolerate,
    /// Fail the analysis with a duplicate error.
    Reject,
}

/// Knobs for a single analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnalyzeOptions {
    /// Policy for repeated node identifiers.
    #[serde(default)]
    pub duplicate_nodes: DuplicatePolicy,
    /// Policy for repeated (source, target) pairs.
    #[serde(default)]
    pub duplicate_edges: DuplicatePolicy,
}

impl AnalyzeOptions {
    /// Options that reject both kinds of duplicates.
    pub fn strict() -> Self {
        Self {
            duplicate_nodes: DuplicatePolicy::Reject,
            duplicate_edges: DuplicatePolicy::Reject,
        }
    }
}

/// Adjacency view over one pipeline, built fresh for every analysis.
///
/// Identifiers are borrowed from the input and interned to dense indices in
/// first-occurrence order. Successor lists keep edge input order, which fixes
/// the traversal order of [`PipelineGraph::find_cycle`].
#[derive(Debug)]
pub struct PipelineGraph<'a> {
    /// Distinct node ids, indexed by dense node index
    pub(super) ids: Vec<&'a str>,
    /// Node id to dense index
    index: FxHashMap<&'a str, usize>,
    /// Successors of each node, in edge input order
    pub(super) adjacency: Vec<Vec<usize>>,
    /// Number of node entries in the input, duplicates included
    node_count: usize,
    /// Number of edge entries in the input, duplicates included
    edge_count: usize,
}

impl<'a> PipelineGraph<'a> {
    /// Build the adjacency mapping, validating every edge endpoint first.
    ///
    /// Nothing is traversed until all endpoints are known to exist, so a
    /// malformed pipeline fails here with a typed error instead of producing
    /// a verdict.
    pub fn build<N, E>(nodes: N, edges: E, options: &AnalyzeOptions) -> Result<Self>
    where
        N: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut ids = Vec::new();
        let mut index = FxHashMap::default();
        let mut node_count = 0;

        for id in nodes {
            node_count += 1;
            if index.contains_key(id) {
                if options.duplicate_nodes == DuplicatePolicy::Reject {
                    return Err(Error::DuplicateNode(id.to_string()));
                }
                continue;
            }
            index.insert(id, ids.len());
            ids.push(id);
        }

        let mut adjacency = vec![Vec::new(); ids.len()];
        let mut seen_edges = FxHashSet::default();
        let mut edge_count = 0;

        for (position, (source, target)) in edges.into_iter().enumerate() {
            edge_count += 1;
            let from = lookup(&index, position, Endpoint::Source, source)?;
            let to = lookup(&index, position, Endpoint::Target, target)?;

            if options.duplicate_edges == DuplicatePolicy::Reject && !seen_edges.insert((from, to)) {
                return Err(Error::DuplicateEdge {
                    from: source.to_string(),
                    to: target.to_string(),
                });
            }

            adjacency[from].push(to);
        }

        Ok(Self {
            ids,
            index,
            adjacency,
            node_count,
            edge_count,
        })
    }

    /// Number of node entries the graph was built from.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edge entries the graph was built from.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Get the number of distinct nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Distinct node ids in first-occurrence order.
    pub fn node_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.ids.iter().copied()
    }

    /// Direct successors of a node, in edge input order.
    ///
    /// Returns `None` if the node is not part of the graph.
    pub fn successors(&self, id: &str) -> Option<impl Iterator<Item = &'a str> + '_> {
        let &idx = self.index.get(id)?;
        Some(self.adjacency[idx].iter().map(|&succ| self.ids[succ]))
    }
}

fn lookup(
    index: &FxHashMap<&str, usize>,
    edge: usize,
    endpoint: Endpoint,
    node: &str,
) -> Result<usize> {
    index.get(node).copied().ok_or_else(|| Error::UnknownNode {
        edge,
        endpoint,
        node: node.to_string(),
    })
}
