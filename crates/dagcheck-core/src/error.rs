//! Error types for dagcheck-core.

use thiserror::Error;

/// Result type for dagcheck-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of an edge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Errors that can occur while analyzing a pipeline.
///
/// All of these are raised by the validation pre-pass, before any traversal
/// starts, so an analysis either fails here or produces a complete verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An edge endpoint names a node that is not in the pipeline.
    #[error("edge #{edge} references unknown {endpoint} node '{node}'")]
    UnknownNode {
        /// Position of the offending edge in the input order.
        edge: usize,
        endpoint: Endpoint,
        node: String,
    },

    /// A node identifier appears more than once.
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// Two edges connect the same source and target.
    #[error("duplicate edge '{from}' -> '{to}'")]
    DuplicateEdge { from: String, to: String },
}
