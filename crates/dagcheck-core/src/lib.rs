//! Core engine for dagcheck pipeline validation.
//!
//! This crate provides:
//! - The pipeline data model (nodes, edges, analysis result)
//! - Adjacency construction with endpoint validation
//! - Iterative cycle detection over the pipeline graph
//!
//! # Example
//!
//! ```
//! use dagcheck_core::{AnalyzeOptions, analyze};
//!
//! let analysis = analyze(["a", "b"], [("a", "b")], &AnalyzeOptions::default()).unwrap();
//! assert!(analysis.is_dag);
//! ```

pub mod error;
pub mod graph;
pub mod pipeline;

pub use error::{Endpoint, Error, Result};
pub use graph::{AnalyzeOptions, DuplicatePolicy, PipelineGraph};
pub use pipeline::{Analysis, Edge, Node, Pipeline, analyze};
