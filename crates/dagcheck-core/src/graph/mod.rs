//! Graph engine for pipeline validation.
//!
//! This module provides:
//! - Adjacency construction with up-front endpoint validation
//! - Configurable handling of duplicate nodes and edges
//! - Cycle detection with a recoverable cycle path

mod traversal;
mod types;

pub use types::{AnalyzeOptions, DuplicatePolicy, PipelineGraph};
