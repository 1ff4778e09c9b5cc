//! Depth-first cycle search over a [`PipelineGraph`].
//!
//! The search is the classic on-stack coloring scheme, run with an explicit
//! frame stack so that deep pipelines cannot exhaust the call stack. Roots are
//! tried in node input order and successors in edge input order, the same
//! order a recursive implementation would visit them in.

use super::types::PipelineGraph;

/// Per-node traversal state. Transitions only go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl<'a> PipelineGraph<'a> {
    /// Check whether the graph contains no directed cycle.
    pub fn is_acyclic(&self) -> bool {
        self.find_cycle().is_none()
    }

    /// Find the first cycle reachable in traversal order.
    ///
    /// The returned path starts at the node the back-edge points to and ends
    /// at the node that closed the cycle; the last node always has an edge
    /// back to the first. A self-loop yields a single-node path.
    pub fn find_cycle(&self) -> Option<Vec<&'a str>> {
        let mut marks = vec![Mark::Unvisited; self.ids.len()];

        for root in 0..self.ids.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }

            tracing::trace!(root = self.ids[root], "starting traversal");

            if let Some(path) = self.search_from(root, &mut marks) {
                return Some(path.into_iter().map(|idx| self.ids[idx]).collect());
            }
        }

        None
    }

    fn search_from(&self, root: usize, marks: &mut [Mark]) -> Option<Vec<usize>> {
        // Each frame is a node on the active path and the position of its
        // next successor to look at.
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::OnStack;

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;

            let Some(&succ) = self.adjacency[node].get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[succ] {
                Mark::Unvisited => {
                    marks[succ] = Mark::OnStack;
                    stack.push((succ, 0));
                }
                Mark::OnStack => {
                    // Back-edge: the cycle is the active path from `succ` up.
                    let start = stack.iter().position(|&(n, _)| n == succ).unwrap_or(0);
                    return Some(stack[start..].iter().map(|&(n, _)| n).collect());
                }
                Mark::Done => {}
            }
        }

        None
    }
}
