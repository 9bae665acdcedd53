//! Intra-file call graph
//!
//! Built from the per-function `calls` lists, so it inherits their
//! limitations: internal functions only, token-level detection, no dynamic
//! invocation tracking. Self-calls never become edges (filtered upstream by
//! the classifier).

use crate::report::FunctionSummary;
use std::collections::{HashMap, HashSet};

/// Call graph for one script file.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    /// Map from function name to the functions it calls, in detection order.
    pub edges: HashMap<String, Vec<String>>,
    /// All functions in the graph.
    pub nodes: HashSet<String>,
}

impl CallGraph {
    /// Create an empty call graph
    pub fn new() -> Self {
        CallGraph::default()
    }

    /// Add a function to the graph
    pub fn add_node(&mut self, name: String) {
        self.nodes.insert(name);
    }

    /// Add a call edge (caller -> callee)
    pub fn add_edge(&mut self, caller: String, callee: String) {
        self.nodes.insert(caller.clone());
        self.nodes.insert(callee.clone());
        self.edges.entry(caller).or_default().push(callee);
    }

    /// Number of functions calling this function.
    pub fn fan_in(&self, name: &str) -> usize {
        self.edges
            .values()
            .filter(|callees| callees.iter().any(|c| c == name))
            .count()
    }

    /// Number of functions this function calls.
    pub fn fan_out(&self, name: &str) -> usize {
        self.edges.get(name).map(|callees| callees.len()).unwrap_or(0)
    }

    /// Callers of a function, sorted for deterministic output.
    pub fn callers_of(&self, name: &str) -> Vec<&str> {
        let mut callers: Vec<&str> = self
            .edges
            .iter()
            .filter(|(_, callees)| callees.iter().any(|c| c == name))
            .map(|(caller, _)| caller.as_str())
            .collect();
        callers.sort_unstable();
        callers
    }

    /// Build the call graph for one file from its function summaries.
    ///
    /// Every summarized function becomes a node even when it neither calls
    /// nor is called; edges come straight from the `calls` lists, which are
    /// already deduplicated and self-filtered.
    pub fn from_summaries(summaries: &[FunctionSummary]) -> Self {
        let mut graph = CallGraph::new();
        for summary in summaries {
            graph.add_node(summary.name.clone());
        }
        for summary in summaries {
            for callee in &summary.calls {
                graph.add_edge(summary.name.clone(), callee.clone());
            }
        }
        graph
    }
}
