//! Operation graph model and cascading risk propagation
//!
//! Risk flows from parent operations to children. Nodes are processed
//! in topological order so every parent is scored before its children.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskCascadeError};
use crate::risk::calculate_topological_risk;

/// Category of an operations requirement or business need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationCategory {
    Transportation,
    Financing,
    Insurance,
    Guarantee,
    Recruitment,
    Materials,
    Equipment,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub category: OperationCategory,
}

/// Directed dependency edge; weight is the importance of the source
/// operation to the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Per-node assessment: local risk in, cascading risk out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAssessment {
    pub local_risk: f32,
    /// Cascading risk score, filled in by [`propagate`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<f32>,
}

impl Graph {
    /// Parse a graph from its JSON interchange form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn parents_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.target == id)
            .map(|e| e.source.as_str())
            .collect()
    }

    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .map(|e| e.target.as_str())
            .collect()
    }
}

/// Topological sort via Kahn's algorithm, parents before children.
///
/// Errors on an empty graph, on an edge whose target is not a node,
/// and when a cycle prevents sorting all nodes.
pub fn topological_sort(graph: &Graph) -> Result<Vec<&Node>> {
    if graph.nodes.is_empty() {
        return Err(RiskCascadeError::Graph {
            message: "cannot sort an empty graph".into(),
        });
    }

    let by_id: HashMap<&str, &Node> = graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut in_degree: HashMap<&str, usize> =
        graph.nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
    for edge in &graph.edges {
        match in_degree.get_mut(edge.target.as_str()) {
            Some(d) => *d += 1,
            None => {
                return Err(RiskCascadeError::Graph {
                    message: format!("edge target '{}' is not a node in the graph", edge.target),
                });
            }
        }
    }

    let mut queue: VecDeque<&Node> = graph
        .nodes
        .iter()
        .filter(|n| in_degree.get(n.id.as_str()) == Some(&0))
        .collect();
    let mut sorted: Vec<&Node> = Vec::with_capacity(graph.nodes.len());

    while let Some(current) = queue.pop_front() {
        sorted.push(current);
        for child in graph.children_of(&current.id) {
            if let Some(d) = in_degree.get_mut(child) {
                *d -= 1;
                if *d == 0
                    && let Some(node) = by_id.get(child).copied()
                {
                    queue.push_back(node);
                }
            }
        }
    }

    if sorted.len() != graph.nodes.len() {
        return Err(RiskCascadeError::Graph {
            message: format!(
                "topological sort covered {}/{} nodes; the graph may contain a cycle",
                sorted.len(),
                graph.nodes.len()
            ),
        });
    }
    Ok(sorted)
}

/// Propagate risk scores through the graph in topological order.
///
/// Every node must carry an assessment with `local_risk` in [0, 1].
/// The cascading score is written back into the assessment's `risk`
/// field, so parents are always scored before their children read them.
pub fn propagate(
    graph: &Graph,
    assessments: &mut HashMap<String, NodeAssessment>,
    multiplier: f32,
) -> Result<()> {
    if graph.nodes.is_empty() {
        tracing::warn!("empty graph passed to propagate");
        return Ok(());
    }

    for node in &graph.nodes {
        let assessment = assessments.get(&node.id).ok_or_else(|| {
            RiskCascadeError::Validation {
                message: format!("node {} missing from assessments", node.id),
            }
        })?;
        if !(0.0..=1.0).contains(&assessment.local_risk) {
            return Err(RiskCascadeError::Validation {
                message: format!(
                    "node {} has local_risk {} outside [0, 1]",
                    node.id, assessment.local_risk
                ),
            });
        }
    }

    let sorted = topological_sort(graph)?;
    tracing::info!(
        nodes = sorted.len(),
        multiplier,
        "propagating risk in topological order"
    );

    for node in sorted {
        let local_risk = assessments
            .get(&node.id)
            .map(|a| a.local_risk)
            .ok_or_else(|| RiskCascadeError::Internal {
                message: format!("assessment for node {} disappeared mid-pass", node.id),
            })?;

        let mut parent_risks = Vec::new();
        for parent in graph.parents_of(&node.id) {
            let parent_risk = assessments.get(parent).and_then(|a| a.risk).ok_or_else(|| {
                RiskCascadeError::Internal {
                    message: format!(
                        "parent {} of node {} not yet scored; topological order may be incorrect",
                        parent, node.id
                    ),
                }
            })?;
            parent_risks.push(parent_risk);
        }

        let cascading = calculate_topological_risk(local_risk, multiplier, &parent_risks);
        tracing::debug!(
            node = %node.id,
            local_risk,
            parents = parent_risks.len(),
            cascading,
            "node scored"
        );
        if let Some(assessment) = assessments.get_mut(&node.id) {
            assessment.risk = Some(cascading);
        }
    }

    tracing::info!("risk propagation completed");
    Ok(())
}

/// Ancestor ids reachable from `id` within `max_depth` hops, breadth
/// first, nearest ancestors first. The node itself is not included.
pub fn ancestors_within(graph: &Graph, id: &str, max_depth: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut chain = Vec::new();
    let mut frontier = vec![id];
    let mut depth = 0;

    while depth < max_depth && !frontier.is_empty() {
        let mut next = Vec::new();
        for node in frontier {
            for parent in graph.parents_of(node) {
                if seen.insert(parent) {
                    chain.push(parent.to_string());
                    next.push(parent);
                }
            }
        }
        frontier = next;
        depth += 1;
    }
    chain
}
