//! State graph builder: nodes + dependency edges.
//!
//! Add nodes with `add_node`, declare "must run before" dependencies with
//! `add_edge`, then `compile` to get a `CompiledStateGraph`. All
//! structural validation happens in `compile`, so the builder methods
//! stay chainable and infallible.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use crate::graph::build_error::GraphBuildError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::node::Node;
use crate::graph::observer::NodeObserver;

/// State graph: nodes plus a directed dependency edge set.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge`,
/// optionally designate entry and finish points, then `compile()` to
/// obtain an executable graph. Fan-out (one node feeding several) and
/// fan-in (several nodes feeding one) are both allowed; the edge set
/// reachable from the entry must be acyclic.
///
/// **Interaction**: Accepts `Box<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    /// Registrations in call order; duplicates are caught by `compile`.
    nodes: Vec<(String, Box<dyn Node<S>>)>,
    /// Directed edges `(from, to)`: `to` depends on `from` having run.
    edges: Vec<(String, String)>,
    entry: Option<String>,
    finish: Option<String>,
    observer: Option<Arc<dyn NodeObserver<S>>>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            entry: None,
            finish: None,
            observer: None,
        }
    }

    /// Registers a node; the id must be unique (checked by `compile`).
    ///
    /// Returns `&mut Self` for method chaining. Registration order is the
    /// tie-break when several nodes become ready at the same time, so the
    /// execution order is fully determined by `add_node`/`add_edge` calls.
    pub fn add_node(&mut self, id: impl Into<String>, node: Box<dyn Node<S>>) -> &mut Self {
        self.nodes.push((id.into(), node));
        self
    }

    /// Records that `to` depends on `from` having run first.
    ///
    /// Either endpoint may be registered after the edge; `compile` rejects
    /// edges whose endpoint was never registered at all.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// Designates the entry node: it seeds the traversal and starts the
    /// run even when it has inbound edges (its in-degree is forced to
    /// zero). Without an entry, all zero-in-degree nodes seed the run.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.entry = Some(id.into());
        self
    }

    /// Designates the finish node. Informational: execution order is
    /// derived from the edges alone, but callers can read it back from
    /// the compiled graph.
    pub fn set_finish_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.finish = Some(id.into());
        self
    }

    /// Attaches a completion observer, invoked after each node with the
    /// node's id, its principal output, and the full current state.
    pub fn with_observer(self, observer: Arc<dyn NodeObserver<S>>) -> Self {
        Self {
            observer: Some(observer),
            ..self
        }
    }

    /// Builds the executable graph: validates the structure and fixes the
    /// execution order.
    ///
    /// Validation (all at build time, first defect wins): non-empty ids,
    /// no duplicate registrations, every edge endpoint registered, entry
    /// and finish registered when set, and no cycle among the nodes due
    /// to run. The order is computed by Kahn's algorithm, seeded from the
    /// entry when one is set (in-degree forced to zero) or from all
    /// zero-in-degree nodes otherwise; when several nodes are ready at
    /// once, the one registered first runs first. A node reached through
    /// several edges is ordered exactly once.
    ///
    /// Given the same nodes, edges, and entry, the order is identical on
    /// every call; nodes unreachable from the entry are absent from it.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, GraphBuildError> {
        let StateGraph {
            nodes,
            edges,
            entry,
            finish,
            observer,
        } = self;

        if nodes.is_empty() {
            return Err(GraphBuildError::EmptyGraph);
        }
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (i, (id, _)) in nodes.iter().enumerate() {
            if id.is_empty() {
                return Err(GraphBuildError::EmptyNodeId);
            }
            if index.insert(id.as_str(), i).is_some() {
                return Err(GraphBuildError::DuplicateNode(id.clone()));
            }
        }
        for (from, to) in &edges {
            for endpoint in [from, to] {
                if !index.contains_key(endpoint.as_str()) {
                    return Err(GraphBuildError::UnknownEdgeEndpoint {
                        from: from.clone(),
                        to: to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        let entry_idx = match &entry {
            Some(id) => Some(
                *index
                    .get(id.as_str())
                    .ok_or_else(|| GraphBuildError::UnknownEntry(id.clone()))?,
            ),
            None => None,
        };
        if let Some(id) = &finish {
            if !index.contains_key(id.as_str()) {
                return Err(GraphBuildError::UnknownFinish(id.clone()));
            }
        }

        let adjacency = build_adjacency(nodes.len(), &edges, &index);
        let order = kahn_order(nodes.len(), &adjacency, entry_idx);

        if order.len() < nodes.len() {
            // Nodes due to run but not ordered sit in or behind a cycle.
            // With an entry set, only nodes reachable from it are due;
            // without one, every registered node is.
            let due = match entry_idx {
                Some(e) => reachable_from(e, &adjacency),
                None => vec![true; nodes.len()],
            };
            let mut ordered = vec![false; nodes.len()];
            for &i in &order {
                ordered[i] = true;
            }
            let stuck: Vec<String> = (0..nodes.len())
                .filter(|&i| due[i] && !ordered[i])
                .map(|i| nodes[i].0.clone())
                .collect();
            if !stuck.is_empty() {
                return Err(GraphBuildError::Cycle(stuck));
            }
            tracing::debug!(
                skipped = nodes.len() - order.len(),
                "unreachable nodes excluded from execution order"
            );
        }

        let order_ids: Vec<String> = order.iter().map(|&i| nodes[i].0.clone()).collect();
        Ok(CompiledStateGraph {
            nodes: nodes.into_iter().collect(),
            order: order_ids,
            entry,
            finish,
            observer,
        })
    }

    /// Builds the graph without structural validation, for compatibility
    /// with graph definitions that rely on lenient semantics.
    ///
    /// Duplicate registrations: the last node wins (first registration
    /// keeps the position). Edges with an unregistered endpoint are
    /// ignored, as is an unregistered entry. A cycle silently truncates
    /// the execution order at its boundary. Prefer `compile`.
    pub fn compile_best_effort(self) -> CompiledStateGraph<S> {
        let StateGraph {
            nodes,
            edges,
            entry,
            finish,
            observer,
        } = self;

        let mut deduped: Vec<(String, Box<dyn Node<S>>)> = Vec::with_capacity(nodes.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
        for (id, node) in nodes {
            match index.get(&id) {
                Some(&i) => deduped[i].1 = node,
                None => {
                    index.insert(id.clone(), deduped.len());
                    deduped.push((id, node));
                }
            }
        }
        let index_ref: HashMap<&str, usize> =
            index.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        let kept: Vec<(String, String)> = edges
            .into_iter()
            .filter(|(from, to)| {
                index_ref.contains_key(from.as_str()) && index_ref.contains_key(to.as_str())
            })
            .collect();
        let entry_idx = entry
            .as_ref()
            .and_then(|id| index_ref.get(id.as_str()).copied());

        let adjacency = build_adjacency(deduped.len(), &kept, &index_ref);
        let order = kahn_order(deduped.len(), &adjacency, entry_idx);
        let order_ids: Vec<String> = order.iter().map(|&i| deduped[i].0.clone()).collect();

        CompiledStateGraph {
            nodes: deduped.into_iter().collect(),
            order: order_ids,
            entry,
            finish,
            observer,
        }
    }
}

fn build_adjacency(
    n: usize,
    edges: &[(String, String)],
    index: &HashMap<&str, usize>,
) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (from, to) in edges {
        adjacency[index[from.as_str()]].push(index[to.as_str()]);
    }
    adjacency
}

/// Kahn's algorithm over node indices. Ready nodes are drained smallest
/// registration index first; a visited guard keeps fan-in nodes from
/// being ordered once per inbound edge.
fn kahn_order(n: usize, adjacency: &[Vec<usize>], entry: Option<usize>) -> Vec<usize> {
    let mut in_degree = vec![0usize; n];
    for targets in adjacency {
        for &t in targets {
            in_degree[t] += 1;
        }
    }
    let mut ready: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
    match entry {
        Some(e) => {
            // The entry starts the run regardless of inbound edges.
            in_degree[e] = 0;
            ready.push(Reverse(e));
        }
        None => {
            for (i, &d) in in_degree.iter().enumerate() {
                if d == 0 {
                    ready.push(Reverse(i));
                }
            }
        }
    }
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(i)) = ready.pop() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        order.push(i);
        for &t in &adjacency[i] {
            if visited[t] {
                continue;
            }
            in_degree[t] = in_degree[t].saturating_sub(1);
            if in_degree[t] == 0 {
                ready.push(Reverse(t));
            }
        }
    }
    order
}

fn reachable_from(start: usize, adjacency: &[Vec<usize>]) -> Vec<bool> {
    let mut seen = vec![false; adjacency.len()];
    let mut stack = vec![start];
    seen[start] = true;
    while let Some(i) = stack.pop() {
        for &t in &adjacency[i] {
            if !seen[t] {
                seen[t] = true;
                stack.push(t);
            }
        }
    }
    seen
}
