//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds the nodes and the fixed
//! execution order; `invoke` threads state through every node in that
//! order and notifies the observer after each one.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;

use super::Node;
use super::NodeObserver;

/// Compiled graph: immutable structure, supports invoke only.
///
/// Created by `StateGraph::compile()` (or `compile_best_effort()`). The
/// execution order is fixed at compile time, so repeated `invoke` calls
/// with equal initial states produce equal orders and, with deterministic
/// nodes, equal final states. `invoke` borrows `self` immutably;
/// concurrent invocations of one compiled graph are safe.
///
/// **Interaction**: Built from `StateGraph`; callers use `invoke(state)`
/// to execute and `execution_order()` to inspect the order.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Box<dyn Node<S>>>,
    pub(super) order: Vec<String>,
    pub(super) entry: Option<String>,
    pub(super) finish: Option<String>,
    pub(super) observer: Option<Arc<dyn NodeObserver<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Runs every node in the fixed order, threading state through.
    ///
    /// Each node receives the current state and returns the updated
    /// state; after each node the observer (if any) is called with the
    /// node's id, its principal output, and the state so far. A node
    /// error aborts the run immediately and is returned as
    /// `AgentError::NodeFailed` naming the node; no error is ever
    /// encoded into the state instead.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let mut state = state;
        for id in &self.order {
            let node = self
                .nodes
                .get(id)
                .expect("compiled graph has all ordered nodes");
            state = node
                .run(state)
                .await
                .map_err(|e| AgentError::NodeFailed {
                    node: id.clone(),
                    message: e.to_string(),
                })?;
            tracing::debug!(node = %id, "node complete");
            if let Some(observer) = &self.observer {
                let output = node.output(&state).unwrap_or_default();
                observer.on_node_complete(id, &output, &state);
            }
        }
        Ok(state)
    }

    /// The fixed execution order. Nodes unreachable from the entry are
    /// absent: they never run and never touch the state.
    pub fn execution_order(&self) -> &[String] {
        &self.order
    }

    /// The designated entry node, when one was set.
    pub fn entry_point(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// The designated finish node, when one was set. Informational.
    pub fn finish_point(&self) -> Option<&str> {
        self.finish.as_deref()
    }
}
