//! Completion observer: invoked after each node finishes.
//!
//! The runner calls `on_node_complete(node_id, output, state)` with the
//! node's principal output and the full current state, so an observer can
//! branch on cross-step flags (e.g. an approval flag set upstream).
//! Observers are infallible by signature: a hook can neither corrupt the
//! run state nor abort the run.

/// Observer invoked synchronously after each completed node.
///
/// **Interaction**: Attached via `StateGraph::with_observer`; called by
/// `CompiledStateGraph::invoke`. Implemented by `argue::StageLogger` and,
/// via the blanket impl, by any matching closure.
pub trait NodeObserver<S>: Send + Sync {
    /// Called once per completed node, in execution order.
    ///
    /// `output` is the node's principal output (`Node::output`), empty
    /// when the node reports none; `state` is the state after the node ran.
    fn on_node_complete(&self, node_id: &str, output: &str, state: &S);
}

impl<S, F> NodeObserver<S> for F
where
    F: Fn(&str, &str, &S) + Send + Sync,
{
    fn on_node_complete(&self, node_id: &str, output: &str, state: &S) {
        self(node_id, output, state)
    }
}
