//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S`, returns updated `S`. A node may perform external
//! I/O (LLM, vision, wallet) through its own collaborators; from the
//! graph's point of view it is a single opaque transformation.

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::error::AgentError;

/// One step in a graph: state in, state out.
///
/// The returned state must be the input state overlaid with this node's
/// own outputs; fields written by earlier nodes stay visible downstream
/// unless deliberately overwritten. Consuming `S` by value and returning
/// the updated struct makes that overlay a type-checked move, not a
/// runtime merge convention.
///
/// **Interaction**: Registered via `StateGraph::add_node`; executed by
/// `CompiledStateGraph::invoke` in dependency order.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Node id (e.g. `"vision"`, `"treasurer"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, updated state out. Errors abort the run.
    async fn run(&self, state: S) -> Result<S, AgentError>;

    /// The principal output this node wrote into `state`, for observers.
    ///
    /// Default `None`; nodes that want their output surfaced to a
    /// `NodeObserver` override this to read their own field back.
    fn output(&self, _state: &S) -> Option<String> {
        None
    }
}

/// Adapts a plain function to a graph node.
///
/// Most steps are pure state transformations; `FnNode` saves a trait impl
/// for those. `with_output` attaches an extractor so observers see the
/// step's principal output.
///
/// ```ignore
/// let double = FnNode::new("double", |mut s: Counters| {
///     s.value *= 2;
///     Ok(s)
/// });
/// ```
pub struct FnNode<S, F> {
    id: String,
    func: F,
    output: Option<Box<dyn Fn(&S) -> String + Send + Sync>>,
    _state: PhantomData<fn(S) -> S>,
}

impl<S, F> FnNode<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S) -> Result<S, AgentError> + Send + Sync,
{
    /// Wraps `func` as a node with the given id.
    pub fn new(id: impl Into<String>, func: F) -> Self {
        Self {
            id: id.into(),
            func,
            output: None,
            _state: PhantomData,
        }
    }

    /// Attaches an output extractor for observers (builder).
    pub fn with_output(
        mut self,
        extract: impl Fn(&S) -> String + Send + Sync + 'static,
    ) -> Self {
        self.output = Some(Box::new(extract));
        self
    }
}

#[async_trait]
impl<S, F> Node<S> for FnNode<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Fn(S) -> Result<S, AgentError> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: S) -> Result<S, AgentError> {
        (self.func)(state)
    }

    fn output(&self, state: &S) -> Option<String> {
        self.output.as_ref().map(|f| f(state))
    }
}
