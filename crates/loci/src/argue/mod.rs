//! Judge-a-photo pipeline: vision → {historian, vibe} → treasurer → payout.
//!
//! The vision description fans out to two commentators; their takes fan
//! back in at the treasurer, which scores the vibe against an approval
//! bar; the payout node settles (or refuses, or simulates) accordingly.
//! `argue_graph` wires the nodes and edges; callers attach an observer
//! (e.g. `StageLogger`) and `compile()`.

mod logger;
mod nodes;
mod prompts;
mod state;

pub use logger::StageLogger;
pub use nodes::{
    HistorianNode, PayoutNode, SettlementConfig, TreasurerNode, VibeNode, VisionNode,
    DEFAULT_APPROVAL_THRESHOLD,
};
pub use prompts::skill_prompt;
pub use state::LociState;

use std::sync::Arc;

use crate::graph::StateGraph;
use crate::llm::LlmClient;
use crate::vision::VisionClient;
use crate::wallet::MockEvmWallet;

/// Builds the argue graph around the given collaborators.
///
/// Returns the uncompiled graph so callers can attach an observer or
/// adjust it before `compile()`:
///
/// ```ignore
/// let compiled = argue_graph(vision, llm, wallet, SettlementConfig::from_env())
///     .with_observer(Arc::new(StageLogger))
///     .compile()?;
/// let final_state = compiled.invoke(LociState::new(image, wallet_addr)).await?;
/// ```
pub fn argue_graph(
    vision: Arc<dyn VisionClient>,
    llm: Arc<dyn LlmClient>,
    wallet: Arc<MockEvmWallet>,
    settlement: SettlementConfig,
) -> StateGraph<LociState> {
    let mut graph = StateGraph::new();
    graph
        .add_node("vision", Box::new(VisionNode::new(vision)))
        .add_node("historian", Box::new(HistorianNode::new(llm.clone())))
        .add_node("vibe", Box::new(VibeNode::new(llm.clone())))
        .add_node("treasurer", Box::new(TreasurerNode::new(llm)))
        .add_node("payout", Box::new(PayoutNode::new(wallet, settlement)))
        .add_edge("vision", "historian")
        .add_edge("vision", "vibe")
        .add_edge("historian", "treasurer")
        .add_edge("vibe", "treasurer")
        .add_edge("treasurer", "payout")
        .set_entry_point("vision")
        .set_finish_point("payout");
    graph
}
