//! The five pipeline nodes: vision → {historian, vibe} → treasurer → payout.
//!
//! Each node holds its collaborators, implements `Node<LociState>`, and
//! overlays exactly its own fields on the state. Collaborator errors
//! propagate; the graph runner aborts the run on the first failure.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::vision::{ImageSource, VisionClient};
use crate::wallet::MockEvmWallet;

use super::prompts::skill_prompt;
use super::state::LociState;

/// Default approval bar for the vibe score.
pub const DEFAULT_APPROVAL_THRESHOLD: u32 = 70;

fn llm_failed(e: impl std::fmt::Display) -> AgentError {
    AgentError::ExecutionFailed(e.to_string())
}

/// Describes the photo. Writes `state.vision`.
pub struct VisionNode {
    vision: Arc<dyn VisionClient>,
}

impl VisionNode {
    pub fn new(vision: Arc<dyn VisionClient>) -> Self {
        Self { vision }
    }
}

#[async_trait]
impl Node<LociState> for VisionNode {
    fn id(&self) -> &str {
        "vision"
    }

    async fn run(&self, mut state: LociState) -> Result<LociState, AgentError> {
        let image = ImageSource::path(&state.image);
        state.vision = self.vision.describe(&image).await.map_err(llm_failed)?;
        Ok(state)
    }

    fn output(&self, state: &LociState) -> Option<String> {
        Some(state.vision.clone())
    }
}

/// Adds cultural context for the described photo. Reads `state.vision`,
/// writes `state.historian`.
pub struct HistorianNode {
    llm: Arc<dyn LlmClient>,
}

impl HistorianNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<LociState> for HistorianNode {
    fn id(&self) -> &str {
        "historian"
    }

    async fn run(&self, mut state: LociState) -> Result<LociState, AgentError> {
        let messages = [
            Message::system(skill_prompt("historian")),
            Message::user(format!(
                "Image context: {}\nProvide cultural context and resonance relevant to this photo.",
                state.vision
            )),
        ];
        state.historian = self.llm.invoke(&messages).await.map_err(llm_failed)?.content;
        Ok(state)
    }

    fn output(&self, state: &LociState) -> Option<String> {
        Some(state.historian.clone())
    }
}

/// Assesses tone and scores the vibe. Reads `state.vision`, writes
/// `state.vibe` and `state.vibe_score`.
pub struct VibeNode {
    llm: Arc<dyn LlmClient>,
}

impl VibeNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<LociState> for VibeNode {
    fn id(&self) -> &str {
        "vibe"
    }

    async fn run(&self, mut state: LociState) -> Result<LociState, AgentError> {
        let messages = [
            Message::system(skill_prompt("vibe")),
            Message::user(format!(
                "Image context: {}\nAssess tone and social acceptability in one short paragraph, \
                 ending with a final line `Score: N` (0-100).",
                state.vision
            )),
        ];
        let reply = self.llm.invoke(&messages).await.map_err(llm_failed)?;
        state.vibe_score = parse_score(&reply.content);
        state.vibe = reply.content;
        Ok(state)
    }

    fn output(&self, state: &LociState) -> Option<String> {
        Some(state.vibe.clone())
    }
}

/// Extracts the score from the last line mentioning "score". Values above
/// 100 clamp to 100.
pub(crate) fn parse_score(text: &str) -> Option<u32> {
    for line in text.lines().rev() {
        let lower = line.to_ascii_lowercase();
        let Some(pos) = lower.find("score") else {
            continue;
        };
        let digits: String = line[pos + "score".len()..]
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(n) = digits.parse::<u32>() {
            return Some(n.min(100));
        }
    }
    None
}

/// Decides the payout. Reads `state.historian`, `state.vibe`, and
/// `state.vibe_score`; writes `state.treasurer` and
/// `state.payout_approved`.
///
/// The decision is the threshold comparison (`vibe_score >= threshold`,
/// missing score counts as 0); the LLM only phrases the verdict.
pub struct TreasurerNode {
    llm: Arc<dyn LlmClient>,
    threshold: u32,
}

impl TreasurerNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }

    /// Sets the approval bar (builder). Default 70.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }
}

#[async_trait]
impl Node<LociState> for TreasurerNode {
    fn id(&self) -> &str {
        "treasurer"
    }

    async fn run(&self, mut state: LociState) -> Result<LociState, AgentError> {
        let score = state.vibe_score.unwrap_or(0);
        let approved = score >= self.threshold;
        let verdict = if approved { "APPROVE" } else { "DENY" };
        let messages = [
            Message::system(skill_prompt("treasurer")),
            Message::user(format!(
                "Historian: {}\nVibe: {}\nThe vibe score is {score} against an approval bar \
                 of {}, so the verdict is {verdict}. Justify it in one short sentence.",
                state.historian, state.vibe, self.threshold
            )),
        ];
        let commentary = self.llm.invoke(&messages).await.map_err(llm_failed)?.content;
        state.treasurer = if commentary.is_empty() {
            verdict.to_string()
        } else {
            format!("{verdict}: {commentary}")
        };
        state.payout_approved = approved;
        Ok(state)
    }

    fn output(&self, state: &LociState) -> Option<String> {
        Some(state.treasurer.clone())
    }
}

/// Settlement configuration for the payout node.
#[derive(Debug, Clone, Default)]
pub struct SettlementConfig {
    /// Signer identifier; without it the payout is simulated.
    pub sign_with: Option<String>,
    /// RPC endpoint; without it the payout is simulated.
    pub rpc_url: Option<String>,
    /// Amount per approved payout.
    pub amount_usdc: f64,
}

impl SettlementConfig {
    /// Reads `PAYOUT_SIGN_WITH` and `WEB3_RPC_URL`; amount defaults to 1.
    pub fn from_env() -> Self {
        Self {
            sign_with: std::env::var("PAYOUT_SIGN_WITH").ok().filter(|s| !s.is_empty()),
            rpc_url: std::env::var("WEB3_RPC_URL").ok().filter(|s| !s.is_empty()),
            amount_usdc: 1.0,
        }
    }
}

/// Settles an approved payout through the wallet. Reads
/// `state.payout_approved` and `state.wallet`; writes `state.payout`.
///
/// Denied runs write exactly `"Not approved"` and never touch the
/// wallet. Approved runs with incomplete settlement credentials write a
/// clearly-marked simulated hash instead of failing.
pub struct PayoutNode {
    wallet: Arc<MockEvmWallet>,
    settlement: SettlementConfig,
}

impl PayoutNode {
    pub fn new(wallet: Arc<MockEvmWallet>, settlement: SettlementConfig) -> Self {
        Self { wallet, settlement }
    }

    fn simulated_hash(seed: &str) -> String {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        format!("Simulated transaction hash: SIM-{:08x}", hasher.finish() as u32)
    }
}

#[async_trait]
impl Node<LociState> for PayoutNode {
    fn id(&self) -> &str {
        "payout"
    }

    async fn run(&self, mut state: LociState) -> Result<LociState, AgentError> {
        if !state.payout_approved {
            state.payout = "Not approved".to_string();
            return Ok(state);
        }
        let credentialed = !state.wallet.is_empty()
            && self.settlement.sign_with.is_some()
            && self.settlement.rpc_url.is_some();
        if !credentialed {
            tracing::debug!("settlement credentials incomplete, simulating payout");
            state.payout = Self::simulated_hash(&state.wallet);
            return Ok(state);
        }
        let receipt = self
            .wallet
            .send_usdc(&state.wallet, self.settlement.amount_usdc)
            .await;
        state.payout = if receipt.success {
            receipt.tx_hash
        } else {
            format!("Transfer failed at block {}", receipt.block)
        };
        Ok(state)
    }

    fn output(&self, state: &LociState) -> Option<String> {
        Some(state.payout.clone())
    }
}
