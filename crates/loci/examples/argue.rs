//! Judge a photo: vision → {historian, vibe} → treasurer → payout.
//!
//! The vision description fans out to the historian and vibe readers,
//! their takes fan in at the treasurer, and an approved verdict settles
//! a mock USDC payout to the given wallet.
//!
//! ## Prerequisites
//!
//! Create a `.env` file in the workspace root with:
//!
//! ```bash
//! GEMINI_API_KEY=...      # real vision + commentary; omit for offline mocks
//! PAYOUT_SIGN_WITH=...    # together with WEB3_RPC_URL enables the mock
//! WEB3_RPC_URL=...        # wallet; otherwise the payout is simulated
//! ```
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p loci --example argue -- demo.png 0xYourWallet
//! ```

use std::sync::Arc;
use std::time::Duration;

use loci::argue::{argue_graph, LociState, SettlementConfig, StageLogger};
use loci::{ChatGemini, LlmClient, LlmResponse, MockEvmWallet, MockLlm, MockVision, VisionClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env (GEMINI_API_KEY etc.) before wiring collaborators
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let image = args.next().unwrap_or_else(|| "demo.png".to_string());
    let wallet_addr = args
        .next()
        .or_else(|| std::env::var("DEMO_WALLET").ok())
        .unwrap_or_else(|| "SPON-DEMO-WALLET".to_string());

    // Real Gemini when a key is configured; offline mocks otherwise.
    let (vision, llm): (Arc<dyn VisionClient>, Arc<dyn LlmClient>) =
        if std::env::var("GEMINI_API_KEY").is_ok() {
            let gemini = Arc::new(ChatGemini::from_env()?);
            (gemini.clone(), gemini)
        } else {
            eprintln!("GEMINI_API_KEY not set, running with mock vision and commentary");
            let llm = MockLlm::scripted(vec![
                LlmResponse {
                    content: "Echoes of a hundred golden-hour gatherings.".to_string(),
                    tool_calls: vec![],
                },
                LlmResponse {
                    content: "Warm, a little chaotic, entirely welcome.\nScore: 88".to_string(),
                    tool_calls: vec![],
                },
                LlmResponse {
                    content: "the vibe pays for itself".to_string(),
                    tool_calls: vec![],
                },
            ]);
            (
                Arc::new(MockVision::fixed(
                    "A sun-lit crowd mid-toast on the venue steps.",
                )),
                Arc::new(llm),
            )
        };

    let wallet = Arc::new(MockEvmWallet::new().with_latency(Duration::from_millis(400)));
    let compiled = argue_graph(vision, llm, wallet, SettlementConfig::from_env())
        .with_observer(Arc::new(StageLogger))
        .compile()?;

    let final_state = compiled
        .invoke(LociState::new(image, wallet_addr))
        .await?;
    println!("final: {}", final_state.payout);
    Ok(())
}
