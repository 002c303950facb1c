//! Stage logger: demo-facing observer for the argue pipeline.
//!
//! Prints each stage's principal output as it completes. This is the
//! demo's user-facing narration, not diagnostics, so it goes to stdout
//! rather than through `tracing`.

use crate::graph::NodeObserver;

use super::state::LociState;

/// Prints one line per completed stage, branching on the approval flag
/// the treasurer wrote into the state.
#[derive(Debug, Default)]
pub struct StageLogger;

impl NodeObserver<LociState> for StageLogger {
    fn on_node_complete(&self, node_id: &str, output: &str, state: &LociState) {
        match node_id {
            "vision" => println!("👁️ VISION: {output}"),
            "historian" => println!("👻 HISTORIAN: {output}"),
            "vibe" => println!("🎭 VIBE: {output}"),
            "treasurer" => {
                println!("💸 TREASURER: {output}");
                if state.payout_approved {
                    println!("💸 TREASURER: Payment approved. Sending funds...");
                } else {
                    println!("💸 TREASURER: Payment denied.");
                }
            }
            "payout" => {
                let status = if state.payout_approved {
                    "PAYMENT RECEIVED"
                } else {
                    "PAYMENT NOT SENT"
                };
                println!("🔗 PAYOUT: {status} · {output}");
            }
            _ => {}
        }
    }
}
