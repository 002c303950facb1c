//! Weather agent: the model calls `smart_weather` before answering.
//!
//! One tool round: the LLM asks for the weather in a city, the tool
//! geocodes it and fetches the current forecast plus an outfit
//! suggestion, and the model phrases the final answer.
//!
//! ## Prerequisites
//!
//! Create a `.env` file in the workspace root with:
//!
//! ```bash
//! OPENAI_API_KEY=...   # omit to run a scripted offline round for Oslo
//! ```
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p loci --example weather -- "What should I wear in Oslo today?"
//! cargo run -p loci --example weather     # REPL; exit/quit/q to leave
//! ```

use std::io::Write;
use std::sync::Arc;

use loci::{AsyncAgent, ChatOpenAi, LlmClient, MockLlm, ToolCallAgent, ToolRegistry, WeatherTool};

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant with access to tools. Use tools when needed and answer clearly.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env (OPENAI_API_KEY) before creating the client
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(WeatherTool::new()));
    let registry = Arc::new(registry);

    let llm: Arc<dyn LlmClient> = match ChatOpenAi::from_env() {
        Ok(client) => Arc::new(client.with_tools(registry.specs())),
        Err(_) => {
            eprintln!("OPENAI_API_KEY not set, scripting one smart_weather round for Oslo");
            Arc::new(MockLlm::tool_call_then_answer(
                "smart_weather",
                r#"{"city":"Oslo"}"#,
                "See the tool output above for Oslo's weather and what to wear.",
            ))
        }
    };
    let agent = ToolCallAgent::new(llm, registry, SYSTEM_PROMPT);

    if let Some(query) = std::env::args().nth(1) {
        println!("{}", agent.run(query).await?);
        return Ok(());
    }

    // No query: interactive loop.
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() || matches!(query.to_lowercase().as_str(), "exit" | "quit" | "q") {
            break;
        }
        match agent.run(query.to_string()).await {
            Ok(answer) => println!("{answer}"),
            Err(e) => eprintln!("agent error: {e}"),
        }
    }
    Ok(())
}
