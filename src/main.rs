mod config;

use a2ui_kit::a2ui::SurfaceRegistry;
use a2ui_kit::agent::{AgentReply, ChatAgent, KeywordRanker, OpenAiCompatClient, interpret_reply};
use anyhow::Context;
use clap::Parser;
use config::{Args, Command};
use serde_json::json;
use std::io::Read;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let reply = match &args.command {
        Command::Render { file } => {
            let blob = match file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut blob = String::new();
                    std::io::stdin()
                        .read_to_string(&mut blob)
                        .context("failed to read model reply from stdin")?;
                    blob
                }
            };

            let mut registry = SurfaceRegistry::new();
            interpret_reply(&mut registry, &blob)
        }
        Command::Chat { query, session } => {
            let client = OpenAiCompatClient::new(args.model_config())
                .context("invalid model configuration")?;
            let agent = ChatAgent::new(Arc::new(client), Arc::new(KeywordRanker::new(args.top_k)));

            let session_id = session
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            log::info!("Using session {}", session_id);

            agent.handle_turn(&session_id, query).await
        }
    };

    let output = serde_json::to_string_pretty(&reply_json(&reply))
        .context("failed to serialize reply")?;
    println!("{}", output);

    Ok(())
}

fn reply_json(reply: &AgentReply) -> serde_json::Value {
    json!({
        "text": reply.text,
        "surfaces": reply.surfaces,
        "diagnostics": reply.diagnostics,
        "renderErrors": reply
            .render_errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>(),
    })
}
