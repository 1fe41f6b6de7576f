use a2ui_kit::agent::ModelConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A2UI agent - turns model replies into renderable UI surfaces
#[derive(Parser, Debug)]
#[command(name = "a2ui-agent", version)]
pub struct Args {
    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "A2UI_API_URL", default_value = "https://api.openai.com/v1", global = true)]
    pub api_url: String,

    /// API key (or set A2UI_API_KEY env var)
    #[arg(long, env = "A2UI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, env = "A2UI_MODEL", default_value = "gpt-4o-mini", global = true)]
    pub model: String,

    /// How many templates to offer the model
    #[arg(long, default_value_t = 3, global = true)]
    pub top_k: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interpret a saved model reply (from FILE, or stdin)
    Render {
        file: Option<PathBuf>,
    },

    /// Send one query through the agent
    Chat {
        query: String,

        /// Session id (defaults to a fresh one)
        #[arg(long)]
        session: Option<String>,
    },
}

impl Args {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone().unwrap_or_default(),
            model: self.model.clone(),
        }
    }
}
