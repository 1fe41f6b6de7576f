//! One conversational turn: rank, select, generate, ingest, apply, project.

use serde::Serialize;
use std::sync::Arc;

use crate::a2ui::{
    Diagnostic, RenderTree, SurfaceNotRenderable, SurfaceRegistry, UserAction, ingest,
};

use super::{
    fallback::fallback_reply,
    model::{ModelClient, ModelError},
    prompt::{generator_instructions, selector_instructions},
    ranker::TemplateRanker,
    selector::{Decision, parse_decision},
    session::{SessionStore, lock},
};

/// A projected surface ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSurface {
    pub surface_id: String,
    pub tree: RenderTree,
}

/// What the user gets back for one turn.
#[derive(Debug, Clone, Default)]
pub struct AgentReply {
    /// Conversational text, or the raw payload when it did not parse
    pub text: String,

    /// Rendered surfaces this turn changed, in first-seen order
    pub surfaces: Vec<RenderedSurface>,

    /// Non-fatal conditions from applying and projecting
    pub diagnostics: Vec<Diagnostic>,

    /// Surfaces that could not be projected at all
    pub render_errors: Vec<SurfaceNotRenderable>,

    /// Wrapper repairs applied during ingestion
    pub repairs: usize,
}

/// Turn a model reply into an [`AgentReply`] against a registry.
///
/// A payload that does not parse yields a text-only reply carrying the
/// conversational text and the raw payload.
pub fn interpret_reply(registry: &mut SurfaceRegistry, blob: &str) -> AgentReply {
    let ingested = match ingest(blob) {
        Ok(ingested) => ingested,
        Err(failure) => {
            ::log::warn!("[A2UI agent] Falling back to text: {}", failure);
            return AgentReply {
                text: failure.fallback_text(),
                ..Default::default()
            };
        }
    };

    let report = registry.apply_batch(&ingested.messages);
    let mut reply = AgentReply {
        text: ingested.text,
        diagnostics: report.diagnostics.clone(),
        repairs: ingested.repairs,
        ..Default::default()
    };

    for surface_id in registry.surfaces_to_project(&report) {
        match registry.project(&surface_id) {
            Ok(projection) => {
                reply.diagnostics.extend(projection.diagnostics);
                reply.surfaces.push(RenderedSurface {
                    surface_id,
                    tree: projection.tree,
                });
            }
            Err(err) => {
                ::log::warn!("[A2UI agent] {}", err);
                reply.render_errors.push(err);
            }
        }
    }

    reply
}

/// Drives turns for many independent sessions.
pub struct ChatAgent {
    model: Arc<dyn ModelClient>,
    ranker: Arc<dyn TemplateRanker>,
    sessions: SessionStore,
}

impl ChatAgent {
    pub fn new(model: Arc<dyn ModelClient>, ranker: Arc<dyn TemplateRanker>) -> Self {
        ChatAgent {
            model,
            ranker,
            sessions: SessionStore::new(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Ask the model to choose between plain text and one of `candidates`.
    pub async fn select_template(
        &self,
        query: &str,
        candidates: &[String],
    ) -> Result<Decision, ModelError> {
        let instructions = selector_instructions(candidates);
        let reply = self.model.complete(&instructions, query).await?;

        let decision = parse_decision(&reply);
        ::log::info!("[A2UI agent] Selector decision: {:?}", decision);
        Ok(decision)
    }

    async fn generate(&self, query: &str, candidates: &[String]) -> Result<String, ModelError> {
        let decision = self.select_template(query, candidates).await?;
        let instructions = generator_instructions(decision.template_id());
        self.model.complete(&instructions, query).await
    }

    /// Run one turn for a user query.
    ///
    /// Never fails: ranking failures fall back to no candidates and a failed
    /// selector or generator call to a fixed apology surface.
    pub async fn handle_turn(&self, session_id: &str, query: &str) -> AgentReply {
        ::log::info!("[A2UI agent] Processing query for session {}: {}", session_id, query);

        let candidates = match self.ranker.rank(query) {
            Ok(candidates) => candidates,
            Err(err) => {
                ::log::error!("[A2UI agent] {}", err);
                vec![]
            }
        };

        let blob = match self.generate(query, &candidates).await {
            Ok(blob) => blob,
            Err(err) => {
                ::log::error!("[A2UI agent] Model call failed: {}", err);
                fallback_reply()
            }
        };

        let registry = self.sessions.registry(session_id);
        let mut registry = lock(&registry);
        interpret_reply(&mut registry, &blob)
    }

    /// Run a turn for an action fired by a rendered component.
    pub async fn handle_action(&self, session_id: &str, action: &UserAction) -> AgentReply {
        self.handle_turn(session_id, &action.to_query()).await
    }
}
