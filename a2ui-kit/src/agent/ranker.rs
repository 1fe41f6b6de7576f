//! Template ranking: picks which UI templates the model should consider.

use std::collections::HashSet;
use thiserror::Error;

use super::templates::{SIMPLE_MESSAGE, TEMPLATES, TemplateInfo};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("ranking query is empty")]
    EmptyQuery,

    #[error("template ranking failed: {0}")]
    Backend(String),
}

/// The opaque ranking boundary: best match first.
pub trait TemplateRanker: Send + Sync {
    fn rank(&self, query: &str) -> Result<Vec<String>, RankError>;
}

/// Deterministic ranker scoring token overlap with each template's
/// description and keywords.
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    templates: Vec<TemplateInfo>,
    top_k: usize,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(3)
    }
}

impl KeywordRanker {
    pub fn new(top_k: usize) -> Self {
        Self::with_templates(TEMPLATES.to_vec(), top_k)
    }

    pub fn with_templates(templates: Vec<TemplateInfo>, top_k: usize) -> Self {
        KeywordRanker { templates, top_k }
    }

    fn score(template: &TemplateInfo, query_tokens: &HashSet<String>) -> usize {
        let description: HashSet<String> = tokenize(template.description).collect();
        let description_hits = query_tokens.intersection(&description).count();
        let keyword_hits = template
            .keywords
            .iter()
            .filter(|keyword| query_tokens.contains(**keyword))
            .count();
        // Keywords are curated, so they count double.
        description_hits + 2 * keyword_hits
    }
}

impl TemplateRanker for KeywordRanker {
    fn rank(&self, query: &str) -> Result<Vec<String>, RankError> {
        let query_tokens: HashSet<String> = tokenize(query).collect();
        if query_tokens.is_empty() {
            return Err(RankError::EmptyQuery);
        }

        let mut scored: Vec<(usize, &TemplateInfo)> = self
            .templates
            .iter()
            .filter(|template| template.id != SIMPLE_MESSAGE)
            .map(|template| (Self::score(template, &query_tokens), template))
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort keeps catalog order on ties.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut ranked: Vec<String> = scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, template)| template.id.to_string())
            .collect();
        ranked.push(SIMPLE_MESSAGE.to_string());

        ::log::info!("[A2UI agent] Ranked templates for '{}': {:?}", query, ranked);
        Ok(ranked)
    }
}

const STOP_WORDS: &[&str] = &["the", "and", "for", "use", "this", "when", "you", "with"];

/// Lowercase alphanumeric words of three or more characters.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= 3)
        .map(|word| word.to_lowercase())
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
}
