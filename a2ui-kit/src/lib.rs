//! # Description
//!
//! A2UI Kit is a Rust crate that interprets the A2UI (Agent-to-UI) protocol:
//! it pulls protocol messages out of language-model replies, keeps surfaces
//! and their data models up to date, and projects them into render trees
//! that any UI toolkit can draw.
//!
//! # Features
//!
//! - Tolerant ingestion of model output, with one narrow wrapper repair.
//! - Surface registry with per-message validation and diagnostics.
//! - Data binding with template expansion over data-model mappings.
//! - Cycle-safe projection into a renderer-agnostic tree.
//! - Built-in OpenAI-compatible client and a small chat agent.

pub mod a2ui;
pub mod agent;
