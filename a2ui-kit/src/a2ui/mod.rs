//! A2UI Protocol Interpreter
//!
//! A2UI (Agent-to-UI) is a declarative JSON protocol for AI agents to generate
//! rich, interactive UIs. This module interprets it without drawing anything:
//! messages go in, renderer-agnostic render trees come out.
//!
//! # Architecture
//!
//! ```text
//! Model reply text
//!        ↓
//!     ingest()
//!        ↓
//!  raw JSON messages
//!        ↓
//!  SurfaceRegistry ──── Surface { components, DataModel }
//!        ↓
//!    project()  ←── resolver
//!        ↓
//!    RenderTree
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use a2ui_kit::a2ui::*;
//!
//! let ingested = ingest(reply)?;
//! let mut registry = SurfaceRegistry::new();
//! let report = registry.apply_batch(&ingested.messages);
//! for surface_id in registry.surfaces_to_project(&report) {
//!     let projection = registry.project(&surface_id)?;
//! }
//! ```

mod catalog;
mod data_model;
mod diagnostic;
mod ingest;
mod message;
mod projector;
mod render;
mod resolver;
mod surface;
mod value;

pub use catalog::*;
pub use data_model::*;
pub use diagnostic::*;
pub use ingest::*;
pub use message::*;
pub use projector::*;
pub use render::*;
pub use resolver::*;
pub use surface::*;
pub use value::*;
