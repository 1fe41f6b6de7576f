//! Agent glue around the A2UI interpreter.
//!
//! The model call and template ranking are collaborators behind traits;
//! [`ChatAgent`] wires them to a per-session [`SurfaceRegistry`](crate::a2ui::SurfaceRegistry).

mod chat;
mod fallback;
mod model;
mod prompt;
mod ranker;
mod selector;
mod session;
mod templates;

pub use chat::*;
pub use fallback::*;
pub use model::*;
pub use prompt::*;
pub use ranker::*;
pub use selector::*;
pub use session::{SessionStore, SharedRegistry};
pub use templates::*;
