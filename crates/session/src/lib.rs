//! Editing-session controller for a note-taking surface.
//!
//! Mediates between an in-memory edit buffer (frontmatter + body) and a
//! remote validation/persistence host. The center of the crate is the
//! race-safe debounced validation pipeline: every issued check captures a
//! monotonic sequence number, and only the most recently issued check may
//! write its result back (last-issued-wins). Arbitrarily delayed,
//! out-of-order, or failed host responses can therefore never corrupt
//! session state.
//!
//! The controller exposes a fixed set of entry points ([`SessionController`])
//! and read-only state snapshots; it has no dependency on any rendering
//! technology or transport.

/// In-memory edit state for the loaded document.
pub mod buffer;
mod clock;
/// Session orchestration: entry points, debounce, and host calls.
pub mod controller;
/// Session-level error taxonomy.
pub mod error;
/// Pure save/promote gate evaluation.
pub mod gate;
/// Host capability trait consumed by the controller.
pub mod host;
/// Validation state and outcome normalization.
pub mod validation;

pub use buffer::EditBuffer;
pub use controller::{PromoteOutcome, SaveOutcome, SessionCfg, SessionController};
pub use error::SessionError;
pub use gate::{GateDecision, evaluate_gates};
pub use host::{NoteHost, SaveRequest, SavedItem};
pub use validation::{ValidationOutcome, ValidationState, ValidationStatus};
