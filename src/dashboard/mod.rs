//! Category-scoped dashboard views.
//!
//! ```text
//! SelectionEvent ──> ReactiveController
//!                      │
//!                      ├─> logic::filter_by_category   (validates the selection)
//!                      ├─> logic::compute_all          (five projections)
//!                      ├─> logic::emit_views           (six payloads)
//!                      └─> subscribers                 (all six, or nothing)
//! ```

pub mod controller;
pub mod events;
pub mod logic;
pub mod stream;

pub use controller::ReactiveController;
pub use events::{ControllerState, RunStats, SelectionEvent};
pub use stream::serve_lines;
