//! Messages exchanged with the reactive controller.

use serde::Serialize;

/// A change of the category selector. `None` models a cleared selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEvent {
    pub value: Option<String>,
}

impl SelectionEvent {
    pub fn selected(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn cleared() -> Self {
        Self { value: None }
    }

    /// The selected value, unless it is absent or blank.
    pub fn effective_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

impl From<Option<String>> for SelectionEvent {
    fn from(value: Option<String>) -> Self {
        Self { value }
    }
}

/// Controller state. A cycle always returns to `Idle`, successful or not.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControllerState {
    #[default]
    Idle,
    Recomputing,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Recomputing => write!(f, "recomputing"),
        }
    }
}

/// Outcome tally of [`ReactiveController::run`](super::controller::ReactiveController::run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub handled: usize,
    pub emitted: usize,
    pub suppressed: usize,
    pub failed: usize,
}
