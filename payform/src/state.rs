//! Widget lifecycle states.

use crate::error::WidgetError;

/// The lifecycle of a single widget submission.
///
/// Transitions are strictly linear: `Idle` → `Loading` on submit, `Loading`
/// → `Success` or `Error` when the gateway call resolves, and any terminal
/// state → `Idle` on reset. A flow never re-enters `Loading` without passing
/// through `Idle` first; overlapping submissions are rejected by the flows
/// rather than modeled here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WidgetState<T> {
    /// Waiting for input; the only state a submission may start from.
    #[default]
    Idle,
    /// A gateway call is in flight.
    Loading,
    /// The gateway call succeeded, yielding the widget's result value.
    Success(T),
    /// The gateway call failed with a mapped, displayable error.
    Error(WidgetError),
}

impl<T> WidgetState<T> {
    /// Whether a new submission may start.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a gateway call is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The success value, if the last submission succeeded.
    #[must_use]
    pub const fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The error, if the last submission failed.
    #[must_use]
    pub const fn error(&self) -> Option<&WidgetError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}
