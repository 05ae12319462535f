//! Pure transition rules for application statuses.
//!
//! The permitted moves form a small directed graph rooted at `pending`:
//!
//! ```text
//! pending ──> interview
//! pending ──> accepted
//! pending ──> rejected ──> accepted   (reconsider)
//! ```
//!
//! `accepted` is terminal. Everything else, self-moves included, is an
//! [`InvalidTransition`] and must be rejected before any write happens.

use super::domain::ApplicationStatus;

/// Attempted move outside the permitted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("application status may not move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

/// The decision counters kept on the owning internship document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionCounter {
    Accepted,
    Rejected,
}

impl DecisionCounter {
    pub const fn field(self) -> &'static str {
        match self {
            DecisionCounter::Accepted => "acceptedCount",
            DecisionCounter::Rejected => "rejectedCount",
        }
    }
}

/// Counter side effect of a permitted transition. Counters describe the
/// current decision split, so a reconsidered rejection moves one count from
/// the rejected column to the accepted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAdjustment {
    pub increment: DecisionCounter,
    pub decrement: Option<DecisionCounter>,
}

/// A validated transition: the status to store and the counter adjustment,
/// if any, that must land in the same write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub next: ApplicationStatus,
    pub counter: Option<CounterAdjustment>,
}

pub const fn is_permitted(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    use ApplicationStatus::*;
    matches!(
        (from, to),
        (Pending, Interview) | (Pending, Accepted) | (Pending, Rejected) | (Rejected, Accepted)
    )
}

/// Validate a requested move and describe its side effects. No state is
/// touched here; callers apply the plan atomically or not at all.
pub fn plan_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<TransitionPlan, InvalidTransition> {
    if !is_permitted(from, to) {
        return Err(InvalidTransition { from, to });
    }

    let counter = match to {
        ApplicationStatus::Accepted => Some(CounterAdjustment {
            increment: DecisionCounter::Accepted,
            decrement: (from == ApplicationStatus::Rejected).then_some(DecisionCounter::Rejected),
        }),
        ApplicationStatus::Rejected => Some(CounterAdjustment {
            increment: DecisionCounter::Rejected,
            decrement: None,
        }),
        ApplicationStatus::Pending | ApplicationStatus::Interview => None,
    };

    Ok(TransitionPlan { next: to, counter })
}
