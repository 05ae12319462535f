//! Application intake and the status lifecycle, including the decision
//! counters kept on the owning internship.

pub mod domain;
pub mod lifecycle;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationDraft, ApplicationQuery, ApplicationStatus};
pub use lifecycle::{plan_transition, CounterAdjustment, DecisionCounter, InvalidTransition, TransitionPlan};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationError, ApplicationService};
