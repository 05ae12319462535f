//! Denormalized candidate profiles shown on the dashboard and candidate
//! screens.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Candidate, CandidateDraft, CandidateFormError, CandidateStage, CandidateUpdate};
pub use repository::CandidateRepository;
pub use router::candidate_router;
pub use service::{CandidateError, CandidateService};
