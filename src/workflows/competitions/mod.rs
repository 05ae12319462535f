//! Timed challenges: participant registration, submissions, and rubric
//! review.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

pub use domain::{
    Competition, CompetitionDraft, CompetitionFormError, CompetitionStatus, ReviewVerdict,
    Submission, SubmissionDraft, SubmissionReview, SubmissionStatus,
};
pub use repository::CompetitionRepository;
pub use router::competition_router;
pub use scoring::{RubricScore, RUBRIC_DIMENSION_MAX, RUBRIC_TOTAL_MAX};
pub use service::{CompetitionError, CompetitionService};
