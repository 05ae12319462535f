//! Internship postings: the positions candidates apply against.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Internship, InternshipDraft, InternshipFormError, InternshipStatus, InternshipUpdate,
    WorkArrangement,
};
pub use repository::InternshipRepository;
pub use router::internship_router;
pub use service::{InternshipError, InternshipService};
