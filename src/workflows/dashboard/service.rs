use std::sync::Arc;

use crate::store::{DocumentStore, RepositoryError};
use crate::workflows::applications::ApplicationRepository;
use crate::workflows::candidates::CandidateRepository;
use crate::workflows::internships::InternshipRepository;

use super::stats::{board_summary, dashboard_stats, internship_loads};
use super::views::{ActivityEntry, DashboardSnapshot};

const FEED_LIMIT: usize = 5;

/// Assembles the dashboard payload from one read of each collection.
pub struct DashboardService<S> {
    internships: InternshipRepository<S>,
    applications: ApplicationRepository<S>,
    candidates: CandidateRepository<S>,
}

impl<S: DocumentStore> DashboardService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            internships: InternshipRepository::new(store.clone()),
            applications: ApplicationRepository::new(store.clone()),
            candidates: CandidateRepository::new(store),
        }
    }

    pub fn snapshot(&self, company_id: &str) -> Result<DashboardSnapshot, DashboardError> {
        let internships = self.internships.for_company(company_id)?;
        let applications = self.applications.for_company(company_id, None, None)?;

        let mut candidates = self.candidates.for_company(company_id)?;
        candidates.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        candidates.truncate(FEED_LIMIT);

        let recent_activity = applications
            .iter()
            .take(FEED_LIMIT)
            .map(ActivityEntry::from_application)
            .collect();

        Ok(DashboardSnapshot {
            stats: dashboard_stats(&internships, &applications),
            board: board_summary(&internships),
            loads: internship_loads(&internships, &applications),
            recent_activity,
            top_candidates: candidates,
        })
    }
}

/// Errors raised while assembling a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),
}
