use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::store::{Collection, DocumentId, DocumentStore, DocumentWrite, RepositoryError};
use crate::workflows::internships::{Internship, InternshipRepository};

use super::domain::{
    Application, ApplicationDraft, ApplicationFormError, ApplicationQuery, ApplicationStatus,
};
use super::lifecycle::{plan_transition, DecisionCounter, InvalidTransition};
use super::repository::ApplicationRepository;

/// Service composing intake validation, the transition rules, and the
/// repository writes they require.
pub struct ApplicationService<S> {
    applications: ApplicationRepository<S>,
    internships: InternshipRepository<S>,
}

impl<S: DocumentStore> ApplicationService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            applications: ApplicationRepository::new(store.clone()),
            internships: InternshipRepository::new(store),
        }
    }

    /// Submit a new application against an open posting. The owning
    /// internship's running `applications` total moves with it; this path is
    /// the counter's only writer.
    pub fn submit(&self, draft: &ApplicationDraft) -> Result<Application, ApplicationError> {
        draft.validate()?;

        let internship = self.internships.fetch(&draft.internship_id)?;
        let today = Utc::now().date_naive();
        if !internship.accepts_applications(today) {
            return Err(ApplicationError::NotAccepting {
                internship: internship.id.0.clone(),
            });
        }

        let application =
            self.applications
                .insert(draft, &internship.company_id, &internship.title)?;

        let mut counter = Map::new();
        counter.insert(
            "applications".to_string(),
            Value::from(internship.applications + 1),
        );
        self.internships
            .update_fields(&internship.id, counter)?;

        tracing::info!(
            application = %application.id,
            internship = %internship.id,
            "application received"
        );
        Ok(application)
    }

    pub fn get(&self, id: &DocumentId) -> Result<Application, ApplicationError> {
        Ok(self.applications.fetch(id)?)
    }

    /// Move an application along the status graph. Validation happens before
    /// any write; the status change and the decision-counter adjustment are
    /// applied as one atomic batch.
    pub fn transition(
        &self,
        id: &DocumentId,
        requested: ApplicationStatus,
    ) -> Result<Application, ApplicationError> {
        let application = self.applications.fetch(id)?;
        let plan = plan_transition(application.status, requested)?;

        let mut writes = vec![ApplicationRepository::<S>::status_write(id, plan.next)];

        if let Some(adjustment) = plan.counter {
            // The posting may have been deleted since the application came
            // in; orphans keep their status history without counters.
            match self.internships.fetch(&application.internship_id) {
                Ok(internship) => {
                    let mut fields = Map::new();
                    let incremented = counter_value(&internship, adjustment.increment) + 1;
                    fields.insert(
                        adjustment.increment.field().to_string(),
                        Value::from(incremented),
                    );
                    if let Some(decrement) = adjustment.decrement {
                        let decremented = counter_value(&internship, decrement).saturating_sub(1);
                        fields.insert(decrement.field().to_string(), Value::from(decremented));
                    }
                    writes.push(DocumentWrite {
                        collection: Collection::Internships,
                        id: internship.id.clone(),
                        fields,
                    });
                }
                Err(error) if error.is_not_found() => {
                    tracing::warn!(
                        application = %id,
                        internship = %application.internship_id,
                        "transition on orphaned application; counters skipped"
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        self.applications.apply(writes)?;
        let updated = self.applications.fetch(id)?;
        tracing::info!(
            application = %id,
            from = %application.status,
            to = %updated.status,
            "application status moved"
        );
        Ok(updated)
    }

    /// The candidates screen: company-scoped listing with store-side status
    /// and posting filters plus in-memory search.
    pub fn for_company(
        &self,
        company_id: &str,
        query: &ApplicationQuery,
    ) -> Result<Vec<Application>, ApplicationError> {
        let applications = self.applications.for_company(
            company_id,
            query.status,
            query.internship_id.as_ref(),
        )?;
        Ok(applications
            .into_iter()
            .filter(|application| query.matches(application))
            .collect())
    }
}

fn counter_value(internship: &Internship, counter: DecisionCounter) -> u32 {
    match counter {
        DecisionCounter::Accepted => internship.accepted_count,
        DecisionCounter::Rejected => internship.rejected_count,
    }
}

/// Errors raised by application intake and lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Form(#[from] ApplicationFormError),
    #[error("internship {internship} is not accepting applications")]
    NotAccepting { internship: String },
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
