use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::DocumentId;
use crate::workflows::applications::{Application, ApplicationStatus};
use crate::workflows::candidates::Candidate;

use super::stats::{BoardSummary, DashboardStats, InternshipLoad};

/// One row of the recent-activity feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub application_id: DocumentId,
    pub title: String,
    pub candidate: String,
    pub status: ApplicationStatus,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub(crate) fn from_application(application: &Application) -> Self {
        let posting = application
            .internship_title
            .as_deref()
            .unwrap_or("Internship");
        Self {
            application_id: application.id.clone(),
            title: format!("New application for {posting}"),
            candidate: application.applicant_name.clone(),
            status: application.status,
            timestamp: application.applied_at,
        }
    }
}

/// Everything the dashboard screen renders in one payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub board: BoardSummary,
    pub loads: Vec<InternshipLoad>,
    pub recent_activity: Vec<ActivityEntry>,
    pub top_candidates: Vec<Candidate>,
}

impl DashboardSnapshot {
    /// Analytics export: the headline metrics as two-column CSV.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["metric", "value"])?;
        writer.write_record([
            "activeInternships",
            &self.stats.active_internships.to_string(),
        ])?;
        writer.write_record([
            "totalApplications",
            &self.stats.total_applications.to_string(),
        ])?;
        writer.write_record(["interviewStage", &self.stats.interview_stage.to_string()])?;
        writer.write_record(["acceptanceRate", &self.stats.acceptance_rate])?;
        for load in &self.loads {
            writer.write_record([
                &format!("applications:{}", load.title),
                &load.applications.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::dashboard::stats::{BoardSummary, DashboardStats};

    #[test]
    fn csv_export_lists_the_headline_metrics() {
        let snapshot = DashboardSnapshot {
            stats: DashboardStats {
                active_internships: 2,
                total_applications: 5,
                interview_stage: 1,
                acceptance_rate: "40%".into(),
            },
            board: BoardSummary {
                active: 2,
                total_applications: 5,
                average_applications: 3,
            },
            loads: vec![InternshipLoad {
                internship_id: DocumentId("int-1".into()),
                title: "Frontend Internship".into(),
                applications: 5,
            }],
            recent_activity: Vec::new(),
            top_candidates: Vec::new(),
        };

        let csv = snapshot.to_csv().expect("export succeeds");
        assert!(csv.starts_with("metric,value\n"));
        assert!(csv.contains("acceptanceRate,40%"));
        assert!(csv.contains("applications:Frontend Internship,5"));
    }
}
