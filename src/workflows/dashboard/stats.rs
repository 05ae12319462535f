use serde::Serialize;

use crate::store::DocumentId;
use crate::workflows::applications::{Application, ApplicationStatus};
use crate::workflows::internships::Internship;

/// The four headline numbers on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_internships: usize,
    pub total_applications: usize,
    pub interview_stage: usize,
    /// Accepted over total, rounded, rendered as a percent string. `"0%"`
    /// when there are no applications at all.
    pub acceptance_rate: String,
}

pub fn dashboard_stats(internships: &[Internship], applications: &[Application]) -> DashboardStats {
    let active_internships = internships
        .iter()
        .filter(|internship| internship.status.is_active())
        .count();

    let total_applications = applications.len();
    let interview_stage = applications
        .iter()
        .filter(|application| application.status == ApplicationStatus::Interview)
        .count();
    let accepted = applications
        .iter()
        .filter(|application| application.status == ApplicationStatus::Accepted)
        .count();

    let acceptance_rate = if total_applications == 0 {
        0
    } else {
        (accepted as f64 / total_applications as f64 * 100.0).round() as u64
    };

    DashboardStats {
        active_internships,
        total_applications,
        interview_stage,
        acceptance_rate: format!("{acceptance_rate}%"),
    }
}

/// Application volume per posting, derived by counting the application
/// records rather than trusting the stored counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipLoad {
    pub internship_id: DocumentId,
    pub title: String,
    pub applications: usize,
}

pub fn internship_loads(
    internships: &[Internship],
    applications: &[Application],
) -> Vec<InternshipLoad> {
    internships
        .iter()
        .map(|internship| InternshipLoad {
            internship_id: internship.id.clone(),
            title: internship.title.clone(),
            applications: applications
                .iter()
                .filter(|application| application.internship_id == internship.id)
                .count(),
        })
        .collect()
}

/// Headline numbers for the internships management page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub active: usize,
    pub total_applications: u64,
    pub average_applications: u64,
}

pub fn board_summary(internships: &[Internship]) -> BoardSummary {
    let total_applications: u64 = internships
        .iter()
        .map(|internship| internship.applications as u64)
        .sum();
    let average_applications = if internships.is_empty() {
        0
    } else {
        (total_applications as f64 / internships.len() as f64).round() as u64
    };

    BoardSummary {
        active: internships
            .iter()
            .filter(|internship| internship.status.is_active())
            .count(),
        total_applications,
        average_applications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::internships::{InternshipStatus, WorkArrangement};
    use chrono::Utc;

    fn internship(id: &str, status: InternshipStatus, applications: u32) -> Internship {
        Internship {
            id: DocumentId(id.into()),
            title: format!("Posting {id}"),
            company: "Acme".into(),
            location: None,
            arrangement: WorkArrangement::Remote,
            duration: None,
            stipend: None,
            description: "desc".into(),
            requirements: None,
            responsibilities: None,
            application_deadline: None,
            positions: 1,
            skills: Vec::new(),
            status,
            posted_by: "user-1".into(),
            company_id: "user-1".into(),
            applications,
            accepted_count: 0,
            rejected_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn application(id: &str, internship: &str, status: ApplicationStatus) -> Application {
        Application {
            id: DocumentId(id.into()),
            internship_id: DocumentId(internship.into()),
            company_id: "user-1".into(),
            applicant_name: format!("Applicant {id}"),
            applicant_email: format!("{id}@example.com"),
            internship_title: None,
            cover_letter: None,
            resume_link: None,
            expected_stipend: None,
            availability: None,
            status,
            applied_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_snapshot_produces_zeroes() {
        let stats = dashboard_stats(&[], &[]);
        assert_eq!(
            stats,
            DashboardStats {
                active_internships: 0,
                total_applications: 0,
                interview_stage: 0,
                acceptance_rate: "0%".into(),
            }
        );
    }

    #[test]
    fn acceptance_rate_rounds_to_a_percent_string() {
        let mut applications: Vec<Application> = (0..3)
            .map(|i| application(&format!("a{i}"), "int-1", ApplicationStatus::Accepted))
            .collect();
        applications.extend(
            (3..10).map(|i| application(&format!("a{i}"), "int-1", ApplicationStatus::Pending)),
        );

        let stats = dashboard_stats(&[], &applications);
        assert_eq!(stats.acceptance_rate, "30%");
        assert_eq!(stats.total_applications, 10);
    }

    #[test]
    fn only_open_and_in_progress_postings_count_as_active() {
        let internships = vec![
            internship("int-1", InternshipStatus::Open, 0),
            internship("int-2", InternshipStatus::InProgress, 0),
            internship("int-3", InternshipStatus::Closed, 0),
            internship("int-4", InternshipStatus::Draft, 0),
        ];
        let stats = dashboard_stats(&internships, &[]);
        assert_eq!(stats.active_internships, 2);
    }

    #[test]
    fn mixed_decisions_report_the_documented_scenario() {
        // One posting, three applications: accepted, rejected, interview.
        let internships = vec![internship("int-1", InternshipStatus::Open, 3)];
        let applications = vec![
            application("a1", "int-1", ApplicationStatus::Accepted),
            application("a2", "int-1", ApplicationStatus::Rejected),
            application("a3", "int-1", ApplicationStatus::Interview),
        ];

        let stats = dashboard_stats(&internships, &applications);
        assert_eq!(stats.total_applications, 3);
        assert_eq!(stats.interview_stage, 1);
        assert_eq!(stats.acceptance_rate, "33%");
    }

    #[test]
    fn loads_count_applications_per_posting() {
        let internships = vec![
            internship("int-1", InternshipStatus::Open, 2),
            internship("int-2", InternshipStatus::Open, 0),
        ];
        let applications = vec![
            application("a1", "int-1", ApplicationStatus::Pending),
            application("a2", "int-1", ApplicationStatus::Accepted),
        ];

        let loads = internship_loads(&internships, &applications);
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].applications, 2);
        assert_eq!(loads[1].applications, 0);
    }

    #[test]
    fn board_summary_averages_the_stored_counters() {
        let internships = vec![
            internship("int-1", InternshipStatus::Open, 45),
            internship("int-2", InternshipStatus::Closed, 38),
            internship("int-3", InternshipStatus::Open, 27),
        ];

        let summary = board_summary(&internships);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.total_applications, 110);
        assert_eq!(summary.average_applications, 37);

        assert_eq!(board_summary(&[]).average_applications, 0);
    }
}
