use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Args;

use talentdesk::error::AppError;
use talentdesk::store::MemoryStore;
use talentdesk::workflows::applications::{ApplicationDraft, ApplicationService, ApplicationStatus};
use talentdesk::workflows::candidates::{CandidateDraft, CandidateService, CandidateStage};
use talentdesk::workflows::competitions::{
    CompetitionDraft, CompetitionService, CompetitionStatus, ReviewVerdict, RubricScore,
    SubmissionDraft, SubmissionReview,
};
use talentdesk::workflows::dashboard::{DashboardService, DashboardSnapshot};
use talentdesk::workflows::internships::{InternshipDraft, InternshipService, InternshipStatus, WorkArrangement};

const DEMO_COMPANY: &str = "demo-recruiter";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the headline metrics as CSV instead of the full report
    #[arg(long)]
    pub(crate) csv: bool,
}

/// Seed an in-memory store with a small hiring pipeline and print the
/// resulting dashboard, exercising the same services the HTTP surface uses.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(MemoryStore::default());
    let internships = InternshipService::new(store.clone());
    let applications = ApplicationService::new(store.clone());
    let candidates = CandidateService::new(store.clone());
    let competitions = CompetitionService::new(store.clone());
    let dashboard = DashboardService::new(store);

    let posting = |title: &str, arrangement: WorkArrangement| InternshipDraft {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: Some("Remote".to_string()),
        arrangement,
        duration: Some("3 months".to_string()),
        stipend: Some("1200".to_string()),
        description: format!("{title} with the product team"),
        requirements: None,
        responsibilities: None,
        application_deadline: Some(Utc::now().date_naive() + Duration::days(30)),
        positions: 2,
        skills: vec!["Rust".to_string(), "SQL".to_string()],
        status: Some(InternshipStatus::Open),
    };

    let frontend = internships
        .create(DEMO_COMPANY, &posting("Frontend Developer Internship", WorkArrangement::Remote))
        .map_err(demo_error)?;
    let data = internships
        .create(DEMO_COMPANY, &posting("Data Science Internship", WorkArrangement::Hybrid))
        .map_err(demo_error)?;

    let applicants = [
        ("Alex Johnson", &frontend, Some(ApplicationStatus::Accepted)),
        ("Emily Rodriguez", &frontend, Some(ApplicationStatus::Interview)),
        ("Sarah Wilson", &data, Some(ApplicationStatus::Rejected)),
        ("David Lee", &data, None),
    ];
    for (name, internship, decision) in applicants {
        let application = applications
            .submit(&ApplicationDraft {
                internship_id: internship.id.clone(),
                applicant_name: name.to_string(),
                applicant_email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                cover_letter: None,
                resume_link: None,
                expected_stipend: Some(1200),
                availability: Some("Immediate".to_string()),
            })
            .map_err(demo_error)?;
        if let Some(status) = decision {
            applications
                .transition(&application.id, status)
                .map_err(demo_error)?;
        }
    }

    for (name, stage, rating) in [
        ("Emily Johnson", CandidateStage::Interview, 4.8_f32),
        ("Michael Brown", CandidateStage::Offer, 4.7),
        ("Sarah Wilson", CandidateStage::Review, 4.5),
    ] {
        candidates
            .add(
                DEMO_COMPANY,
                &CandidateDraft {
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                    position: Some("Frontend Developer".to_string()),
                    status: stage,
                    rating,
                },
            )
            .map_err(demo_error)?;
    }

    let competition = competitions
        .create(&CompetitionDraft {
            title: "UI/UX Design Challenge".to_string(),
            description: "Redesign the candidate pipeline screen".to_string(),
            start_date: Utc::now().date_naive(),
            end_date: Utc::now().date_naive() + Duration::days(14),
            skills_required: vec!["Figma".to_string()],
            max_participants: 25,
            evaluation_criteria: Some("Technical, design, innovation".to_string()),
            prize_details: Some("Fast-track interview".to_string()),
            status: Some(CompetitionStatus::Active),
        })
        .map_err(demo_error)?;
    competitions
        .register(&competition.id, "Alex Johnson")
        .map_err(demo_error)?;
    let with_submission = competitions
        .submit(
            &competition.id,
            &SubmissionDraft {
                candidate_name: "Alex Johnson".to_string(),
                title: "React Dashboard App".to_string(),
                description: Some("Responsive dashboard concept".to_string()),
                links: vec!["https://github.com/example/dashboard".to_string()],
            },
        )
        .map_err(demo_error)?;
    let reviewed = competitions
        .review(
            &competition.id,
            &with_submission.submissions[0].id,
            &SubmissionReview {
                verdict: ReviewVerdict::Approved,
                score: Some(RubricScore::new(9, 8, 7)),
                feedback: Some("Clean layout, strong interactions".to_string()),
            },
        )
        .map_err(demo_error)?;

    let snapshot = dashboard.snapshot(DEMO_COMPANY).map_err(demo_error)?;

    if args.csv {
        let csv = snapshot.to_csv().map_err(demo_error)?;
        print!("{csv}");
        return Ok(());
    }

    render_snapshot(&snapshot);
    println!("\nCompetition review");
    println!(
        "- {} by {}: {} ({}/30)",
        reviewed.title,
        reviewed.candidate_name,
        match reviewed.status {
            talentdesk::workflows::competitions::SubmissionStatus::Approved => "approved",
            talentdesk::workflows::competitions::SubmissionStatus::Rejected => "rejected",
            talentdesk::workflows::competitions::SubmissionStatus::Pending => "pending",
        },
        reviewed.score.map(|score| score.total()).unwrap_or(0)
    );

    Ok(())
}

fn render_snapshot(snapshot: &DashboardSnapshot) {
    println!("TalentDesk dashboard demo");

    println!("\nHeadline metrics");
    println!("- Active internships: {}", snapshot.stats.active_internships);
    println!("- Total applications: {}", snapshot.stats.total_applications);
    println!("- Interview stage: {}", snapshot.stats.interview_stage);
    println!("- Acceptance rate: {}", snapshot.stats.acceptance_rate);

    println!("\nApplications per posting");
    for load in &snapshot.loads {
        println!("- {}: {}", load.title, load.applications);
    }

    println!("\nRecent activity");
    for entry in &snapshot.recent_activity {
        println!("- {} ({}, {})", entry.title, entry.candidate, entry.status);
    }

    if snapshot.top_candidates.is_empty() {
        println!("\nTop candidates: none");
    } else {
        println!("\nTop candidates");
        for candidate in &snapshot.top_candidates {
            println!(
                "- {} | {} | {:.1}/5",
                candidate.name,
                candidate.position.as_deref().unwrap_or("-"),
                candidate.rating
            );
        }
    }
}

fn demo_error(err: impl std::fmt::Display) -> AppError {
    AppError::Workflow(err.to_string())
}
