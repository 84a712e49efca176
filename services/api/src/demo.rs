use crate::infra::{load_catalog, InMemoryProgressRepository, RecordingObserver};
use clap::Args;
use pathfinder::config::AppConfig;
use pathfinder::error::AppError;
use pathfinder::guidance::progression::{LearnerService, LearnerView};
use pathfinder::guidance::{
    AbroadPlans, AcademicYear, Branch, CareerCatalog, CareerLabel, CurriculumLevel,
    FinancialStatus, ProfileAnswers, Purpose, Subject,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Engineering branch: CSE, CS, DS, or AI/ML
    #[arg(long, default_value = "")]
    pub(crate) branch: String,
    /// Main goal: Job, Higher Studies, Entrepreneurship, Research, Not Sure
    #[arg(long, default_value = "")]
    pub(crate) purpose: String,
    /// Annual family income band in lakhs: 0-3, 3-6, 6-10, 10+
    #[arg(long, default_value = "")]
    pub(crate) financial_status: String,
    /// Plans to study or work abroad: Yes, No, Not Sure
    #[arg(long, default_value = "")]
    pub(crate) abroad_plans: String,
    /// Pre-university stream: PCM, PCB, PCMB, Commerce, Arts
    #[arg(long, default_value = "")]
    pub(crate) subject: String,
    /// Current year of study
    #[arg(long, default_value = "")]
    pub(crate) year: String,
    /// Print the full roadmap for the recommended career
    #[arg(long)]
    pub(crate) show_curriculum: bool,
}

impl RecommendArgs {
    pub(crate) fn answers(&self) -> ProfileAnswers {
        ProfileAnswers {
            subject: Subject::parse(&self.subject),
            year: AcademicYear::parse(&self.year),
            branch: Branch::parse(&self.branch),
            financial_status: FinancialStatus::parse(&self.financial_status),
            abroad_plans: AbroadPlans::parse(&self.abroad_plans),
            purpose: Purpose::parse(&self.purpose),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CurriculumArgs {
    /// Career path label, e.g. "Data Scientist"
    pub(crate) career: String,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Branch used for the sample learner's profile
    #[arg(long, default_value = "AI/ML")]
    pub(crate) branch: String,
    /// Goal used for the sample learner's profile
    #[arg(long, default_value = "Research")]
    pub(crate) purpose: String,
}

fn configured_catalog() -> Result<CareerCatalog, AppError> {
    let config = AppConfig::load()?;
    load_catalog(&config.guidance)
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let catalog = Arc::new(configured_catalog()?);
    let engine = pathfinder::guidance::RecommendationEngine::new(catalog.clone());
    let answers = args.answers();
    let recommendation = engine.recommend(&answers);

    println!("Profile");
    println!("- Branch: {}", answers.branch.label());
    println!("- Purpose: {}", answers.purpose.label());
    println!("- Financial status: {}", answers.financial_status.label());
    println!("- Abroad plans: {}", answers.abroad_plans.label());
    println!("\nRecommended career: {}", recommendation.career_path);
    println!("Why: {}", recommendation.rule.summary());

    if args.show_curriculum {
        render_curriculum(&catalog, &recommendation.career_path)?;
    } else if let Some(count) = recommendation.level_count {
        println!(
            "Roadmap: {} levels (run `curriculum \"{}\"` for details)",
            count, recommendation.career_path
        );
    }

    Ok(())
}

pub(crate) fn run_curriculum(args: CurriculumArgs) -> Result<(), AppError> {
    let catalog = configured_catalog()?;
    render_curriculum(&catalog, &CareerLabel::new(args.career.trim()))
}

fn render_curriculum(catalog: &CareerCatalog, career: &CareerLabel) -> Result<(), AppError> {
    let curriculum = catalog
        .curriculum(career)
        .ok_or_else(|| AppError::UnknownCareer(career.to_string()))?;

    println!("\n{} roadmap", career);
    for (index, level) in curriculum.levels.iter().enumerate() {
        println!("\nLevel {}: {} ({})", index + 1, level.title, level.duration);
        render_level(level);
    }
    Ok(())
}

fn render_level(level: &CurriculumLevel) {
    for course in &level.courses {
        println!("  - Course: {} <{}>", course.name, course.url);
    }
    for project in &level.projects {
        println!("  - Project: {}", project);
    }
    for internship in &level.internships {
        println!("  - Internships: {} <{}>", internship.name, internship.url);
    }
    for job in &level.jobs {
        println!("  - Jobs: {} <{}>", job.name, job.url);
    }
    for note in &level.higher_studies {
        println!("  - Higher studies: {}", note);
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = Arc::new(CareerCatalog::standard());
    let repository = Arc::new(InMemoryProgressRepository::default());
    let observer = Arc::new(RecordingObserver::default());
    let service = LearnerService::new(catalog, repository, observer.clone());

    let answers = ProfileAnswers {
        branch: Branch::parse(&args.branch),
        purpose: Purpose::parse(&args.purpose),
        ..ProfileAnswers::default()
    };

    println!("Career guidance demo");
    let learner_id = "demo-learner";
    let record = match service.enroll(learner_id, answers) {
        Ok(record) => record,
        Err(err) => {
            println!("  Enrolment rejected: {}", err);
            return Ok(());
        }
    };
    let recommendation = service.recommend(&record.answers);
    println!(
        "- Enrolled {} on {}",
        record.learner_id,
        recommendation.rationale()
    );
    render_view(&record.view(service.catalog()));

    // (level, correct, total): fail level 1, pass it, try to skip ahead, finish, then retake the last quiz.
    let script: [(u32, u32, u32); 6] = [
        (1, 2, 5),
        (1, 4, 5),
        (3, 5, 5),
        (2, 5, 5),
        (3, 3, 4),
        (3, 4, 4),
    ];
    println!("\nQuiz attempts (pass mark {}%)", service.pass_mark());
    for (level, correct, total) in script {
        match service.grade_quiz(learner_id, level, correct, total) {
            Ok(completion) => {
                println!(
                    "- Level {} quiz {}/{}: {} (+{} points)",
                    level,
                    correct,
                    total,
                    completion.status.message(),
                    completion.points_awarded
                );
                if let Some(badge) = &completion.badge_awarded {
                    println!("  Badge: {}", badge);
                }
            }
            Err(err) => println!("- Level {} quiz rejected: {}", level, err),
        }
    }

    match service.progress(learner_id) {
        Ok(record) => render_view(&record.view(service.catalog())),
        Err(err) => println!("  Progress unavailable: {}", err),
    }

    match service.certificates(learner_id) {
        Ok(certificates) if certificates.is_empty() => println!("\nCertificates: none"),
        Ok(certificates) => {
            println!("\nCertificates");
            for certificate in certificates {
                println!(
                    "- {} | {} | score {} | issued {}",
                    certificate.title,
                    certificate.description,
                    certificate.score,
                    certificate.issued_at.format("%Y-%m-%d")
                );
            }
        }
        Err(err) => println!("\nCertificates unavailable: {}", err),
    }

    match observer.events() {
        Ok(events) => {
            println!("\nProgress notifications: {}", events.len());
            for event in events {
                println!(
                    "- {:?}: level {} / {} points",
                    event.status, event.level, event.points
                );
            }
        }
        Err(err) => println!("\nProgress notifications unavailable: {}", err),
    }

    Ok(())
}

fn render_view(view: &LearnerView) {
    let total = view
        .level_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "?".to_string());
    println!(
        "  Level {}/{}{} | {} points | badges: {}",
        view.level,
        total,
        view.current_level_title
            .as_deref()
            .map(|title| format!(" ({title})"))
            .unwrap_or_default(),
        view.points,
        if view.badges.is_empty() {
            "none".to_string()
        } else {
            view.badges.join(", ")
        }
    );
    if view.roadmap_complete {
        println!("  Roadmap complete");
    }
}
