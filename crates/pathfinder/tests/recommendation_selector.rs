//! Integration specifications for the career recommendation selector.
//!
//! Scenarios drive the public engine against the built-in catalog so pool membership and rule
//! priority are checked the way the HTTP and CLI surfaces see them.

use std::sync::Arc;

use pathfinder::guidance::{
    AbroadPlans, Branch, CareerCatalog, FinancialStatus, ProfileAnswers, Purpose,
    RecommendationEngine, RecommendationRule,
};

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(CareerCatalog::standard()))
}

fn profile(
    branch: &str,
    purpose: &str,
    financial_status: &str,
    abroad_plans: &str,
) -> ProfileAnswers {
    ProfileAnswers {
        branch: Branch::parse(branch),
        purpose: Purpose::parse(purpose),
        financial_status: FinancialStatus::parse(financial_status),
        abroad_plans: AbroadPlans::parse(abroad_plans),
        ..ProfileAnswers::default()
    }
}

const PURPOSES: [&str; 5] = ["Job", "Higher Studies", "Entrepreneurship", "Research", "Not Sure"];
const FINANCES: [&str; 5] = ["0-3", "3-6", "6-10", "10+", ""];
const ABROAD: [&str; 3] = ["Yes", "No", "Not Sure"];

#[test]
fn every_profile_stays_inside_its_branch_pool() {
    let engine = engine();
    let catalog = engine.catalog();

    for branch in ["CSE", "CS", "DS", "AI/ML", "Mechanical", ""] {
        let pool = catalog.pools.pool_for(Branch::parse(branch));
        assert!(!pool.is_empty(), "pool for '{branch}' is empty");

        for purpose in PURPOSES {
            for finance in FINANCES {
                for abroad in ABROAD {
                    let answers = profile(branch, purpose, finance, abroad);
                    let career = engine.select_career(&answers);
                    assert!(
                        pool.contains(&&career),
                        "{career} is outside the {branch} pool for {answers:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn declared_pools_hold_ten_careers_each() {
    let catalog = CareerCatalog::standard();
    for branch in Branch::KNOWN {
        assert_eq!(catalog.pools.pool_for(branch).len(), 10, "{}", branch.label());
    }
    assert_eq!(catalog.pools.pool_for(Branch::Other).len(), 20);
    assert!(catalog.missing_curricula().is_empty());
}

#[test]
fn research_in_ai_ml_favours_scientists() {
    let recommendation = engine().recommend(&profile("AI/ML", "Research", "10+", "No"));

    assert_eq!(recommendation.career_path.as_str(), "AI Research Scientist");
    assert_eq!(recommendation.rule, RecommendationRule::ResearchOrAbroad);
    assert_eq!(recommendation.level_count, Some(3));
}

#[test]
fn entrepreneurs_in_cse_get_product_leaning_roles() {
    let career = engine().select_career(&profile("CSE", "Entrepreneurship", "6-10", "No"));
    assert_eq!(career.as_str(), "Full Stack Developer");
    assert!(["Product", "Full Stack", "Architect"]
        .iter()
        .any(|keyword| career.as_str().contains(keyword)));
}

#[test]
fn budget_constrained_job_seekers_get_employable_roles() {
    let recommendation = engine().recommend(&profile("CS", "Job", "0-3", "No"));
    assert_eq!(recommendation.rule, RecommendationRule::BudgetConscious);
    assert!(["Developer", "Analyst", "Engineer"]
        .iter()
        .any(|keyword| recommendation.career_path.as_str().contains(keyword)));
}

#[test]
fn abroad_plans_outrank_entrepreneurship() {
    let recommendation = engine().recommend(&profile("DS", "Entrepreneurship", "0-3", "Yes"));
    assert_eq!(recommendation.rule, RecommendationRule::ResearchOrAbroad);
    assert_eq!(recommendation.career_path.as_str(), "Data Scientist");
}

#[test]
fn unconstrained_profiles_take_the_pool_head() {
    let recommendation = engine().recommend(&profile("AI/ML", "Higher Studies", "10+", "No"));
    assert_eq!(recommendation.rule, RecommendationRule::BranchDefault);
    assert_eq!(recommendation.career_path.as_str(), "AI Research Scientist");
}

#[test]
fn selection_is_deterministic() {
    let engine = engine();
    let answers = profile("CSE", "Research", "3-6", "Not Sure");
    let first = engine.recommend(&answers);
    for _ in 0..5 {
        assert_eq!(engine.recommend(&answers), first);
    }
}

#[test]
fn malformed_answers_fall_back_quietly() {
    let answers: ProfileAnswers = serde_json::from_value(serde_json::json!({
        "branch": "Quantum Basket Weaving",
        "financial_status": "lots",
        "abroad_plans": "",
    }))
    .expect("unknown values parse leniently");

    let recommendation = engine().recommend(&answers);
    assert_eq!(recommendation.career_path.as_str(), "Software Developer");
}
