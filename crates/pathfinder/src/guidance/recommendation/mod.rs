//! Profile-driven career selection.
//!
//! The selector is a decision table, not a scoring model: the branch picks a candidate pool, the
//! first applicable keyword rule filters it, and pool order breaks ties. It never fails; empty
//! pools and filters that match nothing fall back to the branch default or the catalog fallback.

mod rules;

pub use rules::RecommendationRule;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{CareerCatalog, CareerLabel};
use super::profile::{Branch, ProfileAnswers};
use rules::{standard_rules, KeywordRule};

/// Stateless selector over an injected catalog.
pub struct RecommendationEngine {
    catalog: Arc<CareerCatalog>,
    rules: Vec<KeywordRule>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<CareerCatalog>) -> Self {
        Self {
            catalog,
            rules: standard_rules(),
        }
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    pub fn select_career(&self, answers: &ProfileAnswers) -> CareerLabel {
        self.recommend(answers).career_path
    }

    pub fn recommend(&self, answers: &ProfileAnswers) -> Recommendation {
        let pools = &self.catalog.pools;
        let pool = pools.pool_for(answers.branch);

        let selected = self
            .rules
            .iter()
            .find(|rule| rule.applies(answers))
            .and_then(|rule| rule.first_match(&pool).map(|label| (label, rule.rule)));

        let (career_path, rule) = match selected {
            Some((label, rule)) => (label.clone(), rule),
            None => match pool.first() {
                Some(label) => ((*label).clone(), RecommendationRule::BranchDefault),
                None => (pools.fallback.clone(), RecommendationRule::Fallback),
            },
        };

        debug!(
            branch = answers.branch.label(),
            purpose = answers.purpose.label(),
            career = %career_path,
            ?rule,
            "career recommendation selected"
        );

        let level_count = self.catalog.level_count(&career_path);
        Recommendation {
            branch: answers.branch,
            career_path,
            rule,
            level_count,
        }
    }
}

/// Selected career with the trail explaining how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub branch: Branch,
    pub career_path: CareerLabel,
    pub rule: RecommendationRule,
    /// Levels in the career's curriculum; `None` when the catalog cannot resolve it.
    pub level_count: Option<u32>,
}

impl Recommendation {
    pub fn rationale(&self) -> String {
        format!("{} ({})", self.career_path, self.rule.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::catalog::CareerPools;
    use crate::guidance::profile::{AbroadPlans, FinancialStatus, Purpose};
    use std::collections::BTreeMap;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(CareerCatalog::standard()))
    }

    fn answers(branch: Branch, purpose: Purpose) -> ProfileAnswers {
        ProfileAnswers {
            branch,
            purpose,
            abroad_plans: AbroadPlans::No,
            financial_status: FinancialStatus::SixToTen,
            ..ProfileAnswers::default()
        }
    }

    #[test]
    fn research_purpose_prefers_research_roles() {
        let recommendation = engine().recommend(&answers(Branch::AiMl, Purpose::Research));
        assert_eq!(recommendation.career_path.as_str(), "AI Research Scientist");
        assert_eq!(recommendation.rule, RecommendationRule::ResearchOrAbroad);
        assert_eq!(recommendation.level_count, Some(3));
    }

    #[test]
    fn abroad_plans_trigger_the_research_filter() {
        let mut profile = answers(Branch::Cse, Purpose::Job);
        profile.abroad_plans = AbroadPlans::Yes;
        let recommendation = engine().recommend(&profile);
        assert_eq!(recommendation.career_path.as_str(), "Backend Engineer");
        assert_eq!(recommendation.rule, RecommendationRule::ResearchOrAbroad);
    }

    #[test]
    fn research_outranks_budget_filter() {
        let mut profile = answers(Branch::Ds, Purpose::Research);
        profile.financial_status = FinancialStatus::UpToThree;
        let recommendation = engine().recommend(&profile);
        assert_eq!(recommendation.career_path.as_str(), "Data Scientist");
        assert_eq!(recommendation.rule, RecommendationRule::ResearchOrAbroad);
    }

    #[test]
    fn entrepreneurship_prefers_product_roles() {
        let career = engine().select_career(&answers(Branch::Cse, Purpose::Entrepreneurship));
        assert_eq!(career.as_str(), "Full Stack Developer");
    }

    #[test]
    fn budget_constrained_job_seekers_get_employable_roles() {
        let mut profile = answers(Branch::Cs, Purpose::Job);
        profile.financial_status = FinancialStatus::UpToThree;
        let recommendation = engine().recommend(&profile);
        assert_eq!(recommendation.career_path.as_str(), "Software Engineer");
        assert_eq!(recommendation.rule, RecommendationRule::BudgetConscious);
    }

    #[test]
    fn unmatched_profiles_get_branch_default() {
        let recommendation = engine().recommend(&answers(Branch::Ds, Purpose::HigherStudies));
        assert_eq!(recommendation.career_path.as_str(), "Data Analyst");
        assert_eq!(recommendation.rule, RecommendationRule::BranchDefault);
    }

    #[test]
    fn unknown_branch_uses_merged_pool() {
        let recommendation = engine().recommend(&answers(Branch::Other, Purpose::NotSure));
        assert_eq!(recommendation.career_path.as_str(), "Software Developer");
    }

    fn pools(labels: &[&str]) -> CareerPools {
        CareerPools {
            cse: labels.iter().map(|label| CareerLabel::from(*label)).collect(),
            cs: Vec::new(),
            ds: Vec::new(),
            ai_ml: Vec::new(),
            fallback: CareerLabel::from("Generalist"),
        }
    }

    #[test]
    fn filter_without_matches_falls_back_to_pool_head() {
        let catalog = CareerCatalog {
            pools: pools(&["Designer", "Writer"]),
            curricula: BTreeMap::new(),
        };
        let engine = RecommendationEngine::new(Arc::new(catalog));

        let recommendation = engine.recommend(&answers(Branch::Cse, Purpose::Research));
        assert_eq!(recommendation.career_path.as_str(), "Designer");
        assert_eq!(recommendation.rule, RecommendationRule::BranchDefault);
        assert_eq!(recommendation.level_count, None);
    }

    #[test]
    fn empty_pool_returns_catalog_fallback() {
        let catalog = CareerCatalog {
            pools: pools(&[]),
            curricula: BTreeMap::new(),
        };
        let engine = RecommendationEngine::new(Arc::new(catalog));

        let recommendation = engine.recommend(&answers(Branch::AiMl, Purpose::Entrepreneurship));
        assert_eq!(recommendation.career_path.as_str(), "Generalist");
        assert_eq!(recommendation.rule, RecommendationRule::Fallback);
        assert!(recommendation.rationale().contains("no careers configured"));
    }
}
