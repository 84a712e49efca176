use serde::{Deserialize, Serialize};

use super::super::catalog::CareerLabel;
use super::super::profile::{AbroadPlans, ProfileAnswers, Purpose};

/// Which step of the selector produced the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRule {
    ResearchOrAbroad,
    Entrepreneurship,
    BudgetConscious,
    BranchDefault,
    Fallback,
}

impl RecommendationRule {
    pub fn summary(&self) -> &'static str {
        match self {
            RecommendationRule::ResearchOrAbroad => {
                "research or study-abroad plans favour research and engineering roles"
            }
            RecommendationRule::Entrepreneurship => {
                "entrepreneurial goals favour product, full stack, and architecture roles"
            }
            RecommendationRule::BudgetConscious => {
                "financial constraints favour quickly employable developer and analyst roles"
            }
            RecommendationRule::BranchDefault => "first career listed for the selected branch",
            RecommendationRule::Fallback => "no careers configured for the branch",
        }
    }
}

/// A guarded keyword filter over the branch pool.
pub(crate) struct KeywordRule {
    pub rule: RecommendationRule,
    pub keywords: Vec<String>,
    applies: fn(&ProfileAnswers) -> bool,
}

impl KeywordRule {
    fn new(rule: RecommendationRule, keywords: &[&str], applies: fn(&ProfileAnswers) -> bool) -> Self {
        Self {
            rule,
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            applies,
        }
    }

    pub fn applies(&self, answers: &ProfileAnswers) -> bool {
        (self.applies)(answers)
    }

    /// First pool entry whose label contains one of the keywords.
    pub fn first_match<'a>(&self, pool: &[&'a CareerLabel]) -> Option<&'a CareerLabel> {
        pool.iter()
            .copied()
            .find(|label| label.contains_any(&self.keywords))
    }
}

/// Priority-ordered rules; only the first rule whose guard holds is consulted.
pub(crate) fn standard_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            RecommendationRule::ResearchOrAbroad,
            &["Research", "Scientist", "Engineer"],
            |answers| answers.purpose == Purpose::Research || answers.abroad_plans == AbroadPlans::Yes,
        ),
        KeywordRule::new(
            RecommendationRule::Entrepreneurship,
            &["Product", "Full Stack", "Architect"],
            |answers| answers.purpose == Purpose::Entrepreneurship,
        ),
        KeywordRule::new(
            RecommendationRule::BudgetConscious,
            &["Developer", "Analyst", "Engineer"],
            |answers| answers.financial_status.is_budget_constrained(),
        ),
    ]
}
