//! Career guidance: profile answers, the career catalog, recommendation, and level progression.

pub mod assistant;
pub mod catalog;
pub mod profile;
pub mod progression;
pub mod quiz;
pub mod recommendation;

pub use assistant::{AssistantReply, GuidanceAssistant, Intent};
pub use catalog::{CareerCatalog, CareerLabel, CareerPools, CatalogError, Curriculum, CurriculumLevel};
pub use profile::{
    AbroadPlans, AcademicYear, Branch, FinancialStatus, ProfileAnswers, Purpose, Subject,
};
pub use quiz::{QuizError, QuizOutcome, QuizScore};
pub use recommendation::{Recommendation, RecommendationEngine, RecommendationRule};
