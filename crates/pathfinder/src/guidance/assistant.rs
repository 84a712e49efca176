//! Keyword-driven help desk answering common questions about the guidance flow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    /// Fragments matched case-insensitively; any one appearing in the message selects the intent.
    pub keywords: Vec<String>,
    pub reply: String,
}

impl Intent {
    fn new(name: &str, keywords: &[&str], reply: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            reply: reply.to_string(),
        }
    }

    /// `message` must already be lowercased.
    fn matches(&self, message: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| message.contains(keyword.to_lowercase().as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// `None` when no intent matched and the fallback was used.
    pub intent: Option<String>,
    pub reply: String,
}

/// Ordered intent table; the first intent with a matching keyword wins.
#[derive(Debug, Clone)]
pub struct GuidanceAssistant {
    intents: Vec<Intent>,
    fallback: String,
}

impl GuidanceAssistant {
    pub fn new(intents: Vec<Intent>, fallback: impl Into<String>) -> Self {
        Self {
            intents,
            fallback: fallback.into(),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            vec![
                Intent::new(
                    "greeting",
                    &["hello", " hi ", "hey", "good morning", "good evening"],
                    "Hello! Ask me about career recommendations, courses, quizzes, or certificates.",
                ),
                Intent::new(
                    "recommendation",
                    &["recommend", "which career", "career path", "suggest"],
                    "Complete your profile with your branch, goals, and plans. We match you to one career path from your branch's list.",
                ),
                Intent::new(
                    "courses",
                    &["course", "learn", "study material", "syllabus"],
                    "Each level of your roadmap lists courses, projects, and a recommended duration. Start with level 1.",
                ),
                Intent::new(
                    "quiz",
                    &["quiz", "test", "exam"],
                    "Pass the quiz at the end of a level to unlock the next one. You can retry a failed quiz as often as you like.",
                ),
                Intent::new(
                    "certificates",
                    &["certificate", "certification"],
                    "You earn one certificate per level the first time you pass its quiz. Certificates are never revoked.",
                ),
                Intent::new(
                    "rewards",
                    &["point", "badge", "reward"],
                    "Every level you pass earns 100 points and a 'Level N Master' badge.",
                ),
                Intent::new(
                    "internships",
                    &["internship", "intern"],
                    "Internship links are listed with every level of your roadmap.",
                ),
                Intent::new(
                    "jobs",
                    &["job", "placement", "salary", "hiring"],
                    "Job openings appear from level 2 onward, once you have core skills to show.",
                ),
                Intent::new(
                    "higher_studies",
                    &["masters", " ms ", "m.tech", "mtech", " gre ", " gate ", "abroad", "higher studies"],
                    "The final level of each roadmap includes guidance on higher studies in India and abroad.",
                ),
            ],
            "Sorry, I didn't catch that. Try asking about careers, courses, quizzes, certificates, or jobs.",
        )
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn respond(&self, message: &str) -> AssistantReply {
        // Padding lets word-boundary keywords such as " hi " match at the end of a message.
        let normalized = format!(" {} ", message.trim().to_lowercase());

        match self.intents.iter().find(|intent| intent.matches(&normalized)) {
            Some(intent) => AssistantReply {
                intent: Some(intent.name.clone()),
                reply: intent.reply.clone(),
            },
            None => AssistantReply {
                intent: None,
                reply: self.fallback.clone(),
            },
        }
    }
}

impl Default for GuidanceAssistant {
    fn default() -> Self {
        Self::standard()
    }
}
