//! Questionnaire answers collected at profile completion.
//!
//! Every answer parses leniently: unknown, missing, null or non-string values land on the
//! catch-all variant so the recommendation selector always has something to work with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answers submitted once through the profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAnswers {
    #[serde(default)]
    pub subject: Subject,
    #[serde(default)]
    pub year: AcademicYear,
    #[serde(default)]
    pub branch: Branch,
    #[serde(default)]
    pub financial_status: FinancialStatus,
    #[serde(default)]
    pub abroad_plans: AbroadPlans,
    #[serde(default)]
    pub purpose: Purpose,
}

fn normalized(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '_' | '-' | '/'))
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Exam stream studied before university.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum Subject {
    Pcm,
    Pcb,
    Pcmb,
    Commerce,
    Arts,
    #[default]
    Other,
}

impl Subject {
    pub fn label(self) -> &'static str {
        match self {
            Subject::Pcm => "PCM",
            Subject::Pcb => "PCB",
            Subject::Pcmb => "PCMB",
            Subject::Commerce => "Commerce",
            Subject::Arts => "Arts",
            Subject::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalized(raw).as_str() {
            "pcm" => Subject::Pcm,
            "pcb" => Subject::Pcb,
            "pcmb" => Subject::Pcmb,
            "commerce" => Subject::Commerce,
            "arts" | "humanities" => Subject::Arts,
            _ => Subject::Other,
        }
    }
}

impl From<Value> for Subject {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }
}

impl From<Subject> for &'static str {
    fn from(value: Subject) -> Self {
        value.label()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum AcademicYear {
    First,
    Second,
    Third,
    Fourth,
    Graduate,
    #[default]
    Other,
}

impl AcademicYear {
    pub fn label(self) -> &'static str {
        match self {
            AcademicYear::First => "1st Year",
            AcademicYear::Second => "2nd Year",
            AcademicYear::Third => "3rd Year",
            AcademicYear::Fourth => "4th Year",
            AcademicYear::Graduate => "Graduate",
            AcademicYear::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalized(raw).as_str() {
            "1styear" | "1st" | "first" | "1" => AcademicYear::First,
            "2ndyear" | "2nd" | "second" | "2" => AcademicYear::Second,
            "3rdyear" | "3rd" | "third" | "3" => AcademicYear::Third,
            "4thyear" | "4th" | "fourth" | "final" | "finalyear" | "4" => AcademicYear::Fourth,
            "graduate" | "graduated" => AcademicYear::Graduate,
            _ => AcademicYear::Other,
        }
    }
}

impl From<Value> for AcademicYear {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }
}

impl From<AcademicYear> for &'static str {
    fn from(value: AcademicYear) -> Self {
        value.label()
    }
}

/// Engineering branch; selects the base career pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum Branch {
    Cse,
    Cs,
    Ds,
    AiMl,
    #[default]
    Other,
}

impl Branch {
    pub const KNOWN: [Branch; 4] = [Branch::Cse, Branch::Cs, Branch::Ds, Branch::AiMl];

    pub fn label(self) -> &'static str {
        match self {
            Branch::Cse => "CSE",
            Branch::Cs => "CS",
            Branch::Ds => "DS",
            Branch::AiMl => "AI/ML",
            Branch::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalized(raw).as_str() {
            "cse" => Branch::Cse,
            "cs" => Branch::Cs,
            "ds" => Branch::Ds,
            "aiml" => Branch::AiMl,
            _ => Branch::Other,
        }
    }
}

impl From<Value> for Branch {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }
}

impl From<Branch> for &'static str {
    fn from(value: Branch) -> Self {
        value.label()
    }
}

/// Household income band in lakhs per annum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum FinancialStatus {
    UpToThree,
    ThreeToSix,
    SixToTen,
    AboveTen,
    #[default]
    Unknown,
}

impl FinancialStatus {
    pub fn label(self) -> &'static str {
        match self {
            FinancialStatus::UpToThree => "0-3",
            FinancialStatus::ThreeToSix => "3-6",
            FinancialStatus::SixToTen => "6-10",
            FinancialStatus::AboveTen => "10+",
            FinancialStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().replace(' ', "").as_str() {
            "0-3" => FinancialStatus::UpToThree,
            "3-6" => FinancialStatus::ThreeToSix,
            "6-10" => FinancialStatus::SixToTen,
            "10+" | "10-" => FinancialStatus::AboveTen,
            _ => FinancialStatus::Unknown,
        }
    }

    /// The two lowest bands steer recommendations toward quickly employable roles.
    pub fn is_budget_constrained(self) -> bool {
        matches!(self, FinancialStatus::UpToThree | FinancialStatus::ThreeToSix)
    }
}

impl From<Value> for FinancialStatus {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }
}

impl From<FinancialStatus> for &'static str {
    fn from(value: FinancialStatus) -> Self {
        value.label()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum AbroadPlans {
    Yes,
    No,
    #[default]
    NotSure,
}

impl AbroadPlans {
    pub fn label(self) -> &'static str {
        match self {
            AbroadPlans::Yes => "Yes",
            AbroadPlans::No => "No",
            AbroadPlans::NotSure => "Not Sure",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalized(raw).as_str() {
            "yes" | "y" => AbroadPlans::Yes,
            "no" | "n" => AbroadPlans::No,
            _ => AbroadPlans::NotSure,
        }
    }
}

impl From<Value> for AbroadPlans {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }
}

impl From<AbroadPlans> for &'static str {
    fn from(value: AbroadPlans) -> Self {
        value.label()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "&'static str")]
pub enum Purpose {
    Job,
    HigherStudies,
    Entrepreneurship,
    Research,
    #[default]
    NotSure,
}

impl Purpose {
    pub fn label(self) -> &'static str {
        match self {
            Purpose::Job => "Job",
            Purpose::HigherStudies => "Higher Studies",
            Purpose::Entrepreneurship => "Entrepreneurship",
            Purpose::Research => "Research",
            Purpose::NotSure => "Not Sure",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalized(raw).as_str() {
            "job" => Purpose::Job,
            "higherstudies" => Purpose::HigherStudies,
            "entrepreneurship" | "startup" => Purpose::Entrepreneurship,
            "research" => Purpose::Research,
            _ => Purpose::NotSure,
        }
    }
}

impl From<Value> for Purpose {
    fn from(value: Value) -> Self {
        value.as_str().map(Self::parse).unwrap_or_default()
    }
}

impl From<Purpose> for &'static str {
    fn from(value: Purpose) -> Self {
        value.label()
    }
}
