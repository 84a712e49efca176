use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::catalog::CareerLabel;
use super::super::quiz::{QuizOutcome, QuizScore};

/// Identifier for an enrolled learner. Restricted to characters safe for storage keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(pub String);

impl LearnerId {
    pub const MAX_LEN: usize = 64;

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= Self::MAX_LEN
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        valid.then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Badge label awarded on passing a level.
pub fn master_badge(level: u32) -> String {
    format!("Level {level} Master")
}

/// Insertion-ordered badge labels without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct BadgeSet(Vec<String>);

impl BadgeSet {
    /// Returns `false` when the badge was already held.
    pub fn insert(&mut self, badge: impl Into<String>) -> bool {
        let badge = badge.into();
        if self.contains(&badge) {
            return false;
        }
        self.0.push(badge);
        true
    }

    pub fn contains(&self, badge: &str) -> bool {
        self.0.iter().any(|held| held == badge)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for BadgeSet {
    fn from(value: Vec<String>) -> Self {
        let mut badges = BadgeSet::default();
        for badge in value {
            badges.insert(badge);
        }
        badges
    }
}

impl From<BadgeSet> for Vec<String> {
    fn from(value: BadgeSet) -> Self {
        value.0
    }
}

/// Per-learner progress through a career curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub career_path: CareerLabel,
    pub level: u32,
    pub points: u32,
    #[serde(default)]
    pub badges: BadgeSet,
}

impl LearnerProgress {
    pub fn new(career_path: CareerLabel) -> Self {
        Self {
            career_path,
            level: 1,
            points: 0,
            badges: BadgeSet::default(),
        }
    }

    pub fn has_mastered(&self, level: u32) -> bool {
        self.badges.contains(&master_badge(level))
    }

    /// The final level has been passed. Progress is a fixed point from here on.
    pub fn is_finished(&self, level_count: u32) -> bool {
        self.level > level_count || (self.level == level_count && self.has_mastered(level_count))
    }
}

/// Composite key: at most one certificate per level per career path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CertificateKey {
    pub career_path: CareerLabel,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub career_path: CareerLabel,
    pub level: u32,
    pub title: String,
    /// Curriculum title of the completed level.
    pub description: String,
    pub issued_at: DateTime<Utc>,
    pub score: QuizScore,
}

impl CertificateRecord {
    pub fn key(&self) -> CertificateKey {
        CertificateKey {
            career_path: self.career_path.clone(),
            level: self.level,
        }
    }
}

/// Append-only certificate collection ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CertificateRecord>", into = "Vec<CertificateRecord>")]
pub struct CertificateBook {
    records: BTreeMap<CertificateKey, CertificateRecord>,
}

impl CertificateBook {
    pub fn contains(&self, key: &CertificateKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn get(&self, key: &CertificateKey) -> Option<&CertificateRecord> {
        self.records.get(key)
    }

    /// Adds the record unless its key is already present; existing records are never replaced.
    pub fn issue(&mut self, record: CertificateRecord) -> bool {
        let key = record.key();
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, record);
        true
    }

    pub fn records(&self) -> impl Iterator<Item = &CertificateRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<CertificateRecord>> for CertificateBook {
    fn from(value: Vec<CertificateRecord>) -> Self {
        let mut book = CertificateBook::default();
        for record in value {
            book.issue(record);
        }
        book
    }
}

impl From<CertificateBook> for Vec<CertificateRecord> {
    fn from(value: CertificateBook) -> Self {
        value.records.into_values().collect()
    }
}

/// Quiz result for one level as reported by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub level: u32,
    pub passed: bool,
    pub score: QuizScore,
}

impl QuizAttempt {
    pub fn from_outcome(level: u32, outcome: QuizOutcome) -> Self {
        Self {
            level,
            passed: outcome.passed,
            score: outcome.score,
        }
    }
}
