//! Quiz outcomes as consumed by the progression ledger.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PASS_MARK: u8 = 60;

/// Percentage score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct QuizScore(u8);

impl QuizScore {
    pub fn new(percent: u8) -> Result<Self, QuizError> {
        if percent > 100 {
            return Err(QuizError::ScoreOutOfRange(u16::from(percent)));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u16> for QuizScore {
    type Error = QuizError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| QuizError::ScoreOutOfRange(value))
            .and_then(Self::new)
    }
}

impl From<QuizScore> for u16 {
    fn from(value: QuizScore) -> Self {
        u16::from(value.0)
    }
}

impl fmt::Display for QuizScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Pass/fail verdict plus score reported by a quiz evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub passed: bool,
    pub score: QuizScore,
}

impl QuizOutcome {
    /// Grade a tally of correct answers against a pass mark. Scores round to the nearest percent.
    pub fn from_tally(correct: u32, total: u32, pass_mark: u8) -> Result<Self, QuizError> {
        if total == 0 {
            return Err(QuizError::NoQuestions);
        }
        if correct > total {
            return Err(QuizError::TallyExceedsTotal { correct, total });
        }

        let percent = (u64::from(correct) * 200 + u64::from(total)) / (u64::from(total) * 2);
        let score = QuizScore::new(percent as u8)?;

        Ok(Self {
            passed: score.percent() >= pass_mark,
            score,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("quiz score {0} is outside 0-100")]
    ScoreOutOfRange(u16),
    #[error("quiz has no questions to grade")]
    NoQuestions,
    #[error("{correct} correct answers exceeds {total} questions")]
    TallyExceedsTotal { correct: u32, total: u32 },
}
