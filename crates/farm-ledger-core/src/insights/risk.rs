//! Biosecurity risk questionnaire and scoring.
//!
//! Five questions, each with five options ordered best to worst. An answer's
//! rank is its position within its own question's options, so two questions
//! sharing an option text ("Sometimes", "Rarely") never borrow each other's
//! ranks. Each answer earns `(4 - rank) * 25` points and the score is the
//! rounded mean, giving 100 for all-best answers and 0 for all-worst.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{FarmError, FarmResult};

/// A questionnaire question and its ranked options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskQuestion {
    pub id: &'static str,
    pub text: &'static str,
    /// Best first
    pub options: [&'static str; 5],
}

impl RiskQuestion {
    /// Position of `answer` among the options (0 = best).
    pub fn rank(&self, answer: &str) -> Option<usize> {
        self.options.iter().position(|option| *option == answer)
    }
}

pub const QUESTIONS: [RiskQuestion; 5] = [
    RiskQuestion {
        id: "biosecurity_protocols",
        text: "Are biosecurity protocols being followed daily?",
        options: ["Yes, strictly", "Mostly", "Sometimes", "Rarely", "No"],
    },
    RiskQuestion {
        id: "visitor_management",
        text: "Is visitor access properly controlled and logged?",
        options: ["Always", "Usually", "Sometimes", "Rarely", "Never"],
    },
    RiskQuestion {
        id: "animal_health",
        text: "Are all animals showing normal health signs?",
        options: [
            "All healthy",
            "Mostly healthy",
            "Some concerns",
            "Multiple issues",
            "Serious problems",
        ],
    },
    RiskQuestion {
        id: "cleaning_schedule",
        text: "Is the farm cleaning schedule being maintained?",
        options: [
            "On schedule",
            "Mostly on time",
            "Occasionally delayed",
            "Frequently delayed",
            "Not followed",
        ],
    },
    RiskQuestion {
        id: "feed_quality",
        text: "Is the quality of feed and water consistently good?",
        options: ["Excellent", "Good", "Acceptable", "Poor", "Very poor"],
    },
];

const POINTS_PER_RANK: u32 = 25;
const WORST_RANK: u32 = 4;

/// Look up a question by id.
pub fn question(id: &str) -> Option<&'static RiskQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Score a complete set of answers.
///
/// Every question must be answered with one of its own options. Answers to
/// unknown question ids are ignored.
pub fn score_answers(answers: &BTreeMap<String, String>) -> FarmResult<u8> {
    let answered = QUESTIONS
        .iter()
        .filter(|q| answers.contains_key(q.id))
        .count();
    if answered < QUESTIONS.len() {
        return Err(FarmError::IncompleteAssessment {
            answered,
            total: QUESTIONS.len(),
        });
    }

    let mut points = 0u32;
    for q in &QUESTIONS {
        let answer = answers.get(q.id).map(String::as_str).unwrap_or_default();
        let rank = q.rank(answer).ok_or_else(|| FarmError::InvalidAnswer {
            question: q.id.to_string(),
            answer: answer.to_string(),
        })?;
        points += (WORST_RANK - rank as u32) * POINTS_PER_RANK;
    }

    let total = QUESTIONS.len() as u32;
    let score = (points + total / 2) / total;
    Ok(score.min(100) as u8)
}

/// Risk band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    NotAssessed,
}

impl RiskLevel {
    /// Band for the latest score; `None` means no assessment was ever made.
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            None => RiskLevel::NotAssessed,
            Some(s) if s >= 80 => RiskLevel::Low,
            Some(s) if s >= 60 => RiskLevel::Medium,
            Some(_) => RiskLevel::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::NotAssessed => "Not Assessed",
        }
    }
}
