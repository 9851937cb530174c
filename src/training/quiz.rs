//! The final assessment. The whole bank is presented every time and each
//! question has exactly one correct option.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

const BUNDLED_BANK: &str = include_str!("../../data/quiz_questions.json");

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// A question as shown to the hunter, without the answer.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView<'a> {
    pub id: &'a str,
    pub question: &'a str,
    pub options: &'a [String],
}

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Quiz bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Quiz bank is empty")]
    Empty,

    #[error("Duplicate question id {0}")]
    DuplicateId(String),

    #[error("Question {0} must list its answer exactly once among the options")]
    AmbiguousAnswer(String),
}

#[derive(Deserialize)]
struct BankFile {
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuestionBank {
    pub fn bundled() -> Result<Self, BankError> {
        Self::from_json(BUNDLED_BANK)
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let file: BankFile = serde_json::from_str(json)?;
        Self::new(file.questions)
    }

    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(BankError::DuplicateId(q.id.clone()));
            }
            if q.options.iter().filter(|o| **o == q.answer).count() != 1 {
                return Err(BankError::AmbiguousAnswer(q.id.clone()));
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn views(&self) -> Vec<QuestionView<'_>> {
        self.questions
            .iter()
            .map(|q| QuestionView {
                id: &q.id,
                question: &q.question,
                options: &q.options,
            })
            .collect()
    }

    /// Unanswered questions and answers to unknown ids count as wrong.
    pub fn grade(&self, answers: &HashMap<String, String>) -> QuizScore {
        let correct = self
            .questions
            .iter()
            .filter(|q| answers.get(&q.id) == Some(&q.answer))
            .count();

        QuizScore {
            correct,
            total: self.questions.len(),
        }
    }
}

impl QuizScore {
    pub fn passes(&self, pass_mark: usize) -> bool {
        self.correct >= pass_mark
    }
}

#[cfg(test)]
pub(crate) fn answers_with_correct(bank: &QuestionBank, correct: usize) -> HashMap<String, String> {
    bank.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let choice = if i < correct {
                q.answer.clone()
            } else {
                q.options
                    .iter()
                    .find(|o| **o != q.answer)
                    .cloned()
                    .unwrap_or_default()
            };
            (q.id.clone(), choice)
        })
        .collect()
}
