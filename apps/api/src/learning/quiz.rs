//! Quiz generation — structured output, no persistence. Every request is
//! generated fresh.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::learning::prompts::{quiz_prompt, QUIZ_SYSTEM};
use crate::llm_client::{LlmClient, DEFAULT_TIMEOUT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl Quiz {
    /// Checks the fixed quiz schema: 3-5 questions, 4 options each, at
    /// least one correct option per question.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(3..=5).contains(&self.questions.len()) {
            return Err(AppError::Llm(format!(
                "Quiz has {} questions, expected 3-5",
                self.questions.len()
            )));
        }
        for (i, question) in self.questions.iter().enumerate() {
            if question.options.len() != 4 {
                return Err(AppError::Llm(format!(
                    "Question {i} has {} options, expected 4",
                    question.options.len()
                )));
            }
            if !question.options.iter().any(|o| o.is_correct) {
                return Err(AppError::Llm(format!(
                    "Question {i} has no correct option"
                )));
            }
        }
        Ok(())
    }
}

/// Invokes the model and returns a validated quiz. Nothing is persisted.
pub async fn generate_quiz(
    llm: &LlmClient,
    topic: &str,
    difficulty: &str,
) -> Result<Quiz, AppError> {
    let prompt = quiz_prompt(topic, difficulty);

    let quiz: Quiz = llm
        .call_json(&prompt, QUIZ_SYSTEM, DEFAULT_TIMEOUT)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate quiz: {e}")))?;

    quiz.validate()?;
    Ok(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(correct: bool) -> QuizOption {
        QuizOption {
            text: "an option".to_string(),
            is_correct: correct,
            explanation: Some("because".to_string()),
        }
    }

    fn question() -> QuizQuestion {
        QuizQuestion {
            question: "What is ownership?".to_string(),
            options: vec![option(true), option(false), option(false), option(false)],
            difficulty: "Beginner".to_string(),
        }
    }

    fn quiz(n_questions: usize) -> Quiz {
        Quiz {
            topic: "Ownership".to_string(),
            questions: (0..n_questions).map(|_| question()).collect(),
        }
    }

    #[test]
    fn test_valid_quiz_passes() {
        assert!(quiz(3).validate().is_ok());
        assert!(quiz(5).validate().is_ok());
    }

    #[test]
    fn test_question_count_out_of_range_rejected() {
        assert!(quiz(2).validate().is_err());
        assert!(quiz(6).validate().is_err());
    }

    #[test]
    fn test_wrong_option_count_rejected() {
        let mut q = quiz(3);
        q.questions[1].options.pop();
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_no_correct_option_rejected() {
        let mut q = quiz(3);
        for o in &mut q.questions[0].options {
            o.is_correct = false;
        }
        assert!(q.validate().is_err());
    }
}
