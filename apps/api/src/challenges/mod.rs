//! Coding challenges — static catalog, LLM-graded submissions, xp awards.

pub mod catalog;
pub mod grader;
pub mod handlers;
pub mod prompts;
