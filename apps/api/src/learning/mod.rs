//! Learning API — lesson/quiz generation and topic progress tracking.

pub mod handlers;
pub mod lessons;
pub mod progress;
pub mod prompts;
pub mod quiz;
