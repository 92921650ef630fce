// Grading prompt constants for the Challenges module.

use crate::challenges::catalog::Challenge;

/// System prompt for challenge grading — enforces JSON-only output.
pub const GRADING_SYSTEM: &str =
    "You are a precise code verification engine. Output valid JSON only.";

/// Grading prompt template. Replace `{title}`, `{description}`,
/// `{test_criteria}`, `{language}` and `{code}` before sending.
pub const GRADING_PROMPT_TEMPLATE: &str = r#"You are a Senior Code Reviewer and Auto-Grader.

Task: verify whether the following code correctly solves the problem.

Problem: {title}
Description: {description}
Test Criteria: {test_criteria}

User Submitted Code ({language}):
```
{code}
```

Instructions:
1. Check for correctness based on the test criteria.
2. Check for logic errors.
3. Ignore minor styling issues unless they break the code.

Return ONLY a JSON object in this format, no markdown, no other text:
{
    "correct": boolean,
    "feedback": "string (concise explanation or hints if wrong, praise if correct)"
}"#;

/// Fills the grading prompt for one submission.
pub fn grading_prompt(challenge: &Challenge, code: &str, language: &str) -> String {
    GRADING_PROMPT_TEMPLATE
        .replace("{title}", &challenge.title)
        .replace("{description}", &challenge.description)
        .replace("{test_criteria}", &challenge.test_criteria)
        .replace("{language}", language)
        .replace("{code}", code)
}
