// All LLM prompt constants for the Learning module.

/// System prompt for lesson generation. Lessons are free-text markdown,
/// deliberately NOT JSON-coerced.
pub const LESSON_SYSTEM: &str = "You are an expert coding instructor writing deep-dive lessons. \
    Return ONLY the lesson as Markdown. Do not wrap it in JSON. \
    Use headers, bold text, and code blocks.";

/// Lesson prompt template. Replace `{topic}` and `{context}` before sending.
pub const LESSON_PROMPT_TEMPLATE: &str = r#"Create a comprehensive, deep-dive lesson for the topic: {topic}

Context (parent module/roadmap): {context}

INSTRUCTIONS:
1. Structure:
   - Introduction: briefly explain what {topic} is and why it matters.
   - Core Concept: deep explanation of how it works. Use analogies if helpful.
   - Code Implementation: realistic, copy-pasteable code snippets with comments explaining each part.
   - Common Pitfalls: what mistakes do beginners often make?
   - Best Practices: professional tips for using this in production.
   - Challenge: a small mini-task for the learner to try.
   - Job-Ready Project Idea: a small feature or tool they can build right now using this specific topic.
2. Tone: encouraging, professional, and clear.
3. Formatting: return ONLY the Markdown content."#;

/// System prompt for quiz generation — enforces JSON-only output.
pub const QUIZ_SYSTEM: &str = "You are an expert coding mentor writing multiple-choice quizzes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Quiz prompt template. Replace `{topic}` and `{difficulty}` before sending.
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"Create a short multiple-choice quiz to test knowledge on: {topic}

Difficulty level: {difficulty}

INSTRUCTIONS:
1. Generate 3-5 high-quality questions.
2. Provide exactly 4 options for each question (1 correct, 3 distractors).
3. Include a brief explanation for each option.

Return a JSON object with this EXACT schema (no extra fields):
{
  "topic": "the quiz topic",
  "questions": [
    {
      "question": "the question text",
      "options": [
        {"text": "option text", "is_correct": true, "explanation": "why this is right or wrong"}
      ],
      "difficulty": "Beginner|Intermediate|Advanced"
    }
  ]
}"#;

pub fn lesson_prompt(topic: &str, context: &str) -> String {
    LESSON_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{context}", context)
}

pub fn quiz_prompt(topic: &str, difficulty: &str) -> String {
    QUIZ_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{difficulty}", difficulty)
}
