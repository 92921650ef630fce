// All LLM prompt constants for roadmap generation.

/// System prompt — enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str = "You are an expert coding mentor creating personalized learning \
    roadmaps. You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Roadmap prompt template. Replace `{goal}`, `{current_skills}` and
/// `{resume_text}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a detailed learning roadmap for a user with the following goal: {goal}

Current skills/background: {current_skills}
Resume content (if provided): {resume_text}

INSTRUCTIONS:
1. Analyze the user's current skills and resume.
2. If the resume shows proficiency in a topic, either skip it or mark it as "Review/Advanced".
3. Focus the roadmap on filling the GAPS to reach the goal.
4. Break the roadmap down into weekly or thematic modules.
5. For each module provide:
   - A title and brief description.
   - A list of specific topics/sub-skills.
   - At least 2 FREE resources. IMPORTANT: Prefer official documentation (React Docs, MDN, Python.org) or highly stable YouTube channels (Traversy Media, FreeCodeCamp). Do NOT use random blog posts or deep links that might change.
   - At least 1 PAID resource (Udemy/Coursera course landing pages, O'Reilly books).
   - 1-2 PRACTICAL PROJECTS: a specific application to build using these skills (e.g. "Build a To-Do List", "Create a Weather App").

Return a JSON object with this EXACT schema (no extra fields):
{
  "roadmap": [
    {
      "title": "Module title",
      "description": "What this module covers",
      "topics": ["Topic one", "Topic two"],
      "free_resources": [
        {"title": "Resource title", "url": "https://...", "type": "Video|Article|Course|Book"}
      ],
      "paid_resources": [
        {"title": "Resource title", "url": "https://...", "type": "Course|Book"}
      ],
      "projects": [
        {"title": "Project title", "description": "What to build", "difficulty": "Beginner|Intermediate|Advanced"}
      ]
    }
  ]
}"#;

/// Fills the roadmap prompt template.
pub fn roadmap_prompt(goal: &str, current_skills: &str, resume_text: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{goal}", goal)
        .replace("{current_skills}", current_skills)
        .replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roadmap_prompt_embeds_inputs() {
        let prompt = roadmap_prompt("Become a backend engineer", "Python basics", "");
        assert!(prompt.contains("Become a backend engineer"));
        assert!(prompt.contains("Python basics"));
        assert!(!prompt.contains("{goal}"));
        assert!(!prompt.contains("{current_skills}"));
        assert!(!prompt.contains("{resume_text}"));
    }
}
