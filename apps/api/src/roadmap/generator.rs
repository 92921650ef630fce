//! Roadmap generation — builds the prompt, invokes the model, validates the
//! structured reply, assigns stable topic ids and persists the result.
//!
//! Flow: prompt build → LLM call → schema validation → id assignment →
//! INSERT one JSONB row → return the full record.

use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, DEFAULT_TIMEOUT};
use crate::models::roadmap::{
    Project, Resource, RoadmapContent, RoadmapModule, RoadmapRow, Topic, ROADMAP_SCHEMA_VERSION,
};
use crate::roadmap::prompts::{roadmap_prompt, ROADMAP_SYSTEM};

/// The reply shape the model is instructed to produce. Topics arrive as
/// plain titles; stable ids are assigned here, at generation time.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedRoadmap {
    pub roadmap: Vec<GeneratedModule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedModule {
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
    pub free_resources: Vec<Resource>,
    pub paid_resources: Vec<Resource>,
    pub projects: Vec<Project>,
}

impl GeneratedRoadmap {
    /// Checks the generation bounds: at least one module, each with at
    /// least 2 free resources, 1 paid resource and 1-2 projects. A reply
    /// that parses but misses these fails the whole operation.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.roadmap.is_empty() {
            return Err(AppError::Llm(
                "Generated roadmap contains no modules".to_string(),
            ));
        }
        for (i, module) in self.roadmap.iter().enumerate() {
            if module.topics.is_empty() {
                return Err(AppError::Llm(format!("Module {i} has no topics")));
            }
            if module.free_resources.len() < 2 {
                return Err(AppError::Llm(format!(
                    "Module {i} has fewer than 2 free resources"
                )));
            }
            if module.paid_resources.is_empty() {
                return Err(AppError::Llm(format!("Module {i} has no paid resources")));
            }
            if module.projects.is_empty() {
                return Err(AppError::Llm(format!("Module {i} has no projects")));
            }
            if module.projects.len() > 2 {
                return Err(AppError::Llm(format!("Module {i} has more than 2 projects")));
            }
        }
        Ok(())
    }

    /// Wraps the validated reply as versioned content, minting a stable uuid
    /// for every topic.
    pub fn into_content(self) -> RoadmapContent {
        RoadmapContent {
            schema_version: ROADMAP_SCHEMA_VERSION,
            modules: self
                .roadmap
                .into_iter()
                .map(|m| RoadmapModule {
                    title: m.title,
                    description: m.description,
                    topics: m
                        .topics
                        .into_iter()
                        .map(|title| Topic {
                            id: Uuid::new_v4(),
                            title,
                        })
                        .collect(),
                    free_resources: m.free_resources,
                    paid_resources: m.paid_resources,
                    projects: m.projects,
                })
                .collect(),
        }
    }
}

/// Invokes the model and returns validated, id-stamped roadmap content.
/// No retry: parse or validation failure is reported to the caller.
pub async fn generate_roadmap(
    llm: &LlmClient,
    goal: &str,
    current_skills: &str,
    resume_text: &str,
) -> Result<RoadmapContent, AppError> {
    let prompt = roadmap_prompt(goal, current_skills, resume_text);

    let generated: GeneratedRoadmap = llm
        .call_json(&prompt, ROADMAP_SYSTEM, DEFAULT_TIMEOUT)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate roadmap: {e}")))?;

    generated.validate()?;
    Ok(generated.into_content())
}

/// Persists generated content as one JSONB row and returns the record.
pub async fn persist_roadmap(
    pool: &PgPool,
    user_id: Uuid,
    goal: &str,
    content: &RoadmapContent,
) -> Result<RoadmapRow, AppError> {
    let content_value = serde_json::to_value(content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize content: {e}")))?;

    let row = sqlx::query_as::<_, RoadmapRow>(
        r#"
        INSERT INTO roadmaps (id, user_id, title, description, content)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(format!("Roadmap to {goal}"))
    .bind(format!("Generated roadmap for {goal}"))
    .bind(&content_value)
    .fetch_one(pool)
    .await?;

    info!("Roadmap {} persisted for user {user_id}", row.id);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_REPLY: &str = r#"{
        "roadmap": [
            {
                "title": "Foundations",
                "description": "Core language skills",
                "topics": ["Variables", "Functions"],
                "free_resources": [
                    {"title": "Official Docs", "url": "https://docs.python.org", "type": "Article"},
                    {"title": "FreeCodeCamp", "url": "https://youtube.com/freecodecamp", "type": "Video"}
                ],
                "paid_resources": [
                    {"title": "Complete Course", "url": "https://udemy.com/python", "type": "Course"}
                ],
                "projects": [
                    {"title": "Number Guesser", "description": "Build a CLI game", "difficulty": "Beginner"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_valid_reply_passes_validation() {
        let generated: GeneratedRoadmap = serde_json::from_str(VALID_REPLY).unwrap();
        assert!(generated.validate().is_ok());
    }

    #[test]
    fn test_empty_roadmap_rejected() {
        let generated: GeneratedRoadmap = serde_json::from_str(r#"{"roadmap": []}"#).unwrap();
        assert!(generated.validate().is_err());
    }

    #[test]
    fn test_too_few_free_resources_rejected() {
        let mut generated: GeneratedRoadmap = serde_json::from_str(VALID_REPLY).unwrap();
        generated.roadmap[0].free_resources.pop();
        assert!(generated.validate().is_err());
    }

    #[test]
    fn test_too_many_projects_rejected() {
        let mut generated: GeneratedRoadmap = serde_json::from_str(VALID_REPLY).unwrap();
        let extra = generated.roadmap[0].projects[0].clone();
        generated.roadmap[0].projects.push(extra.clone());
        assert!(generated.validate().is_ok());
        generated.roadmap[0].projects.push(extra);
        assert!(generated.validate().is_err());
    }

    #[test]
    fn test_missing_paid_resource_rejected() {
        let mut generated: GeneratedRoadmap = serde_json::from_str(VALID_REPLY).unwrap();
        generated.roadmap[0].paid_resources.clear();
        assert!(generated.validate().is_err());
    }

    #[test]
    fn test_topic_ids_are_assigned_and_unique() {
        let generated: GeneratedRoadmap = serde_json::from_str(VALID_REPLY).unwrap();
        let content = generated.into_content();
        assert_eq!(content.schema_version, ROADMAP_SCHEMA_VERSION);
        assert_eq!(content.total_topics(), 2);
        let a = content.modules[0].topics[0].id;
        let b = content.modules[0].topics[1].id;
        assert_ne!(a, b);
        assert_eq!(content.modules[0].topics[0].title, "Variables");
    }
}
