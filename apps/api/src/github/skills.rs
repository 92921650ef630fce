//! Skill classification — pluggable, trait-based strategy over repository
//! metadata.
//!
//! Default: `SubstringSkillMatcher`, the substring heuristics the product
//! shipped with. Matching free text this way is inherently fuzzy; the
//! false-positive/negative tolerance is a product decision, and the trait
//! exists so a smarter classifier can be swapped in without touching the
//! handler.

use std::collections::HashMap;

use serde::Serialize;

use crate::github::client::GithubRepo;

/// Result of scanning a user's public repositories.
#[derive(Debug, Clone, Serialize)]
pub struct SkillAnalysis {
    pub username: String,
    pub repo_count: usize,
    pub detected_skills: Vec<String>,
    /// The 3 most frequent primary languages with their repo counts.
    pub top_languages: Vec<(String, usize)>,
}

/// Skill classification strategy. Carried in `AppState` as
/// `Arc<dyn SkillMatcher>`.
pub trait SkillMatcher: Send + Sync {
    /// Derives skill tags from repository metadata.
    fn detect_skills(&self, repos: &[GithubRepo]) -> Vec<String>;

    /// Whether a detected skill counts as covering a roadmap topic.
    fn matches_topic(&self, skill: &str, topic: &str) -> bool;
}

/// The default heuristic matcher: primary languages, repo topic tags, and
/// keyword scans over repo descriptions.
pub struct SubstringSkillMatcher;

impl SkillMatcher for SubstringSkillMatcher {
    fn detect_skills(&self, repos: &[GithubRepo]) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();

        for repo in repos {
            if let Some(language) = &repo.language {
                skills.push(language.clone());
            }
            for topic in &repo.topics {
                skills.push(topic.to_lowercase());
            }

            let desc = repo.description.as_deref().unwrap_or("").to_lowercase();
            if desc.contains("react") || desc.contains("nextjs") {
                skills.push("React".to_string());
            }
            if desc.contains("django") || desc.contains("fastapi") {
                skills.push("Python Frameworks".to_string());
            }
            if desc.contains("docker") {
                skills.push("Docker".to_string());
            }
        }

        skills.sort();
        skills.dedup();
        skills
    }

    fn matches_topic(&self, skill: &str, topic: &str) -> bool {
        let skill = skill.to_lowercase();
        let topic = topic.to_lowercase();
        topic.contains(&skill) || skill.contains(&topic)
    }
}

/// Runs skill detection and computes the language frequency table.
pub fn analyze(matcher: &dyn SkillMatcher, username: &str, repos: &[GithubRepo]) -> SkillAnalysis {
    let detected_skills = matcher.detect_skills(repos);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for repo in repos {
        if let Some(language) = &repo.language {
            *counts.entry(language.as_str()).or_default() += 1;
        }
    }
    let mut top_languages: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(lang, n)| (lang.to_string(), n))
        .collect();
    // Count descending, name ascending for a stable order.
    top_languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_languages.truncate(3);

    SkillAnalysis {
        username: username.to_string(),
        repo_count: repos.len(),
        detected_skills,
        top_languages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, language: Option<&str>, topics: &[&str], desc: Option<&str>) -> GithubRepo {
        GithubRepo {
            name: name.to_string(),
            language: language.map(String::from),
            topics: topics.iter().map(|t| t.to_string()).collect(),
            description: desc.map(String::from),
        }
    }

    #[test]
    fn test_detects_language_topics_and_description_keywords() {
        let repos = vec![
            repo("site", Some("TypeScript"), &["NextJS"], Some("My React portfolio")),
            repo("api", Some("Python"), &[], Some("A FastAPI service in Docker")),
        ];
        let skills = SubstringSkillMatcher.detect_skills(&repos);
        assert!(skills.contains(&"TypeScript".to_string()));
        assert!(skills.contains(&"nextjs".to_string()));
        assert!(skills.contains(&"React".to_string()));
        assert!(skills.contains(&"Python Frameworks".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_detected_skills_deduplicated() {
        let repos = vec![
            repo("a", Some("Rust"), &[], None),
            repo("b", Some("Rust"), &[], None),
        ];
        let skills = SubstringSkillMatcher.detect_skills(&repos);
        assert_eq!(skills.iter().filter(|s| *s == "Rust").count(), 1);
    }

    #[test]
    fn test_topic_match_is_case_insensitive_both_directions() {
        let matcher = SubstringSkillMatcher;
        assert!(matcher.matches_topic("react", "React Hooks"));
        assert!(matcher.matches_topic("React Hooks", "react"));
        assert!(!matcher.matches_topic("docker", "Kubernetes Basics"));
    }

    #[test]
    fn test_top_languages_ranked_and_truncated() {
        let repos = vec![
            repo("a", Some("Rust"), &[], None),
            repo("b", Some("Rust"), &[], None),
            repo("c", Some("Python"), &[], None),
            repo("d", Some("Go"), &[], None),
            repo("e", Some("C"), &[], None),
            repo("f", None, &[], None),
        ];
        let analysis = analyze(&SubstringSkillMatcher, "octocat", &repos);
        assert_eq!(analysis.repo_count, 6);
        assert_eq!(analysis.top_languages.len(), 3);
        assert_eq!(analysis.top_languages[0], ("Rust".to_string(), 2));
        // Ties broken alphabetically.
        assert_eq!(analysis.top_languages[1].1, 1);
        assert_eq!(analysis.top_languages[1].0, "C");
    }
}
