//! Challenge catalog — a read-only configuration data source, injected into
//! `AppState` at startup. The embedded catalog ships with the binary; an
//! operator can point `CHALLENGE_CATALOG_PATH` at a replacement file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// The embedded default catalog.
const DEFAULT_CATALOG: &str = include_str!("../../data/challenges.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub description: String,
    pub starter_code: String,
    pub language: String,
    pub xp: i32,
    /// Free-text grading criteria handed verbatim to the LLM grader.
    pub test_criteria: String,
}

#[derive(Debug, Clone)]
pub struct ChallengeCatalog {
    challenges: Vec<Challenge>,
}

impl ChallengeCatalog {
    /// Loads the catalog from `path` when given, otherwise the embedded one.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let raw = match path {
            Some(p) => std::fs::read_to_string(p)
                .with_context(|| format!("Failed to read challenge catalog at '{p}'"))?,
            None => DEFAULT_CATALOG.to_string(),
        };
        Self::from_json(&raw)
    }

    fn from_json(raw: &str) -> Result<Self> {
        let challenges: Vec<Challenge> =
            serde_json::from_str(raw).context("Malformed challenge catalog JSON")?;

        if challenges.is_empty() {
            bail!("Challenge catalog is empty");
        }
        for (i, c) in challenges.iter().enumerate() {
            if challenges[..i].iter().any(|other| other.id == c.id) {
                bail!("Duplicate challenge id '{}'", c.id);
            }
        }

        Ok(Self { challenges })
    }

    pub fn all(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = ChallengeCatalog::load(None).unwrap();
        assert_eq!(catalog.all().len(), 8);
    }

    #[test]
    fn test_fizzbuzz_entry() {
        let catalog = ChallengeCatalog::load(None).unwrap();
        let challenge = catalog.get("4").unwrap();
        assert_eq!(challenge.title, "FizzBuzz");
        assert_eq!(challenge.xp, 40);
        assert!(challenge.test_criteria.contains("['1','2','Fizz']"));
    }

    #[test]
    fn test_unknown_id_is_none() {
        let catalog = ChallengeCatalog::load(None).unwrap();
        assert!(catalog.get("999").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let raw = r#"[
            {"id": "1", "title": "A", "difficulty": "Easy", "description": "d",
             "starter_code": "s", "language": "python", "xp": 10, "test_criteria": "t"},
            {"id": "1", "title": "B", "difficulty": "Easy", "description": "d",
             "starter_code": "s", "language": "python", "xp": 10, "test_criteria": "t"}
        ]"#;
        assert!(ChallengeCatalog::from_json(raw).is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(ChallengeCatalog::from_json("[]").is_err());
    }
}
