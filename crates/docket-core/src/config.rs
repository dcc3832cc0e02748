//! Tracker configuration: ceilings, status vocabulary and name collation.

use std::{fmt, str::FromStr};

use crate::{
    error::{Result, TrackerError},
    models::StatusSet,
};

/// Default project ceiling (`MAX_NUMBER_OF_PROJECTS`).
pub const DEFAULT_MAX_PROJECTS: u64 = 5;

/// Default per-project task ceiling (`MAX_NUMBER_OF_TASKS`).
pub const DEFAULT_MAX_TASKS_PER_PROJECT: u64 = 20;

/// How project names are compared for uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCollation {
    /// `Work` and `work` collide
    #[default]
    CaseInsensitive,
    /// Only byte-equal names collide
    CaseSensitive,
}

impl NameCollation {
    /// Computes the uniqueness key for a (trimmed) project name.
    pub fn key(&self, name: &str) -> String {
        match self {
            Self::CaseInsensitive => name.trim().to_lowercase(),
            Self::CaseSensitive => name.trim().to_string(),
        }
    }
}

impl FromStr for NameCollation {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "insensitive" | "case-insensitive" => Ok(Self::CaseInsensitive),
            "sensitive" | "case-sensitive" => Ok(Self::CaseSensitive),
            other => Err(TrackerError::configuration(format!(
                "unknown name collation '{other}' (expected 'insensitive' or 'sensitive')"
            ))),
        }
    }
}

impl fmt::Display for NameCollation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaseInsensitive => write!(f, "insensitive"),
            Self::CaseSensitive => write!(f, "sensitive"),
        }
    }
}

/// Business-rule configuration shared by the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of projects in the store
    pub max_projects: u64,
    /// Maximum number of tasks in a single project
    pub max_tasks_per_project: u64,
    /// Allowed task statuses
    pub allowed_statuses: StatusSet,
    /// Project name comparison rule
    pub name_collation: NameCollation,
}

impl Config {
    /// Sets the project ceiling.
    pub fn with_max_projects(mut self, max: u64) -> Self {
        self.max_projects = max;
        self
    }

    /// Sets the per-project task ceiling.
    pub fn with_max_tasks_per_project(mut self, max: u64) -> Self {
        self.max_tasks_per_project = max;
        self
    }

    /// Replaces the allowed status set.
    pub fn with_allowed_statuses(mut self, statuses: StatusSet) -> Self {
        self.allowed_statuses = statuses;
        self
    }

    /// Sets the name collation.
    pub fn with_name_collation(mut self, collation: NameCollation) -> Self {
        self.name_collation = collation;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_projects: DEFAULT_MAX_PROJECTS,
            max_tasks_per_project: DEFAULT_MAX_TASKS_PER_PROJECT,
            allowed_statuses: StatusSet::default(),
            name_collation: NameCollation::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collation_keys() {
        assert_eq!(NameCollation::CaseInsensitive.key(" Work "), "work");
        assert_eq!(NameCollation::CaseSensitive.key(" Work "), "Work");
    }

    #[test]
    fn test_collation_from_str() {
        assert_eq!(
            "Insensitive".parse::<NameCollation>().unwrap(),
            NameCollation::CaseInsensitive
        );
        assert_eq!(
            "case-sensitive".parse::<NameCollation>().unwrap(),
            NameCollation::CaseSensitive
        );
        assert!("fuzzy".parse::<NameCollation>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_projects, 5);
        assert_eq!(config.max_tasks_per_project, 20);
        assert_eq!(config.allowed_statuses.to_string(), "todo, doing, done");
    }
}
