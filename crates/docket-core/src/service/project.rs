//! Project lifecycle rules.

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    config::Config,
    error::{Result, TrackerError},
    models::{
        text::{optional_text, required_text, MAX_DESCRIPTION_WORDS, MAX_NAME_WORDS},
        Project,
    },
    store::{NewProject, Repository, Store},
};

/// Creates, edits, deletes and reads projects.
#[derive(Debug)]
pub struct ProjectService<'a, S> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: Store> ProjectService<'a, S> {
    /// Creates a service over `store` governed by `config`.
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is empty or a field exceeds its word limit
    /// - `DuplicateName` if a project with an equal name exists
    /// - `CapacityExceeded` if the project ceiling is reached
    pub fn create(&self, name: &str, description: Option<&str>) -> Result<Project> {
        let name = required_text("name", name, MAX_NAME_WORDS)?;
        let description = optional_text("description", description, MAX_DESCRIPTION_WORDS)?;
        let name_key = self.config.name_collation.key(&name);
        let max_projects = self.config.max_projects;

        let project = self.store.atomically(|repo| {
            ensure_name_available(repo, &name, &name_key, None)?;

            if repo.count_projects()? >= max_projects {
                return Err(TrackerError::CapacityExceeded {
                    resource: "projects",
                    limit: max_projects,
                });
            }

            repo.insert_project(&NewProject {
                name: &name,
                name_key: &name_key,
                description: description.as_deref(),
                created_at: Timestamp::now(),
            })
        })?;

        info!("Created project {} '{}'", project.id, project.name);
        Ok(project)
    }

    /// Edits a project's name and/or description.
    ///
    /// Omitted fields are unchanged; an empty description clears it. Editing
    /// without any change succeeds and returns the project as stored.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the project does not exist
    /// - `Validation` for an invalid supplied field
    /// - `DuplicateName` if the new name collides with another project
    pub fn edit(&self, id: u64, name: Option<&str>, description: Option<&str>) -> Result<Project> {
        let name = name
            .map(|raw| required_text("name", raw, MAX_NAME_WORDS))
            .transpose()?;
        let description = description
            .map(|raw| optional_text("description", Some(raw), MAX_DESCRIPTION_WORDS))
            .transpose()?;

        let project = self.store.atomically(|repo| {
            let mut project = repo
                .get_project(id)?
                .ok_or(TrackerError::ProjectNotFound { id })?;

            if let Some(name) = name {
                let name_key = self.config.name_collation.key(&name);
                ensure_name_available(repo, &name, &name_key, Some(id))?;
                project.name = name;
            }
            if let Some(description) = description {
                project.description = description;
            }

            let name_key = self.config.name_collation.key(&project.name);
            repo.update_project(&project, &name_key)?;
            Ok(project)
        })?;

        info!("Updated project {}", project.id);
        Ok(project)
    }

    /// Deletes a project together with all its tasks.
    ///
    /// Returns the project as it was before deletion, tasks included.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist.
    pub fn delete(&self, id: u64) -> Result<Project> {
        let project = self.store.atomically(|repo| {
            let project = repo
                .get_project(id)?
                .ok_or(TrackerError::ProjectNotFound { id })?;
            repo.delete_project(id)?;
            Ok(project)
        })?;

        info!(
            "Deleted project {} and {} task(s)",
            project.id,
            project.tasks.len()
        );
        Ok(project)
    }

    /// Retrieves a project with its tasks.
    pub fn get(&self, id: u64) -> Result<Option<Project>> {
        self.store.atomically(|repo| repo.get_project(id))
    }

    /// Lists all projects by ascending id, tasks loaded.
    pub fn list(&self) -> Result<Vec<Project>> {
        let projects = self.store.atomically(|repo| repo.list_projects())?;
        debug!("Listed {} project(s)", projects.len());
        Ok(projects)
    }
}

fn ensure_name_available(
    repo: &dyn Repository,
    name: &str,
    name_key: &str,
    editing: Option<u64>,
) -> Result<()> {
    match repo.find_project_by_name_key(name_key)? {
        Some(existing) if Some(existing.id) != editing => Err(TrackerError::DuplicateName {
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}
