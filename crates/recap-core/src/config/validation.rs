//! Configuration validation

use std::collections::HashSet;

use crate::error::ConfigError;

use super::types::Config;

/// Validate a loaded configuration
///
/// Each project needs a non-empty name, unique across the file, and
/// exactly one of `origin` / `path`.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for project in &config.projects {
        if project.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "projects.name".to_string(),
                message: "project name must not be empty".to_string(),
            });
        }

        if !seen.insert(project.name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "projects.name".to_string(),
                message: format!("duplicate project name: {}", project.name),
            });
        }

        match (&project.origin, &project.path) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidValue {
                    field: format!("projects.{}", project.name),
                    message: "origin and path are mutually exclusive".to_string(),
                });
            }
            (None, None) => {
                return Err(ConfigError::InvalidValue {
                    field: format!("projects.{}", project.name),
                    message: "either origin or path is required".to_string(),
                });
            }
            _ => {}
        }
    }

    if config.team_trailer.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "team_trailer".to_string(),
            message: "trailer token must not be empty".to_string(),
        });
    }

    Ok(())
}
