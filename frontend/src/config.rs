//! Startup configuration: the embedded `explorer.toml` and the initial
//! project taken from the page URL.

use shared::{ExplorerConfig, Project};

const EMBEDDED_CONFIG: &str = include_str!("../explorer.toml");

/// Parsed embedded config, or defaults when it is unusable.
pub fn load() -> ExplorerConfig {
    match ExplorerConfig::from_toml_str(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(error) => {
            log::warn!("{error}; using default configuration");
            ExplorerConfig::default()
        }
    }
}

/// Project named by `project_id` / `project_name` query parameters.
pub fn initial_project() -> Option<Project> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    project_from_params(params.get("project_id"), params.get("project_name"))
}

pub fn project_from_params(id: Option<String>, name: Option<String>) -> Option<Project> {
    let id = id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())?;
    let name = name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.clone());
    Some(Project::new(id, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = ExplorerConfig::from_toml_str(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "/api/files");
        assert_eq!(config.ui.toast_dismiss_ms, 3000);
    }

    #[test]
    fn project_params() {
        assert_eq!(project_from_params(None, Some("Orphan".into())), None);
        assert_eq!(project_from_params(Some("  ".into()), None), None);
        assert_eq!(
            project_from_params(Some("p-7".into()), None),
            Some(Project::new("p-7", "p-7"))
        );
        assert_eq!(
            project_from_params(Some("p-7".into()), Some("Thesis".into())),
            Some(Project::new("p-7", "Thesis"))
        );
    }
}
