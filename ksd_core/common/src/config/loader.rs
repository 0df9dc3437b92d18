use crate::config::error::ConfigError;
use crate::config::project::{ProjectConfig, ProjectConfigFile, PROJECT_FILE_NAME};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads `ksd-project.yml` from `config_dir`, or from the working directory when
/// no directory is given.
pub fn read_config(config_dir: Option<PathBuf>) -> Result<ProjectConfig, ConfigError> {
    let config_file_path = match config_dir {
        Some(dir) => dir.join(PROJECT_FILE_NAME),
        None => PathBuf::from(PROJECT_FILE_NAME),
    };
    if !config_file_path.exists() {
        return Err(ConfigError::incorrect_path(&config_file_path));
    }

    debug!("loading project config from {}", config_file_path.display());
    let file = fs::File::open(&config_file_path)?;
    let raw: ProjectConfigFile = serde_yaml::from_reader(file)?;

    if raw.script.trim().is_empty() {
        return Err(ConfigError::parse_error(format!(
            "project '{}' does not name a script",
            raw.name
        )));
    }

    let config_root = config_file_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let script_path = resolve_path(&config_root, Path::new(&raw.script));

    Ok(ProjectConfig::new(raw, script_path))
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
