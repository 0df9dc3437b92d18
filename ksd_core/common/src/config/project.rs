use serde::Deserialize;
use std::path::PathBuf;

pub const PROJECT_FILE_NAME: &str = "ksd-project.yml";

// ---------------- ksd Project Config ----------------
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfigFile {
    pub name: String,
    pub script: String,
    #[serde(default)]
    pub teardown: TeardownConfig,
    #[serde(default)]
    pub topics: TopicListingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeardownConfig {
    /// Append `DELETE TOPIC` to drops of create-as-select objects.
    #[serde(default)]
    pub delete_topics: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TopicListingConfig {
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub unique: bool,
}

/// Project config with the script path resolved against the config file's directory.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub name: String,
    pub script_path: PathBuf,
    pub teardown: TeardownConfig,
    pub topics: TopicListingConfig,
}

impl ProjectConfig {
    pub fn new(file: ProjectConfigFile, script_path: PathBuf) -> Self {
        Self {
            name: file.name,
            script_path,
            teardown: file.teardown,
            topics: file.topics,
        }
    }
}
