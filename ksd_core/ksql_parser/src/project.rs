use crate::error::ScriptError;
use crate::script::ScriptModel;
use common::config::loader::read_config;
use common::config::project::ProjectConfig;
use log::info;
use std::fs;
use std::path::PathBuf;

/// A project's script, loaded from the file its config names and parsed.
#[derive(Debug, Clone)]
pub struct ProjectScript {
    config: ProjectConfig,
    model: ScriptModel,
}

impl ProjectScript {
    pub fn load(config: &ProjectConfig) -> Result<Self, ScriptError> {
        let script = fs::read_to_string(&config.script_path)
            .map_err(|e| ScriptError::io(&config.script_path, e))?;
        let model = ScriptModel::parse(&script)?;
        info!(
            "loaded project `{}`: {} statements, {} persistent queries",
            config.name,
            model.len(),
            model.count_materializations()
        );

        Ok(Self {
            config: config.clone(),
            model,
        })
    }

    /// Reads `ksd-project.yml` from `config_dir` (or the working directory) and
    /// loads the script it names.
    pub fn from_config_dir(config_dir: Option<PathBuf>) -> Result<Self, ScriptError> {
        let config = read_config(config_dir)?;
        Self::load(&config)
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn model(&self) -> &ScriptModel {
        &self.model
    }

    /// Topics listed with the project's `topics` settings.
    pub fn topics(&self) -> Vec<&str> {
        let listing = &self.config.topics;
        self.model.all_topics(listing.sort, listing.unique)
    }

    /// Teardown statements honouring `teardown.delete_topics`.
    pub fn teardown(&self) -> Vec<String> {
        self.model.drop_statements(self.config.teardown.delete_topics)
    }
}
