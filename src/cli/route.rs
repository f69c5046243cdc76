//! CLI route: one handler per command, each a thin call into the library.

use super::output::CliError;
use super::parse::Commands;
use crate::config::{ConfigLoader, OutlineConfig};
use crate::state::PipelineState;
use crate::strategy::{build_context, ContentStrategist, ContextInputs};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolved configuration for one CLI invocation.
pub struct RunContext {
    config: OutlineConfig,
}

impl RunContext {
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: OutlineConfig) -> Self {
        Self { config }
    }

    /// Execute a command. Returns text for stdout, empty when output went to a file.
    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Generate { input, output } => self.handle_generate(input, output.as_deref()),
            Commands::Context { input } => {
                let state = read_state(input)?;
                Ok(build_context(&state.keywords, ContextInputs::from_state(&state))?)
            }
        }
    }

    fn handle_generate(&self, input: &Path, output: Option<&Path>) -> Result<String, CliError> {
        self.config.ensure_valid()?;
        let mut state = read_state(input)?;
        let strategist = ContentStrategist::from_config(&self.config)?;

        let rt = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
        rt.block_on(strategist.run(&mut state))?;
        info!(
            errors = state.errors.len(),
            confidence = ?state.confidence(crate::state::CONTENT_STRATEGY_STAGE),
            "Pipeline state updated"
        );

        let rendered = serde_json::to_string_pretty(&state).map_err(CliError::Encode)?;
        match output {
            Some(path) => {
                std::fs::write(path, rendered).map_err(|source| CliError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(String::new())
            }
            None => Ok(rendered),
        }
    }
}

fn read_state(path: &Path) -> Result<PipelineState, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::InvalidState {
        path: path.to_path_buf(),
        source,
    })
}
