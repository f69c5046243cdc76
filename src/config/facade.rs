//! Entry point for loading configuration.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::OutlineConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Sources are applied in this order, later ones winning:
    /// 1. Built-in defaults
    /// 2. `$XDG_CONFIG_HOME/seo-outline/config.toml`
    /// 3. `{workspace_root}/config/config.toml`
    /// 4. `{workspace_root}/config/{SEO_OUTLINE_ENV}.toml`
    /// 5. `SEO_OUTLINE__*` environment variables
    pub fn load(workspace_root: &Path) -> Result<OutlineConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(merge_policy::environment_source());

        let config: OutlineConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            provider = ?config.provider.provider_type,
            model = %config.provider.model,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<OutlineConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
