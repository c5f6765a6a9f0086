//! Config validation logic.
//! Checks the sandbox root and log file location before anything is written.

use anyhow::{bail, Result};
use tracing::{debug, info};

use super::paths::path_has_symlink_ancestor;
use super::types::Config;

impl Config {
    /// Reject settings that would make every later operation fail.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            if root.exists() && !root.is_dir() {
                bail!("root '{}' exists but is not a directory", root.display());
            }
            debug!(root = %root.display(), "Sandbox root accepted");
        }

        if let Some(log) = &self.log_file {
            if log.is_dir() {
                bail!("log_file '{}' is a directory", log.display());
            }
            if path_has_symlink_ancestor(log)? {
                bail!("log_file '{}' has a symlinked ancestor", log.display());
            }
        }

        info!(
            root = %self.root.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "<system>".into()),
            log_level = %self.log_level,
            durable = self.durable,
            "Config validated"
        );
        Ok(())
    }
}
