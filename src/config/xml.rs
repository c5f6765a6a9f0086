//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a template on request, through the crate's own no-overwrite writer.
//!
//! Notes:
//! - A missing config file means defaults; it is never created implicitly.
//! - Unknown XML fields are a hard error to surface misconfigurations early.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use crate::config::types::{Config, LogLevel};
use crate::fs_ops::{AppFiles, AtomicFileWriter, WriteMode};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "root")]
    root: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "durable", default, deserialize_with = "de_bool_trimmed_opt")]
    durable: Option<bool>,
}

// Tolerate surrounding whitespace around true/false
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<bool>().ok()))
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(PathBuf::from)
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();
    cfg.root = non_empty_path(parsed.root.as_deref());
    cfg.log_file = non_empty_path(parsed.log_file.as_deref());
    if let Some(level) = parsed.log_level.as_deref().and_then(|s| s.trim().parse::<LogLevel>().ok()) {
        cfg.log_level = level;
    }
    if let Some(durable) = parsed.durable {
        cfg.durable = durable;
    }
    cfg
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load from `$APP_FILES_CONFIG` or the default location; defaults if missing.
pub fn load_config() -> Result<Config> {
    let path = default_config_path().context("resolve config path")?;
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(Config::default());
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), ?cfg, "Loaded config");
    Ok(cfg)
}

/// Template contents with commented field descriptions.
pub fn template_xml() -> String {
    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/app_files.log".into());
    format!(
        "<!--\n  app_files configuration (XML)\n\n    root       -> optional sandbox; every logical directory lives at <root>/<name>\n    log_level  -> quiet | normal | info | debug\n    log_file   -> path to log file (optional; stdout still used)\n    durable    -> fsync temp files and directories around each publish (true/false)\n\n  CLI flags override XML values.\n-->\n<config>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <durable>true</durable>\n</config>\n",
        suggested_log
    )
}

/// Write the template to `path`; refuses to overwrite an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!("Refusing to create config: ancestor of {} is a symlink", path.display());
    }
    AppFiles::system()
        .write_atomic(template_xml().as_bytes(), path, WriteMode::CreateNew)
        .with_context(|| format!("create template config '{}'", path.display()))?;
    info!("Created template config at {}", path.display());
    Ok(())
}
