//! Configuration handling for Pysuerga sites.
//! This module parses `pysuerga.yml` twice from the same document: once
//! into a typed schema validating the fields the program itself consumes,
//! and once into the open context mapping threaded through preprocessing
//! and templating. Unknown keys survive untouched in the context.

use crate::constants::{DEFAULT_GITHUB_API_URL, DEFAULT_GITHUB_REPO};
use crate::error::{Error, Result};
use crate::preprocess::Preprocessor;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// The enriched configuration mapping threaded through preprocessing and
/// templating. Created once per run, extended in place by each
/// preprocessor, never replaced wholesale.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Typed view of the configuration fields Pysuerga itself consumes.
///
/// Validation happens at load time: a missing or mistyped field aborts the
/// run with a configuration error before any network or file work starts.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub pysuerga: SiteSettings,
    pub navbar: Vec<NavbarItem>,
    pub blog: BlogSettings,
    pub maintainers: MaintainerSettings,
    #[serde(default)]
    pub github: GithubSettings,
}

/// The `pysuerga` section: where templates live and which paths to skip.
#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    /// Subdirectory of the source tree holding the layout templates
    pub templates_path: String,
    /// Relative paths (or glob patterns) excluded from processing
    pub ignore: Vec<String>,
}

/// One navbar entry as declared in configuration.
#[derive(Debug, Deserialize)]
pub struct NavbarItem {
    pub name: String,
    pub target: NavTarget,
}

/// A navbar target is either a single link or a nested list of sub-items.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NavTarget {
    Link(String),
    Subitems(Vec<NavbarItem>),
}

/// The `blog` section: feeds to aggregate and how many entries to keep.
#[derive(Debug, Deserialize)]
pub struct BlogSettings {
    pub feed: Vec<String>,
    pub num_posts: usize,
}

/// The `maintainers` section: usernames whose profiles are looked up.
#[derive(Debug, Deserialize)]
pub struct MaintainerSettings {
    pub active: Vec<String>,
}

/// The optional `github` section; defaults reproduce the upstream values.
#[derive(Debug, Deserialize)]
pub struct GithubSettings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_repo")]
    pub repo: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self { api_url: default_api_url(), repo: default_repo() }
    }
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_repo() -> String {
    DEFAULT_GITHUB_REPO.to_string()
}

/// Loads the configuration file into the typed schema and the open
/// context mapping.
///
/// # Arguments
/// * `config_path` - Path to the configuration file
///
/// # Returns
/// * `Result<(Config, Context)>` - Validated schema and the full document
///
/// # Errors
/// * `Error::Config` if the file is absent or malformed
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<(Config, Context)> {
    let config_path = config_path.as_ref();
    if !config_path.is_file() {
        return Err(Error::Config(format!(
            "configuration file not found: {}",
            config_path.display()
        )));
    }
    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(config_path)?;

    let config: Config = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("invalid configuration: {}", e)))?;
    let context: Context = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("invalid configuration: {}", e)))?;

    Ok((config, context))
}

/// Loads the context and runs the preprocessor pipeline over it.
///
/// `overrides` entries (such as the driver's `base_url`) are merged into
/// the context before the pipeline runs. Each preprocessor must hand back
/// a non-empty mapping; an empty one aborts with a contract violation
/// naming the offending step.
pub fn load_context<P: AsRef<Path>>(
    config_path: P,
    preprocessors: &[Box<dyn Preprocessor>],
    overrides: Context,
) -> Result<(Config, Context)> {
    let (config, mut context) = load_config(config_path)?;

    for (key, value) in overrides {
        context.insert(key, value);
    }

    for preprocessor in preprocessors {
        debug!("Running preprocessor '{}'", preprocessor.name());
        context = preprocessor.process(&config, context)?;
        if context.is_empty() {
            return Err(Error::EmptyContext { preprocessor: preprocessor.name() });
        }
    }

    Ok((config, context))
}
