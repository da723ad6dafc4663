//! Build driver.
//!
//! Orchestrates a complete run: reset the output directory, load and
//! enrich the context, then walk the source tree rendering or copying
//! every file. Progress lines go to the diagnostic stream as each stage
//! begins.

use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;

use crate::cli::Args;
use crate::config::{load_context, Context};
use crate::constants::CONFIG_FILE;
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::ignore::build_ignore_set;
use crate::preprocess::default_preprocessors;
use crate::processor::{Outcome, Processor};
use crate::renderer::MiniJinjaRenderer;
use crate::walker::walk_source_files;

/// Builds the site from `args.source_path` into `args.target_path`.
pub fn build_site(args: &Args) -> Result<()> {
    let config_path = args.source_path.join(CONFIG_FILE);

    reset_target_dir(&args.target_path)?;

    info!("Generating context...");
    let client = HttpClient::new()?;
    let preprocessors = default_preprocessors(&client);
    let mut overrides = Context::new();
    overrides.insert(
        "base_url".to_string(),
        serde_json::Value::String(args.base_url.clone()),
    );
    let (config, context) = load_context(&config_path, &preprocessors, overrides)?;
    info!("Context generated");

    let templates_path = args.source_path.join(&config.pysuerga.templates_path);
    let renderer = MiniJinjaRenderer::new(templates_path);
    let ignore_set = build_ignore_set(&config.pysuerga.ignore)?;
    let processor = Processor::new(
        args.source_path.clone(),
        args.target_path.clone(),
        context,
        &renderer,
        ignore_set,
    );

    for entry in walk_source_files(&args.source_path) {
        match processor.process(&entry?)? {
            Outcome::Rendered(target) => debug!("Rendered: '{}'", target.display()),
            Outcome::Copied(target) => debug!("Copied: '{}'", target.display()),
            // Skipped files are logged by the processor itself.
            Outcome::Ignored => {}
        }
    }

    Ok(())
}

/// Clears and recreates the output directory. Prior output is never
/// merged with a new build.
fn reset_target_dir(target_path: &Path) -> Result<()> {
    match fs::remove_dir_all(target_path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    fs::create_dir_all(target_path)?;
    Ok(())
}
