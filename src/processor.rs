use globset::GlobSet;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Context;
use crate::constants::{HTML_EXTENSION, LAYOUT_TEMPLATE, MARKDOWN_EXTENSION};
use crate::error::Result;
use crate::markdown::render_markdown;
use crate::renderer::TemplateRenderer;

/// How a source file is carried into the output tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Render through the templating engine.
    Render,
    /// Convert from Markdown, wrap in the layout template, then render.
    RenderMarkdown,
    /// Copy byte-for-byte.
    Copy,
}

/// What processing a single file produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(PathBuf),
    Copied(PathBuf),
    Ignored,
}

/// Classifies a source file by its extension.
pub fn classify(path: &Path) -> FileAction {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext == HTML_EXTENSION => FileAction::Render,
        Some(ext) if ext == MARKDOWN_EXTENSION => FileAction::RenderMarkdown,
        _ => FileAction::Copy,
    }
}

/// Maps a relative source path to its output location. Rendered files are
/// rewritten to the markup extension; copied files keep their name.
pub fn resolve_target_path(relative_path: &Path, target_dir: &Path, action: FileAction) -> PathBuf {
    match action {
        FileAction::Render | FileAction::RenderMarkdown => {
            target_dir.join(relative_path).with_extension(HTML_EXTENSION)
        }
        FileAction::Copy => target_dir.join(relative_path),
    }
}

/// Renders or copies source files into the target tree, one at a time.
pub struct Processor<'a> {
    source_path: PathBuf,
    target_path: PathBuf,
    context: Context,
    renderer: &'a dyn TemplateRenderer,
    ignore_set: GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new(
        source_path: PathBuf,
        target_path: PathBuf,
        context: Context,
        renderer: &'a dyn TemplateRenderer,
        ignore_set: GlobSet,
    ) -> Self {
        Self { source_path, target_path, context, renderer, ignore_set }
    }

    /// Processes one file, given its path relative to the source root.
    ///
    /// Ignored paths are skipped without touching the target tree. For the
    /// rest, the output subdirectory is created as needed and the file is
    /// rendered or copied according to its extension.
    pub fn process(&self, relative_path: &Path) -> Result<Outcome> {
        if self.ignore_set.is_match(relative_path) {
            debug!("Skipping ignored file {}", relative_path.display());
            return Ok(Outcome::Ignored);
        }
        info!("Processing {}", relative_path.display());

        let action = classify(relative_path);
        let target_path = resolve_target_path(relative_path, &self.target_path, action);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let source_file = self.source_path.join(relative_path);
        match action {
            FileAction::Render => {
                let content = fs::read_to_string(&source_file)?;
                let rendered = self.renderer.render(&content, &self.context)?;
                fs::write(&target_path, rendered)?;
                Ok(Outcome::Rendered(target_path))
            }
            FileAction::RenderMarkdown => {
                let content = fs::read_to_string(&source_file)?;
                let body = render_markdown(&content);
                let rendered = self.renderer.render(&wrap_in_layout(&body), &self.context)?;
                fs::write(&target_path, rendered)?;
                Ok(Outcome::Rendered(target_path))
            }
            FileAction::Copy => {
                fs::copy(&source_file, &target_path)?;
                Ok(Outcome::Copied(target_path))
            }
        }
    }
}

// Converted Markdown always renders inside the fixed layout template.
fn wrap_in_layout(body: &str) -> String {
    format!("{{% extends \"{LAYOUT_TEMPLATE}\" %}}{{% block body %}}{body}{{% endblock %}}")
}
