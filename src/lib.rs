//! Pysuerga is a static site builder for documentation-style websites.
//! It loads a declarative configuration, enriches it with data pulled from
//! blog feeds and a source-hosting API, then renders templated pages and
//! copies static assets into a clean output directory.

/// Build driver combining all components into a complete site run
pub mod build;

/// Command-line interface module for the pysuerga application
pub mod cli;

/// Configuration loading and context enrichment
/// Parses pysuerga.yml and threads the context through the preprocessors
pub mod config;

/// Shared constant values used across the application
pub mod constants;

/// Error types and handling for the pysuerga application
pub mod error;

/// Blocking HTTP client shared by the enrichment steps
pub mod fetch;

/// Source-path ignore patterns
/// Compiles the configured ignore list into glob matchers
pub mod ignore;

/// Markdown to HTML conversion
/// Supports tables, fenced code blocks, and a table of contents
pub mod markdown;

/// Context preprocessors
/// Navbar shaping, blog aggregation, maintainer and release lookup
pub mod preprocess;

/// Per-file processing orchestration
/// Renders markup sources and copies everything else
pub mod processor;

/// Template rendering functionality backed by MiniJinja
pub mod renderer;

/// Source tree traversal yielding root-relative file paths
pub mod walker;
