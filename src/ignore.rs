//! Ignore pattern handling for the source tree.
//! Paths listed under `pysuerga.ignore` in the configuration are skipped
//! during processing and never reach the output directory.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiles the configured ignore list into a set of glob patterns.
///
/// # Arguments
/// * `patterns` - Glob patterns from `pysuerga.ignore`
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns for path matching
///
/// # Notes
/// - A literal path such as `pysuerga.yml` matches exactly that path
/// - Invalid patterns will result in an `Error::IgnorePattern`
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::IgnorePattern(format!("invalid pattern '{pattern}': {e}")))?,
        );
    }
    builder
        .build()
        .map_err(|e| Error::IgnorePattern(format!("ignore list failed to compile: {e}")))
}
