//! Common constants used throughout the Pysuerga application.

/// Configuration file name, expected inside the source directory
pub const CONFIG_FILE: &str = "pysuerga.yml";

/// Layout template wrapped around converted Markdown bodies
pub const LAYOUT_TEMPLATE: &str = "layout.html";

/// Extension of sources rendered through the template engine as-is
pub const HTML_EXTENSION: &str = "html";

/// Extension of sources converted from Markdown before rendering
pub const MARKDOWN_EXTENSION: &str = "md";

/// GitHub API root used when the `github` section is omitted
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Repository whose releases are listed when the `github` section is omitted
pub const DEFAULT_GITHUB_REPO: &str = "pandas-dev/pandas";

/// User-Agent sent with every request; the GitHub API rejects anonymous agents
pub const USER_AGENT: &str = concat!("pysuerga/", env!("CARGO_PKG_VERSION"));
