//! Command-line interface implementation for Pysuerga.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for Pysuerga.
#[derive(Parser, Debug)]
#[command(author, version, about = "Pysuerga: documentation and website builder", long_about = None)]
pub struct Args {
    /// Path to the source directory (must contain pysuerga.yml)
    #[arg(value_name = "SOURCE_PATH")]
    pub source_path: PathBuf,

    /// Directory where the output is written
    #[arg(long, default_value = "build")]
    pub target_path: PathBuf,

    /// Base url where the website is served from
    #[arg(long, default_value = "")]
    pub base_url: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
