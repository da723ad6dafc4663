//! Pysuerga's main application entry point.
//! Handles command-line argument parsing, logger configuration, and
//! delegates the actual build to the library.

use pysuerga::{
    build::build_site,
    cli::{get_args, Args},
    error::{default_error_handler, Result},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    build_site(&args)?;
    println!("Site generated in {}.", args.target_path.display());
    Ok(())
}
