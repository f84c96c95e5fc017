//! `sdlgen` command-line entry point.
//!
//! Loads an XML type catalog, resolves a type by name and prints its SDL.
//!
//! ```text
//! sdlgen catalog.xml User
//! RUST_LOG=sdlgen_codegen=trace sdlgen catalog.xml User
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Print the SDL of a type declared in an XML type catalog.
#[derive(Debug, Parser)]
#[command(name = "sdlgen", version, about)]
struct Cli {
    /// Path to the XML type catalog.
    catalog: PathBuf,

    /// Name of the root type to format.
    #[arg(value_name = "TYPE")]
    type_name: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("loading catalog {}", cli.catalog.display());
    let sdl = sdlgen::format_from_file(&cli.catalog, &cli.type_name).with_context(|| {
        format!(
            "failed to format '{}' from {}",
            cli.type_name,
            cli.catalog.display()
        )
    })?;

    print!("{}", sdl);
    Ok(())
}
