//! Catalog example.
//!
//! Loads `demos/catalog.xml`, resolves it into a registry and prints the SDL
//! of every object type it declares.
//!
//! Run with: cargo run --example catalog

use sdlgen::prelude::*;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("catalog.xml");
    let catalog = parse_catalog_file(&path)?;
    let registry = TypeRegistry::from_catalog(&catalog)?;

    for name in ["User", "Role"] {
        println!("# {}", name);
        print!("{}", format_schema_type_by_name(&registry, name)?);
        println!();
    }

    Ok(())
}
