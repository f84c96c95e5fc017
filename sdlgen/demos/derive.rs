//! Derive example.
//!
//! Describes a small domain model with `#[derive(SdlType)]` and prints its SDL.
//!
//! Run with: cargo run --example derive

use sdlgen::prelude::*;

#[derive(SdlType)]
#[allow(dead_code)]
enum Permission {
    #[sdl(rename = "READ")]
    Read,
    #[sdl(rename = "WRITE")]
    Write,
    #[sdl(rename = "ADMIN")]
    Admin,
}

#[derive(SdlType)]
#[allow(dead_code)]
struct Role {
    #[sdl(non_null)]
    name: String,
    #[sdl(list(element = "Permission", element_non_null))]
    permissions: Vec<Permission>,
}

#[derive(SdlType)]
#[sdl(scalar = "Upload")]
#[allow(dead_code)]
struct Upload {
    bytes: Vec<u8>,
}

#[derive(SdlType)]
#[sdl(accessor(name = "getId", returns = "u64", scalar = "ID", non_null))]
#[sdl(accessor(name = "isActive", returns = "bool"))]
#[allow(dead_code)]
struct User {
    email: String,
    avatar: Option<Upload>,
    #[sdl(non_null)]
    roles: Vec<Role>,
    #[sdl(ignore)]
    password: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    print!("{}", sdlgen::format::<User>());
}
