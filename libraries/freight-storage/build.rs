//! Build script for freight-storage.
//!
//! Embedded migrations are read at compile time by `sqlx::migrate!`, so the
//! crate must be rebuilt whenever one changes.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
