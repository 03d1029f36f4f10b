//! # Types Subcommand
//!
//! Lists the concrete types of the GeoJSON registry with their members.

use anyhow::Result;
use geoj_model::registry;

/// One line per concrete type: `Name: member, member, ...`.
pub fn type_listing() -> Vec<String> {
    let registry = registry();
    registry
        .concrete_names()
        .filter_map(|name| registry.get(name))
        .map(|schema| format!("{}: {}", schema.name(), schema.field_names().join(", ")))
        .collect()
}

/// Execute the types subcommand. Always exits 0.
pub fn run_types() -> Result<u8> {
    for line in type_listing() {
        println!("{line}");
    }
    Ok(0)
}
