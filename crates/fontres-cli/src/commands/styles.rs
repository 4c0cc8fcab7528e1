//! Styles command implementation
//!
//! Shows what one family offers: styles, bitmap sizes, pitch, scalability
//! and writing-system coverage.

use fontres_core::WritingSystem;
use fontres_db::query;
use serde::Serialize;

use crate::cli::{Cli, StylesArgs};
use crate::commands::{open_context, print_json};
use crate::error::{CliError, Result};

#[derive(Serialize)]
struct FamilyReport {
    family: String,
    styles: Vec<String>,
    fixed_pitch: bool,
    smoothly_scalable: bool,
    bitmap_scalable: bool,
    pixel_sizes: Vec<u16>,
    writing_systems: Vec<WritingSystem>,
}

pub fn run(cli: &Cli, args: &StylesArgs) -> Result<()> {
    let mut context = open_context(cli)?;
    let catalog = context.populated_catalog()?;
    let family = catalog
        .family(&args.family)
        .ok_or_else(|| CliError::Invalid(format!("unknown family '{}'", args.family)))?;
    let name = family.name();

    let report = FamilyReport {
        family: name.to_string(),
        styles: query::styles(catalog, name),
        fixed_pitch: query::is_fixed_pitch(catalog, name),
        smoothly_scalable: query::is_smoothly_scalable(catalog, name, None),
        bitmap_scalable: query::is_bitmap_scalable(catalog, name, None),
        pixel_sizes: query::pixel_sizes(catalog, name, None),
        writing_systems: query::writing_systems(catalog, name),
    };

    if cli.json {
        return print_json(&report);
    }

    println!("{}", report.family);
    println!("  styles:          {}", report.styles.join(", "));
    println!("  fixed pitch:     {}", report.fixed_pitch);
    println!("  scalable:        {}", query::is_scalable(catalog, name, None));
    if !report.pixel_sizes.is_empty() {
        let sizes: Vec<String> = report.pixel_sizes.iter().map(u16::to_string).collect();
        println!("  bitmap sizes:    {}", sizes.join(", "));
    }
    let systems: Vec<&str> = report.writing_systems.iter().map(|ws| ws.name()).collect();
    println!("  writing systems: {}", systems.join(", "));
    Ok(())
}
