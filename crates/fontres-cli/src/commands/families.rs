//! Families command implementation

use fontres_db::query;

use crate::cli::{Cli, FamiliesArgs};
use crate::commands::{open_context, print_json};
use crate::error::Result;

pub fn run(cli: &Cli, args: &FamiliesArgs) -> Result<()> {
    let mut context = open_context(cli)?;
    let catalog = context.populated_catalog()?;
    let families = query::families(catalog, args.writing_system);

    if cli.json {
        return print_json(&families);
    }
    for family in &families {
        println!("{family}");
    }
    Ok(())
}
