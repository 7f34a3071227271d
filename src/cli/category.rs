//! Category and bounds CLI commands

use super::CliContext;
use crate::display::{format_bounds, format_category_tree};
use crate::error::ReportResult;
use crate::services::{CategoryTree, InputBounds};

/// Print the selectable category tree
pub fn handle_categories_command(ctx: &CliContext) -> ReportResult<()> {
    let store = ctx.open_store()?;
    let tree = CategoryTree::load(store.as_ref(), &ctx.settings.initial_balance)?;
    println!("{}", format_category_tree(&tree));
    Ok(())
}

/// Print the ledger's month bounds and the default report range
pub fn handle_bounds_command(ctx: &CliContext) -> ReportResult<()> {
    let store = ctx.open_store()?;
    match InputBounds::load(store.as_ref(), &ctx.settings.initial_balance)? {
        Some(bounds) => print!("{}", format_bounds(&bounds)),
        None => println!("The ledger has no records."),
    }
    Ok(())
}
