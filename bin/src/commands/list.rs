//! List command implementation.

use anyhow::Result;
use ratedata_lib::prelude::*;
use std::path::PathBuf;

/// List known currency pairs with the range of days stored under `data_root`.
pub(crate) fn list_symbols(data_root: PathBuf) -> Result<()> {
    let layout = DataLayout::new(data_root);
    let symbols = Symbol::known();

    println!(
        "{:<10} {:<10} {:>6}  {:<10}  {:<10}",
        "SYMBOL", "PAIR", "DAYS", "FIRST", "LAST"
    );
    println!("{}", "-".repeat(54));

    for symbol in &symbols {
        let days = layout.stored_days(symbol)?;
        let first = days.first().map_or_else(|| "-".to_string(), ToString::to_string);
        let last = days.last().map_or_else(|| "-".to_string(), ToString::to_string);
        println!(
            "{:<10} {:<10} {:>6}  {:<10}  {:<10}",
            symbol.as_str(),
            symbol.display_name(),
            days.len(),
            first,
            last
        );
    }

    println!("\nTotal: {} symbols", symbols.len());
    Ok(())
}
