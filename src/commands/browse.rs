//! Ls and tree command implementations

use anyhow::Result;
use chrono::Utc;

use crate::cli::{LsArgs, TreeArgs};
use crate::config::Config;
use crate::display::{format_listing, format_tree, FormatOptions, SummarizedEntry};
use crate::error::BrowserError;

/// Run the ls command
pub fn run_ls(args: LsArgs, config: &Config) -> Result<()> {
    let locale = config.display.locale;
    let mut browser = super::connect(config)?;
    super::open_backup(&mut browser, &args.backup)?;

    if browser.navigate(&args.path).is_none() {
        return Err(BrowserError::PathNotFound(args.path).into());
    }

    let entries = browser.entries();

    if args.json {
        let summary: Vec<SummarizedEntry> = entries
            .iter()
            .map(|e| SummarizedEntry::from_node(e, browser.selection()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!(
            "{}",
            format_listing(&entries, browser.selection(), Utc::now(), locale)
        );
    }

    Ok(())
}

/// Run the tree command
pub fn run_tree(args: TreeArgs, config: &Config) -> Result<()> {
    let mut browser = super::connect(config)?;
    super::open_backup(&mut browser, &args.backup)?;

    let node = browser
        .resolve(&args.path)
        .ok_or_else(|| BrowserError::PathNotFound(args.path.clone()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(node)?);
        return Ok(());
    }

    let mut options = FormatOptions::new()
        .with_max_depth(args.max_depth)
        .with_sizes(!args.no_sizes);
    options.top_n = args.top;
    print!("{}", format_tree(node, &options));

    println!();
    println!(
        "Total: {} in {} files",
        crate::display::format_bytes(node.total_size()),
        node.file_count()
    );

    Ok(())
}
