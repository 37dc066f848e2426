//! Backups command implementation

use anyhow::Result;
use chrono::Utc;

use crate::cli::BackupsArgs;
use crate::config::Config;
use crate::display::{format_backups, Message};

/// Run the backups command
pub fn run(args: BackupsArgs, config: &Config) -> Result<()> {
    let locale = config.display.locale;
    let mut browser = super::connect(config)?;

    let backups = match browser.list_backups() {
        Ok(backups) => backups,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list backups");
            anyhow::bail!("{}: {}", locale.text(Message::ErrorLoadingBackups), e);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(backups)?);
    } else {
        print!("{}", format_backups(backups, Utc::now(), locale));
    }

    Ok(())
}
