//! Download commands implementation

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{DownloadArgs, DownloadManyArgs};
use crate::config::Config;
use crate::display::{format_bytes, Message};
use crate::error::BrowserError;

/// Run the download command
pub fn run(args: DownloadArgs, config: &Config) -> Result<()> {
    let locale = config.display.locale;
    let mut browser = super::connect(config)?;
    super::open_backup(&mut browser, &args.backup)?;

    match browser.resolve(&args.file) {
        Some(node) if !node.is_dir => {}
        Some(_) => anyhow::bail!(
            "'{}' is a directory; use download-many to fetch it as an archive",
            args.file
        ),
        None => return Err(BrowserError::PathNotFound(args.file).into()),
    }

    let request = browser.request_download(&args.file)?;
    let target = args
        .output
        .unwrap_or_else(|| config.download.directory.join(&request.file_name));

    let written = write_to(&target, |out| browser.download(&args.file, out))
        .map_err(|e| anyhow::anyhow!("{}: {}", e.user_message(locale), e))?;

    println!(
        "{} {} ({})",
        locale.text(Message::Saved),
        target.display(),
        format_bytes(written)
    );
    Ok(())
}

/// Run the download-many command
pub fn run_many(args: DownloadManyArgs, config: &Config) -> Result<()> {
    let locale = config.display.locale;
    let mut browser = super::connect(config)?;
    super::open_backup(&mut browser, &args.backup)?;

    for path in &args.paths {
        if browser.resolve(path).is_none() {
            return Err(BrowserError::PathNotFound(path.clone()).into());
        }
        browser.select(path);
    }

    let request = browser.request_bulk_download()?;
    let target = args
        .output
        .unwrap_or_else(|| config.download.directory.join(request.archive_name(Utc::now())));

    let written = write_to(&target, |out| browser.download_selection(out))
        .map_err(|e| anyhow::anyhow!("{}: {}", e.user_message(locale), e))?;

    println!(
        "{} {} ({})",
        locale.text(Message::Saved),
        target.display(),
        format_bytes(written)
    );
    Ok(())
}

/// Stream a download into `target` behind a progress spinner, removing the
/// partial file if the download fails.
fn write_to<F>(target: &Path, download: F) -> crate::Result<u64>
where
    F: FnOnce(&mut dyn Write) -> crate::Result<u64>,
{
    let io_error = |source: std::io::Error| BrowserError::Io {
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(target).map_err(io_error)?;

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner} {bytes} ({bytes_per_sec}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(target.display().to_string());

    let mut writer = progress.wrap_write(BufWriter::new(file));
    let result = download(&mut writer).and_then(|written| {
        writer.flush().map_err(io_error)?;
        Ok(written)
    });
    progress.finish_and_clear();

    if result.is_err() {
        drop(writer);
        if let Err(e) = fs::remove_file(target) {
            tracing::warn!(path = %target.display(), error = %e, "Failed to remove partial download");
        }
    }

    result
}
