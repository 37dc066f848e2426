//! TUI module for interactive backup browsing and restore.

pub mod app;
pub mod event;
pub mod ui;

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use crate::api::{HttpRestoreApi, RestoreApi};
use crate::browser::BackupTreeBrowser;
use crate::config::Config;
use crate::display::Message;
use crate::model::BackupKey;

pub use app::{App, Mode};

/// Run the interactive browser until the user quits.
///
/// If `open` names a backup, its tree starts loading right away.
pub fn run(config: &Config, open: Option<BackupKey>) -> anyhow::Result<()> {
    let api = HttpRestoreApi::new(&config.server)?;
    let mut app = App::new(
        BackupTreeBrowser::new(api),
        config.display.locale,
        config.download.directory.clone(),
    );

    app.refresh_backups();
    if let Some(key) = open {
        match key.find(app.browser.backups()).cloned() {
            Some(backup) => app.open_backup(backup),
            None => {
                tracing::warn!(backup = %key, "Backup not found");
                app.status_message = Some(app.locale.text(Message::NoBackupSelected).to_string());
            }
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

fn run_loop<B, A>(terminal: &mut Terminal<B>, app: &mut App<A>) -> io::Result<()>
where
    B: Backend,
    A: RestoreApi + Send + Sync + 'static,
{
    while !app.should_quit {
        app.poll_updates();
        terminal.draw(|frame| ui::render(app, frame))?;
        event::handle_events(app, Duration::from_millis(100))?;
    }
    Ok(())
}
