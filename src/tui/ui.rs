//! UI rendering for the TUI.

use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Mode};
use crate::api::RestoreApi;
use crate::display::{format_bytes, format_modified, format_relative, Locale, Message};
use crate::model::{BackupDescriptor, SelectionSet, TreeNode};

/// Render the entire UI.
pub fn render<A>(app: &App<A>, frame: &mut Frame)
where
    A: RestoreApi + Send + Sync + 'static,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // List
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    let now = Utc::now();

    render_header(app, frame, chunks[0]);
    match app.mode {
        Mode::Browse => render_listing(app, frame, chunks[1], now),
        Mode::Help if app.browser.tree().is_some() => render_listing(app, frame, chunks[1], now),
        Mode::Picker | Mode::Help => render_picker(app, frame, chunks[1], now),
    }
    render_footer(app, frame, chunks[2]);

    if app.mode == Mode::Help {
        render_help_overlay(frame);
    }
}

fn render_header<A>(app: &App<A>, frame: &mut Frame, area: Rect)
where
    A: RestoreApi + Send + Sync + 'static,
{
    let header_text = match (app.mode, app.browser.current_backup()) {
        (Mode::Browse | Mode::Help, Some(backup)) => {
            let trail = app
                .browser
                .breadcrumbs()
                .iter()
                .skip(1)
                .map(|crumb| crumb.name.as_str())
                .collect::<Vec<_>>()
                .join(" / ");
            let size = app
                .browser
                .current_node()
                .map(|n| format_bytes(n.total_size()))
                .unwrap_or_default();
            format!(" {}  │  / {}  {}", backup.label(), trail, size)
        }
        _ => format!(" {}", app.browser.api().endpoints().base()),
    };

    let block = Block::default()
        .title(" Restore Browser ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_picker<A>(app: &App<A>, frame: &mut Frame, area: Rect, now: DateTime<Utc>)
where
    A: RestoreApi + Send + Sync + 'static,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let backups = app.browser.backups();
    if backups.is_empty() {
        let message = if app.loading {
            app.locale.text(Message::Loading)
        } else {
            app.locale.text(Message::NoBackups)
        };
        render_placeholder(frame, area, block, message);
        return;
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner_area.height as usize;
    let scroll_offset = calculate_scroll_offset(app.picker_selected, visible_height, backups.len());
    let open = app.browser.current_backup().map(BackupDescriptor::key);

    for (i, backup) in backups
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let is_selected = scroll_offset + i == app.picker_selected;
        let is_open = open.as_ref().is_some_and(|key| key.matches(backup));

        render_backup(
            frame,
            backup,
            Rect::new(inner_area.x, y, inner_area.width, 1),
            now,
            app.locale,
            is_selected,
            is_open,
        );
    }
}

fn render_backup(
    frame: &mut Frame,
    backup: &BackupDescriptor,
    area: Rect,
    now: DateTime<Utc>,
    locale: Locale,
    is_selected: bool,
    is_open: bool,
) {
    let marker = if is_open { "● " } else { "  " };
    let details = format!(
        "{:>8} files  {:>10}  {}",
        backup.file_count,
        format_bytes(backup.total_size),
        format_relative(backup.last_modified, now, locale)
    );

    let name_width = (area.width as usize)
        .saturating_sub(marker.chars().count() + details.chars().count() + 2);
    let label = truncate(&backup.label(), name_width);
    let padding = " ".repeat(name_width.saturating_sub(label.chars().count()));

    let mut line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(label, Style::default().fg(Color::White).bold()),
        Span::raw(padding),
        Span::raw("  "),
        Span::styled(details, Style::default().fg(Color::Gray)),
    ]);

    if is_selected {
        line = line.style(Style::default().bg(Color::DarkGray));
    }

    frame.render_widget(Paragraph::new(line), area);
}

fn render_listing<A>(app: &App<A>, frame: &mut Frame, area: Rect, now: DateTime<Utc>)
where
    A: RestoreApi + Send + Sync + 'static,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let entries = app.browser.entries();
    if entries.is_empty() {
        let message = if app.loading {
            app.locale.text(Message::Loading)
        } else {
            app.locale.text(Message::EmptyDirectory)
        };
        render_placeholder(frame, area, block, message);
        return;
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner_area.height as usize;
    let scroll_offset = calculate_scroll_offset(app.selected, visible_height, entries.len());

    for (i, entry) in entries
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let is_selected = scroll_offset + i == app.selected;

        render_entry(
            frame,
            entry,
            app.browser.selection(),
            Rect::new(inner_area.x, y, inner_area.width, 1),
            now,
            app.locale,
            is_selected,
        );
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(padding)
    }
}

fn render_entry(
    frame: &mut Frame,
    entry: &TreeNode,
    selection: &SelectionSet,
    area: Rect,
    now: DateTime<Utc>,
    locale: Locale,
    is_selected: bool,
) {
    let check = if selection.contains(&entry.path) {
        "[x] "
    } else {
        "[ ] "
    };
    let icon = if entry.is_dir { "▸ " } else { "  " };

    // Directories show no size
    let size_width = 10;
    let size = if entry.is_dir {
        String::new()
    } else {
        format_bytes(entry.size)
    };
    let size_padded = format!("{:>width$}", size, width = size_width);
    let modified = format_modified(entry.modified_at, now, locale);

    let prefix_len = check.chars().count() + icon.chars().count();
    let suffix_len = size_width + modified.chars().count() + 4;
    let name_width = (area.width as usize).saturating_sub(prefix_len + suffix_len);

    let display_name = truncate(&entry.name, name_width);
    let padding = " ".repeat(name_width.saturating_sub(display_name.chars().count()));

    let name_style = if entry.is_dir {
        Style::default().fg(Color::Blue).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let check_style = if selection.contains(&entry.path) {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut line = Line::from(vec![
        Span::styled(check, check_style),
        Span::styled(icon, name_style),
        Span::styled(display_name, name_style),
        Span::raw(padding),
        Span::raw("  "),
        Span::styled(size_padded, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(modified, Style::default().fg(Color::Gray)),
    ]);

    if is_selected {
        line = line.style(Style::default().bg(Color::DarkGray));
    }

    frame.render_widget(Paragraph::new(line), area);
}

/// Truncate `name` to `width` characters, marking the cut with an ellipsis.
fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() > width && width > 1 {
        let truncated: String = name.chars().take(width - 1).collect();
        format!("{}…", truncated)
    } else {
        name.to_string()
    }
}

fn render_footer<A>(app: &App<A>, frame: &mut Frame, area: Rect)
where
    A: RestoreApi + Send + Sync + 'static,
{
    let hints = match app.mode {
        Mode::Picker => "[↑↓] Navigate  [Enter] Open  [r] Refresh  [?] Help  [q] Quit",
        Mode::Browse => {
            "[↑↓] Navigate  [←→] Up/Open  [Space] Select  [a] All  [d/D] Download  [b] Backups  [?] Help"
        }
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let selected = app.browser.selection().len();
    let line = if selected > 0 {
        Line::from(vec![
            Span::styled(
                format!("{}  ", app.locale.selection_count(selected)),
                Style::default().fg(Color::Green),
            ),
            Span::raw(text),
        ])
    } else {
        Line::from(text)
    };

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 24u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 →/l/Enter  Open directory / backup
 ←/h/Bksp   Go to parent
 g / G      Go to top / bottom
 b          Back to backup list

 SELECTION
 ─────────────────────────────────
 Space      Toggle selected
 a          Select / deselect all here
 c          Clear selection

 DOWNLOAD
 ─────────────────────────────────
 d          Download highlighted file
 D          Download selection as archive

 r          Refresh backup list
 ?          Toggle this help
 q          Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}
