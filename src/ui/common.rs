//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::Severity;

/// Render the header bar with the overall status.
///
/// Displays: overall icon and headline, component counts by severity.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let board = &app.board;
    let overall_style = app.theme.severity_style(board.overall.styled_as());

    let mut spans = vec![
        Span::styled(format!(" {} ", board.overall.icon().glyph()), overall_style),
        Span::styled(
            format!("{} ", app.title.to_uppercase()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(board.headline, overall_style),
    ];

    if !board.is_awaiting_data() {
        spans.push(Span::raw(" │ "));
        for (severity, label) in [
            (Severity::Operational, " ok "),
            (Severity::Degraded, " degraded "),
            (Severity::Outage, " outage "),
            (Severity::Maintenance, " maint "),
            (Severity::Unknown, " unknown"),
        ] {
            let count = board.count(severity);
            spans.push(if count > 0 {
                Span::styled(count.to_string(), app.theme.severity_style(severity))
            } else {
                Span::styled("0", Style::default().add_modifier(Modifier::DIM))
            });
            spans.push(Span::raw(label));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            Line::from(format!(
                " {}:{} ({}) ",
                i + 1,
                view.label(),
                app.view_count(*view)
            ))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, report time, time since last load, controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let reported = app.board.last_updated_utc.as_deref().unwrap_or("never");
    let loaded = match app.last_loaded {
        Some(at) => format!("loaded {:.0}s ago", at.elapsed().as_secs_f64()),
        None => "not loaded".to_string(),
    };

    let status = format!(
        " {} | reported {} | {} | Tab:switch r:reload ?:help q:quit",
        app.source_description(),
        reported,
        loaded,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch tabs"),
        Line::from("  Tab/S-Tab   Next/previous tab"),
        Line::from("  1-5         Jump to tab"),
        Line::from("  ↑/↓ j/k     Scroll list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r           Reload now"),
        Line::from("  ?           Toggle help"),
        Line::from("  q/Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 19u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
