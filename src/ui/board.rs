//! Component table.
//!
//! Lists the entries of the current tab with their status and severity,
//! styled by tone. The `All` tab adds a group column.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, View};
use crate::web::AWAITING_MESSAGE;

/// Render the entries of the current view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.board.is_awaiting_data() {
        let paragraph = Paragraph::new(AWAITING_MESSAGE)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block.title(" Components "));
        frame.render_widget(paragraph, area);
        return;
    }

    let entries = app.visible_entries();
    let show_group = app.current_view == View::All;

    let mut header_cells = vec![Cell::from("")];
    if show_group {
        header_cells.push(Cell::from("Group"));
    }
    header_cells.extend([
        Cell::from("Component"),
        Cell::from("Status"),
        Cell::from("Severity"),
    ]);
    let header = Row::new(header_cells).height(1).style(app.theme.header);

    let rows: Vec<Row> = entries
        .iter()
        .map(|(group, entry)| {
            let style = app.theme.severity_style(entry.severity);
            let name = match &entry.url {
                Some(url) => format!("{} <{}>", entry.name, url),
                None => entry.name.clone(),
            };

            let mut cells = vec![Cell::from(entry.icon.glyph()).style(style)];
            if show_group {
                cells.push(Cell::from(group.title()));
            }
            cells.extend([
                Cell::from(name),
                Cell::from(entry.status.clone()).style(style),
                Cell::from(entry.severity.label()).style(style),
            ]);
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(2)];
    if show_group {
        widths.push(Constraint::Length(17));
    }
    widths.extend([
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Min(12),
    ]);

    let selected = app.selected_index.min(entries.len().saturating_sub(1));
    let position_info = if entries.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", selected + 1, entries.len())
    };
    let title = format!(" {}{} ", app.current_view.label(), position_info);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(title))
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !entries.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
