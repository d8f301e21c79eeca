//! Rendering for the artwork table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use artic_lib::table::{SelectionMode, ViewState};

use crate::app::{InputMode, UiState};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draws one frame from a view snapshot.
pub fn render(frame: &mut Frame, view: &ViewState, ui: &UiState) {
    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_table(frame, chunks[0], view, ui);
    render_status(frame, chunks[1], view, ui);
    render_help(frame, chunks[2]);

    if ui.input_mode == InputMode::Quota {
        render_quota_prompt(frame, ui);
    }
}

fn render_table(frame: &mut Frame, area: Rect, view: &ViewState, ui: &UiState) {
    let multiple = view.selection_mode == SelectionMode::Multiple;

    let mut widths: Vec<Constraint> = Vec::new();
    let mut header: Vec<Cell> = Vec::new();
    if multiple {
        widths.push(Constraint::Length(4));
        header.push(Cell::from("SEL"));
    }
    widths.extend([
        Constraint::Percentage(35),
        Constraint::Percentage(16),
        Constraint::Percentage(33),
        Constraint::Length(6),
        Constraint::Length(6),
    ]);
    header.extend([
        Cell::from("TITLE"),
        Cell::from("ORIGIN"),
        Cell::from("ARTIST"),
        Cell::from("FROM"),
        Cell::from("TO"),
    ]);

    let rows = view.records.iter().enumerate().map(|(i, artwork)| {
        let selected = view.selection.contains(&artwork.id);

        let mut cells: Vec<Cell> = Vec::new();
        if multiple {
            cells.push(Cell::from(if selected { "[x]" } else { "[ ]" }));
        }
        cells.push(Cell::from(display(artwork.title.as_deref())));
        cells.push(Cell::from(display(artwork.place_of_origin.as_deref())));
        cells.push(Cell::from(display(artwork.artist_display.as_deref())));
        cells.push(Cell::from(year(artwork.date_start)));
        cells.push(Cell::from(year(artwork.date_end)));

        let mut style = Style::default();
        if selected {
            style = style.fg(Color::Cyan);
        }
        if i == ui.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Row::new(cells).style(style)
    });

    let title = format!(" Artworks · page {}/{} ", view.page_index, view.total_pages());
    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &ViewState, ui: &UiState) {
    let mut spans: Vec<Span> = Vec::new();

    if view.loading {
        let dot = SPINNER_FRAMES[ui.frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{dot} loading "),
            Style::default().fg(Color::Yellow),
        ));
    }
    if view.bulk_selecting {
        let dot = SPINNER_FRAMES[ui.frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{dot} selecting "),
            Style::default().fg(Color::Yellow),
        ));
    }

    let mode = match view.selection_mode {
        SelectionMode::Single => "single",
        SelectionMode::Multiple => "multiple",
    };
    spans.push(Span::raw(format!(
        "{} records · {} selected · {mode} mode",
        view.total_records,
        view.selection.len(),
    )));

    if let Some(message) = ui.status.as_deref().or(view.last_error.as_deref()) {
        spans.push(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "j/k move · n/p page · space select · m mode · s select first N · r reload · q quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

fn render_quota_prompt(frame: &mut Frame, ui: &UiState) {
    let area = centered_rect(40, 3, frame.area());
    frame.render_widget(Clear, area);

    let input = Paragraph::new(format!("{}_", ui.quota_input))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Select first N rows (Enter to run, Esc to cancel) "),
        );
    frame.render_widget(input, area);
}

fn display(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}

fn year(value: Option<i32>) -> String {
    value.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

/// A fixed-size rect centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
