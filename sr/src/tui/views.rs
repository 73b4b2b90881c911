//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! from AppState and never modifies it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};
use tracing::trace;

use crate::state::{Field, ListStatus, UiState};

use super::state::{AppState, ConfirmDialog, Focus, InteractionMode};

mod colors {
    use ratatui::style::Color;

    pub const SUCCESS: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const BUSY: Color = Color::Rgb(255, 215, 0); // Gold
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUS: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(?state.focus, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form + list
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_form(state, frame, body[0]);
    render_list(state, frame, body[1]);
    render_footer(state, frame, chunks[2]);

    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::Confirm(dialog) => render_confirm_dialog(dialog, frame, frame.area()),
        InteractionMode::Normal => {}
    }
}

/// Render header with the backend and the submission indicator
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let ui = state.store.state();

    let mut spans = vec![
        Span::styled(
            " Student Roster ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("│ {} ", state.backend_url), Style::default().fg(colors::DIM)),
    ];

    let mode = match ui.draft.editing_id {
        Some(id) => format!("│ Editing #{} ", id),
        None => "│ Adding ".to_string(),
    };
    spans.push(Span::raw(mode));

    if ui.submission.is_submitting() {
        let frame_idx = (state.tick_count % SPINNER.len() as u64) as usize;
        spans.push(Span::styled(
            format!("│ {} Submitting", SPINNER[frame_idx]),
            Style::default().fg(colors::BUSY),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::DIM)),
    );
    frame.render_widget(header, area);
}

/// Render the add/edit form with its messages
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form: called");
    let ui = state.store.state();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", ui.form_title()))
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(1), // Name hint
            Constraint::Length(3), // Address
            Constraint::Length(1), // Address hint
            Constraint::Length(1), // Submit
            Constraint::Min(0),    // Messages
        ])
        .split(inner.inner(Margin {
            horizontal: 1,
            vertical: 0,
        }));

    render_input(ui, Field::Name, state.focus == Focus::Name, frame, rows[0], rows[1]);
    render_input(ui, Field::Address, state.focus == Focus::Address, frame, rows[2], rows[3]);

    let submit_style = if ui.submission.is_submitting() {
        Style::default().fg(colors::DIM)
    } else {
        Style::default().fg(Color::Black).bg(colors::HEADER)
    };
    let submit = Paragraph::new(Line::from(Span::styled(format!(" {} ", ui.submit_label()), submit_style)));
    frame.render_widget(submit, rows[4]);

    let mut messages = vec![Line::from("")];
    if let Some(message) = &ui.form_error {
        messages.push(Line::styled(message.as_str(), Style::default().fg(colors::ERROR)));
    }
    if let Some(message) = ui.form_level_error() {
        messages.push(Line::styled(message, Style::default().fg(colors::ERROR)));
    }
    if let Some(message) = &ui.success_message {
        messages.push(Line::styled(message.as_str(), Style::default().fg(colors::SUCCESS)));
    }
    frame.render_widget(Paragraph::new(messages).wrap(Wrap { trim: true }), rows[5]);
}

fn render_input(ui: &UiState, field: Field, focused: bool, frame: &mut Frame, area: Rect, hint_area: Rect) {
    trace!(?field, focused, "render_input: called");
    let border = if focused {
        Style::default().fg(colors::FOCUS)
    } else {
        Style::default().fg(colors::DIM)
    };

    let mut spans = vec![Span::raw(ui.draft.value(field))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(colors::FOCUS)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", field.label()))
            .border_style(border),
    );
    frame.render_widget(input, area);

    if let Some(hint) = ui.field_hint(field) {
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(colors::ERROR))),
            hint_area,
        );
    }
}

/// Render the student table, or the loading/failed placeholder
fn render_list(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_list: called");
    let ui = state.store.state();
    let students = state.visible_students();
    let focused = state.focus == Focus::List;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Students ({}) ", students.len()))
        .border_style(Style::default().fg(if focused { colors::FOCUS } else { colors::HEADER }));

    // Delete failures sit on their own line above the rows
    let area = match ui.list_level_error() {
        Some(message) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(area);
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(colors::ERROR))),
                parts[0],
            );
            parts[1]
        }
        None => area,
    };

    match &ui.list.status {
        ListStatus::Loading => {
            frame.render_widget(block, area);
            render_empty_message(frame, area, "Loading students...");
        }
        ListStatus::Failed(message) => {
            frame.render_widget(block, area);
            render_message(frame, area, message, colors::ERROR);
        }
        ListStatus::Loaded => {
            let selected_idx = state.selection.selected_index;
            let rows: Vec<Row> = students
                .iter()
                .enumerate()
                .map(|(i, student)| {
                    let row_style = if focused && i == selected_idx {
                        Style::default().bg(colors::SELECTED_BG)
                    } else {
                        Style::default()
                    };
                    let marker = if ui.draft.editing_id == Some(student.id) { "✎" } else { " " };
                    Row::new(vec![
                        format!("{} {}", marker, student.id),
                        student.name.clone(),
                        student.address.clone(),
                    ])
                    .style(row_style)
                })
                .collect();

            let widths = [
                Constraint::Length(8), // ID
                Constraint::Percentage(40),
                Constraint::Min(20),
            ];

            let table = Table::new(rows, widths)
                .header(
                    Row::new(vec!["  ID", "NAME", "ADDRESS"])
                        .style(Style::default().add_modifier(Modifier::BOLD).fg(colors::HEADER)),
                )
                .block(block);
            frame.render_widget(table, area);

            if students.is_empty() {
                render_empty_message(frame, area, "No students found.");
            }
        }
    }
}

/// Render footer with keybinds for the focused pane
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let hints: &[(&str, &str)] = match state.focus {
        Focus::Name | Focus::Address => &[
            ("Tab", "next"),
            ("Enter", "submit"),
            ("Ctrl+L", "clear"),
            ("Esc", "list"),
            ("Ctrl+C", "quit"),
        ],
        Focus::List => &[
            ("j/k", "move"),
            ("e", "edit"),
            ("d", "delete"),
            ("r", "refresh"),
            ("n", "new"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" <{}>", key), Style::default().fg(colors::KEYBIND)));
        spans.push(Span::raw(format!(" {} ", desc)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::DIM)),
    );
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        section("Global"),
        key_line("Tab", "Next pane (Name → Address → List)"),
        key_line("Shift+Tab", "Previous pane"),
        key_line("Ctrl+S", "Submit form"),
        key_line("Ctrl+L", "Clear form"),
        key_line("Ctrl+C", "Quit immediately"),
        Line::from(""),
        section("Form"),
        key_line("Enter", "Submit (add or update)"),
        key_line("Esc", "Focus list"),
        Line::from(""),
        section("List"),
        key_line("j/↓ k/↑", "Move selection"),
        key_line("g / G", "First / last row"),
        key_line("e / Enter", "Edit selected student"),
        key_line("d / Del", "Delete selected student"),
        key_line("r", "Reload list"),
        key_line("n", "Focus form"),
        key_line("c", "Clear form"),
        key_line("q", "Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (any key to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

fn render_confirm_dialog(dialog: &ConfirmDialog, frame: &mut Frame, area: Rect) {
    trace!("render_confirm_dialog: called");
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let yes_style = if dialog.selected_button {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let no_style = if !dialog.selected_button {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };

    let content = vec![
        Line::from(""),
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled(" No ", no_style),
            Span::raw("    "),
            Span::styled(" Yes ", yes_style),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Tab/←→: switch  Enter: confirm  Esc: cancel",
            Style::default().fg(colors::DIM),
        )]),
    ];

    let dialog_widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(dialog_widget, popup_area);
}

fn render_empty_message(frame: &mut Frame, area: Rect, message: &str) {
    render_message(frame, area, message, colors::DIM);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    trace!(%message, "render_message: called");
    let inner = area.inner(Margin {
        horizontal: 2,
        vertical: 2,
    });

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
