//! Rendering for the terminal UI.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;
use task_client::Transport;

use crate::app::{App, Focus, Input, Modal};

pub fn draw<T: Transport>(f: &mut Frame, app: &App<T>) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Creation form
            Constraint::Length(3), // Search + filter toggle
            Constraint::Min(1),    // Task list
            Constraint::Length(1), // Footer
        ])
        .split(size);

    let title = Paragraph::new("Task Manager")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(title, chunks[0]);

    draw_form(f, app, chunks[1]);
    draw_search_row(f, app, chunks[2]);
    draw_list(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);

    if let Some(modal) = &app.modal {
        draw_modal(f, modal, size);
    }
}

fn bordered_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn input_text<'a>(input: &'a Input, placeholder: &'a str) -> Span<'a> {
    if input.value().is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input.value())
    }
}

fn draw_form<T: Transport>(f: &mut Frame, app: &App<T>, area: Rect) {
    let style = if app.session.loading() {
        // Disabled while a request is in flight.
        Style::default().fg(Color::DarkGray)
    } else {
        focus_style(app.focus == Focus::Form)
    };
    let form = Paragraph::new(input_text(&app.form, "Enter task name..."))
        .block(bordered_block(" Add New Task ").border_style(style));
    f.render_widget(form, area);
}

fn draw_search_row<T: Transport>(f: &mut Frame, app: &App<T>, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search = Paragraph::new(input_text(&app.search, "Search tasks by name..."))
        .block(bordered_block(" Search ").border_style(focus_style(app.focus == Focus::Search)));
    f.render_widget(search, halves[0]);

    let checkbox = if app.show_completed_only { "[x]" } else { "[ ]" };
    let filter = Paragraph::new(format!("{checkbox} Show completed tasks only"))
        .block(bordered_block(" Filter (f) "));
    f.render_widget(filter, halves[1]);
}

fn draw_list<T: Transport>(f: &mut Frame, app: &App<T>, area: Rect) {
    let block = bordered_block(" Tasks ").border_style(focus_style(app.focus == Focus::List));

    if app.session.loading() {
        let spinner = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(spinner, area);
        return;
    }

    if let Some(error) = app.session.error() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error, Style::default().fg(Color::Red)),
        ]))
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(banner, area);
        return;
    }

    if app.session.tasks().is_empty() {
        let empty = Paragraph::new("No tasks available")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .session
        .tasks()
        .iter()
        .map(|task| {
            let checkbox = if task.completed { "[x]" } else { "[ ]" };
            let name_style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            Row::new(vec![
                Span::raw(checkbox),
                Span::styled(task.name.clone(), name_style),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(4), Constraint::Min(10)])
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut state = TableState::default();
    state.select(app.selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_footer<T: Transport>(f: &mut Frame, app: &App<T>, area: Rect) {
    let hints = match (&app.modal, app.focus) {
        (Some(Modal::Edit { .. }), _) => "Enter: Save | Esc: Cancel",
        (Some(Modal::ConfirmDelete { .. }), _) => "Enter/y: Delete | Esc/n: Cancel",
        (None, Focus::Form) => "Tab: Next pane | Enter: Add task",
        (None, Focus::Search) => "Tab: Next pane | Type to search",
        (None, Focus::List) => {
            "Tab: Next pane | j/k: Navigate | Space: Toggle | e: Edit | d: Delete | f: Completed only | q: Quit"
        }
    };
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_modal(f: &mut Frame, modal: &Modal, size: Rect) {
    match modal {
        Modal::Edit { input, .. } => {
            let area = centered_rect(60, 6, size);
            f.render_widget(Clear, area);
            let can_save = !input.value().trim().is_empty();
            let save_style = if can_save {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let lines = vec![
                Line::from(input_text(input, "Enter task name...")),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Enter: Save Changes", save_style),
                    Span::raw("  |  Esc: Cancel"),
                ]),
            ];
            let dialog = Paragraph::new(lines).block(bordered_block(" Edit Task "));
            f.render_widget(dialog, area);
        }
        Modal::ConfirmDelete { name, .. } => {
            let area = centered_rect(60, 6, size);
            f.render_widget(Clear, area);
            let lines = vec![
                Line::from(format!("Are you sure you want to delete \"{name}\"?")),
                Line::from(""),
                Line::from("Enter/y: Delete  |  Esc/n: Cancel"),
            ];
            let dialog = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(bordered_block(" Confirm Delete "));
            f.render_widget(dialog, area);
        }
    }
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
