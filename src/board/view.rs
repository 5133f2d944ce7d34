//! Board rendering: search bar, the three columns, and the modals.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::api::models::{Task, TaskPriority};
use crate::store::TaskStore;
use crate::ui::popup_area;

use super::{BoardMode, BoardState, COLUMNS, EditField, EditForm};

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::Green,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::High => Color::Red,
    }
}

pub fn render(frame: &mut Frame, area: Rect, board: &BoardState, store: &TaskStore) {
    if board.loading {
        let notice = Paragraph::new("Loading tasks...")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(notice, popup_area(area, 40, 20));
        return;
    }
    if let Some(error) = &board.error {
        let notice = Paragraph::new(format!("Error: {error}"))
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .centered();
        frame.render_widget(notice, popup_area(area, 60, 30));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_search(frame, chunks[0], board);
    render_columns(frame, chunks[1], board, store);
    render_hints(frame, chunks[2], board);

    match &board.mode {
        BoardMode::View { task_id } => {
            if let Some(task) = store.get(task_id) {
                render_detail(frame, area, task);
            }
        }
        BoardMode::Edit(form) => render_edit(frame, area, form),
        BoardMode::ConfirmDelete { title, .. } => render_confirm(frame, area, title),
        BoardMode::Normal | BoardMode::Search => {}
    }
}

fn render_search(frame: &mut Frame, area: Rect, board: &BoardState) {
    let typing = matches!(board.mode, BoardMode::Search);
    let mut text = board.search.clone();
    if typing {
        text.push('▏');
    } else if text.is_empty() {
        text = "Search tasks...".to_string();
    }
    let style = if typing {
        Style::default().fg(Color::White)
    } else if board.search.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(if typing {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, area);
}

fn render_columns(frame: &mut Frame, area: Rect, board: &BoardState, store: &TaskStore) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(area);

    for (i, status) in COLUMNS.iter().enumerate() {
        let tasks = board.visible_in(store, *status);
        let selected_here = board.selected_column == i;

        let items: Vec<ListItem> = if tasks.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No tasks here",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )))]
        } else {
            tasks
                .iter()
                .enumerate()
                .map(|(row, task)| card(task, selected_here && row == board.selected_row.min(tasks.len() - 1)))
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .title(format!("{} ({})", status.column_title(), tasks.len()))
                .borders(Borders::ALL)
                .border_style(if selected_here {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        );
        frame.render_widget(list, chunks[i]);
    }
}

fn card(task: &Task, selected: bool) -> ListItem<'static> {
    let title_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let marker = if selected { "▸ " } else { "  " };
    let due = task
        .due_date
        .map(|d| format!("Due: {d}"))
        .unwrap_or_else(|| "No date".to_string());

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(task.title.clone(), title_style),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", task.priority),
                Style::default().fg(priority_color(task.priority)),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", task.description),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("  {due}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ])
}

fn render_hints(frame: &mut Frame, area: Rect, board: &BoardState) {
    let hints = match board.mode {
        BoardMode::Search => "type to filter · Enter keep · Esc clear",
        _ => "←↑↓→ navigate · H/L move card · a add · e edit · d delete · Enter view · / search · Ctrl-D logout · q quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_detail(frame: &mut Frame, area: Rect, task: &Task) {
    let popup = popup_area(area, 60, 60);
    frame.render_widget(Clear, popup);

    let due = task
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Not set".to_string());
    let lines = vec![
        field_line("Title", &task.title),
        field_line("Description", &task.description),
        field_line("Status", task.status.as_str()),
        Line::from(vec![
            Span::styled("Priority: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                task.priority.as_str(),
                Style::default().fg(priority_color(task.priority)),
            ),
        ]),
        field_line("Due Date", &due),
        Line::from(""),
        Line::from(Span::styled(
            "Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Task Details").borders(Borders::ALL));
    frame.render_widget(detail, popup);
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn render_edit(frame: &mut Frame, area: Rect, form: &EditForm) {
    let popup = popup_area(area, 70, 70);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for field in EditField::ALL {
        let focused = form.focused() == field;
        let value = match field {
            EditField::Title => form.title.clone(),
            EditField::Description => form.description.clone(),
            EditField::Status => format!("‹ {} ›", form.status),
            EditField::Priority => format!("‹ {} ›", form.priority),
            EditField::DueDate => {
                if form.due_input.is_empty() {
                    "(none)".to_string()
                } else {
                    form.due_input.clone()
                }
            }
        };
        let value_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>12}: ", field.label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(value, value_style),
            Span::raw(if focused { "▏" } else { "" }),
        ]));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter save · Tab next field · ←/→ cycle status/priority · Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let edit = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Edit Task").borders(Borders::ALL));
    frame.render_widget(edit, popup);
}

fn render_confirm(frame: &mut Frame, area: Rect, title: &str) {
    let popup = popup_area(area, 50, 20);
    frame.render_widget(Clear, popup);

    let confirm = Paragraph::new(vec![
        Line::from(format!("Delete task \"{title}\"?")),
        Line::from(""),
        Line::from(Span::styled(
            "y delete · n / Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL));
    frame.render_widget(confirm, popup);
}
