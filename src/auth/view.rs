//! Login and signup screen rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::validate::FieldErrors;
use super::{FormField, LoginForm, SignupForm};

pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let mut lines = Vec::new();
    for field in LoginForm::FIELDS {
        push_field(
            &mut lines,
            field,
            form.value(field),
            form.focused() == field,
            &form.errors,
        );
    }
    lines.push(Line::from(""));
    let footer = if form.submitting {
        "Logging in..."
    } else {
        "Enter submit · Tab next field · Ctrl-S sign up · Esc quit"
    };
    lines.push(hint_line(footer));
    lines.push(hint_line("Don't have an account? Ctrl-S to sign up"));

    render_form(frame, area, "Login to Your Account", lines, 12);
}

pub fn render_signup(frame: &mut Frame, area: Rect, form: &SignupForm) {
    let mut lines = Vec::new();
    for field in SignupForm::FIELDS {
        push_field(
            &mut lines,
            field,
            form.value(field),
            form.focused() == field,
            &form.errors,
        );
    }
    lines.push(Line::from(""));
    let footer = if form.submitting {
        "Signing up..."
    } else {
        "Enter submit · Tab next field · Ctrl-L log in · Esc quit"
    };
    lines.push(hint_line(footer));
    lines.push(hint_line("Already have an account? Ctrl-L to log in"));

    render_form(frame, area, "Create your account", lines, 21);
}

fn push_field(
    lines: &mut Vec<Line<'static>>,
    field: FormField,
    value: &str,
    focused: bool,
    errors: &FieldErrors,
) {
    let shown = if field.is_secret() {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let value_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:>17}: ", field.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(shown, value_style),
        Span::raw(if focused { "▏" } else { "" }),
    ]));
    if let Some(message) = errors.get(field) {
        lines.push(Line::from(Span::styled(
            format!("{:>19}{}", "", message),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

fn render_form(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>, height: u16) {
    let width = 58.min(area.width);
    let height = (height + 4).min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(body, popup);
}
