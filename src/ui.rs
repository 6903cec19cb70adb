use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::constants::{ANSWER_HEADING, PLACEHOLDER, TITLE};
use crate::form::QuestionForm;

pub fn draw_ui(f: &mut Frame, form: &QuestionForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Question input
            Constraint::Length(1), // Ask button
            Constraint::Min(0),    // Answer panel
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[0]);

    render_input(f, form, chunks[1]);
    render_button(f, form, chunks[2]);

    if let Some(answer) = form.answer_panel() {
        render_answer(f, answer, chunks[3]);
    }

    let hints = Paragraph::new("Enter: ask  Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    f.render_widget(hints, chunks[4]);
}

fn render_input(f: &mut Frame, form: &QuestionForm, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let input = if form.question().is_empty() {
        Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(form.question())
    };
    f.render_widget(input.block(block), area);

    // Cursor after the last character, clamped to the box
    let width = form.question().chars().count() as u16;
    let x = area.x + 1 + width.min(area.width.saturating_sub(3));
    f.set_cursor_position((x, area.y + 1));
}

fn render_button(f: &mut Frame, form: &QuestionForm, area: Rect) {
    let style = if form.can_submit() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    let button = Paragraph::new(Span::styled(format!("[ {} ]", form.button_label()), style));
    f.render_widget(button, area);
}

fn render_answer(f: &mut Frame, answer: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            ANSWER_HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    // Keep the service's line breaks and indentation.
    let panel = Paragraph::new(answer)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}
