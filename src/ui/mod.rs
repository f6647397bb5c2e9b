//! UI module for rendering the TUI

mod dialogs;
mod fields;
mod form;

use crate::app::App;
use crate::state::{FormPage, SubmitFlow};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Page tabs
            Constraint::Min(6),    // Form body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_tabs(frame, chunks[0], app);
    form::draw(frame, chunks[1], app);
    draw_status_bar(frame, chunks[2], app);

    // Modals render on top of everything
    if let SubmitFlow::Confirming { confirm_selected } = app.state.submit_flow {
        dialogs::render_confirm_dialog(frame, confirm_selected);
    }
    if let Some(outcome) = &app.state.submission_result {
        dialogs::render_result_dialog(frame, outcome);
    }
}

/// Draw the page tabs header
fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let selected = match app.state.page {
        FormPage::One => 0,
        FormPage::Two => 1,
    };
    let tabs = Tabs::new(vec![FormPage::One.title(), FormPage::Two.title()])
        .block(
            Block::default()
                .title(" Certificate of Origin Request Form ")
                .borders(Borders::ALL),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Draw the status bar
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    if matches!(app.state.submit_flow, SubmitFlow::Submitting) {
        spans.push(Span::styled(
            " Submitting... ",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(message) = &app.state.status_message {
        spans.push(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Green),
        ));
    } else {
        spans.push(Span::styled(
            " Tab:next  PgUp/PgDn:page  ^S:save  ^A:add material  ^Q:quit ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(saved_at) = &app.state.last_saved {
        spans.push(Span::styled(
            format!("| Last saved: {} ", saved_at.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(status, area);
}
