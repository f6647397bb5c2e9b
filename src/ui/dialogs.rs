//! Modal dialogs for the submission flow

use crate::state::SubmissionOutcome;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Center a dialog of the given size on the screen.
fn centered_rect(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the pre-submission confirmation dialog.
pub fn render_confirm_dialog(frame: &mut Frame, confirm_selected: bool) {
    let dialog_area = centered_rect(frame, 56, 12);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            "Confirm Submission",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to submit this Certificate of",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "Origin request? All information and attachments will",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "be sent to the Customs Service.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    let options = [(false, "Cancel", Color::White), (true, "Submit", Color::Green)];
    for (is_submit, label, color) in options {
        let is_selected = confirm_selected == is_submit;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("←→", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// Render the post-submission result dialog.
pub fn render_result_dialog(frame: &mut Frame, outcome: &SubmissionOutcome) {
    let dialog_area = centered_rect(frame, 56, 10);
    frame.render_widget(Clear, dialog_area);

    let (title, color) = if outcome.success {
        ("Submission Successful", Color::Green)
    } else {
        ("Submission Failed", Color::Red)
    };

    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in outcome.message.lines() {
        content.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::White),
        )));
    }
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" close", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}
