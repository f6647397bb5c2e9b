//! Field rendering utilities for the form pages

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;
const MULTILINE_HEIGHT: u16 = 5;

/// One renderable row of a form page.
pub struct FieldRow {
    pub label: String,
    pub value: String,
    pub multiline: bool,
    pub action: bool,
}

impl FieldRow {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            multiline: false,
            action: false,
        }
    }

    pub fn multiline(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            multiline: true,
            action: false,
        }
    }

    pub fn action(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            multiline: false,
            action: true,
        }
    }

    fn height(&self) -> u16 {
        if self.multiline {
            MULTILINE_HEIGHT
        } else {
            FIELD_HEIGHT
        }
    }
}

/// Render a window of `rows` keeping the active row visible.
pub fn render_rows(frame: &mut Frame, area: Rect, rows: &[FieldRow], active: usize) {
    if rows.is_empty() || area.height == 0 {
        return;
    }

    // Slide the window start down until the active row fits
    let mut start = 0;
    loop {
        let mut used = 0u16;
        let mut end = start;
        for row in rows.iter().skip(start) {
            if used + row.height() > area.height {
                break;
            }
            used += row.height();
            end += 1;
        }
        if active < end || end == rows.len() {
            break;
        }
        start += 1;
    }

    let mut y = area.y;
    for (index, row) in rows.iter().enumerate().skip(start) {
        let height = row.height().min(area.y + area.height - y);
        if height < row.height() {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        if row.action {
            draw_action_row(frame, row_area, &row.label, index == active);
        } else {
            draw_field(frame, row_area, row, index == active);
        }
        y += height;
        if y >= area.y + area.height {
            break;
        }
    }
}

/// Draw a bordered field with its label and value
fn draw_field(frame: &mut Frame, area: Rect, row: &FieldRow, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if row.value.is_empty() && !is_active {
        "(empty)"
    } else {
        row.value.as_str()
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if row.multiline {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value.to_string(), style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", row.label))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw an action row (add material, submit)
fn draw_action_row(frame: &mut Frame, area: Rect, label: &str, is_active: bool) {
    let style = if is_active {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let hint = if is_active { "  (Enter)" } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(format!("▶ {label}"), style),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );

    frame.render_widget(content, area);
}
