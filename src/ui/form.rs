//! The two form pages: row construction from the aggregate and rendering.

use super::fields::{render_rows, FieldRow};
use crate::app::App;
use crate::state::{AttachmentSlot, FieldId, FormPage};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the current form page
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.page {
        FormPage::One => " Exporter & Product Details ",
        FormPage::Two => " Materials & Declaration ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows: Vec<FieldRow> = app
        .state
        .current_fields()
        .into_iter()
        .map(|field| row_for(app, field))
        .collect();
    render_rows(frame, inner, &rows, app.state.cursor());
}

/// Build the renderable row for one field.
fn row_for(app: &App, field: FieldId) -> FieldRow {
    let form = &app.state.form;
    match field {
        FieldId::Scalar(scalar) => {
            if scalar.is_multiline() {
                FieldRow::multiline(scalar.label(), scalar.get(form))
            } else {
                FieldRow::text(scalar.label(), scalar.get(form))
            }
        }
        FieldId::Criteria => FieldRow::text(
            "Origin Criteria (←/→ to select ONE)",
            form.origin_criteria.label(),
        ),
        FieldId::MaterialText(index, text_field) => {
            let value = form
                .input_materials
                .get(index)
                .map(|m| text_field.get(m).to_string())
                .unwrap_or_default();
            FieldRow::text(text_field.label(index + 1), value)
        }
        FieldId::MaterialCountry(index) => {
            let country = form
                .input_materials
                .get(index)
                .map(|m| m.country_of_origin.as_str())
                .unwrap_or_default();
            let value = if country.is_empty() {
                "-- Select Country --"
            } else {
                country
            };
            FieldRow::text(
                format!("Input Material {} Country of Origin (←/→)", index + 1),
                value,
            )
        }
        FieldId::MaterialFile(index, slot) => {
            let label = match slot {
                AttachmentSlot::Certificate => format!(
                    "Input Material {} Certificate of Origin (type path, Enter to attach)",
                    index + 1
                ),
                AttachmentSlot::Invoice => format!(
                    "Input Material {} Invoice Attachment (type path, Enter to attach)",
                    index + 1
                ),
            };
            let value = if app.state.path_input_matches(index, slot) {
                app.state.path_input.clone()
            } else {
                form.input_materials
                    .get(index)
                    .and_then(|m| m.attachment(slot))
                    .map(|handle| format!("Selected file: {}", handle.file_name))
                    .unwrap_or_default()
            };
            FieldRow::text(label, value)
        }
        FieldId::AddMaterial => FieldRow::action("Add Another Input Material"),
        FieldId::Submit => FieldRow::action("Submit Form"),
    }
}
