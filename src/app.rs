//! Application core: key routing, the save/submit actions, and the
//! submission flow around the form aggregate.

use crate::config::CooConfig;
use crate::state::{
    AppState, AttachmentHandle, AttachmentSlot, FieldId, FormPage, FormPatch, ScalarField,
    SubmissionOutcome, SubmitFlow, AFCFTA_STATE_PARTIES, OTHER_COUNTRIES,
};
use crate::storage::{self, FileStore, KeyValueStore};
use crate::submit::{assemble, IngestApi, IngestClient};
use crate::validate::validate;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Durable store for form progress
    store: Box<dyn KeyValueStore>,
    /// Client for the ingestion endpoint
    ingest: Box<dyn IngestApi>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance, restoring any saved progress.
    pub fn new() -> Result<Self> {
        let config = CooConfig::load()?;
        let store = FileStore::open_default()?;
        let ingest = IngestClient::new(IngestClient::resolve_endpoint(&config));
        Ok(Self::with_parts(Box::new(store), Box::new(ingest)))
    }

    fn with_parts(store: Box<dyn KeyValueStore>, ingest: Box<dyn IngestApi>) -> Self {
        let mut state = AppState::default();
        let (form, saved_at) = storage::load_progress(store.as_ref());
        if let Some(form) = form {
            state.form = form;
        }
        state.last_saved = saved_at;
        Self {
            state,
            store,
            ingest,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Result dialog is modal
        if self.state.submission_result.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.submission_result = None;
            }
            return Ok(());
        }

        match self.state.submit_flow {
            SubmitFlow::Confirming { confirm_selected } => {
                self.handle_confirm_dialog_key(key, confirm_selected).await?;
                return Ok(());
            }
            // An in-flight submission ignores all input
            SubmitFlow::Submitting => return Ok(()),
            SubmitFlow::Idle => {}
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.save_progress(),
                KeyCode::Char('a') => self.add_material(),
                KeyCode::Char('q') => self.quit = true,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_field(),
            KeyCode::PageDown => self.state.set_page(FormPage::Two),
            KeyCode::PageUp => self.state.set_page(FormPage::One),
            KeyCode::Esc => self.state.status_message = None,
            _ => self.handle_field_key(key),
        }
        Ok(())
    }

    /// Route a key to the focused field.
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(field) = self.state.active_field() else {
            return;
        };
        match field {
            FieldId::Scalar(scalar) => self.edit_scalar(scalar, key),
            FieldId::Criteria => self.cycle_criteria(key),
            FieldId::MaterialText(index, text_field) => {
                let Some(material) = self.state.form.input_materials.get(index) else {
                    return;
                };
                if let Some(edited) = edit_text(text_field.get(material), key, false) {
                    self.state
                        .form
                        .update_material_at(index, text_field.patch(edited));
                }
            }
            FieldId::MaterialCountry(index) => self.cycle_country(index, key),
            FieldId::MaterialFile(index, slot) => self.edit_path(index, slot, key),
            FieldId::AddMaterial => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.add_material();
                }
            }
            FieldId::Submit => {
                if key.code == KeyCode::Enter {
                    self.request_submit();
                }
            }
        }
    }

    fn edit_scalar(&mut self, scalar: ScalarField, key: KeyEvent) {
        if let Some(edited) = edit_text(scalar.get(&self.state.form), key, scalar.is_multiline()) {
            self.state.form.update_fields(scalar.patch(edited));
        }
    }

    fn cycle_criteria(&mut self, key: KeyEvent) {
        let current = self.state.form.origin_criteria;
        let next = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => current.next(),
            KeyCode::Left => current.prev(),
            _ => return,
        };
        self.state.form.update_fields(FormPatch {
            origin_criteria: Some(next),
            ..Default::default()
        });
    }

    fn cycle_country(&mut self, index: usize, key: KeyEvent) {
        let step = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => 1,
            KeyCode::Left => -1,
            _ => return,
        };
        let Some(material) = self.state.form.input_materials.get(index) else {
            return;
        };
        let next = cycle_country(&material.country_of_origin, step);
        self.state.form.set_country_of_origin(index, next);
    }

    /// Attachment fields take a typed file path, committed with Enter.
    fn edit_path(&mut self, index: usize, slot: AttachmentSlot, key: KeyEvent) {
        if !self.state.path_input_matches(index, slot) {
            self.state.discard_path_input();
        }
        match key.code {
            KeyCode::Char(c) => {
                self.state.path_input_for = Some((index, slot));
                self.state.path_input.push(c);
            }
            KeyCode::Backspace => {
                self.state.path_input.pop();
            }
            KeyCode::Enter => {
                let path = self.state.path_input.trim().to_string();
                if path.is_empty() {
                    return;
                }
                let handle = AttachmentHandle::from_path(path);
                let name = handle.file_name.clone();
                if self.state.form.attach_file(index, slot, Some(handle)) {
                    self.state.set_status(format!("Attached {name}"));
                }
                self.state.discard_path_input();
            }
            _ => {}
        }
    }

    fn add_material(&mut self) {
        self.state.form.append_material();
        self.state.set_status(format!(
            "Input material {} added",
            self.state.form.input_materials.len()
        ));
    }

    /// Save form progress to the durable store. A failed save warns but
    /// never interrupts form use.
    fn save_progress(&mut self) {
        match storage::save_progress(self.store.as_mut(), &self.state.form) {
            Ok(saved_at) => {
                self.state.last_saved = Some(saved_at);
                self.state.set_status("Progress saved");
            }
            Err(err) => {
                tracing::warn!("saving form progress failed: {err}");
                self.state.set_status(format!("Save failed: {err}"));
            }
        }
    }

    /// Validate the aggregate and open the confirmation dialog. An
    /// incomplete form surfaces the first failing section and stays idle.
    fn request_submit(&mut self) {
        match validate(&self.state.form) {
            Err(reason) => self.state.set_status(reason.to_string()),
            Ok(()) => {
                self.state.submit_flow = SubmitFlow::Confirming {
                    confirm_selected: false,
                };
            }
        }
    }

    async fn handle_confirm_dialog_key(
        &mut self,
        key: KeyEvent,
        confirm_selected: bool,
    ) -> Result<()> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                self.state.submit_flow = SubmitFlow::Confirming {
                    confirm_selected: !confirm_selected,
                };
            }
            KeyCode::Esc => self.state.submit_flow = SubmitFlow::Idle,
            KeyCode::Enter => {
                if confirm_selected {
                    self.confirm_and_submit().await;
                } else {
                    self.state.submit_flow = SubmitFlow::Idle;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Assemble and post the confirmed submission. Success resets the form;
    /// failure keeps the aggregate untouched for retry.
    async fn confirm_and_submit(&mut self) {
        self.state.submit_flow = SubmitFlow::Submitting;

        let outcome = match assemble(&self.state.form) {
            Ok(payload) => match self.ingest.submit(payload).await {
                Ok(ack) => {
                    tracing::info!("form submission accepted");
                    SubmissionOutcome {
                        success: true,
                        message: ack.message,
                    }
                }
                Err(err) => {
                    tracing::error!("form submission failed: {err}");
                    SubmissionOutcome {
                        success: false,
                        message: format!("Form submission failed: {err}"),
                    }
                }
            },
            Err(err) => {
                tracing::error!("form submission failed: {err}");
                SubmissionOutcome {
                    success: false,
                    message: format!("Form submission failed: {err}"),
                }
            }
        };

        if outcome.success {
            self.state.reset_form();
        }
        self.state.submission_result = Some(outcome);
        self.state.submit_flow = SubmitFlow::Idle;
    }
}

/// Apply one key to a text value; `None` when the key does not edit text.
fn edit_text(current: &str, key: KeyEvent, multiline: bool) -> Option<String> {
    let mut value = current.to_string();
    match key.code {
        KeyCode::Char(c) => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        KeyCode::Enter if multiline => value.push('\n'),
        _ => return None,
    }
    Some(value)
}

/// Step through the country picker: AfCFTA state parties first, then the
/// other countries. An unselected country enters the list at the nearest
/// end.
fn cycle_country(current: &str, step: i32) -> &'static str {
    let options: Vec<&'static str> = AFCFTA_STATE_PARTIES
        .iter()
        .chain(OTHER_COUNTRIES.iter())
        .copied()
        .collect();
    let len = options.len() as i32;
    let position = options.iter().position(|c| *c == current);
    let next = match position {
        Some(pos) => (pos as i32 + step).rem_euclid(len),
        None if step > 0 => 0,
        None => len - 1,
    };
    options[next as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormAggregate, MaterialPatch, OriginCriteria};
    use crate::storage::MockKeyValueStore;
    use crate::submit::{MockIngestApi, SubmissionError, SubmitAck};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn relaxed_store() -> Box<dyn KeyValueStore> {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| None);
        store.expect_set().returning(|_, _| Ok(()));
        store.expect_remove().returning(|_| ());
        Box::new(store)
    }

    fn test_app(ingest: MockIngestApi) -> App {
        App::with_parts(relaxed_store(), Box::new(ingest))
    }

    fn complete_form() -> FormAggregate {
        let mut form = FormAggregate::default();
        form.update_fields(FormPatch {
            company_name: Some("Acme".to_string()),
            physical_address: Some("1 Rd".to_string()),
            tin_number: Some("123".to_string()),
            email_address: Some("a@b.com".to_string()),
            origin_criteria: Some(OriginCriteria::WhollyObtained),
            product_description: Some("Widget".to_string()),
            hs_code: Some("1234567890".to_string()),
            country_of_export: Some("Nigeria".to_string()),
            declarant_name: Some("Ada Obi".to_string()),
            signature_name: Some("Ada Obi".to_string()),
            signature_position: Some("Export Manager".to_string()),
            ..Default::default()
        });
        form.update_material_at(
            0,
            MaterialPatch {
                description: Some("Steel rod".to_string()),
                hs_code: Some("7215.90".to_string()),
                ..Default::default()
            },
        );
        form.set_country_of_origin(0, "Nigeria");
        form
    }

    mod submit_flow {
        use super::*;

        #[test]
        fn test_invalid_form_stays_idle_with_reason() {
            let mut app = test_app(MockIngestApi::new());
            app.request_submit();
            assert_eq!(app.state.submit_flow, SubmitFlow::Idle);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Please complete all required fields in the Exporter Details section.")
            );
        }

        #[test]
        fn test_valid_form_moves_to_confirming() {
            let mut app = test_app(MockIngestApi::new());
            app.state.form = complete_form();
            app.request_submit();
            assert_eq!(
                app.state.submit_flow,
                SubmitFlow::Confirming {
                    confirm_selected: false
                }
            );
        }

        #[tokio::test]
        async fn test_cancelling_returns_to_idle_and_keeps_form() {
            let mut app = test_app(MockIngestApi::new());
            app.state.form = complete_form();
            app.request_submit();
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.submit_flow, SubmitFlow::Idle);
            assert_eq!(app.state.form, complete_form());
        }

        #[tokio::test]
        async fn test_successful_submission_resets_the_form() {
            let mut ingest = MockIngestApi::new();
            ingest.expect_submit().times(1).returning(|_| {
                Ok(SubmitAck {
                    message: "Recorded".to_string(),
                })
            });
            let mut app = test_app(ingest);
            app.state.form = complete_form();
            app.request_submit();
            // Move highlight to "Submit", then confirm
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.submit_flow, SubmitFlow::Idle);
            assert_eq!(app.state.form, FormAggregate::default());
            let outcome = app.state.submission_result.clone().unwrap();
            assert!(outcome.success);
            assert_eq!(outcome.message, "Recorded");
        }

        #[tokio::test]
        async fn test_failed_submission_retains_the_form() {
            let mut ingest = MockIngestApi::new();
            ingest.expect_submit().times(1).returning(|_| {
                Err(SubmissionError::Rejected(
                    "Failed to save form data".to_string(),
                ))
            });
            let mut app = test_app(ingest);
            app.state.form = complete_form();
            app.request_submit();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.submit_flow, SubmitFlow::Idle);
            assert_eq!(app.state.form, complete_form());
            let outcome = app.state.submission_result.clone().unwrap();
            assert!(!outcome.success);
            assert_eq!(
                outcome.message,
                "Form submission failed: Failed to save form data"
            );
        }

        #[tokio::test]
        async fn test_submitting_state_ignores_input() {
            let mut app = test_app(MockIngestApi::new());
            app.state.form = complete_form();
            app.state.submit_flow = SubmitFlow::Submitting;
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.state.form, complete_form());
            assert_eq!(app.state.submit_flow, SubmitFlow::Submitting);
        }

        #[tokio::test]
        async fn test_result_dialog_dismisses_on_enter() {
            let mut app = test_app(MockIngestApi::new());
            app.state.submission_result = Some(SubmissionOutcome {
                success: true,
                message: "done".to_string(),
            });
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.submission_result.is_none());
        }
    }

    mod editing {
        use super::*;

        #[tokio::test]
        async fn test_typing_fills_the_focused_field() {
            let mut app = test_app(MockIngestApi::new());
            for c in "Acme".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            assert_eq!(app.state.form.company_name, "Acme");
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.state.form.company_name, "Acm");
        }

        #[tokio::test]
        async fn test_tab_moves_to_next_field() {
            let mut app = test_app(MockIngestApi::new());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
            assert_eq!(app.state.form.physical_address, "1");
        }

        #[tokio::test]
        async fn test_ctrl_a_appends_material() {
            let mut app = test_app(MockIngestApi::new());
            app.handle_key(ctrl('a')).await.unwrap();
            assert_eq!(app.state.form.input_materials.len(), 2);
        }

        #[tokio::test]
        async fn test_ctrl_s_saves_and_records_timestamp() {
            let mut app = test_app(MockIngestApi::new());
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.state.last_saved.is_some());
            assert_eq!(app.state.status_message.as_deref(), Some("Progress saved"));
        }

        #[tokio::test]
        async fn test_save_failure_warns_but_keeps_running() {
            let mut store = MockKeyValueStore::new();
            store.expect_get().returning(|_| None);
            store.expect_set().returning(|key, _| {
                Err(crate::storage::StorageError::Write {
                    key: key.to_string(),
                    source: std::io::Error::other("quota exceeded"),
                })
            });
            let mut app = App::with_parts(Box::new(store), Box::new(MockIngestApi::new()));
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.state.last_saved.is_none());
            assert!(app
                .state
                .status_message
                .as_deref()
                .unwrap()
                .starts_with("Save failed:"));
        }
    }

    mod pickers {
        use super::*;

        #[test]
        fn test_cycle_country_enters_list_from_either_end() {
            assert_eq!(cycle_country("", 1), "Algeria");
            assert_eq!(cycle_country("", -1), "Nigeria");
        }

        #[test]
        fn test_cycle_country_wraps() {
            assert_eq!(cycle_country("Nigeria", 1), "Algeria");
            assert_eq!(cycle_country("Algeria", -1), "Nigeria");
        }

        #[tokio::test]
        async fn test_country_picker_updates_certificate_requirement() {
            let mut app = test_app(MockIngestApi::new());
            app.state.set_page(FormPage::Two);
            let country_index = app
                .state
                .current_fields()
                .iter()
                .position(|f| *f == FieldId::MaterialCountry(0))
                .unwrap();
            for _ in 0..country_index {
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
            }
            // First option is an AfCFTA state party
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(app.state.form.input_materials[0].country_of_origin, "Algeria");
            assert!(app.state.form.input_materials[0].certificate_required);
        }

        #[tokio::test]
        async fn test_criteria_picker_routes_through_update_fields() {
            let mut app = test_app(MockIngestApi::new());
            app.state.form.origin_criteria = OriginCriteria::SpecificProcedure;
            app.state.form.procedure_description = "roasting".to_string();
            let criteria_index = app
                .state
                .current_fields()
                .iter()
                .position(|f| *f == FieldId::Criteria)
                .unwrap();
            for _ in 0..criteria_index {
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
            }
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            // Moving off specific-procedure clears the dependent field
            assert_eq!(app.state.form.origin_criteria, OriginCriteria::Unset);
            assert_eq!(app.state.form.procedure_description, "");
        }
    }

    mod attachments {
        use super::*;

        #[tokio::test]
        async fn test_typed_path_commits_on_enter() {
            let mut app = test_app(MockIngestApi::new());
            app.state.set_page(FormPage::Two);
            let file_index = app
                .state
                .current_fields()
                .iter()
                .position(|f| *f == FieldId::MaterialFile(0, AttachmentSlot::Invoice))
                .unwrap();
            for _ in 0..file_index {
                app.handle_key(key(KeyCode::Tab)).await.unwrap();
            }
            for c in "/tmp/inv.pdf".chars() {
                app.handle_key(key(KeyCode::Char(c))).await.unwrap();
            }
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            let handle = app.state.form.input_materials[0]
                .invoice_file
                .as_ref()
                .unwrap();
            assert_eq!(handle.file_name, "inv.pdf");
            assert_eq!(app.state.status_message.as_deref(), Some("Attached inv.pdf"));
            assert_eq!(app.state.path_input, "");
        }
    }
}
