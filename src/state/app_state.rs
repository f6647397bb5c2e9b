//! UI-facing application state: current page, focus, transient messages,
//! and the submission flow state machine.

use super::aggregate::FormAggregate;
use super::fields::{page_one_fields, page_two_fields, FieldId};
use super::material::AttachmentSlot;
use chrono::{DateTime, Utc};

/// The two pages of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPage {
    #[default]
    One,
    Two,
}

impl FormPage {
    pub fn title(self) -> &'static str {
        match self {
            FormPage::One => "Page 1: Exporter & Product Details",
            FormPage::Two => "Page 2: Materials & Declaration",
        }
    }
}

/// Submission flow as observed by the UI.
///
/// idle -> (validate) -> confirming -> submitting -> idle. Validation
/// failures and cancelled confirmations fall straight back to idle; the
/// `Submitting` state gates the submit action so it cannot fire twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitFlow {
    #[default]
    Idle,
    Confirming {
        /// True when the highlighted dialog option is "Submit".
        confirm_selected: bool,
    },
    Submitting,
}

/// Terminal outcome of one submission attempt, shown in the result dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
}

/// All mutable UI state around the form aggregate.
#[derive(Debug, Default)]
pub struct AppState {
    pub form: FormAggregate,
    pub page: FormPage,
    page_one_cursor: usize,
    page_two_cursor: usize,
    /// Pending file-path text for the focused attachment field.
    pub path_input: String,
    /// Which attachment field the pending path text belongs to.
    pub path_input_for: Option<(usize, AttachmentSlot)>,
    pub status_message: Option<String>,
    pub last_saved: Option<DateTime<Utc>>,
    pub submit_flow: SubmitFlow,
    pub submission_result: Option<SubmissionOutcome>,
}

impl AppState {
    /// Ordered focusable fields of the current page.
    pub fn current_fields(&self) -> Vec<FieldId> {
        match self.page {
            FormPage::One => page_one_fields(&self.form),
            FormPage::Two => page_two_fields(&self.form),
        }
    }

    /// Focus index on the current page, clamped to the live field list
    /// (conditional rows may have disappeared since the cursor last moved).
    pub fn cursor(&self) -> usize {
        let len = self.current_fields().len();
        let raw = match self.page {
            FormPage::One => self.page_one_cursor,
            FormPage::Two => self.page_two_cursor,
        };
        raw.min(len.saturating_sub(1))
    }

    /// The field currently under focus.
    pub fn active_field(&self) -> Option<FieldId> {
        self.current_fields().get(self.cursor()).copied()
    }

    pub fn next_field(&mut self) {
        let len = self.current_fields().len();
        if len == 0 {
            return;
        }
        let next = (self.cursor() + 1) % len;
        self.set_cursor(next);
    }

    pub fn prev_field(&mut self) {
        let len = self.current_fields().len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor();
        let prev = if cursor == 0 { len - 1 } else { cursor - 1 };
        self.set_cursor(prev);
    }

    fn set_cursor(&mut self, index: usize) {
        match self.page {
            FormPage::One => self.page_one_cursor = index,
            FormPage::Two => self.page_two_cursor = index,
        }
        // A pending path only makes sense while its field keeps focus
        self.discard_path_input();
    }

    pub fn set_page(&mut self, page: FormPage) {
        if self.page != page {
            self.page = page;
            self.discard_path_input();
        }
    }

    pub fn discard_path_input(&mut self) {
        self.path_input.clear();
        self.path_input_for = None;
    }

    /// Whether the pending path buffer belongs to the given attachment field.
    pub fn path_input_matches(&self, index: usize, slot: AttachmentSlot) -> bool {
        self.path_input_for == Some((index, slot))
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Reset the aggregate and every piece of per-form UI state after a
    /// successful submission. The saved-progress timestamp is left alone.
    pub fn reset_form(&mut self) {
        self.form = FormAggregate::default();
        self.page = FormPage::One;
        self.page_one_cursor = 0;
        self.page_two_cursor = 0;
        self.discard_path_input();
    }
}
