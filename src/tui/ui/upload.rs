//! Upload panel: patient id + record file, displays the stored record id.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::{
    labeled, panel_block, render_result, render_submit, render_text_field, success_line,
    FormPanel,
};
use crate::application::{Action, Outcome, Submission};
use crate::domain::{UploadReceipt, UploadRequest};

/// Focusable elements of the upload form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadField {
    #[default]
    PatientId,
    File,
    Submit,
}

/// Upload panel state.
#[derive(Debug, Default)]
pub struct UploadPanel {
    pub patient_id: String,
    /// Path of the selected file; empty means no file selected
    pub file: String,
    pub focus: UploadField,
    /// Last successful upload; its presence is the success flag
    pub receipt: Option<UploadReceipt>,
    in_flight: usize,
}

impl UploadPanel {
    /// Whether the confirmation block is shown.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.receipt.is_some()
    }
}

impl FormPanel for UploadPanel {
    fn next_field(&mut self) {
        self.focus = match self.focus {
            UploadField::PatientId => UploadField::File,
            UploadField::File => UploadField::Submit,
            UploadField::Submit => UploadField::PatientId,
        };
    }

    fn prev_field(&mut self) {
        self.focus = match self.focus {
            UploadField::PatientId => UploadField::Submit,
            UploadField::File => UploadField::PatientId,
            UploadField::Submit => UploadField::File,
        };
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            UploadField::PatientId => Some(&mut self.patient_id),
            UploadField::File => Some(&mut self.file),
            UploadField::Submit => None,
        }
    }

    fn submit(&mut self) -> Result<Submission, &'static str> {
        let file = self.file.trim();
        if file.is_empty() {
            return Err("Please select a file");
        }
        if self.patient_id.is_empty() {
            return Err("Please enter a patient ID");
        }
        self.in_flight += 1;
        Ok(Submission::Upload(UploadRequest::new(
            self.patient_id.clone(),
            file,
        )))
    }

    fn settle(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Outcome::Uploaded(receipt) = outcome {
            self.receipt = Some(receipt);
        }
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Render the upload panel.
pub fn render(f: &mut Frame, area: Rect, state: &UploadPanel, focused: bool) {
    let block = panel_block("Upload Record", Action::Upload, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Patient ID
            Constraint::Length(3), // File
            Constraint::Length(2), // Button + status
            Constraint::Min(0),    // Result
        ])
        .margin(1)
        .split(inner);

    let active = |field: UploadField| focused && state.focus == field;

    render_text_field(
        f,
        chunks[0],
        Action::Upload,
        "Patient ID:",
        &state.patient_id,
        "patient identifier",
        active(UploadField::PatientId),
    );
    render_text_field(
        f,
        chunks[1],
        Action::Upload,
        "File:",
        &state.file,
        "path to record file",
        active(UploadField::File),
    );
    render_submit(
        f,
        chunks[2],
        Action::Upload,
        "Upload",
        active(UploadField::Submit),
        state.in_flight,
    );

    if let Some(receipt) = &state.receipt {
        render_result(
            f,
            chunks[3],
            vec![
                labeled("Record ID:", receipt.record_id.as_str()),
                success_line("Record uploaded successfully".to_string()),
            ],
        );
    }
}
